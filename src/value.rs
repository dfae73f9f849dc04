//! Type-erased argument and result values.
//!
//! Everything that crosses the dispatcher is boxed into an [`ArgValue`]. The
//! history and the validator only ever see these erased values and
//! [`TypeTag`]s; concrete types are recovered by downcasting at the point of
//! invocation.

use crate::signature::TypeTag;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value that can be passed through the dispatcher and stored in history.
///
/// Implemented for every `'static` type that is `Clone + PartialEq + Debug`
/// and safe to share across threads.
pub trait StubValue: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another erased value.
    fn dyn_eq(&self, other: &dyn StubValue) -> bool;

    fn type_tag(&self) -> TypeTag;
}

impl<T> StubValue for T
where
    T: Any + Clone + PartialEq + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn StubValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

/// Immutable, cheaply clonable erased value.
#[derive(Clone)]
pub struct ArgValue(Arc<dyn StubValue>);

impl ArgValue {
    pub fn new<T: StubValue>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: StubValue>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn is<T: StubValue>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    pub fn type_tag(&self) -> TypeTag {
        self.0.type_tag()
    }
}

impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_ref(), f)
    }
}

/// The arguments of one recorded invocation, receiver excluded.
///
/// Records have no identity beyond their position in a method's history, so
/// two calls with equal arguments produce equal records.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CallRecord(Vec<ArgValue>);

impl CallRecord {
    pub fn new(args: impl IntoArgs) -> Self {
        Self(args.into_args())
    }

    pub fn args(&self) -> &[ArgValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Typed access to the argument at `position`.
    pub fn arg<T: StubValue>(&self, position: usize) -> Option<&T> {
        self.0.get(position).and_then(ArgValue::downcast_ref)
    }

    pub(crate) fn matches(&self, args: &[ArgValue]) -> bool {
        self.0.as_slice() == args
    }
}

/// Conversion into an erased argument list.
pub trait IntoArgs {
    fn into_args(self) -> Vec<ArgValue>;
}

impl IntoArgs for Vec<ArgValue> {
    fn into_args(self) -> Vec<ArgValue> {
        self
    }
}

impl IntoArgs for CallRecord {
    fn into_args(self) -> Vec<ArgValue> {
        self.0
    }
}

macro_rules! impl_into_args {
    ($($ty:ident $var:ident),*) => {
        impl<$($ty: StubValue),*> IntoArgs for ($($ty,)*) {
            #[allow(clippy::unused_unit)]
            fn into_args(self) -> Vec<ArgValue> {
                let ($($var,)*) = self;
                vec![$(ArgValue::new($var)),*]
            }
        }
    };
}

impl_into_args!();
impl_into_args!(A1 a1);
impl_into_args!(A1 a1, A2 a2);
impl_into_args!(A1 a1, A2 a2, A3 a3);
impl_into_args!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_args!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_into_args!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
