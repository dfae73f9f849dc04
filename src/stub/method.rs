use crate::signature::{Signature, TypeTag};
use crate::value::{ArgValue, StubValue};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Erased invocation: receiver plus erased arguments in, erased results out.
pub type Invoker<S> =
    dyn Fn(&S, &[ArgValue]) -> Result<Vec<ArgValue>, ArgumentError> + Send + Sync;

/// Dispatched arguments that cannot be fed to a callable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("expected {expected} arguments, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("parameter #{position} must be `{expected}`, got `{actual}`")]
    Type {
        position: usize,
        expected: TypeTag,
        actual: TypeTag,
    },
}

/// A callable on `S` together with the signature it was built from.
pub struct Callable<S> {
    signature: Signature,
    invoker: Arc<Invoker<S>>,
}

impl<S: 'static> Callable<S> {
    pub fn new<F>(signature: Signature, invoker: F) -> Self
    where
        F: Fn(&S, &[ArgValue]) -> Result<Vec<ArgValue>, ArgumentError> + Send + Sync + 'static,
    {
        Self {
            signature,
            invoker: Arc::new(invoker),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke with `subject` as the receiver. The argument count is checked
    /// against the signature before the invoker runs.
    pub fn invoke(&self, subject: &S, args: &[ArgValue]) -> Result<Vec<ArgValue>, ArgumentError> {
        let expected = self.signature.arity();
        if args.len() != expected {
            return Err(ArgumentError::Arity {
                expected,
                actual: args.len(),
            });
        }
        (self.invoker)(subject, args)
    }
}

impl<S> Clone for Callable<S> {
    fn clone(&self) -> Self {
        Self {
            signature: self.signature.clone(),
            invoker: Arc::clone(&self.invoker),
        }
    }
}

impl<S> fmt::Debug for Callable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Conversion from a typed function `Fn(&S, A1, .., An) -> R` into a
/// [`Callable`]. `Marker` only disambiguates the arity and is inferred.
pub trait IntoStub<S, Marker>: Sized {
    fn into_callable(self) -> Callable<S>;
}

fn downcast_arg<T: StubValue + Clone>(
    args: &[ArgValue],
    position: usize,
) -> Result<T, ArgumentError> {
    // `position` counts the receiver as parameter #0.
    let value = args.get(position - 1).ok_or(ArgumentError::Arity {
        expected: position,
        actual: args.len(),
    })?;
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| ArgumentError::Type {
            position,
            expected: TypeTag::of::<T>(),
            actual: value.type_tag(),
        })
}

fn into_results<R: StubValue>(value: R) -> Vec<ArgValue> {
    if TypeTag::of::<R>().is_unit() {
        Vec::new()
    } else {
        vec![ArgValue::new(value)]
    }
}

macro_rules! impl_into_stub {
    ($($ty:ident $var:ident),*) => {
        impl<S, F, R, $($ty,)*> IntoStub<S, fn($($ty,)*) -> R> for F
        where
            S: 'static,
            F: Fn(&S, $($ty,)*) -> R + Send + Sync + 'static,
            R: StubValue,
            $($ty: StubValue + Clone,)*
        {
            fn into_callable(self) -> Callable<S> {
                let signature = Signature::new()
                    .receiver::<S>()
                    $(.param::<$ty>())*
                    .returning::<R>();
                let func = self;
                Callable::new(signature, move |subject: &S, #[allow(unused_variables)] args: &[ArgValue]| {
                    #[allow(unused_mut)]
                    let mut _position = 0;
                    $(
                        _position += 1;
                        let $var = downcast_arg::<$ty>(args, _position)?;
                    )*
                    Ok(into_results(func(subject, $($var,)*)))
                })
            }
        }
    };
}

impl_into_stub!();
impl_into_stub!(A1 a1);
impl_into_stub!(A1 a1, A2 a2);
impl_into_stub!(A1 a1, A2 a2, A3 a3);
impl_into_stub!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_into_stub!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_into_stub!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);

/// The real methods of a subject type, keyed by name.
///
/// This is what a wrapper generator (or a hand-written `Stubbable` impl)
/// emits in place of runtime reflection.
pub struct MethodTable<S> {
    methods: BTreeMap<String, Callable<S>>,
}

impl<S: 'static> MethodTable<S> {
    pub fn new() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }

    /// Register `f` as the real implementation of `name`.
    pub fn method<M>(mut self, name: &str, f: impl IntoStub<S, M>) -> Self {
        self.insert(name, f.into_callable());
        self
    }

    pub fn insert(&mut self, name: &str, callable: Callable<S>) {
        self.methods.insert(name.to_string(), callable);
    }

    pub fn get(&self, name: &str) -> Option<&Callable<S>> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Method names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<S: 'static> Default for MethodTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A subject type that can describe its own methods.
pub trait Stubbable: Send + Sync + Sized + 'static {
    fn method_table() -> MethodTable<Self>;
}

/// A substitute implementation waiting to be installed.
pub struct Override<S> {
    callable: Callable<S>,
}

impl<S: 'static> Override<S> {
    /// Build from a typed function whose first parameter is the subject.
    pub fn new<M>(f: impl IntoStub<S, M>) -> Self {
        Self {
            callable: f.into_callable(),
        }
    }

    /// Build from a hand-declared signature and an erased invoker.
    ///
    /// The signature is trusted as declared; it is what gets validated at
    /// install time.
    pub fn dynamic<F>(signature: Signature, invoker: F) -> Self
    where
        F: Fn(&S, &[ArgValue]) -> Result<Vec<ArgValue>, ArgumentError> + Send + Sync + 'static,
    {
        Self {
            callable: Callable::new(signature, invoker),
        }
    }

    pub fn signature(&self) -> &Signature {
        self.callable.signature()
    }

    pub(crate) fn into_callable(self) -> Callable<S> {
        self.callable
    }
}

impl<S> Clone for Override<S> {
    fn clone(&self) -> Self {
        Self {
            callable: self.callable.clone(),
        }
    }
}

impl<S> fmt::Debug for Override<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Override").field(&self.callable).finish()
    }
}
