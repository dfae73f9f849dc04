//! Call-shape descriptors and the install-time signature check.
//!
//! Rust has no runtime reflection over methods, so every callable carries a
//! [`Signature`] built from its static types when it is registered. Checking
//! an override is then a structural comparison of two descriptors.

use std::any::{type_name, TypeId};
use std::fmt;

/// Runtime descriptor for a single parameter or return type.
///
/// Two tags are equal iff they describe the same type; the name is only
/// used for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Tag for the receiver slot of a method on `S`.
    pub fn receiver<S: 'static>() -> Self {
        Self::of::<&'static S>()
    }

    pub fn is_unit(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Parameter and return shape of a callable.
///
/// Parameters include the receiver as the first slot. A unit return is
/// represented as zero returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<TypeTag>,
    returns: Vec<TypeTag>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receiver<S: 'static>(mut self) -> Self {
        self.params.push(TypeTag::receiver::<S>());
        self
    }

    pub fn param<T: 'static>(mut self) -> Self {
        self.params.push(TypeTag::of::<T>());
        self
    }

    pub fn returning<R: 'static>(mut self) -> Self {
        let tag = TypeTag::of::<R>();
        if !tag.is_unit() {
            self.returns.push(tag);
        }
        self
    }

    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    pub fn returns(&self) -> &[TypeTag] {
        &self.returns
    }

    /// Number of arguments a caller passes, i.e. parameters minus the receiver.
    pub fn arity(&self) -> usize {
        self.params.len().saturating_sub(1)
    }

    /// Compare `candidate` against this (expected) signature.
    ///
    /// Counts are checked before types so the first reported mismatch is
    /// the most useful one.
    pub fn check(&self, candidate: &Signature) -> Result<(), Mismatch> {
        if self.params.len() != candidate.params.len() {
            return Err(Mismatch::ParamCount {
                expected: self.params.len(),
                actual: candidate.params.len(),
            });
        }
        if self.returns.len() != candidate.returns.len() {
            return Err(Mismatch::ReturnCount {
                expected: self.returns.len(),
                actual: candidate.returns.len(),
            });
        }
        for (position, (expected, actual)) in self.params.iter().zip(&candidate.params).enumerate() {
            if expected != actual {
                return Err(Mismatch::ParamType {
                    position,
                    expected: *expected,
                    actual: *actual,
                });
            }
        }
        for (position, (expected, actual)) in self.returns.iter().zip(&candidate.returns).enumerate() {
            if expected != actual {
                return Err(Mismatch::ReturnType {
                    position,
                    expected: *expected,
                    actual: *actual,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params.iter().map(TypeTag::name).collect();
        write!(f, "fn({})", params.join(", "))?;
        match self.returns.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " -> {}", single),
            many => {
                let names: Vec<&str> = many.iter().map(TypeTag::name).collect();
                write!(f, " -> ({})", names.join(", "))
            }
        }
    }
}

/// The first disagreement between an override and the method it replaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mismatch {
    ParamCount { expected: usize, actual: usize },
    ReturnCount { expected: usize, actual: usize },
    ParamType {
        position: usize,
        expected: TypeTag,
        actual: TypeTag,
    },
    ReturnType {
        position: usize,
        expected: TypeTag,
        actual: TypeTag,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::ParamCount { expected, actual } => write!(
                f,
                "expected {} parameters including the receiver, found {}. Did you forget to include the receiver argument?",
                expected, actual
            ),
            Mismatch::ReturnCount { expected, actual } => {
                write!(f, "expected {} return values, found {}", expected, actual)
            }
            Mismatch::ParamType {
                position,
                expected,
                actual,
            } => write!(
                f,
                "parameter #{} must be `{}`, found `{}`",
                position, expected, actual
            ),
            Mismatch::ReturnType {
                position,
                expected,
                actual,
            } => write!(
                f,
                "return #{} must be `{}`, found `{}`",
                position, expected, actual
            ),
        }
    }
}
