use super::method::{MethodTable, Override};
use crate::{Result, StubError};

/// Check that `candidate` may replace `method` on a subject described by
/// `methods`.
///
/// Pure: touches no registry state, so it runs before the registry lock is
/// taken.
pub fn validate<S: 'static>(
    subject: &str,
    methods: &MethodTable<S>,
    method: &str,
    candidate: &Override<S>,
) -> Result<()> {
    let real = methods
        .get(method)
        .ok_or_else(|| StubError::InvalidOverride {
            subject: subject.to_string(),
            method: method.to_string(),
            reason: format!("{} is not a method of {}", method, subject),
        })?;

    real.signature()
        .check(candidate.signature())
        .map_err(|mismatch| StubError::SignatureMismatch {
            subject: subject.to_string(),
            method: method.to_string(),
            expected: real.signature().clone(),
            mismatch,
        })
}
