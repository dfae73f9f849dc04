use super::registry::StubRegistry;
use crate::logging;
use crate::signature::TypeTag;
use crate::value::{ArgValue, IntoArgs, StubValue};
use crate::{Result, StubError};

impl<S: 'static> StubRegistry<S> {
    /// Route a call to `method` through its override, or the real method when
    /// none is installed, and record the arguments.
    ///
    /// The registry lock is released before anything is invoked. The call is
    /// recorded once the invocation returns, so history order is record
    /// order. Calls that cannot be routed are not recorded.
    pub fn dispatch(&self, method: &str, args: impl IntoArgs) -> Result<Vec<ArgValue>> {
        let args = args.into_args();
        let stub = self.override_for(method);
        let stubbed = stub.is_some();

        if self.config().trace_dispatch {
            logging::log_dispatch(self.subject_name(), method, stubbed, args.len());
        }

        let outcome = match &stub {
            Some(callable) => callable.invoke(self.subject(), &args),
            None => match self.methods().get(method) {
                Some(callable) => callable.invoke(self.subject(), &args),
                None => {
                    logging::log_dispatch_failed(self.subject_name(), method, "no such method");
                    return Err(StubError::NoSuchMethod {
                        subject: self.subject_name().to_string(),
                        method: method.to_string(),
                    });
                }
            },
        };

        let results = outcome.map_err(|source| {
            logging::log_dispatch_failed(self.subject_name(), method, &source.to_string());
            StubError::ArgumentMismatch {
                method: method.to_string(),
                source,
            }
        })?;

        self.record(method, args);
        Ok(results)
    }

    /// Typed dispatch for wrapper types: returns the single result as `R`, or
    /// `()` for methods without a return value.
    pub fn call<R: StubValue + Clone>(&self, method: &str, args: impl IntoArgs) -> Result<R> {
        let result = self
            .dispatch(method, args)?
            .into_iter()
            .next()
            .unwrap_or_else(|| ArgValue::new(()));

        result
            .downcast_ref::<R>()
            .cloned()
            .ok_or_else(|| StubError::ResultMismatch {
                method: method.to_string(),
                expected: TypeTag::of::<R>(),
                actual: result.type_tag(),
            })
    }
}
