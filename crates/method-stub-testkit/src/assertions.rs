use method_stub::{CallRecord, IntoArgs, StubRegistry};

/// Panicking assertions over a registry's call history.
pub struct CallAssertions<'a, S> {
    registry: &'a StubRegistry<S>,
}

impl<'a, S: 'static> CallAssertions<'a, S> {
    pub fn new(registry: &'a StubRegistry<S>) -> Self {
        Self { registry }
    }

    pub fn assert_called_times(&self, method: &str, expected: usize) -> &Self {
        let actual = self.registry.call_count(method);
        assert_eq!(
            actual,
            expected,
            "{}.{} was called {} time(s), expected {}; history: {:?}",
            self.registry.subject_name(),
            method,
            actual,
            expected,
            self.registry.call_history(method)
        );
        self
    }

    pub fn assert_not_called(&self, method: &str) -> &Self {
        self.assert_called_times(method, 0)
    }

    pub fn assert_called_with(&self, method: &str, args: impl IntoArgs) -> &Self {
        let expected = CallRecord::new(args);
        assert!(
            self.registry.was_called_with(method, expected.clone()),
            "{}.{} was never called with {:?}; history: {:?}",
            self.registry.subject_name(),
            method,
            expected,
            self.registry.call_history(method)
        );
        self
    }

    pub fn assert_last_call(&self, method: &str, args: impl IntoArgs) -> &Self {
        let expected = CallRecord::new(args);
        match self.registry.last_call_record(method) {
            Ok(actual) => assert_eq!(
                actual,
                expected,
                "last call to {}.{} does not match",
                self.registry.subject_name(),
                method
            ),
            Err(e) => panic!("{}", e),
        }
        self
    }

    pub fn assert_stubbed(&self, method: &str) -> &Self {
        assert!(
            self.registry.is_stubbed(method),
            "{}.{} is not stubbed",
            self.registry.subject_name(),
            method
        );
        self
    }

    pub fn assert_not_stubbed(&self, method: &str) -> &Self {
        assert!(
            !self.registry.is_stubbed(method),
            "{}.{} is still stubbed",
            self.registry.subject_name(),
            method
        );
        self
    }
}
