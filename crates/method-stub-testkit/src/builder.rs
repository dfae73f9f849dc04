use method_stub::{Config, IntoStub, Override, Result, StubRegistry, Stubbable};
use std::sync::Arc;

type PendingStub<S> = (String, Override<S>);

/// Fluent setup for a [`StubRegistry`]; install errors surface from
/// [`StubSetup::build`].
pub struct StubSetup<S> {
    subject: Arc<S>,
    config: Config,
    stubs: Vec<PendingStub<S>>,
}

impl<S: Stubbable> StubSetup<S> {
    pub fn new(subject: S) -> Self {
        Self::from_arc(Arc::new(subject))
    }

    pub fn from_arc(subject: Arc<S>) -> Self {
        Self {
            subject,
            config: Config::default(),
            stubs: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_stub<M>(self, method: &str, f: impl IntoStub<S, M>) -> Self {
        self.with_override(method, Override::new(f))
    }

    pub fn with_override(mut self, method: &str, stub: Override<S>) -> Self {
        self.stubs.push((method.to_string(), stub));
        self
    }

    /// Create the registry and install every queued stub in order
    pub fn build(self) -> Result<StubRegistry<S>> {
        let registry = StubRegistry::from_arc(self.subject).with_config(&self.config);
        for (method, stub) in self.stubs {
            registry.install(&method, stub)?;
        }
        Ok(registry)
    }
}
