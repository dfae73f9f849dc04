pub mod assertions;
pub mod builder;
pub mod logging;

pub use assertions::CallAssertions;
pub use builder::StubSetup;
pub use logging::init_test_tracing;
