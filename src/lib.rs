pub mod config;
pub mod logging;
pub mod report;
pub mod signature;
pub mod stub;
pub mod value;
use miette::Diagnostic;

pub use config::Config;
pub use report::{HistoryReport, ReportFormat};
pub use signature::{Mismatch, Signature, TypeTag};
pub use stub::method::{ArgumentError, Callable, IntoStub, MethodTable, Override, Stubbable};
pub use stub::registry::StubRegistry;
pub use value::{ArgValue, CallRecord, IntoArgs, StubValue};

/// Result type alias for stub operations
pub type Result<T> = std::result::Result<T, StubError>;

/// Error types for stub setup, dispatch and history queries
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum StubError {
    #[error("Invalid override for {subject}.{method}: {reason}")]
    #[diagnostic(
        code(method_stub::invalid_override),
        help("Check the method name against the subject's method table. Use `StubRegistry::method_names` to list what can be stubbed.")
    )]
    InvalidOverride {
        subject: String,
        method: String,
        reason: String,
    },

    #[error("Override for {subject}.{method} does not match `{expected}`: {mismatch}")]
    #[diagnostic(
        code(method_stub::signature_mismatch),
        help("The override takes the subject as its first parameter, followed by the method's own parameters, and must return exactly the method's return type.")
    )]
    SignatureMismatch {
        subject: String,
        method: String,
        expected: Signature,
        mismatch: Mismatch,
    },

    #[error("{subject} has no method named {method}")]
    #[diagnostic(
        code(method_stub::no_such_method),
        help("The wrapper dispatched a name that is neither stubbed nor present in the method table. Regenerate or fix the wrapper.")
    )]
    NoSuchMethod { subject: String, method: String },

    #[error("Arguments dispatched to {method} do not fit its signature: {source}")]
    #[diagnostic(
        code(method_stub::argument_mismatch),
        help("The wrapper must forward arguments in declaration order with the exact parameter types.")
    )]
    ArgumentMismatch {
        method: String,
        #[source]
        source: ArgumentError,
    },

    #[error("Result of {method} is `{actual}`, caller expected `{expected}`")]
    #[diagnostic(
        code(method_stub::result_mismatch),
        help("The type requested from `StubRegistry::call` must be the method's return type.")
    )]
    ResultMismatch {
        method: String,
        expected: TypeTag,
        actual: TypeTag,
    },

    #[error("No call to {method} at index {index} ({len} recorded)")]
    #[diagnostic(code(method_stub::index_out_of_range))]
    IndexOutOfRange {
        method: String,
        index: usize,
        len: usize,
    },

    #[error("No calls to {method} were recorded")]
    #[diagnostic(code(method_stub::no_calls_recorded))]
    NoCallsRecorded { method: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(method_stub::config_error),
        help("Ensure the config file is valid TOML and readable. Remove it to fall back to defaults.")
    )]
    Config(String),

    #[error("Failed to render history report: {0}")]
    #[diagnostic(code(method_stub::report_error))]
    Report(String),
}
