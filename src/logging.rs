//! Structured logging utilities for the stub registry.
//!
//! All registry events go through these helpers so that field names stay
//! consistent (`subject`, `method`, `stubbed`, ...) across the crate.

/// Log a successful override installation.
pub fn log_override_installed(subject: &str, method: &str, replaced: bool) {
    tracing::debug!(subject, method, replaced, "Override installed");
}

/// Log an override rejected by the signature check.
pub fn log_override_rejected(subject: &str, method: &str, reason: &str) {
    tracing::warn!(subject, method, reason, "Override rejected");
}

/// Log an override removal.
pub fn log_override_restored(subject: &str, method: &str, was_stubbed: bool) {
    if was_stubbed {
        tracing::debug!(subject, method, "Override restored");
    } else {
        tracing::trace!(subject, method, "Restore on unstubbed method ignored");
    }
}

/// Log every override being removed at once.
pub fn log_overrides_cleared(subject: &str, count: usize) {
    tracing::debug!(subject, count, "All overrides restored");
}

/// Log a dispatched call. Only emitted when `trace_dispatch` is enabled.
pub fn log_dispatch(subject: &str, method: &str, stubbed: bool, args: usize) {
    tracing::debug!(subject, method, stubbed, args, "Dispatching call");
}

/// Log a dispatch that could not be routed.
pub fn log_dispatch_failed(subject: &str, method: &str, reason: &str) {
    tracing::error!(subject, method, reason, "Dispatch failed");
}

/// Log a history reset.
pub fn log_history_reset(subject: &str, method: Option<&str>, cleared: usize) {
    match method {
        Some(method) => tracing::debug!(subject, method, cleared, "Call history reset"),
        None => tracing::debug!(subject, cleared, "All call history reset"),
    }
}

/// Log configuration loading.
pub fn log_config_loaded(path: &str) {
    tracing::info!(path, "Loaded stub configuration");
}
