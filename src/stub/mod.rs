//! The stub registry and the pieces it is built from.
//!
//! - [`method`]: erased callables, per-type method tables and overrides.
//! - [`validate`]: install-time signature check.
//! - [`registry`]: override and history state behind a single lock.
//! - [`dispatch`]: the call path that routes to an override or the real method.

pub mod dispatch;
pub mod method;
pub mod registry;
pub mod validate;
