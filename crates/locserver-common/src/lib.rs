//! # locserver-common
//!
//! Shared infrastructure for the locserver workspace: structured-logging
//! initialization and, behind the `testing` feature, fixture builders for
//! locale directory trees used by integration tests across crates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_logging, LoggingConfig};
