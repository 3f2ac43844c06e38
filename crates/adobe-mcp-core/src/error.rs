//! Caller misuse of the dispatch API.
//!
//! These are local precondition violations, never proxy or application
//! failures, so they are kept apart from [`crate::Outcome`].

use thiserror::Error;

/// Errors raised before any command reaches a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// No endpoint was registered for the application identity.
    #[error("No endpoint registered for application '{0}'")]
    Unregistered(String),
}
