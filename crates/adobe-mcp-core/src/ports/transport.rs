//! Transport port for delivering commands to a proxy endpoint.
//!
//! A transport owns the wire: it encodes the request frame, writes it to the
//! endpoint and waits for the matching reply. Timing and cancellation policy
//! live in the client that drives it.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::command::{Command, Response};

/// Failures of the request/response channel itself.
///
/// None of these are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No matching reply within the configured wait.
    #[error("No reply from proxy within {}ms", after.as_millis())]
    Timeout { after: Duration },

    /// Endpoint unreachable, connection dropped, or client closed.
    #[error("Proxy unavailable: {0}")]
    Unavailable(String),

    /// Reply received but not decodable as a response.
    #[error("Malformed proxy reply: {0}")]
    Protocol(String),
}

impl TransportError {
    /// Stable kind name used in outcomes.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "Timeout",
            Self::Unavailable(_) => "TransportUnavailable",
            Self::Protocol(_) => "ProtocolError",
        }
    }
}

/// Wire transport to one proxy endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `command` on behalf of `application` and wait up to `timeout`
    /// for the reply whose id matches the command's id.
    ///
    /// Replies carrying `status=error` are returned as `Ok`.
    async fn exchange(
        &self,
        application: &str,
        command: &Command,
        timeout: Duration,
    ) -> Result<Response, TransportError>;

    /// Short label for logs (`http`, `tcp`).
    fn name(&self) -> &'static str;
}
