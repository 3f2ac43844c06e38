//! Registration errors.

use adobe_mcp_core::{ConfigError, TransportError};
use thiserror::Error;

/// Errors that can occur while binding an application to a transport client.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid endpoint: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create transport: {0}")]
    Transport(#[from] TransportError),
}
