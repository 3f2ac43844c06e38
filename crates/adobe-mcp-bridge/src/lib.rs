//! Command dispatch bridge for adobe-mcp.
//!
//! Operations call [`Dispatcher::dispatch`] with a command name and a
//! parameter map. The dispatcher assigns a correlation id, sends the command
//! through the application's [`TransportClient`] to the proxy, waits for the
//! matching reply up to the configured timeout, and returns an [`Outcome`].
//!
//! Applications are bound to proxy endpoints in a [`Registry`]:
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//! use adobe_mcp_bridge::{Registry, indesign};
//!
//! let registry = Registry::new();
//! registry
//!     .register("indesign", "http://localhost:3001", Duration::from_secs(20))
//!     .await?;
//!
//! let dispatcher = registry.dispatcher("indesign").await?;
//! let outcome = indesign::get_document_info(&dispatcher).await;
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod client;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod indesign;
pub mod registry;
pub mod socket;

// Re-export core types callers need alongside the bridge
pub use adobe_mcp_core::{
    EndpointConfig, EndpointSettings, ErrorInfo, FailureOrigin, Outcome, OutcomeError,
    Parameters, TransportError, UsageError,
};

pub use client::{TIMEOUT_GRACE, TransportClient};
pub use dispatch::{Dispatcher, params};
pub use error::RegistrationError;
pub use http::HttpTransport;
pub use registry::Registry;
pub use socket::SocketTransport;

// Dev-dependencies used only by integration tests
#[cfg(test)]
use axum as _;
#[cfg(test)]
use mockall as _;
