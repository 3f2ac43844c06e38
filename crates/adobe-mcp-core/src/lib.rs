//! Core types for the adobe-mcp command dispatch bridge.
//!
//! This crate holds the wire model (commands and replies), the command
//! builder, endpoint configuration, the normalized [`Outcome`], and the
//! [`Transport`] port implemented by the bridge crate. It performs no network
//! I/O.
#![deny(unused_crate_dependencies)]

pub mod builder;
pub mod command;
pub mod endpoint;
pub mod error;
pub mod outcome;
pub mod ports;
pub mod settings;

pub use builder::CommandBuilder;
pub use command::{Command, CommandId, ErrorInfo, Parameters, RequestFrame, Response, ResponseBody};
pub use endpoint::{ConfigError, EndpointConfig, SUPPORTED_SCHEMES, TransportKind};
pub use error::UsageError;
pub use outcome::{FailureOrigin, Outcome, OutcomeError};
pub use ports::{Transport, TransportError};
pub use settings::{
    APPLICATIONS, DEFAULT_PROXY_TIMEOUT_SECS, DEFAULT_PROXY_URL, EndpointOverride,
    EndpointSettings,
};
