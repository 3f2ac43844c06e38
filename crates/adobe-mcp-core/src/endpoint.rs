//! Endpoint configuration for one application's proxy connection.
//!
//! A configuration is validated once on construction and immutable afterward.

use std::time::Duration;

use url::Url;

/// Schemes a transport exists for.
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "tcp"];

/// Endpoint configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Application identity cannot be empty")]
    EmptyApplication,

    #[error("Invalid proxy address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Unsupported proxy scheme '{0}' (expected http, https or tcp)")]
    UnsupportedScheme(String),

    #[error("Proxy address '{0}' has no host")]
    MissingHost(String),

    #[error("Proxy address '{0}' has no port")]
    MissingPort(String),

    #[error("Timeout for '{0}' must be greater than zero")]
    ZeroTimeout(String),

    #[error("Invalid timeout in {var}: '{value}' is not a whole number of seconds")]
    InvalidTimeout { var: String, value: String },

    #[error("Failed to read environment file: {0}")]
    EnvFile(String),
}

/// Which wire transport an address selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// One HTTP POST per command (`http://`, `https://`).
    Http,
    /// Persistent newline-delimited JSON over TCP (`tcp://`).
    Socket,
}

/// Address, identity and timeout binding for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    application: String,
    address: Url,
    timeout: Duration,
}

impl EndpointConfig {
    /// Parse and validate an endpoint configuration.
    pub fn new(
        application: impl Into<String>,
        address: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let url = Url::parse(address).map_err(|e| ConfigError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(application, url, timeout)
    }

    /// Validate an already parsed address.
    pub fn from_url(
        application: impl Into<String>,
        address: Url,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let application = application.into();
        if application.trim().is_empty() {
            return Err(ConfigError::EmptyApplication);
        }

        if !SUPPORTED_SCHEMES.contains(&address.scheme()) {
            return Err(ConfigError::UnsupportedScheme(address.scheme().to_string()));
        }

        if address.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingHost(address.to_string()));
        }

        // http/https fall back to their well-known ports; tcp has none.
        if address.port_or_known_default().is_none() {
            return Err(ConfigError::MissingPort(address.to_string()));
        }

        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout(application));
        }

        Ok(Self {
            application,
            address,
            timeout,
        })
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub const fn address(&self) -> &Url {
        &self.address
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Transport selected by the address scheme.
    pub fn transport_kind(&self) -> TransportKind {
        match self.address.scheme() {
            "tcp" => TransportKind::Socket,
            _ => TransportKind::Http,
        }
    }

    /// `host:port` for socket connections.
    pub fn socket_addr(&self) -> String {
        let host = self.address.host_str().unwrap_or_default();
        let port = self.address.port_or_known_default().unwrap_or_default();
        format!("{host}:{port}")
    }
}
