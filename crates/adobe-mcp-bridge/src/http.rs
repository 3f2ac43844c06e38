//! HTTP transport: one `POST {address}/command` per command.
//!
//! The request body is the JSON request frame and the response body is the
//! JSON reply. The timeout covers connecting, sending and reading the body.

use std::time::Duration;

use adobe_mcp_core::{Command, EndpointConfig, RequestFrame, Response, Transport, TransportError};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Path appended to the endpoint address.
const COMMAND_PATH: &str = "command";

/// Transport that posts each command to the proxy over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    command_url: Url,
}

impl HttpTransport {
    /// Create a transport for an `http://` or `https://` endpoint.
    pub fn new(config: &EndpointConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .pool_max_idle_per_host(1)
            .build()
            .map_err(|e| TransportError::Unavailable(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            command_url: command_url(config.address())?,
        })
    }

    /// URL commands are posted to.
    pub const fn command_url(&self) -> &Url {
        &self.command_url
    }
}

/// Resolve `{address}/command`, keeping any base path on the address.
fn command_url(address: &Url) -> Result<Url, TransportError> {
    let mut base = address.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(COMMAND_PATH)
        .map_err(|e| TransportError::Unavailable(format!("Invalid proxy address {address}: {e}")))
}

/// Map a reqwest failure onto the transport taxonomy.
fn classify(err: &reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout { after: timeout }
    } else if err.is_decode() {
        TransportError::Protocol(err.to_string())
    } else {
        TransportError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(
        &self,
        application: &str,
        command: &Command,
        timeout: Duration,
    ) -> Result<Response, TransportError> {
        let frame = RequestFrame {
            application,
            command,
        };

        debug!(url = %self.command_url, id = %command.id, "POST command");

        let response = self
            .client
            .post(self.command_url.clone())
            .json(&frame)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(&e, timeout))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify(&e, timeout))?;

        // Proxies may answer application errors with a non-2xx status; only a
        // body that is not a reply is a protocol failure.
        serde_json::from_slice::<Response>(&body).map_err(|e| {
            if status.is_success() {
                TransportError::Protocol(e.to_string())
            } else {
                TransportError::Protocol(format!("HTTP {status}: {e}"))
            }
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_command_url_from_root() {
        assert_eq!(
            command_url(&url("http://localhost:3001")).unwrap().as_str(),
            "http://localhost:3001/command"
        );
    }

    #[test]
    fn test_command_url_keeps_base_path() {
        assert_eq!(
            command_url(&url("http://localhost:3001/proxy")).unwrap().as_str(),
            "http://localhost:3001/proxy/command"
        );
        assert_eq!(
            command_url(&url("https://host:8443/proxy/")).unwrap().as_str(),
            "https://host:8443/proxy/command"
        );
    }

    #[test]
    fn test_new_uses_endpoint_address() {
        let config =
            EndpointConfig::new("indesign", "http://127.0.0.1:3001", Duration::from_secs(1))
                .unwrap();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.command_url().as_str(),
            "http://127.0.0.1:3001/command"
        );
        assert_eq!(transport.name(), "http");
    }
}
