//! Transport client bound to one application's proxy endpoint.

use std::time::Duration;

use adobe_mcp_core::{
    Command, CommandBuilder, EndpointConfig, Parameters, Response, Transport, TransportError,
    TransportKind,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::http::HttpTransport;
use crate::socket::SocketTransport;

/// Extra time granted to a transport beyond the configured timeout before the
/// client gives up on it regardless.
pub const TIMEOUT_GRACE: Duration = Duration::from_millis(250);

/// Owns the endpoint configuration, id generation and transport for one
/// application.
///
/// Created at registration and kept for the life of the process. `close()`
/// is the only teardown: it fails in-flight sends and rejects new ones.
pub struct TransportClient {
    config: EndpointConfig,
    builder: CommandBuilder,
    transport: Box<dyn Transport>,
    closed: CancellationToken,
}

impl TransportClient {
    /// Create a client using the transport selected by the address scheme.
    pub fn connect(config: EndpointConfig) -> Result<Self, TransportError> {
        let transport: Box<dyn Transport> = match config.transport_kind() {
            TransportKind::Http => Box::new(HttpTransport::new(&config)?),
            TransportKind::Socket => Box::new(SocketTransport::new(&config)),
        };
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(config: EndpointConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            builder: CommandBuilder::new(),
            transport,
            closed: CancellationToken::new(),
        }
    }

    pub const fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn application(&self) -> &str {
        self.config.application()
    }

    /// Build a command with an id unique to this client.
    pub fn command(&self, name: &str, parameters: Parameters) -> Command {
        self.builder.build(name, parameters)
    }

    /// Send a command and wait for its reply.
    ///
    /// Returns once the matching reply arrives, the configured timeout
    /// elapses, the transport fails, or the client is closed. A reply with
    /// `status=error` is an `Ok` result.
    pub async fn send(&self, command: &Command) -> Result<Response, TransportError> {
        if self.closed.is_cancelled() {
            return Err(self.closed_error());
        }

        let timeout = self.config.timeout();
        let started = Instant::now();
        debug!(
            application = self.application(),
            transport = self.transport.name(),
            command = %command.name,
            id = %command.id,
            "Sending command"
        );

        let exchange = tokio::time::timeout(
            timeout.saturating_add(TIMEOUT_GRACE),
            self.transport.exchange(self.application(), command, timeout),
        );

        let result = tokio::select! {
            biased;
            () = self.closed.cancelled() => Err(self.closed_error()),
            result = exchange => match result {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout { after: timeout }),
            },
        };

        let reply = result?;
        if reply.id != command.id {
            return Err(TransportError::Protocol(format!(
                "Reply id {} does not match request id {}",
                reply.id, command.id
            )));
        }

        debug!(
            application = self.application(),
            id = %command.id,
            elapsed_ms = started.elapsed().as_millis(),
            ok = reply.is_ok(),
            "Received reply"
        );
        Ok(reply)
    }

    /// Fail in-flight sends with `TransportUnavailable` and reject new ones.
    pub fn close(&self) {
        if !self.closed.is_cancelled() {
            info!(application = self.application(), "Closing transport client");
            self.closed.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    fn closed_error(&self) -> TransportError {
        TransportError::Unavailable(format!(
            "Transport client for '{}' was closed",
            self.application()
        ))
    }
}

impl std::fmt::Debug for TransportClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportClient")
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
