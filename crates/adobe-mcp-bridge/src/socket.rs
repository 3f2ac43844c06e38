//! Socket transport: newline-delimited JSON over a persistent TCP connection.
//!
//! Each request frame is written as one line; each reply arrives as one
//! line. The connection is opened lazily and reused. Replies whose id does
//! not match the outstanding command (for example a late reply to a command
//! that already timed out) are discarded.

use std::time::Duration;

use adobe_mcp_core::{Command, EndpointConfig, RequestFrame, Response, Transport, TransportError};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::{Instant, timeout_at};
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::{debug, warn};

/// Upper bound for a single reply line.
const MAX_LINE_LENGTH: usize = 16 * 1024 * 1024;

/// Stand-in deadline for timeouts too large to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

type Connection = Framed<TcpStream, LinesCodec>;

/// Why an exchange failed, and whether the connection survives it.
struct Failure {
    error: TransportError,
    reset: bool,
}

impl Failure {
    const fn keep(error: TransportError) -> Self {
        Self {
            error,
            reset: false,
        }
    }

    const fn reset(error: TransportError) -> Self {
        Self { error, reset: true }
    }
}

/// Transport holding one persistent connection to the proxy.
///
/// Exchanges are serialized by the connection lock, so at most one command is
/// outstanding at a time.
#[derive(Debug)]
pub struct SocketTransport {
    addr: String,
    connection: Mutex<Option<Connection>>,
}

impl SocketTransport {
    /// Create a transport for a `tcp://host:port` endpoint.
    pub fn new(config: &EndpointConfig) -> Self {
        Self::with_addr(config.socket_addr())
    }

    /// Create a transport for a `host:port` address.
    pub fn with_addr(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            connection: Mutex::new(None),
        }
    }

    /// Whether a connection is currently open.
    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    async fn connect(&self, deadline: Instant, timeout: Duration) -> Result<Connection, Failure> {
        debug!(addr = %self.addr, "Connecting to proxy");
        match timeout_at(deadline, TcpStream::connect(&self.addr)).await {
            Ok(Ok(stream)) => {
                if let Err(e) = stream.set_nodelay(true) {
                    debug!(addr = %self.addr, error = %e, "Failed to set TCP_NODELAY");
                }
                Ok(Framed::new(
                    stream,
                    LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
                ))
            }
            Ok(Err(e)) => Err(Failure::reset(TransportError::Unavailable(format!(
                "Failed to connect to {}: {e}",
                self.addr
            )))),
            Err(_) => Err(Failure::reset(TransportError::Timeout { after: timeout })),
        }
    }
}

/// Write one request line and read lines until the matching reply.
async fn round_trip(
    conn: &mut Connection,
    line: String,
    command: &Command,
    deadline: Instant,
    timeout: Duration,
) -> Result<Response, Failure> {
    // A write cut short leaves a partial frame on the wire.
    match timeout_at(deadline, conn.send(line)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(Failure::reset(codec_error(e))),
        Err(_) => return Err(Failure::reset(TransportError::Timeout { after: timeout })),
    }

    loop {
        // Framed reads are cancel safe: a timeout keeps the connection usable
        // and a late reply is dropped by the id check on the next exchange.
        let next = match timeout_at(deadline, conn.next()).await {
            Ok(next) => next,
            Err(_) => return Err(Failure::keep(TransportError::Timeout { after: timeout })),
        };

        let line = match next {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(Failure::reset(codec_error(e))),
            None => {
                return Err(Failure::reset(TransportError::Unavailable(
                    "Proxy closed the connection".to_string(),
                )));
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply: Response = serde_json::from_str(trimmed)
            .map_err(|e| Failure::keep(TransportError::Protocol(e.to_string())))?;

        if reply.id == command.id {
            return Ok(reply);
        }

        warn!(
            expected = %command.id,
            received = %reply.id,
            "Discarding reply for a different request"
        );
    }
}

/// Instant `timeout` from now, saturating at a far-future deadline.
fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE)
}

fn codec_error(err: LinesCodecError) -> TransportError {
    match err {
        LinesCodecError::MaxLineLengthExceeded => {
            TransportError::Protocol(format!("Reply exceeds {MAX_LINE_LENGTH} bytes"))
        }
        LinesCodecError::Io(e) => TransportError::Unavailable(e.to_string()),
    }
}

#[async_trait]
impl Transport for SocketTransport {
    async fn exchange(
        &self,
        application: &str,
        command: &Command,
        timeout: Duration,
    ) -> Result<Response, TransportError> {
        let deadline = deadline_after(timeout);

        let line = serde_json::to_string(&RequestFrame {
            application,
            command,
        })
        .map_err(|e| TransportError::Protocol(format!("Failed to encode command: {e}")))?;

        let Ok(mut guard) = timeout_at(deadline, self.connection.lock()).await else {
            return Err(TransportError::Timeout { after: timeout });
        };

        let result = match guard.as_mut() {
            Some(conn) => round_trip(conn, line, command, deadline, timeout).await,
            None => match self.connect(deadline, timeout).await {
                Ok(conn) => {
                    let conn = guard.insert(conn);
                    round_trip(conn, line, command, deadline, timeout).await
                }
                Err(failure) => Err(failure),
            },
        };

        result.map_err(|failure| {
            if failure.reset {
                *guard = None;
            }
            failure.error
        })
    }

    fn name(&self) -> &'static str {
        "tcp"
    }
}
