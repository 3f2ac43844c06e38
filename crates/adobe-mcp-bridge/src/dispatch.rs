//! Dispatch facade: the single call surface used by every operation.
//!
//! `dispatch` never fails. Transport failures and application error replies
//! both come back as an [`Outcome`] with `success=false`, so callers have one
//! failure contract.

use std::sync::Arc;

use adobe_mcp_core::{Outcome, Parameters, ResponseBody};
use tracing::{debug, warn};

use crate::client::TransportClient;

/// Facade bound to one application's transport client.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Arc<TransportClient>,
}

impl Dispatcher {
    pub const fn new(client: Arc<TransportClient>) -> Self {
        Self { client }
    }

    pub fn application(&self) -> &str {
        self.client.application()
    }

    /// Build, send and normalize one command.
    pub async fn dispatch(&self, name: &str, parameters: Parameters) -> Outcome {
        let command = self.client.command(name, parameters);

        match self.client.send(&command).await {
            Ok(response) => match response.body {
                ResponseBody::Ok(data) => {
                    debug!(
                        application = self.application(),
                        command = name,
                        id = %command.id,
                        "Command succeeded"
                    );
                    Outcome::success(data)
                }
                ResponseBody::Error(error) => {
                    warn!(
                        application = self.application(),
                        command = name,
                        id = %command.id,
                        kind = %error.kind,
                        "Application reported an error: {}",
                        error.message
                    );
                    Outcome::application_error(error)
                }
            },
            Err(e) => {
                warn!(
                    application = self.application(),
                    command = name,
                    id = %command.id,
                    kind = e.kind(),
                    "Command failed: {e}"
                );
                Outcome::transport_error(&e)
            }
        }
    }
}

/// Build a parameter map from literal key/value pairs.
pub fn params<const N: usize>(entries: [(&str, serde_json::Value); N]) -> Parameters {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_preserves_entries() {
        let parameters = params([("pageIndex", json!(0)), ("text", json!("Hello"))]);
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters["text"], json!("Hello"));
    }
}
