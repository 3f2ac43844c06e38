//! Registration of application identities to transport clients.
//!
//! The registry is an ordinary value: construct one per process (or per
//! test) and share it. Each application gets its own client; clients share
//! no connection state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use adobe_mcp_core::{EndpointConfig, EndpointSettings, Outcome, Parameters, UsageError};
use tokio::sync::RwLock;
use tracing::info;

use crate::client::TransportClient;
use crate::dispatch::Dispatcher;
use crate::error::RegistrationError;

/// Map of application identity to its transport client.
#[derive(Debug, Default)]
pub struct Registry {
    clients: RwLock<HashMap<String, Arc<TransportClient>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every endpoint described by `settings`.
    pub async fn from_settings(settings: &EndpointSettings) -> Result<Self, RegistrationError> {
        let registry = Self::new();
        for config in settings.endpoints()? {
            registry.register_endpoint(config).await?;
        }
        Ok(registry)
    }

    /// Bind `application` to a proxy at `address`.
    pub async fn register(
        &self,
        application: &str,
        address: &str,
        timeout: Duration,
    ) -> Result<(), RegistrationError> {
        let config = EndpointConfig::new(application, address, timeout)?;
        self.register_endpoint(config).await
    }

    /// Bind the application named in `config`.
    pub async fn register_endpoint(&self, config: EndpointConfig) -> Result<(), RegistrationError> {
        let client = TransportClient::connect(config)?;
        self.register_client(client).await;
        Ok(())
    }

    /// Bind a prepared client, replacing and closing any previous binding.
    pub async fn register_client(&self, client: TransportClient) {
        let application = client.application().to_string();
        info!(
            application = %application,
            address = %client.config().address(),
            timeout_secs = client.config().timeout().as_secs_f64(),
            "Registering endpoint"
        );

        let previous = {
            let mut clients = self.clients.write().await;
            clients.insert(application, Arc::new(client))
        };

        // Requests still running on the old binding fail as unavailable.
        if let Some(previous) = previous {
            previous.close();
        }
    }

    /// Resolve the dispatcher for `application`.
    pub async fn dispatcher(&self, application: &str) -> Result<Dispatcher, UsageError> {
        let clients = self.clients.read().await;
        clients
            .get(application)
            .map(|client| Dispatcher::new(Arc::clone(client)))
            .ok_or_else(|| UsageError::Unregistered(application.to_string()))
    }

    /// Resolve `application` and dispatch one command to it.
    pub async fn dispatch(
        &self,
        application: &str,
        name: &str,
        parameters: Parameters,
    ) -> Result<Outcome, UsageError> {
        let dispatcher = self.dispatcher(application).await?;
        Ok(dispatcher.dispatch(name, parameters).await)
    }

    /// Registered application identities, sorted.
    pub async fn applications(&self) -> Vec<String> {
        let clients = self.clients.read().await;
        let mut names: Vec<String> = clients.keys().cloned().collect();
        names.sort();
        names
    }

    /// Endpoint configuration bound to `application`.
    pub async fn endpoint(&self, application: &str) -> Option<EndpointConfig> {
        let clients = self.clients.read().await;
        clients.get(application).map(|c| c.config().clone())
    }
}
