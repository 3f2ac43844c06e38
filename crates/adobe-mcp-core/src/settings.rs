//! Endpoint settings read from the environment.
//!
//! Every supported application gets an endpoint. The global proxy URL and
//! timeout apply unless an application-specific variable overrides them:
//!
//! - `ADOBE_MCP_PROXY_URL`, `ADOBE_MCP_PROXY_TIMEOUT` (seconds)
//! - `ADOBE_MCP_<APP>_URL`, `ADOBE_MCP_<APP>_TIMEOUT` for `INDESIGN`,
//!   `PHOTOSHOP` and `PREMIERE`

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::endpoint::{ConfigError, EndpointConfig};

/// Default proxy address shared by all applications.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3001";

/// Default wait for a proxy reply, in seconds.
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 20;

/// Application identities the proxy understands.
pub const APPLICATIONS: &[&str] = &["indesign", "photoshop", "premiere"];

const ENV_PREFIX: &str = "ADOBE_MCP_";

/// Per-application override of the global settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointOverride {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Proxy endpoint settings for all applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSettings {
    /// Proxy URL used when no override exists.
    pub proxy_url: String,

    /// Reply timeout in seconds used when no override exists.
    pub proxy_timeout_secs: u64,

    /// Overrides keyed by application identity.
    pub overrides: BTreeMap<String, EndpointOverride>,
}

impl EndpointSettings {
    /// Create settings with the stock defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            proxy_timeout_secs: DEFAULT_PROXY_TIMEOUT_SECS,
            overrides: BTreeMap::new(),
        }
    }

    /// Build settings from `(name, value)` pairs. Later pairs win.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::with_defaults();

        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };

            match key {
                "PROXY_URL" => settings.proxy_url = value,
                "PROXY_TIMEOUT" => settings.proxy_timeout_secs = parse_timeout(&name, &value)?,
                other => settings.apply_override(&name, other, value)?,
            }
        }

        Ok(settings)
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Read settings from a dotenv file, with the process environment taking
    /// precedence over the file.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let file_vars = dotenvy::from_path_iter(path)
            .map_err(|e| ConfigError::EnvFile(format!("{}: {e}", path.display())))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::EnvFile(format!("{}: {e}", path.display())))?;

        Self::from_vars(file_vars.into_iter().chain(std::env::vars()))
    }

    fn apply_override(&mut self, name: &str, key: &str, value: String) -> Result<(), ConfigError> {
        let (app, field) = match key.rsplit_once('_') {
            Some(parts) => parts,
            None => return Ok(()),
        };
        let app = app.to_ascii_lowercase();
        if !APPLICATIONS.contains(&app.as_str()) {
            tracing::debug!(var = name, "Ignoring variable for unknown application");
            return Ok(());
        }

        let entry = self.overrides.entry(app).or_default();
        match field {
            "URL" => entry.url = Some(value),
            "TIMEOUT" => entry.timeout_secs = Some(parse_timeout(name, &value)?),
            _ => tracing::debug!(var = name, "Ignoring unrecognised setting"),
        }
        Ok(())
    }

    /// Resolve the validated endpoint for one application.
    pub fn endpoint(&self, application: &str) -> Result<EndpointConfig, ConfigError> {
        let entry = self.overrides.get(application);
        let url = entry
            .and_then(|o| o.url.as_deref())
            .unwrap_or(&self.proxy_url);
        let secs = entry
            .and_then(|o| o.timeout_secs)
            .unwrap_or(self.proxy_timeout_secs);

        EndpointConfig::new(application, url, Duration::from_secs(secs))
    }

    /// Resolve endpoints for every supported application.
    pub fn endpoints(&self) -> Result<Vec<EndpointConfig>, ConfigError> {
        APPLICATIONS.iter().map(|app| self.endpoint(app)).collect()
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn parse_timeout(var: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidTimeout {
            var: var.to_string(),
            value: value.to_string(),
        })
}
