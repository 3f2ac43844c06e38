//! Command handlers.
//!
//! Handlers return data; printing and exit codes live in `main`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use adobe_mcp_bridge::Registry;
use adobe_mcp_core::{EndpointConfig, EndpointSettings, Outcome, Parameters, TransportKind};

/// Load endpoint settings from `env_file` if given, else the process
/// environment.
pub fn load_settings(env_file: Option<&Path>) -> Result<EndpointSettings> {
    match env_file {
        Some(path) => EndpointSettings::from_env_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => EndpointSettings::from_env().context("Invalid endpoint settings in environment"),
    }
}

/// Parse `--params`. Absent means no parameters; anything else must be a JSON
/// object.
pub fn parse_params(raw: Option<&str>) -> Result<Parameters> {
    let Some(raw) = raw else {
        return Ok(Parameters::new());
    };

    match serde_json::from_str::<Value>(raw).context("--params is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("--params must be a JSON object, got {}", json_type(&other)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Dispatch one command. Fails only when `application` has no endpoint.
pub async fn send(
    registry: &Registry,
    application: &str,
    command: &str,
    parameters: Parameters,
) -> Result<Outcome> {
    tracing::debug!(application, command, "Sending command");
    let outcome = registry.dispatch(application, command, parameters).await?;
    Ok(outcome)
}

/// One line per endpoint: application, transport, address, timeout.
pub fn endpoint_table(endpoints: &[EndpointConfig]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<12} {:<9} {:<32} {}",
        "APPLICATION", "TRANSPORT", "ADDRESS", "TIMEOUT"
    )];
    lines.extend(endpoints.iter().map(|endpoint| {
        let transport = match endpoint.transport_kind() {
            TransportKind::Http => "http",
            TransportKind::Socket => "tcp",
        };
        format!(
            "{:<12} {:<9} {:<32} {}s",
            endpoint.application(),
            transport,
            endpoint.address().as_str(),
            endpoint.timeout().as_secs()
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_parse_params_object() {
        let params = parse_params(Some(r#"{"width": 612, "facing": false}"#)).unwrap();
        assert_eq!(params["width"], 612);
        assert_eq!(params["facing"], false);
    }

    #[test]
    fn test_parse_params_absent_is_empty() {
        assert!(parse_params(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_params_rejects_non_objects() {
        let err = parse_params(Some("[1, 2]")).unwrap_err();
        assert!(err.to_string().contains("an array"));

        let err = parse_params(Some("{not json")).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_load_settings_from_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ADOBE_MCP_INDESIGN_URL=tcp://127.0.0.1:4100").unwrap();
        writeln!(file, "ADOBE_MCP_INDESIGN_TIMEOUT=7").unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        let indesign = settings.endpoint("indesign").unwrap();
        assert_eq!(indesign.transport_kind(), TransportKind::Socket);
        assert_eq!(indesign.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_load_settings_missing_file() {
        let err = load_settings(Some(Path::new("/nonexistent/adobe.env"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/adobe.env"));
    }

    #[test]
    fn test_endpoint_table() {
        let endpoints = vec![
            EndpointConfig::new("indesign", "http://localhost:3001", Duration::from_secs(20))
                .unwrap(),
            EndpointConfig::new("premiere", "tcp://127.0.0.1:4100", Duration::from_secs(5))
                .unwrap(),
        ];

        let lines = endpoint_table(&endpoints);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("APPLICATION"));
        assert!(lines[1].starts_with("indesign"));
        assert!(lines[1].contains("http://localhost:3001/"));
        assert!(lines[1].ends_with("20s"));
        assert!(lines[2].contains(" tcp "));
    }

    #[test]
    fn test_send_to_unregistered_application_fails() {
        let registry = Registry::new();
        let result = tokio_test::block_on(send(
            &registry,
            "illustrator",
            "getDocumentInfo",
            Parameters::new(),
        ));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("illustrator"));
    }
}
