//! Provider configuration and endpoint resolution.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable consulted when the provider block has no endpoint.
pub const ENDPOINT_ENV_VAR: &str = "DEMOAPP_ENDPOINT";

/// Provider block attribute holding the endpoint.
pub const ENDPOINT_KEY: &str = "endpoint";

/// The provider block as the orchestrator hands it over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ProviderConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
        }
    }
}

/// Resolve the endpoint from `explicit`, falling back to `DEMOAPP_ENDPOINT`.
pub fn resolve_endpoint(explicit: Option<&str>) -> Result<String> {
    resolve_endpoint_with(explicit, |name| std::env::var(name).ok())
}

/// Resolve the endpoint with a caller-supplied environment lookup.
///
/// A configured value always wins over the environment, even when empty;
/// an empty result is a configuration error either way.
pub fn resolve_endpoint_with<F>(explicit: Option<&str>, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let endpoint = match explicit {
        Some(value) => value.to_string(),
        None => lookup(ENDPOINT_ENV_VAR).unwrap_or_default(),
    };

    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(Error::MissingEndpoint {
            key: ENDPOINT_KEY,
            env_var: ENDPOINT_ENV_VAR,
        });
    }

    validate_endpoint(endpoint)?;
    Ok(endpoint.trim_end_matches('/').to_string())
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| {
            assert_eq!(name, ENDPOINT_ENV_VAR);
            value.map(str::to_string)
        }
    }

    #[test]
    fn explicit_endpoint_wins_over_environment() {
        let endpoint =
            resolve_endpoint_with(Some("http://config:8080"), env(Some("http://env:8080"))).unwrap();
        assert_eq!(endpoint, "http://config:8080");
    }

    #[test]
    fn process_resolution_prefers_explicit_endpoint() {
        let endpoint = resolve_endpoint(Some("http://config:8080/")).unwrap();
        assert_eq!(endpoint, "http://config:8080");
    }

    #[test]
    fn environment_is_used_when_config_is_null() {
        let endpoint = resolve_endpoint_with(None, env(Some("http://env:8080"))).unwrap();
        assert_eq!(endpoint, "http://env:8080");
    }

    #[test]
    fn missing_everywhere_is_configuration_error() {
        let err = resolve_endpoint_with(None, env(None)).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingEndpoint {
                key: "endpoint",
                env_var: "DEMOAPP_ENDPOINT"
            }
        ));
    }

    #[test]
    fn empty_environment_value_is_missing() {
        let err = resolve_endpoint_with(None, env(Some(""))).unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint { .. }));
    }

    #[test]
    fn empty_explicit_value_does_not_fall_back() {
        let err = resolve_endpoint_with(Some(""), env(Some("http://env:8080"))).unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint { .. }));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let endpoint = resolve_endpoint_with(Some("https://inventory.local/"), env(None)).unwrap();
        assert_eq!(endpoint, "https://inventory.local");
    }

    #[test]
    fn base_path_is_kept() {
        let endpoint = resolve_endpoint_with(Some("http://gw:80/demo"), env(None)).unwrap();
        assert_eq!(endpoint, "http://gw:80/demo");
    }

    #[test]
    fn rejects_non_http_endpoints() {
        for endpoint in [
            "localhost:8080",
            "ftp://host",
            "http://",
            "http://host?x=1",
            "http://host#top",
            "http://bad host:8080",
            "http://:8080",
            "http://[::1",
        ] {
            let err = resolve_endpoint_with(Some(endpoint), env(None)).unwrap_err();
            assert!(
                matches!(err, Error::InvalidEndpoint { .. }),
                "{endpoint}: {err:?}"
            );
            assert!(err.is_configuration());
        }
    }

    #[test]
    fn provider_config_deserializes_null_endpoint() {
        let config: ProviderConfig = serde_json::from_str(r#"{"endpoint":null}"#).unwrap();
        assert_eq!(config.endpoint, None);
        let config: ProviderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProviderConfig::default());
    }
}
