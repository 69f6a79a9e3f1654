//! Base URL selection

use crate::config::{Environment, PortalConfig};
use crate::domain::{Result, TrackError};
use url::Url;

const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Resolve the base URL every request is issued against
///
/// In development, when the portal origin is a loopback host, the gateway
/// is addressed directly. Everywhere else requests go through the
/// same-origin proxy prefix.
///
/// # Errors
///
/// Returns a configuration error if `api.origin` is not an absolute URL.
///
/// # Example
///
/// ```
/// use patient_track::adapters::http::resolve_base_url;
/// use patient_track::config::{Environment, PortalConfig};
///
/// let mut config = PortalConfig::default();
/// config.environment = Environment::Development;
/// assert_eq!(resolve_base_url(&config).unwrap(), "http://localhost:8080");
///
/// config.environment = Environment::Production;
/// assert_eq!(resolve_base_url(&config).unwrap(), "http://localhost:3000/api");
/// ```
pub fn resolve_base_url(config: &PortalConfig) -> Result<String> {
    let origin = Url::parse(&config.api.origin).map_err(|e| {
        TrackError::Configuration(format!("Invalid api.origin '{}': {e}", config.api.origin))
    })?;

    let loopback = origin
        .host_str()
        .map(|host| LOOPBACK_HOSTS.contains(&host))
        .unwrap_or(false);

    let base = if config.environment == Environment::Development && loopback {
        config.api.gateway_url.trim_end_matches('/').to_string()
    } else {
        format!(
            "{}{}",
            origin.origin().ascii_serialization(),
            config.api.proxy_prefix.trim_end_matches('/')
        )
    };

    tracing::debug!(base_url = %base, environment = ?config.environment, "Resolved API base URL");
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn config(environment: Environment, origin: &str) -> PortalConfig {
        let mut config = PortalConfig::default();
        config.environment = environment;
        config.api.origin = origin.to_string();
        config
    }

    #[test_case(Environment::Development, "http://localhost:3000", "http://localhost:8080" ; "dev on localhost uses gateway")]
    #[test_case(Environment::Development, "http://127.0.0.1:5173", "http://localhost:8080" ; "dev on loopback ip uses gateway")]
    #[test_case(Environment::Development, "https://portal.example.org", "https://portal.example.org/api" ; "dev on remote host uses proxy")]
    #[test_case(Environment::Production, "http://localhost:3000", "http://localhost:3000/api" ; "production on localhost uses proxy")]
    #[test_case(Environment::Staging, "https://staging.example.org/", "https://staging.example.org/api" ; "staging uses proxy")]
    fn test_resolve_base_url(environment: Environment, origin: &str, expected: &str) {
        assert_eq!(resolve_base_url(&config(environment, origin)).unwrap(), expected);
    }

    #[test]
    fn test_custom_gateway_and_prefix() {
        let mut cfg = config(Environment::Development, "http://localhost:3000");
        cfg.api.gateway_url = "http://localhost:9090/".to_string();
        assert_eq!(resolve_base_url(&cfg).unwrap(), "http://localhost:9090");

        cfg.environment = Environment::Production;
        cfg.api.proxy_prefix = "/gateway/".to_string();
        assert_eq!(resolve_base_url(&cfg).unwrap(), "http://localhost:3000/gateway");
    }

    #[test]
    fn test_invalid_origin() {
        let cfg = config(Environment::Development, "localhost");
        assert!(matches!(
            resolve_base_url(&cfg),
            Err(TrackError::Configuration(_))
        ));
    }
}
