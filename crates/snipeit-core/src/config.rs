// Connector configuration
//
// Fully resolved settings needed to talk to one Snipe-IT instance. Profile
// files, env vars, and keyring lookups live in `snipeit-config`; this type
// is what they resolve into.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use snipeit_api::{TlsMode, TransportConfig};

use crate::error::ConnectorError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub base_url: Url,
    pub access_token: SecretString,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl ConnectorConfig {
    /// Both the base URL and the access token are required and must be
    /// non-empty; the URL must parse.
    pub fn new(base_url: &str, access_token: SecretString) -> Result<Self, ConnectorError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ConnectorError::Config {
                message: "base-url is required".into(),
            });
        }
        if access_token.expose_secret().trim().is_empty() {
            return Err(ConnectorError::Config {
                message: "access-token is required".into(),
            });
        }

        let base_url = Url::parse(base_url).map_err(|e| ConnectorError::Config {
            message: format!("invalid base-url '{base_url}': {e}"),
        })?;

        Ok(Self {
            base_url,
            access_token,
            tls: TlsMode::System,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn empty_values_fail_fast() {
        let err = ConnectorConfig::new("", token("t")).unwrap_err();
        assert!(err.to_string().contains("base-url is required"));

        let err = ConnectorConfig::new("https://assets.example.com", token("  ")).unwrap_err();
        assert!(err.to_string().contains("access-token is required"));
    }

    #[test]
    fn unparsable_url_is_rejected() {
        let err = ConnectorConfig::new("assets.example.com", token("t")).unwrap_err();
        assert!(matches!(err, ConnectorError::Config { .. }));
    }

    #[test]
    fn defaults_to_system_tls() {
        let config = ConnectorConfig::new("https://assets.example.com", token("t")).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(matches!(config.tls, TlsMode::System));
    }
}
