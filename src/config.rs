//! Client configuration and defaulting rules.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::transport::Transport;

/// Production API endpoint, used when an API key is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.mobula.io";

/// Demo API endpoint, used when no API key is configured.
pub const DEMO_BASE_URL: &str = "https://demo-api.mobula.io";

/// Request timeout applied when neither the caller nor a custom transport sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub const ENV_API_KEY: &str = "MOBULA_API_KEY";
pub const ENV_BASE_URL: &str = "MOBULA_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MOBULA_TIMEOUT_SECS";

/// Partial client configuration. Every field is optional.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub transport: Option<Arc<dyn Transport>>,
    pub timeout: Option<Duration>,
}

/// Configuration with all defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// Empty when running unauthenticated against the demo endpoint.
    pub api_key: String,
    /// `None` when a custom transport governs its own timeouts.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `MOBULA_API_KEY`, `MOBULA_BASE_URL` and `MOBULA_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = non_empty(ENV_TIMEOUT_SECS).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(e) => {
                warn!("Ignoring invalid {} value {:?}: {}", ENV_TIMEOUT_SECS, raw, e);
                None
            }
        });

        Self {
            base_url: non_empty(ENV_BASE_URL),
            api_key: non_empty(ENV_API_KEY),
            transport: None,
            timeout,
        }
    }

    /// Overrides the endpoint. Used verbatim, validated on the first request.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sends this key in the `Authorization` header and selects the production
    /// endpoint unless a base URL is set explicitly.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Uses a custom transport.
    ///
    /// The transport's own timeout policy replaces [`ClientConfig::timeout`],
    /// which is then ignored. A transport configured without a timeout means
    /// requests only end through the per-call [`RequestContext`](crate::RequestContext).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Applies the defaulting rules.
    pub fn resolve(&self) -> ResolvedConfig {
        let base_url = match self.base_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => url.to_string(),
            None if self.api_key().is_some() => DEFAULT_BASE_URL.to_string(),
            None => DEMO_BASE_URL.to_string(),
        };

        let timeout = if self.transport.is_some() {
            if self.timeout.is_some() {
                debug!("Custom transport supplied, ignoring configured timeout");
            }
            None
        } else {
            Some(
                self.timeout
                    .filter(|t| !t.is_zero())
                    .unwrap_or(DEFAULT_TIMEOUT),
            )
        };

        ResolvedConfig {
            base_url,
            api_key: self.api_key().unwrap_or_default().to_string(),
            timeout,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport.as_ref().map(|_| "<custom>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_empty_config_uses_demo() {
        let resolved = ClientConfig::new().resolve();
        assert_eq!(resolved.base_url, DEMO_BASE_URL);
        assert_eq!(resolved.api_key, "");
        assert_eq!(resolved.timeout, Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn test_resolve_api_key_selects_production() {
        let resolved = ClientConfig::new().with_api_key("secret").resolve();
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.api_key, "secret");
    }

    #[test]
    fn test_resolve_empty_api_key_is_demo() {
        let resolved = ClientConfig::new().with_api_key("").resolve();
        assert_eq!(resolved.base_url, DEMO_BASE_URL);
        assert_eq!(resolved.api_key, "");
    }

    #[test]
    fn test_resolve_explicit_base_url_wins() {
        for key in [None, Some("secret")] {
            let mut config = ClientConfig::new().with_base_url("http://localhost:8080");
            config.api_key = key.map(str::to_string);
            assert_eq!(config.resolve().base_url, "http://localhost:8080");
        }
    }

    #[test]
    fn test_resolve_base_url_not_validated() {
        let resolved = ClientConfig::new().with_base_url("::not a url::").resolve();
        assert_eq!(resolved.base_url, "::not a url::");
    }

    #[test]
    fn test_resolve_custom_timeout() {
        let resolved = ClientConfig::new()
            .with_timeout(Duration::from_secs(3))
            .resolve();
        assert_eq!(resolved.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_resolve_zero_timeout_uses_default() {
        let resolved = ClientConfig::new().with_timeout(Duration::ZERO).resolve();
        assert_eq!(resolved.timeout, Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn test_resolve_transport_overrides_timeout() {
        let resolved = ClientConfig::new()
            .with_transport(Arc::new(MockTransport::new()))
            .with_timeout(Duration::from_secs(3))
            .resolve();
        assert_eq!(resolved.timeout, None);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY, "key-123"),
            (ENV_BASE_URL, "http://127.0.0.1:9000"),
            (ENV_TIMEOUT_SECS, "30"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_lookup_ignores_blank_and_invalid() {
        let config = ClientConfig::from_lookup(|k| match k {
            ENV_API_KEY => Some("  ".to_string()),
            ENV_TIMEOUT_SECS => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.resolve().base_url, DEMO_BASE_URL);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new().with_api_key("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
