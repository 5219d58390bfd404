//! Client-side connection configuration (mirrors the control plane's own
//! `OrchestratorConfig` resolution: `OPEN_SANDBOX_DOMAIN`,
//! `OPEN_SANDBOX_API_KEY`, `OPEN_SANDBOX_REQUEST_TIMEOUT_SECS`).

use std::time::Duration;

const DEFAULT_DOMAIN: &str = "localhost:8080";
const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("request_timeout must be greater than zero")]
    NonPositiveTimeout,
}

/// Connection defaults shared by every adapter: the control-plane domain,
/// an optional API key, the protocol to dial execd over, and the request
/// timeout applied to non-streaming calls.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub domain: String,
    pub api_key: Option<String>,
    pub protocol: String,
    pub request_timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ConnectionConfig {
    /// Resolve defaults from the environment, falling back to explicit
    /// per-field constants when unset.
    pub fn from_env() -> Self {
        Self {
            domain: std::env::var("OPEN_SANDBOX_DOMAIN").unwrap_or_else(|_| DEFAULT_DOMAIN.to_string()),
            api_key: std::env::var("OPEN_SANDBOX_API_KEY").ok(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build a config for talking to a plaintext endpoint (local dev,
    /// mock servers), overriding the default `https` protocol.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the request timeout, rejecting non-positive durations.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::NonPositiveTimeout);
        }
        self.request_timeout = timeout;
        Ok(self)
    }

    pub fn get_domain(&self) -> &str {
        &self.domain
    }

    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// A resolved endpoint for a sandbox's in-sandbox agent (execd), as returned
/// by `GET /sandboxes/{id}/endpoint`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxEndpoint {
    pub host: String,
    pub port: u16,
}

impl SandboxEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_defaults_to_localhost_8080() {
        // SAFETY: tests run single-threaded within this module's lock scope;
        // no other test in this crate reads these particular env vars.
        unsafe {
            std::env::remove_var("OPEN_SANDBOX_DOMAIN");
            std::env::remove_var("OPEN_SANDBOX_API_KEY");
        }
        let cfg = ConnectionConfig::from_env();
        assert_eq!(cfg.get_domain(), "localhost:8080");
        assert!(cfg.get_api_key().is_none());
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        let cfg = ConnectionConfig::from_env();
        assert!(cfg.clone().with_request_timeout(Duration::from_secs(0)).is_err());
        assert!(cfg.with_request_timeout(Duration::from_secs(1)).is_ok());
    }
}
