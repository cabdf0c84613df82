//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::cors::{Policy, PolicyError};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Trusted origins.
    pub cors: CorsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Cross-origin policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Send `Access-Control-Allow-Credentials: true` on allowed responses.
    pub allow_credentials: bool,

    /// Trusted hosts, checked with any-of semantics.
    pub hosts: Vec<HostConfig>,
}

/// One trusted host.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    /// Host or host:port; `*` for any host.
    pub host: String,

    /// Allowed schemes; empty allows any.
    #[serde(default)]
    pub schemes: Vec<String>,

    /// Allowed subdomain patterns (`*` or literal labels); empty allows none.
    #[serde(default)]
    pub subdomains: Vec<String>,
}

impl CorsConfig {
    /// Freeze the configured hosts into a [`Policy`].
    pub fn to_policy(&self) -> Result<Policy, PolicyError> {
        self.hosts
            .iter()
            .fold(Policy::builder(), |builder, h| builder.host(&h.host, &h.schemes, &h.subdomains))
            .allow_credentials(self.allow_credentials)
            .build()
    }
}
