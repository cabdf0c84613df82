//! Configuration-time errors for the CORS policy.

use thiserror::Error;

/// Errors raised while building a [`Policy`](crate::cors::Policy).
///
/// These only surface at startup. Request evaluation never fails; bad input
/// at request time becomes a rejection instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("policy has no host rules")]
    Empty,

    #[error("host must not be empty")]
    EmptyHost,

    #[error("invalid host '{0}'")]
    InvalidHost(String),

    #[error("invalid scheme '{scheme}' for host '{host}'")]
    InvalidScheme { host: String, scheme: String },

    #[error("invalid subdomain pattern '{pattern}' for host '{host}'")]
    InvalidSubdomain { host: String, pattern: String },
}
