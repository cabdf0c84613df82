//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every host rule builds (host, schemes, subdomain patterns)
//! - Validate the listener address and timeout
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::cors::{HostRule, PolicyError};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("listener.request_timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("cors.hosts must contain at least one host")]
    NoHosts,

    #[error("cors.hosts[{index}]: {source}")]
    InvalidHost { index: usize, source: PolicyError },
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.cors.hosts.is_empty() {
        errors.push(ValidationError::NoHosts);
    }
    for (index, host) in config.cors.hosts.iter().enumerate() {
        if let Err(source) = HostRule::new(&host.host, &host.schemes, &host.subdomains) {
            errors.push(ValidationError::InvalidHost { index, source });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::HostConfig;

    fn host(host: &str, schemes: &[&str], subdomains: &[&str]) -> HostConfig {
        HostConfig {
            host: host.to_string(),
            schemes: schemes.iter().map(|s| s.to_string()).collect(),
            subdomains: subdomains.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = ServerConfig::default();
        config.cors.hosts.push(host("test.host", &["https"], &["*"]));
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.listener.request_timeout_secs = 0;
        config.cors.hosts.push(host("test.host", &["https"], &[]));
        config.cors.hosts.push(host("", &[], &[]));
        config.cors.hosts.push(host("other.host", &["ht tp"], &[]));
        config.cors.hosts.push(host("third.host", &[], &["a*"]));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[0], ValidationError::InvalidBindAddress("not-an-address".into()));
        assert_eq!(errors[1], ValidationError::ZeroTimeout);
        assert_eq!(
            errors[2],
            ValidationError::InvalidHost {
                index: 1,
                source: PolicyError::EmptyHost
            }
        );
        assert!(matches!(errors[3], ValidationError::InvalidHost { index: 2, .. }));
        assert!(matches!(errors[4], ValidationError::InvalidHost { index: 3, .. }));
    }

    #[test]
    fn test_no_hosts() {
        let errors = validate_config(&ServerConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoHosts]);
    }
}
