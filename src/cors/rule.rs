//! Host rules.
//!
//! A rule is one trusted host together with the schemes and subdomain
//! patterns allowed for it. Rules are normalized once, at build time, so
//! matching only ever compares lower-case strings.

use std::fmt;

use crate::cors::error::PolicyError;
use crate::cors::origin::{is_valid_host_token, is_valid_scheme};

/// Host value that matches every origin host.
pub const ANY_HOST: &str = "*";

/// Allowed prefix in front of a rule host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubdomainPattern {
    /// `*`: any non-empty label sequence.
    Any,
    /// A literal label sequence such as `api` or `api.eu`.
    Exact(String),
}

impl SubdomainPattern {
    /// Parse and normalize one configured pattern.
    pub fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        if pattern == "*" {
            return Some(Self::Any);
        }
        let valid = !pattern.is_empty()
            && pattern.split('.').all(|label| {
                !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'))
            });
        valid.then(|| Self::Exact(pattern.to_ascii_lowercase()))
    }

    /// Whether `prefix` (the labels before `.host`) is allowed.
    pub fn allows(&self, prefix: &str) -> bool {
        match self {
            Self::Any => !prefix.is_empty(),
            Self::Exact(expected) => prefix == expected,
        }
    }
}

impl fmt::Display for SubdomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact(labels) => f.write_str(labels),
        }
    }
}

/// One trusted host with its allowed schemes and subdomains.
///
/// Empty `schemes` allows any scheme. Empty `subdomains` allows only the
/// bare host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRule {
    host: String,
    schemes: Vec<String>,
    subdomains: Vec<SubdomainPattern>,
}

impl HostRule {
    /// Build a normalized rule.
    ///
    /// Host, schemes and patterns are trimmed and lower-cased. Duplicates are
    /// dropped, keeping first-seen order.
    pub fn new<H, S, P>(host: H, schemes: S, subdomains: P) -> Result<Self, PolicyError>
    where
        H: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let host = host.as_ref().trim().to_ascii_lowercase();
        if host.is_empty() {
            return Err(PolicyError::EmptyHost);
        }
        if host != ANY_HOST && !is_valid_host_token(&host) {
            return Err(PolicyError::InvalidHost(host));
        }

        let mut normalized_schemes: Vec<String> = Vec::new();
        for scheme in schemes {
            let scheme = scheme.as_ref().trim();
            if !is_valid_scheme(scheme) {
                return Err(PolicyError::InvalidScheme {
                    host,
                    scheme: scheme.to_string(),
                });
            }
            let scheme = scheme.to_ascii_lowercase();
            if !normalized_schemes.contains(&scheme) {
                normalized_schemes.push(scheme);
            }
        }

        let mut patterns: Vec<SubdomainPattern> = Vec::new();
        for raw in subdomains {
            let pattern = SubdomainPattern::parse(raw.as_ref()).ok_or_else(|| PolicyError::InvalidSubdomain {
                host: host.clone(),
                pattern: raw.as_ref().to_string(),
            })?;
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }

        Ok(Self {
            host,
            schemes: normalized_schemes,
            subdomains: patterns,
        })
    }

    /// Normalized host (`*` for the universal host).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Allowed schemes; empty means any.
    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }

    /// Allowed subdomain patterns; empty means bare host only.
    pub fn subdomains(&self) -> &[SubdomainPattern] {
        &self.subdomains
    }

    pub fn is_any_host(&self) -> bool {
        self.host == ANY_HOST
    }

    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.schemes.is_empty() || self.schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

impl fmt::Display for HostRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schemes = if self.schemes.is_empty() {
            "*".to_string()
        } else {
            self.schemes.join("|")
        };
        write!(f, "{}://{}", schemes, self.host)?;
        if !self.subdomains.is_empty() {
            let patterns: Vec<String> = self.subdomains.iter().map(|p| p.to_string()).collect();
            write!(f, " (subdomains: {})", patterns.join(", "))?;
        }
        Ok(())
    }
}
