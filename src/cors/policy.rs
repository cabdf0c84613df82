//! Policy construction and the per-request entry point.
//!
//! Rules are collected in a [`PolicyBuilder`] at startup and frozen into a
//! [`Policy`]. A `Policy` has no interior mutability, so one `Arc<Policy>`
//! can be read from any number of request tasks without locking.

use crate::cors::decision::{Decision, RejectReason};
use crate::cors::error::PolicyError;
use crate::cors::matcher::any_rule_matches;
use crate::cors::origin::{parse_origin, ParsedOrigin};
use crate::cors::rule::HostRule;

/// Immutable set of host rules.
#[derive(Debug, Clone)]
pub struct Policy {
    rules: Vec<HostRule>,
    allow_credentials: bool,
}

impl Policy {
    /// Start building a policy.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Decide what to do with a request's raw `Origin` header.
    ///
    /// `None` means the header was absent, which is never a rejection.
    pub fn authorize(&self, raw_origin: Option<&str>) -> Decision {
        let Some(raw) = raw_origin else {
            return Decision::NotCors;
        };
        let Some(origin) = parse_origin(raw) else {
            return Decision::Rejected {
                reason: RejectReason::Malformed,
            };
        };

        if self.is_authorized(&origin) {
            Decision::Allowed {
                origin: raw.trim().to_string(),
            }
        } else {
            Decision::Rejected {
                reason: RejectReason::NotAllowed,
            }
        }
    }

    /// True iff at least one rule matches `origin`.
    pub fn is_authorized(&self, origin: &ParsedOrigin) -> bool {
        any_rule_matches(&self.rules, origin)
    }

    /// Rules in insertion order.
    pub fn rules(&self) -> &[HostRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether allowed responses carry `Access-Control-Allow-Credentials`.
    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }
}

/// Mutable accumulator for a [`Policy`].
///
/// Rule errors are reported by [`PolicyBuilder::build`], so calls can be
/// chained without intermediate `?`.
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    rules: Vec<HostRule>,
    allow_credentials: bool,
    error: Option<PolicyError>,
}

impl PolicyBuilder {
    /// Add a trusted host.
    ///
    /// Empty `schemes` accepts any scheme; empty `subdomains` accepts only
    /// the bare host. `*` as host matches every host.
    pub fn host<H, S, P>(mut self, host: H, schemes: S, subdomains: P) -> Self
    where
        H: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        if self.error.is_some() {
            return self;
        }
        match HostRule::new(host, schemes, subdomains) {
            Ok(rule) => self.rules.push(rule),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Add an already constructed rule.
    pub fn rule(mut self, rule: HostRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    /// Freeze the rules.
    ///
    /// Fails on the first invalid rule, or if no rule was added.
    pub fn build(self) -> Result<Policy, PolicyError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if self.rules.is_empty() {
            return Err(PolicyError::Empty);
        }
        Ok(Policy {
            rules: self.rules,
            allow_credentials: self.allow_credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const NONE: [&str; 0] = [];

    fn policy() -> Policy {
        Policy::builder()
            .host("test.host", ["https"], ["*"])
            .host("other.host", ["https"], NONE)
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_origin_is_not_cors() {
        assert_eq!(policy().authorize(None), Decision::NotCors);
    }

    #[test]
    fn test_allowed_reflects_origin() {
        assert_eq!(
            policy().authorize(Some(" https://Sub.Test.Host ")),
            Decision::Allowed {
                origin: "https://Sub.Test.Host".into()
            }
        );
    }

    #[test]
    fn test_rejections() {
        let policy = policy();
        assert_eq!(
            policy.authorize(Some("null")),
            Decision::Rejected {
                reason: RejectReason::Malformed
            }
        );
        assert_eq!(
            policy.authorize(Some("https://sub.other.host")),
            Decision::Rejected {
                reason: RejectReason::NotAllowed
            }
        );
        assert_eq!(
            policy.authorize(Some("http://test.host")),
            Decision::Rejected {
                reason: RejectReason::NotAllowed
            }
        );
    }

    #[test]
    fn test_authorize_is_deterministic() {
        let policy = policy();
        for raw in [Some("https://a.b.test.host"), Some("https://evil-test.host"), Some("%%"), None] {
            assert_eq!(policy.authorize(raw), policy.authorize(raw));
        }
    }

    #[test]
    fn test_build_errors() {
        assert_eq!(Policy::builder().build().unwrap_err(), PolicyError::Empty);
        let err = Policy::builder()
            .host("test.host", NONE, NONE)
            .host("", NONE, NONE)
            .host("other.host", NONE, ["a*"])
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyError::EmptyHost);
    }

    #[test]
    fn test_insertion_order_and_credentials() {
        let policy = Policy::builder()
            .rule(HostRule::new("b.host", NONE, NONE).unwrap())
            .host("a.host", NONE, NONE)
            .allow_credentials(true)
            .build()
            .unwrap();
        let hosts: Vec<&str> = policy.rules().iter().map(|r| r.host()).collect();
        assert_eq!(hosts, ["b.host", "a.host"]);
        assert_eq!(policy.len(), 2);
        assert!(policy.allow_credentials());
    }

    #[test]
    fn test_concurrent_authorize() {
        let policy = Arc::new(policy());
        let expected = policy.authorize(Some("https://x.test.host"));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let policy = Arc::clone(&policy);
                let expected = expected.clone();
                scope.spawn(move || {
                    for _ in 0..1000 {
                        assert_eq!(policy.authorize(Some("https://x.test.host")), expected);
                        assert!(!policy.authorize(Some("https://x.other.host")).is_allowed());
                    }
                });
            }
        });
    }
}
