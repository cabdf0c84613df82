//! Origin matching logic.
//!
//! # Responsibilities
//! - Match origin host against rule host (universal, exact, anchored suffix)
//! - Authorize the subdomain prefix of an anchored suffix match
//! - Check the origin scheme against the rule's schemes
//!
//! # Design Decisions
//! - A rule matches only if host, subdomain and scheme checks all pass
//! - Suffix matches require a `.` right before the rule host, so
//!   `malicious-host.com` never matches `host.com`
//! - No regex; plain string comparison over normalized values

use crate::cors::origin::ParsedOrigin;
use crate::cors::rule::HostRule;

/// Returns true if `rule` authorizes `origin`.
pub fn rule_matches(rule: &HostRule, origin: &ParsedOrigin) -> bool {
    host_matches(rule, origin.host()) && rule.allows_scheme(origin.scheme())
}

/// Any-of semantics over a rule set.
pub fn any_rule_matches<'a, I>(rules: I, origin: &ParsedOrigin) -> bool
where
    I: IntoIterator<Item = &'a HostRule>,
{
    rules.into_iter().any(|rule| rule_matches(rule, origin))
}

fn host_matches(rule: &HostRule, origin_host: &str) -> bool {
    if rule.is_any_host() || origin_host.eq_ignore_ascii_case(rule.host()) {
        return true;
    }
    match subdomain_prefix(origin_host, rule.host()) {
        Some(prefix) => rule.subdomains().iter().any(|pattern| pattern.allows(prefix)),
        None => false,
    }
}

/// The labels in front of `.host`, if `origin_host` is `prefix.host`.
fn subdomain_prefix<'a>(origin_host: &'a str, host: &str) -> Option<&'a str> {
    let split = origin_host.len().checked_sub(host.len() + 1)?;
    if !origin_host.is_char_boundary(split) {
        return None;
    }
    let (prefix, suffix) = origin_host.split_at(split);
    let rest = suffix.strip_prefix('.')?;
    if prefix.is_empty() || !rest.eq_ignore_ascii_case(host) {
        return None;
    }
    Some(prefix)
}
