//! Origin header parsing.
//!
//! # Responsibilities
//! - Split a raw `Origin` value into scheme and host token
//! - Lower-case both parts for case-insensitive comparison
//! - Refuse anything that is not a plain `scheme://host[:port]`
//!
//! # Design Decisions
//! - Host and port stay joined (`localhost:9000`); ports are never
//!   added, dropped or defaulted
//! - The opaque origin `null` and multi-valued headers are malformed
//! - A single trailing `/` is tolerated, any other path is not

use std::fmt;
use std::str::FromStr;

use axum::http::Uri;

/// Scheme and host token extracted from an `Origin` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedOrigin {
    scheme: String,
    host: String,
}

impl ParsedOrigin {
    /// Lower-cased scheme, e.g. `https`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Lower-cased host, including `:port` when one was sent.
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for ParsedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Parse a raw `Origin` header value.
///
/// Returns `None` for anything malformed. Callers must treat `None` as a
/// non-matching origin.
pub fn parse_origin(raw: &str) -> Option<ParsedOrigin> {
    let raw = raw.trim();
    if raw.is_empty() || raw.bytes().any(|b| b.is_ascii_whitespace() || matches!(b, b',' | b'#' | b'?')) {
        return None;
    }

    let uri = Uri::from_str(raw).ok()?;
    let scheme = uri.scheme_str()?;
    if !is_valid_scheme(scheme) {
        return None;
    }
    // Uri accepts "https://host" and "https://host/" alike; nothing deeper.
    if !matches!(uri.path(), "" | "/") || uri.query().is_some() {
        return None;
    }

    let authority = uri.authority()?;
    let authority_str = authority.as_str();
    if authority_str.contains('@') {
        return None;
    }

    let host = authority.host();
    if host.is_empty() || !is_valid_host(host) {
        return None;
    }

    let port_part = &authority_str[host.len()..];
    if !port_part.is_empty() {
        let digits = port_part.strip_prefix(':')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || authority.port_u16().is_none() {
            return None;
        }
    }

    Some(ParsedOrigin {
        scheme: scheme.to_ascii_lowercase(),
        host: format!("{}{}", host.to_ascii_lowercase(), port_part),
    })
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`.
pub(crate) fn is_valid_scheme(scheme: &str) -> bool {
    let mut bytes = scheme.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

/// `name[:port]` as compared against origins: valid labels, numeric `u16` port.
pub(crate) fn is_valid_host_token(token: &str) -> bool {
    let (host, port) = match token.strip_prefix('[') {
        Some(_) => match token.find(']') {
            Some(end) => token.split_at(end + 1),
            None => return false,
        },
        None => match token.find(':') {
            Some(colon) => token.split_at(colon),
            None => (token, ""),
        },
    };
    if !is_valid_host(host) {
        return false;
    }
    match port.strip_prefix(':') {
        None => port.is_empty(),
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && digits.parse::<u16>().is_ok(),
    }
}

fn is_valid_host(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[') {
        return inner
            .strip_suffix(']')
            .is_some_and(|ip| !ip.is_empty() && ip.bytes().all(|b| b.is_ascii_hexdigit() || matches!(b, b':' | b'.')));
    }
    host.split('.').all(|label| {
        !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> (String, String) {
        let origin = parse_origin(raw).unwrap();
        (origin.scheme().to_string(), origin.host().to_string())
    }

    #[test]
    fn test_parses_scheme_and_host() {
        assert_eq!(parsed("https://test.host"), ("https".into(), "test.host".into()));
        assert_eq!(parsed("http://sub.test.host"), ("http".into(), "sub.test.host".into()));
    }

    #[test]
    fn test_lowercases_scheme_and_host() {
        assert_eq!(parsed("HTTPS://Test.HOST"), ("https".into(), "test.host".into()));
    }

    #[test]
    fn test_keeps_port_literally() {
        assert_eq!(parsed("https://localhost:9000"), ("https".into(), "localhost:9000".into()));
        // Default ports are not elided.
        assert_eq!(parsed("https://test.host:443"), ("https".into(), "test.host:443".into()));
    }

    #[test]
    fn test_tolerates_surrounding_whitespace_and_trailing_slash() {
        assert_eq!(parsed("  https://test.host/ "), ("https".into(), "test.host".into()));
    }

    #[test]
    fn test_ipv6_host() {
        assert_eq!(parsed("http://[::1]:8080"), ("http".into(), "[::1]:8080".into()));
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in [
            "",
            "null",
            "test.host",
            "://test.host",
            "https://",
            "https://test.host/path",
            "https://test.host?q=1",
            "https://test.host#frag",
            "https://user@test.host",
            "https://test.host:",
            "https://test.host:99999",
            "https://test.host:80a",
            "https://test..host",
            "https://test.host, https://other.host",
            "https://te st.host",
            "1ttp://test.host",
        ] {
            assert!(parse_origin(raw).is_none(), "expected '{}' to be rejected", raw);
        }
    }

    #[test]
    fn test_display() {
        let origin = parse_origin("https://Localhost:9000").unwrap();
        assert_eq!(origin.to_string(), "https://localhost:9000");
    }
}
