//! Authorization decisions and the response headers they imply.
//!
//! # Responsibilities
//! - Describe the outcome of one origin check
//! - Translate an allow into `Access-Control-Allow-Origin` + `Vary: Origin`
//!
//! # Design Decisions
//! - The request's own origin is reflected, never `*`, so credentialed
//!   requests keep working
//! - Rejecting is left to the adapter; this module only writes headers

use std::fmt;

use axum::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, VARY,
};
use serde::Serialize;

/// Why a cross-origin request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The Origin header could not be parsed.
    Malformed,
    /// No host rule authorizes the origin.
    NotAllowed,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("malformed origin"),
            Self::NotAllowed => f.write_str("origin not allowed"),
        }
    }
}

/// Outcome of [`Policy::authorize`](crate::cors::Policy::authorize).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// No Origin header: not a cross-origin request.
    NotCors,
    /// Origin authorized; `origin` is the value to reflect.
    Allowed { origin: String },
    /// Origin refused.
    Rejected { reason: RejectReason },
}

impl Decision {
    /// True unless the request must be refused.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// Value for `Access-Control-Allow-Origin`, if any.
    pub fn allow_origin(&self) -> Option<&str> {
        match self {
            Self::Allowed { origin } => Some(origin),
            _ => None,
        }
    }
}

/// Write the CORS response headers for an allowed decision.
///
/// Does nothing for `NotCors` and `Rejected`. `Vary` gains `Origin` once,
/// existing entries are preserved.
pub fn apply_headers(decision: &Decision, allow_credentials: bool, headers: &mut HeaderMap) {
    let Some(origin) = decision.allow_origin() else {
        return;
    };
    let Ok(value) = HeaderValue::from_str(origin) else {
        return;
    };

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    if allow_credentials {
        headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    }
    append_vary_origin(headers);
}

fn append_vary_origin(headers: &mut HeaderMap) {
    let already_varies = headers
        .get_all(VARY)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|v| v == "*" || v.eq_ignore_ascii_case("origin"));
    if !already_varies {
        headers.append(VARY, HeaderValue::from_static("Origin"));
    }
}
