//! CORS middleware.
//! Installs a [`Policy`] in front of an axum router.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{HOST, ORIGIN},
        Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::cors::{apply_headers, parse_origin, Decision, Policy, RejectReason};

/// Evaluate the request's Origin against `policy`.
///
/// Requests without an Origin, or whose Origin names the request's own host,
/// pass through untouched. Rejected origins get `403 Forbidden` and the inner
/// service is not called. Allowed origins are reflected on the inner
/// service's response.
pub async fn cors_middleware(State(policy): State<Arc<Policy>>, req: Request<Body>, next: Next) -> Response {
    let decision = decide(&policy, &req);

    match decision {
        Decision::NotCors => next.run(req).await,
        Decision::Rejected { reason } => {
            let origin = req.headers().get(ORIGIN).and_then(|v| v.to_str().ok()).unwrap_or("<binary>");
            warn!(origin = %origin, reason = %reason, "Cross-origin request rejected");
            StatusCode::FORBIDDEN.into_response()
        }
        Decision::Allowed { .. } => {
            debug!(origin = ?decision.allow_origin(), "Cross-origin request allowed");
            let mut response = next.run(req).await;
            apply_headers(&decision, policy.allow_credentials(), response.headers_mut());
            response
        }
    }
}

fn decide(policy: &Policy, req: &Request<Body>) -> Decision {
    let mut values = req.headers().get_all(ORIGIN).iter();
    let Some(value) = values.next() else {
        return Decision::NotCors;
    };
    if values.next().is_some() {
        return Decision::Rejected {
            reason: RejectReason::Malformed,
        };
    }
    let Ok(raw) = value.to_str() else {
        return Decision::Rejected {
            reason: RejectReason::Malformed,
        };
    };

    if is_same_origin(raw, req) {
        debug!(origin = %raw, "Same-origin request");
        return Decision::NotCors;
    }
    policy.authorize(Some(raw))
}

/// True when the Origin's host token equals the request's own host.
///
/// The host comes from the `Host` header, or the URI authority for HTTP/2.
fn is_same_origin(raw: &str, req: &Request<Body>) -> bool {
    let Some(origin) = parse_origin(raw) else {
        return false;
    };
    let own_host = req
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()));
    own_host.is_some_and(|host| host.trim().eq_ignore_ascii_case(origin.host()))
}
