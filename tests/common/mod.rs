//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::ORIGIN, Request, StatusCode},
    Router,
};
use cors_gate::config::{HostConfig, ServerConfig};
use cors_gate::HttpServer;
use tower::ServiceExt;

pub const SCHEME: &str = "https";
pub const SUB_DOMAIN: &str = "subdomain";
pub const OTHER_SUB_DOMAIN: &str = "subdomain.other";
pub const HOST: &str = "test.host";
pub const OTHER_HOST: &str = "other.host";

/// A host entry as it would appear in the config file.
pub fn host(host: &str, schemes: &[&str], subdomains: &[&str]) -> HostConfig {
    HostConfig {
        host: host.to_string(),
        schemes: schemes.iter().map(|s| s.to_string()).collect(),
        subdomains: subdomains.iter().map(|s| s.to_string()).collect(),
    }
}

/// Build the demo app for the given hosts.
pub fn test_app(hosts: Vec<HostConfig>) -> Router {
    let mut config = ServerConfig::default();
    config.cors.hosts = hosts;
    HttpServer::new(config).expect("valid test policy").router()
}

/// GET /test without an Origin header.
pub async fn non_cors_call(app: &Router) -> StatusCode {
    let req = Request::builder().uri("/test").body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap().status()
}

/// GET /test with the given Origin header.
pub async fn cors_call(app: &Router, origin: &str) -> StatusCode {
    let req = Request::builder()
        .uri("/test")
        .header(ORIGIN, origin)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap().status()
}
