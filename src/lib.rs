//! Cross-origin access-control decision engine.
//!
//! Trusted hosts, schemes and subdomain patterns are compiled into an
//! immutable [`Policy`]; each request's `Origin` header is checked with
//! [`Policy::authorize`]. The [`http`] module adapts the engine to axum.

pub mod config;
pub mod cors;
pub mod http;
pub mod observability;

pub use config::schema::ServerConfig;
pub use cors::{Decision, Policy, PolicyBuilder};
pub use http::HttpServer;
