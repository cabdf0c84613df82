//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → middleware.rs (Origin → Policy::authorize)
//!         NotCors  → handler
//!         Rejected → 403 Forbidden
//!         Allowed  → handler → Allow-Origin + Vary headers
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::cors_middleware;
pub use server::{with_cors, HttpServer};
