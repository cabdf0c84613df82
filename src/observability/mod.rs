//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Origin decisions logged with the origin and rejection reason

pub mod logging;

pub use logging::init_logging;
