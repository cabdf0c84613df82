//! Cross-origin access-control subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration time:
//!     (host, schemes, subdomains)[]
//!     → rule.rs (normalize, validate patterns)
//!     → policy.rs (PolicyBuilder accumulates HostRules)
//!     → Freeze as immutable Policy, shared via Arc
//!
//! Per request:
//!     Origin header (raw, optional)
//!     → origin.rs (parse into scheme + host[:port])
//!     → matcher.rs (OR over rules: host, subdomain, scheme)
//!     → decision.rs (NotCors / Allowed / Rejected)
//!     → adapter applies headers or short-circuits
//! ```
//!
//! # Design Decisions
//! - Policy is read-only after build; no locks on the request path
//! - Host and port compared as one token, no port normalization
//! - Subdomain matches anchored on a label boundary
//! - Anything unparseable is denied, never matched

pub mod decision;
pub mod error;
pub mod matcher;
pub mod origin;
pub mod policy;
pub mod rule;

pub use decision::{apply_headers, Decision, RejectReason};
pub use error::PolicyError;
pub use origin::{parse_origin, ParsedOrigin};
pub use policy::{Policy, PolicyBuilder};
pub use rule::{HostRule, SubdomainPattern};
