//! Proxy pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! /proxy/{id}/{path} request
//!     → resolver.rs  (store lookup → 404/403 short-circuit)
//!     → headers.rs   (inbound sanitization)
//!     → forwarder.rs (single outbound attempt, 30s timeout)
//!     → handler.rs   (content-type dispatch → rewrite | passthrough)
//!     → headers.rs   (outbound sanitization + CORS)
//!     → client response, upstream status preserved
//! ```
//!
//! # Design Decisions
//! - Every request is independent; nothing is cached or shared across
//!   in-flight requests
//! - Exactly one outbound attempt; transport faults map to 502
//! - Rewrite failures degrade to pass-through content, never to errors

pub mod error;
pub mod forwarder;
pub mod handler;
pub mod headers;
pub mod resolver;

pub use error::ProxyError;
pub use forwarder::{RequestForwarder, UpstreamResponse};
pub use headers::{FRAME_BLOCKING_HEADERS, HOP_BY_HOP_HEADERS};
pub use resolver::{ProxyResolver, ResolvedProxy};
