//! Proxy-definition store.
//!
//! # Data Flow
//! ```text
//! management API (create/update/delete)
//!     → file.rs (lock, read-modify-write of proxies.json)
//!
//! proxy pipeline (per request)
//!     → file.rs get() — fresh point lookup, never cached
//! ```
//!
//! # Design Decisions
//! - The file on disk is the source of truth; every proxy request sees
//!   whatever is persisted at call time
//! - Mutations serialize behind a lock; readers take no lock and may race
//!   a concurrent write (last write wins)
//! - An unreadable or corrupt file reads as an empty store

pub mod file;
pub mod records;

pub use file::{ProxyStore, StoreError};
pub use records::{NewProxy, ProxyPatch, ProxyTarget};
