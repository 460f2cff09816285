//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, routing)
//!     → /proxy/*   → proxy::handler (forwarding pipeline)
//!     → /_rproxy/* → api (management CRUD)
//!     → everything else → assets.rs (console frontend)
//! ```

pub mod assets;
pub mod server;

pub use server::{AppState, HttpServer};
