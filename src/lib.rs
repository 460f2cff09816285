//! Embedding-friendly reverse proxy library.
//!
//! Re-exposes internal applications under `/proxy/{id}` prefixes,
//! rewriting returned HTML/CSS so their references keep resolving and
//! stripping the headers that block iframe embedding.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod rewrite;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
