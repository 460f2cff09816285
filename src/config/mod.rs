//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → AppConfig (immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so a missing file still boots
//! - Proxy *definitions* live in the store, not here: they are data,
//!   re-read per request, while this config is process wiring

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    AppConfig, FrontendConfig, ListenerConfig, ObservabilityConfig, StoreConfig, TimeoutConfig,
    UpstreamConfig,
};
