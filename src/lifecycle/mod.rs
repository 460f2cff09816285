//! Lifecycle management.
//!
//! Startup happens in `main` (config first, then subsystems, then the
//! listener); shutdown.rs coordinates the reverse on SIGINT.

pub mod shutdown;

pub use shutdown::Shutdown;
