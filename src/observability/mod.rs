//! Observability subsystem.
//!
//! Structured logging goes through `tracing` (initialized in `main`, with
//! `TraceLayer` providing per-request spans); counters and latency
//! histograms live in metrics.rs behind an optional Prometheus endpoint.

pub mod metrics;
