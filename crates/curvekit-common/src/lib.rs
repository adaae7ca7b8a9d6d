//! # CurveKit Common
//!
//! Logging configuration shared by the CurveKit crates and tools.
//!
//! Library crates only emit `tracing` events; binaries decide how those
//! events are rendered by calling [`init_logging`] once at startup.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};
