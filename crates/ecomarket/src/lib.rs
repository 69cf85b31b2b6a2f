//! Command-line shell for the EcoMarket assistant.
//!
//! Parses arguments, loads settings, wires logging, and hands one query to
//! the core dispatcher.

pub mod cli;
pub mod logging;

/// Re-export for convenience.
pub use ecomarket_config as config;
/// Re-export for convenience.
pub use ecomarket_core as core;
