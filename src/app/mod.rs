//! Application layer: solver configuration.

pub mod config;

pub use config::{SolverConfig, TerminalRule, validate_epsilon};
