//! Solver for the polygon area game
//!
//! `k` counters sit on a circle of `n` evenly spaced points. A move shifts
//! arc length between two neighbouring gaps and is legal only if the polygon
//! through the counters gets strictly larger. This crate decides who wins
//! under optimal play.
//!
//! The crate provides:
//! - Game state, geometry, dihedral canonicalization, and move rules
//!   ([`polygon`])
//! - Alpha-beta minimax with a bound-aware transposition table ([`search`])
//! - Traversal hooks for tracing and graph capture ([`ports`], [`adapters`])
//! - Solver configuration ([`app`]) and a thin command-line front end
//!   ([`cli`])

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod polygon;
pub mod ports;
pub mod search;

pub use app::{SolverConfig, TerminalRule};
pub use error::{Error, Result};
pub use polygon::{GameParams, GapSequence, Player};
pub use search::{Solution, Solver, Winner, solve, solve_game};
