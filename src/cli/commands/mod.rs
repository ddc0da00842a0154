//! Subcommands of the `polygon` binary

pub mod moves;
pub mod solve;
