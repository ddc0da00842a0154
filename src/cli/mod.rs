//! Command-line front end for the solver
//!
//! Parsing and printing only; positions are decided by [`crate::search`].

pub mod commands;
pub mod output;
