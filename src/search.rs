//! Adversarial search: alpha-beta minimax with a transposition table

pub mod cancel;
pub mod engine;
pub mod outcome;
pub mod table;

pub use cancel::CancelToken;
pub use engine::Solver;
pub use outcome::{Ply, SearchStats, Solution, Winner};
pub use table::{Bound, Entry, TranspositionTable};

use crate::{Result, app::SolverConfig, polygon::GameParams};

/// Validate `(n, k)` and solve the standard opening with a fresh solver.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`](crate::Error::InvalidParameters) for
/// `k < 3` or `n < k + 2`,
/// [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) for a
/// rejected `config`, plus any error the search itself reports.
pub fn solve_game(n: u32, k: u32, config: SolverConfig) -> Result<Solution> {
    let params = GameParams::new(n, k)?;
    Solver::with_config(n, config)?.solve_game(&params)
}

/// Winner of the standard `(n, k)` opening under normal play.
pub fn solve(n: u32, k: u32) -> Result<Winner> {
    Ok(solve_game(n, k, SolverConfig::default())?.winner)
}
