//! Configuration types for the solver.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, polygon::DEFAULT_EPSILON, search::CancelToken};

/// How a position with no legal move is scored.
///
/// Both conventions exist for this game. The choice flips the reported winner
/// for many board sizes, so a solver applies exactly one rule for its whole
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerminalRule {
    /// The player with no legal move loses (normal play).
    #[default]
    StuckPlayerLoses,
    /// The player with no legal move wins.
    StuckPlayerWins,
}

impl TerminalRule {
    pub const VARIANTS: &'static str = "stuck-loses, stuck-wins";
}

impl fmt::Display for TerminalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TerminalRule::StuckPlayerLoses => "stuck-loses",
            TerminalRule::StuckPlayerWins => "stuck-wins",
        };
        f.write_str(label)
    }
}

impl FromStr for TerminalRule {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stuck-loses" | "stuck_loses" | "normal" => Ok(TerminalRule::StuckPlayerLoses),
            "stuck-wins" | "stuck_wins" | "misere" => Ok(TerminalRule::StuckPlayerWins),
            _ => Err(Error::ParseTerminalRule {
                input: s.to_string(),
                expected: Self::VARIANTS.to_string(),
            }),
        }
    }
}

/// Configuration for a [`Solver`](crate::search::Solver).
///
/// # Examples
///
/// ```
/// use polygon_game::app::{SolverConfig, TerminalRule};
///
/// let config = SolverConfig::default()
///     .with_terminal_rule(TerminalRule::StuckPlayerWins)
///     .with_epsilon(1e-10)
///     .with_node_limit(1_000_000);
/// assert_eq!(config.node_limit, Some(1_000_000));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Minimum area gain for a move to count as strictly increasing
    pub epsilon: f64,
    /// Scoring of positions without a legal move
    pub terminal_rule: TerminalRule,
    /// Abort with an error after expanding this many positions
    pub node_limit: Option<usize>,
    /// Cooperative cancellation, checked once per expanded position
    #[serde(skip)]
    pub cancel: Option<CancelToken>,
}

impl SolverConfig {
    /// Check the settings a [`Solver`](crate::search::Solver) relies on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an epsilon that is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        validate_epsilon(self.epsilon)?;
        Ok(())
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_terminal_rule(mut self, rule: TerminalRule) -> Self {
        self.terminal_rule = rule;
        self
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Accept only finite, non-negative area tolerances.
///
/// A negative tolerance admits moves that shrink the polygon, so play no
/// longer terminates. NaN rejects every move.
pub fn validate_epsilon(epsilon: f64) -> Result<f64> {
    if epsilon.is_finite() && epsilon >= 0.0 {
        Ok(epsilon)
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("epsilon must be finite and non-negative, got {epsilon}"),
        })
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            terminal_rule: TerminalRule::default(),
            node_limit: None,
            cancel: None,
        }
    }
}
