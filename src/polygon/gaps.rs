//! Game parameters, players, and the gap-sequence state

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// First player, the maximizer
    One,
    /// Second player, the minimizer
    Two,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Minimax sign: `+1` for the maximizer, `-1` for the minimizer
    pub fn sign(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    pub fn is_maximizer(self) -> bool {
        self == Player::One
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// Validated board size: `n` marked points and `k` counters.
///
/// Deserialization goes through [`GameParams::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameParams")]
pub struct GameParams {
    points: u32,
    counters: u32,
}

impl GameParams {
    /// Smallest supported number of counters.
    pub const MIN_COUNTERS: u32 = 3;

    /// Create parameters for `n` points and `k` counters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `k < 3` or `n < k + 2`. With
    /// fewer points every gap is already (almost) unit length and no move
    /// can grow the polygon.
    pub fn new(n: u32, k: u32) -> Result<Self> {
        if k < Self::MIN_COUNTERS {
            return Err(Error::InvalidParameters {
                n,
                k,
                reason: format!("need at least {} counters", Self::MIN_COUNTERS),
            });
        }
        if n < k.saturating_add(2) {
            return Err(Error::InvalidParameters {
                n,
                k,
                reason: "need at least k + 2 points".to_string(),
            });
        }
        Ok(GameParams {
            points: n,
            counters: k,
        })
    }

    /// Number of marked points on the circle (`n`).
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Number of counters (`k`).
    pub fn counters(&self) -> u32 {
        self.counters
    }
}

#[derive(Deserialize)]
struct RawGameParams {
    points: u32,
    counters: u32,
}

impl TryFrom<RawGameParams> for GameParams {
    type Error = Error;

    fn try_from(raw: RawGameParams) -> Result<Self> {
        GameParams::new(raw.points, raw.counters)
    }
}

/// Circular sequence of arc-length gaps between consecutive counters.
///
/// Every gap is at least 1 and the gaps sum to the number of points on the
/// circle. Values are never mutated in place; successors are fresh copies.
/// Deserialized sequences are checked like [`GapSequence::new`], with `n`
/// taken from their sum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>")]
pub struct GapSequence(Vec<u32>);

impl GapSequence {
    /// Build a gap sequence over a circle of `n` points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGapSequence`] if there are fewer than three
    /// gaps, any gap is zero, or the gaps do not sum to `n`.
    pub fn new(gaps: Vec<u32>, n: u32) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidGapSequence {
            gaps: gaps.clone(),
            reason,
        };

        if gaps.len() < GameParams::MIN_COUNTERS as usize {
            return Err(invalid(format!(
                "need at least {} gaps, got {}",
                GameParams::MIN_COUNTERS,
                gaps.len()
            )));
        }
        if let Some(position) = gaps.iter().position(|&gap| gap == 0) {
            return Err(invalid(format!("gap at index {position} is zero")));
        }
        let total: u64 = gaps.iter().map(|&gap| u64::from(gap)).sum();
        if total != u64::from(n) {
            return Err(invalid(format!("gaps sum to {total}, expected {n}")));
        }

        Ok(GapSequence(gaps))
    }

    /// Opening position: `k - 1` adjacent counters followed by one long gap.
    pub fn starting(params: &GameParams) -> Self {
        let k = params.counters() as usize;
        let mut gaps = vec![1; k - 1];
        gaps.push(params.points() - params.counters() + 1);
        GapSequence(gaps)
    }

    /// Wrap an already-validated canonical key.
    pub(crate) fn from_canonical(gaps: &[u32]) -> Self {
        GapSequence(gaps.to_vec())
    }

    /// Successor obtained by moving `amount` units from gap `from` into gap
    /// `to`. Callers guarantee the source gap stays positive.
    pub(crate) fn transfer(&self, from: usize, to: usize, amount: u32) -> Self {
        debug_assert!(self.0[from] > amount, "transfer would empty a gap");
        let mut gaps = self.0.clone();
        gaps[from] -= amount;
        gaps[to] += amount;
        GapSequence(gaps)
    }

    pub fn gaps(&self) -> &[u32] {
        &self.0
    }

    /// Number of counters (`k`).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of points on the circle (`n`).
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Rotate left by `shift` positions.
    pub fn rotated(&self, shift: usize) -> Self {
        let mut gaps = self.0.clone();
        if !gaps.is_empty() {
            let len = gaps.len();
            gaps.rotate_left(shift % len);
        }
        GapSequence(gaps)
    }

    /// Same gaps walked in the opposite direction.
    pub fn reversed(&self) -> Self {
        GapSequence(self.0.iter().rev().copied().collect())
    }
}

impl TryFrom<Vec<u32>> for GapSequence {
    type Error = Error;

    fn try_from(gaps: Vec<u32>) -> Result<Self> {
        let total: u64 = gaps.iter().map(|&gap| u64::from(gap)).sum();
        let n = u32::try_from(total).map_err(|_| Error::InvalidGapSequence {
            gaps: gaps.clone(),
            reason: format!("gaps sum to {total}, more than any circle"),
        })?;
        GapSequence::new(gaps, n)
    }
}

impl fmt::Display for GapSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, gap) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{gap}")?;
        }
        write!(f, "]")
    }
}

impl AsRef<[u32]> for GapSequence {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}
