//! Results reported by the solver

use std::{fmt, fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    app::TerminalRule,
    polygon::{GameParams, GapSequence, Player},
};

/// Winner of a game under optimal play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player1,
    Player2,
    /// No decisive value (not produced by a finished solve)
    None,
}

impl Winner {
    /// Map a minimax value to a winner: positive favours player 1.
    pub fn from_value(value: i8) -> Self {
        match value.signum() {
            1 => Winner::Player1,
            -1 => Winner::Player2,
            _ => Winner::None,
        }
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Winner::Player1 => Some(Player::One),
            Winner::Player2 => Some(Player::Two),
            Winner::None => None,
        }
    }
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Winner::Player1,
            Player::Two => Winner::Player2,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Player1 => write!(f, "Player 1"),
            Winner::Player2 => write!(f, "Player 2"),
            Winner::None => write!(f, "No winner"),
        }
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions whose moves were generated
    pub nodes_expanded: usize,
    /// Positions with no legal move
    pub terminal_nodes: usize,
    /// Lookups answered by the transposition table
    pub table_hits: usize,
    /// Move lists abandoned early by alpha-beta
    pub cutoffs: usize,
    /// Deepest frame stack reached
    pub max_depth: usize,
}

/// One position along a line of play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ply {
    pub state: GapSequence,
    pub to_move: Player,
    pub area: f64,
}

/// Full report of one solved game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub points: u32,
    pub counters: u32,
    pub start: GapSequence,
    pub start_area: f64,
    pub terminal_rule: TerminalRule,
    pub winner: Winner,
    pub value: i8,
    pub stats: SearchStats,
    /// Distinct (position, player) entries in the transposition table
    pub table_entries: usize,
}

impl Solution {
    /// Save the report as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a report saved with [`Solution::save`]
    ///
    /// # Errors
    ///
    /// Besides I/O and JSON errors, rejects reports whose board size is
    /// invalid or whose start position does not fit that board.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let solution: Solution = serde_json::from_reader(file)?;
        solution.check_board()?;
        Ok(solution)
    }

    fn check_board(&self) -> Result<()> {
        let params = GameParams::new(self.points, self.counters)?;
        if self.start.total() != params.points() || self.start.len() != params.counters() as usize
        {
            return Err(Error::InvalidGapSequence {
                gaps: self.start.gaps().to_vec(),
                reason: format!(
                    "start does not fit n={} k={}",
                    params.points(),
                    params.counters()
                ),
            });
        }
        Ok(())
    }
}
