//! Dihedral symmetry reduction for gap sequences
//!
//! Two gap sequences describe the same position when one is a rotation of
//! the other or of its reversal. The canonical representative is the
//! lexicographically smallest of those `2k` images, found in linear time with
//! a minimal-rotation scan instead of enumerating the group.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use super::gaps::{GapSequence, Player};

/// Start index of the lexicographically smallest rotation of `seq`.
///
/// Two candidate starts `i` and `j` are compared over a match length `k` on
/// the conceptually doubled sequence. On a mismatch the losing
/// candidate jumps past the compared prefix, so each step either extends `k`
/// or advances a candidate and the scan is O(len). A constant sequence ends
/// when `k` reaches the length.
pub fn minimal_rotation_index<T: Ord>(seq: &[T]) -> usize {
    let n = seq.len();
    let at = |idx: usize| &seq[idx % n];

    let (mut i, mut j, mut k) = (0usize, 1usize, 0usize);
    while i < n && j < n && k < n {
        match at(i + k).cmp(at(j + k)) {
            Ordering::Equal => {
                k += 1;
                continue;
            }
            Ordering::Greater => i += k + 1,
            Ordering::Less => j += k + 1,
        }
        if i == j {
            j += 1;
        }
        k = 0;
    }
    i.min(j)
}

fn min_rotation<T: Ord + Copy>(seq: &[T]) -> Vec<T> {
    if seq.is_empty() {
        return Vec::new();
    }
    let start = minimal_rotation_index(seq);
    seq[start..].iter().chain(&seq[..start]).copied().collect()
}

/// Canonical representative of a gap sequence's dihedral class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalKey(Box<[u32]>);

impl CanonicalKey {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gap) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{gap}")?;
        }
        Ok(())
    }
}

/// Canonical key of `seq`: the smaller of its minimal rotation and the
/// minimal rotation of its reversal. Ties keep the forward rotation.
pub fn canonical_key(seq: &[u32]) -> CanonicalKey {
    let forward = min_rotation(seq);
    let reversed: Vec<u32> = seq.iter().rev().copied().collect();
    let backward = min_rotation(&reversed);

    let best = if forward <= backward { forward } else { backward };
    CanonicalKey(best.into_boxed_slice())
}

/// Transposition-table key: canonical geometry plus the player to move.
///
/// The same geometry with a different player to move is a different game
/// node, so both parts take part in equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub gaps: CanonicalKey,
    pub to_move: Player,
}

impl StateKey {
    pub fn new(state: &GapSequence, to_move: Player) -> Self {
        StateKey {
            gaps: state.canonical_key(),
            to_move,
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.to_move {
            Player::One => '1',
            Player::Two => '2',
        };
        write!(f, "{}|{tag}", self.gaps)
    }
}

impl GapSequence {
    pub fn canonical_key(&self) -> CanonicalKey {
        canonical_key(self.gaps())
    }

    /// The canonical member of this sequence's symmetry class.
    pub fn canonical(&self) -> GapSequence {
        let key = self.canonical_key();
        GapSequence::from_canonical(key.as_slice())
    }

    /// Whether `other` is a rotation or reflection of `self`.
    pub fn is_symmetric_to(&self, other: &GapSequence) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}
