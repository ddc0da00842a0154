//! Legal move generation under the strictly-increasing-area rule

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    gaps::GapSequence,
    geometry::{CircleTable, DEFAULT_EPSILON},
    symmetry::CanonicalKey,
};

/// A successor position and the area of its polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub state: GapSequence,
    pub area: f64,
}

/// Successors of one position, one per symmetry class, largest area first.
pub type MoveList = Vec<Move>;

/// Move generator bound to one circle and one area tolerance.
#[derive(Debug, Clone)]
pub struct MoveGenerator {
    circle: CircleTable,
    epsilon: f64,
}

impl MoveGenerator {
    pub fn new(n: u32) -> Self {
        Self::with_epsilon(n, DEFAULT_EPSILON)
    }

    /// `epsilon` should pass [`validate_epsilon`](crate::app::validate_epsilon);
    /// a negative value lets moves shrink the polygon.
    pub fn with_epsilon(n: u32, epsilon: f64) -> Self {
        MoveGenerator {
            circle: CircleTable::new(n),
            epsilon,
        }
    }

    pub fn circle(&self) -> &CircleTable {
        &self.circle
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn area(&self, state: &GapSequence) -> f64 {
        self.circle.area(state)
    }

    pub fn legal_moves(&self, state: &GapSequence) -> MoveList {
        legal_moves(state, &self.circle, self.epsilon)
    }
}

/// Enumerate every legal successor of `state`.
///
/// For each counter `i`, `j` units are shifted between gap `i` and the gap
/// before it, in both directions, keeping every gap positive. A candidate is
/// kept when it is not symmetric to `state`, its area exceeds the current
/// area by more than `epsilon`, and no earlier candidate in this call shares
/// its canonical key. The result is stable-sorted by descending area, so ties
/// keep generation order.
///
/// An empty list means `state` is terminal.
pub fn legal_moves(state: &GapSequence, circle: &CircleTable, epsilon: f64) -> MoveList {
    let gaps = state.gaps();
    let k = gaps.len();
    let current_area = circle.area(state);
    let current_key = state.canonical_key();
    let mut seen: HashSet<CanonicalKey> = HashSet::with_capacity(k * 8);
    let mut moves = MoveList::new();

    let mut consider = |candidate: GapSequence| {
        let key = candidate.canonical_key();
        if key == current_key {
            return;
        }
        let area = circle.area(&candidate);
        if area > current_area + epsilon && seen.insert(key) {
            moves.push(Move {
                state: candidate,
                area,
            });
        }
    };

    for i in 0..k {
        let prev = (i + k - 1) % k;
        for amount in 1..gaps[i] {
            consider(state.transfer(i, prev, amount));
        }
        for amount in 1..gaps[prev] {
            consider(state.transfer(prev, i, amount));
        }
    }

    moves.sort_by(|a, b| b.area.total_cmp(&a.area));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(gaps: &[u32]) -> GapSequence {
        let total = gaps.iter().sum();
        GapSequence::new(gaps.to_vec(), total).unwrap()
    }

    #[test]
    fn five_points_three_counters_has_one_move_class() {
        let generator = MoveGenerator::new(5);
        let start = seq(&[1, 1, 3]);
        let moves = generator.legal_moves(&start);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].state.canonical_key().as_slice(), &[1, 2, 2]);
        assert!(moves[0].area > generator.area(&start));
    }

    #[test]
    fn moves_are_sorted_by_descending_area() {
        let generator = MoveGenerator::new(7);
        let moves = generator.legal_moves(&seq(&[1, 1, 5]));

        let classes: Vec<_> = moves
            .iter()
            .map(|mv| mv.state.canonical_key().to_string())
            .collect();
        assert_eq!(classes, ["1,3,3", "1,2,4"]);
        assert!(moves.windows(2).all(|pair| pair[0].area >= pair[1].area));
    }

    #[test]
    fn every_move_grows_the_polygon() {
        let generator = MoveGenerator::new(11);
        let state = seq(&[1, 2, 1, 7]);
        let area = generator.area(&state);
        for mv in generator.legal_moves(&state) {
            assert!(mv.area > area + generator.epsilon());
            assert_eq!(mv.state.total(), 11);
            assert!(mv.state.gaps().iter().all(|&gap| gap >= 1));
        }
    }

    #[test]
    fn successors_are_unique_per_symmetry_class() {
        let generator = MoveGenerator::new(12);
        let moves = generator.legal_moves(&seq(&[1, 1, 1, 9]));
        let keys: HashSet<_> = moves.iter().map(|mv| mv.state.canonical_key()).collect();
        assert_eq!(keys.len(), moves.len());
    }

    #[test]
    fn regular_polygon_is_terminal() {
        let generator = MoveGenerator::new(9);
        assert!(generator.legal_moves(&seq(&[3, 3, 3])).is_empty());
    }

    #[test]
    fn symmetric_redistribution_is_not_a_move() {
        // [2,1,2] -> [1,2,2] is a rotation of the start, so nothing changes
        let generator = MoveGenerator::new(5);
        assert!(generator.legal_moves(&seq(&[2, 1, 2])).is_empty());
    }
}
