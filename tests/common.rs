//! Common test utilities for the polygon game test suite.
//!
//! Random positions, random playouts, and a table-free reference minimax.

#![allow(dead_code)]

use polygon_game::{
    GapSequence, Player, TerminalRule,
    polygon::MoveGenerator,
};
use rand::{Rng, rngs::StdRng};

/// Build a gap sequence from a literal, inferring `n` from the sum.
pub fn seq(gaps: &[u32]) -> GapSequence {
    let total = gaps.iter().sum();
    GapSequence::new(gaps.to_vec(), total).expect("literal gaps are valid")
}

/// Uniformly spread `n - k` extra units over `k` unit gaps.
///
/// # Panics
///
/// Panics if `n < k` or `k < 3`.
pub fn random_gaps(n: u32, k: usize, rng: &mut StdRng) -> GapSequence {
    assert!(k >= 3 && n as usize >= k);
    let mut gaps = vec![1u32; k];
    for _ in 0..(n as usize - k) {
        gaps[rng.random_range(0..k)] += 1;
    }
    GapSequence::new(gaps, n).expect("random gaps are valid")
}

/// Play uniformly random legal moves until none is left.
///
/// Returns the area of every position visited, starting with `start`.
pub fn random_playout(generator: &MoveGenerator, start: &GapSequence, rng: &mut StdRng) -> Vec<f64> {
    let mut areas = vec![generator.area(start)];
    let mut current = start.clone();
    loop {
        let moves = generator.legal_moves(&current);
        if moves.is_empty() {
            return areas;
        }
        let pick = rng.random_range(0..moves.len());
        current = moves[pick].state.clone();
        areas.push(moves[pick].area);
    }
}

/// Plain recursive minimax with no table and no pruning.
///
/// Only usable on small boards; it revisits every transposition.
pub fn reference_value(
    generator: &MoveGenerator,
    state: &GapSequence,
    player: Player,
    rule: TerminalRule,
) -> i8 {
    let moves = generator.legal_moves(state);
    if moves.is_empty() {
        return match rule {
            TerminalRule::StuckPlayerLoses => player.opponent().sign(),
            TerminalRule::StuckPlayerWins => player.sign(),
        };
    }
    let values = moves
        .iter()
        .map(|mv| reference_value(generator, &mv.state, player.opponent(), rule));
    if player.is_maximizer() {
        values.max().unwrap_or(-1)
    } else {
        values.min().unwrap_or(1)
    }
}
