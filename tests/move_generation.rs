//! Integration tests for legal move generation

mod common;

use std::collections::HashSet;

use polygon_game::{
    GameParams, GapSequence,
    polygon::{MoveGenerator, legal_moves},
};
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn test_five_three_opening_has_single_successor_class() {
    let params = GameParams::new(5, 3).expect("valid parameters");
    let start = GapSequence::starting(&params);
    assert_eq!(start.gaps(), &[1, 1, 3]);

    let moves = MoveGenerator::new(5).legal_moves(&start);
    assert_eq!(moves.len(), 1, "only [1,2,2] grows the triangle");
    assert_eq!(moves[0].state.canonical_key().as_slice(), &[1, 2, 2]);
}

#[test]
fn test_free_function_matches_generator() {
    let generator = MoveGenerator::new(10);
    let state = common::seq(&[1, 1, 2, 6]);
    let direct = legal_moves(&state, generator.circle(), generator.epsilon());
    assert_eq!(direct, generator.legal_moves(&state));
}

#[test]
fn test_move_invariants_on_random_positions() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for n in 6..=14u32 {
        let generator = MoveGenerator::new(n);
        for k in 3..=(n as usize - 2).min(6) {
            for _ in 0..10 {
                let state = common::random_gaps(n, k, &mut rng);
                let area = generator.area(&state);
                let moves = generator.legal_moves(&state);

                let keys: HashSet<_> = moves.iter().map(|mv| mv.state.canonical_key()).collect();
                assert_eq!(keys.len(), moves.len(), "duplicate class from {state}");
                assert!(!keys.contains(&state.canonical_key()), "self-move from {state}");

                for mv in &moves {
                    assert_eq!(mv.state.len(), k);
                    assert_eq!(mv.state.total(), n);
                    assert!(mv.area > area + generator.epsilon());
                    assert!((mv.area - generator.area(&mv.state)).abs() < 1e-15);
                }
                assert!(moves.windows(2).all(|pair| pair[0].area >= pair[1].area));
            }
        }
    }
}

#[test]
fn test_symmetric_positions_have_equivalent_moves() {
    let generator = MoveGenerator::new(11);
    let state = common::seq(&[1, 2, 1, 7]);
    let expected: HashSet<_> = generator
        .legal_moves(&state)
        .iter()
        .map(|mv| mv.state.canonical_key())
        .collect();

    for image in [state.rotated(1), state.rotated(3), state.reversed()] {
        let classes: HashSet<_> = generator
            .legal_moves(&image)
            .iter()
            .map(|mv| mv.state.canonical_key())
            .collect();
        assert_eq!(classes, expected, "moves from {image}");
    }
}

#[test]
fn test_random_playouts_strictly_grow_and_terminate() {
    let mut rng = StdRng::seed_from_u64(42);
    for (n, k) in [(7, 3), (12, 4), (17, 4), (18, 5), (20, 6)] {
        let params = GameParams::new(n, k).expect("valid parameters");
        let generator = MoveGenerator::new(n);
        let start = GapSequence::starting(&params);
        for _ in 0..20 {
            let areas = common::random_playout(&generator, &start, &mut rng);
            assert!(
                areas.windows(2).all(|pair| pair[1] > pair[0]),
                "area must grow every ply for n={n} k={k}"
            );
        }
    }
}

#[test]
fn test_large_epsilon_removes_marginal_moves() {
    let state = common::seq(&[1, 1, 1, 9]);
    let loose = MoveGenerator::new(12).legal_moves(&state);
    let strict = MoveGenerator::with_epsilon(12, 0.6).legal_moves(&state);
    assert!(strict.len() < loose.len());
    let area = MoveGenerator::new(12).area(&state);
    assert!(strict.iter().all(|mv| mv.area > area + 0.6));
}
