//! Moves command - list the legal successors of a position

use anyhow::Result;
use clap::Parser;

use super::solve::parse_epsilon;
use crate::{
    cli::output::print_kv,
    polygon::{DEFAULT_EPSILON, GapSequence, MoveGenerator},
};

#[derive(Parser, Debug)]
#[command(about = "List legal moves from a gap sequence")]
pub struct MovesArgs {
    /// Gaps between consecutive counters, e.g. `1 1 5`
    #[arg(required = true, num_args = 3..)]
    pub gaps: Vec<u32>,

    /// Minimum area gain for a move to count (finite, non-negative)
    #[arg(long, default_value_t = DEFAULT_EPSILON, value_parser = parse_epsilon)]
    pub epsilon: f64,
}

pub fn execute(args: MovesArgs) -> Result<()> {
    let state = GapSequence::try_from(args.gaps)?;
    let generator = MoveGenerator::with_epsilon(state.total(), args.epsilon);

    print_kv("Position", &state.to_string());
    print_kv("Canonical", &state.canonical_key().to_string());
    print_kv("Area", &format!("{:.6}", generator.area(&state)));

    let moves = generator.legal_moves(&state);
    if moves.is_empty() {
        println!("  no legal moves (terminal)");
    }
    for mv in moves {
        println!("  {:<24} area {:.6}", mv.state.to_string(), mv.area);
    }
    Ok(())
}
