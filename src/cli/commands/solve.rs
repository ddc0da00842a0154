//! Solve command - decide the winner of one board size

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{SolverConfig, TerminalRule, validate_epsilon},
    cli::output::{format_number, print_kv, print_section},
    polygon::{DEFAULT_EPSILON, GameParams, GapSequence, Player},
    search::Solver,
};

#[derive(Parser, Debug)]
#[command(about = "Decide the winner for n points and k counters")]
pub struct SolveArgs {
    /// Number of marked points on the circle
    pub points: u32,

    /// Number of counters
    pub counters: u32,

    /// Scoring of a position with no legal move (`stuck-loses` or `stuck-wins`)
    #[arg(long, short = 'r', default_value_t = TerminalRule::default())]
    pub terminal_rule: TerminalRule,

    /// Minimum area gain for a move to count (finite, non-negative)
    #[arg(long, default_value_t = DEFAULT_EPSILON, value_parser = parse_epsilon)]
    pub epsilon: f64,

    /// Abort after expanding this many positions
    #[arg(long)]
    pub node_limit: Option<usize>,

    /// Also print one line of optimal play
    #[arg(long)]
    pub line: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the report to this JSON file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Parse an `--epsilon` value, rejecting negative and non-finite numbers.
pub(crate) fn parse_epsilon(value: &str) -> crate::Result<f64> {
    let epsilon = value
        .trim()
        .parse::<f64>()
        .map_err(|err| crate::Error::InvalidConfiguration {
            message: format!("invalid epsilon '{value}': {err}"),
        })?;
    validate_epsilon(epsilon)
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let params = GameParams::new(args.points, args.counters)?;

    let mut config = SolverConfig::default()
        .with_terminal_rule(args.terminal_rule)
        .with_epsilon(args.epsilon);
    if let Some(limit) = args.node_limit {
        config = config.with_node_limit(limit);
    }

    let mut solver = Solver::with_config(params.points(), config)?;
    let solution = solver
        .solve_game(&params)
        .with_context(|| format!("solving n={} k={}", args.points, args.counters))?;

    if let Some(path) = &args.output {
        solution
            .save(path)
            .with_context(|| format!("saving report to {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print_section(&format!("n = {}, k = {}", solution.points, solution.counters));
        print_kv("Start", &solution.start.to_string());
        print_kv("Start area", &format!("{:.6}", solution.start_area));
        print_kv("Terminal rule", &solution.terminal_rule.to_string());
        print_kv("Epsilon", &format!("{:e}", solver.config().epsilon));
        print_kv("Winner", &solution.winner.to_string());
        print_kv("Positions", &format_number(solution.stats.nodes_expanded));
        print_kv("Terminal positions", &format_number(solution.stats.terminal_nodes));
        print_kv("Table entries", &format_number(solution.table_entries));
        print_kv("Exact entries", &format_number(solver.table().exact_count()));
    }

    if args.line {
        let start = GapSequence::starting(&params);
        let line = solver.principal_line(&start, Player::One)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&line)?);
        } else {
            print_section("Optimal line");
            for (ply, step) in line.iter().enumerate() {
                println!(
                    "  {ply:>3}  {:<24} {}  area {:.6}",
                    step.state.to_string(),
                    step.to_move,
                    step.area
                );
            }
        }
    }

    Ok(())
}
