//! Alpha-beta minimax over the move graph
//!
//! The search walks an explicit stack of frames instead of recursing, so the
//! depth of a game is bounded by heap memory rather than the thread stack.
//! Every finished frame is written to the transposition table together with
//! the bound it proves.

use std::vec;

use tracing::{debug, trace};

use super::{
    outcome::{Ply, SearchStats, Solution, Winner},
    table::{Entry, TranspositionTable},
};
use crate::{
    Error, Result,
    app::{SolverConfig, TerminalRule},
    polygon::{GameParams, GapSequence, Move, MoveGenerator, MoveList, Player, StateKey},
    ports::{NullObserver, SearchObserver},
};

/// Window bounds strictly outside the game values -1 and +1.
const LOSS_BOUND: i8 = -2;
const WIN_BOUND: i8 = 2;

/// A position whose moves are being searched
struct Frame {
    state: GapSequence,
    player: Player,
    key: StateKey,
    alpha_orig: i8,
    beta_orig: i8,
    alpha: i8,
    beta: i8,
    best: i8,
    moves: vec::IntoIter<Move>,
}

impl Frame {
    fn new(
        state: GapSequence,
        player: Player,
        key: StateKey,
        alpha: i8,
        beta: i8,
        moves: MoveList,
    ) -> Self {
        let best = if player.is_maximizer() {
            LOSS_BOUND
        } else {
            WIN_BOUND
        };
        Frame {
            state,
            player,
            key,
            alpha_orig: alpha,
            beta_orig: beta,
            alpha,
            beta,
            best,
            moves: moves.into_iter(),
        }
    }

    fn absorb(&mut self, value: i8) {
        if self.player.is_maximizer() {
            self.best = self.best.max(value);
            self.alpha = self.alpha.max(self.best);
        } else {
            self.best = self.best.min(value);
            self.beta = self.beta.min(self.best);
        }
    }

    fn is_cut(&self) -> bool {
        self.beta <= self.alpha
    }
}

enum Step {
    /// Value known without expanding: table hit or terminal position
    Resolved(i8),
    Expand(Frame),
}

/// Game solver for one circle size.
///
/// A solver owns its transposition table and statistics. Solving several
/// start positions with the same solver reuses earlier results; separate
/// solvers share nothing and may run on separate threads.
///
/// # Examples
///
/// ```
/// use polygon_game::{
///     polygon::{GameParams, GapSequence, Player},
///     search::{Solver, Winner},
/// };
///
/// let params = GameParams::new(7, 3)?;
/// let mut solver = Solver::new(params.points());
/// let start = GapSequence::starting(&params);
/// assert_eq!(solver.solve(&start, Player::One)?, Winner::Player2);
/// # Ok::<(), polygon_game::Error>(())
/// ```
#[derive(Debug)]
pub struct Solver {
    config: SolverConfig,
    generator: MoveGenerator,
    table: TranspositionTable,
    stats: SearchStats,
}

impl Solver {
    /// Solver for a circle of `n` points with the default configuration
    pub fn new(n: u32) -> Self {
        Self::build(n, SolverConfig::default())
    }

    /// Solver for a circle of `n` points with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails
    /// [`SolverConfig::validate`].
    pub fn with_config(n: u32, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(n, config))
    }

    fn build(n: u32, config: SolverConfig) -> Self {
        Solver {
            generator: MoveGenerator::with_epsilon(n, config.epsilon),
            config,
            table: TranspositionTable::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of marked points on the circle
    pub fn points(&self) -> u32 {
        self.generator.circle().len() as u32
    }

    /// Counters accumulated since creation or the last [`Solver::reset`]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Forget every solved position and zero the statistics
    pub fn reset(&mut self) {
        self.table.clear();
        self.stats = SearchStats::default();
    }

    pub fn area(&self, state: &GapSequence) -> f64 {
        self.generator.area(state)
    }

    pub fn legal_moves(&self, state: &GapSequence) -> MoveList {
        self.generator.legal_moves(state)
    }

    /// Exact game value of `state` with `player` to move: `+1` if player 1
    /// wins, `-1` if player 2 wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGapSequence`] if the gaps do not cover this
    /// solver's circle, and [`Error::Cancelled`] or
    /// [`Error::NodeLimitExceeded`] if the search is stopped.
    pub fn value(&mut self, state: &GapSequence, player: Player) -> Result<i8> {
        self.value_observed(state, player, &mut NullObserver)
    }

    /// Winner of `state` with `player` to move under optimal play
    pub fn solve(&mut self, state: &GapSequence, player: Player) -> Result<Winner> {
        self.solve_observed(state, player, &mut NullObserver)
    }

    /// Like [`Solver::solve`], reporting every expanded position and every
    /// followed move to `observer`.
    pub fn solve_observed(
        &mut self,
        state: &GapSequence,
        player: Player,
        observer: &mut dyn SearchObserver,
    ) -> Result<Winner> {
        let value = self.value_observed(state, player, observer)?;
        Ok(Winner::from_value(value))
    }

    fn value_observed(
        &mut self,
        state: &GapSequence,
        player: Player,
        observer: &mut dyn SearchObserver,
    ) -> Result<i8> {
        self.check_state(state)?;
        debug!(start = %state, %player, rule = %self.config.terminal_rule, "solving");

        let value = self.search(state.clone(), player, LOSS_BOUND, WIN_BOUND, observer)?;

        debug!(
            value,
            nodes = self.stats.nodes_expanded,
            hits = self.stats.table_hits,
            cutoffs = self.stats.cutoffs,
            table = self.table.len(),
            "solve finished"
        );
        Ok(value)
    }

    /// Solve the standard opening for `params` with player 1 to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `params` describes a different
    /// circle than this solver, and [`Error::DegenerateStart`] if the opening
    /// polygon has no area.
    pub fn solve_game(&mut self, params: &GameParams) -> Result<Solution> {
        if params.points() != self.points() {
            return Err(Error::InvalidParameters {
                n: params.points(),
                k: params.counters(),
                reason: format!("solver is configured for {} points", self.points()),
            });
        }

        let start = GapSequence::starting(params);
        let start_area = self.area(&start);
        if start_area <= self.config.epsilon {
            return Err(Error::DegenerateStart { area: start_area });
        }

        let value = self.value(&start, Player::One)?;
        Ok(Solution {
            points: params.points(),
            counters: params.counters(),
            start,
            start_area,
            terminal_rule: self.config.terminal_rule,
            winner: Winner::from_value(value),
            value,
            stats: self.stats,
            table_entries: self.table.len(),
        })
    }

    /// One line of optimal play from `state` to a terminal position.
    ///
    /// At each position the first move (in descending-area order) that keeps
    /// the position's game value is played. The returned line starts with
    /// `state` and ends with a position that has no legal move.
    pub fn principal_line(&mut self, state: &GapSequence, player: Player) -> Result<Vec<Ply>> {
        let mut line = Vec::new();
        let mut current = state.clone();
        let mut to_move = player;

        loop {
            let value = self.value(&current, to_move)?;
            line.push(Ply {
                state: current.clone(),
                to_move,
                area: self.area(&current),
            });

            let mut next = None;
            for mv in self.legal_moves(&current) {
                if self.value(&mv.state, to_move.opponent())? == value {
                    next = Some(mv.state);
                    break;
                }
            }

            match next {
                Some(state) => {
                    current = state;
                    to_move = to_move.opponent();
                }
                None => break,
            }
        }

        Ok(line)
    }

    fn check_state(&self, state: &GapSequence) -> Result<()> {
        if state.total() != self.points() {
            return Err(Error::InvalidGapSequence {
                gaps: state.gaps().to_vec(),
                reason: format!("gaps sum to {}, expected {}", state.total(), self.points()),
            });
        }
        Ok(())
    }

    fn check_budget(&self) -> Result<()> {
        if self
            .config
            .cancel
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
        {
            return Err(Error::Cancelled);
        }
        let expanded = self.stats.nodes_expanded;
        if let Some(limit) = self.config.node_limit.filter(|&limit| expanded >= limit) {
            return Err(Error::NodeLimitExceeded { limit });
        }
        Ok(())
    }

    fn terminal_value(&self, player: Player) -> i8 {
        match self.config.terminal_rule {
            TerminalRule::StuckPlayerLoses => player.opponent().sign(),
            TerminalRule::StuckPlayerWins => player.sign(),
        }
    }

    fn search(
        &mut self,
        root: GapSequence,
        player: Player,
        alpha: i8,
        beta: i8,
        observer: &mut dyn SearchObserver,
    ) -> Result<i8> {
        let mut stack = match self.enter(root, player, alpha, beta, observer)? {
            Step::Resolved(value) => return Ok(value),
            Step::Expand(frame) => vec![frame],
        };
        self.stats.max_depth = self.stats.max_depth.max(1);
        let mut returned: Option<i8> = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(value) = returned.take() {
                frame.absorb(value);
            }

            let next = if frame.is_cut() {
                if frame.moves.len() > 0 {
                    self.stats.cutoffs += 1;
                }
                None
            } else {
                frame.moves.next()
            };

            match next {
                Some(mv) => {
                    observer.on_edge(&frame.state, &mv.state, frame.player)?;
                    let (child_player, alpha, beta) =
                        (frame.player.opponent(), frame.alpha, frame.beta);
                    match self.enter(mv.state, child_player, alpha, beta, observer)? {
                        Step::Resolved(value) => returned = Some(value),
                        Step::Expand(child) => {
                            stack.push(child);
                            self.stats.max_depth = self.stats.max_depth.max(stack.len());
                        }
                    }
                }
                None => {
                    let Some(done) = stack.pop() else { break };
                    let value = self.finish(done);
                    if stack.is_empty() {
                        return Ok(value);
                    }
                    returned = Some(value);
                }
            }
        }

        unreachable!("search stack drained before the root frame finished")
    }

    fn enter(
        &mut self,
        state: GapSequence,
        player: Player,
        alpha: i8,
        beta: i8,
        observer: &mut dyn SearchObserver,
    ) -> Result<Step> {
        let key = StateKey::new(&state, player);
        if let Some(value) = self.table.probe(&key, alpha, beta) {
            self.stats.table_hits += 1;
            return Ok(Step::Resolved(value));
        }
        // A stored bound that misses this window forces a re-search
        let revisit = self.table.get(&key).is_some();

        self.check_budget()?;
        self.stats.nodes_expanded += 1;

        let moves = self.generator.legal_moves(&state);
        if !revisit {
            observer.on_node(&state, player, moves.is_empty())?;
        }

        if moves.is_empty() {
            self.stats.terminal_nodes += 1;
            let value = self.terminal_value(player);
            trace!(%key, value, "terminal");
            self.table.store(key, Entry::exact(value));
            return Ok(Step::Resolved(value));
        }

        Ok(Step::Expand(Frame::new(state, player, key, alpha, beta, moves)))
    }

    fn finish(&mut self, frame: Frame) -> i8 {
        let entry = Entry::from_search(frame.best, frame.alpha_orig, frame.beta_orig);
        trace!(key = %frame.key, value = entry.value, bound = ?entry.bound, "stored");
        self.table.store(frame.key, entry);
        frame.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CancelToken;

    fn solve_opening(n: u32, k: u32, rule: TerminalRule) -> Winner {
        let params = GameParams::new(n, k).unwrap();
        let config = SolverConfig::default().with_terminal_rule(rule);
        let mut solver = Solver::with_config(n, config).unwrap();
        solver.solve_game(&params).unwrap().winner
    }

    #[test]
    fn small_boards_under_normal_play() {
        let rule = TerminalRule::StuckPlayerLoses;
        assert_eq!(solve_opening(5, 3, rule), Winner::Player1);
        assert_eq!(solve_opening(6, 3, rule), Winner::Player2);
        assert_eq!(solve_opening(7, 3, rule), Winner::Player2);
        assert_eq!(solve_opening(8, 4, rule), Winner::Player1);
        assert_eq!(solve_opening(10, 5, rule), Winner::Player2);
    }

    #[test]
    fn small_boards_when_stuck_player_wins() {
        let rule = TerminalRule::StuckPlayerWins;
        assert_eq!(solve_opening(5, 3, rule), Winner::Player2);
        assert_eq!(solve_opening(7, 3, rule), Winner::Player1);
        assert_eq!(solve_opening(8, 3, rule), Winner::Player2);
        assert_eq!(solve_opening(12, 4, rule), Winner::Player1);
    }

    #[test]
    fn terminal_position_scores_player_to_move() {
        let state = GapSequence::new(vec![3, 3, 3], 9).unwrap();

        let mut normal = Solver::new(9);
        assert_eq!(normal.value(&state, Player::One).unwrap(), -1);
        assert_eq!(normal.value(&state, Player::Two).unwrap(), 1);

        let config = SolverConfig::default().with_terminal_rule(TerminalRule::StuckPlayerWins);
        let mut reversed = Solver::with_config(9, config).unwrap();
        assert_eq!(reversed.value(&state, Player::One).unwrap(), 1);
        assert_eq!(reversed.value(&state, Player::Two).unwrap(), -1);
        assert_eq!(reversed.stats().terminal_nodes, 2);
    }

    #[test]
    fn repeated_solves_hit_the_table() {
        let params = GameParams::new(10, 4).unwrap();
        let start = GapSequence::starting(&params);
        let mut solver = Solver::new(10);

        let first = solver.solve(&start, Player::One).unwrap();
        let expanded = solver.stats().nodes_expanded;
        let second = solver.solve(&start.rotated(1), Player::One).unwrap();

        assert_eq!(first, second);
        assert_eq!(solver.stats().nodes_expanded, expanded);
        assert!(solver.stats().table_hits > 0);
    }

    #[test]
    fn rejects_state_for_another_circle() {
        let mut solver = Solver::new(8);
        let state = GapSequence::new(vec![1, 1, 5], 7).unwrap();
        assert!(matches!(
            solver.solve(&state, Player::One),
            Err(Error::InvalidGapSequence { .. })
        ));

        let params = GameParams::new(9, 3).unwrap();
        assert!(matches!(
            solver.solve_game(&params),
            Err(Error::InvalidParameters { .. })
        ));
    }

    #[test]
    fn cancelled_token_stops_the_search() {
        let token = CancelToken::new();
        token.cancel();
        let config = SolverConfig::default().with_cancel_token(token);
        let mut solver = Solver::with_config(9, config).unwrap();
        let params = GameParams::new(9, 3).unwrap();
        assert!(matches!(solver.solve_game(&params), Err(Error::Cancelled)));
    }

    #[test]
    fn node_limit_stops_the_search() {
        let config = SolverConfig::default().with_node_limit(2);
        let mut solver = Solver::with_config(12, config).unwrap();
        let params = GameParams::new(12, 4).unwrap();
        assert!(matches!(
            solver.solve_game(&params),
            Err(Error::NodeLimitExceeded { limit: 2 })
        ));
    }

    #[test]
    fn principal_line_ends_at_a_terminal_position() {
        let params = GameParams::new(9, 4).unwrap();
        let start = GapSequence::starting(&params);
        let mut solver = Solver::new(9);
        let winner = solver.solve(&start, Player::One).unwrap();
        let line = solver.principal_line(&start, Player::One).unwrap();

        assert_eq!(line[0].state, start);
        assert!(line.windows(2).all(|pair| pair[1].area > pair[0].area));
        assert!(line.windows(2).all(|pair| pair[1].to_move == pair[0].to_move.opponent()));

        let last = line.last().unwrap();
        assert!(solver.legal_moves(&last.state).is_empty());
        // Under normal play the player left without a move is the loser
        assert_eq!(Winner::from(last.to_move.opponent()), winner);
    }

    #[test]
    fn reset_clears_table_and_stats() {
        let mut solver = Solver::new(8);
        let params = GameParams::new(8, 3).unwrap();
        solver.solve_game(&params).unwrap();
        assert!(solver.table_len() > 0);
        solver.reset();
        assert_eq!(solver.table_len(), 0);
        assert_eq!(solver.stats(), SearchStats::default());
    }
}
