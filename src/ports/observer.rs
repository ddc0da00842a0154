//! Observer port - traversal hooks for the search engine
//!
//! Tracing, graph capture, and statistics are kept out of the search loop by
//! routing them through this trait.

use crate::{
    Result,
    polygon::{GapSequence, Player},
};

/// Observer trait for monitoring a solve
///
/// # Event Sequence
///
/// 1. `on_node(state, player, terminal)` - once per distinct position and
///    player to move, the first time the engine expands it. Symmetric
///    positions count as one. A later re-search of the same position, when
///    its stored entry is only a bound that does not settle the current
///    window, is not reported again.
/// 2. `on_edge(from, to, player)` - once for every move the engine follows,
///    before the child position is looked up or expanded. `player` is the
///    player making the move.
///
/// A failing hook aborts the solve and its error is returned to the caller.
///
/// # Examples
///
/// ```
/// use polygon_game::{
///     polygon::{GapSequence, Player},
///     ports::SearchObserver,
/// };
///
/// struct LeafCounter {
///     leaves: usize,
/// }
///
/// impl SearchObserver for LeafCounter {
///     fn on_node(
///         &mut self,
///         _state: &GapSequence,
///         _player: Player,
///         terminal: bool,
///     ) -> polygon_game::Result<()> {
///         if terminal {
///             self.leaves += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait SearchObserver {
    /// Called when a position is expanded.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_node(&mut self, _state: &GapSequence, _player: Player, _terminal: bool) -> Result<()> {
        Ok(())
    }

    /// Called when the engine follows a move from `from` to `to`.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_edge(&mut self, _from: &GapSequence, _to: &GapSequence, _player: Player) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}
