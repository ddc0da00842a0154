//! Observer that reports the traversal through `tracing`.

use tracing::{debug, trace};

use crate::{
    Result,
    polygon::{GapSequence, Player},
    ports::SearchObserver,
};

/// Emits one `debug` event per expanded position and one `trace` event per
/// followed move, and counts both.
#[derive(Debug, Default)]
pub struct TracingObserver {
    nodes: usize,
    edges: usize,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn edges(&self) -> usize {
        self.edges
    }
}

impl SearchObserver for TracingObserver {
    fn on_node(&mut self, state: &GapSequence, player: Player, terminal: bool) -> Result<()> {
        self.nodes += 1;
        debug!(%state, %player, terminal, node = self.nodes, "expand");
        Ok(())
    }

    fn on_edge(&mut self, from: &GapSequence, to: &GapSequence, player: Player) -> Result<()> {
        self.edges += 1;
        trace!(%from, %to, %player, "move");
        Ok(())
    }
}
