//! In-memory capture of the explored game graph.
//!
//! Positions are merged by canonical key and player to move, so the recorded
//! graph is the quotient graph the search actually works on. Rendering it to
//! a visualization format is left to the caller; the graph serializes with
//! serde.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    polygon::{GapSequence, Player, StateKey},
    ports::SearchObserver,
};

/// A recorded position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: usize,
    /// Canonical member of the position's symmetry class
    pub state: GapSequence,
    pub to_move: Player,
    /// No legal move from here
    pub terminal: bool,
    /// First position the search expanded
    pub start: bool,
}

/// A recorded move between two node ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

/// Directed graph of positions and moves visited during a solve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GameGraph {
    pub fn terminal_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|node| node.terminal)
    }

    pub fn start_node(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.start)
    }

    /// Ids of the nodes reachable in one move from `id`
    pub fn successors(&self, id: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|edge| edge.from == id)
            .map(|edge| edge.to)
            .collect()
    }
}

/// Observer that builds a [`GameGraph`]
#[derive(Debug, Default)]
pub struct GraphRecorder {
    graph: GameGraph,
    index: HashMap<StateKey, usize>,
    seen_edges: HashSet<GraphEdge>,
}

impl GraphRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &GameGraph {
        &self.graph
    }

    pub fn into_graph(self) -> GameGraph {
        self.graph
    }

    fn node_id(&mut self, state: &GapSequence, player: Player) -> usize {
        let key = StateKey::new(state, player);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = self.graph.nodes.len();
        self.graph.nodes.push(GraphNode {
            id,
            state: state.canonical(),
            to_move: player,
            terminal: false,
            start: id == 0,
        });
        self.index.insert(key, id);
        id
    }
}

impl SearchObserver for GraphRecorder {
    fn on_node(&mut self, state: &GapSequence, player: Player, terminal: bool) -> Result<()> {
        let id = self.node_id(state, player);
        self.graph.nodes[id].terminal = terminal;
        Ok(())
    }

    fn on_edge(&mut self, from: &GapSequence, to: &GapSequence, player: Player) -> Result<()> {
        let edge = GraphEdge {
            from: self.node_id(from, player),
            to: self.node_id(to, player.opponent()),
        };
        if self.seen_edges.insert(edge) {
            self.graph.edges.push(edge);
        }
        Ok(())
    }
}
