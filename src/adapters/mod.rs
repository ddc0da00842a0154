//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports module.
//! Adapters depend on the ports, never the other way around.

pub mod graph_recorder;
pub mod tracing_observer;

pub use graph_recorder::{GameGraph, GraphEdge, GraphNode, GraphRecorder};
pub use tracing_observer::TracingObserver;
