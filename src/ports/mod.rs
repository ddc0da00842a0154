//! Ports (trait boundaries) for external collaborators.
//!
//! The search engine owns these traits; adapters such as graph recorders or
//! loggers implement them without the engine knowing about their output.

pub mod observer;

pub use observer::{NullObserver, SearchObserver};
