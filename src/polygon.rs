//! Polygon area game: state, geometry, symmetry, and move rules

pub mod gaps;
pub mod geometry;
pub mod moves;
pub mod symmetry;

pub use gaps::{GameParams, GapSequence, Player};
pub use geometry::{CircleTable, DEFAULT_EPSILON, Point, polygon_area};
pub use moves::{Move, MoveGenerator, MoveList, legal_moves};
pub use symmetry::{CanonicalKey, StateKey, canonical_key, minimal_rotation_index};
