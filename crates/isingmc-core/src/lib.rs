#![deny(missing_docs)]

//! Core error, identifier and randomness types for the isingmc engine.
//!
//! Every other crate in the workspace reports failures through
//! [`IsingError`] and draws randomness through an injected `rand::Rng`,
//! typically an [`RngHandle`].

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, IsingError};
pub use rng::{derive_substream_seed, fair_coin, uniform_index, uniform_unit, RngHandle};

/// Identifier for a vertex within a graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates a new identifier from its position in the vertex arena.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the vertex in the arena.
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Identifier for an edge within a graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Creates a new identifier from its position in the edge arena.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the edge in the arena.
    pub const fn index(&self) -> usize {
        self.0
    }
}
