#![deny(missing_docs)]

//! Generic undirected graph used to describe interaction topologies.
//!
//! Vertices and edges live in arenas and are addressed by
//! [`VertexId`](isingmc_core::VertexId) / [`EdgeId`](isingmc_core::EdgeId).
//! Specialized models attach their own payloads through the type parameters
//! and customize edge creation by passing a factory to
//! [`Graph::add_edge_with`].

mod graph;

pub use graph::{EdgeInsert, EdgeRef, Graph};
