//! Directed-graph container used by `opticmap-layout` and the visibility pass.
//!
//! The topology domain is a forest of simple edges, so unlike general graph
//! libraries this container is directed-only, non-compound, and keys edges by
//! `(v, w)` alone. Node and edge iteration follow insertion order, which is
//! what makes the downstream layout deterministic.

pub mod alg;
mod graph;

pub use graph::{EdgeKey, Graph};
