//! Layered graph layout for opticmap diagrams.
//!
//! A deliberately small dagre-style pipeline: rank assignment (BFS depth /
//! longest path), in-layer ordering (barycenter sweeps), and coordinate
//! assignment, followed by a rankdir transform so left-to-right diagrams get
//! ranks on the x axis.
//!
//! Contract: given nodes with fixed `width`/`height` and an edge list, assigns
//! a center `(x, y)` to every node. Output is deterministic for a fixed
//! node/edge insertion order, an empty graph yields no output (and no error),
//! and disconnected components share one coordinate space.

mod model;
mod order;
mod position;
mod rank;

pub use model::{EdgeLabel, GraphLabel, NodeLabel, Point, RankDir};

use opticmap_graph::Graph;

pub type LayoutGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

/// Runs the full pipeline, filling `x`/`y` on every node label.
pub fn layout(g: &mut LayoutGraph) {
    if g.node_count() == 0 {
        return;
    }
    rank::run(g);
    order::run(g);
    position::run(g);
}

/// Layers in rank order, each layer sorted by the nodes' `order` field.
///
/// Falls back to insertion order for nodes without an assigned order.
pub(crate) fn layer_matrix(g: &LayoutGraph) -> Vec<Vec<String>> {
    let max_rank = g
        .nodes()
        .filter_map(|id| g.node(id).and_then(|n| n.rank))
        .max()
        .unwrap_or(0);

    let mut layers: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
    for id in g.nodes() {
        let Some(n) = g.node(id) else {
            continue;
        };
        layers[n.rank.unwrap_or(0)].push(id.to_string());
    }
    for layer in &mut layers {
        layer.sort_by_key(|id| g.node(id).and_then(|n| n.order).unwrap_or(usize::MAX));
    }
    layers
}
