//! Rank assignment: BFS depth from the sources, tightened to longest path.

use opticmap_graph::alg;

use crate::LayoutGraph;

/// Assigns `rank` to every node.
///
/// Ranks follow the longest path from any source, honoring per-edge `minlen`.
/// On a cyclic input (which a well-formed topology never produces, but a
/// transient bad connect can) the pass degrades to insertion order instead of
/// looping: edges that point "backward" in that order simply stop constraining
/// ranks.
pub(crate) fn run(g: &mut LayoutGraph) {
    let topo = alg::topo_order(g).unwrap_or_else(|| g.node_ids());

    for id in g.node_ids() {
        if let Some(n) = g.node_mut(&id) {
            n.rank = Some(0);
        }
    }

    for v in &topo {
        let r = g.node(v).and_then(|n| n.rank).unwrap_or(0);
        for ek in g.out_edges(v) {
            if ek.w == ek.v {
                continue;
            }
            let minlen = g.edge_by_key(&ek).map(|e| e.minlen).unwrap_or(1).max(1);
            let next = r + minlen;
            if let Some(w) = g.node_mut(&ek.w) {
                if w.rank.unwrap_or(0) < next {
                    w.rank = Some(next);
                }
            }
        }
    }
}
