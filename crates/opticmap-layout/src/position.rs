//! Coordinate assignment from the ordered layer matrix.

use crate::{LayoutGraph, RankDir, layer_matrix};

/// Assigns center `(x, y)` per node.
///
/// Works in TB coordinates (ranks stack downward, each rank centered against
/// the widest one), then swaps axes for LR so ranks grow rightward.
pub(crate) fn run(g: &mut LayoutGraph) {
    let layers = layer_matrix(g);
    let label = g.graph().clone();

    let size = |g: &LayoutGraph, id: &str| -> (f64, f64) {
        g.node(id).map(|n| (n.width, n.height)).unwrap_or((0.0, 0.0))
    };

    let mut rank_widths: Vec<f64> = Vec::with_capacity(layers.len());
    let mut rank_heights: Vec<f64> = Vec::with_capacity(layers.len());
    for layer in &layers {
        let mut w = 0.0;
        let mut h: f64 = 0.0;
        for (i, id) in layer.iter().enumerate() {
            let (nw, nh) = size(g, id);
            w += nw;
            if i + 1 < layer.len() {
                w += label.nodesep;
            }
            h = h.max(nh);
        }
        rank_widths.push(w);
        rank_heights.push(h);
    }
    let max_rank_width = rank_widths.iter().copied().fold(0.0_f64, f64::max);

    let mut y_cursor = 0.0;
    for (r, layer) in layers.iter().enumerate() {
        let y = y_cursor + rank_heights[r] / 2.0;
        let mut x_cursor = (max_rank_width - rank_widths[r]) / 2.0;
        for id in layer {
            let (nw, _) = size(g, id);
            let x = x_cursor + nw / 2.0;
            if let Some(n) = g.node_mut(id) {
                n.x = Some(x);
                n.y = Some(y);
            }
            x_cursor += nw + label.nodesep;
        }
        y_cursor += rank_heights[r];
        if r + 1 < layers.len() {
            y_cursor += label.ranksep;
        }
    }

    if label.rankdir == RankDir::LR {
        for id in g.node_ids() {
            if let Some(n) = g.node_mut(&id) {
                let (Some(x), Some(y)) = (n.x, n.y) else {
                    continue;
                };
                n.x = Some(y);
                n.y = Some(x);
            }
        }
    }

    if label.marginx != 0.0 || label.marginy != 0.0 {
        for id in g.node_ids() {
            if let Some(n) = g.node_mut(&id) {
                if let Some(x) = n.x {
                    n.x = Some(x + label.marginx);
                }
                if let Some(y) = n.y {
                    n.y = Some(y + label.marginy);
                }
            }
        }
    }
}
