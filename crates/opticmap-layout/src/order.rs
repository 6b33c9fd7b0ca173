//! In-layer ordering: DFS seeding plus barycenter sweeps.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::LayoutGraph;

const SWEEPS: usize = 4;

/// Assigns `order` (the index within a rank) to every node.
pub(crate) fn run(g: &mut LayoutGraph) {
    let mut layers = init_layers(g);

    for sweep in 0..SWEEPS {
        if sweep % 2 == 0 {
            sweep_down(g, &mut layers);
        } else {
            sweep_up(g, &mut layers);
        }
    }

    for layer in &layers {
        for (idx, id) in layer.iter().enumerate() {
            if let Some(n) = g.node_mut(id) {
                n.order = Some(idx);
            }
        }
    }
}

/// Initial layers from a preorder DFS out of each source, so a parent's
/// children start out adjacent. Nodes unreachable from any source (cycles)
/// are appended in insertion order.
fn init_layers(g: &LayoutGraph) -> Vec<Vec<String>> {
    let max_rank = g
        .nodes()
        .filter_map(|id| g.node(id).and_then(|n| n.rank))
        .max()
        .unwrap_or(0);
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];

    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut place = |layers: &mut Vec<Vec<String>>, id: &str| {
        let rank = g.node(id).and_then(|n| n.rank).unwrap_or(0);
        layers[rank].push(id.to_string());
    };

    for source in g.sources() {
        if !visited.insert(source.clone()) {
            continue;
        }
        let mut stack = vec![source];
        while let Some(v) = stack.pop() {
            place(&mut layers, &v);
            // Reverse so the first successor is visited first.
            for w in g.successors(&v).iter().rev() {
                if visited.insert(w.clone()) {
                    stack.push(w.clone());
                }
            }
        }
    }

    for id in g.nodes() {
        if visited.insert(id.to_string()) {
            place(&mut layers, id);
        }
    }

    layers
}

fn positions(layers: &[Vec<String>]) -> FxHashMap<String, usize> {
    let mut pos = FxHashMap::default();
    for layer in layers {
        for (idx, id) in layer.iter().enumerate() {
            pos.insert(id.clone(), idx);
        }
    }
    pos
}

/// Reorders each layer (top to bottom) by the mean position of predecessors.
fn sweep_down(g: &LayoutGraph, layers: &mut [Vec<String>]) {
    for r in 1..layers.len() {
        let pos = positions(layers);
        reorder(&mut layers[r], |id| {
            barycenter(&pos, g.predecessors(id), pos[id])
        });
    }
}

/// Reorders each layer (bottom to top) by the mean position of successors.
fn sweep_up(g: &LayoutGraph, layers: &mut [Vec<String>]) {
    for r in (0..layers.len().saturating_sub(1)).rev() {
        let pos = positions(layers);
        reorder(&mut layers[r], |id| {
            barycenter(&pos, g.successors(id), pos[id])
        });
    }
}

fn barycenter(pos: &FxHashMap<String, usize>, neighbors: &[String], own: usize) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for n in neighbors {
        if let Some(&p) = pos.get(n) {
            sum += p as f64;
            count += 1;
        }
    }
    if count == 0 {
        // Keep nodes without neighbors where they are.
        own as f64
    } else {
        sum / count as f64
    }
}

fn reorder(layer: &mut [String], weight: impl Fn(&str) -> f64) {
    let weights: FxHashMap<String, f64> = layer
        .iter()
        .map(|id| (id.clone(), weight(id)))
        .collect();
    // Stable sort: equal barycenters keep their relative order.
    layer.sort_by(|a, b| {
        weights[a]
            .partial_cmp(&weights[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
