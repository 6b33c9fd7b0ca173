//! Small traversal helpers shared by layout and visibility passes.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::Graph;

/// Forward BFS from `start`, returning reached node ids in visit order.
///
/// `start` itself is not included. A visited set guards against cycles and
/// duplicate edges, so the traversal terminates on any input.
pub fn reachable_from<N, E, G>(g: &Graph<N, E, G>, start: &str) -> Vec<String> {
    let mut visited: FxHashSet<String> = FxHashSet::default();
    visited.insert(start.to_string());

    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(start.to_string());

    let mut out = Vec::new();
    while let Some(v) = queue.pop_front() {
        for w in g.successors(&v) {
            if visited.insert(w.clone()) {
                out.push(w.clone());
                queue.push_back(w.clone());
            }
        }
    }
    out
}

/// Deterministic Kahn topological order, in node/edge insertion order.
///
/// Returns `None` when the graph has a cycle (self-loops are ignored and do
/// not count as cycles).
pub fn topo_order<N, E, G>(g: &Graph<N, E, G>) -> Option<Vec<String>> {
    let mut indegree: Vec<(String, usize)> = g
        .nodes()
        .map(|id| {
            let d = g
                .predecessors(id)
                .iter()
                .filter(|p| p.as_str() != id)
                .count();
            (id.to_string(), d)
        })
        .collect();

    let mut queue: VecDeque<String> = indegree
        .iter()
        .filter(|(_, d)| *d == 0)
        .map(|(id, _)| id.clone())
        .collect();

    let mut order = Vec::with_capacity(g.node_count());
    while let Some(v) = queue.pop_front() {
        order.push(v.clone());
        for w in g.successors(&v) {
            if w.as_str() == v.as_str() {
                continue;
            }
            if let Some(entry) = indegree.iter_mut().find(|(id, _)| id == w) {
                entry.1 = entry.1.saturating_sub(1);
                if entry.1 == 0 {
                    queue.push_back(w.clone());
                }
            }
        }
    }

    (order.len() == g.node_count()).then_some(order)
}
