//! Collapse-aware visibility: which nodes and edges actually render.

use opticmap_graph::Graph;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::model::{Edge, Node};

/// Result of a visibility pass. `nodes`/`edges` are the visible subsets with
/// refreshed derived flags; the hidden sets make the coverage invariant
/// (`visible ∪ hidden = all`) checkable by callers and tests.
#[derive(Debug, Clone)]
pub struct ResolvedView {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub hidden_nodes: FxHashSet<String>,
    pub hidden_edges: FxHashSet<String>,
}

/// Computes the visible subset under the nodes' collapse flags.
///
/// Pure: takes the full sets, returns new ones. For every collapsed node a
/// forward BFS (source → target) collects all reachable descendants into the
/// hidden-node set and every traversed edge into the hidden-edge set; the
/// collapsed node itself stays visible. Unions across independently collapsed
/// nodes are plain set unions. The visited set makes traversal terminate on
/// duplicate or self-referential edges, so a transient cycle cannot hang the
/// pass.
///
/// `is_collapsible` is recomputed here (≥1 outgoing edge) before anything is
/// hidden, so the flag is never stale relative to the current edge list.
pub fn resolve(nodes: &[Node], edges: &[Edge]) -> ResolvedView {
    let has_outgoing: FxHashSet<&str> = edges.iter().map(|e| e.source.as_str()).collect();

    let nodes: Vec<Node> = nodes
        .iter()
        .map(|n| {
            let mut n = n.clone();
            n.data.is_collapsible = has_outgoing.contains(n.id.as_str());
            n
        })
        .collect();

    // Adjacency with the edge ids carried on the labels, so the traversal can
    // report hidden edges as well as hidden nodes.
    let mut g: Graph<(), Vec<String>, ()> = Graph::new(());
    for node in &nodes {
        g.set_node(node.id.clone(), ());
    }
    for edge in edges {
        if !g.has_node(&edge.source) || !g.has_node(&edge.target) {
            continue;
        }
        if let Some(ids) = g.edge_mut(&edge.source, &edge.target) {
            ids.push(edge.id.clone());
        } else {
            g.set_edge(edge.source.clone(), edge.target.clone(), vec![edge.id.clone()]);
        }
    }

    let mut hidden_nodes: FxHashSet<String> = FxHashSet::default();
    let mut hidden_edges: FxHashSet<String> = FxHashSet::default();

    for node in &nodes {
        if !node.data.is_collapsed {
            continue;
        }
        let mut visited: FxHashSet<String> = FxHashSet::default();
        visited.insert(node.id.clone());

        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(node.id.clone());

        while let Some(v) = queue.pop_front() {
            for key in g.out_edges(&v) {
                if let Some(ids) = g.edge_by_key(&key) {
                    hidden_edges.extend(ids.iter().cloned());
                }
                if visited.insert(key.w.clone()) {
                    hidden_nodes.insert(key.w.clone());
                    queue.push_back(key.w);
                }
            }
        }
    }

    let visible_nodes: Vec<Node> = nodes
        .into_iter()
        .filter(|n| !hidden_nodes.contains(&n.id))
        .collect();

    // Reachability already implies both checks below; keep them explicit so
    // the no-dangling-edges invariant holds even if it ever stops being true.
    let visible_edges: Vec<Edge> = edges
        .iter()
        .filter(|e| {
            !hidden_edges.contains(&e.id)
                && !hidden_nodes.contains(&e.source)
                && !hidden_nodes.contains(&e.target)
        })
        .cloned()
        .collect();

    ResolvedView {
        nodes: visible_nodes,
        edges: visible_edges,
        hidden_nodes,
        hidden_edges,
    }
}
