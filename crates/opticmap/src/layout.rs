//! Adapter between diagram entities and the layered layout primitive.

use opticmap_layout::{EdgeLabel, GraphLabel, LayoutGraph, NodeLabel, RankDir, layout};
use serde::{Deserialize, Serialize};

use crate::model::{Edge, Node, Point};

/// Injected layout configuration. A host UI may persist and restore this; the
/// engine itself holds no global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Logical node extent handed to the layout engine. Uniform for all
    /// devices; the renderer draws the real shapes.
    pub node_width: f64,
    pub node_height: f64,
    /// Vertical gap between siblings in a rank.
    pub nodesep: f64,
    /// Horizontal gap between ranks.
    pub ranksep: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 150.0,
            node_height: 40.0,
            nodesep: 40.0,
            ranksep: 120.0,
        }
    }
}

/// Assigns a position to every node from the layered layout.
///
/// Ranks are BFS depth from the roots and grow left to right. The engine
/// reports centers; positions are stored top-left, so the center is corrected
/// by half the node extent. Disconnected components share one coordinate
/// space. Empty input is a no-op.
pub fn apply_layout(nodes: &mut [Node], edges: &[Edge], options: &LayoutOptions) {
    if nodes.is_empty() {
        return;
    }

    let mut g = LayoutGraph::new(GraphLabel {
        rankdir: RankDir::LR,
        nodesep: options.nodesep,
        ranksep: options.ranksep,
        ..Default::default()
    });

    for node in nodes.iter() {
        g.set_node(
            node.id.clone(),
            NodeLabel::sized(options.node_width, options.node_height),
        );
    }
    for edge in edges {
        // GraphModel guarantees both endpoints exist; stay defensive anyway.
        if g.has_node(&edge.source) && g.has_node(&edge.target) {
            g.set_edge(edge.source.clone(), edge.target.clone(), EdgeLabel::default());
        }
    }

    layout(&mut g);

    for node in nodes.iter_mut() {
        let Some(label) = g.node(&node.id) else {
            continue;
        };
        if let (Some(x), Some(y)) = (label.x, label.y) {
            node.position = Point {
                x: x - options.node_width / 2.0,
                y: y - options.node_height / 2.0,
            };
        }
    }
}
