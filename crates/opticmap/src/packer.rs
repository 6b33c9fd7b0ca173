//! Fan-out packing: overrides the generic layered layout for broadcast
//! parents.
//!
//! A root device (the OLT) fans out into branch nodes (PON ports), each of
//! which can carry dozens of leaf devices. The generic layout stacks those
//! leaves into one tall column per branch; this pass re-flows each leaf group
//! into a row-major grid, stacks the branch blocks with fixed padding, and
//! recenters the branch and root y positions against what it packed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::device::LayoutRole;
use crate::model::{Edge, Node};

/// Injected packing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackOptions {
    /// Grid columns per row.
    pub nodes_per_row: usize,
    /// Horizontal grid pitch; the first column sits one pitch right of the
    /// branch node.
    pub grid_x_spacing: f64,
    /// Vertical grid pitch.
    pub grid_y_spacing: f64,
    /// Gap between consecutive branch blocks.
    pub padding_between_grids: f64,
    /// Logical node height, shared with the layout options.
    pub node_height: f64,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            nodes_per_row: 8,
            grid_x_spacing: 200.0,
            grid_y_spacing: 80.0,
            padding_between_grids: 60.0,
            node_height: 40.0,
        }
    }
}

/// Packs leaf fan-outs under the root's branch nodes into row-major grids.
///
/// Pure coordinate pass over `(nodes, edges)`:
/// - only explicitly repositioned nodes move: leaves get grid positions,
///   branches get a recentered y, the root gets a recentered y;
/// - x of branch and root nodes is never touched;
/// - nodes outside the root's subtree are never touched;
/// - idempotent: re-running on its own output with unchanged topology yields
///   identical positions (branch blocks stack from a fixed origin);
/// - no root, or no branch children under it: complete no-op.
pub fn pack_fanouts(nodes: &mut [Node], edges: &[Edge], options: &PackOptions) {
    let Some(root_idx) = nodes
        .iter()
        .position(|n| n.data.node_type.role() == LayoutRole::Root)
    else {
        return;
    };
    let root_id = nodes[root_idx].id.clone();

    let index: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    // Children per parent, in edge insertion order. Leaf groups keep that
    // order inside the grid; no re-sort within a group.
    let mut children: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for edge in edges {
        if let Some(&child) = index.get(edge.target.as_str()) {
            children.entry(edge.source.as_str()).or_default().push(child);
        }
    }

    let mut branches: Vec<usize> = children
        .get(root_id.as_str())
        .map(|c| {
            c.iter()
                .copied()
                .filter(|&i| nodes[i].data.node_type.role() == LayoutRole::Branch)
                .collect()
        })
        .unwrap_or_default();
    if branches.is_empty() {
        return;
    }

    // Process top to bottom; numeric id breaks exact y ties deterministically.
    branches.sort_by(|&a, &b| {
        nodes[a]
            .position
            .y
            .partial_cmp(&nodes[b].position.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| numeric_id(&nodes[a].id).cmp(&numeric_id(&nodes[b].id)))
    });

    let per_row = options.nodes_per_row.max(1);
    let mut y_cursor = 0.0;

    for &branch in &branches {
        let leaves: Vec<usize> = children
            .get(nodes[branch].id.as_str())
            .map(|c| {
                c.iter()
                    .copied()
                    .filter(|&i| nodes[i].data.node_type.role() == LayoutRole::Leaf)
                    .collect()
            })
            .unwrap_or_default();

        if leaves.is_empty() {
            nodes[branch].position.y = y_cursor;
            y_cursor += options.node_height + options.padding_between_grids;
            continue;
        }

        let branch_x = nodes[branch].position.x;
        for (i, &leaf) in leaves.iter().enumerate() {
            let row = i / per_row;
            let col = i % per_row;
            nodes[leaf].position.x = branch_x + options.grid_x_spacing * (col as f64 + 1.0);
            nodes[leaf].position.y = y_cursor + options.grid_y_spacing * row as f64;
        }

        let rows = leaves.len().div_ceil(per_row);
        let block_height = (rows - 1) as f64 * options.grid_y_spacing + options.node_height;
        nodes[branch].position.y = y_cursor + (block_height - options.node_height) / 2.0;
        y_cursor += block_height + options.padding_between_grids;
    }

    let min_y = branches
        .iter()
        .map(|&b| nodes[b].position.y)
        .fold(f64::INFINITY, f64::min);
    let max_y = branches
        .iter()
        .map(|&b| nodes[b].position.y)
        .fold(f64::NEG_INFINITY, f64::max);
    nodes[root_idx].position.y = (min_y + max_y) / 2.0;
}

/// Ids are decimal device ids; compare numerically, oversized ones last.
fn numeric_id(id: &str) -> u64 {
    id.parse().unwrap_or(u64::MAX)
}
