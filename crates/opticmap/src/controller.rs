//! Diagram state owner: wires model → layout → packer on load and
//! model → visibility on every change, and exposes the mutation surface the
//! UI layer drives.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::device::{DeviceRecord, LayoutRole};
use crate::error::{Error, Result};
use crate::layout::{LayoutOptions, apply_layout};
use crate::model::{Edge, Node, Point, build_graph, edge_id};
use crate::packer::{PackOptions, pack_fanouts};
use crate::visibility;

/// Visible payload handed to the renderer after every mutation.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramView {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Owns the node/edge state of one diagram (one OLT view).
///
/// Single-threaded by design: one logical owner, synchronous recomputation,
/// no caching. Mutations that reference ids are the only fallible surface;
/// the transforms themselves never fail.
#[derive(Debug, Clone, Default)]
pub struct DiagramController {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: IndexMap<String, usize>,
    layout: LayoutOptions,
    pack: PackOptions,
}

impl DiagramController {
    pub fn new(layout: LayoutOptions, pack: PackOptions) -> Self {
        Self {
            layout,
            pack,
            ..Default::default()
        }
    }

    /// Rebuilds the whole diagram from a backend snapshot: normalize, lay
    /// out, pack. Collapse flags reset with the state.
    pub fn load(&mut self, records: &[DeviceRecord]) {
        let (mut nodes, edges) = build_graph(records);
        apply_layout(&mut nodes, &edges, &self.layout);
        pack_fanouts(&mut nodes, &edges, &self.pack);
        tracing::debug!(
            records = records.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            "loaded topology snapshot"
        );
        self.nodes = nodes;
        self.edges = edges;
        self.reindex();
    }

    /// [`Self::load`] from raw snapshot JSON. The only fallible load path.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let records = crate::device::parse_snapshot(json)?;
        self.load(&records);
        Ok(())
    }

    /// Full (unfiltered) node set, in diagram order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Full (unfiltered) edge set, in diagram order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// The visible subset under current collapse flags, with derived flags
    /// refreshed. Recomputed synchronously on every call.
    pub fn view(&self) -> DiagramView {
        let resolved = visibility::resolve(&self.nodes, &self.edges);
        DiagramView {
            nodes: resolved.nodes,
            edges: resolved.edges,
        }
    }

    /// Appends one node at an explicit canvas position. No edge is created;
    /// new devices start unattached (orphans) until connected.
    pub fn add_node(&mut self, record: &DeviceRecord, position: Point) -> Result<String> {
        if record.id == 0 {
            return Err(Error::MissingId);
        }
        let id = record.id.to_string();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }

        let mut node = Node::from_record(record);
        node.position = position;
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Splits an edge with a new device: the edge is removed, the device is
    /// placed at the midpoint of the former endpoints, and two replacement
    /// edges preserve the flow direction.
    pub fn insert_node_on_edge(&mut self, edge_id: &str, record: &DeviceRecord) -> Result<String> {
        let edge_idx = self.edge_index(edge_id)?;
        if record.id == 0 {
            return Err(Error::MissingId);
        }
        let new_id = record.id.to_string();
        if self.index.contains_key(&new_id) {
            return Err(Error::DuplicateNode { id: new_id });
        }

        let old = self.edges.remove(edge_idx);
        let source_pos = self
            .node(&old.source)
            .map(|n| n.position)
            .unwrap_or_default();
        let target_pos = self
            .node(&old.target)
            .map(|n| n.position)
            .unwrap_or_default();

        let mut node = Node::from_record(record);
        node.position = Point {
            x: (source_pos.x + target_pos.x) / 2.0,
            y: (source_pos.y + target_pos.y) / 2.0,
        };

        // Each replacement edge is colored by its child device's cable color
        // (the same rule GraphModel applies), falling back to the old edge.
        let upstream_color = record
            .fields
            .cable_color
            .clone()
            .or_else(|| old.color.clone());
        let downstream_color = self
            .node(&old.target)
            .and_then(|n| n.data.device.cable_color.clone())
            .or_else(|| old.color.clone());

        self.edges
            .insert(edge_idx, Edge::between(old.source, new_id.clone(), upstream_color));
        self.edges.insert(
            edge_idx + 1,
            Edge::between(new_id.clone(), old.target, downstream_color),
        );
        self.index.insert(new_id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(new_id)
    }

    /// Removes a node and every edge where it is source or target.
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        let idx = self.node_index(id)?;
        self.nodes.remove(idx);
        self.edges.retain(|e| e.source != id && e.target != id);
        self.reindex();
        Ok(())
    }

    /// Removes exactly one edge; its endpoint nodes stay.
    pub fn delete_edge(&mut self, id: &str) -> Result<()> {
        let idx = self.edge_index(id)?;
        self.edges.remove(idx);
        Ok(())
    }

    /// Flips a node's collapse flag; returns the new state.
    pub fn toggle_collapse(&mut self, id: &str) -> Result<bool> {
        let idx = self.node_index(id)?;
        let node = &mut self.nodes[idx];
        node.data.is_collapsed = !node.data.is_collapsed;
        Ok(node.data.is_collapsed)
    }

    /// Creates a `source → target` edge with the fixed right → left handle
    /// convention. The caller (UI layer) owns the at-most-one-parent rule;
    /// this only rejects self-connections, unknown ids, and exact duplicates.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String> {
        if source == target {
            return Err(Error::SelfConnection {
                id: source.to_string(),
            });
        }
        self.node_index(source)?;
        self.node_index(target)?;
        let id = edge_id(source, target);
        if self.edges.iter().any(|e| e.id == id) {
            return Err(Error::DuplicateEdge { id });
        }

        let color = self
            .node(target)
            .and_then(|n| n.data.device.cable_color.clone());
        self.edges.push(Edge::between(source, target, color));
        Ok(id)
    }

    /// Re-runs layout and packing over the current topology, e.g. after a
    /// burst of mutations left manual positions inconsistent.
    pub fn relayout(&mut self) {
        apply_layout(&mut self.nodes, &self.edges, &self.layout);
        pack_fanouts(&mut self.nodes, &self.edges, &self.pack);
    }

    /// Nodes with no incoming edge that are not the diagram root: candidates
    /// for the unattached-device inventory.
    pub fn orphans(&self) -> Vec<String> {
        let targeted: FxHashSet<&str> =
            self.edges.iter().map(|e| e.target.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| {
                n.data.node_type.role() != LayoutRole::Root && !targeted.contains(n.id.as_str())
            })
            .map(|n| n.id.clone())
            .collect()
    }

    /// Highlights the forward path from `source` to `target`, clearing any
    /// previous highlight. Returns whether a path exists.
    pub fn highlight_path(&mut self, source: &str, target: &str) -> Result<bool> {
        self.node_index(source)?;
        self.node_index(target)?;

        let mut parent: IndexMap<String, String> = IndexMap::new();
        let mut queue = std::collections::VecDeque::from([source.to_string()]);
        let mut found = source == target;

        'bfs: while let Some(v) = queue.pop_front() {
            for e in self.edges.iter().filter(|e| e.source == v) {
                if parent.contains_key(&e.target) || e.target == source {
                    continue;
                }
                parent.insert(e.target.clone(), v.clone());
                if e.target == target {
                    found = true;
                    break 'bfs;
                }
                queue.push_back(e.target.clone());
            }
        }

        let mut on_path: FxHashSet<String> = FxHashSet::default();
        if found {
            on_path.insert(source.to_string());
            let mut cur = target.to_string();
            while cur != source {
                on_path.insert(cur.clone());
                match parent.get(&cur) {
                    Some(p) => cur = p.clone(),
                    None => break,
                }
            }
        }
        for node in &mut self.nodes {
            node.data.is_highlighted = on_path.contains(&node.id);
        }
        Ok(found)
    }

    pub fn clear_highlights(&mut self) {
        for node in &mut self.nodes {
            node.data.is_highlighted = false;
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }

    fn node_index(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode { id: id.to_string() })
    }

    fn edge_index(&self, id: &str) -> Result<usize> {
        self.edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::UnknownEdge { id: id.to_string() })
    }
}
