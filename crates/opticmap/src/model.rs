//! Diagram entities and the snapshot-to-graph normalization step.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::device::{DeviceFields, DeviceKind, DeviceRecord, IconKey};

/// Renderer node variant; every topology node uses the custom renderer.
pub const NODE_VARIANT: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Side of a node an edge attaches to. The diagram flows strictly left to
/// right: sources emit on the right, targets receive on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    pub node_type: DeviceKind,
    pub icon: IconKey,
    /// User-toggled; hides the node's descendant subtree. Transient UI state,
    /// never persisted to the backend.
    pub is_collapsed: bool,
    /// Derived: true iff the node has at least one outgoing edge. Recomputed
    /// on every visibility pass, never stored stale.
    pub is_collapsible: bool,
    pub is_highlighted: bool,
    #[serde(flatten)]
    pub device: DeviceFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Decimal string form of the device id; unique within a snapshot.
    pub id: String,
    #[serde(rename = "type")]
    pub variant: &'static str,
    pub data: NodeData,
    /// Top-left corner in diagram coordinates.
    pub position: Point,
}

impl Node {
    pub fn from_record(record: &DeviceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            variant: NODE_VARIANT,
            data: NodeData {
                label: record.label(),
                node_type: record.node_type,
                icon: record.node_type.icon(),
                is_collapsed: false,
                is_collapsible: false,
                is_highlighted: false,
                device: record.fields.clone(),
            },
            position: Point::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: HandleSide,
    pub target_handle: HandleSide,
    /// Stroke color, from the child device's `cable_color`; the renderer
    /// applies its theme default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Deterministic edge id for a `source → target` pair.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("e-{source}-{target}")
}

impl Edge {
    pub fn between(
        source: impl Into<String>,
        target: impl Into<String>,
        color: Option<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(&source, &target),
            source,
            target,
            source_handle: HandleSide::Right,
            target_handle: HandleSide::Left,
            color,
        }
    }
}

/// Normalizes a flat device snapshot into diagram nodes and edges.
///
/// Infallible by design: records without a usable id are skipped, duplicate
/// ids keep the first occurrence, and a `parent_id` that resolves to no record
/// in the snapshot demotes the child to a root/orphan instead of emitting a
/// dangling edge. The resulting edge set never references an absent node.
pub fn build_graph(records: &[DeviceRecord]) -> (Vec<Node>, Vec<Edge>) {
    let ids: FxHashSet<u64> = records.iter().map(|r| r.id).filter(|&id| id != 0).collect();

    let mut seen: FxHashSet<u64> = FxHashSet::default();
    let mut nodes = Vec::with_capacity(records.len());
    let mut edges = Vec::new();

    for record in records {
        if record.id == 0 {
            tracing::debug!("skipping device record without id");
            continue;
        }
        if !seen.insert(record.id) {
            tracing::debug!(id = record.id, "skipping duplicate device record");
            continue;
        }

        nodes.push(Node::from_record(record));

        if let Some(parent) = record.parent() {
            if parent != record.id && ids.contains(&parent) {
                edges.push(Edge::between(
                    parent.to_string(),
                    record.id.to_string(),
                    record.fields.cable_color.clone(),
                ));
            }
        }
    }

    (nodes, edges)
}
