#![forbid(unsafe_code)]

//! Headless topology-diagram engine for optical access networks.
//!
//! Turns a flat parent-pointer device snapshot (OLTs, PON ports, splitters,
//! ONUs, ...) into a positioned, collapse-aware diagram:
//!
//! - [`model::build_graph`] normalizes device records into nodes and edges;
//! - [`layout::apply_layout`] assigns coordinates via the layered layout in
//!   `opticmap-layout`;
//! - [`packer::pack_fanouts`] re-flows leaf fan-outs under branch nodes into
//!   row-major grids;
//! - [`visibility::resolve`] computes the visible subset under collapse flags;
//! - [`DiagramController`] owns the state and exposes the mutation surface a
//!   UI layer drives.
//!
//! Everything is synchronous and deterministic: the same snapshot and the same
//! collapse flags always produce the same payload. Networking, rendering, and
//! form plumbing live in the host application, not here.

pub mod controller;
pub mod device;
pub mod error;
pub mod layout;
pub mod model;
pub mod packer;
pub mod visibility;

pub use controller::{DiagramController, DiagramView};
pub use device::{DeviceFields, DeviceKind, DeviceRecord, IconKey, LayoutRole, parse_snapshot};
pub use error::{Error, Result};
pub use layout::LayoutOptions;
pub use model::{Edge, HandleSide, Node, NodeData, Point, build_graph, edge_id};
pub use packer::PackOptions;
pub use visibility::ResolvedView;
