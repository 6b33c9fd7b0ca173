//! Device records as delivered by the backend, and the closed kind/role/icon
//! vocabulary derived from them.
//!
//! The snapshot format is a flat parent-pointer list; everything tree-shaped
//! is derived later by [`crate::model::build_graph`]. Parsing is lenient by
//! policy: a malformed record is dropped (with a debug log), never fatal, so
//! partial data still renders partially.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Device type as reported by the backend.
///
/// The wire value is a free-form string; anything outside the known vocabulary
/// maps to [`DeviceKind::Other`] so new backend types degrade gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceKind {
    Olt,
    Onu,
    Pon,
    Splitter,
    Router,
    MSwitch,
    USwitch,
    Ap,
    Bamboo,
    Tj,
    #[default]
    Other,
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Olt => "OLT",
            DeviceKind::Onu => "ONU",
            DeviceKind::Pon => "PON",
            DeviceKind::Splitter => "Splitter",
            DeviceKind::Router => "Router",
            DeviceKind::MSwitch => "mSwitch",
            DeviceKind::USwitch => "uSwitch",
            DeviceKind::Ap => "AP",
            DeviceKind::Bamboo => "Bamboo",
            DeviceKind::Tj => "TJ",
            DeviceKind::Other => "Other",
        }
    }

    /// Role this device plays in layout and packing. Total by construction.
    pub fn role(self) -> LayoutRole {
        match self {
            DeviceKind::Olt => LayoutRole::Root,
            DeviceKind::Pon => LayoutRole::Branch,
            DeviceKind::Onu | DeviceKind::Ap => LayoutRole::Leaf,
            DeviceKind::Splitter
            | DeviceKind::Router
            | DeviceKind::MSwitch
            | DeviceKind::USwitch
            | DeviceKind::Bamboo
            | DeviceKind::Tj
            | DeviceKind::Other => LayoutRole::Other,
        }
    }

    /// Icon key the renderer selects assets by. Unknown kinds get the default.
    pub fn icon(self) -> IconKey {
        match self {
            DeviceKind::Olt => IconKey::Olt,
            DeviceKind::Onu => IconKey::Onu,
            DeviceKind::Pon => IconKey::Pon,
            DeviceKind::Splitter => IconKey::Splitter,
            DeviceKind::Router => IconKey::Router,
            DeviceKind::MSwitch | DeviceKind::USwitch => IconKey::Switch,
            DeviceKind::Ap => IconKey::Ap,
            DeviceKind::Bamboo => IconKey::Bamboo,
            DeviceKind::Tj => IconKey::Tj,
            DeviceKind::Other => IconKey::Node,
        }
    }
}

impl From<String> for DeviceKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "olt" => DeviceKind::Olt,
            "onu" => DeviceKind::Onu,
            "pon" => DeviceKind::Pon,
            "splitter" => DeviceKind::Splitter,
            "router" => DeviceKind::Router,
            "mswitch" => DeviceKind::MSwitch,
            "uswitch" => DeviceKind::USwitch,
            "ap" => DeviceKind::Ap,
            "bamboo" => DeviceKind::Bamboo,
            "tj" => DeviceKind::Tj,
            _ => DeviceKind::Other,
        }
    }
}

impl From<DeviceKind> for String {
    fn from(value: DeviceKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout role of a device kind: drives root detection and fan-out packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutRole {
    /// The topological origin of the diagram (the OLT).
    Root,
    /// Pass-through fan-out point directly under the root (a PON port).
    Branch,
    /// Terminal device with no packing-relevant children.
    Leaf,
    Other,
}

/// Closed icon vocabulary shipped with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    Olt,
    Onu,
    Pon,
    Splitter,
    Router,
    Switch,
    Ap,
    Bamboo,
    Tj,
    /// Default icon for unclassified devices.
    Node,
}

/// Type-specific attributes carried verbatim from the backend onto nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceFields {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub mac: Option<String>,
    pub ip: Option<String>,
    pub split_ratio: Option<String>,
    pub split_group: Option<String>,
    pub cable_color: Option<String>,
    pub cable_core: Option<String>,
    pub cable_length: Option<String>,
    pub lat1: Option<f64>,
    pub long1: Option<f64>,
    pub remarks: Option<String>,
    pub vlan: Option<u32>,
}

/// One flat device record from the backend snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Stable backend id; `0` means the record is unusable and gets skipped.
    #[serde(default)]
    pub id: u64,
    /// `None` or `Some(0)` mean "no parent": the device is a root or orphan.
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub node_type: DeviceKind,
    #[serde(flatten)]
    pub fields: DeviceFields,
}

impl DeviceRecord {
    /// Display label: `name`, else `mac`, else `Node <id>`.
    pub fn label(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return name.to_string();
        }
        if let Some(mac) = self
            .fields
            .mac
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return mac.to_string();
        }
        format!("Node {}", self.id)
    }

    /// The resolved parent id, with `0` normalized to `None`.
    pub fn parent(&self) -> Option<u64> {
        self.parent_id.filter(|&p| p != 0)
    }
}

/// Parses a backend snapshot (a JSON array of device records).
///
/// Only a non-array payload is an error; individual malformed records are
/// dropped so the rest of the diagram still loads.
pub fn parse_snapshot(json: &str) -> Result<Vec<DeviceRecord>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| Error::Snapshot {
            message: e.to_string(),
        })?;

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<DeviceRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => tracing::debug!(error = %e, "skipping malformed device record"),
        }
    }
    Ok(records)
}
