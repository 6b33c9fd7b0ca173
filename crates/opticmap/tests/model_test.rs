use opticmap::device::{DeviceKind, DeviceRecord, IconKey, parse_snapshot};
use opticmap::model::{HandleSide, build_graph};

fn record(id: u64, parent: Option<u64>, kind: DeviceKind) -> DeviceRecord {
    DeviceRecord {
        id,
        parent_id: parent,
        name: Some(format!("dev-{id}")),
        node_type: kind,
        ..Default::default()
    }
}

#[test]
fn build_graph_emits_one_node_per_record() {
    let records = vec![
        record(1, None, DeviceKind::Olt),
        record(2, Some(1), DeviceKind::Pon),
    ];
    let (nodes, edges) = build_graph(&records);

    assert_eq!(nodes.len(), 2);
    assert_eq!(edges.len(), 1);
    assert_eq!(nodes[0].id, "1");
    assert_eq!(nodes[0].variant, "custom");
    assert_eq!(nodes[0].data.icon, IconKey::Olt);
}

#[test]
fn build_graph_edge_ids_and_handles_are_fixed() {
    let (_, edges) = build_graph(&[
        record(1, None, DeviceKind::Olt),
        record(2, Some(1), DeviceKind::Pon),
    ]);

    assert_eq!(edges[0].id, "e-1-2");
    assert_eq!(edges[0].source, "1");
    assert_eq!(edges[0].target, "2");
    assert_eq!(edges[0].source_handle, HandleSide::Right);
    assert_eq!(edges[0].target_handle, HandleSide::Left);
}

#[test]
fn build_graph_edge_color_comes_from_the_child() {
    let mut child = record(2, Some(1), DeviceKind::Onu);
    child.fields.cable_color = Some("blue".to_string());
    let (_, edges) = build_graph(&[record(1, None, DeviceKind::Olt), child]);

    assert_eq!(edges[0].color.as_deref(), Some("blue"));
}

#[test]
fn build_graph_label_falls_back_from_name_to_mac_to_id() {
    let named = record(1, None, DeviceKind::Onu);

    let mut mac_only = record(2, None, DeviceKind::Onu);
    mac_only.name = None;
    mac_only.fields.mac = Some("aa:bb:cc".to_string());

    let mut bare = record(3, None, DeviceKind::Onu);
    bare.name = Some("   ".to_string());

    let (nodes, _) = build_graph(&[named, mac_only, bare]);
    assert_eq!(nodes[0].data.label, "dev-1");
    assert_eq!(nodes[1].data.label, "aa:bb:cc");
    assert_eq!(nodes[2].data.label, "Node 3");
}

#[test]
fn build_graph_dangling_parent_becomes_a_root() {
    let (nodes, edges) = build_graph(&[
        record(1, None, DeviceKind::Olt),
        record(2, Some(99), DeviceKind::Onu),
    ]);

    assert_eq!(nodes.len(), 2);
    assert!(edges.is_empty(), "no edge may reference an absent node");
}

#[test]
fn build_graph_orphan_has_no_incoming_edge() {
    let (nodes, edges) = build_graph(&[
        record(1, None, DeviceKind::Olt),
        record(2, Some(1), DeviceKind::Pon),
        record(7, Some(0), DeviceKind::Onu),
    ]);

    assert_eq!(nodes.len(), 3);
    assert!(edges.iter().all(|e| e.target != "7"));
}

#[test]
fn build_graph_skips_records_without_id_and_duplicates() {
    let (nodes, edges) = build_graph(&[
        record(0, None, DeviceKind::Onu),
        record(1, None, DeviceKind::Olt),
        record(1, None, DeviceKind::Router),
        record(2, Some(1), DeviceKind::Pon),
    ]);

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].data.node_type, DeviceKind::Olt);
    assert_eq!(edges.len(), 1);
}

#[test]
fn build_graph_ignores_self_parent() {
    let (nodes, edges) = build_graph(&[record(5, Some(5), DeviceKind::Splitter)]);
    assert_eq!(nodes.len(), 1);
    assert!(edges.is_empty());
}

#[test]
fn device_kind_parses_backend_strings_case_insensitively() {
    assert_eq!(DeviceKind::from("OLT".to_string()), DeviceKind::Olt);
    assert_eq!(DeviceKind::from("mSwitch".to_string()), DeviceKind::MSwitch);
    assert_eq!(DeviceKind::from("tj".to_string()), DeviceKind::Tj);
    assert_eq!(
        DeviceKind::from("fancy-new-device".to_string()),
        DeviceKind::Other
    );
    assert_eq!(DeviceKind::Other.icon(), IconKey::Node);
}

#[test]
fn parse_snapshot_drops_malformed_records() {
    let json = r#"[
        {"id": 1, "node_type": "OLT", "name": "central"},
        {"id": "not-a-number", "node_type": "ONU"},
        {"id": 2, "parent_id": 1, "node_type": "PON"}
    ]"#;

    let records = parse_snapshot(json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[1].node_type, DeviceKind::Pon);
}

#[test]
fn parse_snapshot_rejects_non_array_payloads() {
    assert!(parse_snapshot(r#"{"error": "nope"}"#).is_err());
}

#[test]
fn nodes_serialize_with_renderer_field_names() {
    let (nodes, edges) = build_graph(&[
        record(1, None, DeviceKind::Olt),
        record(2, Some(1), DeviceKind::Pon),
    ]);

    let node = serde_json::to_value(&nodes[0]).unwrap();
    assert_eq!(node["type"], "custom");
    assert_eq!(node["data"]["nodeType"], "OLT");
    assert_eq!(node["data"]["isCollapsed"], false);
    assert_eq!(node["position"]["x"], 0.0);

    let edge = serde_json::to_value(&edges[0]).unwrap();
    assert_eq!(edge["sourceHandle"], "right");
    assert_eq!(edge["targetHandle"], "left");
    assert!(edge.get("color").is_none());
}
