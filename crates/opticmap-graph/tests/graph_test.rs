use opticmap_graph::{Graph, alg};

type G = Graph<u32, &'static str, ()>;

#[test]
fn graph_stores_nodes_in_insertion_order() {
    let mut g = G::default();
    g.set_node("b", 1).set_node("a", 2).set_node("c", 3);

    let ids: Vec<&str> = g.nodes().collect();
    assert_eq!(ids, ["b", "a", "c"]);
    assert_eq!(g.node("a"), Some(&2));
    assert_eq!(g.node_count(), 3);
}

#[test]
fn graph_set_node_replaces_label_without_duplicating() {
    let mut g = G::default();
    g.set_node("a", 1).set_node("a", 9);

    assert_eq!(g.node_count(), 1);
    assert_eq!(g.node("a"), Some(&9));
}

#[test]
fn graph_set_edge_creates_missing_endpoints() {
    let mut g = G::default();
    g.set_edge("a", "b", "ab");

    assert!(g.has_node("a"));
    assert!(g.has_node("b"));
    assert_eq!(g.edge("a", "b"), Some(&"ab"));
    assert_eq!(g.successors("a"), ["b".to_string()]);
    assert_eq!(g.predecessors("b"), ["a".to_string()]);
}

#[test]
fn graph_edges_are_directed() {
    let mut g = G::default();
    g.set_edge("a", "b", "ab");

    assert!(g.has_edge("a", "b"));
    assert!(!g.has_edge("b", "a"));
    assert!(g.successors("b").is_empty());
}

#[test]
fn graph_remove_node_drops_incident_edges() {
    let mut g = G::default();
    g.set_edge("a", "b", "ab");
    g.set_edge("b", "c", "bc");
    g.set_edge("d", "b", "db");

    assert!(g.remove_node("b"));
    assert_eq!(g.edge_count(), 0);
    assert!(g.successors("a").is_empty());
    assert!(!g.has_node("b"));
    assert!(g.has_node("c"));
}

#[test]
fn graph_remove_edge_keeps_endpoints() {
    let mut g = G::default();
    g.set_edge("a", "b", "ab");

    assert!(g.remove_edge("a", "b"));
    assert!(!g.remove_edge("a", "b"));
    assert!(g.has_node("a"));
    assert!(g.has_node("b"));
    assert_eq!(g.in_degree("b"), 0);
}

#[test]
fn graph_sources_and_sinks() {
    let mut g = G::default();
    g.set_edge("r", "a", "");
    g.set_edge("r", "b", "");
    g.set_node("lone", 0);

    assert_eq!(g.sources(), ["r".to_string(), "lone".to_string()]);
    assert_eq!(
        g.sinks(),
        ["a".to_string(), "b".to_string(), "lone".to_string()]
    );
}

#[test]
fn alg_reachable_from_excludes_start() {
    let mut g = G::default();
    g.set_edge("a", "b", "");
    g.set_edge("b", "c", "");
    g.set_edge("a", "d", "");

    assert_eq!(
        alg::reachable_from(&g, "a"),
        ["b".to_string(), "d".to_string(), "c".to_string()]
    );
    assert_eq!(alg::reachable_from(&g, "c"), Vec::<String>::new());
}

#[test]
fn alg_reachable_from_terminates_on_cycles() {
    let mut g = G::default();
    g.set_edge("a", "b", "");
    g.set_edge("b", "a", "");
    g.set_edge("b", "b", "");

    assert_eq!(alg::reachable_from(&g, "a"), ["b".to_string()]);
}

#[test]
fn alg_topo_order_is_deterministic() {
    let mut g = G::default();
    g.set_edge("r", "a", "");
    g.set_edge("r", "b", "");
    g.set_edge("a", "c", "");

    assert_eq!(
        alg::topo_order(&g),
        Some(vec![
            "r".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string()
        ])
    );
}

#[test]
fn alg_topo_order_detects_cycles() {
    let mut g = G::default();
    g.set_edge("a", "b", "");
    g.set_edge("b", "a", "");

    assert_eq!(alg::topo_order(&g), None);
}
