use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Key of a directed edge from `v` to `w`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
        }
    }
}

/// Directed graph with node labels `N`, edge labels `E`, and a graph label `G`.
///
/// Nodes and edges are stored in insertion order; `nodes()`, `edge_keys()`,
/// `successors(...)` and friends all iterate in that order.
#[derive(Debug, Clone)]
pub struct Graph<N, E, G> {
    label: G,
    nodes: HashMap<String, N>,
    node_order: Vec<String>,
    edges: HashMap<EdgeKey, E>,
    edge_order: Vec<EdgeKey>,
    succ: HashMap<String, Vec<String>>,
    pred: HashMap<String, Vec<String>>,
}

impl<N, E, G: Default> Default for Graph<N, E, G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}

impl<N, E, G> Graph<N, E, G> {
    pub fn new(label: G) -> Self {
        Self {
            label,
            nodes: HashMap::default(),
            node_order: Vec::new(),
            edges: HashMap::default(),
            edge_order: Vec::new(),
            succ: HashMap::default(),
            pred: HashMap::default(),
        }
    }

    pub fn graph(&self) -> &G {
        &self.label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.label
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = label;
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts a node, or replaces the label of an existing one.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if self.nodes.insert(id.clone(), label).is_none() {
            self.succ.insert(id.clone(), Vec::new());
            self.pred.insert(id.clone(), Vec::new());
            self.node_order.push(id);
        }
        self
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.nodes.get_mut(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(|s| s.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.node_order.clone()
    }

    /// Removes a node and every edge incident to it.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.nodes.remove(id).is_none() {
            return false;
        }
        let incident: Vec<EdgeKey> = self
            .edge_order
            .iter()
            .filter(|k| k.v == id || k.w == id)
            .cloned()
            .collect();
        for key in incident {
            self.remove_edge(&key.v, &key.w);
        }
        self.succ.remove(id);
        self.pred.remove(id);
        self.node_order.retain(|n| n != id);
        true
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edges
            .contains_key(&EdgeKey::new(v.to_string(), w.to_string()))
    }

    /// Inserts an edge, creating missing endpoints with `N::default()`.
    /// Replaces the label of an existing `(v, w)` edge.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>, label: E) -> &mut Self
    where
        N: Default,
    {
        let key = EdgeKey::new(v, w);
        if !self.nodes.contains_key(key.v.as_str()) {
            self.set_node(key.v.clone(), N::default());
        }
        if !self.nodes.contains_key(key.w.as_str()) {
            self.set_node(key.w.clone(), N::default());
        }
        if self.edges.insert(key.clone(), label).is_none() {
            if let Some(s) = self.succ.get_mut(key.v.as_str()) {
                s.push(key.w.clone());
            }
            if let Some(p) = self.pred.get_mut(key.w.as_str()) {
                p.push(key.v.clone());
            }
            self.edge_order.push(key);
        }
        self
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&E> {
        self.edges.get(&EdgeKey::new(v.to_string(), w.to_string()))
    }

    pub fn edge_mut(&mut self, v: &str, w: &str) -> Option<&mut E> {
        self.edges
            .get_mut(&EdgeKey::new(v.to_string(), w.to_string()))
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edges.get(key)
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edge_order.iter()
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edge_order.clone()
    }

    pub fn remove_edge(&mut self, v: &str, w: &str) -> bool {
        let key = EdgeKey::new(v.to_string(), w.to_string());
        if self.edges.remove(&key).is_none() {
            return false;
        }
        if let Some(s) = self.succ.get_mut(v) {
            if let Some(i) = s.iter().position(|n| n == w) {
                s.remove(i);
            }
        }
        if let Some(p) = self.pred.get_mut(w) {
            if let Some(i) = p.iter().position(|n| n == v) {
                p.remove(i);
            }
        }
        self.edge_order.retain(|k| k != &key);
        true
    }

    pub fn successors(&self, v: &str) -> &[String] {
        self.succ.get(v).map(|s| s.as_slice()).unwrap_or(&[])
    }

    pub fn predecessors(&self, w: &str) -> &[String] {
        self.pred.get(w).map(|p| p.as_slice()).unwrap_or(&[])
    }

    pub fn out_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.successors(v)
            .iter()
            .map(|w| EdgeKey::new(v.to_string(), w.clone()))
            .collect()
    }

    pub fn in_edges(&self, w: &str) -> Vec<EdgeKey> {
        self.predecessors(w)
            .iter()
            .map(|v| EdgeKey::new(v.clone(), w.to_string()))
            .collect()
    }

    pub fn in_degree(&self, w: &str) -> usize {
        self.pred.get(w).map(|p| p.len()).unwrap_or(0)
    }

    pub fn out_degree(&self, v: &str) -> usize {
        self.succ.get(v).map(|s| s.len()).unwrap_or(0)
    }

    /// Nodes with no incoming edge, in insertion order.
    pub fn sources(&self) -> Vec<String> {
        self.node_order
            .iter()
            .filter(|id| self.in_degree(id) == 0)
            .cloned()
            .collect()
    }

    /// Nodes with no outgoing edge, in insertion order.
    pub fn sinks(&self) -> Vec<String> {
        self.node_order
            .iter()
            .filter(|id| self.out_degree(id) == 0)
            .cloned()
            .collect()
    }
}
