//! Label types consumed by the layout pipeline.
//!
//! Callers describe their diagram with these labels on an
//! [`opticmap_graph::Graph`]; the pipeline fills in `x`/`y` centers.

/// Direction of the rank axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    /// Ranks grow downward (the internal working coordinate system).
    #[default]
    TB,
    /// Ranks grow rightward.
    LR,
}

#[derive(Debug, Clone)]
pub struct GraphLabel {
    pub rankdir: RankDir,
    /// Gap between adjacent nodes within a rank.
    pub nodesep: f64,
    /// Gap between adjacent ranks.
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    /// Center coordinates, populated by `layout`.
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<usize>,
    pub order: Option<usize>,
}

impl NodeLabel {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    /// Minimum number of ranks the edge must span.
    pub minlen: usize,
    pub weight: f64,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            minlen: 1,
            weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
