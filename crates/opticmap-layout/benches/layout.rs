use criterion::{Criterion, criterion_group, criterion_main};
use opticmap_layout::{EdgeLabel, GraphLabel, LayoutGraph, NodeLabel, RankDir, layout};

/// A fan-out heavy tree shaped like a real access network: one root, a row of
/// branch nodes, dozens of leaves per branch.
fn topology(branches: usize, leaves_per_branch: usize) -> LayoutGraph {
    let mut g = LayoutGraph::default();
    g.set_graph(GraphLabel {
        rankdir: RankDir::LR,
        ..Default::default()
    });

    g.set_node("root", NodeLabel::sized(150.0, 40.0));
    for b in 0..branches {
        let branch = format!("b{b}");
        g.set_node(branch.clone(), NodeLabel::sized(150.0, 40.0));
        g.set_edge("root", branch.clone(), EdgeLabel::default());
        for l in 0..leaves_per_branch {
            let leaf = format!("b{b}l{l}");
            g.set_node(leaf.clone(), NodeLabel::sized(150.0, 40.0));
            g.set_edge(branch.clone(), leaf, EdgeLabel::default());
        }
    }
    g
}

fn bench_layout(c: &mut Criterion) {
    c.bench_function("layout_16x32", |b| {
        b.iter_batched(
            || topology(16, 32),
            |mut g| layout(&mut g),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
