#![no_main]

use libfuzzer_sys::fuzz_target;
use linkrank_core::load::parse_edge_list;
use linkrank_core::{GraphStats, compute_pagerank};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(graph) = parse_edge_list(text) else {
        return;
    };

    let _ = GraphStats::from_graph(&graph);
    // The engines are dense O(n^2) per step; keep runs fast.
    if !(1..=64).contains(&graph.order()) {
        return;
    }
    let scores = compute_pagerank(&graph, 0.15, None).expect("valid alpha on non-empty graph");
    let sum: f64 = scores.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6, "pagerank sum {sum}");
});
