#![no_main]

use libfuzzer_sys::fuzz_target;
use linkrank_core::load::parse_serialized;
use linkrank_core::tokenize::tokenize;
use linkrank_core::{compute_hits, extract_base_set};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (graph_text, query) = text.split_once('\n').unwrap_or((text, ""));
    let Ok(loaded) = parse_serialized(graph_text) else {
        return;
    };
    // HITS is dense O(n^2) per step; keep runs fast.
    if loaded.graph.order() > 64 {
        return;
    }
    let Some(index) = loaded.inverted_index() else {
        return;
    };

    let extraction =
        extract_base_set(&loaded.graph, &index, &tokenize(query)).expect("document count checked by loader");
    for &(u, v) in extraction.subgraph.edges() {
        assert!(extraction.base.contains(u) && extraction.base.contains(v));
    }
    let _ = compute_hits(&extraction.subgraph, 20);
});
