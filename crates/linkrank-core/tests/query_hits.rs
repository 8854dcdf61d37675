//! Query-driven HITS: documents → inverted index → base set → HITS.

use linkrank_core::load::parse_serialized;
use linkrank_core::metrics::rank_order;
use linkrank_core::tokenize::tokenize;
use linkrank_core::{Graph, RankError, build_inverted_index, compute_hits, extract_base_set};

/// Small web: pages 0-2 talk about rust, 3-4 about cooking, 5 links both.
fn corpus() -> (Graph, Vec<String>) {
    let edges = [
        (0, 1),
        (2, 1),
        (5, 1),
        (1, 0),
        (3, 4),
        (5, 4),
        (6, 0),
        (6, 3),
    ];
    let graph = Graph::from_edge_list(7, edges.len(), &edges).expect("valid graph");
    let docs = [
        "Rust ownership and borrowing explained",
        "The Rust programming language book",
        "Rust async runtimes compared",
        "Cooking pasta at home",
        "Italian cooking basics",
        "Links: rust and cooking resources",
        "Random blog",
    ]
    .iter()
    .map(|d| (*d).to_string())
    .collect();
    (graph, docs)
}

#[test]
fn rust_query_focuses_on_rust_neighbourhood() {
    let (graph, docs) = corpus();
    let index = build_inverted_index(docs.iter().map(|d| tokenize(d))).expect("documents");

    let out = extract_base_set(&graph, &index, &tokenize("rust book")).expect("valid");
    assert_eq!(out.root_nodes(), vec![0, 1, 2, 5]);
    // 6 links into root node 0; 4 is a target of root node 5.
    assert_eq!(out.base_nodes(), vec![0, 1, 2, 4, 5, 6]);
    // 3 is outside the base set, so 3 → 4 and 6 → 3 are dropped.
    assert_eq!(
        out.subgraph.edges(),
        &[(0, 1), (2, 1), (5, 1), (1, 0), (5, 4), (6, 0)]
    );

    let (hubs, authorities) = compute_hits(&out.subgraph, 50).expect("valid");
    assert_eq!(rank_order(&authorities)[0], 1, "authorities = {authorities:?}");
    assert_eq!(rank_order(&hubs)[0], 5, "hubs = {hubs:?}");
    assert!(hubs[3].abs() < 1e-12 && authorities[3].abs() < 1e-12);
}

#[test]
fn unknown_query_gives_edgeless_subgraph_and_zero_scores() {
    let (graph, docs) = corpus();
    let index = build_inverted_index(docs.iter().map(|d| tokenize(d))).expect("documents");

    let out = extract_base_set(&graph, &index, &["quantum"]).expect("valid");
    assert_eq!(out.subgraph.order(), graph.order());
    assert_eq!(out.subgraph.size(), 0);
    assert_eq!(out.unmatched, vec!["quantum".to_string()]);

    let (hubs, authorities) = compute_hits(&out.subgraph, 10).expect("valid");
    assert!(hubs.iter().chain(&authorities).all(|x| *x == 0.0));
}

#[test]
fn partially_matched_query_reports_missing_tokens() {
    let (graph, docs) = corpus();
    let index = build_inverted_index(docs.iter().map(|d| tokenize(d))).expect("documents");
    let out = extract_base_set(&graph, &index, &["pasta", "sushi"]).expect("valid");
    assert_eq!(out.root_nodes(), vec![3]);
    assert_eq!(out.base_nodes(), vec![3, 4, 6]);
    assert_eq!(out.unmatched, vec!["sushi".to_string()]);
}

#[test]
fn serialized_corpus_end_to_end() {
    let loaded = parse_serialized(
        r#"{
            "order": 4,
            "edges": [[0, 1], [1, 2], [2, 0], [2, 3]],
            "documents": ["graph theory", "ranking graph", "web search", "link analysis"]
        }"#,
    )
    .expect("valid");
    let index = loaded.inverted_index().expect("documents present");
    let out = extract_base_set(&loaded.graph, &index, &tokenize("graph")).expect("valid");
    assert_eq!(out.root_nodes(), vec![0, 1]);
    assert_eq!(out.base_nodes(), vec![0, 1, 2]);
    assert_eq!(out.subgraph.edges(), &[(0, 1), (1, 2), (2, 0)]);
}

#[test]
fn documents_beyond_graph_order_are_rejected() {
    let graph = Graph::new(2);
    let index = build_inverted_index(vec![vec!["a"], vec!["b"], vec!["c"]]).expect("documents");
    let err = extract_base_set(&graph, &index, &["c"]).expect_err("node 2 missing");
    assert_eq!(err, RankError::OutOfBounds { node: 2, order: 2 });
}
