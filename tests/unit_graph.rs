// Unit tests for the author interaction graph.
//
// Tests accumulation from reply links, normalization (including the
// unreachable sentinel in exported tables), degree sums and betweenness.

use forumgraph::graph::paths::{path_betweenness, ShortestPaths};
use forumgraph::graph::{InteractionGraph, Weight, UNREACHABLE_SENTINEL};
use forumgraph::replies::ReplyLink;
use forumgraph::stats::author::author_stats;
use forumgraph::thread::{Post, Thread};

fn post(author: &str, sentiment: i32) -> Post {
    Post {
        thread_url: "https://forum.example/t/1".to_string(),
        author: author.to_string(),
        text: String::new(),
        has_image: false,
        has_video: false,
        sentiment,
        utility: "0".to_string(),
    }
}

fn authors(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

// ============================================================
// Accumulation and normalization
// ============================================================

#[test]
fn single_link_normalizes_to_one() {
    let mut graph = InteractionGraph::new(&authors(&["A", "B"]));
    graph.record(0, 1, 0);
    let normalized = graph.normalize();

    assert_eq!(*normalized.clean.get(0, 1), Weight::Finite(1.0));
    assert_eq!(*normalized.clean.get(0, 0), Weight::Unreachable);
    assert_eq!(*normalized.clean.get(1, 0), Weight::Unreachable);
    assert_eq!(*normalized.clean.get(1, 1), Weight::Unreachable);
}

#[test]
fn raw_cells_sum_to_link_count() {
    let thread = Thread::new(vec![
        post("A", 0),
        post("B", 1),
        post("A", -1),
        post("C", 2),
        post("B", 0),
    ]);
    let links = [
        ReplyLink { from: 1, to: 0 },
        ReplyLink { from: 2, to: 1 },
        ReplyLink { from: 3, to: 1 },
        ReplyLink { from: 3, to: 0 },
        ReplyLink { from: 4, to: 3 },
    ];
    let graph = InteractionGraph::from_links(&thread, &links);

    let total: u64 = graph.raw().cells().iter().sum();
    assert_eq!(total, links.len() as u64);
    assert_eq!(graph.link_count(), links.len() as u64);
}

#[test]
fn sentiment_is_shifted_and_reciprocal_normalized() {
    let mut graph = InteractionGraph::new(&authors(&["A", "B"]));
    graph.record(0, 1, 1);
    graph.record(0, 1, -1);

    assert_eq!(*graph.raw().get(0, 1), 2);
    // (1 + 3) + (-1 + 3)
    assert_eq!(*graph.sentiment().get(0, 1), 6);

    let normalized = graph.normalize();
    assert_eq!(*normalized.clean.get(0, 1), Weight::Finite(0.5));
    let Weight::Finite(w) = *normalized.sentiment.get(0, 1) else {
        panic!("expected a finite sentiment weight");
    };
    assert!((w - (0.25 + 0.5)).abs() < 1e-12);
}

#[test]
fn normalization_is_idempotent() {
    let mut graph = InteractionGraph::new(&authors(&["A", "B", "C"]));
    graph.record(0, 1, 0);
    graph.record(1, 2, 2);
    graph.record(0, 1, -2);
    assert_eq!(graph.normalize(), graph.normalize());
}

#[test]
fn exported_tables_use_sentinel_for_unreachable() {
    let mut graph = InteractionGraph::new(&authors(&["A", "B"]));
    graph.record(0, 1, 0);
    let normalized = graph.normalize();
    let tables = graph.export(&normalized);

    let suffixes: Vec<&str> = tables.iter().map(|(s, _)| *s).collect();
    assert_eq!(
        suffixes,
        vec!["clean_raw", "clean_normalized", "sentim_raw", "sentim_normalized"]
    );

    let (_, clean) = &tables[1];
    assert_eq!(clean[0], vec!["", "A", "B"]);
    assert_eq!(clean[1], vec!["A".to_string(), UNREACHABLE_SENTINEL.to_string(), "1.0".to_string()]);
    assert_eq!(clean[2][1], "9223372036854775807");
    assert!(!clean.iter().flatten().any(|c| c == "inf" || c == "0"));

    let (_, raw) = &tables[0];
    assert_eq!(raw[1], vec!["A", "0", "1"]);
}

#[test]
fn degrees_are_row_and_column_sums() {
    let mut graph = InteractionGraph::new(&authors(&["A", "B", "C"]));
    graph.record(0, 1, 0);
    graph.record(0, 2, 1);
    graph.record(2, 1, -2);

    assert_eq!(graph.out_degree(0), 2);
    assert_eq!(graph.in_degree(1), 2);
    assert_eq!(graph.out_degree_sentiment(0), 3 + 4);
    assert_eq!(graph.in_degree_sentiment(1), 3 + 1);
}

#[test]
fn top_edges_are_strongest_first() {
    let mut graph = InteractionGraph::new(&authors(&["A", "B", "C"]));
    graph.record(0, 1, 0);
    graph.record(2, 1, 0);
    graph.record(2, 1, 0);

    let edges = graph.top_edges(1);
    assert_eq!(edges, vec![("C", "B", 2)]);
}

// ============================================================
// Shortest paths and author statistics
// ============================================================

#[test]
fn broker_sits_on_most_paths() {
    let mut graph = InteractionGraph::new(&authors(&["A", "B", "C"]));
    graph.record(0, 1, 0);
    graph.record(1, 2, 0);
    let normalized = graph.normalize();

    let paths = ShortestPaths::compute(&normalized.clean);
    assert_eq!(paths.distance(0, 2), Some(2.0));
    assert_eq!(path_betweenness(&normalized.clean), vec![2, 3, 2]);
}

#[test]
fn author_stats_follow_sorted_author_order() {
    let thread = Thread::new(vec![post("B", 0), post("A", 1), post("C", 0)]);
    let links = [ReplyLink { from: 1, to: 0 }, ReplyLink { from: 2, to: 1 }];
    let graph = InteractionGraph::from_links(&thread, &links);
    let stats = author_stats(&thread, &graph, &graph.normalize());

    let names: Vec<&str> = stats.iter().map(|s| s.author.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    // C -> A -> B: A brokers every multi-hop path
    assert!(stats[0].betweenness > stats[1].betweenness);
    assert_eq!(stats[0].in_degree, 1);
    assert_eq!(stats[0].out_degree, 1);
    assert_eq!(stats[0].out_degree_sent, 4);
}
