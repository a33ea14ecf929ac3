// Per-author tables: post counts and interaction-graph summaries.

use serde::{Deserialize, Serialize};

use crate::graph::paths::{path_betweenness, weighted_path_betweenness};
use crate::graph::{InteractionGraph, NormalizedGraph};
use crate::thread::Thread;

/// Posts per author. Named after the column downstream tools expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadCount {
    pub author: String,
    pub num_of_threads: usize,
}

/// Post counts in the order authors first appear in the thread.
pub fn thread_counts(thread: &Thread) -> Vec<ThreadCount> {
    thread
        .post_counts_first_seen()
        .into_iter()
        .map(|(author, num_of_threads)| ThreadCount {
            author,
            num_of_threads,
        })
        .collect()
}

/// Graph position of one author under one resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub author: String,
    pub betweenness: u64,
    pub in_degree: u64,
    pub out_degree: u64,
    pub betweenness_sent: f64,
    pub in_degree_sent: i64,
    pub out_degree_sent: i64,
    pub num_of_threads: usize,
}

/// Author statistics in graph (sorted author) order.
pub fn author_stats(
    thread: &Thread,
    graph: &InteractionGraph,
    normalized: &NormalizedGraph,
) -> Vec<AuthorStats> {
    let betweenness = path_betweenness(&normalized.clean);
    let betweenness_sent = weighted_path_betweenness(&normalized.sentiment);

    graph
        .authors()
        .iter()
        .enumerate()
        .map(|(id, author)| AuthorStats {
            author: author.clone(),
            betweenness: betweenness[id],
            in_degree: graph.in_degree(id),
            out_degree: graph.out_degree(id),
            betweenness_sent: betweenness_sent[id],
            in_degree_sent: graph.in_degree_sentiment(id),
            out_degree_sent: graph.out_degree_sentiment(id),
            num_of_threads: thread.post_count(id),
        })
        .collect()
}
