// Forumgraph: keyword ranking and reply-graph statistics for forum threads
//
// This is the library root. Each module corresponds to one stage of the
// analysis: reading threads, ranking keywords, resolving replies, building
// author graphs and writing the statistics tables.

pub mod config;
pub mod error;
pub mod graph;
pub mod keywords;
pub mod output;
pub mod pipeline;
pub mod replies;
pub mod stats;
pub mod thread;
pub mod tsv;
