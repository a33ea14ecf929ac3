// Per-post feature table.
//
// One row per post in thread order. The `quoted` column depends on the
// reply resolver, so a table is built per resolver; every other column is
// shared.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::keywords::selection::KeywordSet;
use crate::thread::Thread;

/// Inline sentinels and URL prefixes counted as links.
const LINK_MARKERS: &str = r"\*\*IMAGE\*\*|\*\*VIDEO\*\*|https?://";

/// One row of the post statistics table. Field order is column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostStats {
    /// Whitespace-separated token count
    pub length: usize,
    /// Image, video and URL markers
    pub links: usize,
    /// Replies pointing at this post
    pub quoted: usize,
    /// 1-based position in the thread
    pub position: usize,
    pub sentiment: i32,
    /// Keyword occurrences
    pub keywords: usize,
    pub utility: String,
    pub author: String,
}

/// Counts media and link markers in post text.
pub struct LinkCounter {
    pattern: Regex,
}

impl LinkCounter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(LINK_MARKERS).context("Failed to compile link pattern")?,
        })
    }

    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// Build the statistics table for one resolver's per-post indegree.
pub fn post_stats(
    thread: &Thread,
    keywords: &KeywordSet,
    links: &LinkCounter,
    indegree: &[usize],
) -> Vec<PostStats> {
    thread
        .posts()
        .iter()
        .enumerate()
        .map(|(index, post)| PostStats {
            length: post.text.split_whitespace().count(),
            links: links.count(&post.text),
            quoted: indegree.get(index).copied().unwrap_or(0),
            position: index + 1,
            sentiment: post.sentiment,
            keywords: keywords.count_in(&post.text),
            utility: post.utility.clone(),
            author: post.author.clone(),
        })
        .collect()
}
