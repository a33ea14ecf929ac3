// Reply resolution — deciding which earlier posts a post answers.
//
// Forum archives carry no reply metadata, so replies are inferred from the
// text. Two resolvers exist and their results are never merged:
// - quote: follows the forum's embedded "Message from <author>" blocks
// - naive: author-name mentions and verbatim text overlap

pub mod naive;
pub mod quote;
pub mod traits;

use serde::{Deserialize, Serialize};

/// A directed reply edge between two posts, by post index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyLink {
    /// The replying post
    pub from: usize,
    /// The post being replied to
    pub to: usize,
}

/// Outcome of resolving a single post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub links: Vec<ReplyLink>,
    /// Quote occurrences that could not be tied to any post
    pub unresolved: usize,
}

/// All links of one resolver over a whole thread.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedReplies {
    pub links: Vec<ReplyLink>,
    pub unresolved: usize,
}

impl ResolvedReplies {
    pub fn push(&mut self, resolution: Resolution) {
        self.links.extend(resolution.links);
        self.unresolved += resolution.unresolved;
    }

    /// Number of links pointing at each post.
    pub fn indegree(&self, post_count: usize) -> Vec<usize> {
        let mut counts = vec![0; post_count];
        for link in &self.links {
            if let Some(slot) = counts.get_mut(link.to) {
                *slot += 1;
            }
        }
        counts
    }
}

/// Strip every whitespace character.
pub(crate) fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The first three words of `text` joined without whitespace, or `None`
/// when the text has fewer than three words.
pub(crate) fn three_word_probe(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().take(3).collect();
    if words.len() < 3 {
        None
    } else {
        Some(words.concat())
    }
}
