// Naive reply resolution — no quote markers, just text.
//
// Two rules, both applied per post:
// - mention: an author's name appearing in the text points at that author's
//   latest earlier post
// - overlap: an earlier post whose first three words reappear verbatim
//   (whitespace ignored) in this post is treated as quoted
//
// Short common openings can produce false links under the overlap rule.

use tracing::trace;

use super::traits::ReplyResolver;
use super::{squash, three_word_probe, ReplyLink, Resolution};
use crate::thread::Thread;

/// Resolves replies from author mentions and text overlap.
pub struct NaiveResolver<'t> {
    thread: &'t Thread,
    text_overlap: bool,
    /// First-three-words probe of every post (None if it has fewer words)
    probes: Vec<Option<String>>,
    squashed: Vec<String>,
}

impl<'t> NaiveResolver<'t> {
    pub fn new(thread: &'t Thread) -> Self {
        Self {
            thread,
            text_overlap: true,
            probes: thread
                .posts()
                .iter()
                .map(|p| three_word_probe(&p.text))
                .collect(),
            squashed: thread.posts().iter().map(|p| squash(&p.text)).collect(),
        }
    }

    /// Enable or disable the text-overlap rule (mentions always apply).
    pub fn with_text_overlap(mut self, enabled: bool) -> Self {
        self.text_overlap = enabled;
        self
    }

    fn mentioned_posts(&self, index: usize) -> Vec<usize> {
        let text = &self.thread.posts()[index].text;
        let own = self.thread.post_author_id(index);

        self.thread
            .authors()
            .iter()
            .enumerate()
            .filter(|(id, name)| *id != own && !name.is_empty() && text.contains(name.as_str()))
            .filter_map(|(id, _)| self.thread.nearest_prior_post(id, index))
            .collect()
    }

    fn overlapping_posts(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let text = &self.squashed[index];
        self.probes[..index]
            .iter()
            .enumerate()
            .filter_map(move |(earlier, probe)| {
                probe
                    .as_deref()
                    .filter(|p| text.contains(p))
                    .map(|_| earlier)
            })
    }
}

impl ReplyResolver for NaiveResolver<'_> {
    fn label(&self) -> &'static str {
        "naive_quoted"
    }

    fn thread(&self) -> &Thread {
        self.thread
    }

    fn resolve_post(&self, index: usize) -> Resolution {
        let mut targets = self.mentioned_posts(index);

        if self.text_overlap {
            for earlier in self.overlapping_posts(index) {
                if !targets.contains(&earlier) {
                    targets.push(earlier);
                }
            }
        }

        trace!(post = index, targets = targets.len(), "Naive resolution");

        Resolution {
            links: targets
                .into_iter()
                .map(|to| ReplyLink { from: index, to })
                .collect(),
            unresolved: 0,
        }
    }
}
