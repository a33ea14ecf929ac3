// Reply resolver trait: the seam between reply heuristics and the graph.
//
// Resolvers are built for one thread so they can precompute whatever lookup
// structures their heuristic needs (author patterns, squashed post texts).

use super::{Resolution, ResolvedReplies};
use crate::thread::Thread;

/// Trait for inferring reply links from thread text.
pub trait ReplyResolver {
    /// Short name used in output file names (e.g. `original_quoted`).
    fn label(&self) -> &'static str;

    /// The thread this resolver was built for.
    fn thread(&self) -> &Thread;

    /// Resolve the replies of the post at `index`. Never fails: a post with
    /// nothing to resolve yields an empty resolution.
    fn resolve_post(&self, index: usize) -> Resolution;

    /// Resolve every post in thread order.
    fn resolve(&self) -> ResolvedReplies {
        let mut replies = ResolvedReplies::default();
        for index in 0..self.thread().len() {
            replies.push(self.resolve_post(index));
        }
        replies
    }
}
