// Quote-block reply resolution.
//
// Forum software renders a quoted reply as "<marker> <author> <quoted text>"
// inline in the post body. Each marker occurrence is one quote. The quoted
// author is recognised by the longest known author name at the start of the
// block, and the quoted post is the first post whose text contains the first
// three quoted words. Failing that, a post by the quoted author that is itself
// the start of the fragment (shorter than three words) is taken.

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use super::traits::ReplyResolver;
use super::{squash, three_word_probe, ReplyLink, Resolution};
use crate::thread::Thread;

/// Markers the supported forum engines put in front of a quote.
pub const DEFAULT_QUOTE_MARKERS: &[&str] = &["Сообщение от", "Message from"];

/// Resolves replies from embedded quote blocks.
pub struct QuoteResolver<'t> {
    thread: &'t Thread,
    markers: Option<Regex>,
    /// Anchored alternation of author names, longest first
    authors: Option<Regex>,
    /// Post texts with all whitespace removed
    squashed: Vec<String>,
}

impl<'t> QuoteResolver<'t> {
    pub fn new<S: AsRef<str>>(thread: &'t Thread, markers: &[S]) -> Result<Self> {
        let markers = longest_first_alternation(markers.iter().map(|m| m.as_ref()))
            .map(|alt| Regex::new(&alt))
            .transpose()
            .context("Failed to compile quote marker pattern")?;

        let authors = longest_first_alternation(thread.authors().iter().map(|a| a.as_str()))
            .map(|alt| Regex::new(&format!("^(?:{alt})")))
            .transpose()
            .context("Failed to compile author pattern")?;

        let squashed = thread.posts().iter().map(|p| squash(&p.text)).collect();

        Ok(Self {
            thread,
            markers,
            authors,
            squashed,
        })
    }

    /// Find the post quoted by one quote block, if any.
    fn quoted_post(&self, replier: usize, block: &str) -> Option<usize> {
        let Some(author) = self.authors.as_ref().and_then(|re| re.find(block)) else {
            debug!(post = replier, "Quote block names no known author");
            return None;
        };

        let Some(probe) = three_word_probe(&block[author.end()..]) else {
            debug!(
                post = replier,
                author = author.as_str(),
                "Quoted fragment shorter than three words"
            );
            return None;
        };

        let found = self
            .squashed
            .iter()
            .enumerate()
            .position(|(index, text)| index != replier && text.contains(&probe))
            .or_else(|| self.short_post_by(author.as_str(), replier, &probe));

        if found.is_none() {
            debug!(
                post = replier,
                author = author.as_str(),
                "No post contains the quoted fragment"
            );
        }
        found
    }

    /// A post by the quoted author too short to contain the probe, whose
    /// whole text is the start of the quoted fragment.
    fn short_post_by(&self, author: &str, replier: usize, probe: &str) -> Option<usize> {
        let author_id = self.thread.author_id(author)?;
        (0..self.thread.len()).find(|&index| {
            let text = &self.squashed[index];
            index != replier
                && self.thread.post_author_id(index) == author_id
                && !text.is_empty()
                && probe.starts_with(text.as_str())
        })
    }
}

impl ReplyResolver for QuoteResolver<'_> {
    fn label(&self) -> &'static str {
        "original_quoted"
    }

    fn thread(&self) -> &Thread {
        self.thread
    }

    fn resolve_post(&self, index: usize) -> Resolution {
        let mut resolution = Resolution::default();
        let Some(markers) = &self.markers else {
            return resolution;
        };

        let text = &self.thread.posts()[index].text;
        let occurrences: Vec<_> = markers.find_iter(text).collect();

        for (k, marker) in occurrences.iter().enumerate() {
            let end = occurrences.get(k + 1).map_or(text.len(), |next| next.start());
            let block = text[marker.end()..end].trim();

            match self.quoted_post(index, block) {
                Some(target) => resolution.links.push(ReplyLink {
                    from: index,
                    to: target,
                }),
                None => resolution.unresolved += 1,
            }
        }

        resolution
    }
}

/// Regex alternation of the escaped, non-empty literals, longest first so
/// that leftmost-first matching prefers the longest literal.
fn longest_first_alternation<'a>(literals: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut literals: Vec<&str> = literals.filter(|l| !l.is_empty()).collect();
    if literals.is_empty() {
        return None;
    }
    literals.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    literals.dedup();
    Some(
        literals
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::post;

    fn resolver(thread: &Thread) -> QuoteResolver<'_> {
        QuoteResolver::new(thread, DEFAULT_QUOTE_MARKERS).unwrap()
    }

    #[test]
    fn test_quote_links_to_short_original() {
        let thread = Thread::new(vec![
            post("A", "решение простое"),
            post("B", "Сообщение от A решение простое это хорошо"),
        ]);
        let replies = resolver(&thread).resolve();
        assert_eq!(replies.links, vec![ReplyLink { from: 1, to: 0 }]);
        assert_eq!(replies.unresolved, 0);
    }

    #[test]
    fn test_containing_post_beats_earlier_short_prefix() {
        let thread = Thread::new(vec![
            post("X", "Да"),
            post("A", "Да согласен полностью с тобой"),
            post("B", "Сообщение от A Да согласен полностью верно"),
        ]);
        let replies = resolver(&thread).resolve();
        assert_eq!(replies.links, vec![ReplyLink { from: 2, to: 1 }]);
    }

    #[test]
    fn test_short_prefix_must_be_by_quoted_author() {
        let thread = Thread::new(vec![
            post("X", "решение простое"),
            post("B", "Сообщение от A решение простое это хорошо"),
            post("A", "другое"),
        ]);
        let replies = resolver(&thread).resolve();
        assert!(replies.links.is_empty());
        assert_eq!(replies.unresolved, 1);
    }

    #[test]
    fn test_each_marker_is_one_quote() {
        let thread = Thread::new(vec![
            post("anna", "поменял масло в коробке вчера"),
            post("boris", "сальник течет после зимы"),
            post(
                "carl",
                "Сообщение от anna поменял масло в коробке Сообщение от boris сальник течет после зимы согласен",
            ),
        ]);
        let replies = resolver(&thread).resolve();
        assert_eq!(
            replies.links,
            vec![ReplyLink { from: 2, to: 0 }, ReplyLink { from: 2, to: 1 }]
        );
    }

    #[test]
    fn test_longest_author_name_wins() {
        let thread = Thread::new(vec![
            post("Ivan", "первый пост про насос"),
            post("Ivan Petrov", "насос гудит сильно вечером"),
            post("Olga", "Message from Ivan Petrov насос гудит сильно"),
        ]);
        let replies = resolver(&thread).resolve();
        assert_eq!(replies.links, vec![ReplyLink { from: 2, to: 1 }]);
    }

    #[test]
    fn test_author_with_regex_metacharacters() {
        let thread = Thread::new(vec![
            post("a.b (x)", "ремень порвался на трассе"),
            post("c", "Сообщение от a.b (x) ремень порвался на трассе жаль"),
        ]);
        let replies = resolver(&thread).resolve();
        assert_eq!(replies.links, vec![ReplyLink { from: 1, to: 0 }]);
    }

    #[test]
    fn test_unresolvable_quotes_are_counted() {
        let thread = Thread::new(vec![
            post("A", "что-то совсем другое"),
            post("B", "Сообщение от Z неизвестный автор пишет"),
            post("C", "Сообщение от A два слова"),
            post("D", "Сообщение от A эти слова нигде не встречались"),
        ]);
        let replies = resolver(&thread).resolve();
        assert!(replies.links.is_empty());
        assert_eq!(replies.unresolved, 3);
    }

    #[test]
    fn test_post_without_marker_has_no_links() {
        let thread = Thread::new(vec![post("A", "просто текст"), post("B", "ответ без цитаты")]);
        let resolution = resolver(&thread).resolve_post(1);
        assert_eq!(resolution, Resolution::default());
    }
}
