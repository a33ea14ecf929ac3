// Thread model: the ordered posts of one forum thread and its author index.
//
// Post position in the vector is the canonical post index and the
// chronological order. The author set is frozen into a sorted list once, so
// every author has a stable integer id used to address graph matrices.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single forum post as ingested from the thread file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub thread_url: String,
    pub author: String,
    pub text: String,
    pub has_image: bool,
    pub has_video: bool,
    /// Signed sentiment label, always greater than -3
    pub sentiment: i32,
    /// Utility label, carried through to the statistics table untouched
    pub utility: String,
}

/// An immutable thread: posts in order plus precomputed author lookups.
#[derive(Debug, Clone)]
pub struct Thread {
    posts: Vec<Post>,
    authors: Vec<String>,
    author_ids: HashMap<String, usize>,
    /// For each author id, the indices of their posts in ascending order
    posts_by_author: Vec<Vec<usize>>,
}

impl Thread {
    pub fn new(posts: Vec<Post>) -> Self {
        let mut authors: Vec<String> = posts.iter().map(|p| p.author.clone()).collect();
        authors.sort();
        authors.dedup();

        let author_ids: HashMap<String, usize> = authors
            .iter()
            .enumerate()
            .map(|(i, a)| (a.clone(), i))
            .collect();

        let mut posts_by_author = vec![Vec::new(); authors.len()];
        for (index, post) in posts.iter().enumerate() {
            posts_by_author[author_ids[&post.author]].push(index);
        }

        Self {
            posts,
            authors,
            author_ids,
            posts_by_author,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Distinct authors, sorted. Position is the author id.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn author_id(&self, author: &str) -> Option<usize> {
        self.author_ids.get(author).copied()
    }

    /// Author id of the post at `index`.
    pub fn post_author_id(&self, index: usize) -> usize {
        self.author_ids[&self.posts[index].author]
    }

    /// The latest post by `author_id` strictly before post `before`.
    pub fn nearest_prior_post(&self, author_id: usize, before: usize) -> Option<usize> {
        let indices = self.posts_by_author.get(author_id)?;
        let split = indices.partition_point(|&i| i < before);
        split.checked_sub(1).map(|k| indices[k])
    }

    /// Authors in the order they first post, with their post counts.
    pub fn post_counts_first_seen(&self) -> Vec<(String, usize)> {
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for post in &self.posts {
            match seen.get(post.author.as_str()) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    seen.insert(post.author.as_str(), order.len());
                    order.push((post.author.clone(), 1));
                }
            }
        }

        order
    }

    /// Number of posts written by each author id.
    pub fn post_count(&self, author_id: usize) -> usize {
        self.posts_by_author.get(author_id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
pub(crate) fn post(author: &str, text: &str) -> Post {
    Post {
        thread_url: "http://forum.example/t/1".to_string(),
        author: author.to_string(),
        text: text.to_string(),
        has_image: false,
        has_video: false,
        sentiment: 0,
        utility: "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authors_sorted_and_indexed() {
        let thread = Thread::new(vec![post("zed", "a"), post("amy", "b"), post("zed", "c")]);
        assert_eq!(thread.authors(), &["amy".to_string(), "zed".to_string()]);
        assert_eq!(thread.author_id("zed"), Some(1));
        assert_eq!(thread.post_author_id(1), 0);
        assert_eq!(thread.author_id("nobody"), None);
    }

    #[test]
    fn test_nearest_prior_post() {
        let thread = Thread::new(vec![
            post("a", "1"),
            post("b", "2"),
            post("a", "3"),
            post("b", "4"),
            post("a", "5"),
        ]);
        let a = thread.author_id("a").unwrap();
        assert_eq!(thread.nearest_prior_post(a, 4), Some(2));
        assert_eq!(thread.nearest_prior_post(a, 2), Some(0));
        assert_eq!(thread.nearest_prior_post(a, 0), None);
    }

    #[test]
    fn test_post_counts_first_seen_order() {
        let thread = Thread::new(vec![post("zed", "a"), post("amy", "b"), post("zed", "c")]);
        assert_eq!(
            thread.post_counts_first_seen(),
            vec![("zed".to_string(), 2), ("amy".to_string(), 1)]
        );
        assert_eq!(thread.post_count(thread.author_id("zed").unwrap()), 2);
    }
}
