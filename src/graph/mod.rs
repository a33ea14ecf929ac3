// Author interaction graph: who replied to whom, and how.
//
// Four author x author matrices are kept per resolver:
//   raw            +1 per reply link
//   sentiment      +(sentiment + 3) per link, shifting labels onto positive weights
//   reciprocal     +1 / (sentiment + 3) per link
// and normalization turns them into distance-like weights:
//   clean normalized      1 / raw
//   sentiment normalized  the accumulated reciprocal
// Cells with no interaction normalize to `Weight::Unreachable`.

pub mod paths;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::replies::ReplyLink;
use crate::thread::Thread;

/// Offset that maps sentiment labels (> -3) onto positive weights.
pub const SENTIMENT_SHIFT: i64 = 3;

/// Serialized form of an unreachable normalized cell.
pub const UNREACHABLE_SENTINEL: i64 = i64::MAX;

/// A dense square matrix, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> Matrix<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> &T {
        &self.cells[row * self.size + column]
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> &mut T {
        &mut self.cells[row * self.size + column]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Build a matrix of the same shape by mapping every cell.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        Matrix {
            size: self.size,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Render with a header row and column of labels; the corner is empty.
    pub fn labeled<L: AsRef<str>>(&self, labels: &[L], render: impl Fn(&T) -> String) -> Vec<Vec<String>> {
        let mut table = Vec::with_capacity(self.size + 1);

        let mut header = Vec::with_capacity(self.size + 1);
        header.push(String::new());
        header.extend(labels.iter().map(|l| l.as_ref().to_string()));
        table.push(header);

        for (i, label) in labels.iter().enumerate().take(self.size) {
            let mut line = Vec::with_capacity(self.size + 1);
            line.push(label.as_ref().to_string());
            line.extend(self.row(i).iter().map(&render));
            table.push(line);
        }

        table
    }
}

/// A normalized interaction weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Weight {
    Finite(f64),
    /// No interaction; treated as infinite distance and never divided into
    Unreachable,
}

impl Weight {
    pub fn finite(self) -> Option<f64> {
        match self {
            Weight::Finite(w) => Some(w),
            Weight::Unreachable => None,
        }
    }

    pub fn is_unreachable(self) -> bool {
        matches!(self, Weight::Unreachable)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Finite(w) => f.write_str(&format_float(*w)),
            Weight::Unreachable => write!(f, "{UNREACHABLE_SENTINEL}"),
        }
    }
}

/// Floats keep a fractional part when whole ("1.0", not "1").
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// Accumulated reply counts between authors for one resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionGraph {
    authors: Vec<String>,
    raw: Matrix<u64>,
    sentiment: Matrix<i64>,
    reciprocal: Matrix<f64>,
    links: u64,
}

impl InteractionGraph {
    pub fn new(authors: &[String]) -> Self {
        let n = authors.len();
        Self {
            authors: authors.to_vec(),
            raw: Matrix::filled(n, 0),
            sentiment: Matrix::filled(n, 0),
            reciprocal: Matrix::filled(n, 0.0),
            links: 0,
        }
    }

    /// Accumulate every link of a resolver over `thread`.
    pub fn from_links(thread: &Thread, links: &[ReplyLink]) -> Self {
        let mut graph = Self::new(thread.authors());
        for link in links {
            graph.record(
                thread.post_author_id(link.from),
                thread.post_author_id(link.to),
                thread.posts()[link.from].sentiment,
            );
        }
        graph
    }

    /// Count one reply from author `from` to author `to`, written with the
    /// replying post's sentiment label.
    pub fn record(&mut self, from: usize, to: usize, sentiment: i32) {
        let weight = i64::from(sentiment) + SENTIMENT_SHIFT;

        *self.raw.get_mut(from, to) += 1;
        *self.sentiment.get_mut(from, to) += weight;
        *self.reciprocal.get_mut(from, to) += 1.0 / weight as f64;
        self.links += 1;
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn raw(&self) -> &Matrix<u64> {
        &self.raw
    }

    pub fn sentiment(&self) -> &Matrix<i64> {
        &self.sentiment
    }

    /// Number of links recorded.
    pub fn link_count(&self) -> u64 {
        self.links
    }

    /// Derive the distance-like matrices. Pure: calling it again on the same
    /// accumulated counts gives the same result.
    pub fn normalize(&self) -> NormalizedGraph {
        let clean = self.raw.map(|&count| {
            if count == 0 {
                Weight::Unreachable
            } else {
                Weight::Finite(1.0 / count as f64)
            }
        });

        let n = self.raw.size();
        let mut sentiment = Matrix::filled(n, Weight::Unreachable);
        for i in 0..n {
            for j in 0..n {
                if *self.raw.get(i, j) > 0 {
                    *sentiment.get_mut(i, j) = Weight::Finite(*self.reciprocal.get(i, j));
                }
            }
        }

        NormalizedGraph { clean, sentiment }
    }

    /// Replies written by author `id` (row sum).
    pub fn out_degree(&self, id: usize) -> u64 {
        self.raw.row(id).iter().sum()
    }

    /// Replies received by author `id` (column sum).
    pub fn in_degree(&self, id: usize) -> u64 {
        (0..self.raw.size()).map(|i| *self.raw.get(i, id)).sum()
    }

    pub fn out_degree_sentiment(&self, id: usize) -> i64 {
        self.sentiment.row(id).iter().sum()
    }

    pub fn in_degree_sentiment(&self, id: usize) -> i64 {
        (0..self.sentiment.size())
            .map(|i| *self.sentiment.get(i, id))
            .sum()
    }

    /// Strongest directed edges, by raw count, for display.
    pub fn top_edges(&self, limit: usize) -> Vec<(&str, &str, u64)> {
        let n = self.raw.size();
        let mut edges: Vec<(&str, &str, u64)> = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter_map(|(i, j)| {
                let count = *self.raw.get(i, j);
                (count > 0).then(|| (self.authors[i].as_str(), self.authors[j].as_str(), count))
            })
            .collect();
        edges.sort_by(|a, b| b.2.cmp(&a.2));
        edges.truncate(limit);
        edges
    }

    /// Labeled tables ready for writing, keyed by file suffix.
    pub fn export(&self, normalized: &NormalizedGraph) -> Vec<(&'static str, Vec<Vec<String>>)> {
        vec![
            ("clean_raw", self.raw.labeled(&self.authors, |c| c.to_string())),
            (
                "clean_normalized",
                normalized.clean.labeled(&self.authors, |w| w.to_string()),
            ),
            ("sentim_raw", self.sentiment.labeled(&self.authors, |c| c.to_string())),
            (
                "sentim_normalized",
                normalized.sentiment.labeled(&self.authors, |w| w.to_string()),
            ),
        ]
    }
}

/// Normalized companions of an `InteractionGraph`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGraph {
    pub clean: Matrix<Weight>,
    pub sentiment: Matrix<Weight>,
}
