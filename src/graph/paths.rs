// All-pairs shortest paths and path betweenness over normalized graphs.
//
// Normalized weights are distances (more interaction = shorter), so an author
// who sits on many shortest reply paths brokers the thread's conversation.
// Diagonal cells are forced to distance zero and unreachable cells carry no
// edge at all.

use super::{Matrix, Weight};

/// Floyd-Warshall result: distances plus the predecessor of each target on
/// the current shortest path.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    dist: Matrix<f64>,
    /// `prev[(i, j)]` is the vertex before `j` on the path from `i`
    prev: Matrix<Option<usize>>,
}

impl ShortestPaths {
    pub fn compute(weights: &Matrix<Weight>) -> Self {
        let n = weights.size();
        let mut dist = Matrix::filled(n, f64::INFINITY);
        let mut prev = Matrix::filled(n, None);

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    *dist.get_mut(i, j) = 0.0;
                } else if let Weight::Finite(w) = *weights.get(i, j) {
                    *dist.get_mut(i, j) = w;
                    *prev.get_mut(i, j) = Some(i);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let through_k = *dist.get(i, k);
                if through_k.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let candidate = through_k + *dist.get(k, j);
                    if candidate < *dist.get(i, j) {
                        *dist.get_mut(i, j) = candidate;
                        *prev.get_mut(i, j) = *prev.get(k, j);
                    }
                }
            }
        }

        Self { dist, prev }
    }

    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        let d = *self.dist.get(from, to);
        d.is_finite().then_some(d)
    }

    /// Edges `(from, to)` of the shortest path, in order. Empty when
    /// `from == to` or `to` is unreachable.
    pub fn path(&self, from: usize, to: usize) -> Vec<(usize, usize)> {
        if from == to || self.distance(from, to).is_none() {
            return Vec::new();
        }

        let mut edges = Vec::new();
        let mut current = to;
        while current != from {
            let Some(before) = *self.prev.get(from, current) else {
                return Vec::new();
            };
            edges.push((before, current));
            current = before;
        }
        edges.reverse();
        edges
    }
}

/// For every ordered pair with a path, each distinct vertex on the path
/// (endpoints included) gains one.
pub fn path_betweenness(weights: &Matrix<Weight>) -> Vec<u64> {
    let n = weights.size();
    let paths = ShortestPaths::compute(weights);
    let mut scores = vec![0u64; n];

    for from in 0..n {
        for to in 0..n {
            let edges = paths.path(from, to);
            if edges.is_empty() {
                continue;
            }
            let mut on_path = vec![false; n];
            for (a, b) in edges {
                on_path[a] = true;
                on_path[b] = true;
            }
            for (score, hit) in scores.iter_mut().zip(on_path) {
                if hit {
                    *score += 1;
                }
            }
        }
    }

    scores
}

/// For every ordered pair with a path, each edge adds its weight to both
/// of its endpoints.
pub fn weighted_path_betweenness(weights: &Matrix<Weight>) -> Vec<f64> {
    let n = weights.size();
    let paths = ShortestPaths::compute(weights);
    let mut scores = vec![0.0; n];

    for from in 0..n {
        for to in 0..n {
            for (a, b) in paths.path(from, to) {
                let w = weights.get(a, b).finite().unwrap_or(0.0);
                scores[a] += w;
                scores[b] += w;
            }
        }
    }

    scores
}
