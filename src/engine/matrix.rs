use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::MovieId;

/// Read-only table of precomputed pairwise movie similarities.
///
/// A missing entry means "unknown similarity", which is deliberately
/// distinct from a similarity of zero: unknown pairs contribute nothing to
/// a prediction, while an explicit zero still counts toward the similarity
/// mass. The matrix is immutable after construction and safe to share
/// across sessions without locking.
#[derive(Debug)]
pub struct SimilarityMatrix {
    rows: HashMap<MovieId, Vec<(MovieId, f64)>>,
}

impl SimilarityMatrix {
    /// Builds a matrix from per-movie neighbor lists.
    ///
    /// Every key of `rows` is a candidate in the movie universe, including
    /// movies whose neighbor list is empty. An empty universe is malformed
    /// input and fails.
    pub fn new(rows: HashMap<MovieId, Vec<(MovieId, f64)>>) -> AppResult<Self> {
        if rows.is_empty() {
            return Err(AppError::Configuration(
                "similarity matrix has an empty movie universe".to_string(),
            ));
        }
        Ok(Self { rows })
    }

    /// Similarity between two movies, or `None` when no precomputed value
    /// exists for the pair
    pub fn similarity(&self, a: MovieId, b: MovieId) -> Option<f64> {
        self.rows
            .get(&a)?
            .iter()
            .find(|(neighbor, _)| *neighbor == b)
            .map(|&(_, sim)| sim)
    }

    /// All neighbors of `movie_id` with a defined similarity
    pub fn neighbors_of(&self, movie_id: MovieId) -> impl Iterator<Item = (MovieId, f64)> + '_ {
        self.rows
            .get(&movie_id)
            .into_iter()
            .flat_map(|row| row.iter().copied())
    }

    /// Every movie the matrix can produce a prediction for
    pub fn universe(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.rows.keys().copied()
    }

    /// Size of the movie universe
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
