use std::sync::Arc;

use crate::data::Catalog;
use crate::engine::{ibcf, RatingStore, SimilarityMatrix};
use crate::error::{AppError, AppResult};
use crate::models::Recommendation;

/// Wires the rating store, similarity matrix and IBCF scoring together.
///
/// This is the only entry point callers use for personalized
/// recommendations: it enforces the minimum-ratings gate, snapshots the
/// store, runs the engine over the matrix and joins the ranked result with
/// catalog metadata. The genre top-list path bypasses this entirely.
pub struct Recommender {
    matrix: Arc<SimilarityMatrix>,
    catalog: Arc<Catalog>,
    min_ratings: usize,
    default_top_n: usize,
}

impl Recommender {
    pub fn new(
        matrix: Arc<SimilarityMatrix>,
        catalog: Arc<Catalog>,
        min_ratings: usize,
        default_top_n: usize,
    ) -> Self {
        Self {
            matrix,
            catalog,
            min_ratings,
            default_top_n,
        }
    }

    pub fn min_ratings(&self) -> usize {
        self.min_ratings
    }

    /// Produces the Top-N recommendations for a session's ratings.
    ///
    /// Fails with `InsufficientRatings` until the store holds at least the
    /// configured minimum. Ranked movies missing from the catalog cannot be
    /// displayed and are dropped after ranking, matching the inner join in
    /// the rendering path.
    pub fn recommend(
        &self,
        store: &RatingStore,
        top_n: Option<usize>,
    ) -> AppResult<Vec<Recommendation>> {
        if store.len() < self.min_ratings {
            return Err(AppError::InsufficientRatings {
                rated: store.len(),
                required: self.min_ratings,
            });
        }

        let top_n = top_n.unwrap_or(self.default_top_n);
        let ratings = store.snapshot();

        let scored = ibcf::predict_scores(&self.matrix, &ratings)?;
        let ranked = ibcf::rank_top_n(scored, top_n);

        let mut recommendations = Vec::with_capacity(ranked.len());
        for candidate in ranked {
            match self.catalog.get(candidate.movie_id) {
                Some(movie) => recommendations.push(Recommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    genres: movie.genres.clone(),
                    score: candidate.score,
                }),
                None => {
                    tracing::warn!(
                        movie_id = %candidate.movie_id,
                        "Ranked movie missing from catalog, dropping"
                    );
                }
            }
        }

        tracing::info!(
            rated = ratings.len(),
            returned = recommendations.len(),
            top_n,
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}
