//! Item-based collaborative filtering.
//!
//! Each candidate movie is scored as the similarity-weighted average of the
//! user's ratings over the candidate's rated neighbors:
//!
//! ```text
//! score(m) = sum(sim(m, j) * rating(j)) / sum(sim(m, j))   for rated j
//! ```
//!
//! A candidate with no rated neighbors, or whose similarity mass sums to
//! exactly zero, has no defined prediction and is excluded from ranking
//! rather than treated as a low score. Movies the user already rated are
//! never recommended.

use std::collections::HashMap;

use crate::engine::SimilarityMatrix;
use crate::error::{AppError, AppResult};
use crate::models::{MovieId, RatingValue, ScoredCandidate, MAX_RATING};

/// Scores every candidate in the matrix universe against a rating vector.
///
/// Returns only candidates with a defined prediction, in no particular
/// order; use [`rank_top_n`] to produce the final ranking. An empty rating
/// vector yields an empty list. Rating values outside 1..=5 are a contract
/// violation and fail with `InvalidRating`.
pub fn predict_scores(
    matrix: &SimilarityMatrix,
    ratings: &HashMap<MovieId, RatingValue>,
) -> AppResult<Vec<ScoredCandidate>> {
    for (&movie_id, &rating) in ratings {
        if rating == 0 || rating > MAX_RATING {
            return Err(AppError::InvalidRating(format!(
                "rating {} for movie {} is outside 1..={}",
                rating, movie_id, MAX_RATING
            )));
        }
    }

    if ratings.is_empty() {
        return Ok(Vec::new());
    }

    let mut scored = Vec::new();

    for candidate in matrix.universe() {
        // Already-rated movies are never recommended
        if ratings.contains_key(&candidate) {
            continue;
        }

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut rated_neighbors = 0usize;

        for (neighbor, similarity) in matrix.neighbors_of(candidate) {
            if let Some(&rating) = ratings.get(&neighbor) {
                numerator += similarity * f64::from(rating);
                denominator += similarity;
                rated_neighbors += 1;
            }
        }

        // No rated neighbors, or similarities cancelling to zero mass:
        // the prediction is undefined, not zero
        if rated_neighbors == 0 || denominator == 0.0 {
            continue;
        }

        let score = numerator / denominator;
        // A matrix carrying non-finite similarities cannot produce a
        // ranked candidate; undefined stays undefined
        if !score.is_finite() {
            continue;
        }

        scored.push(ScoredCandidate {
            movie_id: candidate,
            score,
        });
    }

    Ok(scored)
}

/// Ranks candidates descending by score, ties broken by ascending movie id,
/// truncated to the top `n`
pub fn rank_top_n(mut candidates: Vec<ScoredCandidate>, n: usize) -> Vec<ScoredCandidate> {
    candidates.sort_unstable_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    candidates.truncate(n);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<(u32, Vec<(u32, f64)>)>) -> SimilarityMatrix {
        let rows = rows
            .into_iter()
            .map(|(id, neighbors)| {
                (
                    MovieId(id),
                    neighbors
                        .into_iter()
                        .map(|(n, s)| (MovieId(n), s))
                        .collect(),
                )
            })
            .collect();
        SimilarityMatrix::new(rows).unwrap()
    }

    fn ratings(pairs: &[(u32, u8)]) -> HashMap<MovieId, RatingValue> {
        pairs.iter().map(|&(id, r)| (MovieId(id), r)).collect()
    }

    #[test]
    fn test_weighted_average_example() {
        // score(10) = (0.8*5 + 0.2*1) / (0.8 + 0.2) = 4.2
        let m = matrix(vec![(10, vec![(1, 0.8), (2, 0.2)])]);
        let w = ratings(&[(1, 5), (2, 1)]);

        let scored = predict_scores(&m, &w).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].movie_id, MovieId(10));
        assert!((scored[0].score - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_already_rated_candidate_is_excluded() {
        let m = matrix(vec![(10, vec![(1, 0.8), (2, 0.2)])]);
        let w = ratings(&[(1, 5), (2, 1), (10, 3)]);

        let scored = predict_scores(&m, &w).unwrap();
        assert!(scored.iter().all(|c| c.movie_id != MovieId(10)));
    }

    #[test]
    fn test_candidate_without_rated_neighbors_is_excluded() {
        let m = matrix(vec![
            (10, vec![(1, 0.8)]),
            (11, vec![(99, 0.9)]), // neighbor never rated
            (12, vec![]),
        ]);
        let w = ratings(&[(1, 5)]);

        let scored = predict_scores(&m, &w).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].movie_id, MovieId(10));
    }

    #[test]
    fn test_zero_similarity_mass_is_excluded() {
        // 0.5 and -0.5 cancel exactly, leaving no defined prediction
        let m = matrix(vec![(10, vec![(1, 0.5), (2, -0.5)])]);
        let w = ratings(&[(1, 4), (2, 2)]);

        let scored = predict_scores(&m, &w).unwrap();
        assert!(scored.is_empty());
    }

    #[test]
    fn test_explicit_zero_similarity_still_counts_toward_mass() {
        // A present-but-zero similarity widens the mask without adding weight:
        // score = (0.5*4 + 0.0*2) / (0.5 + 0.0) = 4.0
        let m = matrix(vec![(10, vec![(1, 0.5), (2, 0.0)])]);
        let w = ratings(&[(1, 4), (2, 2)]);

        let scored = predict_scores(&m, &w).unwrap();
        assert_eq!(scored.len(), 1);
        assert!((scored[0].score - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_similarity_never_ranks() {
        let m = matrix(vec![
            (10, vec![(1, 0.8), (2, 0.2)]),
            (11, vec![(1, f64::NAN)]),
        ]);
        let w = ratings(&[(1, 5), (2, 1)]);

        let ranked = rank_top_n(predict_scores(&m, &w).unwrap(), 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].movie_id, MovieId(10));
        assert!((ranked[0].score - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_empty_rating_vector_yields_empty_list() {
        let m = matrix(vec![(10, vec![(1, 0.8)])]);
        let scored = predict_scores(&m, &HashMap::new()).unwrap();
        assert!(scored.is_empty());
    }

    #[test]
    fn test_out_of_range_ratings_rejected() {
        let m = matrix(vec![(10, vec![(1, 0.8)])]);

        let result = predict_scores(&m, &ratings(&[(1, 6)]));
        assert!(matches!(result, Err(AppError::InvalidRating(_))));

        // zero is "not rated", never a valid entry of the vector
        let result = predict_scores(&m, &ratings(&[(1, 0)]));
        assert!(matches!(result, Err(AppError::InvalidRating(_))));
    }

    #[test]
    fn test_rank_orders_descending_with_id_tiebreak() {
        let candidates = vec![
            ScoredCandidate {
                movie_id: MovieId(7),
                score: 3.0,
            },
            ScoredCandidate {
                movie_id: MovieId(3),
                score: 4.5,
            },
            ScoredCandidate {
                movie_id: MovieId(5),
                score: 3.0,
            },
            ScoredCandidate {
                movie_id: MovieId(4),
                score: 4.5,
            },
        ];

        let ranked = rank_top_n(candidates, 10);
        let order: Vec<u32> = ranked.iter().map(|c| c.movie_id.0).collect();
        assert_eq!(order, vec![3, 4, 5, 7]);
    }

    #[test]
    fn test_rank_truncates_to_n() {
        let candidates: Vec<ScoredCandidate> = (1..=10u32)
            .map(|id| ScoredCandidate {
                movie_id: MovieId(id),
                score: f64::from(id),
            })
            .collect();

        let ranked = rank_top_n(candidates, 3);
        let order: Vec<u32> = ranked.iter().map(|c| c.movie_id.0).collect();
        assert_eq!(order, vec![10, 9, 8]);
    }

    #[test]
    fn test_identical_inputs_rank_identically() {
        let m = matrix(vec![
            (10, vec![(1, 0.8), (2, 0.2)]),
            (11, vec![(1, 0.4), (2, 0.4)]),
            (12, vec![(2, 0.9)]),
        ]);
        let w = ratings(&[(1, 5), (2, 3)]);

        let first = rank_top_n(predict_scores(&m, &w).unwrap(), 10);
        let second = rank_top_n(predict_scores(&m, &w).unwrap(), 10);
        assert_eq!(first, second);
    }
}
