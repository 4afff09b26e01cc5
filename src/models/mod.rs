use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Identifier for a movie, stable across the catalog and the similarity matrix
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub u32);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry: title plus pipe-separated genres, MovieLens style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genres: String,
}

impl Movie {
    /// Genres split out of the MovieLens `A|B|C` encoding
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres.split('|').filter(|g| !g.is_empty()).collect()
    }
}

/// A user score for a movie, valid range 1..=5
///
/// Zero is not a rating: at the API boundary it means "remove this rating"
/// and never reaches the engine.
pub type RatingValue = u8;

/// Highest rating a user can give
pub const MAX_RATING: RatingValue = 5;

/// A candidate movie with its predicted score
///
/// Candidates with an undefined prediction (no rated neighbors, or a zero
/// similarity mass) are dropped before ranking, so a `ScoredCandidate`
/// always carries a finite score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub movie_id: MovieId,
    pub score: f64,
}

/// A ranked recommendation joined with catalog metadata for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    pub score: f64,
}

/// One entry of a session's rating list, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub rating: RatingValue,
}

/// Session metadata returned to the client on creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub capacity: usize,
    pub created_at: DateTime<Utc>,
}
