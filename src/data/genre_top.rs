use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::MovieId;

#[derive(Debug, Deserialize)]
struct GenreTopRecord {
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "MovieID")]
    movie_id: u32,
}

/// Precomputed top movies per genre.
///
/// This is the static, non-personalized recommendation path: a plain
/// lookup that never touches the IBCF engine. File order within a genre is
/// the rank order.
#[derive(Debug)]
pub struct GenreTopList {
    /// Genres in first-seen file order
    genres: Vec<String>,
    by_genre: HashMap<String, Vec<MovieId>>,
}

impl GenreTopList {
    /// Builds the lists from `(genre, movie)` entries in rank order.
    /// An empty list is malformed input and fails.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, MovieId)>) -> AppResult<Self> {
        let mut genres = Vec::new();
        let mut by_genre: HashMap<String, Vec<MovieId>> = HashMap::new();

        for (genre, movie_id) in entries {
            let entry = by_genre.entry(genre.clone()).or_insert_with(|| {
                genres.push(genre);
                Vec::new()
            });
            entry.push(movie_id);
        }

        if by_genre.is_empty() {
            return Err(AppError::Configuration(
                "genre top list is empty".to_string(),
            ));
        }

        Ok(Self { genres, by_genre })
    }

    /// Loads a `Genre,MovieID` CSV
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut reader = csv::Reader::from_path(path)?;

        let mut entries = Vec::new();
        for record in reader.deserialize() {
            let record: GenreTopRecord = record?;
            entries.push((record.genre, MovieId(record.movie_id)));
        }

        let lists = Self::from_entries(entries)?;
        tracing::info!(genres = lists.genres.len(), path = %path.display(), "Genre top lists loaded");
        Ok(lists)
    }

    /// Known genres, in file order
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Ranked movie ids for a genre, or `None` for an unknown genre
    pub fn top_for(&self, genre: &str) -> Option<&[MovieId]> {
        self.by_genre.get(genre).map(Vec::as_slice)
    }
}
