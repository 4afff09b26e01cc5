use std::collections::HashMap;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::{Movie, MovieId};

/// In-memory movie catalog, loaded once and shared read-only.
///
/// Supplies the title/genre metadata joined onto recommendation results.
/// The engine itself never looks at these fields.
#[derive(Debug)]
pub struct Catalog {
    movies: HashMap<MovieId, Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: movies.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    /// Loads a MovieLens `movies.dat` file (`MovieID::Title::Genres`,
    /// Latin-1 encoded)
    pub fn load(path: &Path) -> AppResult<Self> {
        let bytes = std::fs::read(path)?;
        let text = latin1_to_string(&bytes);

        let mut movies = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.splitn(3, "::");
            let (id, title, genres) = match (fields.next(), fields.next(), fields.next()) {
                (Some(id), Some(title), Some(genres)) => (id, title, genres),
                _ => {
                    return Err(AppError::Configuration(format!(
                        "{}:{}: expected MovieID::Title::Genres",
                        path.display(),
                        line_no + 1
                    )))
                }
            };

            let id: u32 = id.parse().map_err(|_| {
                AppError::Configuration(format!(
                    "{}:{}: invalid movie id {:?}",
                    path.display(),
                    line_no + 1,
                    id
                ))
            })?;

            movies.push(Movie {
                id: MovieId(id),
                title: title.to_string(),
                genres: genres.to_string(),
            });
        }

        tracing::info!(movies = movies.len(), path = %path.display(), "Catalog loaded");
        Ok(Self::new(movies))
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movies.get(&movie_id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Latin-1 bytes map one-to-one onto the first 256 Unicode scalars
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
