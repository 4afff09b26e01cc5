use std::path::Path;

use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{Movie, MovieId};

#[derive(Debug, Deserialize)]
struct SampleRecord {
    #[serde(rename = "MovieID")]
    movie_id: u32,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Genres")]
    genres: String,
}

/// Loads the fixed set of movies offered for rating
/// (`MovieID,Title,Genres` CSV; extra columns are ignored)
pub fn load_sample_movies(path: &Path) -> AppResult<Vec<Movie>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut movies = Vec::new();
    for record in reader.deserialize() {
        let record: SampleRecord = record?;
        movies.push(Movie {
            id: MovieId(record.movie_id),
            title: record.title,
            genres: record.genres,
        });
    }

    tracing::info!(movies = movies.len(), path = %path.display(), "Sample movies loaded");
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MovieID,Title,Genres,Rating").unwrap();
        writeln!(file, "1,Toy Story (1995),Animation|Children's|Comedy,4").unwrap();
        writeln!(file, "1210,Star Wars: Episode VI (1983),Action|Adventure,5").unwrap();

        let movies = load_sample_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, MovieId(1));
        assert_eq!(movies[0].title, "Toy Story (1995)");
        // the trailing Rating column is display seed data and is dropped
        assert_eq!(movies[1].genres, "Action|Adventure");
    }

    #[test]
    fn test_empty_samples_are_allowed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MovieID,Title,Genres").unwrap();

        let movies = load_sample_movies(file.path()).unwrap();
        assert!(movies.is_empty());
    }
}
