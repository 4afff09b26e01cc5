//! One-time dataset loading. Everything loaded here is immutable for the
//! lifetime of the process and shared read-only across sessions.

pub mod catalog;
pub mod genre_top;
pub mod samples;
pub mod similarity;

pub use catalog::Catalog;
pub use genre_top::GenreTopList;
pub use samples::load_sample_movies;
pub use similarity::load_similarity_matrix;
