//! The recommendation engine: bounded rating storage, the similarity
//! matrix, and IBCF scoring. Nothing in here does I/O; loaders live in
//! [`crate::data`] and the HTTP surface in [`crate::api`].

pub mod ibcf;
pub mod matrix;
pub mod store;

pub use matrix::SimilarityMatrix;
pub use store::RatingStore;
