//! Movie recommendation service.
//!
//! Serves two recommendation strategies over HTTP: static per-genre top
//! lists and item-based collaborative filtering (IBCF) over a precomputed
//! movie-movie similarity matrix, fed by a capacity-bounded, LRU-evicting
//! per-session rating store.

pub mod api;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
