use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinerec_api::api::{create_router, AppState};
use cinerec_api::config::Config;
use cinerec_api::data::{load_sample_movies, load_similarity_matrix, Catalog, GenreTopList};
use cinerec_api::services::Recommender;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Immutable datasets, loaded once and shared across all sessions
    let catalog = Arc::new(Catalog::load(Path::new(&config.movies_path))?);
    let matrix = Arc::new(load_similarity_matrix(Path::new(&config.similarity_path))?);
    let genre_top = Arc::new(GenreTopList::load(Path::new(&config.genre_top_path))?);
    let samples = Arc::new(load_sample_movies(Path::new(&config.samples_path))?);

    let recommender = Arc::new(Recommender::new(
        matrix,
        catalog.clone(),
        config.min_ratings,
        config.top_n,
    ));

    let state = AppState::new(
        catalog,
        genre_top,
        samples,
        recommender,
        config.rating_capacity,
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
