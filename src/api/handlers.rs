use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Movie, MovieId, RatedMovie, Recommendation, RatingValue, SessionInfo};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SetRatingRequest {
    pub movie_id: MovieId,
    /// 1..=5 rates the movie, 0 removes an existing rating
    pub rating: RatingValue,
}

#[derive(Debug, Serialize)]
pub struct RatingsSummary {
    pub rated: usize,
    pub capacity: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub top_n: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// List the genres a top list exists for
pub async fn get_genres(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.genre_top.genres().to_vec())
}

/// Precomputed top movies for one genre, joined with catalog metadata.
/// This path never runs the IBCF engine.
pub async fn get_genre_top(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    let movie_ids = state
        .genre_top
        .top_for(&genre)
        .ok_or_else(|| AppError::NotFound(format!("no top list for genre {:?}", genre)))?;

    let movies: Vec<Movie> = movie_ids
        .iter()
        .filter_map(|&id| state.catalog.get(id).cloned())
        .collect();

    Ok(Json(movies))
}

/// The fixed set of movies offered for rating
pub async fn get_samples(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.samples.as_ref().clone())
}

/// Opens a new rating session
pub async fn create_session(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<SessionInfo>)> {
    let info = state.create_session().await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// Discards a session and everything it rated
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.remove_session(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rates a movie (or removes a rating with 0) within a session
pub async fn set_rating(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetRatingRequest>,
) -> AppResult<Json<RatingsSummary>> {
    if state.catalog.get(request.movie_id).is_none() {
        return Err(AppError::NotFound(format!(
            "movie {} is not in the catalog",
            request.movie_id
        )));
    }

    let session = state.session(session_id).await?;
    let mut store = session.store.write().await;
    store.set(request.movie_id, request.rating)?;

    Ok(Json(RatingsSummary {
        rated: store.len(),
        capacity: store.capacity(),
    }))
}

/// Lists a session's ratings, newest first
pub async fn get_ratings(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<Vec<RatedMovie>>> {
    let session = state.session(session_id).await?;
    let store = session.store.read().await;

    let ratings: Vec<RatedMovie> = store
        .iter()
        .filter_map(|(movie_id, rating)| {
            state.catalog.get(movie_id).map(|movie| RatedMovie {
                movie_id,
                title: movie.title.clone(),
                rating,
            })
        })
        .collect();

    Ok(Json(ratings))
}

/// Drops every rating in a session
pub async fn clear_ratings(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let session = state.session(session_id).await?;
    session.store.write().await.clear();
    Ok(StatusCode::NO_CONTENT)
}

/// Personalized recommendations for a session's ratings
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let session = state.session(session_id).await?;
    let store = session.store.read().await;

    let recommendations = state.recommender.recommend(&store, params.top_n)?;
    Ok(Json(recommendations))
}
