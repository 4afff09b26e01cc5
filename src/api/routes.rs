use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Static genre top lists (no IBCF involved)
        .route("/genres", get(handlers::get_genres))
        .route("/genres/:genre/top", get(handlers::get_genre_top))
        // Movies offered for rating
        .route("/movies/samples", get(handlers::get_samples))
        // Rating sessions
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/:session_id", delete(handlers::delete_session))
        .route(
            "/sessions/:session_id/ratings",
            get(handlers::get_ratings)
                .post(handlers::set_rating)
                .delete(handlers::clear_ratings),
        )
        // Personalized recommendations
        .route(
            "/sessions/:session_id/recommendations",
            get(handlers::get_recommendations),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
