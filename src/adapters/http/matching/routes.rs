//! Axum router configuration for matching endpoints.
//!
//! This module defines the route structure for the matching API and wires
//! the routes to their handlers.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    find_matches, get_advice, health, list_mentors, list_traits, record_feedback,
    refresh_mentors, MatchingAppState,
};

/// Create the matching API router.
///
/// # Routes
/// - `POST /matches` - Rank mentors for trait selections
/// - `POST /matches/feedback` - Record the user's pick (202 Accepted)
/// - `POST /advice` - Advice for the gap to one mentor
/// - `GET /traits` - Selectable traits
/// - `GET /mentors` - Current mentor pool
/// - `POST /mentors/refresh` - Invalidate and reload the mentor pool
pub fn matching_routes() -> Router<MatchingAppState> {
    Router::new()
        .route("/matches", post(find_matches))
        .route("/matches/feedback", post(record_feedback))
        .route("/advice", post(get_advice))
        .route("/traits", get(list_traits))
        .route("/mentors", get(list_mentors))
        .route("/mentors/refresh", post(refresh_mentors))
}

/// Create the complete service router.
///
/// Mounts the matching API at `/api` and the liveness probe at `/health`,
/// with request tracing and a per-request timeout.
///
/// # Example
///
/// ```ignore
/// let app = matching_router(state, Duration::from_secs(30));
/// let listener = tokio::net::TcpListener::bind(addr).await?;
/// axum::serve(listener, app).await?;
/// ```
pub fn matching_router(state: MatchingAppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api", matching_routes())
        .route("/health", get(health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
