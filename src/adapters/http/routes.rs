//! HTTP routes for the profile API.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{get_profile, merge_profile, refine_profile, reset_profile, ProfileHandlers};

/// Builds the profile router with tracing, CORS, and request timeouts.
pub fn profile_routes(handlers: ProfileHandlers, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/profile/merge", post(merge_profile))
        .route("/api/profile/refine", post(refine_profile))
        .route(
            "/api/profile/:user_id",
            get(get_profile).delete(reset_profile),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(handlers)
}
