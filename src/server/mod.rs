//! HTTP surface for the fitlog backend.
//!
//! # Endpoints
//!
//! - `GET  /`: liveness banner (no JSON)
//! - `GET  /health`: health check
//! - `POST /api/save-profile`, `GET /api/get-profile/{username}`
//! - `POST /api/save-diet`
//! - `POST /api/save-feedback`, `GET /api/get-feedback/{username}`
//! - `POST /api/get-diet`, `POST /api/get-workout`: proxied verbatim
//!   to the external recommendation service

pub mod recommend;
pub mod routes;

pub use recommend::{RecommendClient, RecommendError};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::{DietRepository, FeedbackRepository, ProfileRepository};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<ProfileRepository>,
    pub diets: Arc<DietRepository>,
    pub feedback: Arc<FeedbackRepository>,
    pub recommender: Arc<RecommendClient>,
}

/// Builds the application router.
///
/// The browser client is served from another origin, so CORS is left
/// permissive.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/save-profile", post(routes::save_profile))
        .route("/get-profile/{username}", get(routes::get_profile))
        .route("/save-diet", post(routes::save_diet))
        .route("/save-feedback", post(routes::save_feedback))
        .route("/get-feedback/{username}", get(routes::get_feedback))
        .route("/get-diet", post(routes::get_diet))
        .route("/get-workout", post(routes::get_workout));

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
