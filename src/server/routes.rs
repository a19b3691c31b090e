//! Request handlers.
//!
//! Validation failures map to 400, missing records to 404, and a
//! duplicate diet entry is a soft success (200 with its own message),
//! mirroring what the browser client expects. Storage faults are
//! logged and surface as 500.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::{DietSaveOutcome, ProfileSaveOutcome, RepoError};
use crate::models::{DietEntry, FeedbackEntry, ProfileInput};

use super::AppState;

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

fn message(text: &'static str) -> Response {
    (StatusCode::OK, Json(MessageBody { message: text })).into_response()
}

fn error(status: StatusCode, text: &'static str) -> Response {
    (status, Json(ErrorBody { error: text })).into_response()
}

fn storage_fault(err: &RepoError) -> Response {
    tracing::error!("Storage failure: {}", err);
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
}

pub async fn root() -> &'static str {
    "Fitness App Backend is Running!"
}

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn save_profile(
    State(state): State<AppState>,
    Json(input): Json<ProfileInput>,
) -> Response {
    match state.profiles.save(&input) {
        Ok(ProfileSaveOutcome::Created) => message("Profile saved successfully."),
        Ok(ProfileSaveOutcome::Updated) => message("Profile updated successfully."),
        Err(RepoError::Validation(_)) => {
            error(StatusCode::BAD_REQUEST, "Username is required.")
        }
        Err(e) => storage_fault(&e),
    }
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    match state.profiles.get(&username) {
        Ok(profile) => Json(profile).into_response(),
        Err(RepoError::NotFound) => error(StatusCode::NOT_FOUND, "User not found."),
        Err(e) => storage_fault(&e),
    }
}

pub async fn save_diet(State(state): State<AppState>, Json(entry): Json<DietEntry>) -> Response {
    match state.diets.save(&entry) {
        Ok(DietSaveOutcome::Created) => message("Diet saved successfully"),
        Ok(DietSaveOutcome::Duplicate) => message("Entry already exists"),
        Err(RepoError::Validation(_)) => error(StatusCode::BAD_REQUEST, "Invalid diet data"),
        Err(e) => storage_fault(&e),
    }
}

pub async fn save_feedback(
    State(state): State<AppState>,
    Json(entry): Json<FeedbackEntry>,
) -> Response {
    match state.feedback.save(&entry) {
        Ok(()) => message("Feedback saved successfully."),
        Err(RepoError::Validation(_)) => {
            error(StatusCode::BAD_REQUEST, "Missing required fields.")
        }
        Err(e) => storage_fault(&e),
    }
}

pub async fn get_feedback(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    match state.feedback.today(&username) {
        Ok(summaries) => Json(summaries).into_response(),
        Err(RepoError::NotFound) => error(
            StatusCode::NOT_FOUND,
            "No feedback found for this user today.",
        ),
        Err(e) => storage_fault(&e),
    }
}

/// Body of a recommendation request; only the username is forwarded.
#[derive(Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub username: String,
}

pub async fn get_diet(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Response {
    match state.recommender.diet(&request.username).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!("Diet recommendation failed: {}", e);
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch diet recommendation.",
            )
        }
    }
}

pub async fn get_workout(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Response {
    match state.recommender.workout(&request.username).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!("Workout recommendation failed: {}", e);
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch workout recommendation.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DietRepository, FeedbackRepository, ProfileRepository};
    use crate::models::{DIET_COLUMNS, FEEDBACK_COLUMNS, PROFILE_COLUMNS};
    use crate::server::{app, RecommendClient};
    use crate::store::Table;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use chrono::Utc;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        let state = AppState {
            profiles: Arc::new(ProfileRepository::new(
                Table::open(dir.join("profile.csv"), PROFILE_COLUMNS).unwrap(),
            )),
            diets: Arc::new(DietRepository::new(
                Table::open(dir.join("diet_logs.csv"), DIET_COLUMNS).unwrap(),
            )),
            feedback: Arc::new(FeedbackRepository::new(
                Table::open(dir.join("feedback_logs.csv"), FEEDBACK_COLUMNS).unwrap(),
            )),
            // Nothing listens on port 1; proxy calls fail fast.
            recommender: Arc::new(RecommendClient::new("http://127.0.0.1:1")),
        };

        (app(state), temp_dir)
    }

    async fn post_json(
        router: &Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }

    async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(router, request).await
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (router, _temp) = test_app();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Fitness App Backend is Running!");
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _temp) = test_app();

        let (status, body) = get_json(&router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_profile_save_and_get_roundtrip() {
        let (router, _temp) = test_app();

        let (status, body) = post_json(
            &router,
            "/api/save-profile",
            serde_json::json!({"username": "alice", "name": "Alice"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Profile saved successfully.");

        // Username lookup is case-insensitive.
        let (status, body) = get_json(&router, "/api/get-profile/ALICE").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["age"], "");
    }

    #[tokio::test]
    async fn test_profile_second_save_updates() {
        let (router, _temp) = test_app();

        post_json(
            &router,
            "/api/save-profile",
            serde_json::json!({"username": "alice", "name": "Alice"}),
        )
        .await;
        let (status, body) = post_json(
            &router,
            "/api/save-profile",
            serde_json::json!({"username": "alice", "age": 30}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Profile updated successfully.");

        let (_, body) = get_json(&router, "/api/get-profile/alice").await;
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["age"], "30");
    }

    #[tokio::test]
    async fn test_profile_save_without_username_rejected() {
        let (router, _temp) = test_app();

        let (status, body) = post_json(
            &router,
            "/api/save-profile",
            serde_json::json!({"name": "Alice"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username is required.");
    }

    #[tokio::test]
    async fn test_profile_restrictions_returned_as_array() {
        let (router, _temp) = test_app();

        post_json(
            &router,
            "/api/save-profile",
            serde_json::json!({"username": "alice", "dietary_restrictions": ["vegan", "no nuts"]}),
        )
        .await;

        let (_, body) = get_json(&router, "/api/get-profile/alice").await;
        assert_eq!(
            body["dietary_restrictions"],
            serde_json::json!(["vegan", "no nuts"])
        );
    }

    #[tokio::test]
    async fn test_unknown_profile_not_found() {
        let (router, _temp) = test_app();

        let (status, body) = get_json(&router, "/api/get-profile/nobody").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found.");
    }

    #[tokio::test]
    async fn test_diet_save_and_duplicate() {
        let (router, _temp) = test_app();

        let entry = serde_json::json!({
            "username": "alice",
            "date": "2024-06-01",
            "meal_type": "breakfast",
            "calories": 500,
            "fooditem": ["oats"]
        });

        let (status, body) = post_json(&router, "/api/save-diet", entry.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Diet saved successfully");

        let (status, body) = post_json(&router, "/api/save-diet", entry).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Entry already exists");
    }

    #[tokio::test]
    async fn test_diet_missing_fields_rejected() {
        let (router, _temp) = test_app();

        let (status, body) = post_json(
            &router,
            "/api/save-diet",
            serde_json::json!({"username": "alice", "meal_type": "lunch"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid diet data");
    }

    #[tokio::test]
    async fn test_feedback_save_and_fetch_today() {
        let (router, _temp) = test_app();
        let today = Utc::now().format("%Y-%m-%d").to_string();

        let (status, body) = post_json(
            &router,
            "/api/save-feedback",
            serde_json::json!({
                "username": "alice",
                "date": today,
                "exercise_name": "squat",
                "category": "legs",
                "actual_reps": 8
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Feedback saved successfully.");

        let (status, body) = get_json(&router, "/api/get-feedback/alice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([{"category": "legs", "exercise_name": "squat"}])
        );
    }

    #[tokio::test]
    async fn test_feedback_missing_fields_rejected() {
        let (router, _temp) = test_app();

        let (status, body) = post_json(
            &router,
            "/api/save-feedback",
            serde_json::json!({"username": "alice"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields.");
    }

    #[tokio::test]
    async fn test_feedback_none_today_not_found() {
        let (router, _temp) = test_app();

        let (status, body) = get_json(&router, "/api/get-feedback/alice").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No feedback found for this user today.");
    }

    #[tokio::test]
    async fn test_recommendation_proxy_failure_is_upstream_error() {
        let (router, _temp) = test_app();

        let (status, body) = post_json(
            &router,
            "/api/get-diet",
            serde_json::json!({"username": "alice"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch diet recommendation.");

        let (status, body) = post_json(
            &router,
            "/api/get-workout",
            serde_json::json!({"username": "alice"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch workout recommendation.");
    }
}
