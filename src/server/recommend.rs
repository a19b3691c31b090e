//! Client for the external ML recommendation service.
//!
//! Diet and workout suggestions are produced by a separate service;
//! this client forwards the username and relays the response body
//! untouched. No retry, no fallback.

use serde_json::Value;

/// Errors reaching the recommendation service.
#[derive(Debug)]
pub enum RecommendError {
    /// Transport-level failure (connect, timeout, malformed body).
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Status(reqwest::StatusCode),
}

impl std::fmt::Display for RecommendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendError::Transport(e) => write!(f, "Request failed: {}", e),
            RecommendError::Status(status) => {
                write!(f, "Recommendation service returned status {}", status)
            }
        }
    }
}

impl std::error::Error for RecommendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecommendError::Transport(e) => Some(e),
            RecommendError::Status(_) => None,
        }
    }
}

/// HTTP client for the recommendation service.
pub struct RecommendClient {
    base_url: String,
    client: reqwest::Client,
}

impl RecommendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Requests a diet recommendation for `username`.
    pub async fn diet(&self, username: &str) -> Result<Value, RecommendError> {
        self.post("recommend-diet", username).await
    }

    /// Requests a workout recommendation for `username`.
    pub async fn workout(&self, username: &str) -> Result<Value, RecommendError> {
        self.post("recommend-workout", username).await
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    async fn post(&self, endpoint: &str, username: &str) -> Result<Value, RecommendError> {
        let response = self
            .client
            .post(self.endpoint_url(endpoint))
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .map_err(RecommendError::Transport)?;

        if !response.status().is_success() {
            return Err(RecommendError::Status(response.status()));
        }

        response.json().await.map_err(RecommendError::Transport)
    }
}
