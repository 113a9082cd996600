//! The v1 JSON API: ask, reset and history for one dialogue session.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use munglog_agent::DialogueController;
use munglog_core::error::Error;
use munglog_memory::Turn;

/// Shared state for the v1 API.
pub struct ApiV1State {
    pub controller: Arc<DialogueController>,
}

pub type SharedApiState = Arc<ApiV1State>;

/// Build the v1 API router (mounted under `/v1`).
pub fn v1_router(state: SharedApiState) -> Router {
    Router::new()
        .route("/ask", post(ask_handler))
        .route("/reset", post(reset_handler))
        .route("/history", get(history_handler))
        .with_state(state)
}

// --- DTOs ---

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub refused: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a controller error to a status and a body safe to show end users.
///
/// Remote failures never leak provider details and never look like the refusal.
fn error_response(err: &Error) -> ApiError {
    let (status, message) = match err {
        Error::EmptyInput => (StatusCode::BAD_REQUEST, "Question must not be empty."),
        Error::Timeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            "The assistant took too long to answer. Please try again.",
        ),
        Error::Provider(_) => (
            StatusCode::BAD_GATEWAY,
            "The assistant could not answer right now. Please try again.",
        ),
    };
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// --- Handlers ---

async fn ask_handler(
    State(state): State<SharedApiState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    info!(question_chars = req.question.chars().count(), "Ask request received");

    match state.controller.respond(&req.question).await {
        Ok(answer) => Ok(Json(AskResponse {
            answer: answer.text,
            refused: answer.refused,
        })),
        Err(e) => {
            if e.is_remote_failure() {
                warn!(error = %e, "Ask failed upstream");
            }
            Err(error_response(&e))
        }
    }
}

async fn reset_handler(State(state): State<SharedApiState>) -> StatusCode {
    state.controller.reset().await;
    StatusCode::NO_CONTENT
}

async fn history_handler(State(state): State<SharedApiState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        turns: state.controller.history().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use munglog_core::error::ProviderError;

    #[test]
    fn errors_map_to_distinct_statuses() {
        assert_eq!(error_response(&Error::EmptyInput).0, StatusCode::BAD_REQUEST);
        assert_eq!(
            error_response(&Error::Timeout { timeout_secs: 60 }).0,
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            error_response(&Error::Provider(ProviderError::EmptyResponse)).0,
            StatusCode::BAD_GATEWAY
        );
        for err in [
            ProviderError::RateLimited { retry_after_secs: 5 },
            ProviderError::MalformedResponse("bad".into()),
            ProviderError::Timeout("transport".into()),
            ProviderError::Network("reset".into()),
        ] {
            assert_eq!(
                error_response(&Error::Provider(err)).0,
                StatusCode::BAD_GATEWAY
            );
        }
    }

    #[test]
    fn provider_details_stay_out_of_the_body() {
        let err = Error::Provider(ProviderError::AuthenticationFailed(
            "sk-secret rejected".into(),
        ));
        let (_, Json(body)) = error_response(&err);
        assert!(!body.error.contains("sk-secret"));
    }
}
