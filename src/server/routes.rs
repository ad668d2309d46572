//! HTTP route handlers for the question-answering API.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::query::{DispatchError, Dispatched};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/answer", get(answer_query).post(answer_body))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "civic-query",
        "version": env!("CARGO_PKG_VERSION"),
        "recognizers": state.dispatcher.registry().names(),
    }))
}

/// Question in a JSON body.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The free-text question.
    pub question: String,
}

/// Question in the query string (`?q=...`).
#[derive(Debug, Deserialize)]
pub struct AnswerParams {
    /// The free-text question.
    pub q: String,
}

/// Answer response; `matched` is false when no recognizer applied.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Whether any recognizer matched.
    pub matched: bool,
    /// Name of the recognizer that matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognizer: Option<String>,
    /// Shape of the answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    /// Exported answer data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<serde_json::Value>,
}

impl AnswerResponse {
    const fn no_answer() -> Self {
        Self {
            matched: false,
            recognizer: None,
            kind: None,
            answer: None,
        }
    }
}

impl From<Dispatched> for AnswerResponse {
    fn from(d: Dispatched) -> Self {
        Self {
            matched: true,
            kind: Some(d.answer.kind()),
            answer: Some(d.answer.export()),
            recognizer: Some(d.recognizer),
        }
    }
}

type ApiError = (StatusCode, Json<serde_json::Value>);

async fn answer_body(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    answer(&state, &request.question).await
}

async fn answer_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnswerParams>,
) -> Result<Json<AnswerResponse>, ApiError> {
    answer(&state, &params.q).await
}

/// Dispatch a question; failures are reported without internals.
async fn answer(state: &AppState, question: &str) -> Result<Json<AnswerResponse>, ApiError> {
    match state.dispatcher.answer(question).await {
        Ok(Some(dispatched)) => Ok(Json(AnswerResponse::from(dispatched))),
        Ok(None) => Ok(Json(AnswerResponse::no_answer())),
        Err(e) => {
            tracing::error!("Dispatch failed: {e}");
            Err(failure(&e))
        }
    }
}

fn failure(error: &DispatchError) -> ApiError {
    let status = if error.is_transport() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(serde_json::json!({ "error": "could not answer the question" })),
    )
}
