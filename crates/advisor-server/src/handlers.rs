//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use financial_advisor::{AdviceError, AdviceResult};

use crate::state::AppState;

const HISTORY_LIMIT: usize = 50;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AdviceRequestBody {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T> SuccessResponse<T> {
    fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub gateway: String,
    pub model: String,
    pub model_available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatusResponse {
    pub success: bool,
    pub model_available: bool,
    pub provider: String,
    pub model: String,
    pub message: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.pipeline.gateway().info();
    let model_available = model_available(&state).await;

    Json(HealthResponse {
        status: "OK",
        message: "Financial Advisor API is running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        gateway: info.name,
        model: info.model,
        model_available,
    })
}

/// Whether the model gateway is configured and reachable
pub async fn model_status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    let info = state.pipeline.gateway().info();
    let model_available = model_available(&state).await;

    Json(ModelStatusResponse {
        success: true,
        model_available,
        provider: info.name,
        model: info.model,
        message: if model_available {
            "Model is ready"
        } else {
            "Model is not available, fallback advice in use"
        },
    })
}

async fn model_available(state: &AppState) -> bool {
    let gateway = state.pipeline.gateway();
    gateway.info().configured && gateway.health_check().await
}

/// Main advice endpoint
pub async fn get_advice(
    State(state): State<AppState>,
    payload: Result<Json<AdviceRequestBody>, JsonRejection>,
) -> Result<Json<SuccessResponse<AdviceResult>>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("advice", %request_id);

    async move {
        let question = match payload {
            Ok(Json(body)) => body.question.unwrap_or_default(),
            Err(rejection) => {
                tracing::debug!("Rejected advice body: {}", rejection);
                String::new()
            }
        };

        // A panic inside the pipeline surfaces as a 500, not a dropped connection.
        let pipeline = state.pipeline.clone();
        let outcome = tokio::spawn(async move { pipeline.run(&question).await }.in_current_span())
            .await
            .map_err(|e| AdviceError::Internal(e.to_string()))
            .and_then(|result| result);

        match outcome {
            Ok(result) => {
                state.history.record(&result).await;
                Ok(Json(SuccessResponse::new(result)))
            }
            Err(e @ AdviceError::EmptyQuestion) => {
                Err(error_response(StatusCode::BAD_REQUEST, e.user_message()))
            }
            Err(e) => {
                tracing::error!("Advice error: {}", e);
                Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e.user_message()))
            }
        }
    }
    .instrument(span)
    .await
}

/// Past answers (no-op until persistence exists)
pub async fn get_history(
    State(state): State<AppState>,
) -> Json<SuccessResponse<Vec<AdviceResult>>> {
    let data = state.history.recent(HISTORY_LIMIT).await;
    let mut response = SuccessResponse::new(data);
    if !state.history.enabled() {
        response.message = Some("History feature coming soon");
    }
    Json(response)
}
