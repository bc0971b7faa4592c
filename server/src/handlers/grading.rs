//! The essay-grading proxy: validate, build the prompt, one call to the
//! Gemini endpoint, shape the result. Stateless; each request is a single
//! independent attempt with no retry and no caching.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use redacao_core::GeminiError;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::state::AppState;

/// Incoming grading request. Missing fields read as empty and fail
/// validation the same way.
#[derive(Deserialize)]
pub struct GradingRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub essay: String,
}

/// Success envelope.
#[derive(Serialize)]
pub struct GradingResponse {
    pub resposta: String,
}

/// Error envelope; `detalhes` carries the upstream body or the transport
/// error message when there is one.
#[derive(Serialize)]
pub struct GradingErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalhes: Option<serde_json::Value>,
}

fn error_response(
    status: StatusCode,
    message: &str,
    detalhes: Option<serde_json::Value>,
) -> Response {
    (
        status,
        Json(GradingErrorBody {
            error: message.to_string(),
            detalhes,
        }),
    )
        .into_response()
}

/// Handler for `POST /api/corrigir`.
pub async fn corrigir(
    State(state): State<AppState>,
    Json(payload): Json<GradingRequest>,
) -> Response {
    if payload.topic.trim().is_empty() || payload.essay.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Tema e redação são obrigatórios.",
            None,
        );
    }

    // Missing key is an operator problem scoped to this endpoint; nothing
    // is sent upstream.
    let Some(gemini) = state.gemini.as_ref() else {
        error!("Grading request refused: no Gemini API key configured");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Chave da API Gemini não configurada.",
            None,
        );
    };

    match gemini.grade_essay(&payload.topic, &payload.essay).await {
        Ok(resposta) => {
            info!(topic = %payload.topic, "Essay graded");
            Json(GradingResponse { resposta }).into_response()
        }
        Err(GeminiError::UpstreamError { status, body }) => {
            error!(status, "Gemini API reported an error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Falha ao comunicar com a IA",
                Some(body),
            )
        }
        Err(e) => {
            error!(error = %e, "Failed to reach the Gemini API");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro de conexão com a IA",
                Some(serde_json::Value::String(e.to_string())),
            )
        }
    }
}
