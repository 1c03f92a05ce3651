//! Axum route handlers for text enhancement.
//!
//! `/api/enhance` is the stateless proxy with the fixed wire contract:
//! 200 `{"enhanced"}`, 400 `{"error": "Text is required"}`, 500
//! `{"error": "Missing GEMINI_API_KEY"}` / `{"error": "Failed to enhance
//! text"}`. Non-POST requests get axum's 405 with an `Allow: POST` header.
//!
//! `/api/v1/resume/enhance` is the store-coupled flow: it reads the named
//! field, enhances it, and writes the result back — failures degrade to an
//! unchanged document instead of an error status.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::enhance::{enhance_field, EnhanceField, EnhanceOutcome};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced: String,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceFieldRequest {
    pub field: String,
}

/// POST /api/enhance
///
/// Stateless enhancement proxy. The submitted text appears in the provider
/// request only — never in an error response or a log line.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let enhancer = state.enhancer.as_ref().ok_or(AppError::MissingApiKey)?;

    let text = request.text.as_deref().unwrap_or("").trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let field = request
        .field
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or("resume");

    let enhanced = enhancer
        .enhance(field, &text)
        .await
        .map_err(|e| AppError::Enhance(e.to_string()))?;

    Ok(Json(EnhanceResponse { enhanced }))
}

/// POST /api/v1/resume/enhance
///
/// Reads the addressed field from the store, enhances it, writes it back.
/// Empty source text and provider failures both report an outcome instead
/// of an error status; only an unparsable field address is a 400.
pub async fn handle_enhance_resume_field(
    State(state): State<AppState>,
    Json(request): Json<EnhanceFieldRequest>,
) -> Result<Json<EnhanceOutcome>, AppError> {
    let field = EnhanceField::parse(&request.field).ok_or_else(|| {
        AppError::Validation(format!("Unknown enhanceable field '{}'", request.field))
    })?;

    match state.enhancer.as_ref() {
        Some(enhancer) => Ok(Json(
            enhance_field(&state.store, enhancer.as_ref(), &field).await,
        )),
        None => {
            warn!("enhancement requested but no provider credential is configured");
            Ok(Json(EnhanceOutcome::Failed))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
