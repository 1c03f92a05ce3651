//! Axum route handlers for the document store — the form editor's surface.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::models::resume::{DocumentPatch, ResumeDocument};
use crate::models::theme::ThemePreference;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: ThemePreference,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeDocument> {
    Json(state.store.get())
}

/// PATCH /api/v1/resume
///
/// Shallow merge at each top-level key present in the body; returns the
/// updated document. Every call writes through to storage.
pub async fn handle_patch_resume(
    State(state): State<AppState>,
    Json(patch): Json<DocumentPatch>,
) -> Json<ResumeDocument> {
    Json(state.store.set(patch))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset_resume(State(state): State<AppState>) -> Json<ResumeDocument> {
    Json(state.store.reset())
}

/// GET /api/v1/theme
pub async fn handle_get_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.store.theme(),
    })
}

/// PUT /api/v1/theme
pub async fn handle_put_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.store.set_theme(body.theme),
    })
}
