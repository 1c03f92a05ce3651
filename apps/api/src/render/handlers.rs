//! Axum route handlers for the live preview.

use axum::{extract::State, response::Html, Json};

use crate::render::html::render_html;
use crate::render::{render, RenderedResume};
use crate::state::AppState;

/// GET /api/v1/preview
///
/// The section-filtered preview model as JSON.
pub async fn handle_get_preview(State(state): State<AppState>) -> Json<RenderedResume> {
    Json(render(&state.store.get()))
}

/// GET /preview
///
/// The same preview as a plain HTML document.
pub async fn handle_preview_page(State(state): State<AppState>) -> Html<String> {
    Html(render_html(&render(&state.store.get())))
}
