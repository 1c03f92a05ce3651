//! Axum route handler for the PDF export.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::export::export_pdf;
use crate::render::render;
use crate::state::AppState;

/// GET /api/v1/resume/export
///
/// Renders, lays out, and exports the current document as `resume.pdf`.
/// An entirely empty preview makes this a 204 no-op rather than an error.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let rendered = render(&state.store.get());
    if rendered.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let layout = state.layout.layout(&rendered);
    let bytes = export_pdf(&layout)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
