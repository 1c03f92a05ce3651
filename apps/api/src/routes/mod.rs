pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::enhance::handlers as enhance_handlers;
use crate::export::handlers as export_handlers;
use crate::render::handlers as render_handlers;
use crate::state::AppState;
use crate::store::handlers as store_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document store — the form editor's surface
        .route(
            "/api/v1/resume",
            get(store_handlers::handle_get_resume).patch(store_handlers::handle_patch_resume),
        )
        .route("/api/v1/resume/reset", post(store_handlers::handle_reset_resume))
        .route(
            "/api/v1/theme",
            get(store_handlers::handle_get_theme).put(store_handlers::handle_put_theme),
        )
        // Preview
        .route("/api/v1/preview", get(render_handlers::handle_get_preview))
        .route("/preview", get(render_handlers::handle_preview_page))
        // PDF export
        .route("/api/v1/resume/export", get(export_handlers::handle_export))
        // Enhancement: store-coupled flow + stateless proxy
        .route(
            "/api/v1/resume/enhance",
            post(enhance_handlers::handle_enhance_resume_field),
        )
        .route("/api/enhance", post(enhance_handlers::handle_enhance))
        .with_state(state)
}
