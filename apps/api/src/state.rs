use std::sync::Arc;

use crate::enhance::TextEnhancer;
use crate::layout::LayoutEngine;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single source of truth for the resume document and theme.
    pub store: Arc<DocumentStore>,
    /// Pluggable enhancer. `None` when `GEMINI_API_KEY` is not configured —
    /// the enhance endpoint then answers 500 per request instead of the
    /// process refusing to start.
    pub enhancer: Option<Arc<dyn TextEnhancer>>,
    /// Layout engine for the preview geometry the PDF exporter consumes.
    pub layout: LayoutEngine,
}
