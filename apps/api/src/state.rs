use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportLayout;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. `LlmClient` in production, scripted in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Page geometry used by the PDF export.
    pub export_layout: ExportLayout,
}
