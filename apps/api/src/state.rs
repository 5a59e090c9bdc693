use std::sync::Arc;

use sqlx::PgPool;

use crate::ai_client::clipdrop::ClipDropClient;
use crate::ai_client::TextGenerator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Injected text provider. `None` when no credential is configured —
    /// the slogan path then serves deterministic fallback content.
    pub text_provider: Option<Arc<dyn TextGenerator>>,
    /// Injected image provider. `None` → placeholder SVG images.
    pub image_client: Option<Arc<ClipDropClient>>,
    pub config: Config,
}

impl AppState {
    pub fn text_provider(&self) -> Option<&dyn TextGenerator> {
        self.text_provider.as_deref()
    }

    pub fn image_client(&self) -> Option<&ClipDropClient> {
        self.image_client.as_deref()
    }
}
