use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerator;
use crate::retrieval::{ArticleSearch, VideoSearch};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Production: `LlmClient`. Tests swap in a scripted generator.
    pub llm: Arc<dyn TextGenerator>,
    pub videos: Arc<dyn VideoSearch>,
    pub articles: Arc<dyn ArticleSearch>,
}
