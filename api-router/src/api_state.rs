use std::sync::Arc;

use common::{storage::db::SurrealDbClient, utils::config::AppConfig};

use crate::{OpenAIClientType, SessionStoreType};

/// Shared state for the API router. The completion client is constructed once
/// at startup and injected here so handlers (and tests) never reach for a
/// global instance.
#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<SurrealDbClient>,
    pub openai_client: Arc<OpenAIClientType>,
    pub session_store: Arc<SessionStoreType>,
    pub config: AppConfig,
}

impl ApiState {
    pub fn new(
        db: Arc<SurrealDbClient>,
        openai_client: Arc<OpenAIClientType>,
        session_store: Arc<SessionStoreType>,
        config: AppConfig,
    ) -> Self {
        Self {
            db,
            openai_client,
            session_store,
            config,
        }
    }
}
