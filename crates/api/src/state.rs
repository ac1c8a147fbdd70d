use std::sync::Arc;

use sqlx::PgPool;

use cache::RedisStateStore;
use db::{SqlAdpSource, SqlPlayerCatalog, SqlSessionStore};
use domain::services::{DraftService, RecommendationEngine};

/// Application state shared across all handlers. Per-session mutual
/// exclusion lives inside `DraftService` itself (see its `locks` field)
/// rather than on `AppState`, since every mutating call in this service is
/// session-scoped.
#[derive(Clone)]
pub struct AppState {
    pub draft_service: Arc<DraftService>,
    pub recommendation_engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub async fn new(pool: PgPool, redis_url: &str) -> anyhow::Result<Self> {
        let sessions = Arc::new(SqlSessionStore::new(pool.clone()));
        let catalog = Arc::new(SqlPlayerCatalog::new(pool.clone()));
        let adp = Arc::new(SqlAdpSource::new(pool));
        let state_store = Arc::new(RedisStateStore::connect(redis_url).await?);

        let draft_service = Arc::new(DraftService::new(sessions, state_store, catalog.clone()));
        let recommendation_engine = Arc::new(RecommendationEngine::new(catalog, adp));

        Ok(Self {
            draft_service,
            recommendation_engine,
        })
    }
}
