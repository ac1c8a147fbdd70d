use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::warn;
use uuid::Uuid;

use domain::errors::CoreResult;
use domain::models::{DraftState, DRAFT_STATE_VERSION};
use domain::repositories::StateStore;

use crate::errors::CacheError;

const TTL_SECONDS: u64 = 24 * 60 * 60;

fn key(session_id: Uuid) -> String {
    format!("draft:state:{session_id}")
}

/// Redis-backed `StateStore`. Values are JSON envelopes carrying
/// `DRAFT_STATE_VERSION`; a version mismatch is treated as a miss so the
/// caller rehydrates from the session store rather than trusting a stale
/// shape.
pub struct RedisStateStore {
    conn: ConnectionManager,
}

impl RedisStateStore {
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn get(&self, session_id: Uuid) -> CoreResult<Option<DraftState>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(key(session_id))
            .await
            .map_err(CacheError::from)?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let state: DraftState = serde_json::from_str(&raw).map_err(CacheError::from)?;
        if state.version != DRAFT_STATE_VERSION {
            let err = CacheError::UnsupportedVersion(state.version);
            warn!(session_id = %session_id, %err, "stale draft state envelope, treating as miss");
            return Ok(None);
        }
        Ok(Some(state))
    }

    async fn put(&self, state: &DraftState) -> CoreResult<()> {
        let mut conn = self.conn.clone();
        let raw = serde_json::to_string(state).map_err(CacheError::from)?;
        conn.set_ex::<_, _, ()>(key(state.session_id), raw, TTL_SECONDS)
            .await
            .map_err(CacheError::from)?;
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> CoreResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key(session_id)).await.map_err(CacheError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_shape_matches_contract() {
        let id = Uuid::nil();
        assert_eq!(key(id), format!("draft:state:{id}"));
    }
}
