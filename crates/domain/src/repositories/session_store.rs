use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreResult;
use crate::models::{DraftPick, DraftSession, DraftState, Player, ScoringType};

/// Durable store of record for sessions and their picks. Concrete
/// implementations live in the `db` crate.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, session: &DraftSession) -> CoreResult<DraftSession>;
    async fn get_session(&self, id: Uuid) -> CoreResult<Option<DraftSession>>;
    async fn update_session(&self, session: &DraftSession) -> CoreResult<DraftSession>;
    async fn delete_session(&self, id: Uuid) -> CoreResult<()>;
    async fn list_user_sessions(&self, owner_id: Uuid) -> CoreResult<Vec<DraftSession>>;

    /// Inserts `pick` and applies `session` in a single transaction.
    async fn create_pick(
        &self,
        pick: &DraftPick,
        session: &DraftSession,
    ) -> CoreResult<DraftPick>;
    async fn get_picks(&self, session_id: Uuid) -> CoreResult<Vec<DraftPick>>;

    /// Deletes `pick_id` and applies `session` in a single transaction.
    async fn delete_pick(&self, pick_id: Uuid, session: &DraftSession) -> CoreResult<()>;
}

/// Read-only external collaborator supplying player metadata and
/// scoring-type-specific projections. Out of scope per SPEC_FULL.md §1:
/// ingestion is someone else's pipeline.
#[async_trait]
pub trait PlayerCatalog: Send + Sync {
    /// Metadata for exactly the requested ids; bounded so hot paths (a single
    /// pick, a recommendation pass) never pull the full catalog table.
    async fn get_available(&self, ids: &[Uuid]) -> CoreResult<Vec<Player>>;
    /// Every rosterable player id for this draft's context (season, format).
    /// Used only to seed/rehydrate `DraftState.available`, never on a
    /// per-pick path.
    async fn list_all_ids(&self) -> CoreResult<HashSet<Uuid>>;
    async fn get_projections(
        &self,
        ids: &[Uuid],
        scoring_type: ScoringType,
    ) -> CoreResult<HashMap<Uuid, f64>>;
}

/// Read-only external collaborator supplying average draft position.
/// Missing players are treated by callers as ADP = 200.
#[async_trait]
pub trait AdpSource: Send + Sync {
    async fn get_adp(&self, scoring_type: ScoringType) -> CoreResult<HashMap<Uuid, f64>>;
}

/// Hot cache for `DraftState`, keyed by session id with a rolling TTL.
/// Never authoritative for picks or session status; see SPEC_FULL.md §4.B.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, session_id: Uuid) -> CoreResult<Option<DraftState>>;
    async fn put(&self, state: &DraftState) -> CoreResult<()>;
    async fn delete(&self, session_id: Uuid) -> CoreResult<()>;
}
