use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};
use crate::models::{
    DraftEvent, DraftKind, DraftPick, DraftSession, DraftState, Player, Settings, SessionStatus,
};
use crate::repositories::{PlayerCatalog, SessionStore, StateStore};
use crate::rules;

const MAX_CONFLICT_RETRIES: u32 = 3;

/// Orchestrates draft session lifecycle: creation, pick recording, undo/redo,
/// pause/resume, and recovery. Mutating calls on a given session are
/// serialized through a per-session lock keyed map, mirroring the
/// `session_locks` DashMap the teacher keeps on its AppState, generalized
/// here so it covers every mutating operation rather than only auto-pick
/// runs.
pub struct DraftService {
    sessions: Arc<dyn SessionStore>,
    state: Arc<dyn StateStore>,
    catalog: Arc<dyn PlayerCatalog>,
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl DraftService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        state: Arc<dyn StateStore>,
        catalog: Arc<dyn PlayerCatalog>,
    ) -> Self {
        Self {
            sessions,
            state,
            catalog,
            locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, session_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Tries to acquire the per-session lock without waiting; a caller
    /// retrying a stuck request surfaces Conflict immediately rather than
    /// queuing behind a stalled one.
    fn try_acquire(&self, session_id: Uuid) -> CoreResult<tokio::sync::OwnedMutexGuard<()>> {
        let lock = self.lock_for(session_id);
        lock.try_lock_owned().map_err(|_| {
            CoreError::Conflict("session is already being modified by another request".to_string())
        })
    }

    /// SQL is the source of truth; the cache is a convenience. A cache write
    /// failure here must never fail an already-committed mutation, so it is
    /// logged and swallowed rather than propagated.
    async fn persist_state(&self, state: &DraftState) {
        if let Err(err) = self.state.put(state).await {
            warn!(session_id = %state.session_id, %err, "failed to write draft state to cache");
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_session(
        &self,
        owner_id: Uuid,
        league_id: Uuid,
        name: String,
        kind: DraftKind,
        team_count: i32,
        user_slot: i32,
        settings: Settings,
    ) -> CoreResult<DraftSession> {
        let session =
            DraftSession::new(owner_id, league_id, name, kind, team_count, user_slot, settings)?;

        let catalog_ids = self.catalog.list_all_ids().await?;
        let keepers =
            rules::keeper_seed(&session.settings, session.kind, session.team_count, "system");

        let mut session = self.sessions.create_session(&session).await?;
        let mut state = DraftState::new(session.id, session.team_count, catalog_ids);

        // Built one keeper at a time, via the same `advance_pick` + persist
        // step RecordPick uses, so `current_pick` matches the actual
        // persisted pick count after every iteration rather than only at the
        // end of the loop.
        for keeper in keepers {
            session.advance_pick()?;
            let pick = self
                .sessions
                .create_pick(&keeper.with_session(session.id), &session)
                .await?;
            state.apply_pick(pick.player_id, pick.team_number);
            state.undo_stack.push(DraftEvent::pick(pick, "system"));
        }

        self.persist_state(&state).await;
        info!(session_id = %session.id, "draft session created");
        Ok(session)
    }

    /// Attaches the cached `DraftState` alongside the session, per the
    /// GetSession contract. State attachment is best-effort: a cache or
    /// rehydrate failure is logged and the session is still returned, with
    /// `state` absent, rather than failing an otherwise-successful read.
    pub async fn get_session(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> CoreResult<(DraftSession, Option<DraftState>)> {
        let session = self.load_authorized(id, owner_id).await?;
        let state = match self.load_state(&session).await {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(session_id = %id, %err, "failed to attach draft state to session");
                None
            }
        };
        Ok((session, state))
    }

    async fn load_authorized(&self, id: Uuid, owner_id: Uuid) -> CoreResult<DraftSession> {
        let session = self
            .sessions
            .get_session(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("session {id} not found")))?;
        if session.owner_id != owner_id {
            return Err(CoreError::Forbidden("not the session owner".to_string()));
        }
        Ok(session)
    }

    /// Loads the cached state, rehydrating from the pick log on a cache miss.
    async fn load_state(&self, session: &DraftSession) -> CoreResult<DraftState> {
        if let Some(state) = self.state.get(session.id).await? {
            return Ok(state);
        }
        warn!(session_id = %session.id, "state cache miss, rehydrating from session store");
        self.rehydrate(session).await
    }

    /// Replays the durable pick log to rebuild `DraftState` from scratch.
    /// The full undo history is restored in pick-number order; redo is empty
    /// since a rehydrate only ever follows a crash or eviction, never a user
    /// undo.
    pub async fn rehydrate(&self, session: &DraftSession) -> CoreResult<DraftState> {
        let catalog_ids = self.catalog.list_all_ids().await?;
        let picks = self.sessions.get_picks(session.id).await?;

        let mut state = DraftState::new(session.id, session.team_count, catalog_ids);
        for pick in picks {
            state.apply_pick(pick.player_id, pick.team_number);
            state.undo_stack.push(DraftEvent::pick(pick, "system"));
        }
        self.persist_state(&state).await;
        Ok(state)
    }

    pub async fn record_pick(
        &self,
        id: Uuid,
        owner_id: Uuid,
        player_id: Uuid,
    ) -> CoreResult<DraftPick> {
        let _guard = self.try_acquire(id)?;
        let mut retries = 0;
        loop {
            match self.record_pick_once(id, owner_id, player_id).await {
                Ok(pick) => return Ok(pick),
                Err(CoreError::Conflict(msg)) if retries < MAX_CONFLICT_RETRIES => {
                    retries += 1;
                    warn!(session_id = %id, attempt = retries, %msg, "retrying after conflict");
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn record_pick_once(
        &self,
        id: Uuid,
        owner_id: Uuid,
        player_id: Uuid,
    ) -> CoreResult<DraftPick> {
        let mut session = self.load_authorized(id, owner_id).await?;
        if !session.is_active() {
            return Err(CoreError::Validation("draft is not active".to_string()));
        }

        let mut state = self.load_state(&session).await?;
        if !state.available.contains(&player_id) {
            return Err(CoreError::PlayerUnavailable(player_id.to_string()));
        }

        let players = self.catalog.get_available(&[player_id]).await?;
        let player = players
            .into_iter()
            .find(|p| p.id == player_id)
            .ok_or_else(|| CoreError::PlayerUnavailable(player_id.to_string()))?;

        let pick_number = session.current_pick + 1;
        let round = rules::round(pick_number, session.team_count);
        let round_pick = rules::round_pick(pick_number, session.team_count);
        let team_number = rules::team_for_pick(pick_number, session.kind, session.team_count);

        let pick = DraftPick::new(
            session.id,
            pick_number,
            round,
            round_pick,
            team_number,
            player.id,
            player.name,
            player.position,
        );

        session.advance_pick()?;
        let pick = self.sessions.create_pick(&pick, &session).await?;
        self.sessions.update_session(&session).await?;

        state.apply_pick(pick.player_id, team_number);
        state.undo_stack.push(DraftEvent::pick(pick.clone(), owner_id.to_string()));
        state.redo_stack.clear();
        self.persist_state(&state).await;

        info!(session_id = %session.id, pick_number, %player_id, "pick recorded");
        Ok(pick)
    }

    pub async fn undo_pick(&self, id: Uuid, owner_id: Uuid) -> CoreResult<DraftPick> {
        let _guard = self.try_acquire(id)?;
        let mut session = self.load_authorized(id, owner_id).await?;
        if session.status == SessionStatus::Paused {
            return Err(CoreError::Validation("draft is not active".to_string()));
        }
        let mut state = self.load_state(&session).await?;

        let event = state.undo_stack.pop().ok_or(CoreError::NothingToUndo)?;
        let pick = event.pick_payload().clone();

        session.retreat_pick()?;
        self.sessions.delete_pick(pick.id, &session).await?;
        self.sessions.update_session(&session).await?;

        state.reverse_pick(pick.player_id, pick.team_number);
        state.redo_stack.push(event);
        self.persist_state(&state).await;

        info!(session_id = %session.id, pick_number = pick.pick_number, "pick undone");
        Ok(pick)
    }

    pub async fn redo_pick(&self, id: Uuid, owner_id: Uuid) -> CoreResult<DraftPick> {
        let _guard = self.try_acquire(id)?;
        let mut session = self.load_authorized(id, owner_id).await?;
        let mut state = self.load_state(&session).await?;

        let event = state.redo_stack.pop().ok_or(CoreError::NothingToRedo)?;
        let pick = event.pick_payload().clone();

        if !state.available.contains(&pick.player_id) {
            return Err(CoreError::Conflict(
                "player was drafted elsewhere since this pick was undone".to_string(),
            ));
        }

        session.advance_pick()?;
        self.sessions.create_pick(&pick, &session).await?;
        self.sessions.update_session(&session).await?;

        state.apply_pick(pick.player_id, pick.team_number);
        state.undo_stack.push(event);
        self.persist_state(&state).await;

        info!(session_id = %session.id, pick_number = pick.pick_number, "pick redone");
        Ok(pick)
    }

    pub async fn pause_session(&self, id: Uuid, owner_id: Uuid) -> CoreResult<DraftSession> {
        let _guard = self.try_acquire(id)?;
        let mut session = self.load_authorized(id, owner_id).await?;
        session.pause()?;
        self.sessions.update_session(&session).await
    }

    pub async fn resume_session(&self, id: Uuid, owner_id: Uuid) -> CoreResult<DraftSession> {
        let _guard = self.try_acquire(id)?;
        let mut session = self.load_authorized(id, owner_id).await?;
        session.resume()?;
        self.sessions.update_session(&session).await
    }

    pub async fn list_user_sessions(&self, owner_id: Uuid) -> CoreResult<Vec<DraftSession>> {
        self.sessions.list_user_sessions(owner_id).await
    }

    /// Exposed for the recommendation engine, which needs both session and
    /// state but shouldn't re-implement the cache-miss rehydrate logic.
    pub async fn load_session_and_state(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> CoreResult<(DraftSession, DraftState)> {
        let session = self.load_authorized(id, owner_id).await?;
        let state = self.load_state(&session).await?;
        Ok((session, state))
    }

    pub async fn available_players(&self, state: &DraftState) -> CoreResult<Vec<Player>> {
        let ids: Vec<Uuid> = state.available.iter().copied().collect();
        self.catalog.get_available(&ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeeperPlayer, RosterSlots, ScoringType};
    use async_trait::async_trait;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        Sessions {}

        #[async_trait]
        impl SessionStore for Sessions {
            async fn create_session(&self, session: &DraftSession) -> CoreResult<DraftSession>;
            async fn get_session(&self, id: Uuid) -> CoreResult<Option<DraftSession>>;
            async fn update_session(&self, session: &DraftSession) -> CoreResult<DraftSession>;
            async fn delete_session(&self, id: Uuid) -> CoreResult<()>;
            async fn list_user_sessions(&self, owner_id: Uuid) -> CoreResult<Vec<DraftSession>>;
            async fn create_pick(&self, pick: &DraftPick, session: &DraftSession) -> CoreResult<DraftPick>;
            async fn get_picks(&self, session_id: Uuid) -> CoreResult<Vec<DraftPick>>;
            async fn delete_pick(&self, pick_id: Uuid, session: &DraftSession) -> CoreResult<()>;
        }
    }

    mock! {
        State {}

        #[async_trait]
        impl StateStore for State {
            async fn get(&self, session_id: Uuid) -> CoreResult<Option<DraftState>>;
            async fn put(&self, state: &DraftState) -> CoreResult<()>;
            async fn delete(&self, session_id: Uuid) -> CoreResult<()>;
        }
    }

    mock! {
        Catalog {}

        #[async_trait]
        impl PlayerCatalog for Catalog {
            async fn get_available(&self, ids: &[Uuid]) -> CoreResult<Vec<Player>>;
            async fn list_all_ids(&self) -> CoreResult<HashSet<Uuid>>;
            async fn get_projections(&self, ids: &[Uuid], scoring_type: ScoringType) -> CoreResult<HashMap<Uuid, f64>>;
        }
    }

    fn settings() -> Settings {
        Settings::new(
            ScoringType::Ppr,
            RosterSlots {
                qb: 1,
                rb: 2,
                wr: 2,
                te: 1,
                flex: 1,
                dst: 1,
                k: 1,
                bench: 2,
            },
            60,
            false,
            vec![],
        )
        .unwrap()
    }

    fn sample_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player {
                id: Uuid::new_v4(),
                name: format!("Player {i}"),
                position: "RB".to_string(),
                team: "ANY".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn record_pick_rejects_unavailable_player() {
        let owner = Uuid::new_v4();
        let players = sample_players(3);
        let session = DraftSession::new(
            owner,
            Uuid::new_v4(),
            "league".to_string(),
            DraftKind::Snake,
            10,
            1,
            settings(),
        )
        .unwrap();
        let session_id = session.id;

        let mut sessions = MockSessions::new();
        let session_clone = session.clone();
        sessions
            .expect_get_session()
            .returning(move |_| Ok(Some(session_clone.clone())));

        let mut state_store = MockState::new();
        let available: HashSet<Uuid> = players.iter().map(|p| p.id).collect();
        let mut state = DraftState::new(session_id, 10, available);
        // drain availability so the requested player is not present
        state.available.clear();
        let state_clone = state.clone();
        state_store
            .expect_get()
            .returning(move |_| Ok(Some(state_clone.clone())));

        let mut catalog = MockCatalog::new();
        let players_clone = players.clone();
        catalog
            .expect_get_available()
            .returning(move |_ids| Ok(players_clone.clone()));

        let service = DraftService::new(
            Arc::new(sessions),
            Arc::new(state_store),
            Arc::new(catalog),
        );

        let result = service.record_pick(session_id, owner, players[0].id).await;
        assert!(matches!(result, Err(CoreError::PlayerUnavailable(_))));
    }

    #[tokio::test]
    async fn get_session_rejects_wrong_owner() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let session = DraftSession::new(
            owner,
            Uuid::new_v4(),
            "league".to_string(),
            DraftKind::Snake,
            10,
            1,
            settings(),
        )
        .unwrap();

        let mut sessions = MockSessions::new();
        let session_clone = session.clone();
        sessions
            .expect_get_session()
            .returning(move |_| Ok(Some(session_clone.clone())));

        let state_store = MockState::new();
        let catalog = MockCatalog::new();

        let service = DraftService::new(
            Arc::new(sessions),
            Arc::new(state_store),
            Arc::new(catalog),
        );

        let result = service.get_session(session.id, other).await;
        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[tokio::test]
    async fn create_session_seeds_keeper_picks_incrementally() {
        let owner = Uuid::new_v4();
        let keepers = vec![KeeperPlayer {
            player_id: Uuid::new_v4(),
            player_name: "Keeper One".to_string(),
            position: "RB".to_string(),
        }];
        let settings = Settings::new(
            ScoringType::Ppr,
            RosterSlots {
                qb: 1,
                rb: 2,
                wr: 2,
                te: 1,
                flex: 1,
                dst: 1,
                k: 1,
                bench: 2,
            },
            60,
            false,
            keepers,
        )
        .unwrap();

        let mut sessions = MockSessions::new();
        sessions.expect_create_session().returning(|session| Ok(session.clone()));
        sessions
            .expect_create_pick()
            .returning(|pick, _session| Ok(pick.clone()));

        let mut state_store = MockState::new();
        state_store.expect_put().returning(|_| Ok(()));

        let mut catalog = MockCatalog::new();
        catalog.expect_list_all_ids().returning(|| Ok(HashSet::new()));

        let service = DraftService::new(
            Arc::new(sessions),
            Arc::new(state_store),
            Arc::new(catalog),
        );

        let session = service
            .create_session(
                owner,
                Uuid::new_v4(),
                "league".to_string(),
                DraftKind::Snake,
                10,
                1,
                settings,
            )
            .await
            .unwrap();

        // current_pick must match the single persisted keeper pick, not the
        // keeper list length set up-front before any pick row exists.
        assert_eq!(session.current_pick, 1);
    }
}
