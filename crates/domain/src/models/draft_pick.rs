use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPick {
    pub id: Uuid,
    pub session_id: Uuid,
    pub pick_number: i32,
    pub round: i32,
    pub round_pick: i32,
    pub team_number: i32,
    pub player_id: Uuid,
    pub player_name: String,
    pub position: String,
    pub is_keeper: bool,
    pub picked_at: DateTime<Utc>,
}

impl DraftPick {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_id: Uuid,
        pick_number: i32,
        round: i32,
        round_pick: i32,
        team_number: i32,
        player_id: Uuid,
        player_name: String,
        position: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            pick_number,
            round,
            round_pick,
            team_number,
            player_id,
            player_name,
            position,
            is_keeper: false,
            picked_at: Utc::now(),
        }
    }

    /// Keeper picks are session-less at construction time (seeded before the
    /// session id is threaded through by the caller); `with_session` attaches
    /// it once the owning session is known.
    #[allow(clippy::too_many_arguments)]
    pub fn new_keeper(
        pick_number: i32,
        round: i32,
        round_pick: i32,
        team_number: i32,
        player_id: Uuid,
        player_name: String,
        position: String,
        _actor: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: Uuid::nil(),
            pick_number,
            round,
            round_pick,
            team_number,
            player_id,
            player_name,
            position,
            is_keeper: true,
            picked_at: Utc::now(),
        }
    }

    pub fn with_session(mut self, session_id: Uuid) -> Self {
        self.session_id = session_id;
        self
    }
}
