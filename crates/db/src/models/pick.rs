use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::DraftPick;

#[derive(Debug, Clone, FromRow)]
pub struct DraftPickDb {
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

impl DraftPickDb {
    pub fn from_domain(pick: &DraftPick) -> Self {
        Self {
            id: pick.id,
            session_id: pick.session_id,
            pick_number: pick.pick_number,
            round: pick.round,
            round_pick: pick.round_pick,
            team_number: pick.team_number,
            player_id: pick.player_id,
            player_name: pick.player_name.clone(),
            position: pick.position.clone(),
            is_keeper: pick.is_keeper,
            picked_at: pick.picked_at,
        }
    }

    pub fn to_domain(&self) -> DraftPick {
        DraftPick {
            id: self.id,
            session_id: self.session_id,
            pick_number: self.pick_number,
            round: self.round,
            round_pick: self.round_pick,
            team_number: self.team_number,
            player_id: self.player_id,
            player_name: self.player_name.clone(),
            position: self.position.clone(),
            is_keeper: self.is_keeper,
            picked_at: self.picked_at,
        }
    }
}
