use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DraftEvent;

/// The current serialization version of `DraftState`. Bumped whenever the
/// shape changes so the cache adapter can refuse to deserialize a stale
/// envelope instead of silently misreading it.
pub const DRAFT_STATE_VERSION: u32 = 1;

/// Hot, ephemeral, reconstructible-from-the-pick-log draft state. Per the
/// cached-picks-redundancy decision (see DESIGN.md), this does NOT carry the
/// full ordered pick list — only what is needed to serve undo/redo and
/// availability checks without a round-trip to the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftState {
    pub version: u32,
    pub session_id: Uuid,
    pub available: HashSet<Uuid>,
    pub rosters: HashMap<i32, Vec<Uuid>>,
    pub undo_stack: Vec<DraftEvent>,
    pub redo_stack: Vec<DraftEvent>,
    pub last_action_at: DateTime<Utc>,
}

impl DraftState {
    pub fn new(session_id: Uuid, team_count: i32, available: HashSet<Uuid>) -> Self {
        let mut rosters = HashMap::with_capacity(team_count as usize);
        for team in 1..=team_count {
            rosters.insert(team, Vec::new());
        }
        Self {
            version: DRAFT_STATE_VERSION,
            session_id,
            available,
            rosters,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_action_at: Utc::now(),
        }
    }

    pub fn apply_pick(&mut self, player_id: Uuid, team_number: i32) {
        self.available.remove(&player_id);
        self.rosters.entry(team_number).or_default().push(player_id);
        self.last_action_at = Utc::now();
    }

    pub fn reverse_pick(&mut self, player_id: Uuid, team_number: i32) {
        if let Some(roster) = self.rosters.get_mut(&team_number) {
            roster.retain(|id| *id != player_id);
        }
        self.available.insert(player_id);
        self.last_action_at = Utc::now();
    }
}
