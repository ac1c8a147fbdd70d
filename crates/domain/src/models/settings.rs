use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoringType {
    Ppr,
    HalfPpr,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlots {
    pub qb: i32,
    pub rb: i32,
    pub wr: i32,
    pub te: i32,
    pub flex: i32,
    pub dst: i32,
    pub k: i32,
    pub bench: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeeperPlayer {
    pub player_id: Uuid,
    pub player_name: String,
    pub position: String,
}

/// Immutable once the session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub scoring_type: ScoringType,
    pub roster_slots: RosterSlots,
    pub timer_seconds: i32,
    pub auto_draft_enabled: bool,
    pub keeper_players: Vec<KeeperPlayer>,
}

impl Settings {
    pub fn new(
        scoring_type: ScoringType,
        roster_slots: RosterSlots,
        timer_seconds: i32,
        auto_draft_enabled: bool,
        keeper_players: Vec<KeeperPlayer>,
    ) -> CoreResult<Self> {
        if !(0..=600).contains(&timer_seconds) {
            return Err(CoreError::Validation(
                "timer_seconds must be between 0 and 600".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(keeper_players.len());
        for keeper in &keeper_players {
            if !seen.insert(keeper.player_id) {
                return Err(CoreError::Validation(format!(
                    "keeper list contains player {} more than once",
                    keeper.player_id
                )));
            }
        }
        Ok(Self {
            scoring_type,
            roster_slots,
            timer_seconds,
            auto_draft_enabled,
            keeper_players,
        })
    }

    pub fn round_count(&self) -> i32 {
        let s = &self.roster_slots;
        s.qb + s.rb + s.wr + s.te + s.flex + s.dst + s.k + s.bench
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> RosterSlots {
        RosterSlots { qb: 1, rb: 2, wr: 2, te: 1, flex: 1, dst: 1, k: 1, bench: 6 }
    }

    #[test]
    fn rejects_duplicate_keeper_player_ids() {
        let player_id = Uuid::new_v4();
        let keepers = vec![
            KeeperPlayer { player_id, player_name: "A".to_string(), position: "RB".to_string() },
            KeeperPlayer { player_id, player_name: "A".to_string(), position: "RB".to_string() },
        ];
        let result = Settings::new(ScoringType::Ppr, slots(), 60, false, keepers);
        assert!(result.is_err());
    }

    #[test]
    fn accepts_distinct_keeper_player_ids() {
        let keepers = vec![
            KeeperPlayer {
                player_id: Uuid::new_v4(),
                player_name: "A".to_string(),
                position: "RB".to_string(),
            },
            KeeperPlayer {
                player_id: Uuid::new_v4(),
                player_name: "B".to_string(),
                position: "WR".to_string(),
            },
        ];
        let result = Settings::new(ScoringType::Ppr, slots(), 60, false, keepers);
        assert!(result.is_ok());
    }
}
