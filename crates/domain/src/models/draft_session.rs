use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoreError, CoreResult};
use crate::rules;

use super::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Paused,
    Completed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Paused => write!(f, "paused"),
            SessionStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftKind {
    Snake,
    Linear,
    Auction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSession {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub kind: DraftKind,
    pub team_count: i32,
    pub round_count: i32,
    pub user_slot: i32,
    pub current_pick: i32,
    pub status: SessionStatus,
    pub settings: Settings,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DraftSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_id: Uuid,
        league_id: Uuid,
        name: String,
        kind: DraftKind,
        team_count: i32,
        user_slot: i32,
        settings: Settings,
    ) -> CoreResult<Self> {
        if !(4..=20).contains(&team_count) {
            return Err(CoreError::Validation(
                "team_count must be between 4 and 20".to_string(),
            ));
        }
        let round_count = settings.round_count();
        if !(1..=30).contains(&round_count) {
            return Err(CoreError::Validation(
                "round_count must be between 1 and 30".to_string(),
            ));
        }
        if !(1..=team_count).contains(&user_slot) {
            return Err(CoreError::Validation(
                "user_slot must be within the team count".to_string(),
            ));
        }
        rules::settings_valid(&settings, round_count, kind, team_count)?;

        let now = Utc::now();
        let has_keepers = !settings.keeper_players.is_empty();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            league_id,
            name,
            kind,
            team_count,
            round_count,
            user_slot,
            current_pick: 0,
            status: SessionStatus::Active,
            settings,
            started_at: has_keepers.then_some(now),
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_complete(&self) -> bool {
        rules::is_complete(self.current_pick, self.team_count, self.round_count)
    }

    pub fn pause(&mut self) -> CoreResult<()> {
        match self.status {
            SessionStatus::Active => {
                self.status = SessionStatus::Paused;
                self.updated_at = Utc::now();
                Ok(())
            }
            SessionStatus::Paused => {
                Err(CoreError::Validation("session is already paused".to_string()))
            }
            SessionStatus::Completed => Err(CoreError::Validation(
                "cannot pause a completed session".to_string(),
            )),
        }
    }

    pub fn resume(&mut self) -> CoreResult<()> {
        match self.status {
            SessionStatus::Paused => {
                self.status = SessionStatus::Active;
                self.updated_at = Utc::now();
                Ok(())
            }
            SessionStatus::Active => {
                Err(CoreError::Validation("session is already active".to_string()))
            }
            SessionStatus::Completed => Err(CoreError::Validation(
                "cannot resume a completed session".to_string(),
            )),
        }
    }

    /// Advances the pick counter by one, completing the session if this was
    /// the final pick. Callers record the pick itself separately.
    pub fn advance_pick(&mut self) -> CoreResult<()> {
        if self.status != SessionStatus::Active {
            return Err(CoreError::Validation(
                "can only advance pick on an active session".to_string(),
            ));
        }
        self.current_pick += 1;
        self.updated_at = Utc::now();
        if self.started_at.is_none() {
            self.started_at = Some(self.updated_at);
        }
        if self.is_complete() {
            self.status = SessionStatus::Completed;
            self.completed_at = Some(self.updated_at);
        }
        Ok(())
    }

    /// Reverses the effect of the most recent `advance_pick`, reopening a
    /// completed session if necessary. Rejected while paused: resuming is
    /// the user's call, not a side effect of undo.
    pub fn retreat_pick(&mut self) -> CoreResult<()> {
        if self.status == SessionStatus::Paused {
            return Err(CoreError::Validation("draft is not active".to_string()));
        }
        if self.current_pick == 0 {
            return Err(CoreError::Validation("no picks to retreat".to_string()));
        }
        self.current_pick -= 1;
        self.status = SessionStatus::Active;
        self.completed_at = None;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeeperPlayer, RosterSlots, ScoringType};

    fn settings(keepers: Vec<KeeperPlayer>) -> Settings {
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
                bench: 6,
            },
            60,
            false,
            keepers,
        )
        .unwrap()
    }

    #[test]
    fn rejects_team_count_out_of_range() {
        let result = DraftSession::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test".to_string(),
            DraftKind::Snake,
            3,
            1,
            settings(vec![]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn lifecycle_pause_resume() {
        let mut session = DraftSession::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test".to_string(),
            DraftKind::Snake,
            12,
            5,
            settings(vec![]),
        )
        .unwrap();

        assert!(session.is_active());
        session.pause().unwrap();
        assert_eq!(session.status, SessionStatus::Paused);
        assert!(session.pause().is_err());
        session.resume().unwrap();
        assert!(session.is_active());
    }

    #[test]
    fn completion_flips_on_final_pick() {
        let mut session = DraftSession::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test".to_string(),
            DraftKind::Snake,
            12,
            5,
            settings(vec![]),
        )
        .unwrap();
        session.current_pick = 179;
        session.advance_pick().unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(session.completed_at.is_some());

        session.retreat_pick().unwrap();
        assert_eq!(session.status, SessionStatus::Active);
        assert!(session.completed_at.is_none());
        assert_eq!(session.current_pick, 179);
    }

    #[test]
    fn retreat_pick_rejected_while_paused() {
        let mut session = DraftSession::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "test".to_string(),
            DraftKind::Snake,
            12,
            5,
            settings(vec![]),
        )
        .unwrap();
        session.advance_pick().unwrap();
        session.pause().unwrap();

        assert!(session.retreat_pick().is_err());
        assert_eq!(session.status, SessionStatus::Paused);
        assert_eq!(session.current_pick, 1);
    }
}
