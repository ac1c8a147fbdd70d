use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{DraftKind, DraftSession, SessionStatus, Settings};

use crate::errors::{DbError, DbResult};

#[derive(Debug, Clone, FromRow)]
pub struct DraftSessionDb {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub draft_kind: String,
    pub team_count: i32,
    pub round_count: i32,
    pub user_slot: i32,
    pub current_pick: i32,
    pub status: String,
    pub settings: JsonValue,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DraftSessionDb {
    pub fn from_domain(session: &DraftSession) -> DbResult<Self> {
        let settings = serde_json::to_value(&session.settings)
            .map_err(|e| DbError::MappingError(e.to_string()))?;
        Ok(Self {
            id: session.id,
            owner_id: session.owner_id,
            league_id: session.league_id,
            name: session.name.clone(),
            draft_kind: kind_to_string(session.kind),
            team_count: session.team_count,
            round_count: session.round_count,
            user_slot: session.user_slot,
            current_pick: session.current_pick,
            status: status_to_string(session.status),
            settings,
            started_at: session.started_at,
            completed_at: session.completed_at,
            created_at: session.created_at,
            updated_at: session.updated_at,
        })
    }

    pub fn to_domain(&self) -> DbResult<DraftSession> {
        let settings: Settings = serde_json::from_value(self.settings.clone())
            .map_err(|e| DbError::MappingError(e.to_string()))?;
        Ok(DraftSession {
            id: self.id,
            owner_id: self.owner_id,
            league_id: self.league_id,
            name: self.name.clone(),
            kind: string_to_kind(&self.draft_kind)?,
            team_count: self.team_count,
            round_count: self.round_count,
            user_slot: self.user_slot,
            current_pick: self.current_pick,
            status: string_to_status(&self.status)?,
            settings,
            started_at: self.started_at,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn kind_to_string(kind: DraftKind) -> String {
    match kind {
        DraftKind::Snake => "snake",
        DraftKind::Linear => "linear",
        DraftKind::Auction => "auction",
    }
    .to_string()
}

fn string_to_kind(s: &str) -> DbResult<DraftKind> {
    match s {
        "snake" => Ok(DraftKind::Snake),
        "linear" => Ok(DraftKind::Linear),
        "auction" => Ok(DraftKind::Auction),
        other => Err(DbError::MappingError(format!("invalid draft_kind: {other}"))),
    }
}

fn status_to_string(status: SessionStatus) -> String {
    match status {
        SessionStatus::Active => "active",
        SessionStatus::Paused => "paused",
        SessionStatus::Completed => "completed",
    }
    .to_string()
}

fn string_to_status(s: &str) -> DbResult<SessionStatus> {
    match s {
        "active" => Ok(SessionStatus::Active),
        "paused" => Ok(SessionStatus::Paused),
        "completed" => Ok(SessionStatus::Completed),
        other => Err(DbError::MappingError(format!("invalid status: {other}"))),
    }
}
