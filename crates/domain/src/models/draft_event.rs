use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DraftPick;

/// An entry on a session's undo/redo stack. Unlike the teacher's audit-log
/// event, this carries enough to fully reverse or replay the mutation and is
/// never persisted on its own — it only exists inside a cached `DraftState`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DraftEventKind {
    Pick(DraftPick),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftEvent {
    pub kind: DraftEventKind,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}

impl DraftEvent {
    pub fn pick(pick: DraftPick, actor: impl Into<String>) -> Self {
        Self {
            kind: DraftEventKind::Pick(pick),
            actor: actor.into(),
            created_at: Utc::now(),
        }
    }

    pub fn pick_payload(&self) -> &DraftPick {
        match &self.kind {
            DraftEventKind::Pick(pick) => pick,
        }
    }
}
