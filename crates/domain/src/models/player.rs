use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog player, as surfaced by `PlayerCatalog`. This is intentionally a
/// thin read-model — roster construction, eligibility, and rankings are
/// owned by the external catalog collaborator (see SPEC_FULL.md §6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub team: String,
}
