use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Not persisted. Produced fresh by the Recommendation Engine for a given
/// session and current pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub player_id: Uuid,
    pub name: String,
    pub position: String,
    pub team: String,
    pub score: f64,
    pub value_over_adp: f64,
    pub need_score: f64,
    pub projection_points: f64,
    pub adp: f64,
    pub reasoning: String,
}
