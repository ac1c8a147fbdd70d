use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Player;

#[derive(Debug, Clone, FromRow)]
pub struct PlayerDb {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub team: String,
}

impl PlayerDb {
    pub fn to_domain(&self) -> Player {
        Player {
            id: self.id,
            name: self.name.clone(),
            position: self.position.clone(),
            team: self.team.clone(),
        }
    }
}
