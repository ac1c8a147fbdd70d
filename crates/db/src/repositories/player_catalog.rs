use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::CoreResult;
use domain::models::{Player, ScoringType};
use domain::repositories::{AdpSource, PlayerCatalog};

use crate::errors::DbError;
use crate::models::PlayerDb;

fn scoring_type_column(scoring_type: ScoringType) -> &'static str {
    match scoring_type {
        ScoringType::Ppr => "ppr",
        ScoringType::HalfPpr => "half_ppr",
        ScoringType::Standard => "standard",
    }
}

/// Thin read-only adapter over a `players` table plus per-scoring-type
/// projection and ADP tables. Populating those tables is an ingestion
/// pipeline concern and stays out of scope here, mirroring the teacher's
/// `SqlxPlayerRepository` read paths without its write/seed surface.
pub struct SqlPlayerCatalog {
    pool: PgPool,
}

impl SqlPlayerCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerCatalog for SqlPlayerCatalog {
    async fn get_available(&self, ids: &[Uuid]) -> CoreResult<Vec<Player>> {
        let rows = sqlx::query_as!(
            PlayerDb,
            r#"
            SELECT id, name, position, team
            FROM players
            WHERE id = ANY($1)
            ORDER BY name
            "#,
            ids,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn list_all_ids(&self) -> CoreResult<HashSet<Uuid>> {
        let rows = sqlx::query!("SELECT id FROM players")
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    async fn get_projections(
        &self,
        ids: &[Uuid],
        scoring_type: ScoringType,
    ) -> CoreResult<HashMap<Uuid, f64>> {
        let column = scoring_type_column(scoring_type);
        let rows = sqlx::query!(
            r#"
            SELECT player_id, points
            FROM player_projections
            WHERE scoring_type = $1 AND player_id = ANY($2)
            "#,
            column,
            ids,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| (r.player_id, r.points)).collect())
    }
}

/// Reads average draft position from the same scoring-type-partitioned
/// shape as projections. Missing rows are treated by `RecommendationEngine`
/// as ADP = 200, not by this adapter.
pub struct SqlAdpSource {
    pool: PgPool,
}

impl SqlAdpSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdpSource for SqlAdpSource {
    async fn get_adp(&self, scoring_type: ScoringType) -> CoreResult<HashMap<Uuid, f64>> {
        let column = scoring_type_column(scoring_type);
        let rows = sqlx::query!(
            r#"
            SELECT player_id, adp_rank
            FROM player_adp
            WHERE scoring_type = $1
            "#,
            column,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| (r.player_id, r.adp_rank)).collect())
    }
}
