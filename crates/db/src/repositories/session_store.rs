use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::CoreResult;
use domain::models::{DraftPick, DraftSession};
use domain::repositories::SessionStore;

use crate::errors::{map_write_error, DbError};
use crate::models::{DraftPickDb, DraftSessionDb};

/// SQL-backed `SessionStore`. Sessions and picks live in `draft_sessions`
/// and `draft_picks`; `create_pick`/`delete_pick` apply the accompanying
/// session update in the same transaction, per SPEC_FULL.md §4.C.
pub struct SqlSessionStore {
    pool: PgPool,
}

impl SqlSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqlSessionStore {
    async fn create_session(&self, session: &DraftSession) -> CoreResult<DraftSession> {
        let row = DraftSessionDb::from_domain(session)?;

        let result = sqlx::query_as!(
            DraftSessionDb,
            r#"
            INSERT INTO draft_sessions
                (id, owner_id, league_id, name, draft_kind, team_count, round_count,
                 user_slot, current_pick, status, settings, started_at, completed_at,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, owner_id, league_id, name, draft_kind, team_count, round_count,
                      user_slot, current_pick, status, settings, started_at, completed_at,
                      created_at, updated_at
            "#,
            row.id,
            row.owner_id,
            row.league_id,
            row.name,
            row.draft_kind,
            row.team_count,
            row.round_count,
            row.user_slot,
            row.current_pick,
            row.status,
            row.settings,
            row.started_at,
            row.completed_at,
            row.created_at,
            row.updated_at,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "session with this id already exists"))?;

        result.to_domain().map_err(Into::into)
    }

    async fn get_session(&self, id: Uuid) -> CoreResult<Option<DraftSession>> {
        let row = sqlx::query_as!(
            DraftSessionDb,
            r#"
            SELECT id, owner_id, league_id, name, draft_kind, team_count, round_count,
                   user_slot, current_pick, status, settings, started_at, completed_at,
                   created_at, updated_at
            FROM draft_sessions
            WHERE id = $1
            "#,
            id
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        row.map(|r| r.to_domain()).transpose().map_err(Into::into)
    }

    async fn update_session(&self, session: &DraftSession) -> CoreResult<DraftSession> {
        let row = DraftSessionDb::from_domain(session)?;

        let result = sqlx::query_as!(
            DraftSessionDb,
            r#"
            UPDATE draft_sessions
            SET current_pick = $2, status = $3, started_at = $4, completed_at = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, owner_id, league_id, name, draft_kind, team_count, round_count,
                      user_slot, current_pick, status, settings, started_at, completed_at,
                      created_at, updated_at
            "#,
            row.id,
            row.current_pick,
            row.status,
            row.started_at,
            row.completed_at,
            row.updated_at,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?
        .ok_or_else(|| DbError::NotFound(format!("session {} not found", row.id)))?;

        result.to_domain().map_err(Into::into)
    }

    async fn delete_session(&self, id: Uuid) -> CoreResult<()> {
        let result = sqlx::query!("DELETE FROM draft_sessions WHERE id = $1", id)
            .execute(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("session {id} not found")).into());
        }
        Ok(())
    }

    async fn list_user_sessions(&self, owner_id: Uuid) -> CoreResult<Vec<DraftSession>> {
        let rows = sqlx::query_as!(
            DraftSessionDb,
            r#"
            SELECT id, owner_id, league_id, name, draft_kind, team_count, round_count,
                   user_slot, current_pick, status, settings, started_at, completed_at,
                   created_at, updated_at
            FROM draft_sessions
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
            owner_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        rows.into_iter()
            .map(|r| r.to_domain())
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn create_pick(&self, pick: &DraftPick, session: &DraftSession) -> CoreResult<DraftPick> {
        let pick_row = DraftPickDb::from_domain(pick);
        let session_row = DraftSessionDb::from_domain(session)?;

        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        let created = sqlx::query_as!(
            DraftPickDb,
            r#"
            INSERT INTO draft_picks
                (id, session_id, pick_number, round, round_pick, team_number, player_id,
                 player_name, position, is_keeper, picked_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, session_id, pick_number, round, round_pick, team_number, player_id,
                      player_name, position, is_keeper, picked_at
            "#,
            pick_row.id,
            pick_row.session_id,
            pick_row.pick_number,
            pick_row.round,
            pick_row.round_pick,
            pick_row.team_number,
            pick_row.player_id,
            pick_row.player_name,
            pick_row.position,
            pick_row.is_keeper,
            pick_row.picked_at,
        )
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(e, "pick number or player already recorded for this session")
        })?;

        sqlx::query!(
            r#"
            UPDATE draft_sessions
            SET current_pick = $2, status = $3, started_at = $4, completed_at = $5, updated_at = $6
            WHERE id = $1
            "#,
            session_row.id,
            session_row.current_pick,
            session_row.status,
            session_row.started_at,
            session_row.completed_at,
            session_row.updated_at,
        )
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;

        Ok(created.to_domain())
    }

    async fn get_picks(&self, session_id: Uuid) -> CoreResult<Vec<DraftPick>> {
        let rows = sqlx::query_as!(
            DraftPickDb,
            r#"
            SELECT id, session_id, pick_number, round, round_pick, team_number, player_id,
                   player_name, position, is_keeper, picked_at
            FROM draft_picks
            WHERE session_id = $1
            ORDER BY pick_number ASC
            "#,
            session_id
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn delete_pick(&self, pick_id: Uuid, session: &DraftSession) -> CoreResult<()> {
        let session_row = DraftSessionDb::from_domain(session)?;
        let mut tx = self.pool.begin().await.map_err(DbError::DatabaseError)?;

        let result = sqlx::query!("DELETE FROM draft_picks WHERE id = $1", pick_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("pick {pick_id} not found")).into());
        }

        sqlx::query!(
            r#"
            UPDATE draft_sessions
            SET current_pick = $2, status = $3, started_at = $4, completed_at = $5, updated_at = $6
            WHERE id = $1
            "#,
            session_row.id,
            session_row.current_pick,
            session_row.status,
            session_row.started_at,
            session_row.completed_at,
            session_row.updated_at,
        )
        .execute(&mut *tx)
        .await
        .map_err(DbError::DatabaseError)?;

        tx.commit().await.map_err(DbError::DatabaseError)?;
        Ok(())
    }
}
