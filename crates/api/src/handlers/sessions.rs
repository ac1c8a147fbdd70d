use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::AppState;
use domain::models::{DraftKind, DraftPick, DraftSession, DraftState, Settings};

/// GetSession's response body: the session with its (best-effort) attached
/// `DraftState`, flattened so existing session fields stay top-level.
#[derive(Debug, Serialize)]
pub struct SessionWithState {
    #[serde(flatten)]
    pub session: DraftSession,
    pub state: Option<DraftState>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub owner_id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub kind: DraftKind,
    pub team_count: i32,
    pub user_slot: i32,
    pub settings: Settings,
}

#[derive(Debug, Deserialize)]
pub struct OwnedRequest {
    pub owner_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RecordPickRequest {
    pub owner_id: Uuid,
    pub player_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> ApiResult<(StatusCode, Json<DraftSession>)> {
    let session = state
        .draft_service
        .create_session(
            req.owner_id,
            req.league_id,
            req.name,
            req.kind,
            req.team_count,
            req.user_slot,
            req.settings,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions?owner_id=...
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<Vec<DraftSession>>> {
    let sessions = state.draft_service.list_user_sessions(query.owner_id).await?;
    Ok(Json(sessions))
}

/// GET /api/v1/sessions/{id}?owner_id=...
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<SessionWithState>> {
    let (session, state) = state.draft_service.get_session(id, query.owner_id).await?;
    Ok(Json(SessionWithState { session, state }))
}

/// POST /api/v1/sessions/{id}/picks
pub async fn record_pick(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordPickRequest>,
) -> ApiResult<(StatusCode, Json<DraftPick>)> {
    let pick = state
        .draft_service
        .record_pick(id, req.owner_id, req.player_id)
        .await?;
    Ok((StatusCode::CREATED, Json(pick)))
}

/// POST /api/v1/sessions/{id}/undo
pub async fn undo_pick(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OwnedRequest>,
) -> ApiResult<Json<DraftPick>> {
    let pick = state.draft_service.undo_pick(id, req.owner_id).await?;
    Ok(Json(pick))
}

/// POST /api/v1/sessions/{id}/redo
pub async fn redo_pick(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OwnedRequest>,
) -> ApiResult<Json<DraftPick>> {
    let pick = state.draft_service.redo_pick(id, req.owner_id).await?;
    Ok(Json(pick))
}

/// POST /api/v1/sessions/{id}/pause
pub async fn pause_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OwnedRequest>,
) -> ApiResult<Json<DraftSession>> {
    let session = state.draft_service.pause_session(id, req.owner_id).await?;
    Ok(Json(session))
}

/// POST /api/v1/sessions/{id}/resume
pub async fn resume_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OwnedRequest>,
) -> ApiResult<Json<DraftSession>> {
    let session = state.draft_service.resume_session(id, req.owner_id).await?;
    Ok(Json(session))
}
