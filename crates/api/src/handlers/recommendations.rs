use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::AppState;
use domain::models::Recommendation;

fn default_count() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub owner_id: Uuid,
    #[serde(default = "default_count")]
    pub count: usize,
}

/// GET /api/v1/sessions/{id}/recommendations?owner_id=...&count=...
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RecommendationsQuery>,
) -> ApiResult<Json<Vec<Recommendation>>> {
    let (session, draft_state) = state
        .draft_service
        .load_session_and_state(id, query.owner_id)
        .await?;

    let recommendations = state
        .recommendation_engine
        .recommend(&session, &draft_state, query.count)
        .await?;

    Ok(Json(recommendations))
}
