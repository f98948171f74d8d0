use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, RankCountDto};
use crate::domain::ranks::RankEntry;

/// `GET /api/ranks`: picker choices, sentinel first.
pub async fn list_ranks(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<RankEntry>>> {
    Json(ApiResponse::success(state.member_service().rank_catalog()))
}

/// `GET /api/ranks/stats`
pub async fn rank_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RankCountDto>>>, ApiError> {
    let stats = state.member_service().rank_statistics().await?;
    Ok(Json(ApiResponse::success(
        stats.into_iter().map(RankCountDto::from).collect(),
    )))
}
