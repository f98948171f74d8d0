//! Member API endpoints.
//!
//! Handlers only map HTTP/JSON; all rules live in [`MemberService`].
//!
//! [`MemberService`]: crate::services::MemberService

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CountResponse, MemberDto, SearchResponse};
use crate::domain::validation::RegistrationForm;
use crate::services::MemberError;

impl From<MemberError> for ApiError {
    fn from(err: MemberError) -> Self {
        match err {
            MemberError::Validation(errors) => Self::InvalidFields(errors),
            MemberError::DuplicateEmail(_) => {
                Self::Conflict("This email address is already registered".to_string())
            }
            MemberError::Database(msg) => Self::DatabaseError(msg),
            MemberError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: String,
}

/// `POST /api/members`
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<ApiResponse<MemberDto>>), ApiError> {
    let member = state.member_service().register(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(member.into())),
    ))
}

/// `GET /api/members`, newest registration first.
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MemberDto>>>, ApiError> {
    let members = state.member_service().list_all_members().await?;
    Ok(Json(ApiResponse::success(
        members.into_iter().map(MemberDto::from).collect(),
    )))
}

/// `GET /api/members/search?q=`
///
/// A blank query returns an empty result set. No match is not an error; the
/// response carries an informational message instead.
pub async fn search_members(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let term = query.q.trim().to_string();
    let results = state.member_service().search_members(&term).await?;

    let message = (!term.is_empty() && results.is_empty())
        .then(|| "No members found with this name".to_string());

    Ok(Json(ApiResponse::success(SearchResponse {
        term,
        results: results.into_iter().map(MemberDto::from).collect(),
        message,
    })))
}

/// `GET /api/members/by-email?email=`
pub async fn get_member_by_email(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<ApiResponse<MemberDto>>, ApiError> {
    let email = query.email.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email query parameter is required"));
    }

    let member = state
        .member_service()
        .find_member_by_email(email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No member registered with {email}")))?;

    Ok(Json(ApiResponse::success(member.into())))
}

/// `GET /api/members/count`. Never fails; reports 0 when storage is down.
pub async fn member_count(State(state): State<Arc<AppState>>) -> Json<ApiResponse<CountResponse>> {
    let count = state.member_service().member_count().await;
    Json(ApiResponse::success(CountResponse { count }))
}
