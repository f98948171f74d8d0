use serde::Serialize;

use crate::domain::validation::{FieldError, ValidationErrors};
use crate::domain::{Member, RankCount};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: None,
        }
    }

    pub fn field_errors(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: Some(errors.iter().cloned().collect()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub military_rank: Option<String>,
    pub registration_date: String,
}

impl From<Member> for MemberDto {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value(),
            name: member.name,
            email: member.email,
            phone: member.phone,
            address: member.address,
            military_rank: member.military_rank,
            registration_date: member.registration_date.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub term: String,
    pub results: Vec<MemberDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct RankCountDto {
    pub rank_label: String,
    pub count: u64,
}

impl From<RankCount> for RankCountDto {
    fn from(stat: RankCount) -> Self {
        Self {
            rank_label: stat.rank_label,
            count: stat.count,
        }
    }
}
