//! Domain service for member registration, lookup and statistics.
//!
//! Callers (HTTP handlers, CLI commands) receive structured results and decide
//! how to present them; nothing here knows about pages or flash messages.

use thiserror::Error;

use crate::domain::ranks::RankEntry;
use crate::domain::validation::{RegistrationForm, ValidationErrors};
use crate::domain::{Member, RankCount};

/// Errors specific to member operations.
#[derive(Debug, Error)]
pub enum MemberError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Email is already registered: {0}")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MemberError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MemberError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

impl From<ValidationErrors> for MemberError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[async_trait::async_trait]
pub trait MemberService: Send + Sync {
    /// Validates, hashes and stores a new member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberError::Validation`] with every failing field,
    /// [`MemberError::DuplicateEmail`] if the email is taken. Neither stores
    /// anything.
    async fn register(&self, form: RegistrationForm) -> Result<Member, MemberError>;

    /// Members whose name contains `term`. Blank terms yield an empty list.
    async fn search_members(&self, term: &str) -> Result<Vec<Member>, MemberError>;

    /// Every member, most recently registered first.
    async fn list_all_members(&self) -> Result<Vec<Member>, MemberError>;

    async fn rank_statistics(&self) -> Result<Vec<RankCount>, MemberError>;

    /// Advisory count; 0 when the store is unavailable or not initialized.
    async fn member_count(&self) -> u64;

    async fn find_member_by_email(&self, email: &str) -> Result<Option<Member>, MemberError>;

    /// Checks a password against the stored hash. False for unknown emails.
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<bool, MemberError>;

    fn rank_catalog(&self) -> Vec<RankEntry>;
}
