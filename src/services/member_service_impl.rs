//! `SeaORM` implementation of the `MemberService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::{InsertMemberError, Store};
use crate::domain::ranks::{self, RankEntry};
use crate::domain::validation::{RegistrationForm, validate_registration};
use crate::domain::{Member, NewMember, RankCount};
use crate::services::credentials::CredentialHasher;
use crate::services::member_service::{MemberError, MemberService};
use crate::services::search::SearchService;
use crate::services::statistics;

pub struct SeaOrmMemberService {
    store: Store,
    hasher: CredentialHasher,
    search: SearchService,
}

impl SeaOrmMemberService {
    #[must_use]
    pub const fn new(store: Store, hasher: CredentialHasher, search: SearchService) -> Self {
        Self {
            store,
            hasher,
            search,
        }
    }
}

#[async_trait]
impl MemberService for SeaOrmMemberService {
    async fn register(&self, form: RegistrationForm) -> Result<Member, MemberError> {
        let valid = match validate_registration(form) {
            Ok(valid) => valid,
            Err(errors) => {
                metrics::counter!("member_registrations_rejected_total", "reason" => "validation")
                    .increment(1);
                return Err(errors.into());
            }
        };

        let password_hash = self
            .hasher
            .hash_blocking(valid.password)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))?;

        let new_member = NewMember {
            name: valid.name,
            email: valid.email,
            password_hash,
            phone: valid.phone,
            address: valid.address,
            military_rank: Some(valid.military_rank),
        };

        match self.store.insert_member(new_member).await {
            Ok(member) => {
                metrics::counter!("members_registered_total").increment(1);
                info!(member_id = %member.id, "Registered member");
                Ok(member)
            }
            Err(InsertMemberError::DuplicateEmail(email)) => {
                metrics::counter!("member_registrations_rejected_total", "reason" => "duplicate_email")
                    .increment(1);
                Err(MemberError::DuplicateEmail(email))
            }
            Err(InsertMemberError::Database(err)) => Err(err.into()),
        }
    }

    async fn search_members(&self, term: &str) -> Result<Vec<Member>, MemberError> {
        Ok(self.search.search(term).await?)
    }

    async fn list_all_members(&self) -> Result<Vec<Member>, MemberError> {
        Ok(self.store.list_members_newest_first().await?)
    }

    async fn rank_statistics(&self) -> Result<Vec<RankCount>, MemberError> {
        let members = self.store.all_members().await?;
        Ok(statistics::aggregate(&members))
    }

    async fn member_count(&self) -> u64 {
        match self.store.count_members().await {
            Ok(count) => count,
            Err(e) => {
                warn!("Member count unavailable, reporting 0: {e:#}");
                0
            }
        }
    }

    async fn find_member_by_email(&self, email: &str) -> Result<Option<Member>, MemberError> {
        Ok(self.store.find_member_by_email(email.trim()).await?)
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> Result<bool, MemberError> {
        let Some(hash) = self.store.get_member_password_hash(email.trim()).await? else {
            return Ok(false);
        };

        self.hasher
            .matches_blocking(password.to_string(), hash)
            .await
            .map_err(|e| MemberError::Internal(e.to_string()))
    }

    fn rank_catalog(&self) -> Vec<RankEntry> {
        ranks::choices().collect()
    }
}
