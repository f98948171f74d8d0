use anyhow::Context;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Member, MemberId, NewMember};
use crate::entities::{members, prelude::*};

#[derive(Debug, Error)]
pub enum InsertMemberError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<members::Model> for Member {
    fn from(model: members::Model) -> Self {
        Self {
            id: MemberId::new(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            military_rank: model.military_rank,
            registration_date: model.registration_date,
        }
    }
}

/// Millisecond UTC timestamp in the text form sqlx decodes as `DateTime<Utc>`.
const SQLITE_NOW: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

pub struct MemberRepository {
    conn: DatabaseConnection,
}

impl MemberRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a member, relying on the `email` unique constraint to reject
    /// duplicates so that concurrent registrations cannot both succeed.
    ///
    /// `registration_date` comes from SQLite's clock inside the INSERT, which
    /// runs under the database write lock, so dates never decrease as ids grow.
    pub async fn insert(&self, member: NewMember) -> Result<Member, InsertMemberError> {
        let email = member.email.clone();

        let stmt = Query::insert()
            .into_table(Members)
            .columns([
                members::Column::Name,
                members::Column::Email,
                members::Column::PasswordHash,
                members::Column::Phone,
                members::Column::Address,
                members::Column::MilitaryRank,
                members::Column::RegistrationDate,
            ])
            .values([
                member.name.into(),
                member.email.into(),
                member.password_hash.into(),
                member.phone.into(),
                member.address.into(),
                member.military_rank.into(),
                Expr::cust(SQLITE_NOW),
            ])
            .map_err(|e| DbErr::Custom(e.to_string()))?
            .to_owned();

        let backend = self.conn.get_database_backend();
        let result = match self.conn.execute(backend.build(&stmt)).await {
            Ok(result) => result,
            Err(err) => {
                return match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        Err(InsertMemberError::DuplicateEmail(email))
                    }
                    _ => Err(InsertMemberError::Database(err)),
                };
            }
        };

        let id = i32::try_from(result.last_insert_id())
            .map_err(|e| DbErr::Custom(format!("Member id out of range: {e}")))?;

        let model = Members::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Inserted member {id} not found")))?;

        debug!(member_id = model.id, "Inserted member");
        Ok(Member::from(model))
    }

    pub async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Member>> {
        let member = Members::find()
            .filter(members::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query member by email")?;

        Ok(member.map(Member::from))
    }

    /// Returns the stored hash for `email`, for credential verification.
    pub async fn password_hash_by_email(&self, email: &str) -> anyhow::Result<Option<String>> {
        let member = Members::find()
            .filter(members::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query member credentials")?;

        Ok(member.map(|m| m.password_hash))
    }

    /// Substring match over names. `instr` is used rather than `LIKE` so the
    /// term is matched literally and case handling does not depend on `LIKE`
    /// pragmas. Case-insensitive mode relies on SQLite `lower()`, which only
    /// folds ASCII letters.
    pub async fn search_by_name(
        &self,
        term: &str,
        case_sensitive: bool,
    ) -> anyhow::Result<Vec<Member>> {
        let condition = if case_sensitive {
            Expr::cust_with_values(r#"instr("name", $1) > 0"#, [term])
        } else {
            Expr::cust_with_values(r#"instr(lower("name"), lower($1)) > 0"#, [term])
        };

        let rows = Members::find()
            .filter(condition)
            .order_by_asc(members::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to search members by name")?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    /// Ids follow insertion order, so they decide recency.
    pub async fn list_newest_first(&self) -> anyhow::Result<Vec<Member>> {
        let rows = Members::find()
            .order_by_desc(members::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list members")?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    pub async fn all(&self) -> anyhow::Result<Vec<Member>> {
        let rows = Members::find()
            .all(&self.conn)
            .await
            .context("Failed to load members")?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        Members::find()
            .count(&self.conn)
            .await
            .context("Failed to count members")
    }
}
