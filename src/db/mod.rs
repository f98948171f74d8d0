use crate::domain::{Member, NewMember};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::member::InsertMemberError;

/// Handle to the member database. Cheap to clone; every clone shares the pool.
#[derive(Clone)]
pub struct Store {
    conn: DatabaseConnection,
}

impl Store {
    /// Connects without touching the schema. Call [`Store::initialize`] before
    /// serving traffic.
    pub async fn connect(db_url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        if !db_url.contains(":memory:") {
            let path_str = sqlite_file_path(db_url);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to database: {db_url}"))?;

        info!(
            "Database connected (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Applies pending migrations. Safe to run against an initialized database.
    pub async fn initialize(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::up(&self.conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!("Database migrations applied");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn member_repo(&self) -> repositories::member::MemberRepository {
        repositories::member::MemberRepository::new(self.conn.clone())
    }

    pub async fn insert_member(&self, member: NewMember) -> Result<Member, InsertMemberError> {
        self.member_repo().insert(member).await
    }

    pub async fn find_member_by_email(&self, email: &str) -> Result<Option<Member>> {
        self.member_repo().find_by_email(email).await
    }

    pub async fn get_member_password_hash(&self, email: &str) -> Result<Option<String>> {
        self.member_repo().password_hash_by_email(email).await
    }

    pub async fn search_members_by_name(
        &self,
        term: &str,
        case_sensitive: bool,
    ) -> Result<Vec<Member>> {
        self.member_repo().search_by_name(term, case_sensitive).await
    }

    pub async fn list_members_newest_first(&self) -> Result<Vec<Member>> {
        self.member_repo().list_newest_first().await
    }

    pub async fn all_members(&self) -> Result<Vec<Member>> {
        self.member_repo().all().await
    }

    pub async fn count_members(&self) -> Result<u64> {
        self.member_repo().count().await
    }
}

/// Filesystem path of a `sqlite:` URL, without scheme or query string.
fn sqlite_file_path(db_url: &str) -> &str {
    let rest = db_url.trim_start_matches("sqlite:");
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    rest.split('?').next().unwrap_or(rest)
}
