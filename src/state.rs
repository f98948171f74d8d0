use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{CredentialHasher, MemberService, SeaOrmMemberService, SearchService};

/// Process-wide services, built once at startup and shared by the API and CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub member_service: Arc<dyn MemberService>,
}

impl SharedState {
    /// Connects to the database and runs migrations before wiring services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::connect(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;
        store.initialize().await?;

        Self::with_store(config, store)
    }

    /// Wires services over an existing store without touching its schema.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let hasher = CredentialHasher::new(&config.security)?;
        let search = SearchService::new(store.clone(), config.search.case_sensitive);

        let member_service: Arc<dyn MemberService> =
            Arc::new(SeaOrmMemberService::new(store.clone(), hasher, search));

        Ok(Self {
            config: Arc::new(config),
            store,
            member_service,
        })
    }
}
