use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::connect(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    store.initialize().await?;

    println!(
        "✓ Database schema is up to date ({} members)",
        store.count_members().await?
    );
    Ok(())
}
