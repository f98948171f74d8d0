use crate::config::Config;

pub async fn cmd_count(config: &Config) -> anyhow::Result<()> {
    let state = super::connect_state(config).await?;
    println!("{}", state.member_service.member_count().await);
    Ok(())
}
