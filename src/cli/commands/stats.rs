use crate::config::Config;

pub async fn cmd_rank_stats(config: &Config) -> anyhow::Result<()> {
    let state = super::connect_state(config).await?;
    let stats = state.member_service.rank_statistics().await?;

    if stats.is_empty() {
        println!("No members registered yet.");
        return Ok(());
    }

    let total: u64 = stats.iter().map(|s| s.count).sum();

    println!("Members by rank ({total} total)");
    println!("{:-<40}", "");
    for stat in &stats {
        println!("{:<20} {:>6}", stat.rank_label, stat.count);
    }

    Ok(())
}
