use crate::config::Config;

pub async fn cmd_search_members(config: &Config, term: &str) -> anyhow::Result<()> {
    let state = super::connect_state(config).await?;

    if term.trim().is_empty() {
        println!("Search term cannot be empty.");
        return Ok(());
    }

    println!("Searching for: {term}");
    let results = state.member_service.search_members(term).await?;

    if results.is_empty() {
        println!("No members found with this name.");
        return Ok(());
    }

    println!();
    println!("Search Results ({}):", results.len());
    println!("{:-<60}", "");

    for member in &results {
        super::print_member(member);
    }

    Ok(())
}
