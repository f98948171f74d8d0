//! List members command handler

use crate::config::Config;

pub async fn cmd_list_members(config: &Config) -> anyhow::Result<()> {
    let state = super::connect_state(config).await?;
    let members = state.member_service.list_all_members().await?;

    if members.is_empty() {
        println!("No members registered yet.");
        println!();
        println!("Register one with: muster register --name \"...\" --email ... --rank ...");
        return Ok(());
    }

    println!("Members ({} total, newest first)", members.len());
    println!("{:-<70}", "");

    for member in &members {
        super::print_member(member);
    }

    Ok(())
}
