mod count;
mod list;
mod migrate;
mod ranks;
mod register;
mod search;
mod stats;

pub use count::cmd_count;
pub use list::cmd_list_members;
pub use migrate::cmd_migrate;
pub use ranks::cmd_ranks;
pub use register::{RegisterArgs, cmd_register};
pub use search::cmd_search_members;
pub use stats::cmd_rank_stats;

use crate::config::Config;
use crate::db::Store;
use crate::domain::Member;
use crate::state::SharedState;

/// Connects without migrating; `muster migrate` owns schema changes.
async fn connect_state(config: &Config) -> anyhow::Result<SharedState> {
    let store = Store::connect(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    SharedState::with_store(config.clone(), store)
}

fn print_member(member: &Member) {
    println!("• {} <{}>", member.name, member.email);
    println!(
        "  ID: {} | Rank: {} | Registered: {}",
        member.id,
        member.military_rank.as_deref().unwrap_or("-"),
        member.registration_date.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(phone) = &member.phone {
        println!("  Phone: {phone}");
    }
    if let Some(address) = &member.address {
        println!("  Address: {address}");
    }
}
