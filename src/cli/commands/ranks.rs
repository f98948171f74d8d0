use crate::domain::ranks::RANKS;

pub fn cmd_ranks() {
    println!("Military ranks (highest first)");
    println!("{:-<40}", "");
    for (i, rank) in RANKS.iter().enumerate() {
        println!("{:>2}. {}", i + 1, rank.label);
    }
}
