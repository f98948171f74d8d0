//! Rank histogram over the member set.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::ranks::{self, UNSPECIFIED_LABEL};
use crate::domain::{Member, RankCount};

/// Counts members per rank in one pass and sorts by count, highest first.
///
/// Members without a rank (or with an empty one) land in the
/// [`UNSPECIFIED_LABEL`] bucket. Equal counts are ordered by catalog
/// precedence, then labels missing from the catalog alphabetically, then the
/// unspecified bucket.
#[must_use]
pub fn aggregate(members: &[Member]) -> Vec<RankCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();

    for member in members {
        let label = member
            .military_rank
            .as_deref()
            .filter(|rank| !rank.is_empty())
            .unwrap_or(UNSPECIFIED_LABEL);
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut stats: Vec<RankCount> = counts
        .into_iter()
        .map(|(label, count)| RankCount {
            rank_label: label.to_string(),
            count,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| tie_break(&a.rank_label, &b.rank_label))
    });

    stats
}

fn tie_break(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

fn sort_key(label: &str) -> (u8, usize) {
    if label == UNSPECIFIED_LABEL {
        return (2, 0);
    }
    ranks::precedence(label).map_or((1, 0), |position| (0, position))
}
