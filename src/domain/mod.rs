//! Domain types for the member registry.
//!
//! Everything here is storage-agnostic: the repositories map ORM models into
//! these types and the API serializes them directly.

pub mod ranks;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Store-assigned identity of a [`Member`].
///
/// # Examples
///
/// ```rust
/// use muster::domain::MemberId;
///
/// let id = MemberId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize,
)]
#[serde(transparent)]
pub struct MemberId(i32);

impl MemberId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered member. The password hash is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub military_rank: Option<String>,
    pub registration_date: DateTime<Utc>,
}

/// A validated registration whose password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub military_rank: Option<String>,
}

/// One bucket of the rank histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankCount {
    pub rank_label: String,
    pub count: u64,
}
