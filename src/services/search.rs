use crate::db::Store;
use crate::domain::Member;
use tracing::debug;

/// Name search over the member store.
///
/// Blank terms never reach the store: an empty query must not turn into
/// "list everything".
#[derive(Clone)]
pub struct SearchService {
    store: Store,
    case_sensitive: bool,
}

impl SearchService {
    #[must_use]
    pub const fn new(store: Store, case_sensitive: bool) -> Self {
        Self {
            store,
            case_sensitive,
        }
    }

    pub async fn search(&self, term: &str) -> anyhow::Result<Vec<Member>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let results = self
            .store
            .search_members_by_name(term, self.case_sensitive)
            .await?;

        debug!(term, hits = results.len(), "Member search");
        Ok(results)
    }
}
