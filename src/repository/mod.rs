use async_trait::async_trait;

use crate::domain::client::ClientPage;
use crate::domain::types::{PageNumber, PageSize, SearchTerm, Theme};
use crate::repository::errors::RepositoryResult;
use crate::table::sort::SortSpec;

pub mod cache;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod preferences;
pub mod random_user;

pub use cache::{CacheOptions, QueryCache, QueryState};
pub use preferences::FileThemeStore;
pub use random_user::RandomUserRepository;

/// Parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ClientListQuery {
    pub page: PageNumber,
    pub page_size: PageSize,
    pub search: Option<SearchTerm>,
    /// Applied over the fetched page only; never sent to the source.
    pub sort: Option<SortSpec>,
}

/// Subset of [`ClientListQuery`] that changes what the source returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub page: PageNumber,
    pub page_size: PageSize,
    pub search: Option<SearchTerm>,
}

impl ClientListQuery {
    pub fn new(page: PageNumber, page_size: PageSize) -> Self {
        Self {
            page,
            page_size,
            search: None,
            sort: None,
        }
    }

    /// Sets the search term; blank input clears it.
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        self.search = SearchTerm::parse_optional(Some(term.as_ref()));
        self
    }

    pub fn sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn fetch_key(&self) -> FetchKey {
        FetchKey {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
        }
    }
}

impl From<&FetchKey> for ClientListQuery {
    fn from(key: &FetchKey) -> Self {
        Self {
            page: key.page,
            page_size: key.page_size,
            search: key.search.clone(),
            sort: None,
        }
    }
}

/// Source of client pages.
#[async_trait]
pub trait ClientReader: Send + Sync {
    async fn fetch_clients(&self, query: &ClientListQuery) -> RepositoryResult<ClientPage>;
}

/// Durable storage for the theme preference.
pub trait ThemeStore {
    fn load_theme(&self) -> RepositoryResult<Option<Theme>>;
    fn save_theme(&self, theme: Theme) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::ColumnKey;
    use crate::table::sort::SortDirection;

    #[test]
    fn sort_does_not_change_fetch_key() {
        let base = ClientListQuery::default().search("ann");
        let sorted = base.clone().sort(Some(SortSpec {
            column: ColumnKey::FirstName,
            direction: SortDirection::Descending,
        }));

        assert_ne!(base, sorted);
        assert_eq!(base.fetch_key(), sorted.fetch_key());
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = ClientListQuery::default().search("   ");
        assert!(query.search.is_none());
        assert_eq!(query.page, PageNumber::FIRST);
        assert_eq!(query.page_size.get(), 10);
    }
}
