//! DTOs exposed by the listing API endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::Theme;
use crate::pagination::Paginated;
use crate::table::sort::SortSpec;

/// Result payload returned by [`crate::services::clients::list_clients`].
#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    /// Rows of the requested page after table filters and sort.
    pub clients: Vec<Client>,
    pub page: u32,
    pub page_size: u32,
    /// Total number of clients reported by the source.
    pub total: usize,
    pub pages: Vec<Option<usize>>,
    pub has_previous: bool,
    pub has_next: bool,
    /// When the underlying page was fetched from the source.
    pub fetched_at: DateTime<Utc>,
    pub sort: Option<SortSpec>,
}

impl ClientsResponse {
    pub fn new(
        listing: Paginated<Client>,
        fetched_at: DateTime<Utc>,
        sort: Option<SortSpec>,
    ) -> Self {
        Self {
            clients: listing.items,
            page: listing.page,
            page_size: listing.page_size,
            total: listing.total,
            pages: listing.pages,
            has_previous: listing.has_previous,
            has_next: listing.has_next,
            fetched_at,
            sort,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ThemeResponse {
    pub theme: Theme,
}
