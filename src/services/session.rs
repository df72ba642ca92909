//! Interactive listing state for one presentation-layer view.
//!
//! The session owns the current request parameters, the table state and the
//! last applied page. Every load takes a generation ticket; when a newer load
//! was started before an older one resolved, the older result is discarded so
//! the view always reflects the last request issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::client::{Client, ClientPage};
use crate::domain::types::{PageNumber, PageSize};
use crate::repository::{ClientListQuery, ClientReader, QueryCache, QueryState};
use crate::services::{ServiceError, ServiceResult};
use crate::table::TableEngine;
use crate::table::column::ColumnKey;
use crate::table::sort::SortDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched page is now the one on display.
    Applied,
    /// A newer request was issued meanwhile; this result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct SessionView {
    query: ClientListQuery,
    table: TableEngine,
    page: Option<ClientPage>,
    error: Option<String>,
}

pub struct ClientListSession<R> {
    cache: Arc<QueryCache<R>>,
    generation: AtomicU64,
    view: Mutex<SessionView>,
}

impl<R> ClientListSession<R>
where
    R: ClientReader,
{
    pub fn new(cache: Arc<QueryCache<R>>) -> Self {
        Self::with_query(cache, ClientListQuery::default())
    }

    /// Starts a session on `query` without loading it yet.
    pub fn with_query(cache: Arc<QueryCache<R>>, query: ClientListQuery) -> Self {
        let mut table = TableEngine::default();
        if table.set_sort(query.sort).is_err() {
            log::warn!("Ignoring unsortable initial sort for clients session");
        }
        let query = ClientListQuery {
            sort: table.sort_state().current(),
            ..query
        };
        Self {
            cache,
            generation: AtomicU64::new(0),
            view: Mutex::new(SessionView {
                query,
                table,
                ..SessionView::default()
            }),
        }
    }

    fn view(&self) -> MutexGuard<'_, SessionView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the page for the current query and applies it if still current.
    pub async fn load(&self) -> ServiceResult<LoadOutcome> {
        let (ticket, query) = {
            let view = self.view();
            let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (ticket, view.query.clone())
        };

        let result = self.cache.get(&query).await;

        let mut view = self.view();
        if self.generation.load(Ordering::SeqCst) != ticket {
            log::debug!(
                "Discarding superseded result for clients page {} (request {ticket})",
                query.page
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                view.page = Some(page);
                view.error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                log::error!("Failed to load clients page {}: {err}", query.page);
                view.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Drops the cached page for the current query and loads it again.
    pub async fn refresh(&self) -> ServiceResult<LoadOutcome> {
        let query = self.query();
        self.cache.invalidate(&query).await;
        self.load().await
    }

    pub async fn set_page(&self, page: u32) -> ServiceResult<LoadOutcome> {
        let page = PageNumber::new(page)?;
        self.view().query.page = page;
        self.load().await
    }

    pub async fn next_page(&self) -> ServiceResult<LoadOutcome> {
        {
            let mut view = self.view();
            view.query.page = view.query.page.next();
        }
        self.load().await
    }

    /// Moves one page back; on the first page this only reloads it.
    pub async fn previous_page(&self) -> ServiceResult<LoadOutcome> {
        {
            let mut view = self.view();
            view.query.page = view.query.page.previous();
        }
        self.load().await
    }

    /// Changes the page size. Values outside the menu are rejected and the
    /// current size is kept.
    pub async fn set_page_size(&self, page_size: u32) -> ServiceResult<LoadOutcome> {
        let page_size = PageSize::new(page_size).map_err(|err| {
            log::warn!("Rejected page size change: {err}");
            ServiceError::from(err)
        })?;
        self.view().query.page_size = page_size;
        self.load().await
    }

    pub async fn set_search(&self, term: &str) -> ServiceResult<LoadOutcome> {
        {
            let mut view = self.view();
            let query = std::mem::take(&mut view.query);
            view.query = query.search(term);
        }
        self.load().await
    }

    /// Advances the sort indicator of `column`; sorting never triggers a fetch.
    pub fn toggle_sort(&self, column: ColumnKey) -> ServiceResult<Option<SortDirection>> {
        let mut view = self.view();
        let direction = view.table.toggle_sort(column)?;
        view.query.sort = view.table.sort_state().current();
        Ok(direction)
    }

    pub fn sort_direction(&self, column: ColumnKey) -> Option<SortDirection> {
        self.view().table.sort_direction(column)
    }

    pub fn set_global_filter(&self, value: &str) {
        self.view().table.set_global_filter(value);
    }

    pub fn set_column_filter(&self, column: ColumnKey, value: &str) -> ServiceResult<()> {
        self.view().table.set_column_filter(column, value)?;
        Ok(())
    }

    pub fn set_column_visible(&self, column: ColumnKey, visible: bool) -> ServiceResult<()> {
        self.view().table.set_column_visible(column, visible)?;
        Ok(())
    }

    pub fn query(&self) -> ClientListQuery {
        self.view().query.clone()
    }

    /// Rows of the applied page in display order.
    pub fn visible_rows(&self) -> Vec<Client> {
        let view = self.view();
        match &view.page {
            Some(page) => view.table.rows(&page.clients).into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Total reported by the source for the applied page.
    pub fn total(&self) -> Option<usize> {
        self.view().page.as_ref().map(|page| page.total)
    }

    pub fn find_client(&self, id: &str) -> Option<Client> {
        self.view()
            .page
            .as_ref()
            .and_then(|page| page.find(id))
            .cloned()
    }

    /// Error of the last applied load, if it failed.
    pub fn error(&self) -> Option<String> {
        self.view().error.clone()
    }

    /// Loading/stale/error state of the current query in the cache.
    pub fn state(&self) -> QueryState {
        let query = self.query();
        self.cache.state(&query)
    }
}
