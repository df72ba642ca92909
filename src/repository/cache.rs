//! Memoizing layer in front of a [`ClientReader`].
//!
//! Pages are keyed by [`FetchKey`]. Each key owns an async slot lock, so at
//! most one fetch per key runs at a time; callers that queued behind a fetch
//! receive its outcome instead of issuing their own request. Slots left
//! unused for longer than [`CacheOptions::gc_after`] are swept whenever a new
//! key is inserted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::Mutex as AsyncMutex;

use crate::domain::client::ClientPage;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader, FetchKey};

pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 1;
pub const DEFAULT_GC_AFTER: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Copy)]
pub struct CacheOptions {
    /// Age after which an entry is refetched on next access.
    pub stale_after: Duration,
    /// Extra attempts for retryable failures.
    pub retry_attempts: u32,
    /// Idle time after which an unused entry is dropped.
    pub gc_after: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            stale_after: DEFAULT_STALE_AFTER,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            gc_after: DEFAULT_GC_AFTER,
        }
    }
}

/// Observable state of one cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    /// Never requested (or invalidated).
    Idle,
    Loading,
    Fresh,
    Stale,
    Failed(String),
}

#[derive(Debug)]
struct CachedPage {
    page: ClientPage,
    stored_at: Instant,
}

#[derive(Debug, Default)]
struct SlotState {
    cached: Option<CachedPage>,
    last_error: Option<RepositoryError>,
}

/// Lock-free mirror of [`SlotState`] for [`QueryCache::state`].
#[derive(Debug, Default)]
struct SlotStatus {
    loading: bool,
    stored_at: Option<Instant>,
    last_error: Option<String>,
    last_used: Option<Instant>,
}

#[derive(Debug, Default)]
struct Slot {
    state: AsyncMutex<SlotState>,
    completions: AtomicU64,
    status: Mutex<SlotStatus>,
}

impl Slot {
    fn status(&self) -> std::sync::MutexGuard<'_, SlotStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        self.status().last_used = Some(Instant::now());
    }

    fn is_collectable(&self, gc_after: Duration) -> bool {
        let status = self.status();
        !status.loading && status.last_used.is_none_or(|at| at.elapsed() >= gc_after)
    }

    fn reset(&self, state: &mut SlotState) {
        state.cached = None;
        state.last_error = None;
        let mut status = self.status();
        status.stored_at = None;
        status.last_error = None;
    }

    fn snapshot(&self, stale_after: Duration) -> QueryState {
        let status = self.status();
        if status.loading {
            return QueryState::Loading;
        }
        if let Some(message) = &status.last_error {
            return QueryState::Failed(message.clone());
        }
        match status.stored_at {
            Some(at) if at.elapsed() < stale_after => QueryState::Fresh,
            Some(_) => QueryState::Stale,
            None => QueryState::Idle,
        }
    }
}

/// Clears the loading flag even when the fetching future is dropped.
struct LoadingGuard<'a> {
    slot: &'a Slot,
    completed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn start(slot: &'a Slot) -> Self {
        slot.status().loading = true;
        Self {
            slot,
            completed: false,
        }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.slot.status().loading = false;
        // a cancelled fetch has no outcome to share with queued callers
        if self.completed {
            self.slot.completions.fetch_add(1, Ordering::Release);
        }
    }
}

pub struct QueryCache<R> {
    reader: R,
    options: CacheOptions,
    slots: Mutex<HashMap<FetchKey, Arc<Slot>>>,
}

impl<R> QueryCache<R>
where
    R: ClientReader,
{
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, CacheOptions::default())
    }

    pub fn with_options(reader: R, options: CacheOptions) -> Self {
        Self {
            reader,
            options,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<FetchKey, Arc<Slot>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, key: &FetchKey) -> Arc<Slot> {
        let mut slots = self.slots();
        if let Some(slot) = slots.get(key) {
            return slot.clone();
        }

        let gc_after = self.options.gc_after;
        let before = slots.len();
        // entries still held by a caller are in use
        slots.retain(|_, slot| Arc::strong_count(slot) > 1 || !slot.is_collectable(gc_after));
        if slots.len() < before {
            log::debug!("Dropped {} unused cache entries", before - slots.len());
        }

        let slot = Arc::new(Slot::default());
        slots.insert(key.clone(), slot.clone());
        slot
    }

    /// Returns the page for `query`, fetching it when missing or stale.
    pub async fn get(&self, query: &ClientListQuery) -> RepositoryResult<ClientPage> {
        let key = query.fetch_key();
        let slot = self.slot(&key);
        slot.touch();

        let seen = slot.completions.load(Ordering::Acquire);
        let mut state = slot.state.lock().await;

        if slot.completions.load(Ordering::Acquire) != seen {
            // A fetch for this key finished while we were queued; share its outcome.
            if let Some(err) = &state.last_error {
                return Err(err.clone());
            }
            if let Some(cached) = &state.cached {
                return Ok(cached.page.clone());
            }
        }

        if let Some(cached) = &state.cached {
            if cached.stored_at.elapsed() < self.options.stale_after {
                log::debug!("Cache hit for clients page {}", key.page);
                return Ok(cached.page.clone());
            }
            log::debug!("Cached clients page {} is stale, refetching", key.page);
        }

        let mut guard = LoadingGuard::start(&slot);
        let result = self.fetch_with_retry(&ClientListQuery::from(&key)).await;

        let outcome = match result {
            Ok(page) => {
                let stored_at = Instant::now();
                state.cached = Some(CachedPage {
                    page: page.clone(),
                    stored_at,
                });
                state.last_error = None;
                let mut status = slot.status();
                status.stored_at = Some(stored_at);
                status.last_error = None;
                Ok(page)
            }
            Err(err) => {
                state.last_error = Some(err.clone());
                slot.status().last_error = Some(err.to_string());
                Err(err)
            }
        };

        guard.completed = true;
        drop(guard);
        outcome
    }

    async fn fetch_with_retry(&self, query: &ClientListQuery) -> RepositoryResult<ClientPage> {
        let mut attempt = 0;
        loop {
            match self.reader.fetch_clients(query).await {
                Ok(page) => return Ok(page),
                Err(err) if err.is_retryable() && attempt < self.options.retry_attempts => {
                    attempt += 1;
                    log::warn!(
                        "Fetching clients page {} failed, retrying ({attempt}/{}): {err}",
                        query.page,
                        self.options.retry_attempts
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Cached page for `query` regardless of staleness, without fetching.
    pub async fn peek(&self, query: &ClientListQuery) -> Option<ClientPage> {
        let slot = self.slots().get(&query.fetch_key()).cloned()?;
        let state = slot.state.lock().await;
        state.cached.as_ref().map(|cached| cached.page.clone())
    }

    pub fn state(&self, query: &ClientListQuery) -> QueryState {
        match self.slots().get(&query.fetch_key()) {
            Some(slot) => slot.snapshot(self.options.stale_after),
            None => QueryState::Idle,
        }
    }

    /// Forgets the cached outcome for `query`.
    ///
    /// Waits for a fetch in flight for the same key, so the next `get` never
    /// races it with a second request.
    pub async fn invalidate(&self, query: &ClientListQuery) {
        let Some(slot) = self.slots().get(&query.fetch_key()).cloned() else {
            return;
        };
        let mut state = slot.state.lock().await;
        slot.reset(&mut state);
    }

    pub async fn clear(&self) {
        let slots: Vec<Arc<Slot>> = self.slots().values().cloned().collect();
        for slot in slots {
            let mut state = slot.state.lock().await;
            slot.reset(&mut state);
        }
    }
}
