//! Browse service: the pagination-aware fetch controller
//!
//! Owns the page cursor and the accumulated result set for the active
//! username session, issues one listing request per operation, and maintains
//! the observable [`FetchState`].
//!
//! # Sequencing
//!
//! The cursor and accumulator live behind an async mutex that is held for
//! the whole fetch protocol, so overlapping `search`/`load_more` calls run
//! in arrival order and every published state is the product of exactly one
//! completed fetch. There is no retry, no request timeout, and no
//! cancellation of a fetch already underway.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::events::{Event, EventBus, EventReceiver};
use crate::listing::RepoListing;
use crate::types::{FetchState, PageCursor, Repository};

/// Cursor and accumulator of the active username session.
struct BrowseInner {
    cursor: Option<PageCursor>,
    records: Vec<Repository>,
}

/// The fetch controller.
///
/// Construct one per browsing session owner (screen, CLI invocation, ...);
/// it is the single writer of its `FetchState`, which any number of
/// observers may read via [`state`](Self::state) and watch via
/// [`subscribe`](Self::subscribe).
pub struct BrowseService {
    listing: Arc<dyn RepoListing>,
    inner: Mutex<BrowseInner>,
    state: std::sync::Mutex<FetchState>,
    event_bus: EventBus,
}

impl BrowseService {
    /// Create a browse service on top of a repository listing.
    pub fn new(listing: Arc<dyn RepoListing>) -> Self {
        Self {
            listing,
            inner: Mutex::new(BrowseInner {
                cursor: None,
                records: Vec::new(),
            }),
            state: std::sync::Mutex::new(FetchState::Idle),
            event_bus: EventBus::new(100),
        }
    }

    /// Start a new session for `username`.
    ///
    /// Resets the cursor to page 1, discards everything accumulated for the
    /// previous username, and fetches the first page. Returns the resulting
    /// state (`Success` or `Error`).
    pub async fn search(&self, username: &str) -> FetchState {
        let mut inner = self.inner.lock().await;
        inner.cursor = Some(PageCursor::start(username));
        inner.records.clear();
        self.fetch_page(&mut inner, username, 1).await
    }

    /// Fetch the next page of the active session, appending to the
    /// accumulated set.
    ///
    /// A no-op when no search has been issued yet: no request is made and
    /// the current state is returned unchanged.
    pub async fn load_more(&self) -> FetchState {
        let mut inner = self.inner.lock().await;
        let (username, next_page) = match &inner.cursor {
            Some(cursor) => (cursor.username.clone(), cursor.page + 1),
            None => {
                debug!("load_more with no active session, ignoring");
                return self.state();
            }
        };
        self.fetch_page(&mut inner, &username, next_page).await
    }

    /// The current fetch state (cloned out of the observable cell).
    pub fn state(&self) -> FetchState {
        self.state.lock().unwrap().clone()
    }

    /// Subscribe to fetch progress events.
    ///
    /// Each issued fetch produces one `FetchStarted` followed by exactly one
    /// `FetchSucceeded` or `FetchFailed`.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }

    /// The shared fetch protocol of `search` and `load_more`.
    ///
    /// Runs with the session lock held. The cursor only advances and the
    /// accumulator only grows on success; a failed fetch leaves both
    /// untouched so the same page can be requested again.
    async fn fetch_page(
        &self,
        inner: &mut BrowseInner,
        username: &str,
        page: u32,
    ) -> FetchState {
        self.set_state(FetchState::Loading);
        self.event_bus.emit(Event::FetchStarted {
            username: username.to_string(),
            page,
        });
        info!("Fetching page {} for {}", page, username);

        let state = match self.listing.list_page(username, page).await {
            Ok(fetched) => {
                let added = fetched.records.len();
                inner.records.extend(fetched.records);
                if let Some(cursor) = inner.cursor.as_mut() {
                    cursor.page = page;
                }

                info!(
                    "Page {} for {}: {} new records, {} total, has_more={}",
                    page,
                    username,
                    added,
                    inner.records.len(),
                    fetched.has_more
                );
                self.event_bus.emit(Event::FetchSucceeded {
                    username: username.to_string(),
                    page,
                    added,
                    total: inner.records.len(),
                    has_more: fetched.has_more,
                });

                FetchState::Success {
                    records: inner.records.clone(),
                    has_more: fetched.has_more,
                }
            }
            Err(error) => {
                warn!("Fetch failed for {} page {}: {}", username, page, error);
                let message = error.to_string();
                self.event_bus.emit(Event::FetchFailed {
                    username: username.to_string(),
                    page,
                    error: message.clone(),
                });

                FetchState::Error { message }
            }
        };

        self.set_state(state.clone());
        state
    }

    fn set_state(&self, state: FetchState) {
        *self.state.lock().unwrap() = state;
    }
}
