//! Core types for Repolist

use serde::{Deserialize, Serialize};

/// One repository as returned by the listing endpoint.
///
/// The upstream API returns many more fields; only the ones the browsing
/// flow needs are kept, everything else is ignored during deserialization.
/// Identity is `id` (server-assigned, unique). Records are never mutated
/// after they have been received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Repository {
    pub fn new(id: i64, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
        }
    }
}

/// One fetched page of repositories plus the pagination continuation signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPage {
    /// Records in response order.
    pub records: Vec<Repository>,
    /// True iff the response's `Link` header carried a `rel="next"` token.
    pub has_more: bool,
}

impl RepoPage {
    pub fn new(records: Vec<Repository>, has_more: bool) -> Self {
        Self { records, has_more }
    }

    /// A page with no records and no continuation.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            has_more: false,
        }
    }
}

/// Tracks which page of results is loaded for the active username.
///
/// Reset to page 1 whenever the username changes; `page` only advances after
/// the corresponding fetch has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub username: String,
    pub page: u32,
}

impl PageCursor {
    /// Cursor for a fresh search session (page 1).
    pub fn start(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            page: 1,
        }
    }
}

/// The observable fetch state.
///
/// Exactly one variant is active at any time and only the browse service
/// writes it. Observers read the current value and match exhaustively; the
/// serde tagging exists so states can also be forwarded across a process
/// boundary (e.g. a JSON-speaking frontend).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchState {
    /// No search has been issued yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The accumulated records of the active session, in insertion order.
    Success {
        records: Vec<Repository>,
        has_more: bool,
    },
    /// The last fetch failed; `message` is the verbatim user-facing text.
    Error { message: String },
}

impl FetchState {
    /// True for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, FetchState::Success { .. })
    }

    /// True for the `Error` variant.
    pub fn is_error(&self) -> bool {
        matches!(self, FetchState::Error { .. })
    }
}
