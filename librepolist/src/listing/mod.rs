//! Repository listing abstraction and implementations
//!
//! This module provides the trait that separates the browse service from the
//! HTTP boundary. The real implementation talks to the GitHub REST API; the
//! mock implementation replays scripted pages for tests.
//!
//! # Examples
//!
//! ```no_run
//! use librepolist::listing::{RepoListing, github::GitHubListing};
//! use librepolist::config::Config;
//!
//! # async fn example() -> Result<(), librepolist::error::FetchError> {
//! let config = Config::default_config();
//! let listing = GitHubListing::new(&config.api);
//!
//! let page = listing.list_page("octocat", 1).await?;
//! println!("{} repos, more: {}", page.records.len(), page.has_more);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::RepoPage;

pub mod github;
pub mod mock;

/// One page of a user's repositories, fetched from wherever the
/// implementation points.
///
/// Implementations must be cheap to share (`Send + Sync`); the browse
/// service holds one behind an `Arc` for its whole lifetime.
#[async_trait]
pub trait RepoListing: Send + Sync {
    /// Fetch one page of repositories for `username`.
    ///
    /// Pages are 1-based. A page past the end of the listing is not an
    /// error: it comes back as an empty page with `has_more == false`.
    ///
    /// # Errors
    ///
    /// - `FetchError::Http` for a non-2xx response, carrying the numeric
    ///   status and its status text.
    /// - `FetchError::Exception` for anything that failed before a status
    ///   was obtained (connect, DNS, TLS) or while decoding the body.
    async fn list_page(&self, username: &str, page: u32) -> Result<RepoPage, FetchError>;
}
