//! Repolist - paginated repository browsing for GitHub users
//!
//! This library provides the core functionality for querying a user's
//! public repositories page by page and exposing the result as an
//! observable four-variant fetch state.

pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{FetchError, RepolistError, Result};
pub use listing::RepoListing;
pub use service::BrowseService;
pub use types::{FetchState, PageCursor, RepoPage, Repository};
