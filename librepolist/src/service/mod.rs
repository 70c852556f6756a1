//! Service layer for Repolist
//!
//! This module provides a clean, testable API for the browsing logic that
//! can be consumed by multiple interfaces (CLI, TUI, GUI) without code
//! duplication.
//!
//! # Architecture
//!
//! - [`BrowseService`]: the pagination-aware fetch controller, the single
//!   writer of the observable [`FetchState`](crate::types::FetchState)
//! - [`EventBus`](events::EventBus): fetch progress event distribution
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use librepolist::config::Config;
//! use librepolist::listing::github::GitHubListing;
//! use librepolist::service::BrowseService;
//!
//! # async fn example() {
//! let config = Config::default_config();
//! let service = BrowseService::new(Arc::new(GitHubListing::new(&config.api)));
//!
//! let state = service.search("octocat").await;
//! println!("{:?}", state);
//!
//! // Later, after the user asks for more:
//! let state = service.load_more().await;
//! println!("{:?}", state);
//! # }
//! ```

pub mod browse;
pub mod events;

// Re-export commonly used types
pub use browse::BrowseService;
pub use events::{Event, EventBus, EventReceiver};
