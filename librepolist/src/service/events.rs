//! Event system for fetch progress
//!
//! This module provides an in-process event bus that distributes fetch
//! progress events to subscribers without blocking the browse service.
//!
//! # Architecture
//!
//! The event bus uses `tokio::sync::broadcast` for multi-subscriber support.
//! The browse service emits one `FetchStarted` per issued fetch, followed by
//! exactly one `FetchSucceeded` or `FetchFailed`. Together with
//! [`BrowseService::state`](crate::service::BrowseService::state) (the
//! current-value read), this is the notification half of the observable
//! fetch state.
//!
//! # Non-Blocking Behavior
//!
//! If no subscribers exist, events are dropped immediately without
//! allocation or blocking. Subscribers can lag without blocking emitters.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing fetch progress events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// The capacity determines how many events can be buffered per
    /// subscriber before older events are dropped (if the subscriber is
    /// lagging).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events
    ///
    /// Returns a receiver that will receive all events emitted after
    /// subscription. Multiple subscribers are supported.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// This is a non-blocking operation. If no subscribers exist, the event
    /// is dropped immediately.
    pub fn emit(&self, event: Event) {
        // send() returns Err if no receivers exist, which is fine
        // We don't want to block or fail if nobody is listening
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events emitted by the browse service during fetches
///
/// All events are cloneable and serializable for flexibility in how
/// they're consumed (logging, UI updates, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A page fetch has been issued
    FetchStarted {
        /// Username being queried
        username: String,
        /// 1-based page number being fetched
        page: u32,
    },

    /// A page fetch completed successfully
    FetchSucceeded {
        /// Username being queried
        username: String,
        /// 1-based page number that was fetched
        page: u32,
        /// Records added by this page
        added: usize,
        /// Accumulated record count after this page
        total: usize,
        /// Whether the listing advertises another page
        has_more: bool,
    },

    /// A page fetch failed
    FetchFailed {
        /// Username being queried
        username: String,
        /// 1-based page number that was fetched
        page: u32,
        /// Verbatim user-facing error text
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_emission_and_subscription() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        event_bus.emit(Event::FetchStarted {
            username: "octocat".to_string(),
            page: 1,
        });

        let received = receiver.recv().await.unwrap();
        match received {
            Event::FetchStarted { username, page } => {
                assert_eq!(username, "octocat");
                assert_eq!(page, 1);
            }
            _ => panic!("Wrong event type received"),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let event_bus = EventBus::new(10);
        let mut receiver1 = event_bus.subscribe();
        let mut receiver2 = event_bus.subscribe();

        event_bus.emit(Event::FetchSucceeded {
            username: "octocat".to_string(),
            page: 2,
            added: 30,
            total: 60,
            has_more: false,
        });

        // Both receivers should get the event
        for received in [
            receiver1.recv().await.unwrap(),
            receiver2.recv().await.unwrap(),
        ] {
            match received {
                Event::FetchSucceeded {
                    page,
                    added,
                    total,
                    has_more,
                    ..
                } => {
                    assert_eq!(page, 2);
                    assert_eq!(added, 30);
                    assert_eq!(total, 60);
                    assert!(!has_more);
                }
                _ => panic!("Wrong event type received"),
            }
        }
    }

    #[tokio::test]
    async fn test_no_subscribers() {
        let event_bus = EventBus::new(10);

        // Emit event with no subscribers - should not panic or block
        event_bus.emit(Event::FetchFailed {
            username: "octocat".to_string(),
            page: 1,
            error: "Exception: connection refused".to_string(),
        });

        assert_eq!(event_bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_serialization() {
        let event = Event::FetchFailed {
            username: "octocat".to_string(),
            page: 3,
            error: "Error 404: Not Found".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("fetch_failed"));
        assert!(json.contains("Error 404: Not Found"));

        let deserialized: Event = serde_json::from_str(&json).unwrap();
        match deserialized {
            Event::FetchFailed { username, page, error } => {
                assert_eq!(username, "octocat");
                assert_eq!(page, 3);
                assert_eq!(error, "Error 404: Not Found");
            }
            _ => panic!("Deserialization failed"),
        }
    }

    #[tokio::test]
    async fn test_subscriber_count() {
        let event_bus = EventBus::new(10);
        assert_eq!(event_bus.subscriber_count(), 0);

        let _receiver1 = event_bus.subscribe();
        assert_eq!(event_bus.subscriber_count(), 1);

        let _receiver2 = event_bus.subscribe();
        assert_eq!(event_bus.subscriber_count(), 2);
    }
}
