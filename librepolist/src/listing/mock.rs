//! Mock repository listing for testing
//!
//! A scripted implementation of [`RepoListing`] that replays configured
//! pages or failures per `(username, page)` pair, records every request it
//! receives, and can simulate network latency. It lives outside
//! `#[cfg(test)]` so integration tests (and downstream consumers' tests)
//! can use it too.
//!
//! Scripting the same `(username, page)` more than once queues the
//! responses: each request consumes the next one, and the last response
//! sticks for any further requests. That makes fail-then-succeed sequences
//! (e.g. a retried page) straightforward to express.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use super::RepoListing;
use crate::error::FetchError;
use crate::types::{RepoPage, Repository};

type ScriptedResponse = Result<RepoPage, FetchError>;

/// Scripted, request-recording listing.
pub struct MockListing {
    responses: Mutex<HashMap<(String, u32), VecDeque<ScriptedResponse>>>,
    delay: Duration,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockListing {
    /// Create an empty mock. Every request against an unscripted
    /// `(username, page)` pair fails loudly with an `Exception`, so a test
    /// that fetches something unexpected cannot pass by accident.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            delay: Duration::from_millis(0),
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push_response(self, username: &str, page: u32, response: ScriptedResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((username.to_string(), page))
            .or_default()
            .push_back(response);
        self
    }

    /// Script a successful page.
    pub fn with_page(
        self,
        username: &str,
        page: u32,
        records: Vec<Repository>,
        has_more: bool,
    ) -> Self {
        self.push_response(username, page, Ok(RepoPage { records, has_more }))
    }

    /// Script a non-2xx response.
    pub fn with_http_error(
        self,
        username: &str,
        page: u32,
        status: u16,
        status_text: &str,
    ) -> Self {
        self.push_response(
            username,
            page,
            Err(FetchError::Http {
                status,
                status_text: status_text.to_string(),
            }),
        )
    }

    /// Script a transport/parse failure.
    pub fn with_exception(self, username: &str, page: u32, message: &str) -> Self {
        self.push_response(
            username,
            page,
            Err(FetchError::Exception(message.to_string())),
        )
    }

    /// Add latency before every response (simulates the network).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `list_page` calls received so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every `(username, page)` requested, in order.
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockListing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepoListing for MockListing {
    async fn list_page(&self, username: &str, page: u32) -> Result<RepoPage, FetchError> {
        *self.call_count.lock().unwrap() += 1;
        self.requests
            .lock()
            .unwrap()
            .push((username.to_string(), page));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&(username.to_string(), page)) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| unscripted(username, page)),
            None => unscripted(username, page),
        }
    }
}

fn unscripted(username: &str, page: u32) -> ScriptedResponse {
    Err(FetchError::Exception(format!(
        "no scripted response for {} page {}",
        username, page
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_scripted_page() {
        let mock = MockListing::new().with_page(
            "octocat",
            1,
            vec![Repository::new(1, "Hello-World", None)],
            true,
        );

        let page = mock.list_page("octocat", 1).await.unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].name, "Hello-World");
        assert!(page.has_more);

        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.requests(), vec![("octocat".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_mock_http_error() {
        let mock = MockListing::new().with_http_error("nobody", 1, 404, "Not Found");

        let err = mock.list_page("nobody", 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Error 404: Not Found");
    }

    #[tokio::test]
    async fn test_mock_exception() {
        let mock = MockListing::new().with_exception("octocat", 1, "connection refused");

        let err = mock.list_page("octocat", 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Exception: connection refused");
    }

    #[tokio::test]
    async fn test_mock_unscripted_request_fails() {
        let mock = MockListing::new();

        let err = mock.list_page("octocat", 5).await.unwrap_err();
        assert!(err.to_string().contains("no scripted response"));
    }

    #[tokio::test]
    async fn test_mock_last_response_sticks() {
        let mock = MockListing::new().with_page("octocat", 1, vec![], false);

        mock.list_page("octocat", 1).await.unwrap();
        mock.list_page("octocat", 1).await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_queued_fail_then_succeed() {
        let mock = MockListing::new()
            .with_http_error("octocat", 2, 500, "Internal Server Error")
            .with_page(
                "octocat",
                2,
                vec![Repository::new(2, "two", None)],
                false,
            );

        let err = mock.list_page("octocat", 2).await.unwrap_err();
        assert_eq!(err.to_string(), "Error 500: Internal Server Error");

        let page = mock.list_page("octocat", 2).await.unwrap();
        assert_eq!(page.records[0].id, 2);

        // The success is the last scripted response, so it sticks.
        let page = mock.list_page("octocat", 2).await.unwrap();
        assert_eq!(page.records.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_with_delay() {
        let mock = MockListing::new()
            .with_page("octocat", 1, vec![], false)
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        mock.list_page("octocat", 1).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_mock_records_request_order() {
        let mock = MockListing::new()
            .with_page("octocat", 1, vec![], true)
            .with_page("octocat", 2, vec![], false);

        mock.list_page("octocat", 1).await.unwrap();
        mock.list_page("octocat", 2).await.unwrap();

        assert_eq!(
            mock.requests(),
            vec![("octocat".to_string(), 1), ("octocat".to_string(), 2)]
        );
        assert_eq!(mock.call_count(), 2);
    }
}
