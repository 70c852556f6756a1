//! GitHub REST implementation of the repository listing

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::RepoListing;
use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::types::{RepoPage, Repository};

/// Fixed page size of the listing endpoint.
const PER_PAGE: u32 = 30;

/// Repository listing backed by the GitHub REST API.
///
/// The client carries only a user agent (the API rejects requests without
/// one). No request timeout and no retry: a fetch either completes or
/// surfaces its failure to the caller as-is.
pub struct GitHubListing {
    client: Client,
    base_url: String,
}

impl GitHubListing {
    /// Create a listing client from API configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn repos_url(&self, username: &str, page: u32) -> String {
        format!(
            "{}/users/{}/repos?page={}&per_page={}",
            self.base_url, username, page, PER_PAGE
        )
    }
}

/// True iff the `Link` header value advertises a next page.
///
/// Presence of a `rel="next"` token is the sole continuation signal; the
/// target URL inside the header is not used.
fn link_header_has_next(link_header: Option<&str>) -> bool {
    link_header
        .map(|link| link.contains("rel=\"next\""))
        .unwrap_or(false)
}

#[async_trait]
impl RepoListing for GitHubListing {
    async fn list_page(&self, username: &str, page: u32) -> Result<RepoPage, FetchError> {
        let url = self.repos_url(username, page);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Exception(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        let has_more = link_header_has_next(
            response
                .headers()
                .get("link")
                .and_then(|h| h.to_str().ok()),
        );

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Exception(e.to_string()))?;

        // An absent body is a valid empty listing.
        let records: Vec<Repository> = if body.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&body).map_err(|e| FetchError::Exception(e.to_string()))?
        };

        info!(
            "Fetched page {} for {}: {} records, has_more={}",
            page,
            username,
            records.len(),
            has_more
        );

        Ok(RepoPage { records, has_more })
    }
}
