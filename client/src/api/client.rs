//! HTTP client for the RollCall backend.
//!
//! Trait-based so the session and CLI code can be unit-tested against
//! [`mock::MockRollCallClient`] and the real [`HttpRollCallClient`] can be
//! exercised against a stub HTTP server. The client is a thin boundary: it
//! serializes a [`QueryDescriptor`] into request parameters and deserializes
//! responses, nothing more.

use async_trait::async_trait;
use rc_query::{DateBoundary, QueryDescriptor};
use thiserror::Error;

use super::types::{DonationBreakdown, Donor, Paged, Politician, VoteRecord};

/// Errors that can occur when calling the RollCall API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Entity not found
    #[error("not found: {0}")]
    NotFound(String),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Operations the backend exposes to this client.
#[async_trait]
pub trait RollCallApi: Send + Sync {
    /// Search politicians by free text.
    async fn search_politicians(&self, query: &str, page: u32)
        -> Result<Paged<Politician>, ApiError>;

    /// Search donors by free text.
    async fn search_donors(&self, query: &str, page: u32) -> Result<Paged<Donor>, ApiError>;

    /// Fetch one politician by id.
    async fn get_politician(&self, id: &str) -> Result<Politician, ApiError>;

    /// List a politician's votes matching the descriptor. The descriptor is
    /// rendered into request parameters verbatim; items are carried through
    /// uninterpreted.
    async fn list_votes(
        &self,
        politician_id: &str,
        query: &QueryDescriptor,
    ) -> Result<Paged<VoteRecord>, ApiError>;

    /// Earliest/latest known vote dates for a politician.
    async fn date_boundary(&self, politician_id: &str) -> Result<DateBoundary, ApiError>;

    /// Donation-by-industry breakdown for a politician.
    async fn donation_breakdown(&self, politician_id: &str)
        -> Result<DonationBreakdown, ApiError>;
}

/// `reqwest`-based implementation of [`RollCallApi`].
pub struct HttpRollCallClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpRollCallClient {
    /// Create a new client with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, proxies).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
        not_found: &str,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(not_found.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RollCallApi for HttpRollCallClient {
    async fn search_politicians(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Paged<Politician>, ApiError> {
        let params = [
            ("search", query.to_string()),
            ("page", page.to_string()),
        ];
        self.get_json("/politicians", &params, query).await
    }

    async fn search_donors(&self, query: &str, page: u32) -> Result<Paged<Donor>, ApiError> {
        let params = [
            ("search", query.to_string()),
            ("page", page.to_string()),
        ];
        self.get_json("/donors", &params, query).await
    }

    async fn get_politician(&self, id: &str) -> Result<Politician, ApiError> {
        self.get_json(&format!("/politicians/{id}"), &[], id).await
    }

    async fn list_votes(
        &self,
        politician_id: &str,
        query: &QueryDescriptor,
    ) -> Result<Paged<VoteRecord>, ApiError> {
        self.get_json(
            &format!("/politicians/{politician_id}/votes"),
            &query.to_query_pairs(),
            politician_id,
        )
        .await
    }

    async fn date_boundary(&self, politician_id: &str) -> Result<DateBoundary, ApiError> {
        self.get_json(
            &format!("/politicians/{politician_id}/votes/date-boundary"),
            &[],
            politician_id,
        )
        .await
    }

    async fn donation_breakdown(
        &self,
        politician_id: &str,
    ) -> Result<DonationBreakdown, ApiError> {
        self.get_json(
            &format!("/politicians/{politician_id}/donations/industries"),
            &[],
            politician_id,
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rc_query::{DateBoundary, QueryDescriptor};

    use super::{
        ApiError, DonationBreakdown, Donor, Paged, Politician, RollCallApi, VoteRecord,
    };

    /// Mock implementation of [`RollCallApi`] for unit tests.
    ///
    /// Scripted results are consumed front-to-back; when the queue for a
    /// method is empty, a benign default applies (empty page, default
    /// boundary, `NotFound` for `get_politician`). Calls are recorded for
    /// later assertion.
    #[derive(Default)]
    pub struct MockRollCallClient {
        politicians: Mutex<VecDeque<Result<Politician, ApiError>>>,
        votes: Mutex<VecDeque<Result<Paged<VoteRecord>, ApiError>>>,
        boundaries: Mutex<VecDeque<Result<DateBoundary, ApiError>>>,
        breakdowns: Mutex<VecDeque<Result<DonationBreakdown, ApiError>>>,
        politician_searches: Mutex<VecDeque<Result<Paged<Politician>, ApiError>>>,
        donor_searches: Mutex<VecDeque<Result<Paged<Donor>, ApiError>>>,
        vote_calls: Mutex<Vec<(String, QueryDescriptor)>>,
        politician_calls: Mutex<Vec<String>>,
        search_calls: Mutex<Vec<(String, u32)>>,
    }

    impl MockRollCallClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a result for the next `get_politician` call.
        pub fn push_politician(&self, result: Result<Politician, ApiError>) {
            self.politicians.lock().unwrap().push_back(result);
        }

        /// Queue a result for the next `list_votes` call.
        pub fn push_votes(&self, result: Result<Paged<VoteRecord>, ApiError>) {
            self.votes.lock().unwrap().push_back(result);
        }

        /// Queue a result for the next `date_boundary` call.
        pub fn push_boundary(&self, result: Result<DateBoundary, ApiError>) {
            self.boundaries.lock().unwrap().push_back(result);
        }

        /// Queue a result for the next `donation_breakdown` call.
        pub fn push_breakdown(&self, result: Result<DonationBreakdown, ApiError>) {
            self.breakdowns.lock().unwrap().push_back(result);
        }

        /// Queue a result for the next `search_politicians` call.
        pub fn push_politician_search(&self, result: Result<Paged<Politician>, ApiError>) {
            self.politician_searches.lock().unwrap().push_back(result);
        }

        /// Queue a result for the next `search_donors` call.
        pub fn push_donor_search(&self, result: Result<Paged<Donor>, ApiError>) {
            self.donor_searches.lock().unwrap().push_back(result);
        }

        /// All `(politician_id, descriptor)` pairs passed to `list_votes`.
        pub fn vote_calls(&self) -> Vec<(String, QueryDescriptor)> {
            self.vote_calls.lock().unwrap().clone()
        }

        /// All ids passed to `get_politician`.
        pub fn politician_calls(&self) -> Vec<String> {
            self.politician_calls.lock().unwrap().clone()
        }

        /// All `(query, page)` pairs passed to either search method.
        pub fn search_calls(&self) -> Vec<(String, u32)> {
            self.search_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RollCallApi for MockRollCallClient {
        async fn search_politicians(
            &self,
            query: &str,
            page: u32,
        ) -> Result<Paged<Politician>, ApiError> {
            self.search_calls
                .lock()
                .unwrap()
                .push((query.to_string(), page));
            self.politician_searches
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Paged::empty()))
        }

        async fn search_donors(&self, query: &str, page: u32) -> Result<Paged<Donor>, ApiError> {
            self.search_calls
                .lock()
                .unwrap()
                .push((query.to_string(), page));
            self.donor_searches
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Paged::empty()))
        }

        async fn get_politician(&self, id: &str) -> Result<Politician, ApiError> {
            self.politician_calls.lock().unwrap().push(id.to_string());
            self.politicians
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::NotFound(id.to_string())))
        }

        async fn list_votes(
            &self,
            politician_id: &str,
            query: &QueryDescriptor,
        ) -> Result<Paged<VoteRecord>, ApiError> {
            self.vote_calls
                .lock()
                .unwrap()
                .push((politician_id.to_string(), query.clone()));
            self.votes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Paged::empty()))
        }

        async fn date_boundary(&self, politician_id: &str) -> Result<DateBoundary, ApiError> {
            let _ = politician_id;
            self.boundaries
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(DateBoundary::default()))
        }

        async fn donation_breakdown(
            &self,
            politician_id: &str,
        ) -> Result<DonationBreakdown, ApiError> {
            let _ = politician_id;
            self.breakdowns
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(DonationBreakdown::default()))
        }
    }
}
