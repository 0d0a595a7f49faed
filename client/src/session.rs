//! One browsing session: a politician, their filter state, and the
//! currently loaded page of votes.
//!
//! The filter state and the fetch result live in independently-lifetimed
//! scopes: the [`rc_query::FilterStore`] stays mounted and mutable no matter
//! what the fetch is doing, and a failed fetch only moves the result slot to
//! [`LoadState::Error`]. The user can always keep changing filters to retry.

use std::sync::Arc;

use rc_query::{FilterStore, QueryDescriptor, SearchDebouncer};
use tokio::sync::watch;

use crate::api::{ApiError, Paged, Politician, RollCallApi, VoteRecord};

/// Tri-state result slot, independent of the filter state's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// A fetch is in flight (or no fetch has completed yet).
    Pending,
    Ready(T),
    /// The fetch failed; the message is for display. Filters are untouched.
    Error(String),
}

impl<T> LoadState<T> {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Drives vote browsing for one politician at a time.
pub struct VoteBrowser<C: RollCallApi> {
    api: Arc<C>,
    store: Arc<FilterStore>,
    debouncer: SearchDebouncer,
    queries: watch::Receiver<QueryDescriptor>,
    politician: Option<Politician>,
    votes: LoadState<Paged<VoteRecord>>,
    /// Descriptor of the last completed fetch; equal descriptors map to the
    /// same result, so a refresh with an unchanged descriptor is skipped.
    last_fetched: Option<QueryDescriptor>,
}

impl<C: RollCallApi> VoteBrowser<C> {
    #[must_use]
    pub fn new(api: Arc<C>) -> Self {
        let store = Arc::new(FilterStore::new());
        let queries = store.subscribe();
        let debouncer = SearchDebouncer::new(Arc::clone(&store));
        Self {
            api,
            store,
            debouncer,
            queries,
            politician: None,
            votes: LoadState::Pending,
            last_fetched: None,
        }
    }

    /// The session's filter store. Mutators on it are live immediately;
    /// call [`Self::refresh`] (or run [`Self::query_changed`] in a loop)
    /// to re-fetch.
    #[must_use]
    pub fn store(&self) -> &Arc<FilterStore> {
        &self.store
    }

    #[must_use]
    pub const fn politician(&self) -> Option<&Politician> {
        self.politician.as_ref()
    }

    #[must_use]
    pub const fn votes(&self) -> &LoadState<Paged<VoteRecord>> {
        &self.votes
    }

    /// Route a search-box keystroke through the debouncer. The committed
    /// value (and the descriptor) changes only after the input has been
    /// quiescent; an empty string commits immediately.
    pub fn set_search_text(&mut self, text: &str) {
        self.debouncer.submit(text);
    }

    /// Switch the session to a politician. Selecting a different politician
    /// clears every filter, resets pagination, and installs the new
    /// entity's date boundary; re-selecting the current one is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or the transport
    /// error. On error the session keeps its previous politician and state.
    pub async fn select_politician(&mut self, id: &str) -> Result<(), ApiError> {
        if self.politician.as_ref().is_some_and(|p| p.id == id) {
            return Ok(());
        }
        let politician = self.api.get_politician(id).await?;

        // Boundary failure is non-fatal: presets fall back to today.
        let boundary = match self.api.date_boundary(id).await {
            Ok(boundary) => Some(boundary),
            Err(error) => {
                tracing::warn!(id, %error, "date boundary unavailable");
                None
            }
        };

        self.debouncer.cancel();
        self.store.reset_for_entity(boundary);
        self.politician = Some(politician);
        self.votes = LoadState::Pending;
        self.last_fetched = None;
        self.refresh().await;
        Ok(())
    }

    /// Fetch the vote page for the current descriptor. No-op when no
    /// politician is selected or when the descriptor is unchanged since the
    /// last completed fetch.
    pub async fn refresh(&mut self) {
        let Some(politician) = self.politician.clone() else {
            return;
        };
        let descriptor = self.store.descriptor();
        if self.last_fetched.as_ref() == Some(&descriptor) && !self.votes.is_pending() {
            return;
        }

        self.votes = LoadState::Pending;
        self.votes = match self.api.list_votes(&politician.id, &descriptor).await {
            Ok(page) => {
                self.last_fetched = Some(descriptor);
                LoadState::Ready(page)
            }
            Err(error) => {
                tracing::warn!(id = politician.id, %error, "vote fetch failed");
                // Not recorded as fetched, so a plain retry goes out again.
                self.last_fetched = None;
                LoadState::Error(error.to_string())
            }
        };
    }

    /// Wait until the query descriptor changes. Pair with [`Self::refresh`]
    /// in a loop to keep the result in sync with the filters.
    pub async fn query_changed(&mut self) {
        // The sender lives in our own store, so the channel cannot close.
        let _ = self.queries.changed().await;
    }
}
