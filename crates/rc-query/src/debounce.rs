//! Debounced propagation of search-box input into the filter state.
//!
//! Keystrokes update the store's raw input immediately (so the box echoes),
//! but the committed search value (and therefore the query descriptor and
//! any downstream fetch) only changes after the input has been quiescent
//! for [`SEARCH_DEBOUNCE`]. Each new submission cancels the previous pending
//! commit; intermediate keystrokes never produce a request.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::store::FilterStore;

/// Quiescence period before a search value is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancellable debounce timer for the search field.
///
/// Must be used inside a tokio runtime. Dropping the debouncer aborts any
/// pending commit, so a stale propagation can never fire after teardown.
pub struct SearchDebouncer {
    store: Arc<FilterStore>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(store: Arc<FilterStore>) -> Self {
        Self::with_delay(store, SEARCH_DEBOUNCE)
    }

    /// Build a debouncer with a custom quiescence period.
    #[must_use]
    pub const fn with_delay(store: Arc<FilterStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
        }
    }

    /// Record a keystroke. The raw input is visible in the store at once;
    /// the commit is scheduled for `delay` from now, replacing any commit
    /// still pending. An empty string commits immediately so "clear" feels
    /// instant.
    pub fn submit(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.cancel();
        if text.is_empty() {
            self.store.commit_search(String::new());
            return;
        }
        self.store.set_search_input(text.clone());
        let store = Arc::clone(&self.store);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.commit_search(text);
        }));
    }

    /// Abort the pending commit, if any. The raw input in the store is left
    /// as typed; only the propagation is dropped.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
