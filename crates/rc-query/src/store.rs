//! The authoritative holder of filter and page state.
//!
//! [`FilterStore`] is the render-stable source of truth for one browsing
//! session. Mutators take `&self` (interior mutability) so the store can be
//! shared behind an [`std::sync::Arc`] with the debounce task and the
//! data-fetching layer. Every mutation re-derives the [`QueryDescriptor`]
//! and publishes it on a [`tokio::sync::watch`] channel, but only when the
//! descriptor actually changed: subscribers are never woken spuriously, so
//! an unchanged filter state never re-triggers a fetch.
//!
//! The store performs no I/O and cannot fail. Invalid inputs are normalized
//! to the nearest valid state (see [`FilterState`]'s date-range rules).

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use chrono::{NaiveDate, Utc};
use tokio::sync::watch;

use crate::descriptor::QueryDescriptor;
use crate::filter::{FilterState, PageState, SortOrder, VoteOutcome};
use crate::presets::{DateBoundary, DatePreset};

fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

struct Inner {
    filters: FilterState,
    page: PageState,
    /// Raw search box contents, pre-debounce. Kept separate from
    /// `filters.search_text` so the input echoes keystrokes immediately
    /// while the committed value lags behind the quiescence period.
    search_input: String,
    boundary: Option<DateBoundary>,
}

/// Shared filter/page state with change notification.
pub struct FilterStore {
    inner: Mutex<Inner>,
    descriptor_tx: watch::Sender<QueryDescriptor>,
    /// Anchor fallback for date presets when no boundary is known.
    today: fn() -> NaiveDate,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_today(today_utc)
    }

    /// Build a store with a custom "today" source, used as the preset
    /// anchor only when no [`DateBoundary`] has been supplied.
    #[must_use]
    pub fn with_today(today: fn() -> NaiveDate) -> Self {
        let (descriptor_tx, _) = watch::channel(QueryDescriptor::default());
        Self {
            inner: Mutex::new(Inner {
                filters: FilterState::default(),
                page: PageState::default(),
                search_input: String::new(),
                boundary: None,
            }),
            descriptor_tx,
            today,
        }
    }

    /// Subscribe to descriptor changes. The receiver initially holds the
    /// current descriptor and is only marked changed when a mutation
    /// produced a structurally different descriptor.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryDescriptor> {
        self.descriptor_tx.subscribe()
    }

    /// Snapshot of the current descriptor.
    #[must_use]
    pub fn descriptor(&self) -> QueryDescriptor {
        self.descriptor_tx.borrow().clone()
    }

    /// Snapshot of the committed filter state.
    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.lock().filters.clone()
    }

    #[must_use]
    pub fn page_state(&self) -> PageState {
        self.lock().page
    }

    /// Raw (pre-debounce) search box contents.
    #[must_use]
    pub fn search_input(&self) -> String {
        self.lock().search_input.clone()
    }

    #[must_use]
    pub fn date_boundary(&self) -> Option<DateBoundary> {
        self.lock().boundary
    }

    /// Store the raw search text for immediate display without touching the
    /// committed filter. The debouncer calls [`Self::commit_search`] once
    /// the input has been quiescent.
    pub fn set_search_input(&self, text: impl Into<String>) {
        self.lock().search_input = text.into();
    }

    /// Commit a search value into the filter state. Resets to page 1.
    pub fn commit_search(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(true, |inner| {
            inner.search_input.clone_from(&text);
            inner.filters.search_text = text;
        });
    }

    /// Replace the selected bill-type set wholesale. Resets to page 1.
    pub fn set_bill_types(&self, types: BTreeSet<String>) {
        self.update(true, |inner| inner.filters.bill_types = types);
    }

    /// Toggle one bill type in or out of the set. Resets to page 1.
    pub fn toggle_bill_type(&self, code: &str) {
        self.update(true, |inner| inner.filters.toggle_bill_type(code));
    }

    /// Replace the selected outcome set wholesale; an empty set means no
    /// outcome filter. Resets to page 1.
    pub fn set_vote_outcomes(&self, outcomes: BTreeSet<VoteOutcome>) {
        self.update(true, |inner| inner.filters.vote_outcomes = outcomes);
    }

    /// Set both date bounds; an inverted pair clears both. Resets to page 1.
    pub fn set_date_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.update(true, |inner| inner.filters.set_date_range(from, to));
    }

    /// Set the lower date bound. Resets to page 1.
    pub fn set_date_from(&self, from: Option<NaiveDate>) {
        self.update(true, |inner| inner.filters.set_date_from(from));
    }

    /// Set the upper date bound. Resets to page 1.
    pub fn set_date_to(&self, to: Option<NaiveDate>) {
        self.update(true, |inner| inner.filters.set_date_to(to));
    }

    /// Apply a date preset anchored on the latest known record date, or on
    /// today's date when no boundary has been supplied yet. Resets to
    /// page 1.
    pub fn apply_date_preset(&self, preset: DatePreset) {
        let today = self.today;
        self.update(true, |inner| {
            let anchor = inner
                .boundary
                .and_then(|b| b.latest)
                .unwrap_or_else(today);
            let (from, to) = preset.range(anchor);
            inner.filters.date_from = from;
            inner.filters.date_to = to;
        });
    }

    /// Select a bill subject/topic, or `None` to clear it. Resets to page 1.
    pub fn set_subject(&self, subject: Option<String>) {
        self.update(true, |inner| inner.filters.subject = subject);
    }

    /// Change the sort order. Like every mutator except [`Self::set_page`],
    /// this resets to page 1.
    pub fn set_sort_order(&self, order: SortOrder) {
        self.update(true, |inner| inner.page.sort = order);
    }

    /// Jump to a page. Page numbers are 1-based; 0 is normalized to 1.
    pub fn set_page(&self, page: u32) {
        self.update(false, |inner| inner.page.page = page.max(1));
    }

    /// Reset every filter, the page and the sort order to their defaults in
    /// one atomic update. Readers never observe a partially cleared state,
    /// and subscribers see at most one descriptor change.
    pub fn clear_all_filters(&self) {
        self.update(false, |inner| {
            inner.filters = FilterState::default();
            inner.page = PageState::default();
            inner.search_input.clear();
        });
    }

    /// Full reset on an entity switch: clears all filters and replaces the
    /// date boundary with the new entity's (or `None` while it loads).
    pub fn reset_for_entity(&self, boundary: Option<DateBoundary>) {
        self.update(false, |inner| {
            inner.filters = FilterState::default();
            inner.page = PageState::default();
            inner.search_input.clear();
            inner.boundary = boundary;
        });
    }

    /// Record the entity's known date boundary. Not part of the descriptor,
    /// so this never wakes subscribers or resets the page.
    pub fn set_date_boundary(&self, boundary: Option<DateBoundary>) {
        self.lock().boundary = boundary;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Single-session state; a poisoned lock only means a panicked
        // test thread, and the state itself is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, reset_page: bool, apply: impl FnOnce(&mut Inner)) {
        let descriptor = {
            let mut inner = self.lock();
            apply(&mut inner);
            if reset_page {
                inner.page.page = 1;
            }
            QueryDescriptor::derive(&inner.filters, inner.page)
        };
        self.descriptor_tx.send_if_modified(|current| {
            if *current == descriptor {
                false
            } else {
                *current = descriptor;
                true
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn every_filter_mutator_resets_page() {
        let mutations: Vec<(&str, fn(&FilterStore))> = vec![
            ("commit_search", |s| s.commit_search("tax")),
            ("set_bill_types", |s| {
                s.set_bill_types(["hr".to_string()].into());
            }),
            ("toggle_bill_type", |s| s.toggle_bill_type("s")),
            ("set_vote_outcomes", |s| {
                s.set_vote_outcomes([VoteOutcome::Yea].into());
            }),
            ("set_date_range", |s| {
                s.set_date_range(Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()), None);
            }),
            ("set_date_from", |s| {
                s.set_date_from(Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()));
            }),
            ("set_date_to", |s| {
                s.set_date_to(Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
            }),
            ("apply_date_preset", |s| {
                s.apply_date_preset(DatePreset::LastTwoYears);
            }),
            ("set_subject", |s| s.set_subject(Some("Defense".into()))),
            ("set_sort_order", |s| s.set_sort_order(SortOrder::Ascending)),
        ];

        for (name, mutate) in mutations {
            let store = FilterStore::with_today(fixed_today);
            store.set_page(7);
            mutate(&store);
            assert_eq!(store.page_state().page, 1, "mutator {name} must reset page");
        }
    }

    #[test]
    fn set_page_is_the_only_non_resetting_mutator() {
        let store = FilterStore::new();
        store.set_page(5);
        assert_eq!(store.page_state().page, 5);
        store.set_page(0);
        assert_eq!(store.page_state().page, 1);
    }

    #[test]
    fn clear_all_restores_documented_defaults() {
        let store = FilterStore::with_today(fixed_today);
        store.commit_search("energy");
        store.set_bill_types(["hr".to_string(), "sjres".to_string()].into());
        store.set_vote_outcomes([VoteOutcome::Nay, VoteOutcome::Present].into());
        store.set_date_range(Some(d("2020-01-01")), Some(d("2024-01-01")));
        store.set_subject(Some("Energy".into()));
        store.set_sort_order(SortOrder::Ascending);
        store.set_page(4);

        store.clear_all_filters();

        let filters = store.filters();
        assert!(filters.is_empty());
        assert_eq!(store.search_input(), "");
        assert_eq!(store.page_state(), PageState::default());
        assert_eq!(store.descriptor(), QueryDescriptor::default());
    }

    #[test]
    fn clear_all_notifies_at_most_once() {
        let store = FilterStore::new();
        store.commit_search("water");
        store.toggle_bill_type("hr");

        let mut rx = store.subscribe();
        rx.mark_unchanged();
        store.clear_all_filters();
        assert!(rx.has_changed().unwrap());
        rx.mark_unchanged();

        // Clearing an already-default store is a no-op for subscribers.
        store.clear_all_filters();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn noop_mutations_do_not_wake_subscribers() {
        let store = FilterStore::new();
        store.set_bill_types(["hr".to_string()].into());

        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.set_bill_types(["hr".to_string()].into());
        store.set_page(1);
        store.set_sort_order(SortOrder::Descending);
        assert!(!rx.has_changed().unwrap(), "identical state must not notify");

        store.toggle_bill_type("s");
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn preset_anchors_on_boundary_latest() {
        let store = FilterStore::with_today(fixed_today);
        store.set_date_boundary(Some(DateBoundary {
            earliest: Some(d("1999-01-06")),
            latest: Some(d("2024-12-20")),
        }));

        store.apply_date_preset(DatePreset::LastTwoYears);
        let filters = store.filters();
        assert_eq!(filters.date_from, Some(d("2022-12-20")));
        assert_eq!(filters.date_to, Some(d("2024-12-20")));
    }

    #[test]
    fn preset_falls_back_to_today_without_boundary() {
        let store = FilterStore::with_today(fixed_today);
        store.apply_date_preset(DatePreset::LastYear);
        let filters = store.filters();
        assert_eq!(filters.date_from, Some(d("2024-06-15")));
        assert_eq!(filters.date_to, Some(d("2025-06-15")));
    }

    #[test]
    fn all_time_clears_range_regardless_of_prior_state() {
        let store = FilterStore::with_today(fixed_today);
        store.set_date_range(Some(d("2020-01-01")), Some(d("2024-01-01")));
        store.apply_date_preset(DatePreset::AllTime);
        let filters = store.filters();
        assert_eq!(filters.date_from, None);
        assert_eq!(filters.date_to, None);
    }

    #[test]
    fn boundary_update_does_not_disturb_filters_or_page() {
        let store = FilterStore::new();
        store.commit_search("budget");
        store.set_page(3);

        let mut rx = store.subscribe();
        rx.mark_unchanged();
        store.set_date_boundary(Some(DateBoundary {
            earliest: Some(d("2001-01-03")),
            latest: Some(d("2025-01-03")),
        }));

        assert_eq!(store.page_state().page, 3);
        assert_eq!(store.filters().search_text, "budget");
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn entity_reset_clears_everything_and_installs_boundary() {
        let store = FilterStore::new();
        store.toggle_bill_type("hr");
        store.set_page(3);

        let boundary = DateBoundary {
            earliest: Some(d("2010-01-01")),
            latest: Some(d("2024-06-30")),
        };
        store.reset_for_entity(Some(boundary));

        assert!(store.filters().bill_types.is_empty());
        assert_eq!(store.page_state().page, 1);
        assert_eq!(store.date_boundary(), Some(boundary));
    }

    // Exercises the reducer with arbitrary mutation sequences: the clear
    // operation must always restore the default descriptor, and the page
    // must be 1 after any filter mutation.
    #[derive(Debug, Clone)]
    enum Op {
        Search(String),
        ToggleType(String),
        Outcomes(Vec<VoteOutcome>),
        Range(Option<u16>, Option<u16>),
        Sort(bool),
        Page(u32),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let outcome = prop::sample::select(VoteOutcome::all().to_vec());
        prop_oneof![
            "[a-z]{0,8}".prop_map(Op::Search),
            prop::sample::select(vec!["hr", "s", "hjres", "sjres"])
                .prop_map(|c| Op::ToggleType(c.to_string())),
            prop::collection::vec(outcome, 0..4).prop_map(Op::Outcomes),
            (prop::option::of(0u16..5000), prop::option::of(0u16..5000))
                .prop_map(|(f, t)| Op::Range(f, t)),
            any::<bool>().prop_map(Op::Sort),
            (1u32..50).prop_map(Op::Page),
            Just(Op::Clear),
        ]
    }

    fn day(offset: u16) -> NaiveDate {
        NaiveDate::from_ymd_opt(2010, 1, 1).unwrap() + chrono::Days::new(u64::from(offset))
    }

    fn apply(store: &FilterStore, op: &Op) {
        match op {
            Op::Search(s) => store.commit_search(s.clone()),
            Op::ToggleType(c) => store.toggle_bill_type(c),
            Op::Outcomes(os) => store.set_vote_outcomes(os.iter().copied().collect()),
            Op::Range(f, t) => store.set_date_range(f.map(day), t.map(day)),
            Op::Sort(asc) => store.set_sort_order(if *asc {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            }),
            Op::Page(n) => store.set_page(*n),
            Op::Clear => store.clear_all_filters(),
        }
    }

    proptest! {
        #[test]
        fn clear_always_restores_defaults(ops in prop::collection::vec(op_strategy(), 0..30)) {
            let store = FilterStore::with_today(fixed_today);
            for op in &ops {
                apply(&store, op);
            }
            store.clear_all_filters();
            prop_assert_eq!(store.descriptor(), QueryDescriptor::default());
            prop_assert!(store.filters().is_empty());
        }

        #[test]
        fn page_is_one_after_any_filter_mutation(
            ops in prop::collection::vec(op_strategy(), 0..20),
            last in op_strategy(),
        ) {
            let store = FilterStore::with_today(fixed_today);
            for op in &ops {
                apply(&store, op);
            }
            apply(&store, &last);
            match last {
                Op::Page(n) => prop_assert_eq!(store.page_state().page, n),
                _ => prop_assert_eq!(store.page_state().page, 1),
            }
        }

        #[test]
        fn date_bounds_are_always_ordered(
            ops in prop::collection::vec(op_strategy(), 0..30),
        ) {
            let store = FilterStore::with_today(fixed_today);
            for op in &ops {
                apply(&store, op);
            }
            let filters = store.filters();
            if let (Some(from), Some(to)) = (filters.date_from, filters.date_to) {
                prop_assert!(from <= to);
            }
        }
    }
}
