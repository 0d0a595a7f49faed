//! End-to-end session behavior over the mock API client: filter changes
//! flow into request parameters, entity switches reset state, and fetch
//! failures never disturb the filters.

use std::sync::Arc;

use chrono::NaiveDate;
use rc_query::{DateBoundary, DatePreset, SortOrder, VoteOutcome};
use rollcall_client::api::mock::MockRollCallClient;
use rollcall_client::api::{ApiError, Paged, Politician, VoteRecord};
use rollcall_client::session::VoteBrowser;

fn politician(id: &str, name: &str) -> Politician {
    Politician {
        id: id.into(),
        name: name.into(),
        state: "WI".into(),
        party: "D".into(),
        chamber: "Senate".into(),
    }
}

fn vote(id: &str, date: &str) -> VoteRecord {
    VoteRecord {
        id: id.into(),
        bill_type: "hr".into(),
        bill_number: "3076".into(),
        question: "On Passage".into(),
        description: None,
        date: d(date),
        position: VoteOutcome::Yea,
        result: "Passed".into(),
        subject: None,
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

#[tokio::test]
async fn filters_serialize_into_request_parameters() {
    let mock = Arc::new(MockRollCallClient::new());
    mock.push_politician(Ok(politician("B001230", "Tammy Baldwin")));
    mock.push_boundary(Ok(DateBoundary {
        earliest: Some(d("2013-01-03")),
        latest: Some(d("2024-12-20")),
    }));

    let mut browser = VoteBrowser::new(Arc::clone(&mock));
    browser.select_politician("B001230").await.expect("select");

    let store = Arc::clone(browser.store());
    store.set_bill_types(["hr".to_string(), "s".to_string()].into());
    store.set_vote_outcomes([VoteOutcome::Yea, VoteOutcome::Nay].into());
    store.apply_date_preset(DatePreset::LastTwoYears);
    store.commit_search("infrastructure");
    store.set_sort_order(SortOrder::Ascending);
    store.set_page(2);

    mock.push_votes(Ok(Paged {
        items: vec![vote("h2023-512", "2023-11-14")],
        current_page: 2,
        total_pages: 9,
        total_item_count: 171,
    }));
    browser.refresh().await;

    let calls = mock.vote_calls();
    let (id, descriptor) = calls.last().expect("a fetch happened");
    assert_eq!(id, "B001230");

    let pairs = descriptor.to_query_pairs();
    assert!(pairs.contains(&("page", "2".into())));
    assert!(pairs.contains(&("sort", "ASC".into())));
    assert!(pairs.contains(&("type", "hr".into())));
    assert!(pairs.contains(&("type", "s".into())));
    assert!(pairs.contains(&("search", "infrastructure".into())));
    assert!(pairs.contains(&("date_from", "2022-12-20".into())));
    assert!(pairs.contains(&("date_to", "2024-12-20".into())));
    assert!(pairs.contains(&("vote_value", "Yea".into())));
    assert!(pairs.contains(&("vote_value", "Nay".into())));

    let page = browser.votes().ready().expect("ready");
    assert_eq!(page.total_item_count, 171);
    assert_eq!(page.items[0].id, "h2023-512");
}

#[tokio::test]
async fn switching_politicians_resets_types_and_page() {
    let mock = Arc::new(MockRollCallClient::new());
    mock.push_politician(Ok(politician("A000360", "Lamar Alexander")));
    mock.push_politician(Ok(politician("B001230", "Tammy Baldwin")));

    let mut browser = VoteBrowser::new(Arc::clone(&mock));
    browser.select_politician("A000360").await.expect("select A");

    browser.store().set_bill_types(["hr".to_string()].into());
    browser.store().set_page(3);
    browser.refresh().await;

    browser.select_politician("B001230").await.expect("select B");

    let filters = browser.store().filters();
    assert!(filters.bill_types.is_empty());
    assert_eq!(browser.store().page_state().page, 1);
}

#[tokio::test]
async fn error_state_is_recoverable_by_changing_filters() {
    let mock = Arc::new(MockRollCallClient::new());
    mock.push_politician(Ok(politician("A000360", "Lamar Alexander")));

    let mut browser = VoteBrowser::new(Arc::clone(&mock));
    browser.select_politician("A000360").await.expect("select");

    browser.store().commit_search("broken");
    mock.push_votes(Err(ApiError::Api {
        status: 500,
        message: "boom".into(),
    }));
    browser.refresh().await;
    assert!(browser.votes().error().is_some());

    // The filter state stayed interactive; a new search retries and lands.
    browser.store().commit_search("works");
    mock.push_votes(Ok(Paged {
        items: vec![vote("s2024-77", "2024-03-02")],
        current_page: 1,
        total_pages: 1,
        total_item_count: 1,
    }));
    browser.refresh().await;

    let page = browser.votes().ready().expect("recovered");
    assert_eq!(page.items.len(), 1);
    let last = mock.vote_calls().last().cloned().expect("call");
    assert_eq!(last.1.search, Some("works".to_string()));
}

#[tokio::test(start_paused = true)]
async fn debounced_keystrokes_produce_a_single_fetch() {
    let mock = Arc::new(MockRollCallClient::new());
    mock.push_politician(Ok(politician("A000360", "Lamar Alexander")));

    let mut browser = VoteBrowser::new(Arc::clone(&mock));
    browser.select_politician("A000360").await.expect("select");
    let initial_fetches = mock.vote_calls().len();

    browser.set_search_text("v");
    browser.set_search_text("ve");
    browser.set_search_text("veterans");

    browser.query_changed().await;
    browser.refresh().await;

    let calls = mock.vote_calls();
    assert_eq!(calls.len(), initial_fetches + 1);
    assert_eq!(
        calls.last().expect("call").1.search,
        Some("veterans".to_string())
    );
}
