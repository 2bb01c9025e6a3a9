//! Tests for the pagination controller

use super::*;
use crate::cache::PageCache;
use crate::error::FetchError;
use crate::state::{BrowserState, StateKind};
use crate::types::{Cursor, Item, Page};
use pretty_assertions::assert_eq;

fn cursor(token: &str) -> Option<Cursor> {
    Some(Cursor::new(token))
}

fn page(names: &[&str], next: Option<&str>, previous: Option<&str>) -> Page {
    Page::new(
        names
            .iter()
            .map(|name| Item::new(*name, format!("p/{name}")))
            .collect(),
        next.map(Cursor::new),
        previous.map(Cursor::new),
    )
}

fn first_page() -> Page {
    page(&["bulbasaur"], Some("page2"), None)
}

fn second_page() -> Page {
    page(&["ivysaur"], Some("page3"), Some("page1"))
}

fn ticket(dispatch: Dispatch) -> FetchTicket {
    match dispatch {
        Dispatch::Fetch(ticket) => ticket,
        other => panic!("Expected a fetch, got {other:?}"),
    }
}

fn displayed_names(controller: &PaginationController) -> Vec<String> {
    controller
        .state()
        .displayed_page()
        .map(|page| page.items.iter().map(|item| item.name.clone()).collect())
        .unwrap_or_default()
}

/// Load the first page and then the second one through `next`
fn load_two_pages(controller: &mut PaginationController) {
    let first = ticket(controller.request(None));
    controller.complete(first, Ok(first_page()));
    let second = ticket(controller.next());
    controller.complete(second, Ok(second_page()));
}

// ============================================================================
// Request / cache-first
// ============================================================================

#[test]
fn test_initial_state() {
    let controller = PaginationController::new();
    assert_eq!(controller.state(), &BrowserState::Idle);
    assert_eq!(controller.in_flight(), 0);
    assert!(!controller.has_next());
    assert!(!controller.has_previous());
}

#[test]
fn test_request_miss_issues_fetch() {
    let mut controller = PaginationController::new();

    let ticket = ticket(controller.request(None));
    assert_eq!(ticket.cursor(), None);
    assert_eq!(ticket.kind(), FetchKind::Navigate);
    assert_eq!(controller.state(), &BrowserState::Loading);
    assert_eq!(controller.in_flight(), 1);
    assert_eq!(controller.awaited(), Some(ticket.id()));

    assert_eq!(controller.complete(ticket, Ok(first_page())), Outcome::Applied);
    assert_eq!(controller.state().kind(), StateKind::Ready);
    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);
    assert_eq!(controller.current_cursor(), None);
    assert_eq!(controller.in_flight(), 0);
    assert!(controller.cache().contains(None));
    assert!(controller.has_next());
}

#[test]
fn test_request_cache_hit_is_synchronous() {
    let mut cache = PageCache::new();
    cache.put(cursor("page2"), std::sync::Arc::new(second_page()));
    let mut controller = PaginationController::with_cache(cache);

    assert_eq!(controller.request(cursor("page2")), Dispatch::CacheHit);
    assert_eq!(controller.state().kind(), StateKind::Ready);
    assert_eq!(controller.current_cursor(), Some(&Cursor::new("page2")));
    assert_eq!(controller.in_flight(), 0);
}

#[test]
fn test_request_same_page_is_noop() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    controller.complete(first, Ok(first_page()));

    let hits_before = controller.cache().stats().hits;
    assert_eq!(controller.request(None), Dispatch::Unchanged);
    assert_eq!(controller.cache().stats().hits, hits_before);
}

#[test]
fn test_cached_cursor_never_refetched() {
    let mut controller = PaginationController::new();
    load_two_pages(&mut controller);

    for _ in 0..3 {
        assert_eq!(controller.request(None), Dispatch::CacheHit);
        assert_eq!(controller.request(cursor("page2")), Dispatch::CacheHit);
    }
    assert_eq!(controller.in_flight(), 0);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_round_trip() {
    let mut controller = PaginationController::new();
    load_two_pages(&mut controller);
    assert_eq!(displayed_names(&controller), vec!["ivysaur"]);
    assert_eq!(controller.current_cursor(), Some(&Cursor::new("page2")));

    // previous_cursor is "page1" but the first page was fetched as None
    assert_eq!(controller.prev(), Dispatch::CacheHit);
    assert_eq!(controller.current_cursor(), None);
    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);

    assert_eq!(controller.next(), Dispatch::CacheHit);
    assert_eq!(displayed_names(&controller), vec!["ivysaur"]);
}

#[test]
fn test_next_and_prev_without_neighbour_are_noops() {
    let mut controller = PaginationController::new();
    assert_eq!(controller.next(), Dispatch::Unchanged);
    assert_eq!(controller.prev(), Dispatch::Unchanged);
    assert_eq!(controller.state(), &BrowserState::Idle);

    let first = ticket(controller.request(None));
    controller.complete(first, Ok(page(&["only"], None, None)));
    let before = controller.state().clone();

    assert_eq!(controller.next(), Dispatch::Unchanged);
    assert_eq!(controller.prev(), Dispatch::Unchanged);
    assert_eq!(controller.state(), &before);
}

#[test]
fn test_prev_follows_server_cursor_when_not_reached_by_next() {
    let mut controller = PaginationController::new();
    let landing = ticket(controller.request(cursor("page2")));
    controller.complete(landing, Ok(second_page()));

    let back = ticket(controller.prev());
    assert_eq!(back.cursor(), Some(&Cursor::new("page1")));
}

#[test]
fn test_next_from_page_reached_by_prev_reuses_key() {
    let mut controller = PaginationController::new();
    let landing = ticket(controller.request(cursor("page2")));
    controller.complete(landing, Ok(second_page()));

    let back = ticket(controller.prev());
    // the server names page two differently from the cursor we used
    controller.complete(back, Ok(page(&["bulbasaur"], Some("?offset=1"), None)));

    assert_eq!(controller.next(), Dispatch::CacheHit);
    assert_eq!(controller.current_cursor(), Some(&Cursor::new("page2")));
}

#[test]
fn test_next_follows_cursor_changed_by_refresh() {
    let mut controller = PaginationController::new();
    load_two_pages(&mut controller);
    assert_eq!(controller.prev(), Dispatch::CacheHit);

    let refresh = ticket(controller.refresh());
    controller.complete(refresh, Ok(page(&["bulbasaur"], Some("page2b"), None)));

    let forward = ticket(controller.next());
    assert_eq!(forward.cursor(), Some(&Cursor::new("page2b")));
    assert_eq!(controller.state(), &BrowserState::Loading);
}

#[test]
fn test_refresh_with_same_cursor_keeps_cached_route() {
    let mut controller = PaginationController::new();
    load_two_pages(&mut controller);
    assert_eq!(controller.prev(), Dispatch::CacheHit);

    let refresh = ticket(controller.refresh());
    controller.complete(refresh, Ok(first_page()));

    assert_eq!(controller.next(), Dispatch::CacheHit);
    assert_eq!(controller.current_cursor(), Some(&Cursor::new("page2")));
    assert_eq!(controller.prev(), Dispatch::CacheHit);
    assert_eq!(controller.current_cursor(), None);
}

// ============================================================================
// Staleness
// ============================================================================

#[test]
fn test_later_request_wins_over_slow_earlier_one() {
    let mut controller = PaginationController::new();
    let a = ticket(controller.request(cursor("a")));
    let b = ticket(controller.request(cursor("b")));
    assert_eq!(controller.in_flight(), 2);

    assert_eq!(
        controller.complete(b, Ok(page(&["from-b"], None, None))),
        Outcome::Applied
    );
    assert_eq!(
        controller.complete(a, Ok(page(&["from-a"], None, None))),
        Outcome::Discarded
    );

    assert_eq!(displayed_names(&controller), vec!["from-b"]);
    assert_eq!(controller.current_cursor(), Some(&Cursor::new("b")));
    // the stale page is still reusable
    assert!(controller.cache().contains(cursor("a").as_ref()));
    assert_eq!(controller.request(cursor("a")), Dispatch::CacheHit);
}

#[test]
fn test_stale_result_arriving_first_does_not_show() {
    let mut controller = PaginationController::new();
    let a = ticket(controller.request(cursor("a")));
    let b = ticket(controller.request(cursor("b")));

    assert_eq!(
        controller.complete(a, Ok(page(&["from-a"], None, None))),
        Outcome::Discarded
    );
    assert_eq!(controller.state(), &BrowserState::Loading);

    controller.complete(b, Ok(page(&["from-b"], None, None)));
    assert_eq!(displayed_names(&controller), vec!["from-b"]);
}

#[test]
fn test_stale_error_is_not_surfaced() {
    let mut controller = PaginationController::new();
    let a = ticket(controller.request(cursor("a")));
    let b = ticket(controller.request(cursor("b")));

    controller.complete(b, Ok(page(&["from-b"], None, None)));
    assert_eq!(
        controller.complete(a, Err(FetchError::http(500))),
        Outcome::Discarded
    );
    assert_eq!(controller.state().kind(), StateKind::Ready);
    assert!(controller.state().error().is_none());
}

#[test]
fn test_cache_hit_supersedes_in_flight_fetch() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    controller.complete(first, Ok(first_page()));

    let slow = ticket(controller.next());
    assert_eq!(controller.request(None), Dispatch::CacheHit);

    assert_eq!(
        controller.complete(slow, Ok(second_page())),
        Outcome::Discarded
    );
    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);
}

#[test]
fn test_one_fetch_in_flight_per_cursor() {
    let mut controller = PaginationController::new();
    let a = ticket(controller.request(cursor("a")));
    let _b = ticket(controller.request(cursor("b")));

    // back to a while its fetch is still running
    assert_eq!(controller.request(cursor("a")), Dispatch::Joined(a.id()));
    assert_eq!(controller.in_flight(), 2);

    assert_eq!(
        controller.complete(a, Ok(page(&["from-a"], None, None))),
        Outcome::Applied
    );
    assert_eq!(displayed_names(&controller), vec!["from-a"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_first_fetch_failure() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));

    assert_eq!(
        controller.complete(first, Err(FetchError::network("refused"))),
        Outcome::Failed
    );
    assert_eq!(
        controller.state(),
        &BrowserState::Error {
            page: None,
            detail: FetchError::network("refused")
        }
    );
    assert!(!controller.cache().contains(None));
}

#[test]
fn test_failed_navigation_keeps_cursor_and_page() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    controller.complete(first, Ok(first_page()));

    let second = ticket(controller.next());
    assert_eq!(
        controller.complete(second, Err(FetchError::http(404))),
        Outcome::Failed
    );

    assert_eq!(controller.state().error(), Some(&FetchError::http(404)));
    assert_eq!(controller.current_cursor(), None);
    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);
    assert!(!controller.cache().contains(cursor("page2").as_ref()));

    // navigating again retries the page
    assert!(controller.next().is_fetch());
}

// ============================================================================
// Refresh
// ============================================================================

#[test]
fn test_refresh_bypasses_cache_and_replaces_page() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    controller.complete(first, Ok(first_page()));

    let refresh = ticket(controller.refresh());
    assert_eq!(refresh.kind(), FetchKind::Refresh);
    assert_eq!(refresh.cursor(), None);
    assert_eq!(controller.state().kind(), StateKind::Refreshing);
    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);

    let updated = page(&["bulbasaur", "ivysaur"], Some("page2"), None);
    assert_eq!(
        controller.complete(refresh, Ok(updated.clone())),
        Outcome::Applied
    );
    assert_eq!(displayed_names(&controller), vec!["bulbasaur", "ivysaur"]);
    assert_eq!(
        controller.cache().peek(None).map(|entry| entry.page.as_ref()),
        Some(&updated)
    );
}

#[test]
fn test_failed_refresh_keeps_items() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    controller.complete(first, Ok(first_page()));

    let refresh = ticket(controller.refresh());
    assert_eq!(
        controller.complete(refresh, Err(FetchError::http(503))),
        Outcome::Failed
    );

    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);
    assert_eq!(controller.state().error(), Some(&FetchError::http(503)));
    assert_eq!(
        controller.cache().peek(None).map(|entry| entry.page.as_ref()),
        Some(&first_page())
    );
}

#[test]
fn test_request_during_refresh_of_same_page_is_noop() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    controller.complete(first, Ok(first_page()));

    let refresh = ticket(controller.refresh());
    assert_eq!(controller.request(None), Dispatch::Unchanged);
    assert_eq!(controller.complete(refresh, Ok(first_page())), Outcome::Applied);
}

#[test]
fn test_refresh_superseded_by_navigation() {
    let mut controller = PaginationController::new();
    load_two_pages(&mut controller);

    let refresh = ticket(controller.refresh());
    assert_eq!(controller.prev(), Dispatch::CacheHit);

    let refreshed = page(&["ivysaur", "new"], Some("page3"), Some("page1"));
    assert_eq!(
        controller.complete(refresh, Ok(refreshed.clone())),
        Outcome::Discarded
    );
    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);
    // the fresher page two is what the cache now holds
    assert_eq!(
        controller
            .cache()
            .peek(cursor("page2").as_ref())
            .map(|entry| entry.page.as_ref()),
        Some(&refreshed)
    );
}

#[test]
fn test_refresh_joins_in_flight_fetch() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    assert_eq!(controller.refresh(), Dispatch::Joined(first.id()));
    assert_eq!(controller.state(), &BrowserState::Loading);
    assert_eq!(controller.complete(first, Ok(first_page())), Outcome::Applied);
}

#[test]
fn test_refresh_after_failed_first_load_retries() {
    let mut controller = PaginationController::new();
    let first = ticket(controller.request(None));
    controller.complete(first, Err(FetchError::network("down")));

    let retry = ticket(controller.refresh());
    assert_eq!(controller.state(), &BrowserState::Loading);
    controller.complete(retry, Ok(first_page()));
    assert_eq!(displayed_names(&controller), vec!["bulbasaur"]);
}

#[test]
fn test_state_changes_are_published() {
    let mut controller = PaginationController::new();
    let rx = controller.subscribe();

    let first = ticket(controller.request(None));
    assert_eq!(rx.borrow().kind(), StateKind::Loading);
    controller.complete(first, Ok(first_page()));
    assert_eq!(rx.borrow().kind(), StateKind::Ready);
}
