use std::sync::Once;

use catalog_core::{
    update, Effect, FeedIntent, FeedState, Msg, Product, SearchFailure, UNKNOWN_ERROR_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn product(title: &str) -> Product {
    Product {
        title: title.to_string(),
        price: 19609,
        available_quantity: 1,
        condition: "new".to_string(),
        permalink: format!("https://example.com/p/{title}"),
        thumbnail: format!("https://example.com/t/{title}.jpg"),
    }
}

fn fetch(state: FeedState, keyword: &str) -> (FeedState, Vec<Effect>) {
    update(state, Msg::Intent(FeedIntent::fetch_products(keyword)))
}

#[test]
fn fetch_from_idle_enters_loading_and_requests_search() {
    init_logging();
    let (state, effects) = fetch(FeedState::Idle, "phone");

    assert_eq!(state, FeedState::Loading);
    assert_eq!(
        effects,
        vec![Effect::Search {
            keyword: "phone".to_string()
        }]
    );
}

#[test]
fn empty_keyword_is_passed_through() {
    init_logging();
    let (_, effects) = fetch(FeedState::Idle, "");
    assert_eq!(
        effects,
        vec![Effect::Search {
            keyword: String::new()
        }]
    );
}

#[test]
fn successful_search_settles_to_products() {
    init_logging();
    let (state, _) = fetch(FeedState::Idle, "phone");
    let items = vec![product("a"), product("b")];

    let (state, effects) = update(state, Msg::SearchCompleted(Ok(items.clone())));

    assert_eq!(state, FeedState::Products(items));
    assert!(effects.is_empty());
}

#[test]
fn empty_result_is_products_not_error() {
    init_logging();
    let (state, _) = fetch(FeedState::Idle, "zzzzunlikely");
    let (state, _) = update(state, Msg::SearchCompleted(Ok(Vec::new())));

    assert_eq!(state, FeedState::Products(Vec::new()));
}

#[test]
fn failure_with_message_keeps_message() {
    init_logging();
    let (state, _) = fetch(FeedState::Idle, "x");
    let (state, _) = update(
        state,
        Msg::SearchCompleted(Err(SearchFailure::reported("timeout"))),
    );

    assert_eq!(state, FeedState::Error("timeout".to_string()));
}

#[test]
fn failure_without_message_uses_fallback() {
    init_logging();
    let (state, _) = fetch(FeedState::Idle, "x");
    let (state, _) = update(state, Msg::SearchCompleted(Err(SearchFailure::Unknown)));

    assert_eq!(state, FeedState::Error(UNKNOWN_ERROR_MESSAGE.to_string()));
}

#[test]
fn settled_states_accept_a_new_fetch() {
    init_logging();
    for settled in [
        FeedState::Products(vec![product("a")]),
        FeedState::Error("boom".to_string()),
    ] {
        let (state, effects) = fetch(settled, "again");
        assert_eq!(state, FeedState::Loading);
        assert_eq!(effects.len(), 1);
    }
}

#[test]
fn update_never_returns_to_idle() {
    init_logging();
    let mut state = FeedState::Idle;
    let msgs = vec![
        Msg::Intent(FeedIntent::fetch_products("a")),
        Msg::SearchCompleted(Ok(vec![product("a")])),
        Msg::Intent(FeedIntent::fetch_products("b")),
        Msg::SearchCompleted(Err(SearchFailure::Unknown)),
        Msg::SearchCompleted(Ok(Vec::new())),
        Msg::Intent(FeedIntent::fetch_products("c")),
    ];

    for msg in msgs {
        let previous = state.clone();
        let (next, _) = update(state, msg);
        assert_ne!(next, FeedState::Idle);
        if next != previous {
            assert!(
                previous.can_transition_to(&next),
                "illegal edge {previous:?} -> {next:?}"
            );
        }
        state = next;
    }
}
