//! End-to-end tests for the callback routes
//!
//! Drives the router directly with `tower::ServiceExt::oneshot` and checks
//! both the HTTP acknowledgment contract and the session-cache transitions
//! behind it.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use traktor_d2_callbacks::api::{build_router, AppState};

fn gateway() -> (AppState, Router) {
    let state = AppState::new();
    let router = build_router(state.clone());
    (state, router)
}

async fn post(router: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_deck_loaded_replaces_cached_entry() {
    let (state, router) = gateway();

    post(&router, "/updateDeck/A", r#"{"tempo": 120.0, "isPlaying": true}"#).await;
    let (status, body) = post(&router, "/deckLoaded/A", r#"{"title": "Spastik"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sessions = state.sessions.read().await;
    let deck = sessions.deck("A").unwrap();
    assert_eq!(deck.len(), 1);
    assert_eq!(deck["title"], json!("Spastik"));
}

#[tokio::test]
async fn test_update_deck_merges_disjoint_fields() {
    let (state, router) = gateway();

    post(&router, "/updateDeck/B", r#"{"isPlaying": true}"#).await;
    post(&router, "/updateDeck/B", r#"{"tempo": 128.0}"#).await;

    let sessions = state.sessions.read().await;
    let deck = sessions.deck("B").unwrap();
    assert_eq!(deck.len(), 2);
    assert_eq!(deck["isPlaying"], json!(true));
    assert_eq!(deck["tempo"], json!(128.0));
}

#[tokio::test]
async fn test_update_deck_second_post_wins_on_overlap() {
    let (state, router) = gateway();

    post(&router, "/updateDeck/C", r#"{"tempo": 120.0, "isSynced": true}"#).await;
    post(&router, "/updateDeck/C", r#"{"tempo": 126.5}"#).await;

    let sessions = state.sessions.read().await;
    let deck = sessions.deck("C").unwrap();
    assert_eq!(deck["tempo"], json!(126.5));
    assert_eq!(deck["isSynced"], json!(true));
}

#[tokio::test]
async fn test_update_channel_merges_fields() {
    let (state, router) = gateway();

    let (status, body) = post(&router, "/updateChannel/1", r#"{"isOnAir": true}"#).await;
    post(&router, "/updateChannel/1", r#"{"onAirLevel": 0.5}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sessions = state.sessions.read().await;
    let channel = sessions.channel("1").unwrap();
    assert_eq!(channel["isOnAir"], json!(true));
    assert_eq!(channel["onAirLevel"], json!(0.5));
}

#[tokio::test]
async fn test_master_clock_replaced_wholesale() {
    let (state, router) = gateway();

    post(&router, "/updateMasterClock", r#"{"deck": "B", "bpm": 128.0}"#).await;
    post(&router, "/updateMasterClock", r#"{"deck": "A"}"#).await;

    let sessions = state.sessions.read().await;
    let clock = sessions.master_clock();
    assert_eq!(clock.len(), 1);
    assert_eq!(clock["deck"], json!("A"));
}

#[tokio::test]
async fn test_deck_loaded_tolerates_extra_path_segments() {
    let (state, router) = gateway();

    let (status, body) = post(&router, "/deckLoaded/A/extra", r#"{"title": "Spastik"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sessions = state.sessions.read().await;
    let deck = sessions.deck("A").expect("deck A should have been loaded");
    assert_eq!(deck["title"], json!("Spastik"));
}

#[tokio::test]
async fn test_update_deck_tolerates_extra_path_segments() {
    let (state, router) = gateway();

    post(&router, "/updateDeck/B/state/more", r#"{"tempo": 128.0}"#).await;

    let sessions = state.sessions.read().await;
    assert_eq!(sessions.deck("B").unwrap()["tempo"], json!(128.0));
}

#[tokio::test]
async fn test_update_channel_tolerates_extra_path_segments() {
    let (state, router) = gateway();

    post(&router, "/updateChannel/1/extra", r#"{"isOnAir": true}"#).await;

    let sessions = state.sessions.read().await;
    assert_eq!(sessions.channel("1").unwrap()["isOnAir"], json!(true));
}

#[tokio::test]
async fn test_master_clock_tolerates_extra_path_segment() {
    let (state, router) = gateway();

    let (status, body) = post(&router, "/updateMasterClock/A", r#"{"deck": "A"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sessions = state.sessions.read().await;
    assert_eq!(sessions.master_clock()["deck"], json!("A"));
}

#[tokio::test]
async fn test_undecodable_body_rejected_without_mutation() {
    let (state, router) = gateway();

    let (status, body) = post(&router, "/updateDeck/A", "not json {").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());

    let sessions = state.sessions.read().await;
    assert_eq!(sessions.deck_count(), 0);
    assert_eq!(sessions.channel_count(), 0);
    assert!(sessions.master_clock().is_empty());
}

#[tokio::test]
async fn test_undecodable_body_rejected_on_unknown_path_too() {
    let (_state, router) = gateway();

    let request = Request::builder()
        .method("POST")
        .uri("/browser/open")
        .body(Body::from(vec![0xff, 0xfe, 0xfd]))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8_lossy(&bytes).into_owned();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_unknown_path_acknowledged_without_mutation() {
    let (state, router) = gateway();

    let (status, body) = post(&router, "/unknownpath", r#"{"x": 1}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sessions = state.sessions.read().await;
    assert_eq!(sessions.deck_count(), 0);
    assert_eq!(sessions.channel_count(), 0);
    assert!(sessions.master_clock().is_empty());
}

#[tokio::test]
async fn test_deck_loaded_without_deck_segment_is_unknown() {
    let (state, router) = gateway();

    let (status, body) = post(&router, "/deckLoaded", r#"{"title": "x"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sessions = state.sessions.read().await;
    assert_eq!(sessions.deck_count(), 0);
}

#[tokio::test]
async fn test_acknowledgment_is_plain_text() {
    let (_state, router) = gateway();

    let request = Request::builder()
        .method("POST")
        .uri("/updateMasterClock")
        .body(Body::from("{}"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain"
    );
}

#[tokio::test]
async fn test_non_object_json_body_acknowledged_with_defaults() {
    let (state, router) = gateway();

    let (status, body) = post(&router, "/deckLoaded/D", "42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sessions = state.sessions.read().await;
    assert!(sessions.deck("D").unwrap().is_empty());
}
