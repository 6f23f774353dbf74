//! Callback endpoints posted by the controller
//!
//! Every handler follows the same contract: decode the JSON body, print the
//! summary block for anything worth reporting, fold the payload into the
//! session cache, and acknowledge with a plain-text `OK`. A body that fails
//! to decode is rejected with an empty 400 before any state is touched.

use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use super::AppState;
use crate::report;
use crate::state::Fields;

/// Path captures for the deck route families. Segments past the deck name
/// are ignored, matching the controller's first-segment dispatch.
#[derive(Debug, Deserialize)]
pub struct DeckPath {
    deck: String,
}

/// Path captures for the channel route family.
#[derive(Debug, Deserialize)]
pub struct ChannelPath {
    channel: String,
}

/// `POST /deckLoaded/:deck` - a track was loaded into a deck.
///
/// The payload replaces the deck's cached entry in full; a fresh track
/// supersedes everything previously known about the deck.
pub async fn deck_loaded(
    State(state): State<AppState>,
    Path(DeckPath { deck }): Path<DeckPath>,
    body: Bytes,
) -> Response {
    let fields = match parse_fields(&body) {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };

    let mut sessions = state.sessions.write().await;
    println!("\n{}", report::deck_loaded(&deck, &fields));
    sessions.deck_loaded(&deck, fields);

    acknowledge()
}

/// `POST /updateDeck/:deck` - deck values or playback state changed.
///
/// The payload merges into the deck's cached entry. Only payloads carrying
/// playback-relevant fields produce a summary block.
pub async fn update_deck(
    State(state): State<AppState>,
    Path(DeckPath { deck }): Path<DeckPath>,
    body: Bytes,
) -> Response {
    let fields = match parse_fields(&body) {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };

    let mut sessions = state.sessions.write().await;
    if let Some(summary) = report::deck_update(&deck, &fields) {
        println!("\n{}", summary);
    }
    sessions.update_deck(&deck, fields);

    acknowledge()
}

/// `POST /updateMasterClock` - the master deck or BPM changed.
///
/// The payload replaces the cached clock snapshot wholesale.
pub async fn update_master_clock(State(state): State<AppState>, body: Bytes) -> Response {
    let fields = match parse_fields(&body) {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };

    let mut sessions = state.sessions.write().await;
    println!("\n{}", report::master_clock(&fields));
    sessions.update_master_clock(fields);

    acknowledge()
}

/// `POST /updateChannel/:channel` - mixer channel state changed.
///
/// The payload merges into the channel's cached entry. Only on-air fields
/// produce a summary block.
pub async fn update_channel(
    State(state): State<AppState>,
    Path(ChannelPath { channel }): Path<ChannelPath>,
    body: Bytes,
) -> Response {
    let fields = match parse_fields(&body) {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };

    let mut sessions = state.sessions.write().await;
    if let Some(summary) = report::channel_update(&channel, &fields) {
        println!("\n{}", summary);
    }
    sessions.update_channel(&channel, fields);

    acknowledge()
}

/// Fallback for any route the gateway does not recognize.
///
/// The controller is never blocked: the path is noted on the console and the
/// request is acknowledged like any other. State is left untouched.
pub async fn unknown_endpoint(OriginalUri(uri): OriginalUri, body: Bytes) -> Response {
    if let Err(rejection) = parse_fields(&body) {
        return rejection;
    }

    println!("Unknown endpoint: {}", uri);

    acknowledge()
}

/// Decode the request body as a JSON field map.
///
/// A payload that is valid JSON but not an object is treated as carrying no
/// fields, consistent with the silent-default policy for missing fields. An
/// undecodable body yields an empty 400 response.
fn parse_fields(body: &Bytes) -> Result<Fields, Response> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Ok(value.as_object().cloned().unwrap_or_default()),
        Err(e) => {
            println!("Error: Could not decode JSON data");
            tracing::warn!(error = %e, "discarding callback with undecodable body");
            Err(StatusCode::BAD_REQUEST.into_response())
        }
    }
}

/// Fixed plain-text acknowledgment the controller expects.
fn acknowledge() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        "OK",
    )
        .into_response()
}
