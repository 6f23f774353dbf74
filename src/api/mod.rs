//! HTTP API for the callback gateway
//!
//! The Traktor D2 controller integration posts JSON callbacks to:
//! - `POST /deckLoaded/:deck` - a track was loaded into a deck
//! - `POST /updateDeck/:deck` - deck values or playback state changed
//! - `POST /updateMasterClock` - the master deck or BPM changed
//! - `POST /updateChannel/:channel` - mixer channel state changed
//!
//! Anything else is acknowledged but only noted on the console, so the
//! controller is never blocked by a route it knows about and we don't.

pub mod callbacks;

use axum::{routing::post, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::SessionState;

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    /// Latest controller state, guarded for concurrent callback delivery
    pub sessions: Arc<RwLock<SessionState>>,
}

impl AppState {
    /// Create a new AppState with an empty session cache
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the HTTP API router
pub fn build_router(state: AppState) -> Router {
    // Dispatch follows the controller's scheme: the first path segment picks
    // the handler, the second names the deck or channel, and anything after
    // that is ignored. The `/*rest` twins keep the longer forms routed.
    Router::new()
        .route("/deckLoaded/:deck", post(callbacks::deck_loaded))
        .route("/deckLoaded/:deck/*rest", post(callbacks::deck_loaded))
        .route("/updateDeck/:deck", post(callbacks::update_deck))
        .route("/updateDeck/:deck/*rest", post(callbacks::update_deck))
        .route("/updateMasterClock", post(callbacks::update_master_clock))
        .route(
            "/updateMasterClock/*rest",
            post(callbacks::update_master_clock),
        )
        .route("/updateChannel/:channel", post(callbacks::update_channel))
        .route(
            "/updateChannel/:channel/*rest",
            post(callbacks::update_channel),
        )
        .fallback(callbacks::unknown_endpoint)
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_state_starts_empty() {
        let state = AppState::new();
        let sessions = state.sessions.read().await;

        assert_eq!(sessions.deck_count(), 0);
        assert_eq!(sessions.channel_count(), 0);
        assert!(sessions.master_clock().is_empty());
    }
}
