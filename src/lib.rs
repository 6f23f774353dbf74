//! Traktor D2 Callback Gateway
//!
//! Local HTTP endpoint for the Traktor D2 controller integration. The
//! controller posts JSON callbacks whenever a track is loaded, a deck or
//! mixer channel changes, or the master clock moves; the gateway prints a
//! readable summary for each one and caches the latest known state in
//! memory.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    traktor-d2-callbacks                    │
//! ├────────────────────────────────────────────────────────────┤
//! │                                                            │
//! │  ┌──────────────────┐  ← POST /deckLoaded/:deck            │
//! │  │  HTTP API Server │  ← POST /updateDeck/:deck            │
//! │  │  (axum)          │  ← POST /updateMasterClock           │
//! │  └────────┬─────────┘  ← POST /updateChannel/:channel      │
//! │           │ updates                                        │
//! │           ▼                                                │
//! │  ┌──────────────────┐        ┌──────────────────┐          │
//! │  │  Session State   │───────▶│  Console Report  │          │
//! │  │  (decks, clock)  │        │  (stdout)        │          │
//! │  └──────────────────┘        └──────────────────┘          │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod report;
pub mod state;
