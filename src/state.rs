//! In-memory cache of the latest state reported by the controller
//!
//! The gateway keeps the last-known fields for every deck and mixer channel
//! plus the latest master-clock snapshot. Payloads are schema-less (the
//! controller's field set varies across firmware versions), so sections store
//! raw JSON field maps rather than fixed records.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Field map carried by a single callback payload.
pub type Fields = Map<String, Value>;

/// Latest known controller state, alive for the server's lifetime.
///
/// Update rules: per-deck and per-channel updates merge into the existing
/// entry (new keys added, existing keys overwritten). A deck-loaded callback
/// and a master-clock callback replace their target wholesale, since a newly
/// loaded track or clock snapshot supersedes everything known before it.
/// Entries are never deleted.
#[derive(Debug, Default)]
pub struct SessionState {
    decks: HashMap<String, Fields>,
    channels: HashMap<String, Fields>,
    master_clock: Fields,
    /// Reserved for browser callbacks; the controller does not send them yet.
    browser: Fields,
}

impl SessionState {
    /// Create an empty state cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// A track was loaded into `deck`: the payload replaces the deck's entry
    /// in full.
    pub fn deck_loaded(&mut self, deck: &str, fields: Fields) {
        self.decks.insert(deck.to_string(), fields);
    }

    /// Merge a deck update into `deck`, creating the entry if absent.
    pub fn update_deck(&mut self, deck: &str, fields: Fields) {
        merge(self.decks.entry(deck.to_string()).or_default(), fields);
    }

    /// Replace the master-clock snapshot wholesale.
    pub fn update_master_clock(&mut self, fields: Fields) {
        self.master_clock = fields;
    }

    /// Merge a mixer-channel update into `channel`, creating the entry if
    /// absent.
    pub fn update_channel(&mut self, channel: &str, fields: Fields) {
        merge(self.channels.entry(channel.to_string()).or_default(), fields);
    }

    /// Last-known fields for a deck, if any callback mentioned it.
    pub fn deck(&self, deck: &str) -> Option<&Fields> {
        self.decks.get(deck)
    }

    /// Last-known fields for a mixer channel.
    pub fn channel(&self, channel: &str) -> Option<&Fields> {
        self.channels.get(channel)
    }

    /// Latest master-clock snapshot (empty until the first callback).
    pub fn master_clock(&self) -> &Fields {
        &self.master_clock
    }

    /// Reserved browser section.
    pub fn browser(&self) -> &Fields {
        &self.browser
    }

    /// Number of decks seen so far.
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    /// Number of channels seen so far.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

fn merge(target: &mut Fields, fields: Fields) {
    for (key, value) in fields {
        target.insert(key, value);
    }
}
