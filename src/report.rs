//! Console summaries for incoming callbacks
//!
//! The summary text is the gateway's observable output contract, so every
//! block is rendered to a `String` here and printed by the handlers. Missing
//! fields fall back to fixed defaults rather than erroring; the controller's
//! payload shape varies across firmware versions.

use crate::state::Fields;
use serde_json::Value;

/// Render the summary for a track loaded into `deck`.
pub fn deck_loaded(deck: &str, data: &Fields) -> String {
    format!(
        "--- Deck {} Loaded ---\n\
         Title: {}\n\
         Artist: {}\n\
         Album: {}\n\
         BPM: {:.2}\n\
         Key: {}",
        deck,
        text_or(data, "title", "Unknown"),
        text_or(data, "artist", "Unknown"),
        text_or(data, "album", "Unknown"),
        number_or(data, "bpm", 0.0),
        text_or(data, "key", "Unknown"),
    )
}

/// Render the summary for a deck state change.
///
/// Returns `None` when the payload carries none of the fields worth
/// reporting; the caller prints nothing in that case.
pub fn deck_update(deck: &str, data: &Fields) -> Option<String> {
    let interesting = ["isPlaying", "isSynced", "tempo", "elapsedTime"];
    if !interesting.iter().any(|key| data.contains_key(*key)) {
        return None;
    }

    let mut lines = vec![format!("--- Deck {} Update ---", deck)];

    if let Some(playing) = data.get("isPlaying") {
        let status = if truthy(playing) { "Playing" } else { "Stopped" };
        lines.push(format!("Status: {}", status));
    }
    if let Some(synced) = data.get("isSynced") {
        let sync = if truthy(synced) { "Synced" } else { "Not Synced" };
        lines.push(format!("Sync: {}", sync));
    }
    if data.contains_key("tempo") {
        lines.push(format!("Tempo: {:.2}", number_or(data, "tempo", 0.0)));
    }
    if data.contains_key("elapsedTime") {
        let elapsed = number_or(data, "elapsedTime", 0.0);
        lines.push(format!("Elapsed Time: {}", clock_time(elapsed)));
    }

    Some(lines.join("\n"))
}

/// Render the summary for a master-clock change. Always printed.
pub fn master_clock(data: &Fields) -> String {
    format!(
        "--- Master Clock Update ---\n\
         Master Deck: {}\n\
         BPM: {:.2}",
        text_or(data, "deck", "None"),
        number_or(data, "bpm", 0.0),
    )
}

/// Render the summary for a mixer-channel state change.
///
/// Returns `None` when neither on-air field is present.
pub fn channel_update(channel: &str, data: &Fields) -> Option<String> {
    if !data.contains_key("onAirLevel") && !data.contains_key("isOnAir") {
        return None;
    }

    let mut lines = vec![format!("--- Channel {} Update ---", channel)];

    if data.contains_key("onAirLevel") {
        let level = number_or(data, "onAirLevel", 0.0) * 100.0;
        lines.push(format!("Level: {:.1}%", level));
    }
    if let Some(on_air) = data.get("isOnAir") {
        let status = if truthy(on_air) { "On Air" } else { "Off Air" };
        lines.push(format!("Status: {}", status));
    }

    Some(lines.join("\n"))
}

/// String field with a fallback default for missing or non-string values.
fn text_or<'a>(data: &'a Fields, key: &str, default: &'a str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// Numeric field with a fallback default for missing or non-numeric values.
fn number_or(data: &Fields, key: &str, default: f64) -> f64 {
    data.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Loose truthiness for flag fields the controller sometimes sends as 0/1.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Format elapsed seconds as zero-padded `MM:SS`.
fn clock_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let secs = (seconds % 60.0) as i64;
    format!("{:02}:{:02}", minutes, secs)
}
