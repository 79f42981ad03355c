//! Builders for the context and identity strings.
//!
//! Both are pure functions of the map id and the raw player-name buffer so
//! they can be tested without a process.

use crate::metadata::{escape, terminated};

/// Context and identity strings for one in-game frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub context: String,
    pub identity: String,
}

/// Context payload for a map id. Negative ids mean "no map" and give an
/// empty string.
pub fn build_context(map_id: i32) -> String {
    if map_id >= 0 {
        format!(" {{\"Map ID\": {map_id}}}")
    } else {
        String::new()
    }
}

/// Sanitized player name from a raw memory buffer.
pub fn player_name(raw_name: &[u8]) -> String {
    let mut buffer = raw_name.to_vec();
    escape(&mut buffer);
    String::from_utf8_lossy(terminated(&buffer)).into_owned()
}

/// Identity payload with a single `Player` key; null when the sanitized
/// name is empty.
pub fn build_identity(raw_name: &[u8]) -> String {
    let name = player_name(raw_name);
    if name.is_empty() {
        "{\n\"Player\": null\n}".to_string()
    } else {
        format!("{{\n\"Player\": \"{name}\"\n}}")
    }
}

pub fn serialize(map_id: i32, raw_name: &[u8]) -> Metadata {
    Metadata {
        context: build_context(map_id),
        identity: build_identity(raw_name),
    }
}
