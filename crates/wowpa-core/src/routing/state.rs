use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Context and identity of one user, as far as they could be understood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedState {
    /// The context came from this plugin.
    pub linked: bool,
    pub map_id: Option<i32>,
    pub player: Option<String>,
    pub leader_guid: Option<u64>,
}

impl ParsedState {
    /// Parse a published state.
    ///
    /// `raw_context` is the context as the server sees it:
    /// `"<plugin name>\0<context>"`. States from other plugins come back
    /// unlinked; malformed payloads leave the affected fields empty.
    pub fn parse(raw_context: &str, identity: &str, plugin_name: &str) -> Self {
        let Some((prefix, context)) = raw_context.split_once('\0') else {
            return Self::default();
        };
        if prefix != plugin_name {
            return Self::default();
        }

        let mut state = Self {
            linked: true,
            ..Self::default()
        };
        if identity.is_empty() {
            return state;
        }

        match parse_map_id(context) {
            Ok(map_id) => state.map_id = Some(map_id),
            Err(e) => debug!("Invalid context '{}': {}", context, e),
        }
        match parse_identity(identity) {
            Ok((player, leader_guid)) => {
                state.player = player;
                state.leader_guid = leader_guid;
            }
            Err(e) => debug!("Invalid identity '{}': {}", identity, e),
        }

        state
    }
}

fn parse_map_id(context: &str) -> Result<i32> {
    let value: Value = serde_json::from_str(context.trim())?;
    value
        .get("Map ID")
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| Error::InvalidPayload("'Map ID' missing or not an integer".to_string()))
}

/// `Player` and optional `leaderguid` from an identity payload.
pub(crate) fn parse_identity(identity: &str) -> Result<(Option<String>, Option<u64>)> {
    let value: Value = serde_json::from_str(identity)?;

    let player = match value.get("Player") {
        Some(Value::String(name)) => Some(name.clone()),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(Error::InvalidPayload(
                "'Player' must be a string or null".to_string(),
            ));
        }
    };
    let leader_guid = match value.get("leaderguid") {
        Some(guid) => Some(guid.as_u64().ok_or_else(|| {
            Error::InvalidPayload("'leaderguid' must be an unsigned integer".to_string())
        })?),
        None => None,
    };

    Ok((player, leader_guid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{build_context, build_identity};

    const PLUGIN: &str = "World of Warcraft 3.3.5a";

    fn published(context: &str) -> String {
        format!("{PLUGIN}\0{context}")
    }

    #[test]
    fn test_parse_own_payloads() {
        let context = published(&build_context(530));
        let identity = build_identity(b"Illidan\0");

        let state = ParsedState::parse(&context, &identity, PLUGIN);
        assert!(state.linked);
        assert_eq!(state.map_id, Some(530));
        assert_eq!(state.player.as_deref(), Some("Illidan"));
        assert_eq!(state.leader_guid, None);
    }

    #[test]
    fn test_other_plugin_is_unlinked() {
        let state = ParsedState::parse("Other Game\0{}", "{}", PLUGIN);
        assert_eq!(state, ParsedState::default());
    }

    #[test]
    fn test_missing_separator_is_unlinked() {
        let state = ParsedState::parse(PLUGIN, "{}", PLUGIN);
        assert!(!state.linked);
    }

    #[test]
    fn test_empty_identity_is_linked_without_data() {
        let state = ParsedState::parse(&published(" {\"Map ID\": 1}"), "", PLUGIN);
        assert!(state.linked);
        assert_eq!(state.map_id, None);
    }

    #[test]
    fn test_empty_context_has_no_map() {
        let state = ParsedState::parse(&published(""), &build_identity(b"\0"), PLUGIN);
        assert!(state.linked);
        assert_eq!(state.map_id, None);
        assert_eq!(state.player, None);
    }

    #[test]
    fn test_non_integer_map_id() {
        let state = ParsedState::parse(&published("{\"Map ID\": \"one\"}"), "{}", PLUGIN);
        assert_eq!(state.map_id, None);
    }

    #[test]
    fn test_leader_guid() {
        let identity = "{\"Player\": \"Rexxar\", \"leaderguid\": 17}";
        let state = ParsedState::parse(&published("{\"Map ID\": 36}"), identity, PLUGIN);

        assert_eq!(state.map_id, Some(36));
        assert_eq!(state.leader_guid, Some(17));
    }

    #[test]
    fn test_bad_leader_guid_drops_identity() {
        let identity = "{\"Player\": \"Rexxar\", \"leaderguid\": -3}";
        let state = ParsedState::parse(&published("{\"Map ID\": 36}"), identity, PLUGIN);

        assert_eq!(state.player, None);
        assert_eq!(state.leader_guid, None);
        assert_eq!(state.map_id, Some(36));
    }

    #[test]
    fn test_payload_errors() {
        assert!(matches!(
            parse_map_id("{\"Map ID\": 1.5}"),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_identity("{\"Player\": 3}"),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(parse_identity("not json"), Err(Error::Json(_))));
    }
}
