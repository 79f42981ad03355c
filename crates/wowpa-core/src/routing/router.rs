use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PluginDescriptor;
use crate::error::{Error, Result};
use crate::routing::ParsedState;

pub type ChannelId = u32;

/// Root channel id; created channels are numbered from 1.
const ROOT: ChannelId = 0;

/// Router settings, usually loaded from a TOML file.
///
/// ```toml
/// plugin_name = "World of Warcraft 3.3.5a"
///
/// [worlds]
/// "Eastern Kingdoms" = 0
/// Kalimdor = 1
/// Outland = 530
/// Northrend = 571
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default = "default_plugin_name")]
    pub plugin_name: String,
    /// Channel name to map id.
    #[serde(default)]
    pub worlds: BTreeMap<String, i32>,
}

fn default_plugin_name() -> String {
    PluginDescriptor::wow_3_3_5a().name
}

impl RouterConfig {
    /// Reject configs where two world channels claim the same map.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<i32, &str> = HashMap::new();
        for (name, &map_id) in &self.worlds {
            if let Some(first) = seen.insert(map_id, name) {
                return Err(Error::ConfigParseError(format!(
                    "Worlds '{}' and '{}' both use map id {}",
                    first, name, map_id
                )));
            }
        }
        Ok(())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            plugin_name: default_plugin_name(),
            worlds: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub parent: ChannelId,
}

/// Flat in-memory channel tree.
#[derive(Debug, Clone, Default)]
pub struct ChannelTree {
    channels: Vec<Channel>,
    last_id: ChannelId,
}

impl ChannelTree {
    pub fn add(&mut self, name: &str, parent: ChannelId) -> ChannelId {
        self.last_id += 1;
        let id = self.last_id;
        self.channels.push(Channel {
            id,
            name: name.to_string(),
            parent,
        });
        id
    }

    pub fn get(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Remove a channel and everything below it.
    pub fn remove(&mut self, id: ChannelId) {
        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(
                self.channels
                    .iter()
                    .filter(|c| c.parent == parent)
                    .map(|c| c.id),
            );
            i += 1;
        }
        self.channels.retain(|c| !doomed.contains(&c.id));
    }

    /// Slash-separated path from the root, e.g. `Proximity Groups/Overworld/Kalimdor`.
    pub fn path(&self, id: ChannelId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.get(id)?;
        loop {
            names.push(current.name.as_str());
            if current.parent == ROOT {
                break;
            }
            current = self.get(current.parent)?;
        }
        names.reverse();
        Some(names.join("/"))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Decides which channel a user belongs in.
///
/// Layout created on construction:
///
/// ```text
/// Proximity Groups
/// ├── Waiting Room
/// ├── Group Channels
/// │   └── <leader guid>   (created on demand)
/// └── Overworld
///     └── <world name>    (one per configured map)
/// ```
#[derive(Debug, Clone)]
pub struct ChannelRouter {
    plugin_name: String,
    tree: ChannelTree,
    waiting_room: ChannelId,
    group_parent: ChannelId,
    worlds: HashMap<i32, ChannelId>,
    groups: HashMap<u64, ChannelId>,
    users: HashMap<u32, UserState>,
}

/// Last published strings of a connected user and where they were routed.
#[derive(Debug, Clone)]
struct UserState {
    raw_context: String,
    identity: String,
    parsed: ParsedState,
}

impl ChannelRouter {
    pub fn new(config: &RouterConfig) -> Self {
        let mut tree = ChannelTree::default();
        let top = tree.add("Proximity Groups", ROOT);
        let waiting_room = tree.add("Waiting Room", top);
        let group_parent = tree.add("Group Channels", top);
        let overworld = tree.add("Overworld", top);

        let mut worlds = HashMap::new();
        for (name, &map_id) in &config.worlds {
            if worlds.contains_key(&map_id) {
                warn!("Skipping world '{}': map id {} already has a channel", name, map_id);
                continue;
            }
            worlds.insert(map_id, tree.add(name, overworld));
        }

        Self {
            plugin_name: config.plugin_name.clone(),
            tree,
            waiting_room,
            group_parent,
            worlds,
            groups: HashMap::new(),
            users: HashMap::new(),
        }
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    pub fn tree(&self) -> &ChannelTree {
        &self.tree
    }

    pub fn waiting_room(&self) -> ChannelId {
        self.waiting_room
    }

    /// Parse a published state and route it.
    pub fn route_raw(&mut self, raw_context: &str, identity: &str) -> Option<ChannelId> {
        let state = ParsedState::parse(raw_context, identity, &self.plugin_name);
        self.route(&state)
    }

    /// Route a connected user's published state.
    ///
    /// Only changes are routed: when `raw_context` and `identity` equal the
    /// strings last seen for `session`, nothing is parsed and `None` is
    /// returned.
    pub fn update(&mut self, session: u32, raw_context: &str, identity: &str) -> Option<ChannelId> {
        if let Some(user) = self.users.get(&session)
            && user.raw_context == raw_context
            && user.identity == identity
        {
            return None;
        }

        let parsed = ParsedState::parse(raw_context, identity, &self.plugin_name);
        let channel = self.route(&parsed);
        self.users.insert(
            session,
            UserState {
                raw_context: raw_context.to_string(),
                identity: identity.to_string(),
                parsed,
            },
        );
        channel
    }

    /// Forget a user. Returns whether the session was known.
    pub fn disconnect(&mut self, session: u32) -> bool {
        self.users.remove(&session).is_some()
    }

    /// Parsed state last published by `session`.
    pub fn user_state(&self, session: u32) -> Option<&ParsedState> {
        self.users.get(&session).map(|user| &user.parsed)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Channel for `state`, or `None` to leave the user where they are.
    pub fn route(&mut self, state: &ParsedState) -> Option<ChannelId> {
        if !state.linked {
            return None;
        }
        let map_id = state.map_id?;

        if let Some(&channel) = self.worlds.get(&map_id) {
            debug!("Map {} routed to world channel {}", map_id, channel);
            return Some(channel);
        }

        match state.leader_guid {
            Some(guid) if guid > 0 => Some(self.group_channel(guid)),
            _ => Some(self.waiting_room),
        }
    }

    fn group_channel(&mut self, guid: u64) -> ChannelId {
        if let Some(&channel) = self.groups.get(&guid) {
            return channel;
        }
        let channel = self.tree.add(&guid.to_string(), self.group_parent);
        self.groups.insert(guid, channel);
        info!("New group channel for leader {}", guid);
        channel
    }

    /// Forget (and delete) the group channel of `guid`. Returns whether one existed.
    pub fn remove_group_channel(&mut self, guid: u64) -> bool {
        match self.groups.remove(&guid) {
            Some(channel) => {
                self.tree.remove(channel);
                info!("Removed group channel for leader {}", guid);
                true
            }
            None => false,
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RouterConfig {
        RouterConfig {
            worlds: BTreeMap::from([
                ("Eastern Kingdoms".to_string(), 0),
                ("Kalimdor".to_string(), 1),
            ]),
            ..RouterConfig::default()
        }
    }

    fn state(map_id: i32, leader_guid: Option<u64>) -> ParsedState {
        ParsedState {
            linked: true,
            map_id: Some(map_id),
            player: Some("Jaina".to_string()),
            leader_guid,
        }
    }

    #[test]
    fn test_world_map_routes_to_world_channel() {
        let mut router = ChannelRouter::new(&config());
        let channel = router.route(&state(1, Some(9))).unwrap();

        assert_eq!(
            router.tree().path(channel).as_deref(),
            Some("Proximity Groups/Overworld/Kalimdor")
        );
        assert_eq!(router.group_count(), 0);
    }

    #[test]
    fn test_unknown_map_goes_to_waiting_room() {
        let mut router = ChannelRouter::new(&config());
        assert_eq!(router.route(&state(36, None)), Some(router.waiting_room()));
        assert_eq!(router.route(&state(36, Some(0))), Some(router.waiting_room()));
    }

    #[test]
    fn test_group_channel_is_created_once() {
        let mut router = ChannelRouter::new(&config());
        let first = router.route(&state(36, Some(42))).unwrap();
        let second = router.route(&state(189, Some(42))).unwrap();

        assert_eq!(first, second);
        assert_eq!(router.group_count(), 1);
        assert_eq!(
            router.tree().path(first).as_deref(),
            Some("Proximity Groups/Group Channels/42")
        );
    }

    #[test]
    fn test_remove_group_channel() {
        let mut router = ChannelRouter::new(&config());
        let channel = router.route(&state(36, Some(42))).unwrap();

        assert!(router.remove_group_channel(42));
        assert!(router.tree().get(channel).is_none());
        assert!(!router.remove_group_channel(42));

        let recreated = router.route(&state(36, Some(42))).unwrap();
        assert_ne!(recreated, channel);
    }

    #[test]
    fn test_unlinked_or_unparsed_is_left_alone() {
        let mut router = ChannelRouter::new(&config());
        assert_eq!(router.route(&ParsedState::default()), None);

        let no_map = ParsedState {
            map_id: None,
            ..state(0, None)
        };
        assert_eq!(router.route(&no_map), None);
    }

    #[test]
    fn test_route_raw() {
        let mut router = ChannelRouter::new(&config());
        let raw = format!("{}\0 {{\"Map ID\": 0}}", router.plugin_name());
        let channel = router
            .route_raw(&raw, "{\n\"Player\": \"Anduin\"\n}")
            .unwrap();

        assert_eq!(router.tree().get(channel).unwrap().name, "Eastern Kingdoms");
        assert_eq!(router.route_raw("Other\0{}", "{}"), None);
    }

    #[test]
    fn test_tree_remove_is_recursive() {
        let mut tree = ChannelTree::default();
        let a = tree.add("a", ROOT);
        let b = tree.add("b", a);
        tree.add("c", b);
        let d = tree.add("d", ROOT);

        tree.remove(a);
        assert_eq!(tree.len(), 1);
        assert!(tree.get(d).is_some());
    }

    fn published(context: &str) -> String {
        format!("World of Warcraft 3.3.5a\0{}", context)
    }

    #[test]
    fn test_update_routes_only_changes() {
        let mut router = ChannelRouter::new(&config());
        let identity = "{\n\"Player\": \"Cairne\"\n}";

        let kalimdor = router.update(3, &published(" {\"Map ID\": 1}"), identity);
        assert!(kalimdor.is_some());
        assert_eq!(router.update(3, &published(" {\"Map ID\": 1}"), identity), None);
        assert_eq!(router.user_state(3).and_then(|s| s.map_id), Some(1));

        let moved = router.update(3, &published(" {\"Map ID\": 0}"), identity);
        assert!(moved.is_some());
        assert_ne!(moved, kalimdor);
        assert_eq!(router.user_state(3).and_then(|s| s.map_id), Some(0));

        // Identity change alone also re-routes.
        let regrouped = router.update(
            3,
            &published(" {\"Map ID\": 0}"),
            "{\"Player\": \"Cairne\", \"leaderguid\": 5}",
        );
        assert_eq!(regrouped, moved);
    }

    #[test]
    fn test_update_tracks_sessions_separately() {
        let mut router = ChannelRouter::new(&config());
        let context = published(" {\"Map ID\": 1}");

        assert!(router.update(1, &context, "{}").is_some());
        assert!(router.update(2, &context, "{}").is_some());
        assert_eq!(router.user_count(), 2);
    }

    #[test]
    fn test_disconnect_forgets_user() {
        let mut router = ChannelRouter::new(&config());
        let context = published(" {\"Map ID\": 1}");
        let first = router.update(8, &context, "{}");

        assert!(router.disconnect(8));
        assert!(!router.disconnect(8));
        assert_eq!(router.user_state(8), None);
        assert_eq!(router.update(8, &context, "{}"), first);
    }

    #[test]
    fn test_duplicate_map_id_keeps_first_world() {
        let config = RouterConfig {
            worlds: BTreeMap::from([
                ("Azeroth".to_string(), 0),
                ("Eastern Kingdoms".to_string(), 0),
            ]),
            ..RouterConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigParseError(_))));

        let mut router = ChannelRouter::new(&config);
        let channel = router.route(&state(0, None)).unwrap();
        assert_eq!(router.tree().get(channel).unwrap().name, "Azeroth");
        // Proximity Groups, Waiting Room, Group Channels, Overworld and one world.
        assert_eq!(router.tree().len(), 5);
    }

    #[test]
    fn test_validate_distinct_map_ids() {
        assert!(config().validate().is_ok());
        assert!(RouterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let config: RouterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.plugin_name, "World of Warcraft 3.3.5a");
        assert!(config.worlds.is_empty());
    }
}
