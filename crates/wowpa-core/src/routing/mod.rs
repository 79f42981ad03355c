//! Server-side channel routing for users publishing this plugin's data.
//!
//! The voice server receives each user's context (prefixed by the plugin
//! name and a NUL) and identity. Users on a known world map are moved to
//! that map's channel; everyone else waits in a muted room, or joins a
//! group channel when their identity names a party leader.

mod router;
mod state;

pub use router::{Channel, ChannelId, ChannelRouter, ChannelTree, RouterConfig};
pub use state::ParsedState;
pub(crate) use state::parse_identity;
