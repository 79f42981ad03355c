//! Positional audio data for World of Warcraft 3.3.5a.
//!
//! Reads the player's position, heading, name and map from a running
//! `Wow.exe` (build 12340, x86) and republishes them in a positional-audio
//! host's coordinate convention, together with context and identity
//! strings. The `routing` module holds the matching server-side logic
//! that places users into channels from those strings.

pub mod config;
pub mod error;
pub mod export;
pub mod metadata;
pub mod plugin;
pub mod position;
pub mod process;
pub mod routing;
pub mod sample;
pub mod session;

pub use config::{PluginDescriptor, format_layout, load_layout, parse_layout, save_layout};
pub use error::{Error, Result};
pub use export::{format_frame_console, format_frame_json, format_frame_summary};
pub use metadata::{Metadata, build_context, build_identity, escape};
pub use plugin::PositionalPlugin;
pub use position::{OutputFrame, Pose, Vec3};
pub use process::{
    MemoryAddress, MemoryLayout, MemoryReader, ProcessHandle, ProcessInfo, ProcessProvider,
    ReadMemory, SystemProcessProvider,
};
pub use routing::{ChannelId, ChannelRouter, ParsedState, RouterConfig};
pub use sample::{PlayerState, RawSample, SampleFetcher};
pub use session::{Session, SessionManager};
