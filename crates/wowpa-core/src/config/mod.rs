//! Configuration and support files.
//!
//! - `PluginDescriptor` - immutable descriptive strings handed to the host
//! - Layout files overriding the built-in memory layout
//! - Polling and attach retry constants

mod descriptor;
mod layout_file;

pub use descriptor::PluginDescriptor;
pub use layout_file::{format_layout, load_layout, parse_layout, save_layout};

/// Host tick configuration.
pub mod polling {
    use std::time::Duration;

    /// Delay between fetches while attached (ms). Positional audio hosts
    /// poll at roughly 50 Hz.
    pub const TICK_INTERVAL_MS: u64 = 20;

    /// Delay between attach attempts while the game is not running.
    pub const ATTACH_RETRY_INTERVAL: Duration = Duration::from_secs(5);
}

/// Attach retry configuration for one-shot commands.
///
/// Linear backoff: 250ms → 500ms → 1000ms before giving up.
pub mod retry {
    /// Maximum number of attach attempts.
    pub const MAX_ATTACH_ATTEMPTS: u32 = 3;

    /// Delay (in ms) after each failed attempt.
    pub const RETRY_DELAYS_MS: [u64; 3] = [250, 500, 1000];
}
