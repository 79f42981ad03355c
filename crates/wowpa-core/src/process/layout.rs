//! Memory layout for the supported game build.
//!
//! The addresses are absolute (the x86 client is not relocated) and only
//! valid for World of Warcraft 3.3.5a build 12340. A different build needs a
//! different [`MemoryLayout`], loadable from a file via
//! [`crate::config::load_layout`].
//!
//! # Fields
//!
//! ```text
//! Field            Address      Size  Description
//! ─────────────────────────────────────────────────────────────
//! state            0x00BD0792   1     1 while the player is in the world
//! avatar_position  0x00ADF4E4   12    Player position (3 x f32)
//! avatar_heading   0x00BEBA70   4     Player facing, radians (f32)
//! camera_position  0x00ADF4E4   12    Same as avatar_position
//! camera_front     0x00ADF5F0   12    Camera front vector (3 x f32)
//! camera_top       0x00ADF554   12    Camera top vector (3 x f32)
//! player_name      0x00C79D18   50    NUL-terminated character name
//! map_id           0x00AB63BC   4     Current map (i32, negative = none)
//! ```

use serde::{Deserialize, Serialize};

/// Size of a packed three-float vector.
pub const VEC3_SIZE: usize = 12;

/// Capacity of the player-name buffer.
pub const PLAYER_NAME_SIZE: usize = 50;

/// A location in the target process together with the number of bytes
/// stored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryAddress {
    pub address: u64,
    pub width: usize,
}

impl MemoryAddress {
    pub const fn new(address: u64, width: usize) -> Self {
        Self { address, width }
    }

    pub const fn u8(address: u64) -> Self {
        Self::new(address, 1)
    }

    pub const fn i32(address: u64) -> Self {
        Self::new(address, 4)
    }

    pub const fn f32(address: u64) -> Self {
        Self::new(address, 4)
    }

    pub const fn vec3(address: u64) -> Self {
        Self::new(address, VEC3_SIZE)
    }

    /// One past the last byte of this field.
    pub fn end(&self) -> u64 {
        self.address.saturating_add(self.width as u64)
    }
}

impl std::fmt::Display for MemoryAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x} ({} bytes)", self.address, self.width)
    }
}

/// Addresses of every field read in one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLayout {
    /// Free-form label of the game build the addresses belong to.
    pub build: String,
    pub state: MemoryAddress,
    pub avatar_position: MemoryAddress,
    pub avatar_heading: MemoryAddress,
    pub camera_position: MemoryAddress,
    pub camera_front: MemoryAddress,
    pub camera_top: MemoryAddress,
    pub player_name: MemoryAddress,
    pub map_id: MemoryAddress,
}

/// Build label of the built-in layout.
pub const WOW_3_3_5A_BUILD: &str = "3.3.5a.12340";

impl MemoryLayout {
    /// World of Warcraft 3.3.5a (build 12340, x86).
    ///
    /// The camera position points at the avatar position: using the player
    /// position for the listener sounds more natural in this game.
    pub fn wow_3_3_5a() -> Self {
        Self {
            build: WOW_3_3_5A_BUILD.to_string(),
            state: MemoryAddress::u8(0x00BD_0792),
            avatar_position: MemoryAddress::vec3(0x00AD_F4E4),
            avatar_heading: MemoryAddress::f32(0x00BE_BA70),
            camera_position: MemoryAddress::vec3(0x00AD_F4E4),
            camera_front: MemoryAddress::vec3(0x00AD_F5F0),
            camera_top: MemoryAddress::vec3(0x00AD_F554),
            player_name: MemoryAddress::new(0x00C7_9D18, PLAYER_NAME_SIZE),
            map_id: MemoryAddress::i32(0x00AB_63BC),
        }
    }

    /// Fields in read order, with their names.
    pub fn fields(&self) -> [(&'static str, MemoryAddress); 8] {
        [
            ("state", self.state),
            ("avatarPosition", self.avatar_position),
            ("avatarHeading", self.avatar_heading),
            ("cameraPosition", self.camera_position),
            ("cameraFront", self.camera_front),
            ("cameraTop", self.camera_top),
            ("playerName", self.player_name),
            ("mapId", self.map_id),
        ]
    }

    /// Every field has a non-null address and a usable width.
    pub fn is_valid(&self) -> bool {
        self.fields().iter().all(|(_, field)| field.address != 0)
            && self.state.width == 1
            && self.avatar_heading.width == 4
            && self.map_id.width == 4
            && [
                self.avatar_position,
                self.camera_position,
                self.camera_front,
                self.camera_top,
            ]
            .iter()
            .all(|field| field.width == VEC3_SIZE)
            && self.player_name.width > 0
    }
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self::wow_3_3_5a()
    }
}
