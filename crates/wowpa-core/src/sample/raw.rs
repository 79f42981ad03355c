use serde::Serialize;
use strum::{FromRepr, IntoStaticStr};
use tracing::debug;

use crate::error::Result;
use crate::position::Vec3;
use crate::process::{MemoryLayout, ReadMemory};

/// Decoded value of the state byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum PlayerState {
    #[strum(serialize = "NOT IN GAME")]
    NotInGame = 0,
    #[strum(serialize = "IN GAME")]
    InGame = 1,
}

impl PlayerState {
    /// Only the in-game sentinel (1) counts as in game; menus, loading
    /// screens and any unexpected value do not.
    pub fn from_flag(flag: u8) -> Self {
        match Self::from_repr(flag) {
            Some(Self::InGame) => Self::InGame,
            _ => Self::NotInGame,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every value read in one fetch, still in the game's coordinate basis.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub state: u8,
    pub avatar_position: Vec3,
    pub avatar_heading: f32,
    pub camera_position: Vec3,
    pub camera_front: Vec3,
    pub camera_top: Vec3,
    pub player_name: Vec<u8>,
    pub map_id: i32,
}

impl RawSample {
    /// Read all fields in layout order.
    ///
    /// The first failing read aborts the batch, so a sample is never built
    /// from a mix of fresh and missing memory.
    pub fn read<R: ReadMemory>(reader: &R, layout: &MemoryLayout) -> Result<Self> {
        let sample = Self {
            state: reader.read_u8(layout.state.address)?,
            avatar_position: reader.read_vec3(layout.avatar_position.address)?,
            avatar_heading: reader.read_f32(layout.avatar_heading.address)?,
            camera_position: reader.read_vec3(layout.camera_position.address)?,
            camera_front: reader.read_vec3(layout.camera_front.address)?,
            camera_top: reader.read_vec3(layout.camera_top.address)?,
            player_name: reader.read_field(layout.player_name)?,
            map_id: reader.read_i32(layout.map_id.address)?,
        };

        debug!(
            "Raw sample: state={}, pos={}, heading={:.3}, map={}",
            sample.state, sample.avatar_position, sample.avatar_heading, sample.map_id
        );

        Ok(sample)
    }

    pub fn player_state(&self) -> PlayerState {
        PlayerState::from_flag(self.state)
    }
}
