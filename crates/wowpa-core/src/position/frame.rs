use serde::{Deserialize, Serialize};

use crate::position::Vec3;

/// Position and orientation of a listener or speaker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub front: Vec3,
    pub top: Vec3,
}

impl Pose {
    pub fn is_zero(&self) -> bool {
        self.position.is_zero() && self.front.is_zero() && self.top.is_zero()
    }
}

/// One published sample: six vectors plus the context and identity payloads.
///
/// The default value is the "no data" frame: every vector zero and both
/// strings empty. The host ignores positional data for such frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputFrame {
    pub avatar: Pose,
    pub camera: Pose,
    pub context: String,
    pub identity: String,
}

impl OutputFrame {
    /// True for the zeroed "ignore this tick" frame.
    pub fn is_empty(&self) -> bool {
        self.avatar.is_zero()
            && self.camera.is_zero()
            && self.context.is_empty()
            && self.identity.is_empty()
    }

    /// All six vectors in host order: avatar position, front, top, then
    /// camera position, front, top.
    pub fn vectors(&self) -> [Vec3; 6] {
        [
            self.avatar.position,
            self.avatar.front,
            self.avatar.top,
            self.camera.position,
            self.camera.front,
            self.camera.top,
        ]
    }
}
