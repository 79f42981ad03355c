//! Positional data types and the source-to-host coordinate transform.

mod frame;
pub mod transform;
mod vector;

pub use frame::{OutputFrame, Pose};
pub use transform::{AVATAR_TOP, heading_to_front, to_host_axes};
pub use vector::Vec3;
