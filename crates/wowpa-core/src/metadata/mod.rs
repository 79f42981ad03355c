//! Context and identity payloads published alongside positional data.

mod escape;
mod serializer;

pub use escape::{escape, terminated};
pub use serializer::{Metadata, build_context, build_identity, player_name, serialize};
