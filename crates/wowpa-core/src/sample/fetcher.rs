use tracing::debug;

use crate::error::Result;
use crate::metadata;
use crate::position::{OutputFrame, transform};
use crate::process::{MemoryLayout, ReadMemory};
use crate::sample::{PlayerState, RawSample};

/// Reads one sample per call and converts it into an [`OutputFrame`].
///
/// * A failed read fails the whole fetch; the caller gets the error and
///   should publish a zeroed frame.
/// * Outside the game world the result is `Ok(OutputFrame::default())`,
///   which the host must treat as "ignore this tick".
#[derive(Debug, Clone, Default)]
pub struct SampleFetcher {
    layout: MemoryLayout,
}

impl SampleFetcher {
    pub fn new(layout: MemoryLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub fn fetch<R: ReadMemory>(&self, reader: &R) -> Result<OutputFrame> {
        let raw = RawSample::read(reader, &self.layout)?;
        Ok(Self::build_frame(&raw))
    }

    /// Pure part of a fetch: state check, metadata and transform.
    pub fn build_frame(raw: &RawSample) -> OutputFrame {
        if raw.player_state() != PlayerState::InGame {
            debug!("Not in game (state flag {})", raw.state);
            return OutputFrame::default();
        }

        let metadata = metadata::serialize(raw.map_id, &raw.player_name);
        let (avatar, camera) = transform::transform(raw);

        OutputFrame {
            avatar,
            camera,
            context: metadata.context,
            identity: metadata.identity,
        }
    }
}
