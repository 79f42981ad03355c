//! Host-facing plugin surface.
//!
//! Everything here reports success as plain booleans: a positional-audio
//! host polls once per tick and only needs to know whether to use the
//! frame.

use tracing::debug;

use crate::config::PluginDescriptor;
use crate::position::OutputFrame;
use crate::process::{MemoryLayout, ProcessProvider, SystemProcessProvider};
use crate::sample::SampleFetcher;
use crate::session::SessionManager;

pub struct PositionalPlugin<P: ProcessProvider = SystemProcessProvider> {
    descriptor: PluginDescriptor,
    session: SessionManager<P>,
}

impl PositionalPlugin<SystemProcessProvider> {
    /// The built-in World of Warcraft 3.3.5a plugin reading real processes.
    pub fn wow_3_3_5a() -> Self {
        Self::new(
            PluginDescriptor::wow_3_3_5a(),
            MemoryLayout::wow_3_3_5a(),
            SystemProcessProvider,
        )
    }
}

impl<P: ProcessProvider> PositionalPlugin<P> {
    pub fn new(descriptor: PluginDescriptor, layout: MemoryLayout, provider: P) -> Self {
        Self {
            descriptor,
            session: SessionManager::new(provider, SampleFetcher::new(layout)),
        }
    }

    pub fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    /// Attach to the descriptor's process.
    pub fn try_attach(&mut self) -> bool {
        self.session.try_attach(&self.descriptor.process_name)
    }

    pub fn try_attach_pid(&mut self, pid: u32) -> bool {
        self.session.try_attach_pid(pid)
    }

    pub fn release(&mut self) {
        self.session.release();
    }

    /// Fetch one frame. On failure the frame is zeroed and the flag false;
    /// the session stays attached.
    pub fn fetch(&mut self) -> (OutputFrame, bool) {
        match self.session.fetch() {
            Ok(frame) => (frame, true),
            Err(e) => {
                debug!("Fetch failed: {}", e);
                (OutputFrame::default(), false)
            }
        }
    }

    pub fn session(&self) -> &SessionManager<P> {
        &self.session
    }

    pub fn is_attached(&self) -> bool {
        self.session.is_attached()
    }
}
