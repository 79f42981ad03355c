use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::position::OutputFrame;
use crate::process::{ProcessInfo, ProcessProvider};
use crate::sample::SampleFetcher;

/// An attached, validated process.
#[derive(Debug)]
pub struct Session<T> {
    process: T,
    attached_at: DateTime<Local>,
}

impl<T: ProcessInfo> Session<T> {
    pub fn process(&self) -> &T {
        &self.process
    }

    pub fn attached_at(&self) -> DateTime<Local> {
        self.attached_at
    }
}

/// Owns the attachment to the game process.
///
/// A session only exists after the process was found *and* a diagnostic
/// fetch through the layout succeeded. Later fetch failures are reported to
/// the caller but never tear the session down.
pub struct SessionManager<P: ProcessProvider> {
    provider: P,
    fetcher: SampleFetcher,
    session: Option<Session<P::Process>>,
}

impl<P: ProcessProvider> SessionManager<P> {
    pub fn new(provider: P, fetcher: SampleFetcher) -> Self {
        Self {
            provider,
            fetcher,
            session: None,
        }
    }

    /// Attach to the first process with this executable name.
    pub fn try_attach(&mut self, process_name: &str) -> bool {
        self.release();
        match self.provider.find_process(process_name) {
            Ok(process) => self.validate(process),
            Err(e) => {
                debug!("Attach to {} failed: {}", process_name, e);
                false
            }
        }
    }

    /// Attach to a specific process ID.
    pub fn try_attach_pid(&mut self, pid: u32) -> bool {
        self.release();
        match self.provider.open_process(pid) {
            Ok(process) => self.validate(process),
            Err(e) => {
                debug!("Attach to PID {} failed: {}", pid, e);
                false
            }
        }
    }

    /// Keep the process only if the layout yields a readable sample.
    fn validate(&mut self, process: P::Process) -> bool {
        let pid = process.pid();
        self.session = Some(Session {
            process,
            attached_at: Local::now(),
        });

        match self.fetch() {
            Ok(_) => {
                info!(
                    "Attached to PID {} (layout {})",
                    pid,
                    self.fetcher.layout().build
                );
                true
            }
            Err(e) => {
                warn!("Diagnostic fetch failed for PID {}, detaching: {}", pid, e);
                self.release();
                false
            }
        }
    }

    /// Drop the session, if any. Safe to call at any time.
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Released PID {}", session.process.pid());
        }
    }

    pub fn fetch(&self) -> Result<OutputFrame> {
        let session = self.session.as_ref().ok_or(Error::NotAttached)?;
        self.fetcher.fetch(&session.process)
    }

    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session<P::Process>> {
        self.session.as_ref()
    }

    pub fn pid(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.process.pid())
    }

    pub fn attached_at(&self) -> Option<DateTime<Local>> {
        self.session.as_ref().map(|s| s.attached_at)
    }

    /// False when unattached or when the attached process has exited.
    pub fn is_process_alive(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.process.is_alive())
    }

    pub fn fetcher(&self) -> &SampleFetcher {
        &self.fetcher
    }
}
