//! Process provider abstraction for testability.
//!
//! This module provides traits that abstract process discovery and access,
//! enabling mock implementations for testing without a running game process.

use crate::error::Result;
use crate::process::{ProcessHandle, ReadMemory};

/// Trait for accessing process information.
///
/// This trait abstracts the properties of a process handle, allowing
/// mock implementations for testing.
pub trait ProcessInfo {
    /// Get the process ID.
    fn pid(&self) -> u32;

    /// Get the base address of the main module.
    fn base_address(&self) -> u64;

    /// Get the size of the main module.
    fn module_size(&self) -> u32;

    /// Check if the process is still running.
    fn is_alive(&self) -> bool;
}

/// Trait for finding and opening processes.
///
/// This trait abstracts process discovery, allowing mock implementations
/// that don't require actual system processes.
pub trait ProcessProvider {
    /// An opened process whose memory can be read.
    type Process: ProcessInfo + ReadMemory;

    /// Find and open a process by executable name (case-insensitive).
    fn find_process(&self, name: &str) -> Result<Self::Process>;

    /// Open a process by its PID.
    fn open_process(&self, pid: u32) -> Result<Self::Process>;
}

/// Provider backed by the operating system's process list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessProvider;

impl ProcessProvider for SystemProcessProvider {
    type Process = ProcessHandle;

    fn find_process(&self, name: &str) -> Result<Self::Process> {
        ProcessHandle::find_and_open(name)
    }

    fn open_process(&self, pid: u32) -> Result<Self::Process> {
        ProcessHandle::open(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_system_provider_unsupported_platform() {
        use crate::error::Error;

        let provider = SystemProcessProvider;
        assert!(matches!(
            provider.find_process("Wow.exe"),
            Err(Error::ProcessNotFound(_))
        ));
        assert!(provider.open_process(1).is_err());
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_system_provider_missing_process() {
        let provider = SystemProcessProvider;
        assert!(
            provider
                .find_process("definitely-not-running-wowpa.exe")
                .is_err()
        );
    }
}
