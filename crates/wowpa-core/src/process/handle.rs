#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use crate::error::{Error, Result};
use crate::process::provider::ProcessInfo;

#[cfg(target_os = "windows")]
use std::ffi::OsString;
#[cfg(target_os = "windows")]
use std::os::windows::ffi::OsStringExt;
#[cfg(target_os = "windows")]
use windows::Win32::Foundation::{CloseHandle, HANDLE, HMODULE};
#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW, TH32CS_SNAPPROCESS,
};
#[cfg(target_os = "windows")]
use windows::Win32::System::ProcessStatus::{
    EnumProcessModulesEx, GetModuleInformation, LIST_MODULES_ALL, MODULEINFO,
};
#[cfg(target_os = "windows")]
use windows::Win32::System::Threading::{
    GetExitCodeProcess, OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};

/// An opened game process. The OS handle is closed on drop.
pub struct ProcessHandle {
    #[cfg(target_os = "windows")]
    handle: HANDLE,
    pub pid: u32,
    pub base_address: u64,
    pub module_size: u32,
}

impl std::fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("base_address", &format_args!("{:#x}", self.base_address))
            .field("module_size", &self.module_size)
            .finish()
    }
}

#[cfg(target_os = "windows")]
impl ProcessHandle {
    /// Find a running process by executable name and open it for reading.
    pub fn find_and_open(name: &str) -> Result<Self> {
        let pid = find_process_id(name).inspect_err(|e| {
            tracing::debug!("Process detection failed: {}", e);
        })?;
        tracing::debug!("Found {} with PID {}", name, pid);
        Self::open(pid)
    }

    pub fn open(pid: u32) -> Result<Self> {
        // SAFETY: OpenProcess is called with valid access flags and a plain process ID.
        // The returned handle is owned by this struct and closed in Drop.
        let handle = unsafe {
            OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, pid).map_err(|e| {
                tracing::debug!("OpenProcess failed for PID {}: {}", pid, e);
                Error::ProcessOpenFailed(e.to_string())
            })?
        };

        // Build the struct first so the handle is closed if module lookup fails.
        let mut process = Self {
            handle,
            pid,
            base_address: 0,
            module_size: 0,
        };
        let (base_address, module_size) = main_module_info(handle)?;
        process.base_address = base_address;
        process.module_size = module_size;

        Ok(process)
    }

    pub fn handle(&self) -> HANDLE {
        self.handle
    }

    /// Check if the process is still running
    pub fn is_alive(&self) -> bool {
        const STILL_ACTIVE: u32 = 259;

        let mut exit_code: u32 = 0;
        // SAFETY: GetExitCodeProcess is called with a valid handle from OpenProcess
        // and a properly initialized out parameter.
        let queried = unsafe { GetExitCodeProcess(self.handle, &mut exit_code) };
        queried.is_ok() && exit_code == STILL_ACTIVE
    }
}

#[cfg(not(target_os = "windows"))]
impl ProcessHandle {
    pub fn find_and_open(_name: &str) -> Result<Self> {
        Err(Error::ProcessNotFound(
            "Windows only: process access not supported on this platform".to_string(),
        ))
    }

    pub fn open(_pid: u32) -> Result<Self> {
        Err(Error::ProcessNotFound(
            "Windows only: process access not supported on this platform".to_string(),
        ))
    }

    pub fn is_alive(&self) -> bool {
        false
    }
}

impl ProcessInfo for ProcessHandle {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn base_address(&self) -> u64 {
        self.base_address
    }

    fn module_size(&self) -> u32 {
        self.module_size
    }

    fn is_alive(&self) -> bool {
        ProcessHandle::is_alive(self)
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if self.handle.is_invalid() {
            return;
        }
        // SAFETY: the handle came from OpenProcess and is closed exactly once, here.
        if let Err(e) = unsafe { CloseHandle(self.handle) } {
            tracing::warn!("Failed to close process handle: {}", e);
        }
    }
}

#[cfg(target_os = "windows")]
fn find_process_id(name: &str) -> Result<u32> {
    // SAFETY: CreateToolhelp32Snapshot with TH32CS_SNAPPROCESS has no preconditions.
    // The snapshot handle is closed before returning.
    let snapshot = unsafe {
        CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
            .map_err(|e| Error::ProcessNotFound(e.to_string()))?
    };

    let mut entry = PROCESSENTRY32W {
        dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    let mut found = None;
    // SAFETY: the snapshot handle is valid and entry.dwSize is initialized.
    let mut more = unsafe { Process32FirstW(snapshot, &mut entry) }.is_ok();
    while more {
        let len = entry
            .szExeFile
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(entry.szExeFile.len());
        let exe_name = OsString::from_wide(&entry.szExeFile[..len]);

        if exe_name.to_string_lossy().eq_ignore_ascii_case(name) {
            found = Some(entry.th32ProcessID);
            break;
        }

        // SAFETY: same snapshot and entry as above.
        more = unsafe { Process32NextW(snapshot, &mut entry) }.is_ok();
    }

    // SAFETY: snapshot is a valid handle from CreateToolhelp32Snapshot.
    if let Err(e) = unsafe { CloseHandle(snapshot) } {
        tracing::debug!("Failed to close process snapshot: {}", e);
    }

    found.ok_or_else(|| Error::ProcessNotFound(format!("Process '{}' not found", name)))
}

/// Base address and image size of the process's main module.
#[cfg(target_os = "windows")]
fn main_module_info(handle: HANDLE) -> Result<(u64, u32)> {
    let mut modules = [HMODULE::default(); 1];
    let mut needed: u32 = 0;

    // SAFETY: the handle has PROCESS_QUERY_INFORMATION | PROCESS_VM_READ access and the
    // module array size is passed in bytes. Only the first (main) module is needed.
    unsafe {
        EnumProcessModulesEx(
            handle,
            modules.as_mut_ptr(),
            std::mem::size_of_val(&modules) as u32,
            &mut needed,
            LIST_MODULES_ALL,
        )
        .map_err(|e| Error::ProcessOpenFailed(format!("Failed to enumerate modules: {}", e)))?;
    }

    if needed == 0 {
        return Err(Error::ProcessOpenFailed(
            "No modules found in process".to_string(),
        ));
    }

    let mut info = MODULEINFO::default();
    // SAFETY: valid process handle, module handle from the enumeration above and a
    // correctly sized MODULEINFO.
    unsafe {
        GetModuleInformation(
            handle,
            modules[0],
            &mut info,
            std::mem::size_of::<MODULEINFO>() as u32,
        )
        .map_err(|e| Error::ProcessOpenFailed(format!("Failed to get module info: {}", e)))?;
    }

    Ok((info.lpBaseOfDll as u64, info.SizeOfImage))
}
