//! Status command implementation.

use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::debug;
use wowpa_core::config::retry::RETRY_DELAYS_MS;
use wowpa_core::{
    MemoryLayout, OutputFrame, PluginDescriptor, PositionalPlugin, ProcessInfo, ProcessProvider,
    SystemProcessProvider, format_frame_console, format_frame_json,
};

/// Run the status command
pub fn run(layout: MemoryLayout, pid: Option<u32>, json: bool) -> Result<()> {
    let mut plugin =
        PositionalPlugin::new(PluginDescriptor::wow_3_3_5a(), layout, SystemProcessProvider);

    match pid {
        Some(pid) => println!("Opening process with PID {}...", pid),
        None => println!("Searching for {}...", plugin.descriptor().process_name),
    }
    if !attach_with_retry(&mut plugin, pid, &RETRY_DELAYS_MS) {
        bail!(
            "Could not attach to {} (is the game running with a supported build?)",
            plugin.descriptor().process_name
        );
    }

    if let Some(session) = plugin.session().session() {
        let process = session.process();
        println!(
            "Attached (PID: {}, Base: 0x{:X}, Size: 0x{:X}, since {})",
            process.pid(),
            process.base_address(),
            process.module_size(),
            session.attached_at().format("%H:%M:%S")
        );
    }

    let (frame, ok) = plugin.fetch();
    let pid = plugin.session().pid();
    plugin.release();
    if !ok {
        bail!("Failed to read a frame");
    }

    println!(
        "{}",
        render(&frame, &plugin.descriptor().process_name, pid, json)?
    );
    Ok(())
}

/// Try to attach once per delay, sleeping that delay after each failure.
pub fn attach_with_retry<P: ProcessProvider>(
    plugin: &mut PositionalPlugin<P>,
    pid: Option<u32>,
    delays_ms: &[u64],
) -> bool {
    for (attempt, delay) in delays_ms.iter().enumerate() {
        let attached = match pid {
            Some(pid) => plugin.try_attach_pid(pid),
            None => plugin.try_attach(),
        };
        if attached {
            return true;
        }
        debug!("Attach attempt {} failed, retrying in {}ms", attempt + 1, delay);
        thread::sleep(Duration::from_millis(*delay));
    }
    false
}

pub fn render(
    frame: &OutputFrame,
    process_name: &str,
    pid: Option<u32>,
    json: bool,
) -> Result<String> {
    if json {
        Ok(format_frame_json(frame)?)
    } else {
        Ok(format_frame_console(frame, process_name, pid))
    }
}
