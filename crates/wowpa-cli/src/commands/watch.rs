//! Main watch mode command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};
use wowpa_core::config::polling::{ATTACH_RETRY_INTERVAL, TICK_INTERVAL_MS};
use wowpa_core::{
    MemoryLayout, OutputFrame, PluginDescriptor, PositionalPlugin, ProcessProvider,
    SystemProcessProvider, format_frame_summary,
};

use crate::commands::status::render;
use crate::input;
use crate::shutdown::ShutdownSignal;

/// Run the watch mode: attach, poll every tick, reconnect when the game restarts.
pub fn run(layout: MemoryLayout, json: bool) -> Result<()> {
    let shutdown = Arc::new(ShutdownSignal::new());
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        shutdown_ctrlc.trigger();
    })?;
    let _keyboard = input::spawn_keyboard_monitor(Arc::clone(&shutdown));

    info!("wowpa {} (layout {})", env!("CARGO_PKG_VERSION"), layout.build);
    let mut plugin =
        PositionalPlugin::new(PluginDescriptor::wow_3_3_5a(), layout, SystemProcessProvider);

    println!(
        "Waiting for {}... (Press Esc or q to quit)",
        plugin.descriptor().process_name
    );
    while !shutdown.is_shutdown() {
        if !plugin.try_attach() {
            shutdown.wait(ATTACH_RETRY_INTERVAL);
            continue;
        }

        let pid = plugin.session().pid();
        let process_name = plugin.descriptor().process_name.clone();
        let frames = poll_frames(&mut plugin, &shutdown, |frame| {
            info!("{}", format_frame_summary(frame));
            match render(frame, &process_name, pid, json) {
                Ok(text) => println!("{}", text),
                Err(e) => error!("Failed to render frame: {}", e),
            }
        });
        plugin.release();

        if !shutdown.is_shutdown() {
            info!("Process gone after {} frames, waiting for reconnect...", frames);
        }
    }

    Ok(())
}

/// Fetch once per tick while the process lives and shutdown is not
/// requested. `emit` sees each successful frame that differs from the
/// previous one. Returns the number of emitted frames.
pub fn poll_frames<P, F>(
    plugin: &mut PositionalPlugin<P>,
    shutdown: &ShutdownSignal,
    mut emit: F,
) -> usize
where
    P: ProcessProvider,
    F: FnMut(&OutputFrame),
{
    let tick = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last: Option<OutputFrame> = None;
    let mut emitted = 0;

    while plugin.session().is_process_alive() {
        let (frame, ok) = plugin.fetch();
        if ok && last.as_ref() != Some(&frame) {
            emit(&frame);
            emitted += 1;
            last = Some(frame);
        }
        if shutdown.wait(tick) {
            break;
        }
    }

    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use wowpa_core::MemoryAddress;
    use wowpa_core::process::{MockMemoryBuilder, MockProcess, MockProcessProvider};

    fn attached_plugin(alive: bool) -> PositionalPlugin<MockProcessProvider> {
        let layout = MemoryLayout {
            build: "test".to_string(),
            state: MemoryAddress::u8(0x1000),
            avatar_position: MemoryAddress::vec3(0x1004),
            avatar_heading: MemoryAddress::f32(0x1010),
            camera_position: MemoryAddress::vec3(0x1004),
            camera_front: MemoryAddress::vec3(0x1014),
            camera_top: MemoryAddress::vec3(0x1020),
            player_name: MemoryAddress::new(0x102C, 12),
            map_id: MemoryAddress::i32(0x1038),
        };
        let memory = MockMemoryBuilder::new()
            .write_u8(0x00, 1)
            .write_vec3(0x04, [10.0, 20.0, 30.0])
            .write_utf8(0x2C, "Tyrande")
            .write_i32(0x38, 1)
            .build();
        let mut process = MockProcess::new(5, memory);
        process.alive = alive;

        let mut plugin = PositionalPlugin::new(
            PluginDescriptor::wow_3_3_5a(),
            layout,
            MockProcessProvider::new("Wow.exe", process),
        );
        assert!(plugin.try_attach());
        plugin
    }

    #[test]
    fn test_unchanged_frames_are_emitted_once() {
        let mut plugin = attached_plugin(true);
        let shutdown = ShutdownSignal::new();
        let mut ticks = 0;

        // Static memory: only the first frame is new. Stop after a few ticks.
        let emitted = poll_frames(&mut plugin, &shutdown, |frame| {
            assert!(frame.identity.contains("Tyrande"));
            ticks += 1;
            shutdown.trigger();
        });

        assert_eq!(emitted, 1);
        assert_eq!(ticks, 1);
    }

    #[test]
    fn test_dead_process_stops_polling() {
        let mut plugin = attached_plugin(false);
        let shutdown = ShutdownSignal::new();

        let emitted = poll_frames(&mut plugin, &shutdown, |_| {});
        assert_eq!(emitted, 0);
        assert!(!shutdown.is_shutdown());
    }
}
