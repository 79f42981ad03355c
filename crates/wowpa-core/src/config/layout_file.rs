//! Text format for memory layout overrides.
//!
//! ```text
//! 3.3.5a.12340
//! state = 0xBD0792
//! avatarPosition = 0xADF4E4
//! playerName = 0xC79D18
//! playerNameLength = 50
//! ```
//!
//! The first line is the build label. Keys are case-insensitive; keys that
//! are absent keep the built-in address.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};
use crate::process::MemoryLayout;

pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<MemoryLayout> {
    let content = fs::read_to_string(&path)?;
    parse_layout(&content)
}

pub fn save_layout<P: AsRef<Path>>(path: P, layout: &MemoryLayout) -> Result<()> {
    fs::write(path, format_layout(layout))?;
    Ok(())
}

pub fn parse_layout(content: &str) -> Result<MemoryLayout> {
    let mut layout = MemoryLayout::default();
    let mut lines = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'));

    match lines.next() {
        Some(build) if !build.contains('=') => layout.build = build.to_string(),
        _ => {
            return Err(Error::InvalidLayout(
                "First line must be the build label".to_string(),
            ));
        }
    }

    for line in lines {
        let Some((key, value)) = line.split_once('=') else {
            warn!("Ignoring layout line without '=': '{}'", line);
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        let field = match key.as_str() {
            "state" => &mut layout.state,
            "avatarposition" => &mut layout.avatar_position,
            "avatarheading" => &mut layout.avatar_heading,
            "cameraposition" => &mut layout.camera_position,
            "camerafront" => &mut layout.camera_front,
            "cameratop" => &mut layout.camera_top,
            "playername" => &mut layout.player_name,
            "mapid" => &mut layout.map_id,
            "playernamelength" => {
                layout.player_name.width = value.parse().map_err(|e| {
                    Error::InvalidLayout(format!("Invalid playerNameLength '{}': {}", value, e))
                })?;
                continue;
            }
            _ => {
                warn!("Unknown layout key: '{}' (value: {})", key, value);
                continue;
            }
        };
        field.address = parse_hex_value(value)?;
    }

    if !layout.is_valid() {
        return Err(Error::InvalidLayout(format!(
            "Layout '{}' has a null address or bad field width",
            layout.build
        )));
    }

    Ok(layout)
}

fn parse_hex_value(value: &str) -> Result<u64> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    u64::from_str_radix(digits, 16)
        .map_err(|e| Error::InvalidLayout(format!("Failed to parse '{}': {}", value, e)))
}

pub fn format_layout(layout: &MemoryLayout) -> String {
    let mut lines = vec![layout.build.clone()];
    lines.extend(
        layout
            .fields()
            .iter()
            .map(|(name, field)| format!("{} = {:#x}", name, field.address)),
    );
    lines.push(format!("playerNameLength = {}", layout.player_name.width));
    lines.join("\n")
}
