//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::position::{OutputFrame, Vec3};
use crate::routing::parse_identity;

/// Format a frame as a boxed multi-line block.
///
/// The title names the game process and, when known, its `pid`. Empty frames get a single
/// dimmed "not in game" line instead of six zero vectors.
pub fn format_frame_console(frame: &OutputFrame, process_name: &str, pid: Option<u32>) -> String {
    let mut output = String::new();
    let border = "━".repeat(50);
    let border_dim = border.dimmed();

    let title = match pid {
        Some(pid) => format!("  {} (PID {})", process_name.bold(), pid),
        None => format!("  {}", process_name.bold()),
    };

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "{}", title);
    let _ = writeln!(output, "{}", border_dim);

    if frame.is_empty() {
        let _ = writeln!(output, "  {}", "NOT IN GAME".dimmed());
        let _ = write!(output, "{}", border_dim);
        return output;
    }

    let _ = writeln!(output, "  PLAYER : {}", player_label(&frame.identity));
    let _ = writeln!(output, "  CONTEXT: {}", context_label(&frame.context));
    let _ = writeln!(output, "  AVATAR : {}", format_vector(&frame.avatar.position));
    let _ = writeln!(output, "    front: {}", format_vector(&frame.avatar.front));
    let _ = writeln!(output, "    top  : {}", format_vector(&frame.avatar.top));
    let _ = writeln!(output, "  CAMERA : {}", format_vector(&frame.camera.position));
    let _ = writeln!(output, "    front: {}", format_vector(&frame.camera.front));
    let _ = writeln!(output, "    top  : {}", format_vector(&frame.camera.top));
    let _ = write!(output, "{}", border_dim);

    output
}

/// Single-line summary for logging.
pub fn format_frame_summary(frame: &OutputFrame) -> String {
    if frame.is_empty() {
        return "not in game".to_string();
    }
    format!(
        "{} at {} facing {}{}",
        player_name(&frame.identity).as_deref().unwrap_or("<unknown>"),
        frame.avatar.position,
        frame.avatar.front,
        frame.context
    )
}

fn format_vector(v: &Vec3) -> String {
    format!(
        "{} {} {}",
        format!("{:>9.2}", v.x).red(),
        format!("{:>9.2}", v.y).green(),
        format!("{:>9.2}", v.z).blue()
    )
}

fn player_label(identity: &str) -> String {
    match player_name(identity) {
        Some(name) => name.cyan().bold().to_string(),
        None => "-".dimmed().to_string(),
    }
}

fn context_label(context: &str) -> String {
    if context.is_empty() {
        "-".dimmed().to_string()
    } else {
        context.trim().to_string()
    }
}

/// Player name from an identity payload; `None` for `null` or bad JSON.
fn player_name(identity: &str) -> Option<String> {
    parse_identity(identity).ok()?.0
}
