//! Layout command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use wowpa_core::{MemoryLayout, format_layout, save_layout};

/// Print the layout, or write it to `output` as a starting point for an override file.
pub fn run(layout: &MemoryLayout, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            save_layout(path, layout)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Layout {} written to {}", layout.build, path.display());
        }
        None => println!("{}", format_layout(layout)),
    }
    Ok(())
}
