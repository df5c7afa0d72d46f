//! Rendering of command results to standard output.

use anyhow::Result;
use serde::Serialize;

/// Prints a value as indented JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
