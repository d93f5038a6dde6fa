//! Themed message helpers shared by the commands.
//!
//! Everything here writes to the given writer; color is applied only when the
//! caller says the stream supports it.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Wraps `text` in the ANSI color configured for `entry`.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    writeln!(writer, "{}", styled(&format!("{}{}", prefix, message), entry, theme, enable_colors))?;
    Ok(())
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "", message, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "", message, ThemeEntry::Success, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "Warning: ", message, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> Result<()> {
    print_message(writer, "Error: ", message, ThemeEntry::Error, theme, enable_colors)
}
