//! The per-URL summary printed after a clean.

use anyhow::Result;
use std::io::Write;

use leon_core::CleaningResult;

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Lists each changed URL as `original -> cleaned`, followed by a count line.
pub fn print_summary<W: Write>(
    result: &CleaningResult,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let changed: Vec<_> = result.matches.iter().filter(|m| m.changed()).collect();

    writeln!(writer, "{}", styled("\nCleaning Summary:", ThemeEntry::Header, theme_map, enable_colors))?;
    for m in &changed {
        writeln!(
            writer,
            "  {}\n    -> {}",
            styled(&m.original, ThemeEntry::UrlOriginal, theme_map, enable_colors),
            styled(&m.cleaned, ThemeEntry::UrlCleaned, theme_map, enable_colors),
        )?;
    }

    let line = format!("{} of {} URL(s) cleaned.", changed.len(), result.matches.len());
    let entry = if changed.is_empty() { ThemeEntry::Info } else { ThemeEntry::Success };
    writeln!(writer, "  {}", styled(&line, entry, theme_map, enable_colors))?;
    Ok(())
}
