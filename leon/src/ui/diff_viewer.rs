// leon/src/ui/diff_viewer.rs
//! Line diff between the original and the cleaned text.

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use std::io::Write;

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Writes a `-`/`+` line diff of `original` against `cleaned`.
///
/// Removed lines use the `diff_removed` color, added lines `diff_added`.
/// Identical inputs produce a single "no changes" line.
pub fn print_diff<W: Write>(
    original: &str,
    cleaned: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    writeln!(writer, "{}", styled("--- Diff View ---", ThemeEntry::DiffHeader, theme_map, enable_colors))?;

    let patch = create_patch(original, cleaned);
    let mut changes = 0usize;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    changes += 1;
                    let text = format!("- {}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffRemoved, theme_map, enable_colors))?;
                }
                DiffLine::Insert(s) => {
                    changes += 1;
                    let text = format!("+ {}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffAdded, theme_map, enable_colors))?;
                }
                DiffLine::Context(s) => {
                    writeln!(writer, "  {}", s.trim_end_matches('\n'))?;
                }
            }
        }
    }

    if changes == 0 {
        writeln!(writer, "No changes detected.")?;
    }
    writeln!(writer, "{}", styled("-----------------", ThemeEntry::DiffHeader, theme_map, enable_colors))?;
    Ok(())
}
