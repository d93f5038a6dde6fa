//! The `clean` command: read text, clean its URLs, write the result.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use leon_core::{CleaningResult, RegistryError, SanitizerRegistry};

use crate::cli::CleanCommand;
use crate::commands::{info_msg, warn_msg};
use crate::ui::diff_viewer;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;
use crate::utils::clipboard::copy_to_clipboard;

/// How the cleaned result is written to the primary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
    UrlsOnly,
    Diff,
}

/// Options for a single clean run, independent of where the input came from.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub decode: bool,
    pub mode: OutputMode,
    pub output_path: Option<PathBuf>,
    pub clipboard: bool,
    pub disable: Vec<String>,
    pub summary: bool,
}

impl CleanOptions {
    pub fn from_command(cmd: &CleanCommand, quiet: bool) -> Self {
        let mode = if cmd.json {
            OutputMode::Json
        } else if cmd.urls_only {
            OutputMode::UrlsOnly
        } else if cmd.diff {
            OutputMode::Diff
        } else {
            OutputMode::Text
        };
        Self {
            decode: cmd.decode,
            mode,
            output_path: cmd.output.clone(),
            clipboard: cmd.clipboard,
            disable: cmd.disable.clone(),
            summary: !cmd.no_summary && !quiet,
        }
    }
}

/// Input text from the positional argument, `--input-file`, or stdin.
pub fn read_input(cmd: &CleanCommand) -> Result<String> {
    if let Some(text) = &cmd.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cmd.input_file {
        info!("Reading input from file: {}", path.display());
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input from {}", path.display()));
    }
    debug!("Reading input from stdin.");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Turns off the named user rules for this run only.
///
/// Unknown names and built-in rules are reported and skipped.
pub fn apply_disable_list(registry: &mut SanitizerRegistry, names: &[String], theme_map: &ThemeMap) {
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        match registry.set_enabled(name, false) {
            Ok(()) => debug!("Rule '{}' disabled for this run.", name),
            Err(RegistryError::UnknownSanitizer(_)) => {
                warn_msg(format!("No rule named '{}'; nothing to disable.", name), theme_map)
            }
            Err(e) => warn_msg(e.to_string(), theme_map),
        }
    }
}

/// Cleans `input` with `registry` and emits every requested output.
pub fn run_clean(
    input: &str,
    mut registry: SanitizerRegistry,
    opts: &CleanOptions,
    theme_map: &ThemeMap,
) -> Result<CleaningResult> {
    info!("Starting clean operation.");
    apply_disable_list(&mut registry, &opts.disable, theme_map);

    let result = registry.clean(input, opts.decode);
    debug!(
        "Found {} URL(s); {} changed.",
        result.matches.len(),
        result.matches.iter().filter(|m| m.changed()).count()
    );

    handle_primary_output(&result, opts, theme_map)?;

    if opts.clipboard {
        match copy_to_clipboard(&result.cleaned_text) {
            Ok(()) => info_msg("Cleaned text copied to clipboard.", theme_map),
            Err(e) => warn_msg(format!("Failed to copy to clipboard: {}", e), theme_map),
        }
    }

    if opts.summary && opts.mode == OutputMode::Text {
        let stderr_supports_color = io::stderr().is_terminal();
        summary::print_summary(&result, &mut io::stderr(), theme_map, stderr_supports_color)?;
    }

    info!("Clean operation completed.");
    Ok(result)
}

fn handle_primary_output(result: &CleaningResult, opts: &CleanOptions, theme_map: &ThemeMap) -> Result<()> {
    match &opts.output_path {
        Some(path) => {
            info_msg(format!("Writing cleaned content to file: {}", path.display()), theme_map);
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_result(result, opts.mode, &mut file, theme_map, false)
        }
        None => {
            let stdout = io::stdout();
            let supports_color = stdout.is_terminal();
            let mut writer = stdout.lock();
            write_result(result, opts.mode, &mut writer, theme_map, supports_color)
        }
    }
}

/// Writes `result` to `writer` in the given mode.
pub fn write_result<W: Write>(
    result: &CleaningResult,
    mode: OutputMode,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    match mode {
        OutputMode::Text => {
            write!(writer, "{}", result.cleaned_text)?;
            if !result.cleaned_text.ends_with('\n') {
                writeln!(writer)?;
            }
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
            writeln!(writer, "{}", json)?;
        }
        OutputMode::UrlsOnly => {
            for url in &result.urls {
                writeln!(writer, "{}", url)?;
            }
        }
        OutputMode::Diff => {
            diff_viewer::print_diff(&result.original_text, &result.cleaned_text, writer, theme_map, enable_colors)?;
        }
    }
    writer.flush()?;
    Ok(())
}
