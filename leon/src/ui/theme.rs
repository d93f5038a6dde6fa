//! Terminal theme for `leon` output.
//!
//! Users can recolor the logical parts of the output with a YAML file mapping
//! entries to 16-color ANSI names, e.g.
//!
//! ```yaml
//! url_cleaned: brightgreen
//! diff_added: cyan
//! ```
//!
//! Entries not present in the file keep their default color.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// A URL as it appeared in the input.
    UrlOriginal,
    /// A URL after cleaning.
    UrlCleaned,
    DiffAdded,
    DiffRemoved,
    DiffHeader,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 10] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::UrlOriginal,
        ThemeEntry::UrlCleaned,
        ThemeEntry::DiffAdded,
        ThemeEntry::DiffRemoved,
        ThemeEntry::DiffHeader,
    ];

    fn default_color(self) -> &'static str {
        match self {
            ThemeEntry::Header | ThemeEntry::DiffHeader => "brightwhite",
            ThemeEntry::Success | ThemeEntry::DiffAdded | ThemeEntry::UrlCleaned => "green",
            ThemeEntry::Info => "white",
            ThemeEntry::Warn => "yellow",
            ThemeEntry::Error | ThemeEntry::DiffRemoved => "red",
            ThemeEntry::UrlOriginal => "brightblack",
        }
    }
}

/// A named ANSI color (e.g. "red", "brightgreen").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor(String);

#[derive(Debug, Clone)]
pub struct ParseThemeColorError(String);

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color '{}'; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, or their bright variants (e.g. brightred).",
            self.0
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let base = lower.strip_prefix("bright").unwrap_or(&lower);
        match base {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" => Ok(ThemeColor(lower)),
            _ => Err(ParseThemeColorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ParseThemeColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.0
    }
}

impl ThemeColor {
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self.0.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "white" => AnsiColors::White,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            _ => AnsiColors::BrightWhite,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

/// Loads a theme from `theme_path`, or the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}

impl ThemeStyle {
    /// Reads a theme file and fills missing entries from the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: HashMap<ThemeEntry, ThemeColor> = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        let mut theme = Self::default_theme_map();
        for (entry, color) in custom {
            theme.insert(entry, ThemeStyle { fg: Some(color) });
        }
        Ok(theme)
    }

    pub fn default_theme_map() -> ThemeMap {
        ThemeEntry::ALL
            .iter()
            .map(|&entry| {
                let color = ThemeColor(entry.default_color().to_string());
                (entry, ThemeStyle { fg: Some(color) })
            })
            .collect()
    }
}
