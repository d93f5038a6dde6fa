//! Persistence of user-defined sanitizer rules for the `leon` CLI.
//!
//! The engine never touches the disk; this store is the storage collaborator
//! that loads the user's rule set before a run and writes it back after a
//! `rules` subcommand changes it.

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use leon_core::{RuleSet, SanitizerRegistry};

const RULES_DIR_NAME: &str = "leon";
const RULES_FILE_NAME: &str = "rules.yaml";
const RULES_FILE_TMP_SUFFIX: &str = ".tmp";
const RULES_FILE_LOCK_SUFFIX: &str = ".lock";

/// Exclusive hold on a rule file, taken around a load, edit, save cycle.
/// Released on drop.
#[derive(Debug)]
pub struct RuleStoreLock {
    file: File,
}

impl Drop for RuleStoreLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

/// Location of the user's rule file.
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `explicit` when given (flag or `LEON_RULES_FILE`), else the
    /// platform config directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        let base = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine a config directory; pass --rules FILE"))?;
        Ok(Self::new(base.join(RULES_DIR_NAME).join(RULES_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(RULES_FILE_LOCK_SUFFIX);
        PathBuf::from(name)
    }

    /// Blocks until no other writer holds the rule file.
    ///
    /// The lock lives on a sidecar file so it survives the rename in
    /// [`RuleStore::save`].
    pub fn lock(&self) -> Result<RuleStoreLock> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;
        fs2::FileExt::lock_exclusive(&file)
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
        debug!("Acquired rules lock {}.", lock_path.display());
        Ok(RuleStoreLock { file })
    }

    /// Reads and validates the stored rules. A missing or empty file is an
    /// empty rule set.
    pub fn load(&self) -> Result<RuleSet> {
        if !self.path.exists() {
            debug!("No rules file at {}, starting empty.", self.path.display());
            return Ok(RuleSet::default());
        }

        let mut f = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open rules file {}", self.path.display()))?;
        fs2::FileExt::lock_shared(&f)?;
        let mut text = String::new();
        let read = f.read_to_string(&mut text);
        fs2::FileExt::unlock(&f)?;
        read.with_context(|| format!("Failed to read rules file {}", self.path.display()))?;

        let rules = RuleSet::parse_for(&text, &self.path)
            .with_context(|| format!("Invalid rules file {}", self.path.display()))?;
        debug!("Loaded {} user rules from {}.", rules.rules.len(), self.path.display());
        Ok(rules)
    }

    /// Built-ins plus the stored user rules.
    pub fn load_registry(&self) -> Result<SanitizerRegistry> {
        SanitizerRegistry::with_user_rules(&self.load()?)
    }

    /// Writes `rules` through a locked temp file that replaces the old file.
    pub fn save(&self, rules: &RuleSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let text = rules.to_string_for(&self.path)?;

        let tmp_path = self.path.with_extension(format!(
            "{}{}",
            self.path.extension().map(|s| s.to_string_lossy()).unwrap_or_default(),
            RULES_FILE_TMP_SUFFIX
        ));
        {
            let mut tmp = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
            fs2::FileExt::lock_exclusive(&tmp)?;
            tmp.write_all(text.as_bytes())?;
            tmp.flush()?;
            fs2::FileExt::unlock(&tmp)?;
        }

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace rules file {}", self.path.display()))?;
        debug!("Saved {} user rules to {}.", rules.rules.len(), self.path.display());
        Ok(())
    }
}
