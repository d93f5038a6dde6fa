//! The `rules` command family: list, add, remove, enable, and disable rules.
//!
//! Every mutation takes the store lock, loads the stored rules into a
//! registry, applies the change there (so validation is the engine's), and
//! only then writes the file back. A rejected change leaves the file untouched.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::io::{self, Write};

use leon_core::{SanitizerRecord, SanitizerRegistry};

use crate::cli::{AddRuleArgs, RulesCommand};
use crate::commands::success_msg;
use crate::ui::rules_table::build_rules_table;
use crate::ui::theme::ThemeMap;
use crate::utils::rule_store::RuleStore;

/// One row of `rules list --json`.
#[derive(Debug, Serialize)]
pub struct RuleListing {
    #[serde(flatten)]
    pub record: SanitizerRecord,
    pub builtin: bool,
}

pub fn listings(registry: &SanitizerRegistry) -> Vec<RuleListing> {
    registry
        .list()
        .map(|entry| RuleListing {
            record: entry.sanitizer.to_record(entry.enabled),
            builtin: entry.is_builtin(),
        })
        .collect()
}

pub fn run_rules_command(
    command: &RulesCommand,
    store: &RuleStore,
    theme_map: &ThemeMap,
    quiet: bool,
) -> Result<()> {
    let message = match command {
        RulesCommand::List { json } => {
            let registry = store.load_registry()?;
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            return write_rule_list(&registry, *json, &mut writer);
        }
        RulesCommand::Add(args) => update(store, |registry| add_rule(registry, args))?,
        RulesCommand::Remove { name } => update(store, |registry| {
            registry
                .remove_user_sanitizer(name)
                .with_context(|| format!("Cannot remove rule '{}'", name))?;
            Ok(format!("Rule '{}' removed.", name))
        })?,
        RulesCommand::Enable { name } => update(store, |registry| {
            registry
                .set_enabled(name, true)
                .with_context(|| format!("Cannot enable rule '{}'", name))?;
            Ok(format!("Rule '{}' enabled.", name))
        })?,
        RulesCommand::Disable { name } => update(store, |registry| {
            registry
                .set_enabled(name, false)
                .with_context(|| format!("Cannot disable rule '{}'", name))?;
            Ok(format!("Rule '{}' disabled.", name))
        })?,
    };

    if !quiet {
        success_msg(message, theme_map);
    }
    Ok(())
}

/// Loads, edits and saves the stored rules while holding the store lock.
/// Nothing is written when `edit` fails.
fn update<F>(store: &RuleStore, edit: F) -> Result<String>
where
    F: FnOnce(&mut SanitizerRegistry) -> Result<String>,
{
    let _guard = store.lock()?;
    let mut registry = store.load_registry()?;
    let message = edit(&mut registry)?;
    store.save(&registry.user_records())?;
    info!("Rules file {} updated.", store.path().display());
    Ok(message)
}

fn add_rule(registry: &mut SanitizerRegistry, args: &AddRuleArgs) -> Result<String> {
    registry
        .add_user_sanitizer(args.kind.into(), &args.name, &args.description, &args.value)
        .with_context(|| format!("Cannot add rule '{}'", args.name))?;
    Ok(format!("Rule '{}' added.", args.name))
}

/// Prints the registry as a table, or as a JSON array.
pub fn write_rule_list<W: Write>(registry: &SanitizerRegistry, json: bool, writer: &mut W) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(&listings(registry)).context("Failed to serialize rules")?;
        writeln!(writer, "{}", text)?;
    } else {
        writeln!(writer, "{}", build_rules_table(registry))?;
    }
    writer.flush()?;
    Ok(())
}
