// leon/src/main.rs
//! Léon entry point.
//!
//! Parses arguments, sets up logging and the theme, then dispatches to the
//! `clean` or `rules` command.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::process::ExitCode;

use leon::cli::{Cli, Commands};
use leon::commands::{self, clean, rules};
use leon::logger;
use leon::ui::theme::{build_theme_map, ThemeStyle};
use leon::utils::rule_store::RuleStore;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("leon started. Version: {}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme_map = ThemeStyle::default_theme_map();
            commands::error_msg(format!("{:#}", e), &theme_map);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let theme_map = build_theme_map(cli.theme.as_ref()).context("Failed to load theme")?;
    let store = RuleStore::resolve(cli.rules.clone())?;

    match &cli.command {
        Commands::Clean(cmd) => {
            let input = clean::read_input(cmd)?;
            let registry = store.load_registry()?;
            let opts = clean::CleanOptions::from_command(cmd, cli.quiet);
            clean::run_clean(&input, registry, &opts, &theme_map)?;
        }
        Commands::Rules(cmd) => {
            rules::run_rules_command(cmd, &store, &theme_map, cli.quiet)?;
        }
    }
    Ok(())
}
