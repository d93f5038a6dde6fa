//! This file defines the command-line interface (CLI) for the `leon` application,
//! including all available commands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use leon_core::RuleKind;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "leon",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remove tracking parameters from URLs in any text",
    long_about = "Léon finds the links in a piece of text, strips tracking parameters such as utm_* or wt_mc from them, and prints the text back with the cleaned links. Built-in rules are always active; your own rules are kept in a YAML rules file.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// User rules file (YAML, or JSON with a .json extension).
    #[arg(
        long = "rules",
        value_name = "FILE",
        env = "LEON_RULES_FILE",
        global = true,
        help = "Path to the user rules file. Defaults to <config dir>/leon/rules.yaml."
    )]
    pub rules: Option<PathBuf>,

    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cleans the URLs in the given text, a file, or stdin.
    Clean(CleanCommand),

    /// Lists and edits sanitizer rules.
    #[command(subcommand)]
    Rules(RulesCommand),
}

/// Arguments for the `clean` command.
#[derive(Args, Debug, Default)]
pub struct CleanCommand {
    /// Text to clean. Reads the input file or stdin when omitted.
    #[arg(value_name = "TEXT", conflicts_with = "input_file")]
    pub text: Option<String>,

    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write the cleaned text to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[arg(long, short = 'u', help = "Percent-decode each cleaned URL once.")]
    pub decode: bool,

    #[arg(long, conflicts_with_all = ["urls_only", "diff"], help = "Print the full cleaning result as JSON.")]
    pub json: bool,

    #[arg(long = "urls-only", conflicts_with = "diff", help = "Print only the cleaned URLs, one per line.")]
    pub urls_only: bool,

    #[arg(long, short = 'D', help = "Show a line diff of the original and cleaned text.")]
    pub diff: bool,

    #[arg(long, short = 'c', help = "Copy the cleaned text to the system clipboard.")]
    pub clipboard: bool,

    #[arg(long, short = 'x', value_delimiter = ',', value_name = "NAMES", help = "Disable these user rules for this run (comma-separated).")]
    pub disable: Vec<String>,

    #[arg(long = "no-summary", help = "Suppress the cleaning summary on stderr.")]
    pub no_summary: bool,
}

/// Subcommands for the `rules` command.
#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    #[command(about = "Lists built-in and user rules in the order they are applied.")]
    List {
        #[arg(long, help = "Print the rules as JSON.")]
        json: bool,
    },
    #[command(about = "Adds a user rule after validating it.")]
    Add(AddRuleArgs),
    #[command(about = "Removes a user rule.")]
    Remove {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Enables a user rule.")]
    Enable {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Disables a user rule.")]
    Disable {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct AddRuleArgs {
    #[arg(long, value_enum, help = "Rule kind: a regex pattern to delete or a query parameter to drop.")]
    pub kind: RuleKindArg,

    #[arg(long, help = "Unique rule name.")]
    pub name: String,

    #[arg(long, default_value = "", help = "Human-readable description.")]
    pub description: String,

    /// The regex (for `pattern`) or the parameter name (for `parameter`).
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RuleKindArg {
    /// Delete every match of a regular expression.
    Pattern,
    /// Drop one query parameter by exact name.
    Parameter,
}

impl From<RuleKindArg> for RuleKind {
    fn from(kind: RuleKindArg) -> Self {
        match kind {
            RuleKindArg::Pattern => RuleKind::Pattern,
            RuleKindArg::Parameter => RuleKind::Parameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_clean_with_flags() {
        let cli = Cli::try_parse_from(["leon", "clean", "-u", "-x", "a,b", "http://x.test/"]).unwrap();
        match cli.command {
            Commands::Clean(cmd) => {
                assert!(cmd.decode);
                assert_eq!(cmd.disable, vec!["a", "b"]);
                assert_eq!(cmd.text.as_deref(), Some("http://x.test/"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_rules_add() {
        let cli = Cli::try_parse_from([
            "leon", "rules", "add", "--kind", "parameter", "--name", "fbclid", "fbclid",
        ])
        .unwrap();
        match cli.command {
            Commands::Rules(RulesCommand::Add(args)) => {
                assert_eq!(RuleKind::from(args.kind), RuleKind::Parameter);
                assert_eq!(args.value, "fbclid");
                assert_eq!(args.description, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
