//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, parse::ParseArgs, template::TemplateArgs,
};
use crate::entities::kit::KitType;

#[derive(Parser)]
#[command(name = "ckit")]
#[command(author, version, about = "Circuit Kit Checker")]
#[command(long_about = "Assemble circuit kits from CSV component lists and check whether they are complete and sellable.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging to stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a kit from CSV and check whether it is complete
    Check(CheckArgs),

    /// Parse a single `quantity,type,fields...` record
    Parse(ParseArgs),

    /// Print a sample CSV for a complete kit
    Template(TemplateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Auto,
    /// JSON format (for programming)
    Json,
    /// Canonical CSV records
    Csv,
}

impl OutputFormat {
    /// Resolve `Auto` against a configured default
    pub fn or_configured(self, configured: Option<&str>) -> OutputFormat {
        match (self, configured) {
            (OutputFormat::Auto, Some(name)) => {
                OutputFormat::from_str(name, true).unwrap_or(OutputFormat::Auto)
            }
            (format, _) => format,
        }
    }
}

/// clap value parser for kit types
pub fn parse_kit_type(s: &str) -> Result<KitType, String> {
    s.parse()
}
