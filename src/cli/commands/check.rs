//! `ckit check` command - load a kit from CSV and evaluate its rules

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::parse_kit_type;
use crate::cli::helpers::{format_price, report_row_errors, write_csv_records};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::{load_kit_from_path, LoadOptions, LoadReport};
use crate::core::Config;
use crate::entities::kit::{Kit, KitLine, KitType};
use crate::rules::Violation;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// CSV file with one `quantity,type,fields...` record per line
    pub file: PathBuf,

    /// Kit type (light, sensor); defaults to the configured kit
    #[arg(long, short = 'k', value_parser = parse_kit_type)]
    pub kit: Option<KitType>,

    /// Show every kit line
    #[arg(long, short = 'd')]
    pub detail: bool,

    /// Continue after rows that fail to decode (default: fail the command)
    #[arg(long)]
    pub skip_errors: bool,

    /// Fail when the kit is not complete
    #[arg(long)]
    pub strict: bool,
}

#[derive(Serialize)]
struct RowErrorReport<'a> {
    row: usize,
    record: &'a str,
    message: String,
}

#[derive(Serialize)]
struct KitReport<'a> {
    kit: &'static str,
    summary: String,
    complete: bool,
    total_count: u64,
    total_price: f64,
    violations: Vec<Violation>,
    lines: &'a [KitLine],
    errors: Vec<RowErrorReport<'a>>,
}

impl<'a> KitReport<'a> {
    fn new(report: &'a LoadReport) -> Self {
        let kit = &report.kit;
        Self {
            kit: kit.kit_name(),
            summary: kit.summary(),
            complete: kit.is_complete(),
            total_count: kit.total_count(),
            total_price: kit.total_price(),
            violations: kit.violations(),
            lines: kit.lines(),
            errors: report
                .errors
                .iter()
                .map(|e| RowErrorReport {
                    row: e.row,
                    record: &e.record,
                    message: e.error.to_string(),
                })
                .collect(),
        }
    }
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let kind = args.kit.unwrap_or_else(|| config.kit_type());
    let skip_errors = args.skip_errors || config.skip_errors();
    let format = global
        .format
        .or_configured(config.default_format.as_deref());

    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    let report = load_kit_from_path(kind, &args.file, &LoadOptions::default())?;
    report_row_errors(&report.errors);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&KitReport::new(&report)).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => write_csv_records(io::stdout(), report.kit.to_csv_records())?,
        OutputFormat::Auto => print_human(&report.kit, args.detail, global.quiet),
    }

    if report.has_errors() && !skip_errors {
        return Err(miette::miette!(
            "{} row(s) could not be decoded (use --skip-errors to ignore)",
            report.errors.len()
        ));
    }

    if args.strict && !report.kit.is_complete() {
        return Err(miette::miette!("{} is not complete", report.kit.kit_name()));
    }

    Ok(())
}

fn print_human(kit: &Kit, detail: bool, quiet: bool) {
    println!("{}", style(kit.summary()).bold());
    if quiet {
        return;
    }

    if detail && !kit.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Qty", "Component", "Unit", "Line Total"]);
        for line in kit.lines() {
            builder.push_record([
                line.quantity.to_string(),
                line.component.display(),
                format_price(line.component.price()),
                format_price(line.line_price()),
            ]);
        }
        println!();
        println!("{}", builder.build().with(Style::markdown()));
    }

    println!();
    println!("  Components:  {}", style(kit.total_count()).cyan());
    println!(
        "  Total price: {}",
        style(format_price(kit.total_price())).cyan()
    );

    let violations = kit.violations();
    if violations.is_empty() {
        println!("  Complete:    {}", style("✓ yes").green());
    } else {
        println!("  Complete:    {}", style("✗ no").red());
        for violation in &violations {
            println!("    {} {}", style("-").dim(), violation);
        }
    }
}
