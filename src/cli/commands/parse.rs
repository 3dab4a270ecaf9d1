//! `ckit parse` command - decode one CSV record

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::json;

use std::io;

use crate::cli::helpers::{csv_record_line, write_csv_records};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::factory::parse_record;

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Record such as "17,Wire,40,2.4" (quantity first)
    pub record: String,
}

pub fn run(args: ParseArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = global
        .format
        .or_configured(config.default_format.as_deref());

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(args.record.as_bytes());

    let record = rdr
        .records()
        .next()
        .ok_or_else(|| miette::miette!("Empty record"))?
        .into_diagnostic()?;
    let fields: Vec<&str> = record.iter().collect();
    let (quantity, component) = parse_record(&fields)?;

    let mut encoded = vec![quantity.to_string()];
    encoded.extend(component.encode());

    match format {
        OutputFormat::Json => {
            let value = json!({
                "quantity": quantity,
                "component": component,
                "display": component.display(),
                "encoded": encoded,
                "wattage": component.wattage(),
            });
            println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);
        }
        OutputFormat::Csv => write_csv_records(io::stdout(), [&encoded])?,
        OutputFormat::Auto => {
            println!("{} x {}", quantity, style(component.display()).bold());
            if !global.quiet {
                println!("  Type:    {}", style(component.name()).cyan());
                println!("  Encoded: {}", csv_record_line(&encoded)?);
                if let Some(watts) = component.wattage() {
                    println!("  Wattage: {:.3}W", watts);
                }
            }
        }
    }

    Ok(())
}
