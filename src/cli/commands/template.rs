//! `ckit template` command - sample CSV for a complete kit

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};

use crate::cli::args::parse_kit_type;
use crate::cli::helpers::write_csv_records;
use crate::entities::component::{Battery, Buzzer, Light, Sensor, SolarPanel, Switch, Wire};
use crate::entities::kit::{Kit, KitType};

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Kit type (light, sensor)
    #[arg(value_parser = parse_kit_type)]
    pub kit: KitType,
}

/// A complete example kit of the given type
pub fn sample_kit(kind: KitType) -> Kit {
    match kind {
        KitType::LightCircuit => Kit::light_circuit()
            .with(2, Battery::new("AA", 1.5, 3.1))
            .with(4, Light::globe("warm", 6.5, 240.0, 3.5))
            .with(14, Wire::new(60.0, 3.2))
            .with(1, Switch::new("push", 4.5, 4.6)),
        KitType::SensorCircuit => Kit::sensor_circuit()
            .with(1, SolarPanel::new(1.4, 0.4, 14.0))
            .with(1, Sensor::new("motion", 5.0, 3.9))
            .with(1, Buzzer::new(240.0, 90.0, 4.0, 120.0, 5.6))
            .with(1, Switch::new("toggle", 4.5, 4.6))
            .with(5, Wire::new(40.0, 2.4)),
    }
}

pub fn run(args: TemplateArgs) -> Result<()> {
    let kit = sample_kit(args.kit);

    // Output to stdout (can be redirected to file)
    let mut out = io::stdout().lock();
    writeln!(out, "# {}: quantity,type,fields...", kit.kit_name()).into_diagnostic()?;
    write_csv_records(&mut out, kit.to_csv_records())?;

    // Print usage hint to stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: ckit template {} > {}.csv",
        style("→").blue(),
        args.kit,
        args.kit
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_kits_are_complete() {
        for kind in KitType::all() {
            let kit = sample_kit(*kind);
            assert_eq!(kit.kind(), *kind);
            assert!(kit.is_complete(), "{}: {:?}", kind, kit.violations());
        }
    }
}
