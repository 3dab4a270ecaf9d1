//! Light Circuit rules
//!
//! A sellable light circuit is battery powered, drives one type of light
//! (LEDs in any colours, or globes of a single colour) behind one type of
//! switch, has no sensors, and carries at least as many wires as all other
//! parts together.

use crate::entities::component::{capitalize, LightKind};
use crate::entities::kit::KitLine;

use super::{batteries, lights, piece_count, sensors, solar_panels, switches, total, wire_balance};
use super::{CircuitRules, Violation};

pub struct LightCircuit;

impl CircuitRules for LightCircuit {
    fn kit_name(&self) -> &'static str {
        "Light Circuit"
    }

    fn violations(&self, lines: &[KitLine]) -> Vec<Violation> {
        let mut violations = Vec::new();

        if batteries(lines).is_empty() {
            violations.push(Violation::MissingBattery);
        }
        if !solar_panels(lines).is_empty() {
            violations.push(Violation::SolarPanelNotAllowed);
        }

        let lights = lights(lines);
        match lights.first() {
            None => violations.push(Violation::MissingLight),
            Some((_, first)) => {
                if lights.iter().any(|(_, l)| l.kind != first.kind) {
                    violations.push(Violation::MixedLightTypes);
                } else if first.kind == LightKind::Globe
                    && lights.iter().any(|(_, l)| l.colour != first.colour)
                {
                    violations.push(Violation::MixedGlobeColours);
                }
            }
        }

        let switches = switches(lines);
        match switches.first() {
            None => violations.push(Violation::MissingSwitch),
            Some((_, first)) => {
                if switches
                    .iter()
                    .any(|(_, s)| s.switch_type != first.switch_type)
                {
                    violations.push(Violation::MixedSwitchTypes);
                }
            }
        }

        if !sensors(lines).is_empty() {
            violations.push(Violation::SensorNotAllowed);
        }

        let (wires, others) = wire_balance(lines);
        if wires < others {
            violations.push(Violation::WiresBelowOthers { wires, others });
        }

        violations
    }

    fn summary(&self, lines: &[KitLine]) -> String {
        let pieces = piece_count(lines);

        let batteries = batteries(lines);
        let battery_desc = match batteries.first() {
            Some((_, first)) => format!("{} {} Batterys", total(&batteries), first.size),
            None => "No Battery".to_string(),
        };

        let lights = lights(lines);
        let light_desc = match lights.first() {
            Some((_, first)) => {
                let mut colours: Vec<(&str, u64)> = Vec::new();
                for (qty, light) in &lights {
                    match colours.iter().position(|(c, _)| *c == light.colour) {
                        Some(idx) => colours[idx].1 += u64::from(*qty),
                        None => colours.push((light.colour.as_str(), u64::from(*qty))),
                    }
                }
                if first.kind == LightKind::Led && colours.len() > 1 {
                    let breakdown: Vec<String> = colours
                        .iter()
                        .map(|(colour, count)| format!("{} {}", count, capitalize(colour)))
                        .collect();
                    format!(
                        "{} Multi Coloured {} [{}]",
                        total(&lights),
                        first.kind.plural(),
                        breakdown.join("/")
                    )
                } else {
                    format!(
                        "{} {} {}",
                        total(&lights),
                        capitalize(&first.colour),
                        first.kind.plural()
                    )
                }
            }
            None => "0 Lights".to_string(),
        };

        let mut summary = format!(
            "{} Piece {}, with {}, {}",
            pieces,
            self.kit_name(),
            battery_desc,
            light_desc
        );
        if let Some((_, switch)) = switches(lines).first() {
            summary.push_str(&format!(" & {} Switch", capitalize(&switch.switch_type)));
        }
        summary
    }
}
