//! Sensor Circuit rules

use crate::entities::component::{capitalize, LightKind};
use crate::entities::kit::KitLine;

use super::{
    batteries, buzzers, lights, piece_count, sensors, solar_panels, switches, total, wire_balance,
};
use super::{CircuitRules, Violation};

/// One power source family, one sensor, at most one output type (a single
/// buzzer or any number of identical LEDs), optional switches, and strictly
/// more wires than everything else.
pub struct SensorCircuit;

impl CircuitRules for SensorCircuit {
    fn kit_name(&self) -> &'static str {
        "Sensor Circuit"
    }

    fn violations(&self, lines: &[KitLine]) -> Vec<Violation> {
        let mut violations = Vec::new();

        let batteries = batteries(lines);
        let solar_panels = solar_panels(lines);
        match (batteries.is_empty(), solar_panels.is_empty()) {
            (true, true) => violations.push(Violation::NoPowerSupply),
            (false, false) => violations.push(Violation::MixedPowerSupplies),
            _ => {}
        }

        let sensor_count = total(&sensors(lines));
        if sensor_count != 1 {
            violations.push(Violation::SensorCount {
                found: sensor_count,
            });
        }

        let buzzers = buzzers(lines);
        let lights = lights(lines);
        if !buzzers.is_empty() && !lights.is_empty() {
            violations.push(Violation::BuzzerAndLight);
        }

        let buzzer_count = total(&buzzers);
        if !buzzers.is_empty() && buzzer_count != 1 {
            violations.push(Violation::BuzzerCount {
                found: buzzer_count,
            });
        }

        if let Some((_, first)) = lights.first() {
            if lights.iter().any(|(_, l)| l.kind != LightKind::Led) {
                violations.push(Violation::GlobeNotAllowed);
            } else if lights.iter().any(|(_, l)| !l.same_spec(first)) {
                violations.push(Violation::MismatchedLights);
            }
        }

        let (wires, others) = wire_balance(lines);
        if wires <= others {
            violations.push(Violation::WiresNotAboveOthers { wires, others });
        }

        violations
    }

    fn summary(&self, lines: &[KitLine]) -> String {
        let pieces = piece_count(lines);

        let batteries = batteries(lines);
        let solar_panels = solar_panels(lines);
        let power_desc = if let Some((_, first)) = batteries.first() {
            format!("{} {} Battery", total(&batteries), first.size)
        } else if !solar_panels.is_empty() {
            format!("{} Solar Panel", total(&solar_panels))
        } else {
            String::new()
        };

        let sensor_desc = sensors(lines)
            .first()
            .map(|(_, sensor)| format!("{} Sensor", capitalize(&sensor.sensor_type)))
            .unwrap_or_default();

        let lights = lights(lines);
        let output_desc = if !buzzers(lines).is_empty() {
            Some("Buzzer".to_string())
        } else {
            lights.first().map(|(_, first)| {
                format!(
                    "{} {} {}",
                    total(&lights),
                    capitalize(&first.colour),
                    first.kind.name()
                )
            })
        };

        let mut parts = vec![format!(
            "{} Piece {}, with {}, {}",
            pieces,
            self.kit_name(),
            power_desc,
            sensor_desc
        )];
        if let Some(output) = output_desc {
            parts.push(output);
        }
        if let Some((_, switch)) = switches(lines).first() {
            parts.push(format!("& {} Switch", capitalize(&switch.switch_type)));
        }
        parts.join(" ")
    }
}
