//! Completeness rule engine
//!
//! Each kit type owns a rule-set implementing [`CircuitRules`]. Rule-sets are
//! stateless: they look only at the lines handed to them and are recomputed
//! on every call.

pub mod light;
pub mod sensor;

use serde::Serialize;
use std::fmt;

use crate::entities::component::{
    Battery, Buzzer, Component, Light, SolarPanel, Sensor, Switch,
};
use crate::entities::kit::KitLine;

/// Completeness predicate and summary wording for one kit type
pub trait CircuitRules: Send + Sync {
    /// Display name of the kit ("Light Circuit")
    fn kit_name(&self) -> &'static str;

    /// Every rule broken by `lines`, in rule order
    fn violations(&self, lines: &[KitLine]) -> Vec<Violation>;

    fn is_complete(&self, lines: &[KitLine]) -> bool {
        self.violations(lines).is_empty()
    }

    /// One-line description of the kit; best effort when incomplete
    fn summary(&self, lines: &[KitLine]) -> String;
}

/// A completeness rule a kit currently breaks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    MissingBattery,
    SolarPanelNotAllowed,
    NoPowerSupply,
    MixedPowerSupplies,
    MissingLight,
    MixedLightTypes,
    MixedGlobeColours,
    MissingSwitch,
    MixedSwitchTypes,
    SensorNotAllowed,
    SensorCount { found: u64 },
    BuzzerAndLight,
    BuzzerCount { found: u64 },
    GlobeNotAllowed,
    MismatchedLights,
    WiresBelowOthers { wires: u64, others: u64 },
    WiresNotAboveOthers { wires: u64, others: u64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingBattery => write!(f, "needs at least one battery"),
            Violation::SolarPanelNotAllowed => write!(f, "solar panels are not allowed"),
            Violation::NoPowerSupply => write!(f, "needs a battery or a solar panel"),
            Violation::MixedPowerSupplies => {
                write!(f, "cannot mix batteries and solar panels")
            }
            Violation::MissingLight => write!(f, "needs at least one light"),
            Violation::MixedLightTypes => {
                write!(f, "lights must all be LED lights or all light globes")
            }
            Violation::MixedGlobeColours => write!(f, "light globes must all be the same colour"),
            Violation::MissingSwitch => write!(f, "needs at least one switch"),
            Violation::MixedSwitchTypes => write!(f, "switches must all be the same type"),
            Violation::SensorNotAllowed => write!(f, "sensors are not allowed"),
            Violation::SensorCount { found } => {
                write!(f, "needs exactly one sensor, found {}", found)
            }
            Violation::BuzzerAndLight => write!(f, "cannot have both a buzzer and lights"),
            Violation::BuzzerCount { found } => {
                write!(f, "at most one buzzer allowed, found {}", found)
            }
            Violation::GlobeNotAllowed => write!(f, "only LED lights are allowed"),
            Violation::MismatchedLights => {
                write!(f, "LED lights must share colour, voltage and current")
            }
            Violation::WiresBelowOthers { wires, others } => write!(
                f,
                "needs at least as many wires as other components ({} < {})",
                wires, others
            ),
            Violation::WiresNotAboveOthers { wires, others } => write!(
                f,
                "needs more wires than other components ({} <= {})",
                wires, others
            ),
        }
    }
}

/// Lines whose component `pick` accepts, paired with their quantity
pub(crate) fn select<'a, T: 'a>(
    lines: &'a [KitLine],
    pick: impl Fn(&'a Component) -> Option<&'a T>,
) -> Vec<(u32, &'a T)> {
    lines
        .iter()
        .filter_map(|line| pick(&line.component).map(|part| (line.quantity, part)))
        .collect()
}

pub(crate) fn batteries(lines: &[KitLine]) -> Vec<(u32, &Battery)> {
    select(lines, |c| match c {
        Component::Battery(b) => Some(b),
        _ => None,
    })
}

pub(crate) fn solar_panels(lines: &[KitLine]) -> Vec<(u32, &SolarPanel)> {
    select(lines, |c| match c {
        Component::SolarPanel(p) => Some(p),
        _ => None,
    })
}

pub(crate) fn switches(lines: &[KitLine]) -> Vec<(u32, &Switch)> {
    select(lines, |c| match c {
        Component::Switch(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn sensors(lines: &[KitLine]) -> Vec<(u32, &Sensor)> {
    select(lines, |c| match c {
        Component::Sensor(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn lights(lines: &[KitLine]) -> Vec<(u32, &Light)> {
    select(lines, |c| match c {
        Component::Light(l) => Some(l),
        _ => None,
    })
}

pub(crate) fn buzzers(lines: &[KitLine]) -> Vec<(u32, &Buzzer)> {
    select(lines, |c| match c {
        Component::Buzzer(b) => Some(b),
        _ => None,
    })
}

/// Quantities are summed as u64 so no number of u32 lines can overflow
pub(crate) fn total<T>(parts: &[(u32, T)]) -> u64 {
    parts.iter().map(|(qty, _)| u64::from(*qty)).sum()
}

/// Number of pieces across all lines
pub(crate) fn piece_count(lines: &[KitLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// (wire quantity, quantity of everything else)
pub(crate) fn wire_balance(lines: &[KitLine]) -> (u64, u64) {
    lines.iter().fold((0, 0), |(wires, others), line| {
        let qty = u64::from(line.quantity);
        if line.component.is_wire() {
            (wires + qty, others)
        } else {
            (wires, others + qty)
        }
    })
}
