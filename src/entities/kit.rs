//! Kit aggregate - a quantity-tagged collection of components
//!
//! A kit is a [`KitType`] plus an ordered list of [`KitLine`]s. Everything
//! type-specific (completeness, summary wording) is delegated to the
//! rule-set returned by [`KitType::rules`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::component::Component;
use crate::rules::{self, CircuitRules, Violation};

/// One line of a kit: a component and how many of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitLine {
    pub quantity: u32,
    pub component: Component,
}

impl KitLine {
    pub fn new(quantity: u32, component: impl Into<Component>) -> Self {
        Self {
            quantity,
            component: component.into(),
        }
    }

    /// quantity x unit price
    pub fn line_price(&self) -> f64 {
        f64::from(self.quantity) * self.component.price()
    }

    /// Detail line, e.g. "2 x 1.5V AA Battery $3.10"
    pub fn display(&self) -> String {
        format!("{} x {}", self.quantity, self.component.display())
    }

    /// Key used when comparing kits as multisets
    fn equality_key(&self) -> String {
        format!("{}x {}", self.quantity, self.component.display())
    }

    /// Quantity followed by the component's canonical encoding
    pub fn to_csv_record(&self) -> Vec<String> {
        let mut record = vec![self.quantity.to_string()];
        record.extend(self.component.encode());
        record
    }
}

/// Kind of circuit kit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitType {
    LightCircuit,
    SensorCircuit,
}

impl KitType {
    /// Completeness rules and summary wording for this kit type
    pub fn rules(&self) -> &'static dyn CircuitRules {
        match self {
            KitType::LightCircuit => &rules::light::LightCircuit,
            KitType::SensorCircuit => &rules::sensor::SensorCircuit,
        }
    }

    /// Display name ("Light Circuit")
    pub fn kit_name(&self) -> &'static str {
        self.rules().kit_name()
    }

    pub fn all() -> &'static [KitType] {
        &[KitType::LightCircuit, KitType::SensorCircuit]
    }
}

impl fmt::Display for KitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KitType::LightCircuit => write!(f, "light"),
            KitType::SensorCircuit => write!(f, "sensor"),
        }
    }
}

impl FromStr for KitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "light" | "light circuit" => Ok(KitType::LightCircuit),
            "sensor" | "sensor circuit" => Ok(KitType::SensorCircuit),
            _ => Err(format!("Invalid kit type: {}. Use 'light' or 'sensor'", s)),
        }
    }
}

/// A circuit kit under assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kit {
    kind: KitType,
    lines: Vec<KitLine>,
}

impl Kit {
    /// Create an empty kit of the given type
    pub fn new(kind: KitType) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    pub fn light_circuit() -> Self {
        Self::new(KitType::LightCircuit)
    }

    pub fn sensor_circuit() -> Self {
        Self::new(KitType::SensorCircuit)
    }

    pub fn kind(&self) -> KitType {
        self.kind
    }

    pub fn kit_name(&self) -> &'static str {
        self.kind.kit_name()
    }

    pub fn lines(&self) -> &[KitLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line; identical components are not merged.
    ///
    /// A quantity of zero adds nothing, so every stored line holds at least one piece.
    pub fn add(&mut self, quantity: u32, component: impl Into<Component>) {
        if quantity == 0 {
            tracing::debug!("ignoring zero-quantity kit line");
            return;
        }
        self.lines.push(KitLine::new(quantity, component));
    }

    /// Builder-style [`Kit::add`]
    pub fn with(mut self, quantity: u32, component: impl Into<Component>) -> Self {
        self.add(quantity, component);
        self
    }

    /// Remove the first line whose component equals `component`, whatever its quantity.
    ///
    /// Linear scan in current line order. Returns the removed line, if any.
    pub fn remove(&mut self, component: &Component) -> Option<KitLine> {
        let idx = self
            .lines
            .iter()
            .position(|line| &line.component == component)?;
        Some(self.lines.remove(idx))
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(KitLine::line_price).sum()
    }

    pub fn total_count(&self) -> u64 {
        rules::piece_count(&self.lines)
    }

    /// Lines holding a battery or solar panel
    pub fn power_supplies(&self) -> Vec<&KitLine> {
        self.lines
            .iter()
            .filter(|line| line.component.is_power_supply())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.kind.rules().is_complete(&self.lines)
    }

    /// Every completeness rule this kit currently breaks
    pub fn violations(&self) -> Vec<Violation> {
        self.kind.rules().violations(&self.lines)
    }

    pub fn summary(&self) -> String {
        self.kind.rules().summary(&self.lines)
    }

    /// Summary line followed by one line per kit line
    pub fn detail(&self) -> String {
        let mut out = vec![self.summary()];
        out.extend(self.lines.iter().map(KitLine::display));
        out.join("\n")
    }

    /// One CSV record per line: quantity, type tag, fields...
    pub fn to_csv_records(&self) -> Vec<Vec<String>> {
        self.lines.iter().map(KitLine::to_csv_record).collect()
    }

    fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lines.iter().map(KitLine::equality_key).collect();
        keys.sort();
        keys
    }
}

impl PartialEq for Kit {
    /// Same kit type and the same lines, in any order
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.kit_name() == other.kit_name()
            && self.sorted_keys() == other.sorted_keys()
    }
}

impl fmt::Display for Kit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
