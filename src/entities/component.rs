//! Component value types - the physical parts a kit is built from
//!
//! Every part kind is a plain value struct; [`Component`] closes over all of
//! them so that encoding, decoding, display and equality are exhaustive
//! matches rather than runtime type checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::error::ParseError;
use crate::entities::factory;

/// Tolerance used for every numeric comparison between components
pub const EPSILON: f64 = 1e-9;

/// Compare two floats within [`EPSILON`]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Watts drawn or supplied, with current given in milliamps
pub fn wattage(voltage: f64, current_ma: f64) -> f64 {
    voltage * (current_ma / 1000.0)
}

/// Upper-case the first character and lower-case the rest ("wARM" -> "Warm")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// The kind of a component, one per canonical type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Wire,
    Battery,
    SolarPanel,
    Switch,
    Sensor,
    LedLight,
    LightGlobe,
    Buzzer,
}

impl ComponentKind {
    /// Canonical type tag as written in CSV records
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Wire => "Wire",
            ComponentKind::Battery => "Battery",
            ComponentKind::SolarPanel => "Solar Panel",
            ComponentKind::Switch => "Switch",
            ComponentKind::Sensor => "Sensor",
            ComponentKind::LedLight => "LED Light",
            ComponentKind::LightGlobe => "Light Globe",
            ComponentKind::Buzzer => "Buzzer",
        }
    }

    /// Names of the fields that follow the type tag, in CSV order
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            ComponentKind::Wire => &["length", "price"],
            ComponentKind::Battery => &["size", "voltage", "price"],
            ComponentKind::SolarPanel => &["voltage", "current", "price"],
            ComponentKind::Switch => &["switch_type", "voltage", "price"],
            ComponentKind::Sensor => &["sensor_type", "voltage", "price"],
            ComponentKind::LedLight | ComponentKind::LightGlobe => {
                &["colour", "voltage", "current", "price"]
            }
            ComponentKind::Buzzer => &["frequency", "sound_pressure", "voltage", "current", "price"],
        }
    }

    /// All kinds, in registry order
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::Wire,
            ComponentKind::Battery,
            ComponentKind::SolarPanel,
            ComponentKind::Switch,
            ComponentKind::Sensor,
            ComponentKind::LedLight,
            ComponentKind::LightGlobe,
            ComponentKind::Buzzer,
        ]
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Positional access to the fields of one record, checked against a kind's layout
pub(crate) struct Fields<'a, S> {
    kind: ComponentKind,
    values: &'a [S],
}

impl<'a, S: AsRef<str>> Fields<'a, S> {
    pub(crate) fn new(kind: ComponentKind, values: &'a [S]) -> Result<Self, ParseError> {
        let expected = kind.field_names().len();
        if values.len() != expected {
            return Err(ParseError::FieldCount {
                component: kind,
                expected,
                found: values.len(),
            });
        }
        Ok(Self { kind, values })
    }

    fn raw(&self, idx: usize) -> &str {
        self.values[idx].as_ref().trim()
    }

    fn malformed(&self, idx: usize, reason: &'static str) -> ParseError {
        ParseError::MalformedField {
            component: self.kind,
            field: self.kind.field_names()[idx],
            value: self.raw(idx).to_string(),
            reason,
        }
    }

    pub(crate) fn text(&self, idx: usize) -> Result<String, ParseError> {
        let value = self.raw(idx);
        if value.is_empty() {
            return Err(self.malformed(idx, "must not be empty"));
        }
        Ok(value.to_string())
    }

    fn number(&self, idx: usize) -> Result<f64, ParseError> {
        let value: f64 = self
            .raw(idx)
            .parse()
            .map_err(|_| self.malformed(idx, "not a number"))?;
        if !value.is_finite() {
            return Err(self.malformed(idx, "must be finite"));
        }
        Ok(value)
    }

    /// A physical measurement, strictly positive
    pub(crate) fn positive(&self, idx: usize) -> Result<f64, ParseError> {
        let value = self.number(idx)?;
        if value <= 0.0 {
            return Err(self.malformed(idx, "must be greater than zero"));
        }
        Ok(value)
    }

    /// A price, zero allowed
    pub(crate) fn price(&self, idx: usize) -> Result<f64, ParseError> {
        let value = self.number(idx)?;
        if value < 0.0 {
            return Err(self.malformed(idx, "must not be negative"));
        }
        Ok(value)
    }
}

/// Length of wire in millimetres
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    pub length_mm: f64,
    pub price: f64,
}

impl Wire {
    pub fn new(length_mm: f64, price: f64) -> Self {
        Self { length_mm, price }
    }

    pub fn display(&self) -> String {
        format!("{:.0}mm Wire ${:.2}", self.length_mm, self.price)
    }

    fn encode_fields(&self) -> Vec<String> {
        vec![self.length_mm.to_string(), format_price(self.price)]
    }

    pub fn decode<S: AsRef<str>>(values: &[S]) -> Result<Self, ParseError> {
        let f = Fields::new(ComponentKind::Wire, values)?;
        Ok(Self::new(f.positive(0)?, f.price(1)?))
    }
}

impl PartialEq for Wire {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.length_mm, other.length_mm) && approx_eq(self.price, other.price)
    }
}

/// Battery cell (AA, AAA, C, D, E)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battery {
    pub size: String,
    pub voltage: f64,
    pub price: f64,
}

impl Battery {
    pub fn new(size: impl Into<String>, voltage: f64, price: f64) -> Self {
        Self {
            size: size.into(),
            voltage,
            price,
        }
    }

    pub fn display(&self) -> String {
        format!("{:.1}V {} Battery ${:.2}", self.voltage, self.size, self.price)
    }

    fn encode_fields(&self) -> Vec<String> {
        vec![
            self.size.clone(),
            self.voltage.to_string(),
            format_price(self.price),
        ]
    }

    pub fn decode<S: AsRef<str>>(values: &[S]) -> Result<Self, ParseError> {
        let f = Fields::new(ComponentKind::Battery, values)?;
        Ok(Self::new(f.text(0)?, f.positive(1)?, f.price(2)?))
    }
}

impl PartialEq for Battery {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && approx_eq(self.voltage, other.voltage)
            && approx_eq(self.price, other.price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarPanel {
    pub voltage: f64,
    pub current_ma: f64,
    pub price: f64,
}

impl SolarPanel {
    pub fn new(voltage: f64, current_ma: f64, price: f64) -> Self {
        Self {
            voltage,
            current_ma,
            price,
        }
    }

    pub fn wattage(&self) -> f64 {
        wattage(self.voltage, self.current_ma)
    }

    pub fn display(&self) -> String {
        format!(
            "{:.1}V {:.1}mA Solar Panel ${:.2}",
            self.voltage, self.current_ma, self.price
        )
    }

    fn encode_fields(&self) -> Vec<String> {
        vec![
            self.voltage.to_string(),
            self.current_ma.to_string(),
            format_price(self.price),
        ]
    }

    pub fn decode<S: AsRef<str>>(values: &[S]) -> Result<Self, ParseError> {
        let f = Fields::new(ComponentKind::SolarPanel, values)?;
        Ok(Self::new(f.positive(0)?, f.positive(1)?, f.price(2)?))
    }
}

impl PartialEq for SolarPanel {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.voltage, other.voltage)
            && approx_eq(self.current_ma, other.current_ma)
            && approx_eq(self.price, other.price)
    }
}

/// Switch (push, slide, rocker, toggle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Switch {
    pub switch_type: String,
    pub voltage: f64,
    pub price: f64,
}

impl Switch {
    pub fn new(switch_type: impl Into<String>, voltage: f64, price: f64) -> Self {
        Self {
            switch_type: switch_type.into(),
            voltage,
            price,
        }
    }

    pub fn display(&self) -> String {
        format!(
            "{:.1}V {} Switch ${:.2}",
            self.voltage,
            capitalize(&self.switch_type),
            self.price
        )
    }

    fn encode_fields(&self) -> Vec<String> {
        vec![
            self.switch_type.clone(),
            self.voltage.to_string(),
            format_price(self.price),
        ]
    }

    pub fn decode<S: AsRef<str>>(values: &[S]) -> Result<Self, ParseError> {
        let f = Fields::new(ComponentKind::Switch, values)?;
        Ok(Self::new(f.text(0)?, f.positive(1)?, f.price(2)?))
    }
}

impl PartialEq for Switch {
    fn eq(&self, other: &Self) -> bool {
        self.switch_type == other.switch_type
            && approx_eq(self.voltage, other.voltage)
            && approx_eq(self.price, other.price)
    }
}

/// Sensor (motion, infrared, light, temperature, humidity, sound, dust, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub sensor_type: String,
    pub voltage: f64,
    pub price: f64,
}

impl Sensor {
    pub fn new(sensor_type: impl Into<String>, voltage: f64, price: f64) -> Self {
        Self {
            sensor_type: sensor_type.into(),
            voltage,
            price,
        }
    }

    pub fn display(&self) -> String {
        format!(
            "{:.1}V {} Sensor ${:.2}",
            self.voltage,
            capitalize(&self.sensor_type),
            self.price
        )
    }

    fn encode_fields(&self) -> Vec<String> {
        vec![
            self.sensor_type.clone(),
            self.voltage.to_string(),
            format_price(self.price),
        ]
    }

    pub fn decode<S: AsRef<str>>(values: &[S]) -> Result<Self, ParseError> {
        let f = Fields::new(ComponentKind::Sensor, values)?;
        Ok(Self::new(f.text(0)?, f.positive(1)?, f.price(2)?))
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.sensor_type == other.sensor_type
            && approx_eq(self.voltage, other.voltage)
            && approx_eq(self.price, other.price)
    }
}

/// Which kind of light a [`Light`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Led,
    Globe,
}

impl LightKind {
    pub fn component_kind(&self) -> ComponentKind {
        match self {
            LightKind::Led => ComponentKind::LedLight,
            LightKind::Globe => ComponentKind::LightGlobe,
        }
    }

    /// Singular name ("LED Light")
    pub fn name(&self) -> &'static str {
        self.component_kind().tag()
    }

    /// Plural name used in kit summaries ("LED Lights")
    pub fn plural(&self) -> &'static str {
        match self {
            LightKind::Led => "LED Lights",
            LightKind::Globe => "Light Globes",
        }
    }
}

/// LED light or light globe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Light {
    pub kind: LightKind,
    pub colour: String,
    pub voltage: f64,
    pub current_ma: f64,
    pub price: f64,
}

impl Light {
    pub fn led(colour: impl Into<String>, voltage: f64, current_ma: f64, price: f64) -> Self {
        Self::new(LightKind::Led, colour, voltage, current_ma, price)
    }

    pub fn globe(colour: impl Into<String>, voltage: f64, current_ma: f64, price: f64) -> Self {
        Self::new(LightKind::Globe, colour, voltage, current_ma, price)
    }

    pub fn new(
        kind: LightKind,
        colour: impl Into<String>,
        voltage: f64,
        current_ma: f64,
        price: f64,
    ) -> Self {
        Self {
            kind,
            colour: colour.into(),
            voltage,
            current_ma,
            price,
        }
    }

    pub fn wattage(&self) -> f64 {
        wattage(self.voltage, self.current_ma)
    }

    /// Same colour and electrical rating, price ignored
    pub fn same_spec(&self, other: &Light) -> bool {
        self.colour == other.colour
            && approx_eq(self.voltage, other.voltage)
            && approx_eq(self.current_ma, other.current_ma)
    }

    pub fn display(&self) -> String {
        format!(
            "{:.1}V {:.1}mA {} {} ${:.2}",
            self.voltage,
            self.current_ma,
            capitalize(&self.colour),
            self.kind.name(),
            self.price
        )
    }

    fn encode_fields(&self) -> Vec<String> {
        vec![
            self.colour.clone(),
            self.voltage.to_string(),
            self.current_ma.to_string(),
            format_price(self.price),
        ]
    }

    pub fn decode<S: AsRef<str>>(kind: LightKind, values: &[S]) -> Result<Self, ParseError> {
        let f = Fields::new(kind.component_kind(), values)?;
        Ok(Self::new(
            kind,
            f.text(0)?,
            f.positive(1)?,
            f.positive(2)?,
            f.price(3)?,
        ))
    }
}

impl PartialEq for Light {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.same_spec(other) && approx_eq(self.price, other.price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buzzer {
    pub frequency_hz: f64,
    pub sound_pressure_db: f64,
    pub voltage: f64,
    pub current_ma: f64,
    pub price: f64,
}

impl Buzzer {
    pub fn new(
        frequency_hz: f64,
        sound_pressure_db: f64,
        voltage: f64,
        current_ma: f64,
        price: f64,
    ) -> Self {
        Self {
            frequency_hz,
            sound_pressure_db,
            voltage,
            current_ma,
            price,
        }
    }

    pub fn wattage(&self) -> f64 {
        wattage(self.voltage, self.current_ma)
    }

    pub fn display(&self) -> String {
        format!(
            "{:.1}V {:.1}mA {:.1}Hz {:.0}dB Buzzer ${:.2}",
            self.voltage, self.current_ma, self.frequency_hz, self.sound_pressure_db, self.price
        )
    }

    fn encode_fields(&self) -> Vec<String> {
        vec![
            self.frequency_hz.to_string(),
            self.sound_pressure_db.to_string(),
            self.voltage.to_string(),
            self.current_ma.to_string(),
            format_price(self.price),
        ]
    }

    pub fn decode<S: AsRef<str>>(values: &[S]) -> Result<Self, ParseError> {
        let f = Fields::new(ComponentKind::Buzzer, values)?;
        Ok(Self::new(
            f.positive(0)?,
            f.positive(1)?,
            f.positive(2)?,
            f.positive(3)?,
            f.price(4)?,
        ))
    }
}

impl PartialEq for Buzzer {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.frequency_hz, other.frequency_hz)
            && approx_eq(self.sound_pressure_db, other.sound_pressure_db)
            && approx_eq(self.voltage, other.voltage)
            && approx_eq(self.current_ma, other.current_ma)
            && approx_eq(self.price, other.price)
    }
}

/// Any part that can go into a kit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Wire(Wire),
    Battery(Battery),
    SolarPanel(SolarPanel),
    Switch(Switch),
    Sensor(Sensor),
    Light(Light),
    Buzzer(Buzzer),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Wire(_) => ComponentKind::Wire,
            Component::Battery(_) => ComponentKind::Battery,
            Component::SolarPanel(_) => ComponentKind::SolarPanel,
            Component::Switch(_) => ComponentKind::Switch,
            Component::Sensor(_) => ComponentKind::Sensor,
            Component::Light(light) => light.kind.component_kind(),
            Component::Buzzer(_) => ComponentKind::Buzzer,
        }
    }

    /// Canonical name of the part ("Solar Panel", "LED Light", ...)
    pub fn name(&self) -> &'static str {
        self.kind().tag()
    }

    pub fn price(&self) -> f64 {
        match self {
            Component::Wire(c) => c.price,
            Component::Battery(c) => c.price,
            Component::SolarPanel(c) => c.price,
            Component::Switch(c) => c.price,
            Component::Sensor(c) => c.price,
            Component::Light(c) => c.price,
            Component::Buzzer(c) => c.price,
        }
    }

    /// Wattage for parts with a current rating
    pub fn wattage(&self) -> Option<f64> {
        match self {
            Component::SolarPanel(c) => Some(c.wattage()),
            Component::Light(c) => Some(c.wattage()),
            Component::Buzzer(c) => Some(c.wattage()),
            _ => None,
        }
    }

    pub fn is_power_supply(&self) -> bool {
        matches!(self, Component::Battery(_) | Component::SolarPanel(_))
    }

    pub fn is_wire(&self) -> bool {
        matches!(self, Component::Wire(_))
    }

    pub fn display(&self) -> String {
        match self {
            Component::Wire(c) => c.display(),
            Component::Battery(c) => c.display(),
            Component::SolarPanel(c) => c.display(),
            Component::Switch(c) => c.display(),
            Component::Sensor(c) => c.display(),
            Component::Light(c) => c.display(),
            Component::Buzzer(c) => c.display(),
        }
    }

    /// Canonical CSV fields: the type tag followed by the part's own fields
    pub fn encode(&self) -> Vec<String> {
        let mut fields = vec![self.name().to_string()];
        fields.extend(match self {
            Component::Wire(c) => c.encode_fields(),
            Component::Battery(c) => c.encode_fields(),
            Component::SolarPanel(c) => c.encode_fields(),
            Component::Switch(c) => c.encode_fields(),
            Component::Sensor(c) => c.encode_fields(),
            Component::Light(c) => c.encode_fields(),
            Component::Buzzer(c) => c.encode_fields(),
        });
        fields
    }

    /// Decode fields laid out as produced by [`Component::encode`]
    pub fn decode<S: AsRef<str>>(fields: &[S]) -> Result<Self, ParseError> {
        let (tag, rest) = fields.split_first().ok_or(ParseError::EmptyRecord)?;
        factory::decode_component(tag.as_ref(), rest)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<Wire> for Component {
    fn from(c: Wire) -> Self {
        Component::Wire(c)
    }
}

impl From<Battery> for Component {
    fn from(c: Battery) -> Self {
        Component::Battery(c)
    }
}

impl From<SolarPanel> for Component {
    fn from(c: SolarPanel) -> Self {
        Component::SolarPanel(c)
    }
}

impl From<Switch> for Component {
    fn from(c: Switch) -> Self {
        Component::Switch(c)
    }
}

impl From<Sensor> for Component {
    fn from(c: Sensor) -> Self {
        Component::Sensor(c)
    }
}

impl From<Light> for Component {
    fn from(c: Light) -> Self {
        Component::Light(c)
    }
}

impl From<Buzzer> for Component {
    fn from(c: Buzzer) -> Self {
        Component::Buzzer(c)
    }
}
