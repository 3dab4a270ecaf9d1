//! Component and kit types
//!
//! **Components:**
//! - [`Component`] - closed set of part kinds (wire, battery, solar panel,
//!   switch, sensor, LED light, light globe, buzzer)
//! - [`ComponentRegistry`] - type tag to decoder dispatch
//!
//! **Kits:**
//! - [`Kit`] - quantity-tagged lines plus the kit type whose rules decide completeness

pub mod component;
pub mod error;
pub mod factory;
pub mod kit;

pub use component::{
    Battery, Buzzer, Component, ComponentKind, Light, LightKind, Sensor, SolarPanel, Switch, Wire,
};
pub use error::ParseError;
pub use factory::{decode_component, parse_line, parse_record, ComponentRegistry};
pub use kit::{Kit, KitLine, KitType};
