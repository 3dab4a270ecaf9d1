//! Component registry - maps CSV type tags to decode routines
//!
//! This is the only place that knows every component kind by tag. Adding a
//! new kind means adding one `register` call to [`ComponentRegistry::standard`].

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::entities::component::{
    Battery, Buzzer, Component, ComponentKind, Light, LightKind, SolarPanel, Sensor, Switch, Wire,
};
use crate::entities::error::ParseError;

/// Decodes the fields that follow a type tag
pub type DecodeFn = fn(&[&str]) -> Result<Component, ParseError>;

/// Dispatch table keyed by lower-cased, trimmed type tag
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    decoders: HashMap<String, (ComponentKind, DecodeFn)>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.decoders.values().map(|(kind, _)| kind))
            .finish()
    }
}

fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

impl ComponentRegistry {
    /// A registry with no kinds registered
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with every built-in component kind
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(ComponentKind::Wire, |f| Wire::decode(f).map(Component::Wire));
        registry.register(ComponentKind::Battery, |f| {
            Battery::decode(f).map(Component::Battery)
        });
        registry.register(ComponentKind::SolarPanel, |f| {
            SolarPanel::decode(f).map(Component::SolarPanel)
        });
        registry.register(ComponentKind::Switch, |f| {
            Switch::decode(f).map(Component::Switch)
        });
        registry.register(ComponentKind::Sensor, |f| {
            Sensor::decode(f).map(Component::Sensor)
        });
        registry.register(ComponentKind::LedLight, |f| {
            Light::decode(LightKind::Led, f).map(Component::Light)
        });
        registry.register(ComponentKind::LightGlobe, |f| {
            Light::decode(LightKind::Globe, f).map(Component::Light)
        });
        registry.register(ComponentKind::Buzzer, |f| {
            Buzzer::decode(f).map(Component::Buzzer)
        });
        registry
    }

    /// Shared instance of [`ComponentRegistry::standard`]
    pub fn global() -> &'static ComponentRegistry {
        static REGISTRY: OnceLock<ComponentRegistry> = OnceLock::new();
        REGISTRY.get_or_init(ComponentRegistry::standard)
    }

    /// Register a decoder under the kind's canonical tag, replacing any previous one
    pub fn register(&mut self, kind: ComponentKind, decode: DecodeFn) {
        self.decoders.insert(normalize(kind.tag()), (kind, decode));
    }

    /// Resolve a type tag to its kind, ignoring case and surrounding whitespace
    pub fn lookup(&self, tag: &str) -> Option<ComponentKind> {
        self.decoders.get(&normalize(tag)).map(|(kind, _)| *kind)
    }

    /// Decode the fields following `tag`
    pub fn decode(&self, tag: &str, fields: &[&str]) -> Result<Component, ParseError> {
        let (_, decode) =
            self.decoders
                .get(&normalize(tag))
                .ok_or_else(|| ParseError::UnknownComponentType {
                    tag: tag.to_string(),
                })?;
        decode(fields)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

/// Decode one component from its type tag and the fields after it
pub fn decode_component<S: AsRef<str>>(
    type_tag: &str,
    fields: &[S],
) -> Result<Component, ParseError> {
    let fields: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
    ComponentRegistry::global().decode(type_tag, &fields)
}

/// Parse a record quantity (whole number, at least 1)
pub fn parse_quantity(value: &str) -> Result<u32, ParseError> {
    match value.trim().parse::<u32>() {
        Ok(qty) if qty >= 1 => Ok(qty),
        _ => Err(ParseError::InvalidQuantity {
            value: value.trim().to_string(),
        }),
    }
}

/// Parse a full record: `quantity, type_tag, field1, field2, ...`
pub fn parse_record<S: AsRef<str>>(record: &[S]) -> Result<(u32, Component), ParseError> {
    let (quantity, rest) = record.split_first().ok_or(ParseError::EmptyRecord)?;
    let quantity = parse_quantity(quantity.as_ref())?;
    let (tag, fields) = rest.split_first().ok_or(ParseError::EmptyRecord)?;
    let component = decode_component(tag.as_ref(), fields)?;
    Ok((quantity, component))
}

/// Parse a record given as one comma-separated line
pub fn parse_line(line: &str) -> Result<(u32, Component), ParseError> {
    let record: Vec<&str> = line.split(',').collect();
    parse_record(&record)
}
