//! Errors raised while decoding component records

use miette::Diagnostic;
use thiserror::Error;

use crate::entities::component::ComponentKind;

/// A single record could not be turned into a component.
///
/// Every variant is local to the record that produced it: batch callers
/// report it and move on to the next record.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ParseError {
    #[error("Unknown component type: '{tag}'")]
    #[diagnostic(
        code(ckit::parse::unknown_type),
        help("Known types: Wire, Battery, Solar Panel, Switch, Sensor, LED Light, Light Globe, Buzzer")
    )]
    UnknownComponentType { tag: String },

    #[error("Malformed {field} for {component}: '{value}' ({reason})")]
    #[diagnostic(code(ckit::parse::malformed_field))]
    MalformedField {
        component: ComponentKind,
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{component} expects {expected} field(s) after the type, found {found}")]
    #[diagnostic(code(ckit::parse::field_count))]
    FieldCount {
        component: ComponentKind,
        expected: usize,
        found: usize,
    },

    #[error("Invalid quantity: '{value}'")]
    #[diagnostic(
        code(ckit::parse::quantity),
        help("Quantity must be a whole number of at least 1")
    )]
    InvalidQuantity { value: String },

    #[error("Field {column} is not valid UTF-8")]
    #[diagnostic(code(ckit::parse::encoding))]
    InvalidEncoding { column: usize },

    #[error("Empty record")]
    #[diagnostic(code(ckit::parse::empty))]
    EmptyRecord,
}

impl ParseError {
    /// True when the record was recognised but one of its values was bad
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ParseError::MalformedField { .. }
                | ParseError::FieldCount { .. }
                | ParseError::InvalidQuantity { .. }
                | ParseError::InvalidEncoding { .. }
        )
    }
}
