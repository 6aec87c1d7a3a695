//! Parse-time records of an object diagram.
//!
//! An object diagram is a flat list of [`ObjectRecord`]s (declared instances
//! of domain classes such as `City`, `KPI` or `Dashboard`) and a list of
//! [`RelationshipRecord`]s, each a directed reference from one alias to
//! another. Both are plain immutable data; ordering and cross-referencing
//! happen in the planner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// A literal attribute value as declared in the diagram.
///
/// Values are untyped at this layer: the downstream seed-script renderer
/// decides how each variant is spelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(value) => write!(f, "{value}"),
            Literal::Integer(value) => write!(f, "{value}"),
            // Debug keeps the fractional part for whole numbers (`15.0`, not `15`).
            Literal::Float(value) => write!(f, "{value:?}"),
            Literal::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

/// A single `name = value` assignment on an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    value: Literal,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Literal {
        &self.value
    }
}

/// One declared instance in the object diagram.
///
/// Attributes keep their declaration order, including repeated names.
///
/// # Examples
///
/// ```
/// use kpiseed_core::record::ObjectRecord;
///
/// let city = ObjectRecord::new("differdange", "City")
///     .with_attribute("name", "Differdange")
///     .with_attribute("population", 28000);
///
/// assert_eq!(city.alias(), "differdange");
/// assert_eq!(city.attributes().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    alias: Id,
    class_name: Id,
    attributes: Vec<Attribute>,
}

impl ObjectRecord {
    /// Creates an object without attributes.
    pub fn new(alias: impl Into<Id>, class_name: impl Into<Id>) -> Self {
        Self {
            alias: alias.into(),
            class_name: class_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute assignment.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Replaces the attribute list.
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn alias(&self) -> Id {
        self.alias
    }

    pub fn class_name(&self) -> Id {
        self.class_name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// A directed reference: `source` depends on `target`.
///
/// The target must be materialized before the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationshipRecord {
    source: Id,
    target: Id,
}

impl RelationshipRecord {
    pub fn new(source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// The referencing alias.
    pub fn source(&self) -> Id {
        self.source
    }

    /// The referenced alias.
    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns `true` if the relationship points back at its own source.
    pub fn is_self_reference(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for RelationshipRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
