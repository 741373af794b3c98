//! The design-variable data model.
//!
//! Variables belong to a collection, and hold one value per mode of that
//! collection. A value is either terminal or an alias to another variable,
//! which is resolved in the same mode.

use std::fmt;

use indexmap::IndexMap;

use crate::errors::ResolveError;
use crate::types::{CollectionId, Color, ModeId, RgbaRecord, VariableId};

/// A named design variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "variableCollectionId"))]
    pub collection_id: CollectionId,
    pub values_by_mode: IndexMap<ModeId, VariableValue>,
}

impl Variable {
    pub fn new(id: impl Into<VariableId>, name: impl Into<String>, collection_id: impl Into<CollectionId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            collection_id: collection_id.into(),
            values_by_mode: IndexMap::new(),
        }
    }

    /// Set the value for a mode (builder style).
    pub fn with_value(mut self, mode: impl Into<ModeId>, value: impl Into<VariableValue>) -> Self {
        self.values_by_mode.insert(mode.into(), value.into());
        self
    }

    /// Get the stored (possibly aliased) value for a mode.
    pub fn value_for(&self, mode: &ModeId) -> Option<&VariableValue> {
        self.values_by_mode.get(mode)
    }
}

/// A group of variables sharing a set of modes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub modes: Vec<Mode>,
    pub default_mode_id: ModeId,
}

impl Collection {
    /// Check whether a mode belongs to this collection.
    pub fn has_mode(&self, mode: &ModeId) -> bool {
        self.modes.iter().any(|m| &m.mode_id == mode)
    }
}

/// A named mode of a collection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Mode {
    pub mode_id: ModeId,
    pub name: String,
}

/// A stored variable value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum VariableValue {
    Alias(VariableAlias),
    Terminal(TerminalValue),
}

impl VariableValue {
    pub fn alias(id: impl Into<VariableId>) -> Self {
        VariableValue::Alias(VariableAlias {
            kind: AliasKind::VariableAlias,
            id: id.into(),
        })
    }

    /// The aliased id, if this value is an alias.
    pub fn as_alias(&self) -> Option<&VariableId> {
        match self {
            VariableValue::Alias(alias) => Some(&alias.id),
            VariableValue::Terminal(_) => None,
        }
    }
}

impl From<TerminalValue> for VariableValue {
    fn from(value: TerminalValue) -> Self {
        VariableValue::Terminal(value)
    }
}

impl From<Color> for VariableValue {
    fn from(color: Color) -> Self {
        VariableValue::Terminal(TerminalValue::Color(color))
    }
}

/// A reference to another variable, in the host's wire shape
/// `{ "type": "VARIABLE_ALIAS", "id": "..." }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableAlias {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: AliasKind,
    pub id: VariableId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AliasKind {
    #[cfg_attr(feature = "serde", serde(rename = "VARIABLE_ALIAS"))]
    VariableAlias,
}

/// A concrete value that is not a reference to another variable.
///
/// An object carrying all of `r`, `g`, `b`, `a` is a [`Color`]; any other
/// object is kept as a generic [`TerminalValue::Object`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TerminalValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Color(Color),
    Object(IndexMap<String, TerminalValue>),
}

impl TerminalValue {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TerminalValue::Boolean(_) => "boolean",
            TerminalValue::Number(_) => "number",
            TerminalValue::String(_) => "string",
            TerminalValue::Color(_) => "color",
            TerminalValue::Object(_) => "object",
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            TerminalValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Normalize a color value to an RGBA record.
    pub fn to_rgba(&self) -> Result<RgbaRecord, ResolveError> {
        self.as_color()
            .map(|c| c.to_rgba_record())
            .ok_or(ResolveError::NotAColor { found: self.kind() })
    }

    /// Convert to a JSON value. Colors become `{"r","g","b","a"}` objects.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            TerminalValue::Boolean(b) => Value::Bool(*b),
            TerminalValue::Number(n) => json_number(*n),
            TerminalValue::String(s) => Value::String(s.clone()),
            TerminalValue::Color(c) => serde_json::json!({
                "r": json_number(c.r),
                "g": json_number(c.g),
                "b": json_number(c.b),
                "a": json_number(c.a),
            }),
            TerminalValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Integral numbers are stored as JSON integers so they print as `1`, not `1.0`.
/// Non-finite numbers have no JSON form and become `null`.
fn json_number(n: f64) -> serde_json::Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for TerminalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalValue::Boolean(b) => write!(f, "{}", b),
            TerminalValue::Number(n) => f.write_str(&format_number(*n)),
            TerminalValue::String(s) => f.write_str(s),
            TerminalValue::Color(_) | TerminalValue::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

/// Format a number with the shortest round-trip representation (`16`, `0.5`).
pub fn format_number(n: f64) -> String {
    // Avoid "-0"
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}
