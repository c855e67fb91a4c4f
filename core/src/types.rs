//! Option type definitions.
//!
//! This module defines the data model for declared options: the kind tag,
//! the typed value carried by defaults and parse results, and the option
//! schema itself. The types derive [`serde`] traits so a registry can be
//! dumped or reloaded as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Delimiter separating entries in an allowed-values specification.
pub const ALLOWED_VALUES_DELIMITER: char = '|';

/// Kind of value an option carries.
///
/// # Examples
///
/// ```
/// use getopt_core::OptionKind;
///
/// assert_eq!(OptionKind::Integer.to_string(), "integer");
/// assert!(OptionKind::String.takes_value());
/// assert!(!OptionKind::Boolean.takes_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Free-form or enumerated string value.
    String,
    /// Signed integer value.
    Integer,
    /// Presence flag; never consumes a following token.
    Boolean,
}

impl OptionKind {
    /// Returns true if the option consumes the token following it.
    pub fn takes_value(self) -> bool {
        !matches!(self, OptionKind::Boolean)
    }

    /// Zero value used when no explicit default is declared.
    pub fn zero_value(self) -> OptionValue {
        match self {
            OptionKind::String => OptionValue::String(String::new()),
            OptionKind::Integer => OptionValue::Integer(0),
            OptionKind::Boolean => OptionValue::Boolean(false),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::String => "string",
            OptionKind::Integer => "integer",
            OptionKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A typed option value.
///
/// Serializes untagged, so a value map renders as plain JSON scalars.
///
/// # Examples
///
/// ```
/// use getopt_core::{OptionKind, OptionValue};
///
/// let value = OptionValue::from(42);
/// assert_eq!(value.kind(), OptionKind::Integer);
/// assert_eq!(value.as_int(), Some(42));
/// assert_eq!(value.as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl OptionValue {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::String(_) => OptionKind::String,
            OptionValue::Integer(_) => OptionKind::Integer,
            OptionValue::Boolean(_) => OptionKind::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(value) => f.write_str(value),
            OptionValue::Integer(value) => write!(f, "{value}"),
            OptionValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Integer(i64::from(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}

/// Declaration of a single command-line option.
///
/// An option always has a long form (stored without the leading `--`) and
/// may have a single-character short form. Use the kind constructors
/// [`string`](OptionSchema::string), [`integer`](OptionSchema::integer) and
/// [`boolean`](OptionSchema::boolean), then chain builder methods.
///
/// # Examples
///
/// ```
/// use getopt_core::{OptionKind, OptionSchema, OptionValue};
///
/// let mode = OptionSchema::string(Some('m'), "mode", "Operation mode")
///     .with_default("mc")
///     .with_allowed_values("mc|data");
/// assert_eq!(mode.kind, OptionKind::String);
/// assert_eq!(mode.allowed_values, vec!["mc", "data"]);
/// assert_eq!(mode.default, OptionValue::from("mc"));
/// assert_eq!(mode.display_name(), "--mode");
///
/// // Without an explicit default the kind's zero value is used.
/// let count = OptionSchema::integer(Some('p'), "int-parameter", "Some int parameter");
/// assert_eq!(count.default, OptionValue::Integer(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSchema {
    /// Short form key (e.g. `'m'` for `-m`)
    pub short: Option<char>,
    /// Long form without dashes (e.g. `"mode"` for `--mode`)
    pub long: String,
    /// Human-readable description
    pub description: String,
    /// Kind of value this option carries
    pub kind: OptionKind,
    /// Permitted values for string options; empty means unconstrained
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Value written before any argument is scanned
    pub default: OptionValue,
}

impl OptionSchema {
    fn new(kind: OptionKind, short: Option<char>, long: &str, description: &str) -> Self {
        Self {
            short,
            long: long.to_string(),
            description: description.to_string(),
            kind,
            allowed_values: Vec::new(),
            default: kind.zero_value(),
        }
    }

    /// Creates a string option defaulting to `""`.
    pub fn string(short: Option<char>, long: &str, description: &str) -> Self {
        Self::new(OptionKind::String, short, long, description)
    }

    /// Creates an integer option defaulting to `0`.
    pub fn integer(short: Option<char>, long: &str, description: &str) -> Self {
        Self::new(OptionKind::Integer, short, long, description)
    }

    /// Creates a boolean flag defaulting to `false`.
    pub fn boolean(short: Option<char>, long: &str, description: &str) -> Self {
        Self::new(OptionKind::Boolean, short, long, description)
    }

    /// Sets the default value.
    ///
    /// The value's kind is checked against the option's kind when the
    /// option is declared.
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = value.into();
        self
    }

    /// Sets the permitted values from a pipe-delimited specification.
    ///
    /// Empty segments are dropped, so `"|a||b|"` yields `["a", "b"]`.
    pub fn with_allowed_values(mut self, spec: &str) -> Self {
        self.allowed_values = parse_allowed_values(spec);
        self
    }

    /// Returns true if the option is constrained to a set of values.
    pub fn has_allowed_values(&self) -> bool {
        !self.allowed_values.is_empty()
    }

    /// Returns the long form as typed on the command line (`--long`).
    pub fn display_name(&self) -> String {
        format!("--{}", self.long)
    }

    pub fn matches_short(&self, key: char) -> bool {
        self.short == Some(key)
    }

    pub fn matches_long(&self, name: &str) -> bool {
        self.long == name
    }
}

/// Splits an allowed-values specification on [`ALLOWED_VALUES_DELIMITER`],
/// dropping empty segments.
///
/// # Examples
///
/// ```
/// use getopt_core::parse_allowed_values;
///
/// assert_eq!(parse_allowed_values("mc|data"), vec!["mc", "data"]);
/// assert_eq!(parse_allowed_values("|mc||data|"), vec!["mc", "data"]);
/// assert!(parse_allowed_values("").is_empty());
/// ```
pub fn parse_allowed_values(spec: &str) -> Vec<String> {
    spec.split(ALLOWED_VALUES_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}
