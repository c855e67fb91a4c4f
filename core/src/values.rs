//! Output bindings for parsed option values.
//!
//! The parser never aliases caller storage. It writes every default and
//! every parsed value through an [`OptionSink`], which is either the
//! [`OptionValues`] map returned by [`OptionParser::parse`] or caller code
//! that routes values into its own fields.
//!
//! [`OptionParser::parse`]: crate::OptionParser::parse

use serde::{Serialize, Serializer};

use crate::types::{OptionSchema, OptionValue};

/// Destination for values produced by default application and scanning.
pub trait OptionSink {
    /// Stores `value` for `option`, replacing any earlier value.
    fn write(&mut self, option: &OptionSchema, value: OptionValue);
}

/// Adapts a closure into an [`OptionSink`].
///
/// # Examples
///
/// ```
/// use getopt_core::{FnSink, OptionParser, OptionSchema, OptionValue};
///
/// let mut parser = OptionParser::new();
/// parser
///     .declare(OptionSchema::integer(Some('n'), "iterations", "Iteration count"))
///     .unwrap();
///
/// let mut iterations = 0;
/// parser
///     .parse_into(
///         ["-n", "42"],
///         &mut FnSink(|opt: &OptionSchema, value: OptionValue| {
///             if opt.long == "iterations" {
///                 iterations = value.as_int().unwrap_or_default();
///             }
///         }),
///     )
///     .unwrap();
/// assert_eq!(iterations, 42);
/// ```
pub struct FnSink<F>(pub F);

impl<F> OptionSink for FnSink<F>
where
    F: FnMut(&OptionSchema, OptionValue),
{
    fn write(&mut self, option: &OptionSchema, value: OptionValue) {
        (self.0)(option, value)
    }
}

/// Parsed values keyed by option long form, in first-write order.
///
/// # Examples
///
/// ```
/// use getopt_core::{OptionParser, OptionSchema};
///
/// let mut parser = OptionParser::new();
/// parser.declare(OptionSchema::boolean(Some('t'), "test-mode", "Enable test mode")).unwrap();
///
/// let values = parser.parse(["-t"]).unwrap();
/// assert_eq!(values.get_bool("test-mode"), Some(true));
/// assert_eq!(values.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues {
    entries: Vec<(String, OptionValue)>,
}

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `long`.
    pub fn get(&self, long: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == long)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, long: &str) -> Option<&str> {
        self.get(long).and_then(OptionValue::as_str)
    }

    pub fn get_int(&self, long: &str) -> Option<i64> {
        self.get(long).and_then(OptionValue::as_int)
    }

    pub fn get_bool(&self, long: &str) -> Option<bool> {
        self.get(long).and_then(OptionValue::as_bool)
    }

    /// Stores `value` under `long`, keeping the original position on overwrite.
    pub fn set(&mut self, long: &str, value: OptionValue) {
        match self.entries.iter_mut().find(|(name, _)| name == long) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((long.to_string(), value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(long, value)` pairs in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for OptionValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl OptionSink for OptionValues {
    fn write(&mut self, option: &OptionSchema, value: OptionValue) {
        self.set(&option.long, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut values = OptionValues::new();
        values.set("mode", OptionValue::from("mc"));
        values.set("iterations", OptionValue::from(5000));
        values.set("mode", OptionValue::from("data"));

        let names: Vec<&str> = values.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["mode", "iterations"]);
        assert_eq!(values.get_str("mode"), Some("data"));
    }

    #[test]
    fn test_typed_getters_reject_other_kinds() {
        let mut values = OptionValues::new();
        values.set("iterations", OptionValue::from(7));
        assert_eq!(values.get_int("iterations"), Some(7));
        assert_eq!(values.get_str("iterations"), None);
        assert_eq!(values.get_bool("iterations"), None);
        assert_eq!(values.get("missing"), None);
    }

    #[test]
    fn test_fn_sink_forwards_writes() {
        let opt = OptionSchema::boolean(Some('t'), "test-mode", "");
        let mut seen = Vec::new();
        let mut sink = FnSink(|o: &OptionSchema, v: OptionValue| seen.push((o.long.clone(), v)));
        sink.write(&opt, OptionValue::from(true));
        drop(sink);
        assert_eq!(seen, vec![("test-mode".to_string(), OptionValue::Boolean(true))]);
    }

    #[test]
    fn test_values_serialize_as_json_object() {
        let mut values = OptionValues::new();
        values.set("mode", OptionValue::from("mc"));
        values.set("test-mode", OptionValue::from(false));
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"mode":"mc","test-mode":false}"#);
    }
}
