//! Runtime field values and the ordered name-to-value map.
//!
//! [`FieldValue`] is the tagged representation of one field's value: plain
//! text, or a typed date/datetime for fields configured with a format.
//! [`FieldValues`] maps field names to values while preserving insertion
//! order, so the same type serves as [`get_path`](crate::PathModel::get_path)
//! input and [`parse_path`](crate::PathModel::parse_path) output and a
//! parse result can be fed straight back into rendering.

use chrono::{NaiveDate, NaiveDateTime};

/// A single field value.
///
/// Fields without a date/datetime format carry [`Text`](FieldValue::Text);
/// fields with a format carry the typed variant matching their codec.
/// Supplying the wrong variant to a formatted field is rejected during
/// rendering, not coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// Plain text, used verbatim.
    Text(String),
    /// A calendar date, rendered through the field's date format.
    Date(NaiveDate),
    /// A datetime, rendered through the field's datetime format.
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Create a date value.
    pub fn date(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }

    /// Create a datetime value.
    pub fn datetime(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }

    /// Get the text if this is a plain value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Get the date if this is a date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the datetime if this is a datetime value.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    /// Short label for the variant, used in error messages.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

/// Field values keyed by name, preserving insertion order.
///
/// Backed by a vector: templates hold a handful of fields, so linear
/// lookup beats a hash map and iteration order stays meaningful.
/// [`parse_path`](crate::PathModel::parse_path) returns entries in
/// template order. Equality compares entries by name, ignoring order,
/// so caller-built maps compare equal to parse results.
///
/// # Examples
///
/// ```
/// use pathform::{FieldValue, FieldValues};
///
/// let values = FieldValues::from([
///     ("dir", FieldValue::text("reports")),
///     ("ext", FieldValue::text("csv")),
/// ]);
/// assert_eq!(values.get("dir"), Some(&FieldValue::text("reports")));
/// assert_eq!(values.names().collect::<Vec<_>>(), ["dir", "ext"]);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldValues {
    entries: Vec<(String, FieldValue)>,
}

impl PartialEq for FieldValues {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for FieldValues {}

impl FieldValues {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter().position(|(entry, _)| *entry == name) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get the value for a field name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    /// Whether a value exists for the field name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for FieldValues
where
    N: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut values = FieldValues::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

impl<N, V, const LEN: usize> From<[(N, V); LEN]> for FieldValues
where
    N: Into<String>,
    V: Into<FieldValue>,
{
    fn from(entries: [(N, V); LEN]) -> Self {
        entries.into_iter().collect()
    }
}
