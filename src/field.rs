//! Field specifications: per-placeholder validation and encoding rules.
//!
//! A [`FieldSpec`] describes one `{name}` placeholder: the pattern its
//! values must satisfy, and how values are encoded into path text. Specs
//! are pure values; they are bound to a placeholder name and checked when
//! the owning template is compiled.

use crate::error::TemplateError;
use crate::patterns;

/// Where a field's pattern fragment comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternRef {
    /// A raw regular-expression fragment supplied by the caller.
    ///
    /// The fragment must not contain capturing groups; the compiled
    /// template wraps it in its own named group.
    Raw(String),

    /// A named entry in the [pattern catalog](crate::patterns), resolved
    /// at template-compile time.
    Catalog(String),
}

/// How field values are encoded into and decoded out of path text.
///
/// The date and datetime cases are mutually exclusive by construction:
/// a spec holds exactly one codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueCodec {
    /// Values pass through as plain text.
    Plain,

    /// Values are calendar dates rendered and parsed with a chrono format
    /// string such as `%Y-%m-%d`.
    Date(String),

    /// Values are datetimes rendered and parsed with a chrono format
    /// string such as `%Y%m%d_%H%M%S`.
    DateTime(String),
}

/// Configuration for a single template placeholder.
///
/// The default spec accepts one or more name-safe characters
/// ([`patterns::NAME`]) and treats values as plain text; it is applied to
/// every placeholder without an explicit entry.
///
/// # Examples
///
/// ```
/// use pathform::{FieldSpec, ValueCodec};
///
/// let plain = FieldSpec::new(r"[a-z]+");
/// assert_eq!(plain.codec(), &ValueCodec::Plain);
///
/// let day = FieldSpec::new(r"\d{4}-\d{2}-\d{2}").with_date_format("%Y-%m-%d");
/// assert_eq!(day.codec(), &ValueCodec::Date("%Y-%m-%d".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pattern: PatternRef,
    codec: ValueCodec,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self::new(patterns::NAME)
    }
}

impl FieldSpec {
    /// Create a plain-text spec from a raw pattern fragment.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: PatternRef::Raw(pattern.into()),
            codec: ValueCodec::Plain,
        }
    }

    /// Create a plain-text spec whose pattern is a catalog entry,
    /// referenced by name and resolved at compile time.
    pub fn catalog(name: impl Into<String>) -> Self {
        Self {
            pattern: PatternRef::Catalog(name.into()),
            codec: ValueCodec::Plain,
        }
    }

    /// Treat values for this field as dates, rendered and parsed with the
    /// given chrono format string.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.codec = ValueCodec::Date(format.into());
        self
    }

    /// Treat values for this field as datetimes, rendered and parsed with
    /// the given chrono format string.
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.codec = ValueCodec::DateTime(format.into());
        self
    }

    /// The pattern source for this spec.
    pub fn pattern(&self) -> &PatternRef {
        &self.pattern
    }

    /// The value codec for this spec.
    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    /// Resolve the pattern fragment and check that the configuration is
    /// well formed for the named field.
    pub(crate) fn resolve(&self, field: &str) -> Result<&str, TemplateError> {
        let fragment = match &self.pattern {
            PatternRef::Raw(pattern) => pattern.as_str(),
            PatternRef::Catalog(name) => {
                patterns::lookup(name).ok_or_else(|| TemplateError::UnknownPattern {
                    field: field.to_string(),
                    name: name.clone(),
                })?
            }
        };
        if fragment.is_empty() {
            return Err(TemplateError::InvalidFieldConfig {
                field: field.to_string(),
                reason: "pattern must not be empty".to_string(),
            });
        }
        match &self.codec {
            ValueCodec::Date(format) | ValueCodec::DateTime(format) if format.is_empty() => {
                Err(TemplateError::InvalidFieldConfig {
                    field: field.to_string(),
                    reason: "format string must not be empty".to_string(),
                })
            }
            _ => Ok(fragment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_uses_name_pattern() {
        let spec = FieldSpec::default();
        assert_eq!(spec.pattern(), &PatternRef::Raw(patterns::NAME.to_string()));
        assert_eq!(spec.codec(), &ValueCodec::Plain);
    }

    #[test]
    fn datetime_format_replaces_date_format() {
        // The codec is a single slot: configuring datetime after date keeps
        // only the datetime encoding, the two can never coexist.
        let spec = FieldSpec::new(r"\d+")
            .with_date_format("%Y")
            .with_datetime_format("%Y%m%d_%H%M%S");
        assert_eq!(
            spec.codec(),
            &ValueCodec::DateTime("%Y%m%d_%H%M%S".to_string())
        );
    }

    #[test]
    fn resolve_returns_raw_fragment() {
        let spec = FieldSpec::new(r"\d{4}");
        assert_eq!(spec.resolve("year").unwrap(), r"\d{4}");
    }

    #[test]
    fn resolve_looks_up_catalog_entries() {
        let spec = FieldSpec::catalog("extension");
        assert_eq!(spec.resolve("ext").unwrap(), patterns::EXTENSION);
    }

    #[test]
    fn resolve_rejects_unknown_catalog_name() {
        let spec = FieldSpec::catalog("no_such_pattern");
        let err = spec.resolve("ext").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnknownPattern { field, name }
                if field == "ext" && name == "no_such_pattern"
        ));
    }

    #[test]
    fn resolve_rejects_empty_pattern() {
        let spec = FieldSpec::new("");
        let err = spec.resolve("any").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidFieldConfig { .. }));
    }

    #[test]
    fn resolve_rejects_empty_format() {
        let spec = FieldSpec::new(r"\d+").with_date_format("");
        let err = spec.resolve("day").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::InvalidFieldConfig { field, .. } if field == "day"
        ));
    }
}
