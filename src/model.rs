//! # Path Model
//!
//! [`PathModel`] is the user-facing aggregate: it owns one compiled
//! template and exposes the three path operations, all pure functions of
//! their inputs:
//!
//! - [`get_path`](PathModel::get_path): field values → path string
//! - [`get_parent_path`](PathModel::get_parent_path): a prefix of field
//!   values → containing-directory path
//! - [`parse_path`](PathModel::parse_path): path string → field values
//!
//! A model is immutable after construction and safe for unsynchronized
//! concurrent use from multiple threads. It performs no filesystem I/O;
//! feeding it candidate strings (e.g. from a directory walk) is the
//! caller's business.
//!
//! ## Construction
//!
//! [`PathModel::new`] compiles a template with default field specs.
//! [`PathModel::builder`] configures per-field specs, the default spec
//! for unconfigured placeholders, and a custom parent template:
//!
//! ```
//! use pathform::{FieldSpec, PathModel};
//!
//! let model = PathModel::builder("/{archive}/{day}/{name}.{ext}")
//!     .field("day", FieldSpec::new(r"\d{4}-\d{2}-\d{2}").with_date_format("%Y-%m-%d"))
//!     .field("ext", FieldSpec::catalog("extension"))
//!     .build()?;
//! assert_eq!(model.parent_template(), "/{archive}/{day}");
//! # Ok::<(), pathform::TemplateError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{PathError, TemplateError};
use crate::field::{FieldSpec, ValueCodec};
use crate::template::{compile, BoundField, CompiledTemplate, Segment};
use crate::value::{FieldValue, FieldValues};

/// A compiled path template with rendering and parsing operations.
///
/// See the [module docs](self) for an overview and the crate docs for a
/// full example.
#[derive(Debug)]
pub struct PathModel {
    compiled: CompiledTemplate,
}

/// Configures and builds a [`PathModel`].
///
/// Created by [`PathModel::builder`]. All validation happens in
/// [`build`](PathModelBuilder::build), so configuration calls cannot fail.
#[derive(Debug)]
pub struct PathModelBuilder {
    template: String,
    fields: BTreeMap<String, FieldSpec>,
    default_field: FieldSpec,
    parent_template: Option<String>,
}

impl PathModelBuilder {
    fn new(template: String) -> Self {
        Self {
            template,
            fields: BTreeMap::new(),
            default_field: FieldSpec::default(),
            parent_template: None,
        }
    }

    /// Set the spec for one placeholder.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Set specs for several placeholders at once.
    pub fn fields<I, N>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (N, FieldSpec)>,
        N: Into<String>,
    {
        for (name, spec) in fields {
            self.fields.insert(name.into(), spec);
        }
        self
    }

    /// Set the spec applied to placeholders without an explicit entry.
    ///
    /// Defaults to [`FieldSpec::default`], the generic name pattern.
    pub fn default_field(mut self, spec: FieldSpec) -> Self {
        self.default_field = spec;
        self
    }

    /// Set a custom parent template for
    /// [`get_parent_path`](PathModel::get_parent_path).
    ///
    /// Must be a prefix of the full template. Defaults to the template's
    /// directory portion (everything before the last `/`).
    pub fn parent_template(mut self, parent: impl Into<String>) -> Self {
        self.parent_template = Some(parent.into());
        self
    }

    /// Compile the template and produce the model.
    pub fn build(self) -> Result<PathModel, TemplateError> {
        let compiled = compile(
            &self.template,
            &self.fields,
            &self.default_field,
            self.parent_template.as_deref(),
        )?;
        Ok(PathModel { compiled })
    }
}

impl PathModel {
    /// Compile a template with default field specs for every placeholder.
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        Self::builder(template).build()
    }

    /// Start configuring a model for the given template.
    pub fn builder(template: impl Into<String>) -> PathModelBuilder {
        PathModelBuilder::new(template.into())
    }

    /// The original template string.
    pub fn template(&self) -> &str {
        &self.compiled.template
    }

    /// The parent template used by [`get_parent_path`](Self::get_parent_path).
    pub fn parent_template(&self) -> &str {
        &self.compiled.parent_template
    }

    /// Field names in template order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.compiled.fields.iter().map(|field| field.name.as_str())
    }

    /// Render a path from one value per template field.
    ///
    /// Every declared field requires a value ([`PathError::MissingField`]
    /// otherwise); values for undeclared names are rejected
    /// ([`PathError::UnknownField`]). Rendered values must satisfy their
    /// field's pattern ([`PathError::FieldValue`]).
    pub fn get_path(&self, values: &FieldValues) -> Result<String, PathError> {
        for (name, _) in values.iter() {
            if self.compiled.field_index(name).is_none() {
                return Err(PathError::UnknownField {
                    field: name.to_string(),
                    template: self.compiled.template.clone(),
                });
            }
        }
        self.render(&self.compiled.segments, values)
    }

    /// Render the containing-directory path from a prefix of field values.
    ///
    /// Walks the parent template's segments. If a parent field has no
    /// supplied value, the parent path is truncated just before it and any
    /// trailing separator is trimmed; supplying values for fields at or
    /// beyond the truncation point (or outside the parent template
    /// entirely) is a [`PathError::UnknownField`] error.
    pub fn get_parent_path(&self, values: &FieldValues) -> Result<String, PathError> {
        let compiled = &self.compiled;
        let mut used: Vec<Segment> = Vec::new();
        let mut truncated = false;
        for segment in &compiled.parent_segments {
            match segment {
                Segment::Field(idx) if !values.contains(&compiled.fields[*idx].name) => {
                    truncated = true;
                    break;
                }
                segment => used.push(segment.clone()),
            }
        }

        for (name, _) in values.iter() {
            let usable = used.iter().any(|segment| {
                matches!(segment, Segment::Field(idx) if compiled.fields[*idx].name == name)
            });
            if !usable {
                return Err(PathError::UnknownField {
                    field: name.to_string(),
                    template: compiled.parent_template.clone(),
                });
            }
        }

        let mut path = self.render(&used, values)?;
        if truncated {
            while path.len() > 1 && path.ends_with('/') {
                path.pop();
            }
        }
        Ok(path)
    }

    /// Extract field values from a candidate path string.
    ///
    /// The whole string must match the template's literal structure and
    /// per-field patterns ([`PathError::PathMismatch`] otherwise). Fields
    /// with a date/datetime format are decoded into typed values; a
    /// capture that matched syntactically but does not decode (e.g. month
    /// out of range) is a [`PathError::FieldDecode`] error. Values are
    /// returned in template order.
    pub fn parse_path(&self, path: &str) -> Result<FieldValues, PathError> {
        let mismatch = || PathError::PathMismatch {
            path: path.to_string(),
            pattern: self.compiled.regex.as_str().to_string(),
        };
        let captures = self.compiled.regex.captures(path).ok_or_else(&mismatch)?;

        let mut values = FieldValues::new();
        for field in &self.compiled.fields {
            let capture = captures.name(&field.name).ok_or_else(&mismatch)?;
            values.insert(field.name.clone(), decode_field(field, capture.as_str())?);
        }
        Ok(values)
    }

    /// Check that rendering the given values and parsing the result
    /// recovers them exactly.
    ///
    /// This is the preferred way to verify that a model's pattern/format
    /// pairs are mutually consistent.
    pub fn check_fields_round_trip(&self, values: &FieldValues) -> Result<(), PathError> {
        let path = self.get_path(values)?;
        let parsed = self.parse_path(&path)?;
        if parsed != *values {
            return Err(PathError::RoundTrip {
                left: describe(values),
                right: describe(&parsed),
            });
        }
        Ok(())
    }

    /// Check that parsing the given path and re-rendering the values
    /// rebuilds the identical string.
    pub fn check_path_round_trip(&self, path: &str) -> Result<(), PathError> {
        let values = self.parse_path(path)?;
        let rebuilt = self.get_path(&values)?;
        if rebuilt != path {
            return Err(PathError::RoundTrip {
                left: path.to_string(),
                right: rebuilt,
            });
        }
        Ok(())
    }

    /// Render a segment run, requiring a value for every field in it.
    fn render(&self, segments: &[Segment], values: &FieldValues) -> Result<String, PathError> {
        let mut path = String::new();
        for segment in segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Field(idx) => {
                    let field = &self.compiled.fields[*idx];
                    let value =
                        values
                            .get(&field.name)
                            .ok_or_else(|| PathError::MissingField {
                                field: field.name.clone(),
                                template: self.compiled.template.clone(),
                            })?;
                    path.push_str(&render_field(field, value)?);
                }
            }
        }
        Ok(path)
    }
}

/// Render one value under its field's codec and validate the result
/// against the field pattern.
fn render_field(field: &BoundField, value: &FieldValue) -> Result<String, PathError> {
    let rendered = match (&field.codec, value) {
        (ValueCodec::Plain, FieldValue::Text(text)) => text.clone(),
        // Plain fields accept typed values via their canonical rendering.
        (ValueCodec::Plain, FieldValue::Date(date)) => date.to_string(),
        (ValueCodec::Plain, FieldValue::DateTime(datetime)) => datetime.to_string(),
        (ValueCodec::Date(format), FieldValue::Date(date)) => {
            render_formatted(field, format, date.format(format))?
        }
        (ValueCodec::DateTime(format), FieldValue::DateTime(datetime)) => {
            render_formatted(field, format, datetime.format(format))?
        }
        (ValueCodec::Date(_), other) => {
            return Err(PathError::FieldValue {
                field: field.name.clone(),
                reason: format!("expected a date value, got {}", other.kind()),
            })
        }
        (ValueCodec::DateTime(_), other) => {
            return Err(PathError::FieldValue {
                field: field.name.clone(),
                reason: format!("expected a datetime value, got {}", other.kind()),
            })
        }
    };
    if !field.exact.is_match(&rendered) {
        return Err(PathError::FieldValue {
            field: field.name.clone(),
            reason: format!(
                "rendered value '{rendered}' does not match pattern '{}'",
                field.pattern
            ),
        });
    }
    Ok(rendered)
}

/// Drive a chrono `DelayedFormat` through `write!` so an invalid format
/// string surfaces as an error instead of a panic.
fn render_formatted(
    field: &BoundField,
    format: &str,
    display: impl std::fmt::Display,
) -> Result<String, PathError> {
    let mut rendered = String::new();
    write!(rendered, "{display}").map_err(|_| PathError::FieldValue {
        field: field.name.clone(),
        reason: format!("'{format}' is not a valid format string"),
    })?;
    Ok(rendered)
}

/// Decode one captured substring under its field's codec.
fn decode_field(field: &BoundField, raw: &str) -> Result<FieldValue, PathError> {
    match &field.codec {
        ValueCodec::Plain => Ok(FieldValue::text(raw)),
        ValueCodec::Date(format) => NaiveDate::parse_from_str(raw, format)
            .map(FieldValue::Date)
            .map_err(|source| PathError::FieldDecode {
                field: field.name.clone(),
                value: raw.to_string(),
                format: format.clone(),
                source,
            }),
        ValueCodec::DateTime(format) => NaiveDateTime::parse_from_str(raw, format)
            .map(FieldValue::DateTime)
            .map_err(|source| PathError::FieldDecode {
                field: field.name.clone(),
                value: raw.to_string(),
                format: format.clone(),
                source,
            }),
    }
}

fn describe(values: &FieldValues) -> String {
    let entries: Vec<String> = values
        .iter()
        .map(|(name, value)| format!("{name}={value:?}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
