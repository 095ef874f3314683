//! Error types.
//!
//! Errors are split by lifecycle: [`TemplateError`] covers everything that
//! can go wrong while building a model (bad template syntax, contradictory
//! field configuration), [`PathError`] covers everything that can go wrong
//! while rendering or parsing a path. Callers can therefore validate their
//! templates once at startup and treat [`PathError`] as a data problem.

use thiserror::Error;

/// Construction-time errors raised while compiling a template.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template string itself is malformed (stray brace, unterminated
    /// placeholder).
    #[error("invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// A placeholder name is not usable as a capture-group identifier.
    #[error(
        "invalid field name '{name}': names must start with a letter and \
         contain only letters, digits, and underscores"
    )]
    InvalidFieldName { name: String },

    /// The same placeholder name appears twice in one template.
    #[error("duplicate field '{field}' in template '{template}'")]
    DuplicateField { field: String, template: String },

    /// An explicit field spec was supplied for a name the template never uses.
    #[error("field config '{field}' does not appear in template '{template}'")]
    UnusedFieldConfig { field: String, template: String },

    /// A field spec is contradictory or empty.
    #[error("invalid config for field '{field}': {reason}")]
    InvalidFieldConfig { field: String, reason: String },

    /// A field spec references a pattern-catalog name that does not exist.
    #[error("unknown catalog pattern '{name}' referenced by field '{field}'")]
    UnknownPattern { field: String, name: String },

    /// A field's pattern fragment is not a valid regular expression.
    #[error("pattern for field '{field}' does not compile")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A custom parent template is not a leading portion of the template.
    #[error("parent template '{parent}' is not a prefix of template '{template}'")]
    ParentTemplateMismatch { parent: String, template: String },
}

/// Call-time errors raised while rendering or parsing paths.
#[derive(Error, Debug)]
pub enum PathError {
    /// A field declared by the template has no supplied value.
    #[error("missing value for field '{field}' required by template '{template}'")]
    MissingField { field: String, template: String },

    /// A value was supplied for a field the template (or the portion of it
    /// being rendered) does not declare.
    #[error("unknown field '{field}': template '{template}' does not declare it")]
    UnknownField { field: String, template: String },

    /// A supplied value cannot be rendered under its field's configuration:
    /// wrong value type for a date/datetime field, a rendered string that
    /// violates the field pattern, or an unusable format string.
    #[error("invalid value for field '{field}': {reason}")]
    FieldValue { field: String, reason: String },

    /// The candidate path does not match the template's literal structure
    /// or per-field patterns.
    #[error("path '{path}' does not match pattern '{pattern}'")]
    PathMismatch { path: String, pattern: String },

    /// A field matched syntactically but its text does not decode as the
    /// configured date/datetime (e.g. a month out of calendar range).
    #[error("field '{field}' value '{value}' does not decode with format '{format}'")]
    FieldDecode {
        field: String,
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A render/parse cycle did not reproduce its input.
    #[error("round trip mismatch: {left} != {right}")]
    RoundTrip { left: String, right: String },
}
