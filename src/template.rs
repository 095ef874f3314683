//! Template compilation.
//!
//! Turns a template string such as `/{domain}/{layer}/{date}_{name}.{ext}`
//! into an immutable [`CompiledTemplate`]: an ordered list of literal and
//! field segments, the per-field binding table, and a single anchored
//! regular expression that matches conforming paths with one named capture
//! group per field.
//!
//! Grammar: literal text interleaved with `{name}` placeholders. `{{` and
//! `}}` are escaped literal braces. No nesting, no alternation. Placeholder
//! names must be usable as capture-group identifiers (a letter followed by
//! letters, digits, or underscores) and unique within a template.
//!
//! Adjacent fields with overlapping patterns are resolved by the regex
//! engine's leftmost-greedy semantics; choosing sufficiently disjoint
//! patterns is the caller's responsibility.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::TemplateError;
use crate::field::{FieldSpec, ValueCodec};

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Literal text, copied verbatim into generated paths.
    Literal(String),
    /// A field, stored as an index into [`CompiledTemplate::fields`].
    Field(usize),
}

/// A field bound into a compiled template.
#[derive(Debug)]
pub(crate) struct BoundField {
    pub(crate) name: String,
    /// Resolved pattern fragment.
    pub(crate) pattern: String,
    pub(crate) codec: ValueCodec,
    /// The fragment anchored start-to-end, for validating rendered values.
    pub(crate) exact: Regex,
}

/// The parsed, validated, immutable representation of a template.
///
/// Built once per [`PathModel`](crate::PathModel) and never mutated.
#[derive(Debug)]
pub(crate) struct CompiledTemplate {
    pub(crate) template: String,
    pub(crate) segments: Vec<Segment>,
    /// Bound fields in template order.
    pub(crate) fields: Vec<BoundField>,
    /// Anchored matching expression for the whole template.
    pub(crate) regex: Regex,
    pub(crate) parent_template: String,
    /// Segments of the parent template, referencing the same field table.
    pub(crate) parent_segments: Vec<Segment>,
}

impl CompiledTemplate {
    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

/// A token produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum RawToken {
    Literal(String),
    Placeholder(String),
}

/// Split a template string into literal text and `{name}` placeholders.
fn tokenize(template: &str) -> Result<Vec<RawToken>, TemplateError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                if !literal.is_empty() {
                    tokens.push(RawToken::Literal(std::mem::take(&mut literal)));
                }
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(TemplateError::InvalidTemplate {
                        template: template.to_string(),
                        reason: format!("unterminated placeholder '{{{name}'"),
                    });
                }
                validate_field_name(&name)?;
                tokens.push(RawToken::Placeholder(name));
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    literal.push('}');
                    continue;
                }
                return Err(TemplateError::InvalidTemplate {
                    template: template.to_string(),
                    reason: "stray '}' outside a placeholder".to_string(),
                });
            }
            other => literal.push(other),
        }
    }
    if !literal.is_empty() {
        tokens.push(RawToken::Literal(literal));
    }
    Ok(tokens)
}

/// Placeholder names double as regex capture-group names, so they are
/// restricted to a letter followed by letters, digits, or underscores.
fn validate_field_name(name: &str) -> Result<(), TemplateError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TemplateError::InvalidFieldName {
            name: name.to_string(),
        })
    }
}

/// The default parent template: the directory portion of the template,
/// i.e. everything before the last `/`.
fn default_parent(template: &str) -> String {
    match template.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => template[..idx].to_string(),
        None => String::new(),
    }
}

/// Concatenate escaped literals and named per-field groups into the
/// anchored matching expression.
fn build_matcher(
    template: &str,
    segments: &[Segment],
    fields: &[BoundField],
) -> Result<Regex, TemplateError> {
    let mut pattern = String::from("^");
    for segment in segments {
        match segment {
            Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
            Segment::Field(idx) => {
                let field = &fields[*idx];
                pattern.push_str(&format!("(?P<{}>{})", field.name, field.pattern));
            }
        }
    }
    pattern.push('$');
    Regex::new(&pattern).map_err(|err| TemplateError::InvalidTemplate {
        template: template.to_string(),
        reason: format!("matching expression '{pattern}' does not compile: {err}"),
    })
}

/// Compile a template string against its explicit field specs.
pub(crate) fn compile(
    template: &str,
    explicit: &BTreeMap<String, FieldSpec>,
    default_field: &FieldSpec,
    parent_template: Option<&str>,
) -> Result<CompiledTemplate, TemplateError> {
    let mut segments = Vec::new();
    let mut fields: Vec<BoundField> = Vec::new();

    for token in tokenize(template)? {
        match token {
            RawToken::Literal(text) => segments.push(Segment::Literal(text)),
            RawToken::Placeholder(name) => {
                if fields.iter().any(|field| field.name == name) {
                    return Err(TemplateError::DuplicateField {
                        field: name,
                        template: template.to_string(),
                    });
                }
                let spec = explicit.get(&name).unwrap_or(default_field);
                let pattern = spec.resolve(&name)?.to_string();
                let exact = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                    TemplateError::InvalidPattern {
                        field: name.clone(),
                        source,
                    }
                })?;
                fields.push(BoundField {
                    name,
                    pattern,
                    codec: spec.codec().clone(),
                    exact,
                });
                segments.push(Segment::Field(fields.len() - 1));
            }
        }
    }

    for name in explicit.keys() {
        if !fields.iter().any(|field| field.name == *name) {
            return Err(TemplateError::UnusedFieldConfig {
                field: name.clone(),
                template: template.to_string(),
            });
        }
    }

    let regex = build_matcher(template, &segments, &fields)?;

    let parent_template = match parent_template {
        Some(parent) => {
            if !template.starts_with(parent) {
                return Err(TemplateError::ParentTemplateMismatch {
                    parent: parent.to_string(),
                    template: template.to_string(),
                });
            }
            parent.to_string()
        }
        None => default_parent(template),
    };

    let mut parent_segments = Vec::new();
    for token in tokenize(&parent_template)? {
        match token {
            RawToken::Literal(text) => parent_segments.push(Segment::Literal(text)),
            RawToken::Placeholder(name) => {
                // The prefix check guarantees every parent placeholder is
                // bound in the field table.
                let idx = fields
                    .iter()
                    .position(|field| field.name == name)
                    .ok_or_else(|| TemplateError::ParentTemplateMismatch {
                        parent: parent_template.clone(),
                        template: template.to_string(),
                    })?;
                parent_segments.push(Segment::Field(idx));
            }
        }
    }

    Ok(CompiledTemplate {
        template: template.to_string(),
        segments,
        fields,
        regex,
        parent_template,
        parent_segments,
    })
}
