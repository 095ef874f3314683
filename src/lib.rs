//! # pathform
//!
//! Declarative, bidirectional path templating. Define a path's structure
//! once as a template of literal text and `{name}` placeholders, attach
//! per-field validation patterns and optional date/datetime encodings,
//! and use the compiled model both ways: render concrete paths from field
//! values, and parse field values back out of concrete paths.
//!
//! The crate is purely computational: no filesystem I/O, no path
//! normalization, no OS-specific semantics. A compiled [`PathModel`] is
//! immutable and safe to share across threads.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  PathModel (model.rs)                                   │
//! │  - get_path / get_parent_path / parse_path              │
//! │  - round-trip checks                                    │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  Template compiler (template.rs)                        │
//! │  - tokenizes `{name}` placeholders                      │
//! │  - binds each field to its spec, validates uniqueness   │
//! │  - builds the anchored matching expression              │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  Field specs (field.rs) + pattern catalog (patterns.rs) │
//! │  - per-placeholder pattern and value codec              │
//! │  - reusable named pattern fragments                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pathform::{FieldSpec, FieldValue, FieldValues, PathModel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = PathModel::builder("/{base_folder}/{subfolder}/{base_name}__{suffix}.{extension}")
//!     .field(
//!         "suffix",
//!         FieldSpec::new(r"\d{4}-\d{2}-\d{2}").with_date_format("%Y-%m-%d"),
//!     )
//!     .field("extension", FieldSpec::catalog("extension"))
//!     .build()?;
//!
//! // Fields → path
//! let values = FieldValues::from([
//!     ("base_folder", FieldValue::text("data")),
//!     ("subfolder", FieldValue::text("reports")),
//!     ("base_name", FieldValue::text("summary")),
//!     ("suffix", FieldValue::date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())),
//!     ("extension", FieldValue::text("csv")),
//! ]);
//! let path = model.get_path(&values)?;
//! assert_eq!(path, "/data/reports/summary__2025-12-31.csv");
//!
//! // Path → fields, with the date decoded back into a typed value
//! let parsed = model.parse_path(&path)?;
//! assert_eq!(parsed, values);
//!
//! // Directory portion only, without the file-specific fields
//! let parent = model.get_parent_path(&FieldValues::from([
//!     ("base_folder", FieldValue::text("data")),
//!     ("subfolder", FieldValue::text("reports")),
//! ]))?;
//! assert_eq!(parent, "/data/reports");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module overview
//!
//! - [`model`]: the [`PathModel`] aggregate and its builder
//! - [`field`]: [`FieldSpec`] configuration per placeholder
//! - [`patterns`]: the catalog of reusable pattern fragments
//! - [`value`]: [`FieldValue`] and the ordered [`FieldValues`] map
//! - [`error`]: construction-time and call-time error types

pub mod error;
pub mod field;
pub mod model;
pub mod patterns;
pub mod value;

mod template;

pub use error::{PathError, TemplateError};
pub use field::{FieldSpec, PatternRef, ValueCodec};
pub use model::{PathModel, PathModelBuilder};
pub use value::{FieldValue, FieldValues};
