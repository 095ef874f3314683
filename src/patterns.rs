//! Reusable validation patterns for template fields.
//!
//! A small, closed catalog of non-greedy regular-expression fragments that
//! cover the common shapes of path components. They are plain constants:
//! use them directly when building a [`FieldSpec`](crate::FieldSpec), or
//! reference them by catalog name via [`FieldSpec::catalog`](crate::FieldSpec::catalog).
//! Extending the catalog is a source change, not a runtime operation.
//!
//! All fragments are non-greedy so that adjacent fields separated by a
//! literal split at the first opportunity rather than swallowing it.

/// Directory- and file-name-safe characters, including the `-`, `_`, and
/// `.` separators commonly used inside names.
pub const NAME: &str = r"[-_.a-zA-Z0-9]+?";

/// Like [`NAME`] but also allowing the `/` directory separator, for fields
/// that span several path components.
pub const PATH: &str = r"[-_.a-zA-Z0-9/]+?";

/// Generic field characters without any separator, for fields embedded in
/// a larger file name (`{date}_{name}.{ext}`).
pub const FIELD: &str = r"[a-zA-Z0-9]+?";

/// File-extension characters, with dots allowed for compound extensions
/// such as `tar.gz`.
pub const EXTENSION: &str = r"[.a-zA-Z0-9]+?";

/// The catalog itself: the single source of truth for by-name lookup.
pub const CATALOG: &[(&str, &str)] = &[
    ("name", NAME),
    ("path", PATH),
    ("field", FIELD),
    ("extension", EXTENSION),
];

/// Look up a catalog pattern by name.
pub fn lookup(name: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, pattern)| *pattern)
}
