//! Display name normalization
//!
//! Source listings carry identifier suffixes such as `"ABC College (Id: C-123)"`.
//! [`normalize_name`] strips them so clients receive the plain institution name.

use once_cell::sync::Lazy;
use regex::Regex;

/// `:` up to and including the next `)`
static COLON_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i):[^)]*\)").expect("valid colon annotation pattern"));

/// Literal `(Id` marker left behind once the annotation is gone
static ID_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(id").expect("valid id marker pattern"));

/// Strips identifier annotations from a raw display name.
///
/// Removes every `:...)` annotation, every `(Id` marker (both
/// case-insensitive) and surrounding whitespace. Names without the
/// pattern come back trimmed and otherwise unchanged.
///
/// The passes repeat until nothing changes, so the result is a fixpoint:
/// `normalize_name(&normalize_name(s)) == normalize_name(s)`.
///
/// # Examples
///
/// ```
/// use edudir_core::normalizer::normalize_name;
///
/// assert_eq!(normalize_name("ABC College (Id:12)"), "ABC College");
/// assert_eq!(normalize_name("  XYZ Inst  "), "XYZ Inst");
/// ```
pub fn normalize_name(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_once(name: &str) -> String {
    let without_annotation = COLON_ANNOTATION.replace_all(name, "");
    let without_marker = ID_MARKER.replace_all(&without_annotation, "");
    without_marker.trim().to_string()
}
