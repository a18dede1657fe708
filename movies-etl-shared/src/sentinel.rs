//! Handling of the "value not available" placeholder used by the source data.
//!
//! The relational source stores missing values as the literal string `N/A`
//! instead of `NULL`. Everything past the transformation boundary works with
//! `Option` instead, so the comparison lives here and nowhere else.

/// Placeholder the source uses for "value not available".
pub const UNKNOWN_MARKER: &str = "N/A";

/// Returns `None` when the raw value is the unknown marker.
///
/// # Example
///
/// ```
/// use movies_etl_shared::known;
///
/// assert_eq!(known("8.5"), Some("8.5"));
/// assert_eq!(known("N/A"), None);
/// ```
pub fn known(raw: &str) -> Option<&str> {
    if raw == UNKNOWN_MARKER {
        None
    } else {
        Some(raw)
    }
}
