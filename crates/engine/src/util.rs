//! Internal helpers shared by the query modules.
//!
//! These utilities are **not** part of the public API.

/// Trimmed value, or `None` when absent or whitespace-only.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Case-insensitive key used to match and group categories.
pub(crate) fn category_key(category: &str) -> String {
    category.to_lowercase()
}
