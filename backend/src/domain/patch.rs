//! Patch helpers shared by the update operations.
//!
//! A string field in an update request only takes effect when it is present
//! and non-blank. Absent fields and blank strings leave the stored value alone.

/// Whether `value` carries no visible characters.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// The incoming text when it should replace the stored value.
pub fn meaningful(incoming: Option<String>) -> Option<String> {
    incoming.filter(|value| !is_blank(value))
}

/// Overwrite `target` with `incoming` when it is meaningful.
///
/// Returns whether the target changed.
pub fn apply_text(target: &mut String, incoming: Option<String>) -> bool {
    match meaningful(incoming) {
        Some(value) => {
            *target = value;
            true
        }
        None => false,
    }
}

/// Optional-field counterpart of [`apply_text`].
pub fn apply_optional_text(target: &mut Option<String>, incoming: Option<String>) -> bool {
    match meaningful(incoming) {
        Some(value) => {
            *target = Some(value);
            true
        }
        None => false,
    }
}

/// Overwrite `target` with `incoming` when present.
pub fn apply_value<T>(target: &mut T, incoming: Option<T>) -> bool {
    match incoming {
        Some(value) => {
            *target = value;
            true
        }
        None => false,
    }
}
