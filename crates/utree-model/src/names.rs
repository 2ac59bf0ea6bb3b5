//! Resource name validation.
//!
//! Valid resource names:
//! - Must be non-empty
//! - Must not contain `/` or NUL
//! - Must not be `.` or `..`

use crate::error::{ModelError, ModelResult};

/// Characters that are forbidden anywhere in a resource name.
const FORBIDDEN_CHARS: &[char] = &['/', '\0'];

/// Validate a single resource name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use utree_model::names::validate_resource_name;
///
/// assert!(validate_resource_name("main.rs").is_ok());
/// assert!(validate_resource_name("").is_err());
/// assert!(validate_resource_name("a/b").is_err());
/// ```
pub fn validate_resource_name(name: &str) -> ModelResult<()> {
    if name.is_empty() {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "resource name must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(ModelError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    if name == "." || name == ".." {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "must not be a relative segment".into(),
        });
    }

    Ok(())
}
