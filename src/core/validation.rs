//! Input validation for catalog entries.

use crate::error::{ConfigError, Result};

/// Validate an identity name.
///
/// Names are compared byte for byte and written verbatim into the workspace
/// marker, so they must be non-empty and free of control characters.
///
/// # Errors
///
/// Returns `ConfigError` if the name is empty or contains control characters.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::MissingField { field: "name" }.into());
    }

    if let Some((i, ch)) = name.char_indices().find(|(_, c)| c.is_control()) {
        return Err(ConfigError::InvalidValue {
            field: "name",
            reason: format!("control character {:?} at position {}", ch, i + 1),
        }
        .into());
    }

    Ok(())
}
