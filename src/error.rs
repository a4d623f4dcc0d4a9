//! Errors returned when an edit cannot be recorded.

use thiserror::Error;

/// Reason an insert or delete was rejected. A rejected edit leaves the map
/// untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AppendError {
    /// The edit length was zero or negative.
    #[error("edit length must be positive, got {0}")]
    NonPositiveLength(i64),

    /// The edit position was negative.
    #[error("edit position must not be negative, got {0}")]
    NegativePosition(i64),
}

/// Validate raw append arguments. Length is checked before position.
pub(crate) fn validate(position: i64, length: i64) -> Result<(u64, u64), AppendError> {
    if length <= 0 {
        return Err(AppendError::NonPositiveLength(length));
    }
    if position < 0 {
        return Err(AppendError::NegativePosition(position));
    }
    return Ok((position as u64, length as u64));
}
