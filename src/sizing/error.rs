//! Error type shared by the load aggregator and panel estimator.

use std::fmt;

/// Errors raised when a sizing input violates its domain constraints.
///
/// Inputs are never clamped; a bad value is reported back to the caller
/// together with the name of the offending field.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// A parameter is outside its allowed range or is not a finite number.
    InvalidInput {
        /// Field name (e.g., `"panel_wattage"` or `"appliances[2].watts"`).
        field: String,
        /// Human-readable constraint description.
        message: String,
    },
}

impl SizingError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }

    /// Constraint description without the field name.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. } => message,
        }
    }
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "invalid input: {field} {message}")
            }
        }
    }
}

impl std::error::Error for SizingError {}

/// Rejects NaN and infinities before any range check runs.
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64, SizingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SizingError::invalid(
            field,
            format!("must be a finite number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field_and_constraint() {
        let err = SizingError::invalid("panel_wattage", "must be > 0");
        assert_eq!(err.to_string(), "invalid input: panel_wattage must be > 0");
        assert_eq!(err.field(), "panel_wattage");
        assert_eq!(err.message(), "must be > 0");
    }

    #[test]
    fn non_finite_values_rejected() {
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
        assert_eq!(ensure_finite("x", 2.5), Ok(2.5));
    }
}
