// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Coin Trial Simulation Suite - Error Types

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the inference pipeline.
///
/// `InvalidParameter` is a caller problem and is raised before any work is
/// done. `InvalidState` means two pipeline stages disagree and indicates a
/// composition defect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl EngineError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }

    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState(reason.into())
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject `value` unless it is a finite number in the closed unit interval.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(EngineError::invalid_parameter(
            name,
            format!("{value} is outside [0, 1]"),
        ));
    }
    Ok(())
}

/// Reject `value` unless it lies strictly between 0 and 1.
pub(crate) fn check_open_unit(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(EngineError::invalid_parameter(
            name,
            format!("{value} is outside (0, 1)"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds_are_inclusive() {
        assert!(check_probability("p", 0.0).is_ok());
        assert!(check_probability("p", 1.0).is_ok());
        assert!(check_probability("p", -0.01).is_err());
        assert!(check_probability("p", 1.01).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn open_unit_excludes_endpoints() {
        assert!(check_open_unit("alpha", 0.05).is_ok());
        assert!(check_open_unit("alpha", 0.0).is_err());
        assert!(check_open_unit("alpha", 1.0).is_err());
    }

    #[test]
    fn display_names_the_parameter() {
        let err = EngineError::invalid_parameter("trial_count", "must be at least 1");
        assert_eq!(err.to_string(), "invalid parameter `trial_count`: must be at least 1");
        assert!(err.is_invalid_parameter());
        assert!(!err.is_invalid_state());
    }
}
