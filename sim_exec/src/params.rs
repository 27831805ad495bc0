//! # Parameter validation
//!
//! Every parameter structure in the simulator is checked once, when the
//! simulation is built. Nothing is re-checked per tick, so anything that
//! could divide by zero or produce a NaN must be rejected here.

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A parameter which would make the simulation degenerate.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("Parameter `{0}` must be finite, found {1}")]
    NotFinite(&'static str, f64),

    #[error("Parameter `{0}` must be greater than zero, found {1}")]
    NotPositive(&'static str, f64),

    #[error("Parameter `{0}` must not be negative, found {1}")]
    Negative(&'static str, f64),

    #[error("Parameter `{0}` must be at most {2}, found {1}")]
    TooLarge(&'static str, f64, f64),

    #[error(
        "Track thickness ({thickness_cm} cm) must be less than the smallest semi-axis \
        ({min_semi_axis_cm} cm), otherwise the inner boundary degenerates"
    )]
    ThicknessTooLarge {
        thickness_cm: f64,
        min_semi_axis_cm: f64,
    },
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Check the value is finite.
pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64, ParamsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamsError::NotFinite(name, value))
    }
}

/// Check the value is finite and strictly positive.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64, ParamsError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ParamsError::NotPositive(name, value))
    }
}

/// Check the value is finite and not negative.
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64, ParamsError> {
    check_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ParamsError::Negative(name, value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_checks() {
        assert_eq!(check_positive("dt", 0.01), Ok(0.01));
        assert_eq!(check_positive("dt", 0.0), Err(ParamsError::NotPositive("dt", 0.0)));
        assert!(matches!(
            check_positive("dt", std::f64::INFINITY),
            Err(ParamsError::NotFinite("dt", _))
        ));
        assert_eq!(check_non_negative("w", 0.0), Ok(0.0));
        assert_eq!(check_non_negative("w", -1.0), Err(ParamsError::Negative("w", -1.0)));
        // NaN is caught before the sign checks
        assert!(matches!(
            check_non_negative("w", std::f64::NAN),
            Err(ParamsError::NotFinite("w", _))
        ));
    }
}
