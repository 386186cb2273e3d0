use thiserror::Error;

use crate::orbit_type::OrbitType;

/// Errors returned by the astrocalc library.
///
/// The error discipline is two-layered: low-level vector-algebra helpers may
/// return NaN for genuinely undefined angles (documented on each helper), but
/// every public conversion or solver entry point translates an ill-defined
/// geometry into an explicit [`AstroError::UnsupportedOrbitGeometry`] instead
/// of handing back a NaN-laden result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    #[error("{operation} is undefined for a {orbit_type} orbit")]
    UnsupportedOrbitGeometry {
        orbit_type: OrbitType,
        operation: &'static str,
    },

    #[error("{solver} failed to converge after {iterations} iterations (last residual: {residual:e})")]
    NonConvergence {
        solver: &'static str,
        iterations: usize,
        residual: f64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown planetary body: {name} (valid bodies: {valid})")]
    UnknownBody { name: String, valid: String },

    #[error("Propagation failed at t = {t} s: {reason}")]
    PropagationFailed { t: f64, reason: String },
}

impl AstroError {
    /// Build an [`AstroError::InvalidInput`] for a non-finite named quantity.
    pub(crate) fn non_finite(name: &str, value: f64) -> Self {
        AstroError::InvalidInput(format!("{name} is not finite: {value}"))
    }
}

#[cfg(test)]
mod errors_test {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AstroError::UnsupportedOrbitGeometry {
            orbit_type: OrbitType::Circular,
            operation: "argument of perigee",
        };
        assert_eq!(
            err.to_string(),
            "argument of perigee is undefined for a Circular orbit"
        );

        let err = AstroError::NonConvergence {
            solver: "gauss",
            iterations: 100,
            residual: 0.5,
        };
        assert!(err.to_string().contains("100 iterations"));
    }
}
