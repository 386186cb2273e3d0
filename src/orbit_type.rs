//! # Orbit classification
//!
//! A Keplerian orbit is classified from the triple (eccentricity, specific
//! energy, semi-major axis). The predicate table is evaluated in a fixed
//! order, first match wins; any input that satisfies no predicate (including
//! NaN in any slot) is [`OrbitType::Undefined`].
//!
//! | type       | predicate                          |
//! |------------|------------------------------------|
//! | Circular   | e = 0 ∧ energy < 0 ∧ a > 0         |
//! | Elliptical | 0 < e < 1 ∧ energy < 0 ∧ a > 0     |
//! | Parabolic  | e = 1 ∧ energy = 0                 |
//! | Hyperbolic | e > 1 ∧ energy > 0 ∧ a < 0         |
//!
//! Classification is a pure function; there is no classifier object and no
//! state mixed into the element or converter types.

use std::fmt;

/// Conic class of a Keplerian orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitType {
    Circular,
    Elliptical,
    Parabolic,
    Hyperbolic,
    Undefined,
}

impl fmt::Display for OrbitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrbitType::Circular => "Circular",
            OrbitType::Elliptical => "Elliptical",
            OrbitType::Parabolic => "Parabolic",
            OrbitType::Hyperbolic => "Hyperbolic",
            OrbitType::Undefined => "Undefined",
        };
        write!(f, "{name}")
    }
}

/// Classify an orbit from eccentricity, specific energy and semi-major axis.
///
/// Total over all `f64` inputs: NaN fails every predicate and yields
/// [`OrbitType::Undefined`].
pub fn classify(eccentricity: f64, energy: f64, semi_major_axis: f64) -> OrbitType {
    if eccentricity == 0.0 && energy < 0.0 && semi_major_axis > 0.0 {
        OrbitType::Circular
    } else if eccentricity > 0.0 && eccentricity < 1.0 && energy < 0.0 && semi_major_axis > 0.0 {
        OrbitType::Elliptical
    } else if eccentricity == 1.0 && energy == 0.0 {
        OrbitType::Parabolic
    } else if eccentricity > 1.0 && energy > 0.0 && semi_major_axis < 0.0 {
        OrbitType::Hyperbolic
    } else {
        OrbitType::Undefined
    }
}

#[cfg(test)]
mod orbit_type_test {
    use super::*;

    #[test]
    fn test_classify_table() {
        assert_eq!(classify(0.0, -1.0, 1.0), OrbitType::Circular);
        assert_eq!(classify(0.5, -1.0, 1.0), OrbitType::Elliptical);
        assert_eq!(classify(1.0, 0.0, f64::NAN), OrbitType::Parabolic);
        assert_eq!(classify(1.5, 1.0, -1.0), OrbitType::Hyperbolic);
    }

    #[test]
    fn test_classify_boundaries() {
        // e = 0 with non-negative energy is not circular
        assert_eq!(classify(0.0, 0.0, 1.0), OrbitType::Undefined);
        // e = 1 with non-zero energy is neither elliptical nor parabolic
        assert_eq!(classify(1.0, -0.1, 1.0), OrbitType::Undefined);
        assert_eq!(classify(1.0, 0.1, -1.0), OrbitType::Undefined);
        // energy = 0 boundary only matches the parabolic row
        assert_eq!(classify(0.5, 0.0, 1.0), OrbitType::Undefined);
        // inconsistent sign combinations fall through
        assert_eq!(classify(0.5, -1.0, -1.0), OrbitType::Undefined);
        assert_eq!(classify(2.0, -1.0, -1.0), OrbitType::Undefined);
    }

    #[test]
    fn test_classify_total_on_nan() {
        assert_eq!(classify(f64::NAN, -1.0, 1.0), OrbitType::Undefined);
        assert_eq!(classify(0.5, f64::NAN, 1.0), OrbitType::Undefined);
        assert_eq!(classify(0.5, -1.0, f64::NAN), OrbitType::Undefined);
    }
}
