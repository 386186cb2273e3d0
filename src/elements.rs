//! # Classical orbital elements container
//!
//! [`OrbitalElements`] bundles the six classical elements (a, e, i, Ω, ω, θ)
//! with every derived quantity the converters produce: semi-latus rectum,
//! mean motion, specific energy, eccentric/mean anomaly, the compound
//! longitude angles and the defining vectors (r, v, h, e, n) with their
//! magnitudes.
//!
//! ## Undefined is a value
//!
//! Every field defaults to NaN. A NaN field means "not computed" or
//! "ill-defined for this geometry" (for example Ω on an equatorial orbit);
//! it is never silently replaced by zero. Public entry points guarantee that
//! a *canonical* result is never NaN; they fail with
//! [`crate::errors::AstroError::UnsupportedOrbitGeometry`] instead.
//!
//! ## One angular unit per instance
//!
//! Angles inside a single instance are all degrees or all radians, recorded
//! in [`AngleUnit`]; conversion happens only when an instance is built.

use std::fmt;

use nalgebra::Vector3;

use crate::constants::AngleUnit;
use crate::orbit_type::OrbitType;

/// Classical orbital elements plus derived quantities and defining vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElements {
    // Main orbital elements
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_of_perigee: f64,
    pub true_anomaly: f64,

    // Alternate orbital elements
    pub longitude_of_periapsis: f64,
    pub arg_of_latitude: f64,
    pub true_longitude: f64,

    // Other orbital parameters
    pub semi_latus_rectum: f64,
    pub mean_motion: f64,
    pub energy: f64,
    pub eccentric_anomaly: f64,
    pub mean_anomaly: f64,

    // Defining vectors
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub momentum_vector: Vector3<f64>,
    pub eccentricity_vector: Vector3<f64>,
    pub node_vector: Vector3<f64>,

    // Magnitudes
    pub mag_position: f64,
    pub mag_velocity: f64,
    pub mag_momentum: f64,
    pub mag_node: f64,

    /// Unit of every angular field of this instance.
    pub angle_unit: AngleUnit,
    /// Conic class, as determined by [`crate::orbit_type::classify`].
    pub orbit_type: OrbitType,
}

impl Default for OrbitalElements {
    /// An element set with every numeric field set to the NaN sentinel.
    fn default() -> Self {
        let nan3 = Vector3::new(f64::NAN, f64::NAN, f64::NAN);
        OrbitalElements {
            semi_major_axis: f64::NAN,
            eccentricity: f64::NAN,
            inclination: f64::NAN,
            raan: f64::NAN,
            arg_of_perigee: f64::NAN,
            true_anomaly: f64::NAN,
            longitude_of_periapsis: f64::NAN,
            arg_of_latitude: f64::NAN,
            true_longitude: f64::NAN,
            semi_latus_rectum: f64::NAN,
            mean_motion: f64::NAN,
            energy: f64::NAN,
            eccentric_anomaly: f64::NAN,
            mean_anomaly: f64::NAN,
            position: nan3,
            velocity: nan3,
            momentum_vector: nan3,
            eccentricity_vector: nan3,
            node_vector: nan3,
            mag_position: f64::NAN,
            mag_velocity: f64::NAN,
            mag_momentum: f64::NAN,
            mag_node: f64::NAN,
            angle_unit: AngleUnit::Degrees,
            orbit_type: OrbitType::Undefined,
        }
    }
}

impl OrbitalElements {
    /// Build a bare element set from the six classical elements.
    ///
    /// Derived fields stay NaN until a converter fills them; `energy` is left
    /// for the converter as well since it needs μ.
    pub fn from_classical(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        raan: f64,
        arg_of_perigee: f64,
        true_anomaly: f64,
        angle_unit: AngleUnit,
    ) -> Self {
        OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination,
            raan,
            arg_of_perigee,
            true_anomaly,
            angle_unit,
            ..Default::default()
        }
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.angle_unit {
            AngleUnit::Degrees => "deg",
            AngleUnit::Radians => "rad",
        };
        writeln!(f, "Orbital elements ({})", self.orbit_type)?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  a   (semi-major axis)       = {:.6}", self.semi_major_axis)?;
        writeln!(f, "  e   (eccentricity)          = {:.6}", self.eccentricity)?;
        writeln!(f, "  i   (inclination)           = {:.6} {unit}", self.inclination)?;
        writeln!(f, "  Ω   (RAAN)                  = {:.6} {unit}", self.raan)?;
        writeln!(f, "  ω   (argument of perigee)   = {:.6} {unit}", self.arg_of_perigee)?;
        writeln!(f, "  θ   (true anomaly)          = {:.6} {unit}", self.true_anomaly)?;
        writeln!(f, "  p   (semi-latus rectum)     = {:.6}", self.semi_latus_rectum)?;
        writeln!(f, "  n   (mean motion)           = {:.6}", self.mean_motion)?;
        writeln!(f, "  ε   (specific energy)       = {:.6}", self.energy)?;
        writeln!(f, "  E   (eccentric anomaly)     = {:.6} {unit}", self.eccentric_anomaly)?;
        write!(f, "  M   (mean anomaly)          = {:.6} {unit}", self.mean_anomaly)
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;

    #[test]
    fn test_default_is_all_nan() {
        let el = OrbitalElements::default();
        assert!(el.semi_major_axis.is_nan());
        assert!(el.true_anomaly.is_nan());
        assert!(el.mean_motion.is_nan());
        assert!(el.position.iter().all(|c| c.is_nan()));
        assert_eq!(el.orbit_type, OrbitType::Undefined);
    }

    #[test]
    fn test_from_classical_keeps_derived_undefined() {
        let el = OrbitalElements::from_classical(
            8000.0,
            0.1,
            30.0,
            40.0,
            60.0,
            25.0,
            AngleUnit::Degrees,
        );
        assert_eq!(el.semi_major_axis, 8000.0);
        assert_eq!(el.arg_of_perigee, 60.0);
        assert!(el.semi_latus_rectum.is_nan());
        assert!(el.energy.is_nan());
    }
}
