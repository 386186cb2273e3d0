//! # Constants and type definitions for astrocalc
//!
//! This module centralizes the **conversion factors** and **common type
//! definitions** used throughout the `astrocalc` library.
//!
//! ## Overview
//!
//! - Angular conversion factors (degrees ↔ radians)
//! - Core type aliases used across the crate
//!
//! All orbital routines work internally in radians and in whatever consistent
//! length/time unit set the caller chose through the gravitational parameter μ
//! (kilometers and seconds, or canonical units with μ = 1).

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Speed in kilometers per second
pub type KmPerSec = f64;
/// Duration in seconds
pub type Seconds = f64;

/// Angular unit carried by an [`crate::elements::OrbitalElements`] instance.
///
/// Every element set stores its angles consistently in exactly one unit;
/// conversion happens only at construction boundaries, never field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    /// Angles expressed in degrees (default at public entry points).
    #[default]
    Degrees,
    /// Angles expressed in radians (internal computation unit).
    Radians,
}

impl AngleUnit {
    /// Convert `angle` from this unit into radians.
    pub fn to_radians(&self, angle: f64) -> Radian {
        match self {
            AngleUnit::Degrees => angle * RADEG,
            AngleUnit::Radians => angle,
        }
    }

    /// Convert `angle` in radians into this unit.
    pub fn from_radians(&self, angle: Radian) -> f64 {
        match self {
            AngleUnit::Degrees => angle / RADEG,
            AngleUnit::Radians => angle,
        }
    }
}
