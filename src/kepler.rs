//! # Kepler's equation and time-of-flight on a conic
//!
//! Anomaly conversions, the series-protected Stumpff functions S(z) and C(z)
//! shared by the Gauss and universal-variable solvers, and the closed-form
//! Kepler time-of-flight between two true anomalies on an ellipse.

use crate::constants::{AngleUnit, DPI};
use crate::errors::AstroError;
use crate::orbit_type::classify;

/// Principal value of an angle, in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Stumpff function S(z) = (√z − sin√z)/√z³, continued through z = 0.
///
/// For |z| < 1e-3 the closed trig/hyperbolic forms lose all significance to
/// catastrophic cancellation; a truncated Maclaurin series is used instead.
pub(crate) fn stumpff_s(z: f64) -> f64 {
    if z.abs() < 1e-3 {
        // S(z) = Σ (-z)^k / (2k+3)!
        let mut s = 1.0 / 6.0;
        let mut term = 1.0 / 6.0;
        for k in 1..=8u32 {
            term *= -z / ((2 * k + 2) as f64 * (2 * k + 3) as f64);
            s += term;
        }
        s
    } else if z > 0.0 {
        let sqrt_z = z.sqrt();
        (sqrt_z - sqrt_z.sin()) / (z * sqrt_z)
    } else {
        let sqrt_mz = (-z).sqrt();
        (sqrt_mz.sinh() - sqrt_mz) / ((-z) * sqrt_mz)
    }
}

/// Stumpff function C(z) = (1 − cos√z)/z, continued through z = 0.
pub(crate) fn stumpff_c(z: f64) -> f64 {
    if z.abs() < 1e-3 {
        // C(z) = Σ (-z)^k / (2k+2)!
        let mut c = 0.5;
        let mut term = 0.5;
        for k in 1..=8u32 {
            term *= -z / ((2 * k + 1) as f64 * (2 * k + 2) as f64);
            c += term;
        }
        c
    } else if z > 0.0 {
        let sqrt_z = z.sqrt();
        (1.0 - sqrt_z.cos()) / z
    } else {
        (1.0 - (-z).sqrt().cosh()) / z
    }
}

/// Eccentric anomaly from true anomaly.
///
/// Elliptic orbits (`a > 0`) use the acos form reflected into [0, 2π) for
/// θ > π; hyperbolic orbits (`a < 0`) return the hyperbolic anomaly via
/// acosh. Returns NaN when the conversion argument leaves the principal
/// domain (degenerate geometry); callers at module boundaries must not let
/// that NaN escape.
pub fn eccentric_from_true_anomaly(eccentricity: f64, semi_major_axis: f64, theta: f64) -> f64 {
    let theta = principal_angle(theta);
    let ratio = (eccentricity + theta.cos()) / (1.0 + eccentricity * theta.cos());
    if semi_major_axis > 0.0 {
        let ecc_anomaly = ratio.acos();
        if theta > std::f64::consts::PI {
            DPI - ecc_anomaly
        } else {
            ecc_anomaly
        }
    } else {
        ratio.acosh()
    }
}

/// Mean anomaly from eccentric anomaly, M = E − e·sin E.
pub fn mean_from_eccentric_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

/// Mean motion n = √(μ/|a|³).
pub fn mean_motion(semi_major_axis: f64, mu: f64) -> f64 {
    (mu / semi_major_axis.abs().powi(3)).sqrt()
}

/// Time of flight between two true anomalies on an ellipse.
///
/// Closed form from Kepler's equation, no iteration. When `theta2 < theta1`
/// the arc wraps through perigee and one full period is added per pass.
///
/// Arguments
/// ---------
/// * `theta1`, `theta2`: true anomalies bounding the arc, in `unit`.
/// * `semi_major_axis`, `eccentricity`: orbit geometry (elliptic only).
/// * `mu`: gravitational parameter.
/// * `unit`: angular unit of `theta1`/`theta2`.
///
/// Return
/// ------
/// * Flight time in the time unit implied by μ, strictly positive for a
///   non-degenerate arc.
/// * [`AstroError::UnsupportedOrbitGeometry`] unless 0 ≤ e < 1 and a > 0.
/// * [`AstroError::InvalidInput`] for non-finite inputs.
pub fn kepler_tof(
    theta1: f64,
    theta2: f64,
    semi_major_axis: f64,
    eccentricity: f64,
    mu: f64,
    unit: AngleUnit,
) -> Result<f64, AstroError> {
    for (name, value) in [
        ("theta1", theta1),
        ("theta2", theta2),
        ("semi_major_axis", semi_major_axis),
        ("eccentricity", eccentricity),
        ("mu", mu),
    ] {
        if !value.is_finite() {
            return Err(AstroError::non_finite(name, value));
        }
    }

    if !(0.0..1.0).contains(&eccentricity) || semi_major_axis <= 0.0 {
        let energy = -mu / (2.0 * semi_major_axis);
        return Err(AstroError::UnsupportedOrbitGeometry {
            orbit_type: classify(eccentricity, energy, semi_major_axis),
            operation: "Kepler time of flight",
        });
    }

    let theta1 = principal_angle(unit.to_radians(theta1));
    let theta2 = principal_angle(unit.to_radians(theta2));

    // Wrapping past theta = 0 means the arc crosses perigee.
    let perigee_passes = if theta2 < theta1 { 1.0 } else { 0.0 };

    let ecc_anom1 = eccentric_from_true_anomaly(eccentricity, semi_major_axis, theta1);
    let ecc_anom2 = eccentric_from_true_anomaly(eccentricity, semi_major_axis, theta2);
    let mean1 = mean_from_eccentric_anomaly(ecc_anom1, eccentricity);
    let mean2 = mean_from_eccentric_anomaly(ecc_anom2, eccentricity);
    let n = mean_motion(semi_major_axis, mu);

    Ok((perigee_passes * DPI + mean2 - mean1) / n)
}
