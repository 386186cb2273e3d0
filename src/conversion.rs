//! # Element ↔ state-vector conversion
//!
//! Two public entry points:
//!
//! - [`elements_to_state`]: classical elements → (r, v) through the perifocal
//!   closed forms and a frame rotation chosen by the caller.
//! - [`state_to_elements`]: (r, v) → the full [`OrbitalElements`] record.
//!
//! The low-level helpers ([`raan`], [`arg_of_perigee`], [`true_anomaly`], …)
//! return NaN for angles that are genuinely ill-defined (equatorial orbits
//! degenerate the node vector, circular orbits the eccentricity vector); the
//! entry points translate a *Circular* classification into an explicit
//! [`AstroError::UnsupportedOrbitGeometry`] so a NaN-laden result never
//! crosses the module boundary for a canonical request.

use nalgebra::Vector3;

use crate::constants::{AngleUnit, Radian, DPI};
use crate::elements::OrbitalElements;
use crate::errors::AstroError;
use crate::kepler::{eccentric_from_true_anomaly, mean_from_eccentric_anomaly, mean_motion};
use crate::orbit_type::{classify, OrbitType};
use crate::ref_system::{perifocal_to_geocentric, perifocal_to_inertial, Frame};

/// Specific angular momentum vector h = r × v.
pub fn angular_momentum(r: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    r.cross(v)
}

/// Eccentricity vector e = ((v² − μ/|r|)·r − (r·v)·v)/μ.
pub fn eccentricity_vector(r: &Vector3<f64>, v: &Vector3<f64>, mu: f64) -> Vector3<f64> {
    let mag_r = r.norm();
    let v2 = v.dot(v);
    ((v2 - mu / mag_r) * r - r.dot(v) * v) / mu
}

/// Node vector n = ẑ × h. Zero for equatorial orbits.
pub fn node_vector(h: &Vector3<f64>) -> Vector3<f64> {
    Vector3::z().cross(h)
}

/// Specific orbital energy ε = v²/2 − μ/|r|.
pub fn specific_energy(r: &Vector3<f64>, v: &Vector3<f64>, mu: f64) -> f64 {
    v.dot(v) / 2.0 - mu / r.norm()
}

/// Inclination from the angular momentum vector, radians in [0, π].
pub fn inclination(h: &Vector3<f64>) -> Radian {
    (h.z / h.norm()).acos()
}

/// Right ascension of the ascending node, radians in [0, 2π).
///
/// Quadrant resolved by the sign of n_y. Returns NaN when |n| = 0
/// (equatorial orbit: the node line is undefined).
pub fn raan(n: &Vector3<f64>) -> Radian {
    let mag_n = n.norm();
    if mag_n == 0.0 {
        return f64::NAN;
    }
    let angle = (n.x / mag_n).acos();
    if n.y < 0.0 {
        DPI - angle
    } else {
        angle
    }
}

/// Argument of perigee, radians in [0, 2π).
///
/// Quadrant resolved by the sign of e_z. Returns NaN when |n| = 0 or
/// |e| = 0 (equatorial or circular orbit).
pub fn arg_of_perigee(n: &Vector3<f64>, e_vec: &Vector3<f64>) -> Radian {
    let mag_n = n.norm();
    let mag_e = e_vec.norm();
    if mag_n == 0.0 || mag_e == 0.0 {
        return f64::NAN;
    }
    let angle = (n.dot(e_vec) / (mag_n * mag_e)).acos();
    if e_vec.z < 0.0 {
        DPI - angle
    } else {
        angle
    }
}

/// True anomaly, radians in [0, 2π).
///
/// The sign of the radial velocity r·v resolves the ascending/descending
/// ambiguity left by acos. Returns NaN when |e| = 0 (circular orbit:
/// perigee direction undefined).
pub fn true_anomaly(e_vec: &Vector3<f64>, r: &Vector3<f64>, v: &Vector3<f64>) -> Radian {
    let mag_e = e_vec.norm();
    if mag_e == 0.0 {
        return f64::NAN;
    }
    let angle = (e_vec.dot(r) / (mag_e * r.norm())).acos();
    if r.dot(v) < 0.0 {
        DPI - angle
    } else {
        angle
    }
}

fn check_finite_vec(name: &str, v: &Vector3<f64>) -> Result<(), AstroError> {
    for c in v.iter() {
        if !c.is_finite() {
            return Err(AstroError::non_finite(name, *c));
        }
    }
    Ok(())
}

/// Convert classical orbital elements to a state vector (r, v).
///
/// The conic radius comes from r = a(1−e²)/(1 + e·cos θ); position and
/// velocity are built in perifocal coordinates and rotated into `frame`.
///
/// Arguments
/// ---------
/// * `elements`: element set carrying at least (a, e, i, Ω, ω, θ); its
///   [`AngleUnit`] governs how the angles are read.
/// * `mu`: gravitational parameter of the central body.
/// * `frame`: output frame, one of [`Frame::Perifocal`], [`Frame::Geocentric`] or
///   [`Frame::Inertial`].
///
/// Errors
/// ------
/// * [`AstroError::UnsupportedOrbitGeometry`] when the orbit classifies as
///   Circular (ω is undefined there).
/// * [`AstroError::InvalidInput`] for non-finite a/e/i/Ω/ω/θ/μ or a
///   topocentric output frame (a site is needed for that, see
///   [`crate::ref_system::site_to_state`]).
pub fn elements_to_state(
    elements: &OrbitalElements,
    mu: f64,
    frame: Frame,
) -> Result<(Vector3<f64>, Vector3<f64>), AstroError> {
    let a = elements.semi_major_axis;
    let ecc = elements.eccentricity;

    for (name, value) in [
        ("semi_major_axis", a),
        ("eccentricity", ecc),
        ("inclination", elements.inclination),
        ("raan", elements.raan),
        ("arg_of_perigee", elements.arg_of_perigee),
        ("true_anomaly", elements.true_anomaly),
        ("mu", mu),
    ] {
        if !value.is_finite() {
            return Err(AstroError::non_finite(name, value));
        }
    }

    let theta = elements.angle_unit.to_radians(elements.true_anomaly);
    let inc = elements.angle_unit.to_radians(elements.inclination);
    let node = elements.angle_unit.to_radians(elements.raan);
    let aop = elements.angle_unit.to_radians(elements.arg_of_perigee);

    let energy = if elements.energy.is_finite() {
        elements.energy
    } else {
        -mu / (2.0 * a)
    };

    let orbit_type = classify(ecc, energy, a);
    if orbit_type == OrbitType::Circular {
        return Err(AstroError::UnsupportedOrbitGeometry {
            orbit_type,
            operation: "element to state conversion",
        });
    }

    let p = a * (1.0 - ecc * ecc);
    let radius = p / (1.0 + ecc * theta.cos());

    let r_pqw = Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0);
    let v_pqw = Vector3::new(
        -(mu / p).sqrt() * theta.sin(),
        (mu / p).sqrt() * (ecc + theta.cos()),
        0.0,
    );

    let transform = match frame {
        Frame::Perifocal => return Ok((r_pqw, v_pqw)),
        Frame::Geocentric => perifocal_to_geocentric(node, aop, inc),
        Frame::Inertial => perifocal_to_inertial(node, aop, inc),
        Frame::TopocentricHorizon => {
            return Err(AstroError::InvalidInput(
                "topocentric output requires a site; use ref_system::site_to_state".into(),
            ))
        }
    };

    Ok((transform * r_pqw, transform * v_pqw))
}

/// Convert a state vector (r, v) to the full classical element set.
///
/// Follows the standard vector chain: h = r×v, eccentricity vector, node
/// vector, energy, then each angle with its quadrant correction. Degenerate
/// angles come back NaN from the helpers for equatorial geometry; a Circular
/// classification aborts the whole conversion with
/// [`AstroError::UnsupportedOrbitGeometry`] instead.
///
/// Arguments
/// ---------
/// * `r`, `v`: position and velocity in the geocentric frame.
/// * `mu`: gravitational parameter.
/// * `unit`: angular unit of the returned element set; conversion from
///   internal radians happens once, at this boundary.
pub fn state_to_elements(
    r: &Vector3<f64>,
    v: &Vector3<f64>,
    mu: f64,
    unit: AngleUnit,
) -> Result<OrbitalElements, AstroError> {
    check_finite_vec("position", r)?;
    check_finite_vec("velocity", v)?;
    if !mu.is_finite() || mu <= 0.0 {
        return Err(AstroError::InvalidInput(format!(
            "mu must be finite and positive, got {mu}"
        )));
    }
    if r.norm() == 0.0 {
        return Err(AstroError::InvalidInput("position vector is zero".into()));
    }

    let mag_r = r.norm();
    let mag_v = v.norm();
    let e_vec = eccentricity_vector(r, v, mu);
    let ecc = e_vec.norm();
    let energy = specific_energy(r, v, mu);
    let h = angular_momentum(r, v);
    let mag_h = h.norm();

    // Parabolic orbits have no finite semi-major axis; NaN is the sentinel.
    let a = if energy != 0.0 {
        -mu / (2.0 * energy)
    } else {
        f64::NAN
    };

    let orbit_type = classify(ecc, energy, a);
    if orbit_type == OrbitType::Circular {
        return Err(AstroError::UnsupportedOrbitGeometry {
            orbit_type,
            operation: "state to element conversion",
        });
    }

    let n = node_vector(&h);
    let mag_n = n.norm();

    let theta = true_anomaly(&e_vec, r, v);
    let inc = inclination(&h);
    let node = raan(&n);
    let aop = arg_of_perigee(&n, &e_vec);

    let ecc_anomaly = if a.is_finite() {
        eccentric_from_true_anomaly(ecc, a, theta)
    } else {
        f64::NAN
    };
    let mean_anomaly = mean_from_eccentric_anomaly(ecc_anomaly, ecc);
    let n_mean = if a.is_finite() {
        mean_motion(a, mu)
    } else {
        f64::NAN
    };

    let cv = |angle: Radian| unit.from_radians(angle);

    Ok(OrbitalElements {
        semi_major_axis: a,
        eccentricity: ecc,
        inclination: cv(inc),
        raan: cv(node),
        arg_of_perigee: cv(aop),
        true_anomaly: cv(theta),
        longitude_of_periapsis: cv(node + aop),
        arg_of_latitude: cv(aop + theta),
        true_longitude: cv(node + aop + theta),
        semi_latus_rectum: mag_h * mag_h / mu,
        mean_motion: n_mean,
        energy,
        eccentric_anomaly: cv(ecc_anomaly),
        mean_anomaly: cv(mean_anomaly),
        position: *r,
        velocity: *v,
        momentum_vector: h,
        eccentricity_vector: e_vec,
        node_vector: n,
        mag_position: mag_r,
        mag_velocity: mag_v,
        mag_momentum: mag_h,
        mag_node: mag_n,
        angle_unit: unit,
        orbit_type,
    })
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    // Curtis, "Orbital Mechanics for Engineering Students", example 4.3.
    const MU_EARTH: f64 = 398_600.0;

    fn curtis_state() -> (Vector3<f64>, Vector3<f64>) {
        (
            Vector3::new(-6045.0, -3490.0, 2500.0),
            Vector3::new(-3.457, 6.618, 2.533),
        )
    }

    #[test]
    fn test_state_to_elements_textbook_case() {
        let (r, v) = curtis_state();
        let el = state_to_elements(&r, &v, MU_EARTH, AngleUnit::Degrees).unwrap();

        assert_eq!(el.orbit_type, OrbitType::Elliptical);
        assert_relative_eq!(el.mag_momentum, 58_310.0, max_relative = 1e-3);
        assert_relative_eq!(el.inclination, 153.2, max_relative = 1e-3);
        assert_relative_eq!(el.raan, 255.3, max_relative = 1e-3);
        assert_relative_eq!(el.eccentricity, 0.1712, max_relative = 1e-3);
        assert_relative_eq!(el.arg_of_perigee, 20.07, max_relative = 1e-3);
        assert_relative_eq!(el.true_anomaly, 28.45, max_relative = 1e-3);
        assert_relative_eq!(el.semi_major_axis, 8788.0, max_relative = 1e-3);
    }

    #[test]
    fn test_compound_angles_are_sums() {
        let (r, v) = curtis_state();
        let el = state_to_elements(&r, &v, MU_EARTH, AngleUnit::Radians).unwrap();
        assert_relative_eq!(
            el.longitude_of_periapsis,
            el.raan + el.arg_of_perigee,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            el.true_longitude,
            el.raan + el.arg_of_perigee + el.true_anomaly,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_equatorial_orbit_yields_nan_angles_at_helper_level() {
        // Equatorial, eccentric: node vector degenerates, RAAN and aop are
        // NaN, but the conversion itself succeeds.
        let r = Vector3::new(8000.0, 0.0, 0.0);
        let v = Vector3::new(0.0, 8.0, 0.0);
        let el = state_to_elements(&r, &v, MU_EARTH, AngleUnit::Degrees).unwrap();
        assert!(el.raan.is_nan());
        assert!(el.arg_of_perigee.is_nan());
        assert!(!el.eccentricity.is_nan());
        assert!(!el.true_anomaly.is_nan());
    }

    #[test]
    fn test_elements_to_state_perifocal_at_perigee() {
        let el = OrbitalElements::from_classical(
            8000.0,
            0.1,
            30.0,
            40.0,
            60.0,
            0.0,
            AngleUnit::Degrees,
        );
        let (r, v) = elements_to_state(&el, MU_EARTH, Frame::Perifocal).unwrap();

        let p = 8000.0 * (1.0 - 0.01);
        assert_relative_eq!(r.x, p / 1.1, max_relative = 1e-12);
        assert_relative_eq!(r.y, 0.0);
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, (MU_EARTH / p).sqrt() * 1.1, max_relative = 1e-12);
    }

    #[test]
    fn test_circular_orbit_is_rejected_at_entry() {
        let el = OrbitalElements::from_classical(
            8000.0,
            0.0,
            30.0,
            40.0,
            60.0,
            0.0,
            AngleUnit::Degrees,
        );
        let err = elements_to_state(&el, MU_EARTH, Frame::Geocentric).unwrap_err();
        assert_eq!(
            err,
            AstroError::UnsupportedOrbitGeometry {
                orbit_type: OrbitType::Circular,
                operation: "element to state conversion",
            }
        );
    }

    #[test]
    fn test_non_finite_angles_are_invalid_input() {
        let el = OrbitalElements::from_classical(
            8000.0,
            0.1,
            f64::NAN,
            40.0,
            60.0,
            0.0,
            AngleUnit::Degrees,
        );
        assert!(matches!(
            elements_to_state(&el, MU_EARTH, Frame::Geocentric),
            Err(AstroError::InvalidInput(_))
        ));
    }
}
