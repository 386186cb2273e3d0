//! # Reference-frame transforms
//!
//! Analytic rotation matrices between the four frames the library works in:
//!
//! - **Inertial** / **Geocentric**: fixed relative to the central body.
//! - **Perifocal**: orbit-plane frame, x-axis toward perigee.
//! - **Topocentric-Horizon (SEZ)**: observer-local South-East-Zenith frame.
//!
//! Every matrix is orthonormal by construction from closed-form rotation
//! formulas, so the inverse transform is the exact transpose; no matrix is
//! ever inverted numerically. All angular inputs are radians; behavior is
//! undefined for non-finite input (the conversion entry points in
//! [`crate::conversion`] validate before calling in here).
//!
//! The module also provides the SEZ range/range-rate vector builders and the
//! full radar-site pipeline used by topocentric tracking computations.

use std::str::FromStr;

use nalgebra::{Matrix3, Vector3};

use crate::constants::Radian;
use crate::errors::AstroError;

/// Reference frames addressable at module boundaries.
///
/// Parsing from a selector string fails with
/// [`AstroError::InvalidInput`] for anything outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Inertial,
    Perifocal,
    Geocentric,
    TopocentricHorizon,
}

impl Frame {
    pub const VALID_NAMES: [&'static str; 4] =
        ["Inertial", "Perifocal", "Geocentric", "Topocentric-Horizon"];
}

impl FromStr for Frame {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Inertial" => Ok(Frame::Inertial),
            "Perifocal" => Ok(Frame::Perifocal),
            "Geocentric" => Ok(Frame::Geocentric),
            "Topocentric-Horizon" => Ok(Frame::TopocentricHorizon),
            other => Err(AstroError::InvalidInput(format!(
                "unknown frame selector {:?} (valid: {})",
                other,
                Frame::VALID_NAMES.join(", ")
            ))),
        }
    }
}

/// Rotation from the inertial frame into the perifocal frame.
///
/// Classical 3-1-3 composition over (Ω, i, ω). Inputs in radians.
pub fn inertial_to_perifocal(raan: Radian, aop: Radian, inclination: Radian) -> Matrix3<f64> {
    let (sin_o, cos_o) = raan.sin_cos();
    let (sin_w, cos_w) = aop.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    Matrix3::new(
        -sin_o * cos_i * sin_w + cos_o * cos_w,
        cos_o * cos_i * sin_w + sin_o * cos_w,
        sin_i * sin_w,
        -sin_o * cos_i * cos_w - cos_o * sin_w,
        cos_o * cos_i * cos_w - sin_o * sin_w,
        sin_i * cos_w,
        sin_o * sin_i,
        -cos_o * sin_i,
        cos_i,
    )
}

/// Rotation from the perifocal frame into the inertial frame.
///
/// Exact transpose of [`inertial_to_perifocal`].
pub fn perifocal_to_inertial(raan: Radian, aop: Radian, inclination: Radian) -> Matrix3<f64> {
    inertial_to_perifocal(raan, aop, inclination).transpose()
}

/// Rotation from the perifocal frame into the geocentric frame.
pub fn perifocal_to_geocentric(raan: Radian, aop: Radian, inclination: Radian) -> Matrix3<f64> {
    let (sin_o, cos_o) = raan.sin_cos();
    let (sin_w, cos_w) = aop.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    Matrix3::new(
        cos_o * cos_w - sin_o * sin_w * cos_i,
        -cos_o * sin_w - sin_o * cos_w * cos_i,
        sin_o * sin_i,
        sin_o * cos_w + cos_o * sin_w * cos_i,
        -sin_o * sin_w + cos_o * cos_w * cos_i,
        -cos_o * sin_i,
        sin_w * sin_i,
        cos_w * sin_i,
        cos_i,
    )
}

/// Rotation from the geocentric frame into the perifocal frame.
///
/// Exact transpose of [`perifocal_to_geocentric`].
pub fn geocentric_to_perifocal(raan: Radian, aop: Radian, inclination: Radian) -> Matrix3<f64> {
    perifocal_to_geocentric(raan, aop, inclination).transpose()
}

/// Rotation from the geocentric frame into the topocentric-horizon (SEZ)
/// frame of a site at `latitude` with local sidereal time `lst`.
pub fn geocentric_to_topocentric(latitude: Radian, lst: Radian) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lst, cos_lst) = lst.sin_cos();

    Matrix3::new(
        sin_lat * cos_lst,
        sin_lat * sin_lst,
        -cos_lat,
        -sin_lst,
        cos_lst,
        0.0,
        cos_lat * cos_lst,
        cos_lat * sin_lst,
        sin_lat,
    )
}

/// Rotation from the topocentric-horizon (SEZ) frame into the geocentric
/// frame. Exact transpose of [`geocentric_to_topocentric`].
pub fn topocentric_to_geocentric(latitude: Radian, lst: Radian) -> Matrix3<f64> {
    geocentric_to_topocentric(latitude, lst).transpose()
}

/// Range vector ρ in the SEZ frame from range, elevation and azimuth.
///
/// Angles in radians; azimuth measured clockwise from north.
pub fn range_vector_sez(range: f64, elevation: Radian, azimuth: Radian) -> Vector3<f64> {
    let (sin_el, cos_el) = elevation.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    Vector3::new(
        -range * cos_el * cos_az,
        range * cos_el * sin_az,
        range * sin_el,
    )
}

/// Range-rate vector ρ̇ in the SEZ frame.
///
/// `range_rate` is the radial rate, `elevation_rate`/`azimuth_rate` the
/// angular rates in rad per time unit.
pub fn range_rate_vector_sez(
    range: f64,
    range_rate: f64,
    elevation: Radian,
    azimuth: Radian,
    elevation_rate: f64,
    azimuth_rate: f64,
) -> Vector3<f64> {
    let (sin_el, cos_el) = elevation.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();

    Vector3::new(
        -range_rate * cos_el * cos_az
            + range * sin_el * elevation_rate * cos_az
            + range * cos_el * sin_az * azimuth_rate,
        range_rate * cos_el * sin_az - range * sin_el * elevation_rate * sin_az
            + range * cos_el * cos_az * azimuth_rate,
        range_rate * sin_el + range * cos_el * elevation_rate,
    )
}

/// A radar measurement of a target from a ground site.
///
/// Angles and angular rates are radians; range and range rate share the unit
/// system of the site record. Built per observation, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarObservation {
    pub range: f64,
    pub range_rate: f64,
    pub azimuth: Radian,
    pub azimuth_rate: f64,
    pub elevation: Radian,
    pub elevation_rate: f64,
}

/// Observing site on the surface of a rotating central body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub latitude: Radian,
    /// Local sidereal time of the observation, radians.
    pub local_sidereal_time: Radian,
    /// Distance of the site from the body center.
    pub radius: f64,
    /// Body rotation rate, rad per time unit.
    pub rotation_rate: f64,
}

/// Convert a radar observation into a geocentric state vector (r, v).
///
/// Pipeline: build ρ and ρ̇ in SEZ, add the site radius along zenith, rotate
/// into the geocentric frame and add the ω × r transport term for the site's
/// rotation.
pub fn site_to_state(obs: &RadarObservation, site: &Site) -> (Vector3<f64>, Vector3<f64>) {
    let rho_sez = range_vector_sez(obs.range, obs.elevation, obs.azimuth);
    let rho_dot_sez = range_rate_vector_sez(
        obs.range,
        obs.range_rate,
        obs.elevation,
        obs.azimuth,
        obs.elevation_rate,
        obs.azimuth_rate,
    );

    let r_sez = rho_sez + Vector3::new(0.0, 0.0, site.radius);
    let d = topocentric_to_geocentric(site.latitude, site.local_sidereal_time);

    let r = d * r_sez;
    let omega = Vector3::new(0.0, 0.0, site.rotation_rate);
    let v = d * rho_dot_sez + omega.cross(&r);

    (r, v)
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_frame_from_str() {
        assert_eq!("Perifocal".parse::<Frame>().unwrap(), Frame::Perifocal);
        assert_eq!(
            "Topocentric-Horizon".parse::<Frame>().unwrap(),
            Frame::TopocentricHorizon
        );
        assert!(matches!(
            "SEZ".parse::<Frame>(),
            Err(AstroError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_inverse_is_transpose() {
        let m = perifocal_to_geocentric(0.7, 1.1, 0.4);
        let prod = m * geocentric_to_perifocal(0.7, 1.1, 0.4);
        assert_abs_diff_eq!(prod, Matrix3::identity(), epsilon = 1e-12);

        let m = geocentric_to_topocentric(0.56, 2.3);
        let prod = m * topocentric_to_geocentric(0.56, 2.3);
        assert_abs_diff_eq!(prod, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_angle_transforms_are_identity() {
        assert_abs_diff_eq!(
            inertial_to_perifocal(0.0, 0.0, 0.0),
            Matrix3::identity(),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            perifocal_to_geocentric(0.0, 0.0, 0.0),
            Matrix3::identity(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_range_vector_sez() {
        // Target at zenith: all range along Z
        let rho = range_vector_sez(3.0, std::f64::consts::FRAC_PI_2, 0.3);
        assert_abs_diff_eq!(rho, Vector3::new(0.0, 0.0, 3.0), epsilon = 1e-12);

        // Target on the horizon due north: -S axis
        let rho = range_vector_sez(2.0, 0.0, 0.0);
        assert_abs_diff_eq!(rho, Vector3::new(-2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_site_to_state_static_target() {
        // Zero rates and zero rotation: v must vanish, r must have site
        // radius plus range along the local vertical at the pole.
        let obs = RadarObservation {
            range: 1.0,
            range_rate: 0.0,
            azimuth: 0.0,
            azimuth_rate: 0.0,
            elevation: std::f64::consts::FRAC_PI_2,
            elevation_rate: 0.0,
        };
        let site = Site {
            latitude: std::f64::consts::FRAC_PI_2,
            local_sidereal_time: 0.0,
            radius: 1.0,
            rotation_rate: 0.0,
        };
        let (r, v) = site_to_state(&obs, &site);
        assert_abs_diff_eq!(r, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(v, Vector3::zeros(), epsilon = 1e-12);
    }
}
