//! Element/state round-trip and frame-rotation consistency checks over
//! randomized geometries.

use approx::assert_relative_eq;
use nalgebra::Matrix3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use astrocalc::constants::{AngleUnit, DPI};
use astrocalc::conversion::{elements_to_state, state_to_elements};
use astrocalc::elements::OrbitalElements;
use astrocalc::ref_system::{
    geocentric_to_perifocal, geocentric_to_topocentric, inertial_to_perifocal,
    perifocal_to_geocentric, perifocal_to_inertial, topocentric_to_geocentric,
};
use astrocalc::OrbitType;

const MU_EARTH: f64 = 398_600.0;

fn assert_matrix_is_identity(m: &Matrix3<f64>, tol: f64) {
    let identity = Matrix3::<f64>::identity();
    for (a, b) in m.iter().zip(identity.iter()) {
        assert_relative_eq!(*a, *b, epsilon = tol);
    }
}

#[test]
fn test_elements_state_roundtrip_random_elliptic() {
    let mut rng = StdRng::seed_from_u64(0xA57);

    for _ in 0..100 {
        let a = rng.random_range(7000.0..50_000.0);
        let ecc = rng.random_range(0.05..0.85);
        let inc = rng.random_range(0.1..std::f64::consts::PI - 0.1);
        let raan = rng.random_range(0.1..DPI - 0.1);
        let aop = rng.random_range(0.1..DPI - 0.1);
        let theta = rng.random_range(0.1..DPI - 0.1);

        let el = OrbitalElements::from_classical(
            a,
            ecc,
            inc,
            raan,
            aop,
            theta,
            AngleUnit::Radians,
        );
        let (r, v) = elements_to_state(&el, MU_EARTH, astrocalc::Frame::Geocentric).unwrap();
        let back = state_to_elements(&r, &v, MU_EARTH, AngleUnit::Radians).unwrap();

        assert_eq!(back.orbit_type, OrbitType::Elliptical);
        assert_relative_eq!(back.semi_major_axis, a, max_relative = 1e-6);
        assert_relative_eq!(back.eccentricity, ecc, max_relative = 1e-6);
        assert_relative_eq!(back.inclination, inc, max_relative = 1e-6, epsilon = 1e-9);
        assert_relative_eq!(back.raan, raan, max_relative = 1e-6, epsilon = 1e-9);
        assert_relative_eq!(back.arg_of_perigee, aop, max_relative = 1e-6, epsilon = 1e-9);
        assert_relative_eq!(back.true_anomaly, theta, max_relative = 1e-6, epsilon = 1e-9);
    }
}

#[test]
fn test_roundtrip_preserves_angle_unit_in_degrees() {
    let el = OrbitalElements::from_classical(
        12_000.0,
        0.3,
        45.0,
        120.0,
        75.0,
        200.0,
        AngleUnit::Degrees,
    );
    let (r, v) = elements_to_state(&el, MU_EARTH, astrocalc::Frame::Geocentric).unwrap();
    let back = state_to_elements(&r, &v, MU_EARTH, AngleUnit::Degrees).unwrap();

    assert_eq!(back.angle_unit, AngleUnit::Degrees);
    assert_relative_eq!(back.inclination, 45.0, max_relative = 1e-9);
    assert_relative_eq!(back.raan, 120.0, max_relative = 1e-9);
    assert_relative_eq!(back.arg_of_perigee, 75.0, max_relative = 1e-9);
    assert_relative_eq!(back.true_anomaly, 200.0, max_relative = 1e-9);
}

#[test]
fn test_rotation_matrices_invert_each_other() {
    let mut rng = StdRng::seed_from_u64(0x0B5);

    // Degenerate corners first, then random triples.
    let mut triples = vec![
        (0.0, 0.0, 0.0),
        (0.0, 1.0, std::f64::consts::FRAC_PI_2),
        (DPI - 1e-9, 0.5, std::f64::consts::PI - 1e-9),
    ];
    for _ in 0..100 {
        triples.push((
            rng.random_range(0.0..DPI),
            rng.random_range(0.0..DPI),
            rng.random_range(0.0..std::f64::consts::PI),
        ));
    }

    for (raan, aop, inc) in triples {
        let ip = inertial_to_perifocal(raan, aop, inc);
        let pi = perifocal_to_inertial(raan, aop, inc);
        assert_matrix_is_identity(&(ip * pi), 1e-9);

        let pg = perifocal_to_geocentric(raan, aop, inc);
        let gp = geocentric_to_perifocal(raan, aop, inc);
        assert_matrix_is_identity(&(pg * gp), 1e-9);
    }
}

#[test]
fn test_topocentric_rotation_inverts() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let lat = rng.random_range(-std::f64::consts::FRAC_PI_2..std::f64::consts::FRAC_PI_2);
        let lst = rng.random_range(0.0..DPI);
        let gt = geocentric_to_topocentric(lat, lst);
        let tg = topocentric_to_geocentric(lat, lst);
        assert_matrix_is_identity(&(gt * tg), 1e-9);
    }
}
