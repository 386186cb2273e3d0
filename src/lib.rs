//! # astrocalc
//!
//! Two-body orbital mechanics toolkit: state/element conversions, orbit
//! classification, time-of-flight solvers and numerical propagation.
//!
//! ## What it does
//!
//! * **Elements ↔ state**: [`conversion::elements_to_state`] and
//!   [`conversion::state_to_elements`] convert between classical orbital
//!   elements and inertial position/velocity vectors around any central
//!   body, with the full derived-quantity set on [`OrbitalElements`].
//! * **Classification**: [`orbit_type::classify`] labels an orbit from its
//!   (eccentricity, energy, semi-major axis) triple; every computation that
//!   is geometry-dependent gates on the resulting [`OrbitType`].
//! * **Time of flight**: three solvers of increasing generality:
//!   closed-form elliptic Kepler ([`kepler::kepler_tof`]), the Gauss/Lambert
//!   boundary-value problem ([`GaussProblem`]) and the universal-variable
//!   initial-value formulation ([`UniversalProblem`]).
//! * **Propagation**: adaptive RK4 two-body integration
//!   ([`TwoBodyPropagator`]) with parallel batch execution
//!   ([`propagator::propagate_batch`]).
//! * **Frames**: rotation-matrix builders between inertial, perifocal,
//!   geocentric and topocentric-horizon frames ([`ref_system`]), including
//!   radar-site observation reduction.
//! * **Bodies**: a registry of solar-system gravitational parameters and
//!   canonical units ([`planetary`]).
//!
//! ## Conventions
//!
//! Distances are kilometers, speeds km/s, times seconds, and μ km³/s²,
//! unless the caller works in canonical units (everything is unit-agnostic
//! as long as the inputs agree). Angles cross the public boundary in the
//! unit named by [`AngleUnit`]; internal math is always radians.
//!
//! Low-level helpers signal "undefined for this geometry" with NaN, in the
//! spirit of IEEE 754; entry points translate those into explicit
//! [`AstroError`] variants so callers never have to probe floats.
//!
//! ## Example
//!
//! ```rust
//! use astrocalc::constants::AngleUnit;
//! use astrocalc::conversion::state_to_elements;
//! use astrocalc::planetary::get_planet_data;
//! use nalgebra::Vector3;
//!
//! let earth = get_planet_data("earth").unwrap();
//! let r = Vector3::new(-6045.0, -3490.0, 2500.0);
//! let v = Vector3::new(-3.457, 6.618, 2.533);
//! let elements = state_to_elements(&r, &v, earth.mu, AngleUnit::Degrees).unwrap();
//! assert!(elements.eccentricity < 1.0);
//! ```

pub mod constants;
pub mod conversion;
pub mod elements;
pub mod errors;
pub mod gauss;
pub mod kepler;
pub mod mohr;
pub mod orbit_type;
pub mod planetary;
pub mod propagator;
pub mod ref_system;
pub mod universal;

pub use constants::AngleUnit;
pub use elements::OrbitalElements;
pub use errors::AstroError;
pub use gauss::{GaussProblem, TransferKind};
pub use orbit_type::OrbitType;
pub use planetary::PlanetaryBody;
pub use propagator::{IntegratorConfig, Trajectory, TwoBodyPropagator};
pub use ref_system::Frame;
pub use universal::UniversalProblem;
