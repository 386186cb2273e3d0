//! # Universal-variable time-of-flight solver
//!
//! Propagates a state vector through a target flight time using the
//! universal variable x, which generalizes Kepler's equation across all
//! conic classes. Bound orbits (circular/elliptic) use the closed
//! trigonometric time equation; parabolic and hyperbolic orbits go through
//! the Stumpff-function form with z = x²/a (z = 0 when parabolic).
//!
//! The Newton iteration carries an iteration cap, and the Lagrange
//! coefficient identity f·ġ − ḟ·g = 1 is checked before the propagated
//! state is returned; a failed check is a reported
//! [`AstroError::NonConvergence`], never a silently inconsistent result.

use nalgebra::Vector3;

use crate::conversion::{eccentricity_vector, specific_energy};
use crate::errors::AstroError;
use crate::kepler::{stumpff_c, stumpff_s};
use crate::orbit_type::{classify, OrbitType};

/// One universal time-of-flight problem: advance (r, v) by `tof`.
#[derive(Debug, Clone)]
pub struct UniversalProblem {
    pub r: Vector3<f64>,
    pub v: Vector3<f64>,
    pub tof: f64,
    pub mu: f64,
    /// Starting value for the universal variable; `None` selects the
    /// standard elliptic guess √μ·tof/a (zero for open orbits).
    pub initial_guess: Option<f64>,
    pub tolerance: f64,
    pub max_iterations: usize,
}

const FG_TOLERANCE: f64 = 1e-2;

impl UniversalProblem {
    pub fn new(r: Vector3<f64>, v: Vector3<f64>, tof: f64, mu: f64) -> Self {
        UniversalProblem {
            r,
            v,
            tof,
            mu,
            initial_guess: None,
            tolerance: 1e-7,
            max_iterations: 100,
        }
    }

    /// Solve for the state (r2, v2) reached after `tof` time units.
    ///
    /// Errors
    /// ------
    /// * [`AstroError::InvalidInput`] for non-finite inputs or an orbit whose
    ///   class cannot be established (zero angular momentum, for instance).
    /// * [`AstroError::NonConvergence`] on Newton cap exhaustion or an f/g
    ///   identity residual above 1e-2.
    pub fn solve(&self) -> Result<(Vector3<f64>, Vector3<f64>), AstroError> {
        for (name, value) in [("tof", self.tof), ("mu", self.mu)] {
            if !value.is_finite() {
                return Err(AstroError::non_finite(name, value));
            }
        }

        let mag_r = self.r.norm();
        let ecc = eccentricity_vector(&self.r, &self.v, self.mu).norm();
        let energy = specific_energy(&self.r, &self.v, self.mu);
        let a = if energy != 0.0 {
            -self.mu / (2.0 * energy)
        } else {
            f64::NAN
        };
        let orbit_type = classify(ecc, energy, a);
        if orbit_type == OrbitType::Undefined {
            return Err(AstroError::InvalidInput(format!(
                "orbit class undefined for e = {ecc}, energy = {energy}, a = {a}"
            )));
        }

        let geometry = Geometry {
            mag_r,
            a,
            r_dot_v: self.r.dot(&self.v),
            mu: self.mu,
            bound: matches!(orbit_type, OrbitType::Circular | OrbitType::Elliptical),
            parabolic: orbit_type == OrbitType::Parabolic,
        };

        let mut x = match self.initial_guess {
            Some(x0) => x0,
            None if geometry.bound => self.mu.sqrt() * self.tof / a,
            None => 0.0,
        };

        let mut residual = f64::INFINITY;
        let mut converged = false;
        for _ in 0..self.max_iterations {
            let t = geometry.time_at(x);
            residual = self.tof - t;
            if residual.abs() <= self.tolerance {
                converged = true;
                break;
            }
            x += residual / geometry.dt_dx(x);
        }

        if !converged {
            return Err(AstroError::NonConvergence {
                solver: "universal",
                iterations: self.max_iterations,
                residual,
            });
        }

        // Lagrange map from initial to final state.
        let f = geometry.lagrange_f(x);
        let g = geometry.lagrange_g(x, self.tof);
        let r2 = f * self.r + g * self.v;
        let mag_r2 = r2.norm();
        let g_dot = geometry.lagrange_g_dot(x, mag_r2);
        let f_dot = geometry.lagrange_f_dot(x, mag_r2);
        let v2 = f_dot * self.r + g_dot * self.v;

        let fg_residual = (f * g_dot - f_dot * g - 1.0).abs();
        if fg_residual > FG_TOLERANCE {
            return Err(AstroError::NonConvergence {
                solver: "universal",
                iterations: self.max_iterations,
                residual: fg_residual,
            });
        }

        Ok((r2, v2))
    }
}

/// Scalar orbit geometry shared by every evaluation inside one solve.
struct Geometry {
    mag_r: f64,
    a: f64,
    r_dot_v: f64,
    mu: f64,
    bound: bool,
    parabolic: bool,
}

impl Geometry {
    fn z_at(&self, x: f64) -> f64 {
        if self.parabolic {
            0.0
        } else {
            x * x / self.a
        }
    }

    fn time_at(&self, x: f64) -> f64 {
        let sqrt_mu = self.mu.sqrt();
        if self.bound {
            let sqrt_a = self.a.sqrt();
            let phase = x / sqrt_a;
            (self.a * (x - sqrt_a * phase.sin())
                + self.r_dot_v / sqrt_mu * self.a * (1.0 - phase.cos())
                + self.mag_r * sqrt_a * phase.sin())
                / sqrt_mu
        } else {
            let z = self.z_at(x);
            let s = stumpff_s(z);
            let c = stumpff_c(z);
            (x.powi(3) * s + self.r_dot_v / sqrt_mu * x * x * c
                + self.mag_r * x * (1.0 - z * s))
                / sqrt_mu
        }
    }

    fn dt_dx(&self, x: f64) -> f64 {
        let sqrt_mu = self.mu.sqrt();
        if self.bound {
            let sqrt_a = self.a.sqrt();
            let phase = x / sqrt_a;
            (self.a
                + self.a
                    * (self.r_dot_v / (self.mu * self.a).sqrt() * phase.sin()
                        + (self.mag_r / self.a - 1.0) * phase.cos()))
                / sqrt_mu
        } else {
            let z = self.z_at(x);
            let s = stumpff_s(z);
            let c = stumpff_c(z);
            (x * x * c + self.r_dot_v / sqrt_mu * x * (1.0 - z * s)
                + self.mag_r * (1.0 - z * c))
                / sqrt_mu
        }
    }

    fn lagrange_f(&self, x: f64) -> f64 {
        if self.bound {
            1.0 - self.a / self.mag_r * (1.0 - (x / self.a.sqrt()).cos())
        } else {
            1.0 - x * x * stumpff_c(self.z_at(x)) / self.mag_r
        }
    }

    fn lagrange_g(&self, x: f64, tof: f64) -> f64 {
        if self.bound {
            let sqrt_mu_a = (self.mu * self.a).sqrt();
            let phase = x / self.a.sqrt();
            self.a * self.a / sqrt_mu_a
                * (self.r_dot_v / sqrt_mu_a * (1.0 - phase.cos())
                    + self.mag_r / self.a * phase.sin())
        } else {
            tof - x.powi(3) * stumpff_s(self.z_at(x)) / self.mu.sqrt()
        }
    }

    fn lagrange_f_dot(&self, x: f64, mag_r2: f64) -> f64 {
        if self.bound {
            -(self.mu * self.a).sqrt() * (x / self.a.sqrt()).sin() / (mag_r2 * self.mag_r)
        } else {
            let z = self.z_at(x);
            self.mu.sqrt() * x / (self.mag_r * mag_r2) * (z * stumpff_s(z) - 1.0)
        }
    }

    fn lagrange_g_dot(&self, x: f64, mag_r2: f64) -> f64 {
        if self.bound {
            1.0 - self.a / mag_r2 * (1.0 - (x / self.a.sqrt()).cos())
        } else {
            1.0 - x * x * stumpff_c(self.z_at(x)) / mag_r2
        }
    }
}
