//! # Gauss velocity-vector solver
//!
//! Solves the classic Gauss problem: given two position vectors and the time
//! of flight between them, find the velocity vectors at both ends of the
//! transfer arc. The single scalar unknown z is driven to the target flight
//! time by Newton iteration on ΔT(z); the Stumpff functions S(z) and C(z)
//! switch to their Maclaurin series near z = 0 where the closed forms
//! self-cancel.
//!
//! Non-convergent geometry is a correctness failure: the solver reports
//! [`AstroError::NonConvergence`] with the iteration count and last residual
//! rather than handing back the last iterate, and the Lagrange-coefficient
//! identity f·ġ − ḟ·g = 1 is verified before any result is returned.

use std::str::FromStr;

use nalgebra::Vector3;

use crate::constants::DPI;
use crate::errors::AstroError;
use crate::kepler::{stumpff_c, stumpff_s};

/// Transfer direction around the orbit plane.
///
/// `Long` sweeps the angle 2π − θ instead of θ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferKind {
    #[default]
    Short,
    Long,
}

impl FromStr for TransferKind {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Short" => Ok(TransferKind::Short),
            "Long" => Ok(TransferKind::Long),
            other => Err(AstroError::InvalidInput(format!(
                "unknown transfer type {other:?} (valid: Short, Long)"
            ))),
        }
    }
}

/// One Gauss problem: transfer between `r1` and `r2` in `tof` time units.
///
/// Immutable once built; `solve` may be called any number of times.
#[derive(Debug, Clone)]
pub struct GaussProblem {
    pub r1: Vector3<f64>,
    pub r2: Vector3<f64>,
    pub tof: f64,
    pub mu: f64,
    pub transfer: TransferKind,
    /// Convergence tolerance on the flight-time residual.
    pub tolerance: f64,
    /// Newton iteration cap; exceeding it is a reported failure.
    pub max_iterations: usize,
}

const FG_TOLERANCE: f64 = 1e-3;

impl GaussProblem {
    pub fn new(
        r1: Vector3<f64>,
        r2: Vector3<f64>,
        tof: f64,
        mu: f64,
        transfer: TransferKind,
    ) -> Self {
        GaussProblem {
            r1,
            r2,
            tof,
            mu,
            transfer,
            tolerance: 1e-7,
            max_iterations: 100,
        }
    }

    /// Swept transfer angle θ, with the long-way branch taking 2π − θ.
    fn swept_angle(&self) -> f64 {
        let theta = (self.r1.dot(&self.r2) / (self.r1.norm() * self.r2.norm())).acos();
        match self.transfer {
            TransferKind::Short => theta,
            TransferKind::Long => DPI - theta,
        }
    }

    /// Solve for the velocity vectors (v1, v2) at the two arc endpoints.
    ///
    /// Errors
    /// ------
    /// * [`AstroError::InvalidInput`] for non-finite or non-positive flight
    ///   time, or collinear endpoints (the geometry constant A degenerates).
    /// * [`AstroError::NonConvergence`] when the Newton iteration exceeds its
    ///   cap or the converged solution fails the f/g consistency identity.
    pub fn solve(&self) -> Result<(Vector3<f64>, Vector3<f64>), AstroError> {
        if !self.tof.is_finite() || self.tof <= 0.0 {
            return Err(AstroError::InvalidInput(format!(
                "time of flight must be finite and positive, got {}",
                self.tof
            )));
        }

        let mag_r1 = self.r1.norm();
        let mag_r2 = self.r2.norm();
        let theta = self.swept_angle();

        // A = sqrt(r1 r2) sin θ / sqrt(1 - cos θ); θ = 0 or π degenerates.
        let denom = 1.0 - theta.cos();
        if denom <= 0.0 || !theta.is_finite() {
            return Err(AstroError::InvalidInput(format!(
                "transfer geometry is degenerate (swept angle {theta} rad)"
            )));
        }
        let const_a = (mag_r1 * mag_r2).sqrt() * theta.sin() / denom.sqrt();

        let mut z = DPI;
        let mut residual = f64::INFINITY;

        for iteration in 0..self.max_iterations {
            let c = stumpff_c(z);
            let s = stumpff_s(z);
            let y = mag_r1 + mag_r2 - const_a * (1.0 - z * s) / c.sqrt();
            if y < 0.0 || !y.is_finite() {
                return Err(AstroError::NonConvergence {
                    solver: "gauss",
                    iterations: iteration,
                    residual,
                });
            }

            let x = (y / c).sqrt();
            let time = (x.powi(3) * s + const_a * y.sqrt()) / self.mu.sqrt();
            residual = self.tof - time;

            if residual.abs() <= self.tolerance {
                return self.velocities(y, x, z, s);
            }

            let ds_dz = (c - 3.0 * s) / (2.0 * z);
            let dc_dz = (1.0 - z * s - 2.0 * c) / (2.0 * z);
            let dt_dz = (x.powi(3) * (ds_dz - 3.0 * s * dc_dz / (2.0 * c))
                + const_a / 8.0 * (3.0 * s * y.sqrt() / c + const_a / x))
                / self.mu.sqrt();

            z += residual / dt_dz;
        }

        Err(AstroError::NonConvergence {
            solver: "gauss",
            iterations: self.max_iterations,
            residual,
        })
    }

    /// Recover (v1, v2) through the Lagrange coefficients and verify the
    /// f·ġ − ḟ·g = 1 identity before returning.
    fn velocities(
        &self,
        y: f64,
        x: f64,
        z: f64,
        s: f64,
    ) -> Result<(Vector3<f64>, Vector3<f64>), AstroError> {
        let mag_r1 = self.r1.norm();
        let mag_r2 = self.r2.norm();
        let const_a = {
            let theta = self.swept_angle();
            (mag_r1 * mag_r2).sqrt() * theta.sin() / (1.0 - theta.cos()).sqrt()
        };

        let f = 1.0 - y / mag_r1;
        let g = const_a * (y / self.mu).sqrt();
        let g_dot = 1.0 - y / mag_r2;
        let f_dot = -self.mu.sqrt() * x * (1.0 - z * s) / (mag_r1 * mag_r2);

        let fg_residual = (f * g_dot - f_dot * g - 1.0).abs();
        if fg_residual > FG_TOLERANCE {
            return Err(AstroError::NonConvergence {
                solver: "gauss",
                iterations: self.max_iterations,
                residual: fg_residual,
            });
        }

        let v1 = (self.r2 - f * self.r1) / g;
        let v2 = (g_dot * self.r2 - self.r1) / g;
        Ok((v1, v2))
    }
}
