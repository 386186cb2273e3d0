//! # Mohr circle stress analysis
//!
//! Plane-stress and full 3D stress-state reduction. The 2D path is closed
//! form from the (σx, σy, τxy) components; the 3D path diagonalizes the
//! symmetric Cauchy stress tensor and reports the three principal circles.
//!
//! Angle outputs follow the crate convention and honour [`AngleUnit`].

use nalgebra::Matrix3;

use crate::constants::AngleUnit;
use crate::errors::AstroError;

/// Plane-stress Mohr circle derived from (σx, σy, τxy).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MohrCircle2D {
    /// Circle center, the average normal stress.
    pub center: f64,
    /// Circle radius, equal to the maximum in-plane shear stress.
    pub radius: f64,
    pub sigma_1: f64,
    pub sigma_2: f64,
    pub max_shear: f64,
    /// Rotation from the x axis to the first principal plane.
    pub principal_angle: f64,
    /// Rotation from the x axis to the maximum shear plane.
    pub shear_angle: f64,
    pub angle_unit: AngleUnit,
}

impl MohrCircle2D {
    pub fn new(
        sigma_x: f64,
        sigma_y: f64,
        tau_xy: f64,
        angle_unit: AngleUnit,
    ) -> Result<Self, AstroError> {
        for (name, value) in [("sigma_x", sigma_x), ("sigma_y", sigma_y), ("tau_xy", tau_xy)] {
            if !value.is_finite() {
                return Err(AstroError::non_finite(name, value));
            }
        }

        let center = (sigma_x + sigma_y) / 2.0;
        let half_diff = (sigma_x - sigma_y) / 2.0;
        let radius = (half_diff * half_diff + tau_xy * tau_xy).sqrt();

        // atan2 keeps the degenerate σx == σy case well defined.
        let principal_angle = 0.5 * (2.0 * tau_xy).atan2(sigma_x - sigma_y);
        let shear_angle = principal_angle - std::f64::consts::FRAC_PI_4;

        Ok(MohrCircle2D {
            center,
            radius,
            sigma_1: center + radius,
            sigma_2: center - radius,
            max_shear: radius,
            principal_angle: angle_unit.from_radians(principal_angle),
            shear_angle: angle_unit.from_radians(shear_angle),
            angle_unit,
        })
    }

    /// Normal and shear stress on the plane rotated by `theta` from x.
    pub fn stress_at(&self, theta: f64) -> (f64, f64) {
        // Measured from the principal frame the circle parametrization is
        // σ = C + R·cos(2φ), τ = -R·sin(2φ).
        let two_phi =
            2.0 * (self.angle_unit.to_radians(theta) - self.angle_unit.to_radians(self.principal_angle));
        let sigma = self.center + self.radius * two_phi.cos();
        let tau = -self.radius * two_phi.sin();
        (sigma, tau)
    }
}

/// Full 3D stress state diagonalized into principal stresses.
#[derive(Debug, Clone, PartialEq)]
pub struct MohrCircle3D {
    /// Principal stresses sorted σ1 ≥ σ2 ≥ σ3.
    pub principal_stresses: [f64; 3],
    /// Center of each principal circle: (σi + σj)/2 for the (1,3), (1,2)
    /// and (2,3) pairs.
    pub centers: [f64; 3],
    /// Maximum shear of each principal circle: (σi − σj)/2 for the
    /// (1,3), (1,2) and (2,3) pairs.
    pub max_shears: [f64; 3],
    pub von_mises: f64,
    pub hydrostatic: f64,
}

impl MohrCircle3D {
    /// Build from the six independent components of the Cauchy stress
    /// tensor.
    pub fn new(
        sigma_x: f64,
        sigma_y: f64,
        sigma_z: f64,
        tau_xy: f64,
        tau_yz: f64,
        tau_xz: f64,
    ) -> Result<Self, AstroError> {
        let components = [
            ("sigma_x", sigma_x),
            ("sigma_y", sigma_y),
            ("sigma_z", sigma_z),
            ("tau_xy", tau_xy),
            ("tau_yz", tau_yz),
            ("tau_xz", tau_xz),
        ];
        for (name, value) in components {
            if !value.is_finite() {
                return Err(AstroError::non_finite(name, value));
            }
        }

        let stress = Matrix3::new(
            sigma_x, tau_xy, tau_xz, //
            tau_xy, sigma_y, tau_yz, //
            tau_xz, tau_yz, sigma_z,
        );
        let eigen = stress.symmetric_eigen();
        let mut principal: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
        principal.sort_by(|a, b| b.total_cmp(a));
        let [s1, s2, s3] = [principal[0], principal[1], principal[2]];

        let von_mises = (0.5
            * ((s1 - s2).powi(2) + (s2 - s3).powi(2) + (s1 - s3).powi(2)))
        .sqrt();

        Ok(MohrCircle3D {
            principal_stresses: [s1, s2, s3],
            centers: [(s1 + s3) / 2.0, (s1 + s2) / 2.0, (s2 + s3) / 2.0],
            max_shears: [(s1 - s3) / 2.0, (s1 - s2) / 2.0, (s2 - s3) / 2.0],
            von_mises,
            hydrostatic: (s1 + s2 + s3) / 3.0,
        })
    }

    /// Absolute maximum shear stress, the radius of the outer circle.
    pub fn max_shear(&self) -> f64 {
        self.max_shears[0]
    }
}
