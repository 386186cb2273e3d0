//! # Two-body numerical propagation
//!
//! Integrates the vector equation of motion ẍ = −μ·r/|r|³ with an adaptive
//! step-doubling Runge-Kutta scheme (embedded error estimate by Richardson
//! extrapolation) and resamples the solution at a fixed output step. The
//! dynamics are smooth and non-stiff, so the internal step is free to grow
//! well past the output spacing between samples.
//!
//! Failure discipline: the whole call fails. A non-finite state or a step
//! size driven below the floor produces [`AstroError::PropagationFailed`]
//! carrying the time reached, never a silently truncated trajectory.
//!
//! A batch of independent propagations (one per named orbit) is an
//! embarrassingly parallel map; [`propagate_batch`] runs it on the rayon
//! thread pool and exposes progress through a completed-count the caller
//! may poll.

use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::constants::Seconds;
use crate::errors::AstroError;

/// Tuning knobs for the adaptive integrator. Immutable per propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorConfig {
    /// First trial step, in the time unit implied by μ.
    pub initial_step: f64,
    /// Floor below which step collapse is treated as failure.
    pub min_step: f64,
    /// Ceiling on the internal step.
    pub max_step: f64,
    /// Relative local error tolerance per step.
    pub tolerance: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        IntegratorConfig {
            initial_step: 10.0,
            min_step: 1e-9,
            max_step: 500.0,
            tolerance: 1e-10,
        }
    }
}

/// One sample of a propagated trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time: Seconds,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Time-ordered trajectory, immutable after propagation.
///
/// Sample 0 is the initial condition exactly; samples are spaced by the
/// requested output step.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> &TrajectorySample {
        &self.samples[0]
    }

    pub fn last(&self) -> &TrajectorySample {
        &self.samples[self.samples.len() - 1]
    }
}

/// Adaptive two-body propagator for a fixed gravitational parameter.
#[derive(Debug, Clone, Copy)]
pub struct TwoBodyPropagator {
    pub mu: f64,
    pub config: IntegratorConfig,
}

type State = (Vector3<f64>, Vector3<f64>);

impl TwoBodyPropagator {
    pub fn new(mu: f64) -> Self {
        TwoBodyPropagator {
            mu,
            config: IntegratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IntegratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Propagate from (r0, v0) for `duration`, sampled every `step`.
    ///
    /// The sample count is ceil(duration/step); sample 0 is (r0, v0)
    /// unmodified. Internally the integrator subdivides or stretches its own
    /// step against the local error estimate, clamping so every output time
    /// is hit exactly.
    pub fn propagate(
        &self,
        r0: Vector3<f64>,
        v0: Vector3<f64>,
        duration: Seconds,
        step: Seconds,
    ) -> Result<Trajectory, AstroError> {
        for (name, value) in [("duration", duration), ("step", step), ("mu", self.mu)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AstroError::InvalidInput(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        for c in r0.iter().chain(v0.iter()) {
            if !c.is_finite() {
                return Err(AstroError::non_finite("initial state", *c));
            }
        }

        let n_samples = (duration / step).ceil() as usize;
        let mut samples = Vec::with_capacity(n_samples);
        samples.push(TrajectorySample {
            time: 0.0,
            position: r0,
            velocity: v0,
        });

        let mut state: State = (r0, v0);
        let mut t = 0.0;
        let mut h = self.config.initial_step.min(step);

        for k in 1..n_samples {
            let target = k as f64 * step;
            while t < target {
                let trial = h.min(target - t);
                // A remaining sliver below float resolution cannot advance t.
                if trial <= f64::EPSILON * target {
                    t = target;
                    break;
                }
                match self.adaptive_step(&state, trial) {
                    StepResult::Accept { state: next, h_next } => {
                        t += trial;
                        state = next;
                        h = h_next.clamp(self.config.min_step, self.config.max_step);
                        if !state.0.iter().chain(state.1.iter()).all(|c| c.is_finite()) {
                            return Err(AstroError::PropagationFailed {
                                t,
                                reason: "state became non-finite".into(),
                            });
                        }
                    }
                    StepResult::Reject { h_next } => {
                        if h_next < self.config.min_step {
                            return Err(AstroError::PropagationFailed {
                                t,
                                reason: format!(
                                    "step size collapsed below {} without meeting tolerance",
                                    self.config.min_step
                                ),
                            });
                        }
                        h = h_next;
                    }
                }
            }
            samples.push(TrajectorySample {
                time: target,
                position: state.0,
                velocity: state.1,
            });
        }

        Ok(Trajectory { samples })
    }

    fn acceleration(&self, r: &Vector3<f64>) -> Vector3<f64> {
        let mag_r = r.norm();
        -r * self.mu / (mag_r * mag_r * mag_r)
    }

    fn rk4_step(&self, state: &State, h: f64) -> State {
        let deriv = |s: &State| (s.1, self.acceleration(&s.0));

        let k1 = deriv(state);
        let s2 = (state.0 + 0.5 * h * k1.0, state.1 + 0.5 * h * k1.1);
        let k2 = deriv(&s2);
        let s3 = (state.0 + 0.5 * h * k2.0, state.1 + 0.5 * h * k2.1);
        let k3 = deriv(&s3);
        let s4 = (state.0 + h * k3.0, state.1 + h * k3.1);
        let k4 = deriv(&s4);

        (
            state.0 + h / 6.0 * (k1.0 + 2.0 * k2.0 + 2.0 * k3.0 + k4.0),
            state.1 + h / 6.0 * (k1.1 + 2.0 * k2.1 + 2.0 * k3.1 + k4.1),
        )
    }

    /// One adaptive step: full step against two half steps, Richardson
    /// error estimate, fifth-order accepted solution.
    fn adaptive_step(&self, state: &State, h: f64) -> StepResult {
        let full = self.rk4_step(state, h);
        let half = self.rk4_step(&self.rk4_step(state, h / 2.0), h / 2.0);

        let err_r = (half.0 - full.0).norm() / 15.0;
        let err_v = (half.1 - full.1).norm() / 15.0;
        let scale_r = state.0.norm().max(1e-30);
        let scale_v = state.1.norm().max(1e-30);
        let err = (err_r / scale_r).max(err_v / scale_v);

        // A non-finite estimate (singularity crossed inside the step) must
        // shrink the step, and `err <= tolerance` below rejects it.
        let factor = if !err.is_finite() {
            0.2
        } else if err > 0.0 {
            (0.9 * (self.config.tolerance / err).powf(0.2)).clamp(0.2, 5.0)
        } else {
            5.0
        };

        if err <= self.config.tolerance {
            StepResult::Accept {
                state: (
                    half.0 + (half.0 - full.0) / 15.0,
                    half.1 + (half.1 - full.1) / 15.0,
                ),
                h_next: h * factor,
            }
        } else {
            StepResult::Reject { h_next: h * factor }
        }
    }
}

enum StepResult {
    Accept { state: State, h_next: f64 },
    Reject { h_next: f64 },
}

/// One named propagation job for [`propagate_batch`].
#[derive(Debug, Clone)]
pub struct PropagationRequest {
    pub name: String,
    pub r0: Vector3<f64>,
    pub v0: Vector3<f64>,
    pub mu: f64,
    pub duration: Seconds,
    pub step: Seconds,
}

/// Run a batch of independent propagations in parallel.
///
/// Each request is fully independent (no shared mutable state); the batch is
/// a parallel map over the rayon thread pool. `completed` is incremented
/// once per finished request (success or failure), so a caller polling it
/// from another thread sees monotonic progress up to `requests.len()`.
pub fn propagate_batch(
    requests: &[PropagationRequest],
    config: IntegratorConfig,
    completed: &AtomicUsize,
) -> Vec<(String, Result<Trajectory, AstroError>)> {
    requests
        .par_iter()
        .map(|req| {
            let propagator = TwoBodyPropagator::new(req.mu).with_config(config);
            let result = propagator.propagate(req.r0, req.v0, req.duration, req.step);
            completed.fetch_add(1, Ordering::Relaxed);
            (req.name.clone(), result)
        })
        .collect()
}

#[cfg(test)]
mod propagator_test {
    use super::*;
    use crate::conversion::{angular_momentum, specific_energy};
    use approx::assert_relative_eq;

    const MU_EARTH: f64 = 398_600.0;

    #[test]
    fn test_sample_count_and_initial_condition() {
        let propagator = TwoBodyPropagator::new(MU_EARTH);
        let r0 = Vector3::new(7000.0, 0.0, 0.0);
        let v0 = Vector3::new(0.0, 7.8, 0.0);
        let traj = propagator.propagate(r0, v0, 95.0, 10.0).unwrap();

        assert_eq!(traj.len(), 10); // ceil(95/10)
        assert_eq!(traj.first().time, 0.0);
        assert_eq!(traj.first().position, r0);
        assert_eq!(traj.first().velocity, v0);
        assert_eq!(traj.last().time, 90.0);
    }

    #[test]
    fn test_energy_and_momentum_conserved() {
        let propagator = TwoBodyPropagator::new(MU_EARTH);
        let r0 = Vector3::new(8000.0, 1000.0, 500.0);
        let v0 = Vector3::new(-1.0, 7.0, 1.5);
        let traj = propagator.propagate(r0, v0, 6000.0, 60.0).unwrap();

        let energy0 = specific_energy(&r0, &v0, MU_EARTH);
        let h0 = angular_momentum(&r0, &v0).norm();
        for sample in traj.samples() {
            let energy = specific_energy(&sample.position, &sample.velocity, MU_EARTH);
            let h = angular_momentum(&sample.position, &sample.velocity).norm();
            assert_relative_eq!(energy, energy0, max_relative = 1e-6);
            assert_relative_eq!(h, h0, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let propagator = TwoBodyPropagator::new(MU_EARTH);
        let r0 = Vector3::new(7000.0, 0.0, 0.0);
        let v0 = Vector3::new(0.0, 7.8, 0.0);

        assert!(matches!(
            propagator.propagate(r0, v0, -100.0, 10.0),
            Err(AstroError::InvalidInput(_))
        ));
        assert!(matches!(
            propagator.propagate(r0, v0, 100.0, 0.0),
            Err(AstroError::InvalidInput(_))
        ));
        assert!(matches!(
            propagator.propagate(Vector3::new(f64::NAN, 0.0, 0.0), v0, 100.0, 10.0),
            Err(AstroError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_batch_progress_reaches_total() {
        let requests: Vec<PropagationRequest> = (0..4)
            .map(|i| PropagationRequest {
                name: format!("orbit-{i}"),
                r0: Vector3::new(7000.0 + 100.0 * i as f64, 0.0, 0.0),
                v0: Vector3::new(0.0, 7.6, 0.0),
                mu: MU_EARTH,
                duration: 600.0,
                step: 30.0,
            })
            .collect();

        let completed = AtomicUsize::new(0);
        let results = propagate_batch(&requests, IntegratorConfig::default(), &completed);

        assert_eq!(completed.load(Ordering::Relaxed), 4);
        assert_eq!(results.len(), 4);
        for (name, result) in &results {
            assert!(name.starts_with("orbit-"));
            assert!(result.is_ok());
        }
    }
}
