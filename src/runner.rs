//! The driver loop around the packing engine.
//!
//! The engine itself runs one pass at a time; this module owns the outer
//! iteration: budget, decaying damping schedule, between-pass cancellation
//! and the per-pass redraw callback a viewport registers for the duration of
//! a run.

use crate::circle::PackingCircle;
use crate::config::PackConfig;
use crate::error::Result;
use crate::packer::CirclePacker;
use crate::result::PackOutcome;
use nalgebra::Point3;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Per-pass redraw callback.
///
/// Invoked after every pass with a progress snapshot and the circles in
/// their current order. The registration is scoped to a single
/// [`PackRunner::run_with_redraw`] call.
pub type RedrawCallback = Box<dyn Fn(&PackProgress, &[PackingCircle]) + Send + Sync>;

/// Progress snapshot passed to the redraw callback after each pass.
#[derive(Debug, Clone)]
pub struct PackProgress {
    /// Pass number, starting at 1.
    pub iteration: u32,
    /// Iteration budget for the run.
    pub max_iterations: u32,
    /// Damping for the next pass (decay already applied).
    pub damping: f64,
    /// Whether the pass just completed resolved any collision.
    pub any_collision: bool,
    /// Elapsed wall-clock time (milliseconds).
    pub elapsed_ms: u64,
    /// Whether more passes will follow.
    pub running: bool,
}

/// Drives a [`CirclePacker`] to completion.
///
/// Calls the single-pass `pack` operation repeatedly, decaying the damping
/// between passes, until a pass reports no collisions, the iteration budget
/// is exhausted, or the run is cancelled. Cancellation is only observed
/// between passes; a pass always completes once started.
pub struct PackRunner {
    config: PackConfig,
    cancelled: Arc<AtomicBool>,
}

impl PackRunner {
    /// Creates a runner with the given configuration.
    pub fn new(config: PackConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Requests cancellation; honored at the next between-pass check.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Runs the packing loop around the given reference point.
    pub fn run(&self, reference_point: Point3<f64>) -> Result<PackOutcome> {
        self.run_inner(reference_point, None)
    }

    /// Runs the packing loop, invoking `callback` after every pass.
    pub fn run_with_redraw(
        &self,
        reference_point: Point3<f64>,
        callback: RedrawCallback,
    ) -> Result<PackOutcome> {
        self.run_inner(reference_point, Some(callback))
    }

    fn run_inner(
        &self,
        reference_point: Point3<f64>,
        callback: Option<RedrawCallback>,
    ) -> Result<PackOutcome> {
        let start = Instant::now();
        let mut packer = CirclePacker::from_config(reference_point, &self.config)?;

        log::debug!(
            "packing {} circles with {:?}, budget {} iterations",
            self.config.count,
            self.config.algorithm,
            self.config.max_iterations
        );

        let mut damping = self.config.damping;
        let mut iterations = 0;
        let mut converged = false;
        let mut cancelled = false;

        for iteration in 1..=self.config.max_iterations {
            if self.cancelled.load(Ordering::Relaxed) {
                cancelled = true;
                log::debug!("packing cancelled after {} iterations", iterations);
                break;
            }

            let any_collision = packer.pack(self.config.algorithm, damping, self.config.tolerance);
            iterations = iteration;
            damping *= self.config.damping_decay;

            if let Some(callback) = &callback {
                let progress = PackProgress {
                    iteration,
                    max_iterations: self.config.max_iterations,
                    damping,
                    any_collision,
                    elapsed_ms: start.elapsed().as_millis() as u64,
                    running: any_collision && iteration < self.config.max_iterations,
                };
                callback(&progress, packer.circles());
            }

            if !any_collision {
                converged = true;
                log::debug!("packing converged after {} iterations", iterations);
                break;
            }
            log::trace!("iteration {}: collisions resolved, damping now {:.4}", iteration, damping);
        }

        if !converged && !cancelled {
            log::debug!(
                "iteration budget of {} exhausted with collisions remaining",
                self.config.max_iterations
            );
        }

        Ok(PackOutcome {
            bounding_box: packer.bounding_box(),
            circles: packer.circles().to_vec(),
            iterations,
            converged,
            cancelled,
            final_damping: damping,
            computation_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
