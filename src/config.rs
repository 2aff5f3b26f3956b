//! Packing algorithm selection and run configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collision-resolution algorithm for a pack pass.
///
/// | Algorithm | Ordering | Pairwise resolution | Contracts? |
/// |-----------|----------|---------------------|------------|
/// | `Simple`  | farthest from center first | single-circle | no  |
/// | `Fast`    | farthest from center first | single-circle | yes |
/// | `Double`  | farthest from center first | mutual halves | yes |
/// | `Random`  | uniform shuffle            | single-circle | yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PackAlgorithm {
    /// Sorted resolution without contraction (baseline).
    Simple,
    /// Sorted resolution with contraction toward the reference point.
    #[default]
    Fast,
    /// Sorted resolution where both circles share the correction, with
    /// contraction.
    Double,
    /// Shuffled resolution order, with contraction. Trades the outward bias
    /// of sorted ordering for the absence of directional artifacts.
    Random,
}

impl PackAlgorithm {
    /// Returns true if the pass order is a uniform random shuffle rather
    /// than descending distance from the reference point.
    pub fn shuffles(&self) -> bool {
        matches!(self, Self::Random)
    }

    /// Returns true if colliding pairs split the correction between both
    /// circles instead of moving only the first.
    pub fn resolves_mutually(&self) -> bool {
        matches!(self, Self::Double)
    }

    /// Returns true if the pass ends by contracting all circles toward the
    /// reference point.
    pub fn contracts(&self) -> bool {
        !matches!(self, Self::Simple)
    }
}

/// Configuration for a packing run.
///
/// Collects the values an interactive front end prompts for (circle count,
/// radius bounds, iteration budget, algorithm) together with the driver
/// schedule (initial damping, per-iteration decay, scene tolerance) and an
/// optional RNG seed for reproducible runs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackConfig {
    /// Number of circles to generate.
    pub count: usize,

    /// Minimum circle radius. Also bounds the initial placement offset.
    pub min_radius: f64,

    /// Maximum circle radius.
    pub max_radius: f64,

    /// Algorithm variant used for every pass.
    pub algorithm: PackAlgorithm,

    /// Iteration budget for the run.
    pub max_iterations: u32,

    /// Initial contraction fraction per pass.
    pub damping: f64,

    /// Factor the damping is multiplied by between passes.
    pub damping_decay: f64,

    /// Geometric tolerance supplied by the scene/document.
    pub tolerance: f64,

    /// RNG seed for reproducible runs (None = seeded from entropy).
    pub seed: Option<u64>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            count: 20,
            min_radius: 1.0,
            max_radius: 5.0,
            algorithm: PackAlgorithm::default(),
            max_iterations: 100,
            damping: 0.1,
            damping_decay: 0.98,
            tolerance: 0.0,
            seed: None,
        }
    }
}

impl PackConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of circles.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.max(2);
        self
    }

    /// Sets the radius range.
    pub fn with_radius_range(mut self, min_radius: f64, max_radius: f64) -> Self {
        self.min_radius = min_radius;
        self.max_radius = max_radius.max(min_radius);
        self
    }

    /// Sets the algorithm variant.
    pub fn with_algorithm(mut self, algorithm: PackAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    /// Sets the initial damping.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping.max(0.0);
        self
    }

    /// Sets the per-iteration damping decay factor.
    pub fn with_damping_decay(mut self, decay: f64) -> Self {
        self.damping_decay = decay.clamp(0.0, 1.0);
        self
    }

    /// Sets the geometric tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.count < 2 {
            return Err(Error::InvalidConfig(
                "At least 2 circles are required".into(),
            ));
        }
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(Error::InvalidConfig(
                "Minimum radius must be positive".into(),
            ));
        }
        if !self.max_radius.is_finite() || self.max_radius < self.min_radius {
            return Err(Error::InvalidConfig(
                "Maximum radius must be at least the minimum radius".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "Iteration budget must be at least 1".into(),
            ));
        }
        if self.damping.is_nan() || self.damping < 0.0 {
            return Err(Error::InvalidConfig("Damping must be non-negative".into()));
        }
        if self.damping_decay.is_nan() || self.damping_decay <= 0.0 || self.damping_decay > 1.0 {
            return Err(Error::InvalidConfig(
                "Damping decay must be in (0, 1]".into(),
            ));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(Error::InvalidConfig(
                "Tolerance must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
