//! Packing run results.

use crate::aabb::Aabb;
use crate::circle::PackingCircle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final state of a packing run.
///
/// `circles` holds the packed arrangement in its final pass order, ready for
/// the caller to commit to a persistent scene; whether that commit replaces
/// or appends is the caller's concern.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackOutcome {
    /// The packed circles (center, radius) in final order.
    pub circles: Vec<PackingCircle>,

    /// Number of passes actually executed.
    pub iterations: u32,

    /// Whether a pass reported no collisions before the budget ran out.
    pub converged: bool,

    /// Whether the run was cancelled between passes.
    pub cancelled: bool,

    /// Damping value after the last executed pass (decay applied).
    pub final_damping: f64,

    /// Extents of the packed arrangement, for viewport fitting.
    pub bounding_box: Aabb,

    /// Wall-clock time for the run (milliseconds).
    pub computation_time_ms: u64,
}

impl PackOutcome {
    /// Returns the number of packed circles.
    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    /// Returns true if the run ran to convergence or budget exhaustion
    /// without being cancelled.
    pub fn completed_normally(&self) -> bool {
        !self.cancelled
    }
}
