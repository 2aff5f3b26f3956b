//! The packing engine: circle collection, pass ordering, collision
//! resolution and contraction.

use crate::aabb::Aabb;
use crate::circle::{planar_distance_sq, PackingCircle};
use crate::config::{PackAlgorithm, PackConfig};
use crate::error::{Error, Result};
use nalgebra::Point3;
use rand::prelude::*;
use std::cell::Cell;

/// Damping below this threshold makes the contraction step a no-op.
pub const MIN_DAMPING: f64 = 0.01;

/// Iteratively packs a fixed set of circles around a reference point.
///
/// The packer owns an ordered collection of circles with randomized radii,
/// created once at construction. Each [`pack`](Self::pack) call runs exactly
/// one relaxation pass; the caller drives the iteration loop, decides when
/// "no collision" means convergence, and supplies the damping schedule.
#[derive(Debug)]
pub struct CirclePacker {
    circles: Vec<PackingCircle>,
    reference_point: Point3<f64>,
    rng: StdRng,
    bounding_box: Cell<Option<Aabb>>,
}

impl CirclePacker {
    /// Creates a packer with `count` circles randomized around
    /// `reference_point`, seeding the generator from entropy.
    ///
    /// Centers are offset from the reference point by a uniform value in
    /// `[0, min_radius)` per planar axis; radii are uniform in
    /// `[min_radius, max_radius]`.
    pub fn new(
        reference_point: Point3<f64>,
        count: usize,
        min_radius: f64,
        max_radius: f64,
    ) -> Result<Self> {
        Self::with_rng(
            reference_point,
            count,
            min_radius,
            max_radius,
            StdRng::from_entropy(),
        )
    }

    /// Creates a packer with a fixed RNG seed, making the initial placement
    /// and all shuffle orderings reproducible.
    pub fn with_seed(
        reference_point: Point3<f64>,
        count: usize,
        min_radius: f64,
        max_radius: f64,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(
            reference_point,
            count,
            min_radius,
            max_radius,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Creates a packer from a run configuration.
    pub fn from_config(reference_point: Point3<f64>, config: &PackConfig) -> Result<Self> {
        config.validate()?;
        match config.seed {
            Some(seed) => Self::with_seed(
                reference_point,
                config.count,
                config.min_radius,
                config.max_radius,
                seed,
            ),
            None => Self::new(
                reference_point,
                config.count,
                config.min_radius,
                config.max_radius,
            ),
        }
    }

    fn with_rng(
        reference_point: Point3<f64>,
        count: usize,
        min_radius: f64,
        max_radius: f64,
        mut rng: StdRng,
    ) -> Result<Self> {
        if count < 2 {
            return Err(Error::InvalidConfig(
                "At least 2 circles are required".into(),
            ));
        }
        if !min_radius.is_finite() || min_radius <= 0.0 {
            return Err(Error::InvalidConfig(
                "Minimum radius must be positive".into(),
            ));
        }
        if !max_radius.is_finite() || max_radius < min_radius {
            return Err(Error::InvalidConfig(
                "Maximum radius must be at least the minimum radius".into(),
            ));
        }

        let circles = (0..count)
            .map(|_| {
                let center = Point3::new(
                    reference_point.x + rng.gen_range(0.0..min_radius),
                    reference_point.y + rng.gen_range(0.0..min_radius),
                    reference_point.z,
                );
                PackingCircle::new(center, rng.gen_range(min_radius..=max_radius))
            })
            .collect();

        Ok(Self {
            circles,
            reference_point,
            rng,
            bounding_box: Cell::new(None),
        })
    }

    /// Returns the circles in their current pass order.
    pub fn circles(&self) -> &[PackingCircle] {
        &self.circles
    }

    /// Returns the reference point circles contract toward.
    pub fn reference_point(&self) -> Point3<f64> {
        self.reference_point
    }

    /// Returns the number of circles.
    pub fn len(&self) -> usize {
        self.circles.len()
    }

    /// Returns true if the packer holds no circles. Construction enforces a
    /// minimum of two, so this is false for any constructed packer.
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Runs exactly one relaxation pass and reports whether any pair of
    /// circles collided.
    ///
    /// The pass clears all motion flags, reorders the circles (descending
    /// distance from the reference point, or a shuffle for
    /// [`PackAlgorithm::Random`]), resolves every pair `(i, j)` with `i < j`
    /// in the current order, and finally, for contracting algorithms with
    /// `damping >= MIN_DAMPING`, pulls every circle toward the reference
    /// point. The cached bounding box is invalidated.
    pub fn pack(&mut self, algorithm: PackAlgorithm, damping: f64, tolerance: f64) -> bool {
        for circle in &mut self.circles {
            circle.clear_motion();
        }

        if algorithm.shuffles() {
            self.circles.shuffle(&mut self.rng);
        } else {
            let reference = self.reference_point;
            self.circles.sort_unstable_by(|a, b| {
                let da = planar_distance_sq(&a.center(), &reference);
                let db = planar_distance_sq(&b.center(), &reference);
                db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let mut any_collision = false;
        let count = self.circles.len();
        for i in 0..count {
            for j in (i + 1)..count {
                // Two disjoint &mut references out of one Vec
                let (head, tail) = self.circles.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                let collided = if algorithm.resolves_mutually() {
                    a.resolve_mutual(b, tolerance)
                } else {
                    a.resolve_single(b, tolerance)
                };
                any_collision |= collided;
            }
        }

        if algorithm.contracts() && damping >= MIN_DAMPING {
            let reference = self.reference_point;
            for circle in &mut self.circles {
                circle.contract_toward(&reference, damping);
            }
        }

        self.bounding_box.set(None);
        any_collision
    }

    /// Returns the union of all circle bounding boxes.
    ///
    /// The box is memoized and recomputed lazily after any pass moved the
    /// circles.
    pub fn bounding_box(&self) -> Aabb {
        if let Some(cached) = self.bounding_box.get() {
            return cached;
        }
        let computed = self
            .circles
            .iter()
            .map(PackingCircle::bounding_box)
            .reduce(|acc, bb| acc.union(&bb))
            .unwrap_or_else(|| Aabb::new(self.reference_point, self.reference_point));
        self.bounding_box.set(Some(computed));
        computed
    }
}
