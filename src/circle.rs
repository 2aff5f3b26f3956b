//! Circle state and pairwise collision resolution.

use crate::aabb::Aabb;
use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared distance between two points, projected onto the packing plane.
pub(crate) fn planar_distance_sq(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// One circle in a packing arrangement.
///
/// The radius is fixed for the circle's lifetime; the center moves only
/// through [`translate`](Self::translate) and the resolve/contract
/// operations. The z coordinate of the center is carried through untouched;
/// overlap math is strictly planar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingCircle {
    center: Point3<f64>,
    radius: f64,
    in_motion: bool,
}

impl PackingCircle {
    /// Creates a circle at the given center.
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            in_motion: false,
        }
    }

    /// Returns the center point.
    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Returns the radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns true if the circle was displaced during the most recent pass.
    pub fn is_in_motion(&self) -> bool {
        self.in_motion
    }

    pub(crate) fn clear_motion(&mut self) {
        self.in_motion = false;
    }

    /// Validates the circle and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidCircle("Radius must be positive".into()));
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() || !self.center.z.is_finite() {
            return Err(Error::InvalidCircle("Center must be finite".into()));
        }
        Ok(())
    }

    /// Moves the circle by the given offset.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.center += offset;
    }

    /// Checks the collision condition against another circle.
    ///
    /// The circles collide when the squared planar center distance is below
    /// `(r_a + r_b)^2 - 0.01 * tolerance`, so tangent circles do not count
    /// as colliding.
    pub fn collides_with(&self, other: &PackingCircle, tolerance: f64) -> bool {
        let combined = self.radius + other.radius;
        planar_distance_sq(&self.center, &other.center) < combined * combined - 0.01 * tolerance
    }

    /// Resolves a collision by moving only this circle.
    ///
    /// On collision this circle is pushed away from `other` along the line
    /// between the centers until the circles just touch, and is marked in
    /// motion. Returns true iff a collision was detected.
    ///
    /// Exactly coincident centers have no separating direction; the overlap
    /// is still reported but neither circle moves.
    pub fn resolve_single(&mut self, other: &PackingCircle, tolerance: f64) -> bool {
        if !self.collides_with(other, tolerance) {
            return false;
        }
        let distance = planar_distance_sq(&self.center, &other.center).sqrt();
        if distance <= 0.0 {
            return true;
        }
        let combined = self.radius + other.radius;
        let scale = (combined - distance) / distance;
        self.translate(Vector3::new(
            (self.center.x - other.center.x) * scale,
            (self.center.y - other.center.y) * scale,
            0.0,
        ));
        self.in_motion = true;
        true
    }

    /// Resolves a collision by moving both circles half the correction each,
    /// in opposite directions along the separating axis.
    ///
    /// Both circles are marked in motion. Returns true iff a collision was
    /// detected. Coincident centers are handled as in
    /// [`resolve_single`](Self::resolve_single).
    pub fn resolve_mutual(&mut self, other: &mut PackingCircle, tolerance: f64) -> bool {
        if !self.collides_with(other, tolerance) {
            return false;
        }
        let distance = planar_distance_sq(&self.center, &other.center).sqrt();
        if distance <= 0.0 {
            return true;
        }
        let combined = self.radius + other.radius;
        let scale = 0.5 * (combined - distance) / distance;
        let half = Vector3::new(
            (self.center.x - other.center.x) * scale,
            (self.center.y - other.center.y) * scale,
            0.0,
        );
        self.translate(half);
        other.translate(-half);
        self.in_motion = true;
        other.in_motion = true;
        true
    }

    /// Pulls the circle toward a reference point by a fraction `damping` of
    /// the separation, in the packing plane.
    ///
    /// Marks the circle in motion when the displacement is nonzero. Callers
    /// that treat small damping values as a no-op gate before calling.
    pub fn contract_toward(&mut self, reference: &Point3<f64>, damping: f64) {
        let pull = Vector3::new(
            (reference.x - self.center.x) * damping,
            (reference.y - self.center.y) * damping,
            0.0,
        );
        if pull.x != 0.0 || pull.y != 0.0 {
            self.translate(pull);
            self.in_motion = true;
        }
    }

    /// Returns the axis-aligned bounding box: center ± radius in x and y,
    /// flat in z.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(
            Point3::new(
                self.center.x - self.radius,
                self.center.y - self.radius,
                self.center.z,
            ),
            Point3::new(
                self.center.x + self.radius,
                self.center.y + self.radius,
                self.center.z,
            ),
        )
    }
}
