//! # circlepack
//!
//! Iterative circle packing via physics-style relaxation.
//!
//! A fixed set of circles with randomized radii starts clustered around a
//! reference point. Each pass detects pairwise overlaps and nudges circles
//! apart, then optionally contracts the whole set toward the reference point
//! to squeeze out slack space. Repeated passes with a decaying contraction
//! converge toward a tight, overlap-free arrangement.
//!
//! ## Core Components
//!
//! - [`PackingCircle`]: one circle (center, fixed radius, per-pass motion
//!   flag) with overlap test-and-resolve operations
//! - [`CirclePacker`]: the engine (ordered circle collection, pass
//!   ordering, pairwise resolution, contraction, memoized bounding box)
//! - [`PackRunner`]: the driver loop (iteration budget, damping schedule,
//!   cancellation, redraw callback)
//! - [`PackConfig`] / [`PackAlgorithm`]: run configuration and algorithm
//!   selection
//!
//! ## Algorithm Variants
//!
//! | Algorithm | Ordering | Pairwise resolution | Contracts? |
//! |-----------|----------|---------------------|------------|
//! | `Simple`  | farthest first | single-circle | no  |
//! | `Fast`    | farthest first | single-circle | yes |
//! | `Double`  | farthest first | mutual halves | yes |
//! | `Random`  | shuffle        | single-circle | yes |
//!
//! Processing the circles farthest from the center first biases resolution
//! toward pushing outer circles outward and inner circles inward, which
//! combined with contraction compacts the arrangement over iterations.
//!
//! ## Quick Start
//!
//! ```rust
//! use circlepack::{PackAlgorithm, PackConfig, PackRunner};
//! use nalgebra::Point3;
//!
//! let config = PackConfig::new()
//!     .with_count(12)
//!     .with_radius_range(2.0, 6.0)
//!     .with_algorithm(PackAlgorithm::Double)
//!     .with_max_iterations(400)
//!     .with_seed(42);
//!
//! let runner = PackRunner::new(config);
//! let outcome = runner.run(Point3::origin()).unwrap();
//!
//! assert_eq!(outcome.circle_count(), 12);
//! println!(
//!     "packed {} circles in {} iterations (converged: {})",
//!     outcome.circle_count(),
//!     outcome.iterations,
//!     outcome.converged
//! );
//! ```
//!
//! Driving the engine pass-by-pass directly:
//!
//! ```rust
//! use circlepack::{CirclePacker, PackAlgorithm};
//! use nalgebra::Point3;
//!
//! let mut packer = CirclePacker::with_seed(Point3::origin(), 10, 1.0, 4.0, 7).unwrap();
//! let mut damping = 0.1;
//! for _ in 0..400 {
//!     if !packer.pack(PackAlgorithm::Fast, damping, 0.0) {
//!         break;
//!     }
//!     damping *= 0.98;
//! }
//! let extent = packer.bounding_box();
//! assert!(extent.width() > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization of the public value types

pub mod aabb;
pub mod circle;
pub mod config;
pub mod error;
pub mod packer;
pub mod result;
pub mod runner;

// Re-exports
pub use aabb::Aabb;
pub use circle::PackingCircle;
pub use config::{PackAlgorithm, PackConfig};
pub use error::{Error, Result};
pub use packer::{CirclePacker, MIN_DAMPING};
pub use result::PackOutcome;
pub use runner::{PackProgress, PackRunner, RedrawCallback};
