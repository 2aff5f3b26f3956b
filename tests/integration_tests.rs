//! Integration tests for circlepack.

use circlepack::{
    CirclePacker, PackAlgorithm, PackConfig, PackRunner, PackingCircle, MIN_DAMPING,
};
use nalgebra::Point3;

fn total_overlap(circles: &[PackingCircle]) -> f64 {
    let mut total = 0.0;
    for i in 0..circles.len() {
        for j in (i + 1)..circles.len() {
            let a = circles[i].center();
            let b = circles[j].center();
            let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
            let penetration = circles[i].radius() + circles[j].radius() - dist;
            if penetration > 0.0 {
                total += penetration;
            }
        }
    }
    total
}

mod pass_tests {
    use super::*;

    #[test]
    fn test_collision_report_matches_pair_state() {
        for algorithm in [
            PackAlgorithm::Simple,
            PackAlgorithm::Fast,
            PackAlgorithm::Double,
        ] {
            let mut packer = CirclePacker::with_seed(Point3::origin(), 10, 1.0, 3.0, 404).unwrap();

            // Clustered initial placement: the first pass must report a
            // collision.
            assert!(packer.pack(algorithm, 0.1, 0.0), "{algorithm:?}");

            // Once a pass reports false, no pair satisfies the collision
            // condition.
            let mut damping = 0.1;
            for _ in 0..500 {
                if !packer.pack(algorithm, damping, 0.0) {
                    break;
                }
                damping *= 0.98;
            }
            let circles = packer.circles();
            for i in 0..circles.len() {
                for j in (i + 1)..circles.len() {
                    assert!(
                        !circles[i].collides_with(&circles[j], 0.0),
                        "{algorithm:?} left a colliding pair"
                    );
                }
            }
        }
    }

    #[test]
    fn test_relaxation_drains_initial_overlap() {
        let mut packer = CirclePacker::with_seed(Point3::origin(), 12, 1.0, 3.0, 8).unwrap();
        let initial = total_overlap(packer.circles());
        assert!(initial > 0.0);

        let mut converged = false;
        for _ in 0..500 {
            if !packer.pack(PackAlgorithm::Simple, 0.0, 0.0) {
                converged = true;
                break;
            }
        }
        assert!(converged);
        assert_eq!(total_overlap(packer.circles()), 0.0);
    }

    #[test]
    fn test_contraction_gate_honors_threshold() {
        let mut packer = CirclePacker::with_seed(Point3::origin(), 8, 1.0, 2.0, 15).unwrap();
        for _ in 0..500 {
            if !packer.pack(PackAlgorithm::Simple, 0.0, 0.0) {
                break;
            }
        }
        let settled: Vec<PackingCircle> = packer.circles().to_vec();

        // Every damping below the threshold leaves the arrangement alone.
        for damping in [0.0, 0.005, MIN_DAMPING - 1e-9] {
            packer.pack(PackAlgorithm::Fast, damping, 0.0);
            assert_eq!(packer.circles(), settled.as_slice(), "damping {damping}");
        }

        // At the threshold the arrangement tightens.
        packer.pack(PackAlgorithm::Fast, MIN_DAMPING, 0.0);
        assert_ne!(packer.circles(), settled.as_slice());
    }

    #[test]
    fn test_bounding_box_tracks_moving_circles() {
        let mut packer = CirclePacker::with_seed(Point3::origin(), 10, 1.0, 4.0, 23).unwrap();

        let before = packer.bounding_box();
        // Relaxation spreads the clustered circles, so the packed extent
        // must grow.
        for _ in 0..500 {
            if !packer.pack(PackAlgorithm::Fast, 0.05, 0.0) {
                break;
            }
        }
        let after = packer.bounding_box();
        assert!(after.width() > before.width());
        assert!(after.height() > before.height());

        // The reported box contains every circle box.
        for circle in packer.circles() {
            let bb = circle.bounding_box();
            assert!(after.contains(&bb.min));
            assert!(after.contains(&bb.max));
        }
    }
}

mod runner_tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_full_run_all_algorithms() {
        for algorithm in [
            PackAlgorithm::Simple,
            PackAlgorithm::Fast,
            PackAlgorithm::Double,
            PackAlgorithm::Random,
        ] {
            let config = PackConfig::new()
                .with_count(14)
                .with_radius_range(1.5, 4.0)
                .with_algorithm(algorithm)
                .with_max_iterations(600)
                .with_seed(1234);

            let outcome = PackRunner::new(config).run(Point3::origin()).unwrap();

            assert!(outcome.converged, "{algorithm:?} did not converge");
            assert_eq!(outcome.circle_count(), 14);
            assert!((total_overlap(&outcome.circles)).abs() < 1.0);
            assert!(outcome.bounding_box.width() > 0.0);

            for circle in &outcome.circles {
                assert!(circle.radius() >= 1.5 && circle.radius() <= 4.0);
            }
        }
    }

    #[test]
    fn test_reference_point_is_respected() {
        let reference = Point3::new(100.0, -40.0, 7.5);
        let config = PackConfig::new()
            .with_count(10)
            .with_radius_range(1.0, 2.0)
            .with_max_iterations(500)
            .with_seed(5);

        let outcome = PackRunner::new(config).run(reference).unwrap();
        assert!(outcome.converged);

        // The arrangement stays near the reference point, and z rides
        // through untouched.
        let center = outcome.bounding_box.center();
        assert!((center.x - reference.x).abs() < 50.0);
        assert!((center.y - reference.y).abs() < 50.0);
        for circle in &outcome.circles {
            assert!((circle.center().z - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_redraw_sees_monotonic_iterations() {
        let config = PackConfig::new()
            .with_count(10)
            .with_radius_range(1.0, 3.0)
            .with_max_iterations(400)
            .with_seed(2);

        let runner = PackRunner::new(config);
        let last_seen = Arc::new(AtomicU32::new(0));
        let last_in_callback = Arc::clone(&last_seen);

        let outcome = runner
            .run_with_redraw(
                Point3::origin(),
                Box::new(move |progress, _circles| {
                    let previous = last_in_callback.swap(progress.iteration, Ordering::Relaxed);
                    assert_eq!(progress.iteration, previous + 1);
                }),
            )
            .unwrap();

        assert_eq!(last_seen.load(Ordering::Relaxed), outcome.iterations);
    }

    #[test]
    fn test_cancel_mid_run_from_callback_thread() {
        // Cancellation is honored between passes: cancel during the first
        // redraw and observe the loop stop on the next check.
        let config = PackConfig::new()
            .with_count(20)
            .with_radius_range(1.0, 3.0)
            .with_max_iterations(10_000)
            .with_seed(6);

        let runner = Arc::new(PackRunner::new(config));
        let handle = Arc::clone(&runner);

        let outcome = runner
            .run_with_redraw(
                Point3::origin(),
                Box::new(move |_progress, _circles| handle.cancel()),
            )
            .unwrap();

        assert!(outcome.cancelled);
        // The pass in flight completed before the flag was observed.
        assert_eq!(outcome.iterations, 1);
    }
}
