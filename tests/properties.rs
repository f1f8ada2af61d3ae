//! Property tests for route construction and the colony update cycle.

use proptest::prelude::*;
use u_aco::aco::{AcoConfig, AntColony};
use u_aco::distance::DistanceMatrix;

fn points(max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..max)
}

fn config(seed: u64) -> AcoConfig {
    AcoConfig::default()
        .with_n_ants(4)
        .with_n_best(2)
        .with_n_iterations(8)
        .with_decay(0.3)
        .with_seed(seed)
}

fn is_permutation(route: &[usize], n: usize) -> bool {
    let mut sorted = route.to_vec();
    sorted.sort_unstable();
    sorted == (0..n).collect::<Vec<_>>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn routes_are_permutations(pts in points(14), seed in any::<u64>()) {
        let n = pts.len();
        let mut colony = AntColony::new(DistanceMatrix::from_points(&pts), config(seed)).unwrap();
        for _ in 0..5 {
            let route = colony.construct_route();
            prop_assert!(is_permutation(&route, n), "not a permutation: {:?}", route);
        }
    }

    #[test]
    fn routes_are_permutations_with_duplicate_points(
        pts in prop::collection::vec((0u8..3, 0u8..3), 2..10),
        seed in any::<u64>(),
    ) {
        // Small integer grid: coincident nodes are common.
        let pts: Vec<(f64, f64)> = pts.into_iter().map(|(x, y)| (x as f64, y as f64)).collect();
        let n = pts.len();
        let mut colony = AntColony::new(DistanceMatrix::from_points(&pts), config(seed)).unwrap();
        colony.step();
        for s in colony.last_solutions() {
            prop_assert!(is_permutation(&s.route, n));
            prop_assert!(s.cost.is_finite());
        }
        prop_assert!(colony.pheromone_matrix().as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn transition_probabilities_are_a_distribution(
        pts in points(12),
        seed in any::<u64>(),
        mask in prop::collection::vec(any::<bool>(), 12),
    ) {
        let n = pts.len();
        let colony = AntColony::new(DistanceMatrix::from_points(&pts), config(seed)).unwrap();
        let mut visited: Vec<bool> = mask[..n].to_vec();
        visited[0] = true;

        let probs = colony.transition_probabilities(0, &visited);

        prop_assert_eq!(probs.len(), n);
        prop_assert!(probs.iter().all(|&p| p >= 0.0));
        for (j, &p) in probs.iter().enumerate() {
            if visited[j] {
                prop_assert_eq!(p, 0.0);
            }
        }
        let total: f64 = probs.iter().sum();
        prop_assert!(total == 0.0 || (total - 1.0).abs() < 1e-9, "sum = {}", total);
    }

    #[test]
    fn best_distance_never_increases(pts in points(12), seed in any::<u64>()) {
        let dm = DistanceMatrix::from_points(&pts);
        let mut colony = AntColony::new(dm.clone(), config(seed)).unwrap();

        let mut previous = f64::INFINITY;
        for _ in 0..12 {
            let (_, best) = colony.step();
            prop_assert!(best <= previous);
            previous = best;
        }

        let route = colony.best_route().unwrap();
        prop_assert!((dm.route_length(route) - colony.best_distance()).abs() < 1e-9);
    }

    #[test]
    fn evaporation_then_elite_deposit(pts in points(10), seed in any::<u64>()) {
        let n = pts.len();
        let mut colony = AntColony::new(DistanceMatrix::from_points(&pts), config(seed)).unwrap();
        colony.step();
        let before = colony.pheromone_matrix();

        colony.step();

        let mut ranked = colony.last_solutions().to_vec();
        ranked.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap());
        let mut touched = vec![false; n * n];
        for s in ranked.iter().take(2) {
            for i in 0..n {
                touched[s.route[i] * n + s.route[(i + 1) % n]] = true;
            }
        }

        let after = colony.pheromone_matrix();
        for (idx, (&a, &b)) in after.as_slice().iter().zip(before.as_slice()).enumerate() {
            let evaporated = b * 0.7;
            if touched[idx] {
                prop_assert!(a > evaporated);
            } else {
                prop_assert!((a - evaporated).abs() <= 1e-12 * b.max(1.0));
            }
        }
    }

    #[test]
    fn run_equals_reset_then_steps(pts in points(10), seed in any::<u64>()) {
        let dm = DistanceMatrix::from_points(&pts);

        let mut batch = AntColony::new(dm.clone(), config(seed)).unwrap();
        let result = batch.run(false);

        let mut manual = AntColony::new(dm, config(seed)).unwrap();
        manual.reset();
        for _ in 0..8 {
            manual.step();
        }

        prop_assert_eq!(result.best_route.as_deref(), manual.best_route());
        prop_assert_eq!(result.best_distance, manual.best_distance());
        prop_assert_eq!(batch.state(), manual.state());
    }

    #[test]
    fn reset_is_idempotent(pts in points(10), seed in any::<u64>(), steps in 0usize..5) {
        let n = pts.len();
        let mut colony = AntColony::new(DistanceMatrix::from_points(&pts), config(seed)).unwrap();
        for _ in 0..steps {
            colony.step();
        }

        colony.reset();
        let once = colony.state();
        colony.reset();

        prop_assert_eq!(&once, &colony.state());
        let uniform = 1.0 / n as f64;
        prop_assert!(once.pheromone.as_slice().iter().all(|&v| v == uniform));
    }
}
