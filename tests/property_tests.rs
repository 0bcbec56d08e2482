use lloyd::cluster::{
    assign_all, centroid, distance, lloyd_round, nearest_cluster, split_dispersed,
    squared_distance, Clustering, Kmeans,
};
use lloyd::encode::encode;
use lloyd::{Engine, EngineConfig, Point, RunStatus};
use proptest::prelude::*;

fn positions(max: usize) -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((0.0f32..800.0, 0.0f32..500.0), 1..max)
}

fn engine_with(points: &[(f32, f32)], seed: u64, threshold: f32) -> Engine {
    let cfg = EngineConfig::new()
        .with_seed(seed)
        .with_dispersion_threshold(threshold);
    let mut engine = Engine::new(cfg).unwrap();
    for &(x, y) in points {
        engine.add_point(x, y).unwrap();
    }
    engine
}

/// Id of the first centroid at minimal distance, by linear scan.
fn brute_force_nearest(p: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    for (i, c) in centroids.iter().enumerate() {
        if squared_distance(p, c) < squared_distance(p, &centroids[best]) {
            best = i;
        }
    }
    centroids[best].cluster_id
}

proptest! {
    #[test]
    fn prop_kmeans_all_assigned(
        data in prop::collection::vec(prop::array::uniform2(-10.0f32..10.0), 1..20),
        k in 1usize..5
    ) {
        // Skip if k > n
        if k <= data.len() {
            let model = Kmeans::new(k).with_seed(42);
            let labels = model.fit_predict(&data).unwrap();

            prop_assert_eq!(labels.len(), data.len());
            for &l in &labels {
                prop_assert!(l < k);
            }
        }
    }

    #[test]
    fn prop_initialize_gives_k_distinct_ids(
        pts in positions(30),
        k in 1usize..9,
        seed in any::<u64>()
    ) {
        let mut engine = engine_with(&pts, seed, 150.0);
        let result = engine.initialize(k);
        if k > pts.len() {
            prop_assert!(result.is_err());
            prop_assert!(engine.centroids().is_empty());
        } else {
            let centroids = result.unwrap();
            prop_assert_eq!(centroids.len(), k);
            let mut ids: Vec<usize> = centroids.iter().map(|c| c.cluster_id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..k).collect::<Vec<_>>());
        }
    }

    #[test]
    fn prop_initialize_assigns_nearest(pts in positions(30), seed in any::<u64>()) {
        let k = pts.len().min(3);
        let mut engine = engine_with(&pts, seed, 150.0);
        engine.initialize(k).unwrap();
        for p in engine.points() {
            prop_assert_eq!(p.cluster_id, brute_force_nearest(p, engine.centroids()));
        }
    }

    #[test]
    fn prop_round_labels_are_nearest(pts in positions(40), seed in any::<u64>()) {
        let k = pts.len().min(4);
        let mut engine = engine_with(&pts, seed, 150.0);
        engine.initialize(k).unwrap();

        let round = lloyd_round(engine.points(), engine.centroids());
        prop_assert_eq!(round.centroids.len(), k);
        for (p, &label) in engine.points().iter().zip(&round.labels) {
            prop_assert_eq!(label, brute_force_nearest(p, &round.centroids));
            prop_assert_eq!(Some(label), nearest_cluster(p, &round.centroids));
        }
        prop_assert_eq!(assign_all(engine.points(), &round.centroids), Some(round.labels.clone()));
    }

    #[test]
    fn prop_non_empty_centroids_are_member_means(pts in positions(40), seed in any::<u64>()) {
        let k = pts.len().min(3);
        let mut engine = engine_with(&pts, seed, 150.0);
        engine.initialize(k).unwrap();

        let round = lloyd_round(engine.points(), engine.centroids());
        for c in &round.centroids {
            if round.empty_clusters.contains(&c.cluster_id) {
                continue;
            }
            let mean = centroid(engine.members(c.cluster_id)).unwrap();
            prop_assert!((mean.x - c.x).abs() < 1e-3);
            prop_assert!((mean.y - c.y).abs() < 1e-3);
        }
    }

    #[test]
    fn prop_run_keeps_every_point_in_an_existing_cluster(
        pts in positions(40),
        seed in any::<u64>(),
        threshold in 50.0f32..300.0
    ) {
        let k = pts.len().min(2);
        let mut engine = engine_with(&pts, seed, threshold);
        engine.initialize(k).unwrap();
        let outcome = engine.run().unwrap();

        prop_assert_eq!(outcome.status, RunStatus::Completed);
        prop_assert_eq!(outcome.points.len(), pts.len());
        let ids: Vec<usize> = outcome.centroids.iter().map(|c| c.cluster_id).collect();
        for p in &outcome.points {
            prop_assert!(ids.contains(&p.cluster_id));
        }
        // Centroid ids stay aligned with list position, even after splits.
        for (i, c) in outcome.centroids.iter().enumerate() {
            prop_assert_eq!(c.cluster_id, i);
        }
    }

    #[test]
    fn prop_tight_clusters_never_split(
        pts in prop::collection::vec((0.0f32..10.0, 0.0f32..10.0), 1..20)
    ) {
        let mut points: Vec<Point> = pts
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(format!("p{i}"), x, y, 0))
            .collect();
        let mean = centroid(&points).unwrap();
        let mut centroids = vec![Point::centroid("c0", mean.x, mean.y, 0)];

        // Every member lies within the 10x10 box, so within sqrt(200) of the mean.
        let report = split_dispersed(&mut points, &mut centroids, 15.0, String::new);
        prop_assert!(report.is_empty());
        prop_assert_eq!(centroids.len(), 1);
    }

    #[test]
    fn prop_single_point_centroid_is_exact(x in -1e4f32..1e4, y in -1e4f32..1e4) {
        let p = Point::at(x, y);
        let c = centroid([&p]).unwrap();
        prop_assert_eq!(c.position(), [x, y]);
    }

    #[test]
    fn prop_encode_ignores_order(s in "[a-zA-Z0-9 ]{0,16}") {
        let reversed: String = s.chars().rev().collect();
        prop_assert_eq!(encode(&s), encode(&reversed));
        let ascii_sum: u64 = s.bytes().map(u64::from).sum();
        prop_assert_eq!(encode(&s), ascii_sum);
    }
}

#[test]
fn add_point_before_initialize_is_cluster_zero() {
    let mut engine = Engine::new(EngineConfig::new()).unwrap();
    for i in 0..5 {
        let p = engine.add_point(i as f32 * 100.0, 50.0).unwrap();
        assert_eq!(p.cluster_id, 0);
    }
}

#[test]
fn two_clouds_converge_to_their_means() {
    let mut pts = Vec::new();
    for i in 0..20 {
        let dx = (i % 5) as f32 * 4.0;
        let dy = (i / 5) as f32 * 4.0;
        pts.push((100.0 + dx, 100.0 + dy));
        pts.push((600.0 + dx, 350.0 + dy));
    }
    // Both clouds span 16x12 around (108, 106) and (608, 356).
    for seed in 0..10 {
        let mut engine = engine_with(&pts, seed, 300.0);
        engine.initialize(2).unwrap();
        let outcome = engine.run().unwrap();

        assert_eq!(outcome.centroids.len(), 2);
        for target in [Point::at(108.0, 106.0), Point::at(608.0, 356.0)] {
            let nearest = outcome
                .centroids
                .iter()
                .map(|c| distance(c, &target))
                .fold(f32::INFINITY, f32::min);
            assert!(nearest < 1e-2, "seed {seed}: no centroid near {:?}", target.position());
        }
    }
}
