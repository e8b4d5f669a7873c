use egui::Vec2;
use pumpkin_garden::placement::{place, PlacementConfig};

#[test]
fn test_sparse_layout_never_overlaps() {
    let config = PlacementConfig::default();
    let viewport = Vec2::new(2000.0, 2000.0);

    for seed in 0..25 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let placed = place(0..10, viewport, &config, &mut rng);
        assert_eq!(placed.len(), 10);

        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                let distance = (a.center - b.center).length();
                assert!(
                    distance >= config.min_distance(),
                    "seed {seed}: items {} and {} are {distance} apart",
                    a.item,
                    b.item
                );
            }
        }
    }
}

#[test]
fn test_dense_layout_still_places_everything() {
    let config = PlacementConfig {
        max_tries: 5,
        ..PlacementConfig::default()
    };
    let mut rng = fastrand::Rng::with_seed(42);
    let placed = place(0..100, Vec2::new(400.0, 400.0), &config, &mut rng);

    assert_eq!(placed.len(), 100);
    let items: Vec<usize> = placed.iter().map(|p| p.item).collect();
    assert_eq!(items, (0..100).collect::<Vec<_>>());
}

#[test]
fn test_same_seed_same_layout() {
    let config = PlacementConfig::default();
    let viewport = Vec2::new(1000.0, 700.0);
    let first = place(0..8, viewport, &config, &mut fastrand::Rng::with_seed(9));
    let second = place(0..8, viewport, &config, &mut fastrand::Rng::with_seed(9));
    assert_eq!(first, second);
}

#[test]
fn test_min_distance_is_fraction_of_footprint() {
    let config = PlacementConfig::default();
    assert!((config.min_distance() - 108.0).abs() < 1e-4);
}
