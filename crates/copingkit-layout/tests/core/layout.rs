use copingkit_core::{CopingParams, PaverConfig, PaverOption, PaverSize, Point};
use copingkit_layout::{
    generate_from_option, generate_layout, generate_layout_with_params, Edge, Paver,
    PaverCategory,
};

fn pool(w: f64, h: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
}

fn square_pavers() -> PaverConfig {
    PaverConfig::uniform(PaverSize::new(400.0, 400.0))
}

/// Shared area of two axis-aligned footprints (mm²).
fn overlap_area(a: &Paver, b: &Paver) -> f64 {
    let (a, b) = (a.bounds(), b.bounds());
    let w = a.max_x.min(b.max_x) - a.min_x.max(b.min_x);
    let h = a.max_y.min(b.max_y) - a.min_y.max(b.min_y);
    w.max(0.0) * h.max(0.0)
}

fn assert_no_overlaps(pavers: &[Paver]) {
    for (i, a) in pavers.iter().enumerate() {
        for b in &pavers[i + 1..] {
            let area = overlap_area(a, b);
            assert!(area < 1e-6, "{} overlaps {} by {} mm²", a.id, b.id, area);
        }
    }
}

#[test]
fn test_rectangular_pool_counts() {
    let layout = generate_layout(&pool(7000.0, 3000.0), &square_pavers());

    assert!(layout.is_valid());
    assert!(layout.validation.warnings.is_empty());
    assert_eq!(layout.corner_pavers.len(), 4);
    assert_eq!(layout.full_pavers.len(), 36);
    assert_eq!(layout.stripe_pavers.len(), 8);
    assert_eq!(layout.measurements.total_pavers, 48);
    assert_eq!(
        layout.measurements.total_pavers,
        layout.corner_pavers.len() + layout.full_pavers.len() + layout.stripe_pavers.len()
    );
}

#[test]
fn test_long_sides_walk_seven_pavers_from_each_end() {
    let layout = generate_layout(&pool(7000.0, 3000.0), &square_pavers());

    for edge in [Edge::North, Edge::South] {
        let count = |walk: &str| {
            let prefix = format!("full-{}-{}", edge, walk);
            layout
                .full_pavers
                .iter()
                .filter(|p| p.id.starts_with(&prefix))
                .count()
        };
        let (starts, ends) = (count("s"), count("e"));
        assert_eq!((starts, ends), (7, 7), "{} side", edge);
    }

    let stripes: Vec<_> = layout
        .stripe_pavers
        .iter()
        .filter(|p| p.edge == Edge::North)
        .collect();
    assert_eq!(stripes.len(), 2);
    for stripe in stripes {
        assert_eq!(stripe.along_edge_length(), 257.5);
        assert_eq!(stripe.depth(), 400.0);
    }
}

#[test]
fn test_short_sides_walk_two_pavers_from_each_end() {
    let layout = generate_layout(&pool(7000.0, 3000.0), &square_pavers());

    for edge in [Edge::East, Edge::West] {
        let full = layout.full_pavers.iter().filter(|p| p.edge == edge).count();
        assert_eq!(full, 4, "{} side", edge);
        for stripe in layout.stripe_pavers.iter().filter(|p| p.edge == edge) {
            assert_eq!(stripe.along_edge_length(), 282.5);
        }
    }
}

#[test]
fn test_corner_pavers_follow_rotation_table() {
    let layout = generate_layout(&pool(7000.0, 3000.0), &square_pavers());
    let expected = [
        ("corner-nw", Point::new(0.0, 0.0), 0.0),
        ("corner-ne", Point::new(7000.0, 0.0), 90.0),
        ("corner-se", Point::new(7000.0, 3000.0), 180.0),
        ("corner-sw", Point::new(0.0, 3000.0), 270.0),
    ];
    for (id, position, rotation) in expected {
        let corner = layout.find(id).unwrap();
        assert!(corner.is_corner);
        assert_eq!(corner.category, PaverCategory::Corner);
        assert_eq!(corner.position, position);
        assert_eq!(corner.rotation, rotation);
    }

    // Every corner footprint lies inside the pool rectangle
    for corner in &layout.corner_pavers {
        let b = corner.bounds();
        assert!(b.min_x >= 0.0 && b.max_x <= 7000.0);
        assert!(b.min_y >= 0.0 && b.max_y <= 3000.0);
    }
}

#[test]
fn test_north_side_positions_and_grout() {
    let layout = generate_layout(&pool(7000.0, 3000.0), &square_pavers());

    let first = layout.find("full-north-s0").unwrap();
    assert_eq!(first.position, Point::new(405.0, 0.0));
    assert_eq!(first.column_index, 1);

    let last_start = layout.find("full-north-s6").unwrap();
    assert_eq!(last_start.position, Point::new(2835.0, 0.0));

    let a = layout.find("stripe-north-a").unwrap();
    let b = layout.find("stripe-north-b").unwrap();
    assert_eq!(a.position, Point::new(3240.0, 0.0));
    assert_eq!(b.position, Point::new(3502.5, 0.0));
    assert_eq!(a.column_index, 8);
    assert_eq!(b.column_index, 9);

    let innermost_end = layout.find("full-north-e6").unwrap();
    assert_eq!(innermost_end.position, Point::new(3765.0, 0.0));
    assert_eq!(innermost_end.column_index, 10);
    assert_eq!(layout.find("full-north-e0").unwrap().column_index, 16);
}

#[test]
fn test_end_pavers_hug_the_east_wall() {
    let layout = generate_layout(&pool(7000.0, 3000.0), &square_pavers());
    let paver = layout.find("full-east-s0").unwrap();

    assert_eq!(paver.rotation, 180.0);
    let b = paver.bounds();
    assert_eq!((b.min_x, b.max_x), (6600.0, 7000.0));
    assert_eq!((b.min_y, b.max_y), (405.0, 805.0));
}

#[test]
fn test_measurements() {
    let layout = generate_layout(&pool(7000.0, 3000.0), &square_pavers());
    let m = &layout.measurements;

    assert_eq!(m.corner_pavers, 4);
    assert_eq!(m.full_pavers, 36);
    assert_eq!(m.stripe_pavers, 8);
    assert_eq!(m.per_side_counts.get(&Edge::North), Some(&16));
    assert_eq!(m.per_side_counts.get(&Edge::East), Some(&6));
    assert!((m.perimeter_m - 20.0).abs() < 1e-9);
    assert!((m.total_area_m2 - 7.264).abs() < 1e-9);
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate_layout(&pool(9100.0, 4300.0), &square_pavers());
    let second = generate_layout(&pool(9100.0, 4300.0), &square_pavers());
    assert_eq!(first, second);
}

#[test]
fn test_degenerate_outline_yields_invalid_layout() {
    let line = vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.0)];
    let layout = generate_layout(&line, &square_pavers());
    assert!(!layout.is_valid());
    assert_eq!(layout.total_pavers(), 0);
    assert_eq!(layout.validation.errors.len(), 1);

    let bad = vec![
        Point::new(0.0, 0.0),
        Point::new(f64::NAN, 0.0),
        Point::new(10.0, 10.0),
    ];
    assert!(!generate_layout(&bad, &square_pavers()).is_valid());
}

#[test]
fn test_short_side_has_no_full_pavers_and_warns() {
    let layout = generate_layout(&pool(7000.0, 800.0), &square_pavers());
    assert!(layout.is_valid());
    assert_eq!(
        layout
            .full_pavers
            .iter()
            .filter(|p| p.edge == Edge::East)
            .count(),
        0
    );
    assert!(layout
        .validation
        .warnings
        .iter()
        .any(|w| w.contains("east")));
}

#[test]
fn test_narrow_stripe_warns() {
    // 4400 mm side: 4 pavers per walk, stripe (4400 - 2*2025 - 5) / 2 = 172.5
    let layout = generate_layout(&pool(4400.0, 3000.0), &square_pavers());
    let stripe = layout.find("stripe-north-a").unwrap();
    assert_eq!(stripe.along_edge_length(), 172.5);
    assert!(layout
        .validation
        .warnings
        .iter()
        .any(|w| w.contains("north") && w.contains("minimum")));
}

#[test]
fn test_l_shaped_outline_falls_back_to_first_points() {
    let outline = vec![
        Point::new(0.0, 0.0),
        Point::new(6000.0, 0.0),
        Point::new(6000.0, 2000.0),
        Point::new(3000.0, 2000.0),
        Point::new(3000.0, 4000.0),
        Point::new(0.0, 4000.0),
    ];
    let layout = generate_layout(&outline, &square_pavers());
    assert!(layout.is_valid());
    assert_eq!(layout.corner_pavers.len(), 4);
    assert!(!layout.validation.warnings.is_empty());
}

#[test]
fn test_hexagon_falls_back_to_first_points() {
    // Six vertices turn by 60 degrees each, so there is no unique set of four
    let outline = vec![
        Point::new(1000.0, 0.0),
        Point::new(3000.0, 0.0),
        Point::new(4000.0, 1732.0),
        Point::new(3000.0, 3464.0),
        Point::new(1000.0, 3464.0),
        Point::new(0.0, 1732.0),
    ];
    let layout = generate_layout(&outline, &square_pavers());
    assert_eq!(layout.corner_pavers.len(), 4);
    assert!(layout
        .validation
        .warnings
        .iter()
        .any(|w| w.contains("first 4 points")));
}

#[test]
fn test_rectangular_sizes_on_ends() {
    let layout = generate_layout(
        &pool(7000.0, 3000.0),
        &PaverConfig::uniform(PaverSize::new(400.0, 600.0)),
    );
    for paver in &layout.full_pavers {
        assert_eq!(paver.depth(), 600.0, "{}", paver.id);
        assert_eq!(paver.along_edge_length(), 400.0, "{}", paver.id);
    }
}

#[test]
fn test_custom_grout_width() {
    let params = CopingParams {
        grout_width_mm: 10.0,
        ..Default::default()
    };
    let layout = generate_layout_with_params(&pool(7000.0, 3000.0), &square_pavers(), &params);
    assert_eq!(
        layout.find("full-north-s0").unwrap().position,
        Point::new(410.0, 0.0)
    );
}

#[test]
fn test_generate_from_option() {
    let layout = generate_from_option(
        &pool(7000.0, 3000.0),
        PaverOption::Size600x400,
        &CopingParams::default(),
    )
    .unwrap();
    assert!(layout.is_valid());
    let paver = layout.find("full-north-s0").unwrap();
    assert_eq!(paver.size, PaverSize::new(600.0, 400.0));
}

#[test]
fn test_no_preset_overlaps_itself() {
    for option in PaverOption::ALL {
        let Some(config) = option.paver_config() else {
            continue;
        };
        for (w, h) in [(7000.0, 3000.0), (9100.0, 4300.0), (12000.0, 5000.0)] {
            let layout = generate_layout(&pool(w, h), &config);
            assert!(layout.is_valid(), "{} on {}x{}", option, w, h);
            assert_no_overlaps(&layout.all_pavers());
        }
    }
}

#[test]
fn test_oblong_corners_stay_in_their_junction() {
    let layout = generate_layout(
        &pool(7000.0, 3000.0),
        &PaverConfig::uniform(PaverSize::new(400.0, 600.0)),
    );
    let ne = layout.find("corner-ne").unwrap().bounds();
    assert_eq!((ne.min_x, ne.max_x), (6400.0, 7000.0));

    let north_end = layout.find("full-north-e0").unwrap().bounds();
    assert_eq!(north_end.max_x, 6395.0);
    let east_start = layout.find("full-east-s0").unwrap().bounds();
    assert_eq!(east_start.min_y, 605.0);
}
