use copingkit_core::{CopingParams, PaverConfig, PaverSize, Point};
use copingkit_layout::{
    clamp_drag_distance, filter_pavers, generate_layout, max_extension_distance, BoundaryKind,
    BoundaryPolygon, CopingLayout, Edge, Paver,
};

fn layout() -> CopingLayout {
    let outline = vec![
        Point::new(0.0, 0.0),
        Point::new(7000.0, 0.0),
        Point::new(7000.0, 3000.0),
        Point::new(0.0, 3000.0),
    ];
    generate_layout(&outline, &PaverConfig::uniform(PaverSize::new(400.0, 400.0)))
}

fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Point> {
    vec![
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
    ]
}

fn north_row(layout: &CopingLayout) -> Vec<Paver> {
    layout
        .all_pavers()
        .into_iter()
        .filter(|p| p.edge == Edge::North && p.row_index == 0)
        .collect()
}

#[test]
fn test_boundary_625_away_clamps_to_623() {
    let layout = layout();
    let fence = BoundaryPolygon::containing(rect(-2000.0, -625.0, 9000.0, 5000.0));
    let row = north_row(&layout);

    assert_eq!(max_extension_distance(&row, Edge::North, &[fence.clone()]), 625.0);

    let clamp = clamp_drag_distance(1000.0, &row, Edge::North, &[fence], &CopingParams::default());
    assert_eq!(clamp.clamped, 623.0);
    assert!(clamp.boundary_reached);
}

#[test]
fn test_drag_short_of_boundary_is_not_clamped() {
    let layout = layout();
    let fence = BoundaryPolygon::containing(rect(-2000.0, -625.0, 9000.0, 5000.0));
    let clamp = clamp_drag_distance(
        500.0,
        &north_row(&layout),
        Edge::North,
        &[fence],
        &CopingParams::default(),
    );
    assert_eq!(clamp.clamped, 500.0);
    assert!(!clamp.boundary_reached);
}

#[test]
fn test_nearest_boundary_wins() {
    let layout = layout();
    let fence = BoundaryPolygon::containing(rect(-2000.0, -2000.0, 9000.0, 5000.0));
    // Shed above the middle of the north side
    let shed = BoundaryPolygon::obstacle(rect(3000.0, -900.0, 3500.0, -450.0)).with_label("shed");
    let clamp = clamp_drag_distance(
        1500.0,
        &north_row(&layout),
        Edge::North,
        &[fence, shed],
        &CopingParams::default(),
    );
    assert_eq!(clamp.max_distance, 450.0);
    assert_eq!(clamp.clamped, 448.0);
}

#[test]
fn test_negative_or_invalid_requests_clamp_to_zero() {
    let layout = layout();
    let row = north_row(&layout);
    let params = CopingParams::default();
    assert_eq!(clamp_drag_distance(-50.0, &row, Edge::North, &[], &params).clamped, 0.0);
    assert_eq!(
        clamp_drag_distance(f64::NAN, &row, Edge::North, &[], &params).clamped,
        0.0
    );
}

#[test]
fn test_filter_drops_pavers_outside_containing_boundary() {
    let layout = layout();
    let fence = BoundaryPolygon::containing(rect(-2000.0, -2000.0, 3000.0, 5000.0));
    let row: Vec<Paver> = north_row(&layout)
        .into_iter()
        .map(|p| p.translated(0.0, -500.0))
        .collect();
    let total = row.len();

    let result = filter_pavers(row, &[fence]);
    assert!(result.truncated);
    assert_eq!(result.kept.len() + result.dropped_ids.len(), total);
    assert!(result.dropped_ids.iter().any(|id| id == "full-north-e0"));
    assert!(result.kept.iter().all(|p| p.bounds().max_x <= 3000.0));
}

#[test]
fn test_filter_drops_pavers_overlapping_obstacle() {
    let layout = layout();
    let shed = BoundaryPolygon::obstacle(rect(500.0, -700.0, 700.0, -450.0));
    let row: Vec<Paver> = north_row(&layout)
        .into_iter()
        .map(|p| p.translated(0.0, -500.0))
        .collect();

    let result = filter_pavers(row, &[shed]);
    assert_eq!(result.dropped_ids, vec!["full-north-s0".to_string()]);
}

#[test]
fn test_filter_without_boundaries_keeps_everything() {
    let layout = layout();
    let row = north_row(&layout);
    let total = row.len();
    let result = filter_pavers(row, &[]);
    assert_eq!(result.kept.len(), total);
    assert!(!result.truncated);
}

#[test]
fn test_boundary_serde_defaults_to_containing() {
    let json = r#"{"points":[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10}]}"#;
    let boundary: BoundaryPolygon = serde_json::from_str(json).unwrap();
    assert_eq!(boundary.kind, BoundaryKind::Containing);
    assert!(boundary.validate().is_ok());
    assert!(BoundaryPolygon::obstacle(vec![Point::new(0.0, 0.0)])
        .validate()
        .is_err());
}
