use copingkit_core::{CopingParams, PaverConfig, PaverSize, Point};
use copingkit_layout::{
    cancel_extension, commit_extension, generate_layout, preview_extension, BoundaryPolygon,
    CopingLayout, Edge, ExtensionSense, Measurements, SelectionState,
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

#[test]
fn test_preview_is_idempotent() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let state = SelectionState::new().select_row(&pavers, Edge::North, 0);

    let (once, first) =
        preview_extension(state, &pavers, 850.0, ExtensionSense::Outward, &[], &params).unwrap();
    let (twice, second) = preview_extension(
        once.clone(),
        &pavers,
        850.0,
        ExtensionSense::Outward,
        &[],
        &params,
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(once, twice);
    assert_eq!(first.full_rows, 2);
    assert_eq!(twice.extension_pavers().len(), 18 * 2);
}

#[test]
fn test_preview_replaces_previous_preview() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let state = SelectionState::new().toggle_selection("full-north-s0", false);

    let (state, _) =
        preview_extension(state, &pavers, 1300.0, ExtensionSense::Outward, &[], &params).unwrap();
    assert_eq!(state.extension_pavers().len(), 3);

    let (state, _) =
        preview_extension(state, &pavers, 450.0, ExtensionSense::Outward, &[], &params).unwrap();
    assert_eq!(state.extension_pavers().len(), 1);
}

#[test]
fn test_preview_against_boundary_adds_cut_row() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let fence = BoundaryPolygon::containing(rect(-2000.0, -625.0, 9000.0, 5000.0));
    let state = SelectionState::new().toggle_selection("full-north-s0", false);

    let (_, preview) = preview_extension(
        state,
        &pavers,
        1000.0,
        ExtensionSense::Outward,
        &[fence],
        &params,
    )
    .unwrap();

    assert_eq!(preview.clamp.clamped, 623.0);
    assert!(preview.clamp.boundary_reached);
    assert_eq!(preview.full_rows, 1);
    assert_eq!(preview.cut_row_depth, Some(218.0));
    assert_eq!(preview.pavers.len(), 2);
    assert!(preview.pavers[1].is_partial);
}

#[test]
fn test_corner_preview_needs_direction() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let state = SelectionState::new().toggle_selection("corner-nw", false);

    let err = preview_extension(
        state.clone(),
        &pavers,
        400.0,
        ExtensionSense::Outward,
        &[],
        &params,
    )
    .unwrap_err();
    assert!(err.needs_corner_direction());

    let state = state.with_corner_direction("corner-nw", Edge::West);
    let (_, preview) =
        preview_extension(state, &pavers, 400.0, ExtensionSense::Outward, &[], &params).unwrap();
    assert_eq!(preview.direction, Edge::West);
    assert_eq!(preview.pavers[0].id, "ext-corner-nw-west-row1");
}

#[test]
fn test_commit_appends_preview() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let state = SelectionState::new().select_row(&pavers, Edge::North, 0);

    let (state, _) =
        preview_extension(state, &pavers, 850.0, ExtensionSense::Outward, &[], &params).unwrap();
    let (state, result) = commit_extension(state, &pavers, &[]);

    assert!(!state.has_preview());
    assert_eq!(state.len(), 18);
    assert_eq!(result.pavers.len(), 48 + 36);
    assert_eq!(result.added_ids.len(), 36);
    assert!(!result.truncated);

    let m = Measurements::from_pavers(&result.pavers, 20_000.0);
    assert_eq!(m.total_pavers, 84);
    assert_eq!(m.corner_pavers, 4);
}

#[test]
fn test_commit_drops_pavers_crossing_boundary() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let state = SelectionState::new().select_row(&pavers, Edge::North, 0);

    // Preview ignores the shed, the commit filter catches it
    let (state, _) =
        preview_extension(state, &pavers, 400.0, ExtensionSense::Outward, &[], &params).unwrap();
    let shed = BoundaryPolygon::obstacle(rect(500.0, -300.0, 700.0, -100.0));
    let (_, result) = commit_extension(state, &pavers, &[shed]);

    assert!(result.truncated);
    assert_eq!(result.dropped_ids, vec!["ext-full-north-s0-row1".to_string()]);
    assert_eq!(result.pavers.len(), 48 + 17);
}

#[test]
fn test_commit_replaces_same_id() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let select = || SelectionState::new().toggle_selection("full-north-s0", false);

    let (state, _) =
        preview_extension(select(), &pavers, 400.0, ExtensionSense::Outward, &[], &params)
            .unwrap();
    let (_, first) = commit_extension(state, &pavers, &[]);
    assert_eq!(first.pavers.len(), 49);

    let (state, _) = preview_extension(
        select(),
        &first.pavers,
        400.0,
        ExtensionSense::Outward,
        &[],
        &params,
    )
    .unwrap();
    let (_, second) = commit_extension(state, &first.pavers, &[]);
    assert_eq!(second.pavers.len(), 49);
}

#[test]
fn test_commit_without_preview_is_noop() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let (_, result) = commit_extension(SelectionState::new(), &pavers, &[]);
    assert_eq!(result.pavers, pavers);
    assert!(result.added_ids.is_empty());
}

#[test]
fn test_cancel_discards_preview() {
    let layout = layout();
    let pavers = layout.all_pavers();
    let params = CopingParams::default();
    let state = SelectionState::new().toggle_selection("full-north-s0", false);

    let (state, _) =
        preview_extension(state, &pavers, 850.0, ExtensionSense::Outward, &[], &params).unwrap();
    assert!(state.has_preview());

    let state = cancel_extension(state);
    assert!(!state.has_preview());
    assert!(state.is_selected("full-north-s0"));
}

#[test]
fn test_regrown_rows_keep_their_ids() {
    let layout = layout();
    let params = CopingParams::default();
    let commit = |committed: &[copingkit_layout::Paver], id: &str, drag: f64| {
        let state = SelectionState::new().toggle_selection(id, false);
        let (state, _) =
            preview_extension(state, committed, drag, ExtensionSense::Outward, &[], &params)
                .unwrap();
        commit_extension(state, committed, &[]).1.pavers
    };

    let pavers = commit(&layout.all_pavers(), "full-north-s0", 400.0);
    let pavers = commit(&pavers, "ext-full-north-s0-row1", 400.0);
    assert!(pavers.iter().any(|p| p.id == "ext-full-north-s0-row2"));
    assert_eq!(pavers.len(), 50);

    // Dragging the waterline paver again lands on the same ids
    let pavers = commit(&pavers, "full-north-s0", 800.0);
    assert_eq!(pavers.len(), 50);
    let row2: Vec<_> = pavers
        .iter()
        .filter(|p| p.row_index == 2 && p.column_index == 1 && p.edge == Edge::North)
        .collect();
    assert_eq!(row2.len(), 1);
}
