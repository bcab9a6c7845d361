use linkplot::*;

fn demo() -> (ChartModel, TableModel) {
    let ds = DataSet::solar_employment();
    (ChartModel::from_dataset(&ds), TableModel::from_dataset(&ds))
}

#[test]
fn drag_region_selects_exactly_the_points_inside() {
    let bridge = SelectionSyncBridge::new();
    let (mut chart, mut table) = demo();
    let region = Region::new(0.0, 3.0, 0.0, 100_000.0);
    let outcome = bridge.select_area(&region, &mut chart, &mut table);

    let mut expected = Vec::new();
    expected.extend((0..=3).map(|i| PointRef::new(0, i)));
    expected.extend((0..=1).map(|i| PointRef::new(1, i)));
    expected.extend((0..=3).map(|i| PointRef::new(2, i)));
    assert_eq!(chart.selected_points(), expected);
    assert_eq!(outcome.selected, expected);
    assert_eq!(outcome.cells_written, expected.len());

    let cells: Vec<TableCell> = expected.iter().map(|p| p.cell()).collect();
    let mut marked = table.selected_cells();
    marked.sort_by_key(|c| (c.column, c.row));
    assert_eq!(marked, cells);
}

#[test]
fn region_bounds_are_inclusive() {
    let bridge = SelectionSyncBridge::new();
    let (mut chart, mut table) = demo();
    // Exactly the Manufacturing value for DE.
    let region = Region::new(2.0, 2.0, 150_000.0, 150_000.0);
    bridge.select_area(&region, &mut chart, &mut table);
    assert_eq!(chart.selected_points(), vec![PointRef::new(1, 2)]);
    assert_eq!(table.selected_cells(), vec![TableCell::new(3, 2)]);
}

#[test]
fn area_selection_keeps_existing_selection() {
    let bridge = SelectionSyncBridge::new();
    let (mut chart, mut table) = demo();
    bridge.cell_clicked(8, 1, &mut chart, &mut table);
    bridge.select_area(&Region::new(0.0, 0.0, 0.0, 1e6), &mut chart, &mut table);
    assert_eq!(chart.selected_points().len(), 4);
    assert!(chart.is_selected(PointRef::new(0, 7)));
}

#[test]
fn area_outcome_lists_only_newly_selected_points() {
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(EventKind::AREA_SELECTION));
    let bridge = SelectionSyncBridge::with_events(events);
    let (mut chart, mut table) = demo();
    bridge.cell_clicked(1, 1, &mut chart, &mut table);
    assert!(chart.is_selected(PointRef::new(0, 0)));

    let outcome = bridge.select_area(&Region::new(0.0, 0.0, 0.0, 1e6), &mut chart, &mut table);
    assert_eq!(outcome.selected, vec![PointRef::new(1, 0), PointRef::new(2, 0)]);
    assert_eq!(outcome.cells_written, 2);
    let ev = rx.try_recv().unwrap();
    assert_eq!(
        ev.points.unwrap().selected,
        vec![PointRef::new(1, 0), PointRef::new(2, 0)]
    );

    // Nothing new inside the region: no selection change reported.
    let again = bridge.select_area(&Region::new(0.0, 0.0, 0.0, 1e6), &mut chart, &mut table);
    assert!(!again.changed());
    assert_eq!(chart.selected_points().len(), 3);
}

#[test]
fn canvas_click_clears_exactly_the_selected_set() {
    let bridge = SelectionSyncBridge::new();
    let (mut chart, mut table) = demo();
    bridge.cell_clicked(1, 0, &mut chart, &mut table);
    bridge.cell_clicked(5, 2, &mut chart, &mut table);
    let before = chart.selected_points();
    assert_eq!(before.len(), 4);

    let outcome = bridge.clear_selection(&mut chart, &mut table);
    assert_eq!(outcome.unselected, before);
    assert!(outcome.selected.is_empty());
    assert!(chart.selected_points().is_empty());
    assert!(table.selected_cells().is_empty());
}

#[test]
fn canvas_click_without_selection_is_a_no_op() {
    let bridge = SelectionSyncBridge::new();
    let (mut chart, mut table) = demo();
    let outcome = bridge.clear_selection(&mut chart, &mut table);
    assert!(!outcome.changed());
    assert!(outcome.failures.is_empty());
}
