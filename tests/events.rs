use linkplot::*;

fn setup(filter: EventFilter) -> (
    SelectionSyncBridge,
    std::sync::mpsc::Receiver<SyncEvent>,
    ChartModel,
    TableModel,
) {
    let ctrl = EventController::new();
    let rx = ctrl.subscribe(filter);
    let ds = DataSet::solar_employment();
    (
        SelectionSyncBridge::with_events(ctrl),
        rx,
        ChartModel::from_dataset(&ds),
        TableModel::from_dataset(&ds),
    )
}

#[test]
fn row_header_click_reports_click_and_selection() {
    let (bridge, rx, mut chart, mut table) = setup(EventFilter::all());
    bridge.cell_clicked(4, 0, &mut chart, &mut table);
    let ev = rx.try_recv().unwrap();
    assert!(ev.kinds.contains(EventKind::ROW_HEADER_CLICK | EventKind::POINT_SELECTED));
    assert!(!ev.kinds.contains(EventKind::POINT_UNSELECTED));
    assert_eq!(ev.cell.unwrap().cell, TableCell::new(4, 0));
    assert_eq!(ev.points.unwrap().selected.len(), 3);
    assert!(rx.try_recv().is_err());
}

#[test]
fn filter_only_delivers_matching_kinds() {
    let (bridge, rx, mut chart, mut table) = setup(EventFilter::only(EventKind::SELECTION_CLEARED));
    bridge.cell_clicked(1, 1, &mut chart, &mut table);
    bridge.select_area(&Region::new(0.0, 7.0, 0.0, 1e6), &mut chart, &mut table);
    assert!(rx.try_recv().is_err());

    bridge.clear_selection(&mut chart, &mut table);
    let ev = rx.try_recv().unwrap();
    assert!(ev.kinds.contains(EventKind::SELECTION_CLEARED | EventKind::POINT_UNSELECTED));
    assert_eq!(ev.points.unwrap().unselected.len(), 24);
}

#[test]
fn lookup_failures_and_invalidation_are_reported() {
    let (bridge, rx, mut chart, mut table) = setup(EventFilter::only(
        EventKind::LOOKUP_FAILED | EventKind::MAPPING_INVALIDATED,
    ));
    bridge.cell_clicked(0, 0, &mut chart, &mut table);
    let ev = rx.try_recv().unwrap();
    assert!(ev.kinds.contains(EventKind::LOOKUP_FAILED | EventKind::CELL_CLICK));
    assert_eq!(ev.failure.unwrap().messages.len(), 1);

    bridge.invalidate();
    let ev = rx.try_recv().unwrap();
    assert_eq!(ev.kinds, EventKind::MAPPING_INVALIDATED);
}

#[test]
fn area_event_carries_region() {
    let (bridge, rx, mut chart, mut table) = setup(EventFilter::only(EventKind::AREA_SELECTION));
    bridge.select_area(&Region::new(0.0, 3.0, 0.0, 100_000.0), &mut chart, &mut table);
    let ev = rx.try_recv().unwrap();
    let area = ev.area.unwrap();
    assert_eq!((area.x_min, area.x_max, area.y_min, area.y_max), (0.0, 3.0, 0.0, 100_000.0));
    assert_eq!(ev.points.unwrap().selected.len(), 10);
}
