use linkplot::*;

#[test]
fn build_maps_names_to_data_indices() {
    let m = SelectionSyncBridge::build_index_mapping(
        &["NL", "ES", "DE"],
        &["Installation", "Manufacturing"],
    )
    .unwrap();
    assert_eq!(m.row_index_of("ES"), Some(1));
    assert_eq!(m.column_index_of("Manufacturing"), Some(1));
    assert_eq!(m.row_index_of("XX"), None);
    assert_eq!(m.row_count(), 3);
    assert_eq!(m.column_count(), 2);
}

#[test]
fn header_offset_is_applied_once() {
    let m = IndexMapping::build(&["NL", "ES", "DE"], &["Installation", "Manufacturing"]).unwrap();
    let row = m.row_index_of("DE").unwrap();
    let col = m.column_index_of("Installation").unwrap();
    let cell = PointRef::new(col, row).cell();
    assert_eq!(cell, TableCell::new(row + HEADER_OFFSET, col + HEADER_OFFSET));
    assert_eq!(cell.point(), Ok(PointRef::new(col, row)));
}

#[test]
fn bridge_reads_mapping_from_table_once() {
    let ds = DataSet::solar_employment();
    let table = TableModel::from_dataset(&ds);
    let bridge = SelectionSyncBridge::new();
    let a = bridge.mapping(&table).unwrap();
    let b = bridge.mapping(&table).unwrap();
    assert!(std::rc::Rc::ptr_eq(&a, &b));
    assert_eq!(a.row_index_of("CH"), Some(7));
    assert_eq!(a.column_index_of("Distribution"), Some(2));
}

#[test]
fn stale_mapping_detected_until_invalidated() {
    let ds = DataSet::solar_employment();
    let mut chart = ChartModel::from_dataset(&ds);
    let mut table = TableModel::from_dataset(&ds);
    let bridge = SelectionSyncBridge::new();
    bridge.cell_clicked(1, 1, &mut chart, &mut table);

    table.regenerate(&ds);
    chart = ChartModel::from_dataset(&ds);
    let outcome = bridge.cell_clicked(1, 1, &mut chart, &mut table);
    assert_eq!(
        outcome.failures,
        vec![LookupFailure::StaleMapping { cached: 0, current: 1 }]
    );
    assert!(chart.selected_points().is_empty());

    bridge.invalidate();
    let outcome = bridge.cell_clicked(1, 1, &mut chart, &mut table);
    assert!(outcome.failures.is_empty());
    assert_eq!(table.selected_cells(), vec![TableCell::new(1, 1)]);
}

#[test]
fn regenerated_table_with_new_layout_maps_after_invalidate() {
    let bridge = SelectionSyncBridge::new();
    let first = DataSet::solar_employment();
    let mut table = TableModel::from_dataset(&first);
    bridge.mapping(&table).unwrap();

    let second = DataSet::new(
        vec!["2019".into(), "2020".into()],
        vec![SeriesData::new("Wind", vec![1.0, 2.0])],
    )
    .unwrap();
    table.regenerate(&second);
    bridge.invalidate();
    let outcome = bridge.point_selection_changed(
        &PointSelectionChange::new("2020", "Wind", true),
        &mut table,
    );
    assert!(outcome.failures.is_empty());
    assert_eq!(table.selected_cells(), vec![TableCell::new(2, 1)]);
}
