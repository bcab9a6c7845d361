use linkplot::panels::ChartAction;
use linkplot::*;

fn app_with(ctrl: &SelectionController, events: &EventController) -> LinkedApp {
    let cfg = SyncConfig {
        controllers: Controllers {
            selection: Some(ctrl.clone()),
            event: Some(events.clone()),
        },
        ..Default::default()
    };
    LinkedApp::new(DataSet::solar_employment(), cfg)
}

#[test]
fn point_click_reaches_table_and_controller() {
    let ctrl = SelectionController::new();
    let mut app = app_with(&ctrl, &EventController::new());
    let rx = ctrl.subscribe();

    app.handle_chart_action(ChartAction::PointClicked {
        point: PointRef::new(1, 2),
        accumulate: false,
    });
    assert_eq!(app.table().selected_cells(), vec![TableCell::new(3, 2)]);
    assert!(app.is_consistent());

    let snap = rx.try_recv().unwrap();
    assert_eq!(
        snap,
        vec![SelectedPoint {
            series: "Manufacturing".into(),
            category: "DE".into(),
            value: 150000.0,
        }]
    );

    // A plain click elsewhere replaces the selection on both sides.
    app.handle_chart_action(ChartAction::PointClicked {
        point: PointRef::new(0, 0),
        accumulate: false,
    });
    assert_eq!(app.table().selected_cells(), vec![TableCell::new(1, 1)]);
    assert!(app.is_consistent());
}

#[test]
fn chart_and_table_interactions_stay_consistent() {
    let ctrl = SelectionController::new();
    let mut app = app_with(&ctrl, &EventController::new());
    app.handle_cell_click(TableCell::row_header(5));
    app.handle_cell_click(TableCell::column_header(1));
    app.handle_chart_action(ChartAction::PointClicked {
        point: PointRef::new(2, 6),
        accumulate: true,
    });
    app.handle_chart_action(ChartAction::AreaSelected(Region::new(6.0, 7.0, 0.0, 1e6)));
    assert!(app.is_consistent());
    assert_eq!(ctrl.selected().len(), app.chart().selected_points().len());

    app.handle_chart_action(ChartAction::CanvasClicked);
    assert!(app.chart().selected_points().is_empty());
    assert!(app.table().selected_cells().is_empty());
    assert!(ctrl.selected().is_empty());
}

#[test]
fn loading_a_dataset_invalidates_the_mapping() {
    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(
        EventKind::DATASET_LOADED | EventKind::MAPPING_INVALIDATED,
    ));
    let mut app = app_with(&SelectionController::new(), &events);
    app.handle_cell_click(TableCell::new(1, 1));

    let ds = DataSet::new(
        vec!["Q1".into(), "Q2".into(), "Q3".into()],
        vec![
            SeriesData::new("North", vec![1.0, 2.0, 3.0]),
            SeriesData::new("South", vec![3.0, 2.0, 1.0]),
        ],
    )
    .unwrap()
    .with_title("Quarterly");
    app.load_dataset(ds);

    let kinds: Vec<EventKind> = rx.try_iter().map(|e| e.kinds).collect();
    assert_eq!(
        kinds,
        vec![EventKind::MAPPING_INVALIDATED, EventKind::DATASET_LOADED]
    );
    assert_eq!(app.headline(), Some("Quarterly"));
    assert!(app.table().selected_cells().is_empty());

    let outcome = app.handle_cell_click(TableCell::new(3, 2));
    assert!(outcome.failures.is_empty());
    assert_eq!(app.chart().selected_points(), vec![PointRef::new(1, 2)]);
    assert!(app.is_consistent());
}

#[test]
fn open_path_keeps_current_dataset_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{").unwrap();
    let mut app = LinkedApp::new(DataSet::solar_employment(), SyncConfig::default());
    assert!(app.open_path(&path).is_err());
    assert_eq!(app.dataset(), &DataSet::solar_employment());
    assert!(app.status().is_some());
}

#[test]
fn save_then_open_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.yaml");
    let mut app = LinkedApp::new(DataSet::solar_employment(), SyncConfig::default());
    app.save_path(&path).unwrap();
    app.open_path(&path).unwrap();
    assert_eq!(app.dataset(), &DataSet::solar_employment());
}

#[test]
fn controller_requests_are_applied_through_the_bridge() {
    let ctrl = SelectionController::new();
    let mut app = app_with(&ctrl, &EventController::new());
    ctrl.request_select("Distribution", "UK", true);
    ctrl.request_select("Wind", "UK", true);
    app.apply_controllers();

    assert_eq!(app.table().selected_cells(), vec![TableCell::new(6, 3)]);
    assert_eq!(ctrl.selected()[0].value, 24377.0);

    ctrl.request_clear();
    app.apply_controllers();
    assert!(app.table().selected_cells().is_empty());
    assert!(ctrl.selected().is_empty());
}
