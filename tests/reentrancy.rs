use std::rc::Rc;

use linkplot::*;

/// Chart that echoes every programmatic change back into the bridge, the way
/// a widget firing its own select event synchronously would.
struct EchoingChart {
    inner: ChartModel,
    bridge: Rc<SelectionSyncBridge>,
    echo_table: TableModel,
    echoes: Vec<SyncOutcome>,
}

impl ChartWidget for EchoingChart {
    fn series_count(&self) -> usize {
        self.inner.series_count()
    }

    fn point(&self, point: PointRef) -> Option<ChartPoint> {
        self.inner.point(point)
    }

    fn points(&self) -> Vec<PointRef> {
        self.inner.points()
    }

    fn selected_points(&self) -> Vec<PointRef> {
        self.inner.selected_points()
    }

    fn select_silent(
        &mut self,
        point: PointRef,
        selected: bool,
    ) -> Result<PointSelectionChange, LookupFailure> {
        let change = self.inner.select_silent(point, selected)?;
        let echo = self
            .bridge
            .point_selection_changed(&change, &mut self.echo_table);
        self.echoes.push(echo);
        Ok(change)
    }
}

fn setup() -> (Rc<SelectionSyncBridge>, EchoingChart, TableModel) {
    let ds = DataSet::solar_employment();
    let bridge = Rc::new(SelectionSyncBridge::new());
    let chart = EchoingChart {
        inner: ChartModel::from_dataset(&ds),
        bridge: Rc::clone(&bridge),
        echo_table: TableModel::from_dataset(&ds),
        echoes: Vec::new(),
    };
    (bridge, chart, TableModel::from_dataset(&ds))
}

#[test]
fn callback_during_pass_does_not_start_a_second_pass() {
    let (bridge, mut chart, mut table) = setup();
    let outcome = bridge.cell_clicked(2, 1, &mut chart, &mut table);

    assert_eq!(bridge.passes(), 1);
    assert_eq!(bridge.suppressed_reentries(), 1);
    assert_eq!(chart.echoes.len(), 1);
    assert!(chart.echoes[0].suppressed);
    assert!(!chart.echoes[0].changed());
    assert!(chart.echo_table.selected_cells().is_empty());

    assert_eq!(outcome.selected, vec![PointRef::new(0, 1)]);
    assert_eq!(table.selected_cells(), vec![TableCell::new(2, 1)]);
    assert!(!bridge.in_pass());
}

#[test]
fn one_pass_per_user_event_even_with_fan_out() {
    let (bridge, mut chart, mut table) = setup();
    bridge.cell_clicked(0, 2, &mut chart, &mut table);
    assert_eq!(bridge.passes(), 1);
    assert_eq!(bridge.suppressed_reentries(), 8);

    bridge.clear_selection(&mut chart, &mut table);
    assert_eq!(bridge.passes(), 2);
    assert_eq!(bridge.suppressed_reentries(), 16);
    assert!(table.selected_cells().is_empty());
}

#[test]
fn guard_is_released_between_events() {
    let (bridge, mut chart, mut table) = setup();
    bridge.cell_clicked(1, 1, &mut chart, &mut table);
    assert!(!bridge.in_pass());
    let outcome = bridge.point_selection_changed(
        &PointSelectionChange::new("NL", "Installation", false),
        &mut table,
    );
    assert!(!outcome.suppressed);
    assert_eq!(bridge.passes(), 2);
    assert_eq!(table.is_selected(TableCell::new(1, 1)), Some(false));
}
