//! Selection sync bridge between chart points and table cells.
//!
//! The bridge translates a selection change on one side into the matching
//! mutation on the other side. It only talks to the chart and the table
//! through the narrow [`ChartWidget`] and [`TableView`] contracts.
//!
//! Direction matters:
//! - point -> cell is a direct write: the chart already decided the new state
//!   before notifying, the bridge copies it into the cell marker.
//! - cell -> point is read-then-invert: the table only knows each cell's
//!   current flag, so the bridge selects `!current` for every cell involved.
//!
//! All `&self` entry points that mutate run inside a *pass*. A pass holds a
//! reentrancy guard for its duration: if the chart implementation calls back
//! into the bridge while a pass is running (for instance because it fires
//! its own select notification synchronously), the nested call is counted
//! and ignored. Failed lookups are logged and skipped, never returned from an
//! entry point, so an event callback always runs to completion.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::data::chart::Region;
use crate::data::coords::{to_table_index, CellRole, PointRef, TableCell};
use crate::data::mapping::{IndexMapping, MappingCache};
use crate::error::{DataError, LookupFailure};
use crate::events::{
    AreaMeta, CellMeta, EventController, EventKind, FailureMeta, PointMeta, SyncEvent,
};

// ─────────────────────────────────────────────────────────────────────────────
// Contracts
// ─────────────────────────────────────────────────────────────────────────────

/// Read view of one chart point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub category: String,
    pub series_name: String,
    pub x: f64,
    pub y: f64,
    pub selected: bool,
}

/// A point's new selection state, as reported by the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSelectionChange {
    pub category: String,
    pub series_name: String,
    pub is_selected: bool,
}

impl PointSelectionChange {
    pub fn new(category: impl Into<String>, series_name: impl Into<String>, is_selected: bool) -> Self {
        Self {
            category: category.into(),
            series_name: series_name.into(),
            is_selected,
        }
    }
}

/// Set one table cell's selected marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMutation {
    pub cell: TableCell,
    pub set_selected: bool,
}

/// Set one chart point's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointMutation {
    pub point: PointRef,
    pub set_selected: bool,
}

/// What the bridge needs from a chart.
pub trait ChartWidget {
    fn series_count(&self) -> usize;

    fn point(&self, point: PointRef) -> Option<ChartPoint>;

    /// Every point of every series, series-major.
    fn points(&self) -> Vec<PointRef>;

    /// Currently selected points.
    fn selected_points(&self) -> Vec<PointRef>;

    /// Set a point's selection without firing the chart's own select/unselect
    /// notification. Returns the resulting change.
    fn select_silent(
        &mut self,
        point: PointRef,
        selected: bool,
    ) -> Result<PointSelectionChange, LookupFailure>;
}

/// What the bridge needs from a table.
///
/// Row 0 is the header row and column 0 the category column; `row_count` and
/// `column_count` include them.
pub trait TableView {
    /// Bumped every time the table is regenerated.
    fn generation(&self) -> u64;

    /// Category labels of the body rows, in row order.
    fn category_labels(&self) -> Vec<String>;

    /// Series names of the data columns, in column order (without the category column header).
    fn series_labels(&self) -> Vec<String>;

    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Selected marker of a data cell. `None` for header positions and cells outside the table.
    fn is_selected(&self, cell: TableCell) -> Option<bool>;

    /// Write a data cell's selected marker. Must not emit a click.
    fn set_selected(&mut self, cell: TableCell, selected: bool) -> Result<(), LookupFailure>;
}

// ─────────────────────────────────────────────────────────────────────────────
// SyncOutcome
// ─────────────────────────────────────────────────────────────────────────────

/// Result of one entry point call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutcome {
    /// Points that ended up selected.
    pub selected: Vec<PointRef>,
    /// Points that ended up unselected.
    pub unselected: Vec<PointRef>,
    /// Cell markers written.
    pub cells_written: usize,
    /// Lookups that failed; the corresponding mutations were skipped.
    pub failures: Vec<LookupFailure>,
    /// `true` if the call arrived while another pass was running and was ignored.
    pub suppressed: bool,
}

impl SyncOutcome {
    fn suppressed() -> Self {
        Self {
            suppressed: true,
            ..Default::default()
        }
    }

    pub fn changed(&self) -> bool {
        self.cells_written > 0 || !self.selected.is_empty() || !self.unselected.is_empty()
    }

    fn record(&mut self, point: PointRef, selected: bool) {
        if selected {
            self.selected.push(point);
        } else {
            self.unselected.push(point);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SelectionSyncBridge
// ─────────────────────────────────────────────────────────────────────────────

/// Keeps chart point selection and table cell markers consistent.
#[derive(Default)]
pub struct SelectionSyncBridge {
    cache: RefCell<MappingCache>,
    in_pass: Cell<bool>,
    passes: Cell<u64>,
    suppressed: Cell<u64>,
    events: Option<EventController>,
}

/// Clears the bridge's in-pass flag when dropped.
struct PassGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl SelectionSyncBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: EventController) -> Self {
        Self {
            events: Some(events),
            ..Default::default()
        }
    }

    pub fn set_events(&mut self, events: Option<EventController>) {
        self.events = events;
    }

    /// Number of synchronization passes that actually ran.
    pub fn passes(&self) -> u64 {
        self.passes.get()
    }

    /// Number of re-entrant calls ignored because a pass was running.
    pub fn suppressed_reentries(&self) -> u64 {
        self.suppressed.get()
    }

    /// `true` while a synchronization pass is running.
    pub fn in_pass(&self) -> bool {
        self.in_pass.get()
    }

    fn begin_pass(&self) -> Option<PassGuard<'_>> {
        if self.in_pass.replace(true) {
            self.suppressed.set(self.suppressed.get() + 1);
            log::debug!("sync pass already running, ignoring nested call");
            self.emit(SyncEvent::new(EventKind::REENTRY_SUPPRESSED));
            return None;
        }
        self.passes.set(self.passes.get() + 1);
        Some(PassGuard {
            flag: &self.in_pass,
        })
    }

    fn emit(&self, event: SyncEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }

    // ── Mapping ─────────────────────────────────────────────────────────

    /// Build a mapping from ordered categories and series names.
    pub fn build_index_mapping<C, S>(
        categories: &[C],
        series_names: &[S],
    ) -> Result<IndexMapping, DataError>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        IndexMapping::build(categories, series_names)
    }

    /// The cached mapping for `table`, read from its headers on first use.
    ///
    /// Fails with [`LookupFailure::StaleMapping`] if the table was regenerated
    /// since the mapping was built and [`invalidate`](Self::invalidate) was
    /// not called.
    pub fn mapping(&self, table: &dyn TableView) -> Result<Rc<IndexMapping>, LookupFailure> {
        self.cache
            .borrow_mut()
            .get_or_build(table.generation(), || read_mapping(table))
    }

    /// Drop the cached mapping. Call whenever the table is regenerated.
    pub fn invalidate(&self) {
        self.cache.borrow_mut().invalidate();
        log::debug!("index mapping invalidated");
        self.emit(SyncEvent::new(EventKind::MAPPING_INVALIDATED));
    }

    // ── Pure translations ───────────────────────────────────────────────

    /// Cell mutation mirroring a point's new selection state.
    pub fn on_point_selection_changed(
        change: &PointSelectionChange,
        mapping: &IndexMapping,
    ) -> Result<CellMutation, LookupFailure> {
        let row = mapping
            .row_index_of(&change.category)
            .ok_or_else(|| LookupFailure::UnknownCategory(change.category.clone()))?;
        let column = mapping
            .column_index_of(&change.series_name)
            .ok_or_else(|| LookupFailure::UnknownSeries(change.series_name.clone()))?;
        Ok(CellMutation {
            cell: PointRef::new(column, row).cell(),
            set_selected: change.is_selected,
        })
    }

    /// Point mutation for a click on one data cell whose marker is `currently_selected`.
    pub fn toggle_for_cell(
        cell: TableCell,
        currently_selected: bool,
    ) -> Result<PointMutation, LookupFailure> {
        Ok(PointMutation {
            point: cell.point()?,
            set_selected: !currently_selected,
        })
    }

    /// Point mutations for a click at table position `(row, column)`.
    ///
    /// A click in the category column fans out over the row, a click in the
    /// header row fans out over the column, any other position is one data
    /// cell. Each cell is inverted from its own current marker.
    pub fn on_cell_clicked(
        row: usize,
        column: usize,
        table: &dyn TableView,
    ) -> Result<Vec<PointMutation>, LookupFailure> {
        let rows = table.row_count();
        let columns = table.column_count();
        if row >= rows || column >= columns {
            return Err(LookupFailure::OutOfBounds { row, column });
        }
        let clicked = TableCell::new(row, column);
        let fan_out: Vec<TableCell> = match clicked.role() {
            CellRole::Corner => return Err(LookupFailure::HeaderCell { row, column }),
            CellRole::Data => {
                let current = table
                    .is_selected(clicked)
                    .ok_or(LookupFailure::OutOfBounds { row, column })?;
                return Ok(vec![Self::toggle_for_cell(clicked, current)?]);
            }
            CellRole::RowHeader => (to_table_index(0)..columns)
                .map(|c| TableCell::new(row, c))
                .collect(),
            CellRole::ColumnHeader => (to_table_index(0)..rows)
                .map(|r| TableCell::new(r, column))
                .collect(),
        };
        // A cell without a marker has no point behind it; the rest of the row
        // or column is still toggled.
        fan_out
            .into_iter()
            .filter_map(|cell| table.is_selected(cell).map(|current| (cell, current)))
            .map(|(cell, current)| Self::toggle_for_cell(cell, current))
            .collect()
    }

    // ── Entry points ────────────────────────────────────────────────────

    /// A point's selection changed on the chart (user-originated). Mirrors it into the table.
    pub fn point_selection_changed(
        &self,
        change: &PointSelectionChange,
        table: &mut dyn TableView,
    ) -> SyncOutcome {
        let Some(_pass) = self.begin_pass() else {
            return SyncOutcome::suppressed();
        };
        let mut outcome = SyncOutcome::default();
        match self.mapping(table) {
            Ok(mapping) => {
                if let Some(m) = self.write_cell(change, &mapping, table, &mut outcome) {
                    if let Ok(point) = m.cell.point() {
                        outcome.record(point, m.set_selected);
                    }
                }
            }
            Err(e) => self.skip(e, &mut outcome),
        }
        self.emit_outcome(EventKind(0), &outcome, |_| {});
        outcome
    }

    /// A table position was clicked. Toggles the matching points and mirrors
    /// their new state back into the cells.
    pub fn cell_clicked(
        &self,
        row: usize,
        column: usize,
        chart: &mut dyn ChartWidget,
        table: &mut dyn TableView,
    ) -> SyncOutcome {
        let Some(_pass) = self.begin_pass() else {
            return SyncOutcome::suppressed();
        };
        let mut outcome = SyncOutcome::default();
        let cell = TableCell::new(row, column);
        let kind = match cell.role() {
            CellRole::RowHeader => EventKind::ROW_HEADER_CLICK,
            CellRole::ColumnHeader => EventKind::COLUMN_HEADER_CLICK,
            CellRole::Data | CellRole::Corner => EventKind::CELL_CLICK,
        };

        let mapping = match self.mapping(table) {
            Ok(m) => m,
            Err(e) => {
                self.skip(e, &mut outcome);
                self.emit_outcome(kind, &outcome, |ev| ev.cell = Some(CellMeta { cell }));
                return outcome;
            }
        };
        match Self::on_cell_clicked(row, column, table) {
            Ok(mutations) => {
                log::debug!("cell {} click -> {} point mutation(s)", cell, mutations.len());
                for m in mutations {
                    self.apply_point(m, chart, &mapping, table, &mut outcome);
                }
            }
            Err(e) => self.skip(e, &mut outcome),
        }
        self.emit_outcome(kind, &outcome, |ev| ev.cell = Some(CellMeta { cell }));
        outcome
    }

    /// Select every point inside `region` (closed on both axes).
    ///
    /// Points that are already selected are left alone, so `selected` in the
    /// outcome lists only the points this call newly selected.
    pub fn select_area(
        &self,
        region: &Region,
        chart: &mut dyn ChartWidget,
        table: &mut dyn TableView,
    ) -> SyncOutcome {
        let Some(_pass) = self.begin_pass() else {
            return SyncOutcome::suppressed();
        };
        let mut outcome = SyncOutcome::default();
        match self.mapping(table) {
            Ok(mapping) => {
                let inside: Vec<PointRef> = chart
                    .points()
                    .into_iter()
                    .filter(|p| {
                        chart
                            .point(*p)
                            .is_some_and(|cp| !cp.selected && region.contains(cp.x, cp.y))
                    })
                    .collect();
                log::debug!("area {:?} adds {} point(s)", region, inside.len());
                for point in inside {
                    let m = PointMutation {
                        point,
                        set_selected: true,
                    };
                    self.apply_point(m, chart, &mapping, table, &mut outcome);
                }
            }
            Err(e) => self.skip(e, &mut outcome),
        }
        let area = AreaMeta {
            x_min: region.x_min,
            x_max: region.x_max,
            y_min: region.y_min,
            y_max: region.y_max,
        };
        self.emit_outcome(EventKind::AREA_SELECTION, &outcome, |ev| ev.area = Some(area));
        outcome
    }

    /// Unselect exactly the currently selected points.
    pub fn clear_selection(
        &self,
        chart: &mut dyn ChartWidget,
        table: &mut dyn TableView,
    ) -> SyncOutcome {
        let Some(_pass) = self.begin_pass() else {
            return SyncOutcome::suppressed();
        };
        let mut outcome = SyncOutcome::default();
        let selected = chart.selected_points();
        if selected.is_empty() {
            return outcome;
        }
        match self.mapping(table) {
            Ok(mapping) => {
                for point in selected {
                    let m = PointMutation {
                        point,
                        set_selected: false,
                    };
                    self.apply_point(m, chart, &mapping, table, &mut outcome);
                }
            }
            Err(e) => self.skip(e, &mut outcome),
        }
        self.emit_outcome(EventKind::SELECTION_CLEARED, &outcome, |_| {});
        outcome
    }

    // ── Pass internals ──────────────────────────────────────────────────

    fn apply_point(
        &self,
        m: PointMutation,
        chart: &mut dyn ChartWidget,
        mapping: &IndexMapping,
        table: &mut dyn TableView,
        outcome: &mut SyncOutcome,
    ) {
        match chart.select_silent(m.point, m.set_selected) {
            Ok(change) => {
                outcome.record(m.point, change.is_selected);
                self.write_cell(&change, mapping, table, outcome);
            }
            Err(e) => self.skip(e, outcome),
        }
    }

    fn write_cell(
        &self,
        change: &PointSelectionChange,
        mapping: &IndexMapping,
        table: &mut dyn TableView,
        outcome: &mut SyncOutcome,
    ) -> Option<CellMutation> {
        let result = Self::on_point_selection_changed(change, mapping)
            .and_then(|m| table.set_selected(m.cell, m.set_selected).map(|()| m));
        match result {
            Ok(m) => {
                outcome.cells_written += 1;
                Some(m)
            }
            Err(e) => {
                self.skip(e, outcome);
                None
            }
        }
    }

    fn skip(&self, failure: LookupFailure, outcome: &mut SyncOutcome) {
        log::warn!("selection sync skipped: {}", failure);
        outcome.failures.push(failure);
    }

    fn emit_outcome<F>(&self, kind: EventKind, outcome: &SyncOutcome, decorate: F)
    where
        F: FnOnce(&mut SyncEvent),
    {
        if self.events.is_none() {
            return;
        }
        let mut kinds = kind;
        if !outcome.selected.is_empty() {
            kinds |= EventKind::POINT_SELECTED;
        }
        if !outcome.unselected.is_empty() {
            kinds |= EventKind::POINT_UNSELECTED;
        }
        if !outcome.failures.is_empty() {
            kinds |= EventKind::LOOKUP_FAILED;
        }
        if kinds.is_empty() {
            return;
        }
        let mut ev = SyncEvent::new(kinds);
        if !outcome.selected.is_empty() || !outcome.unselected.is_empty() {
            ev.points = Some(PointMeta {
                selected: outcome.selected.clone(),
                unselected: outcome.unselected.clone(),
            });
        }
        if !outcome.failures.is_empty() {
            ev.failure = Some(FailureMeta {
                messages: outcome.failures.iter().map(|f| f.to_string()).collect(),
            });
        }
        decorate(&mut ev);
        self.emit(ev);
    }
}

/// Read a mapping from the table's header row and category column.
fn read_mapping(table: &dyn TableView) -> IndexMapping {
    let categories = table.category_labels();
    let series = table.series_labels();
    IndexMapping::build(&categories, &series).unwrap_or_else(|e| {
        log::warn!("table headers are not unique ({}), first occurrence wins", e);
        IndexMapping::first_wins(&categories, &series)
    })
}
