//! In-memory chart: series of points with per-point selection.
//!
//! [`ChartModel`] behaves like the point-select mode of a charting library:
//! a click on a point selects it and unselects the others, a click with a
//! modifier adds to the selection, and every user-originated change is
//! reported as a [`PointSelectionChange`] through a notification outbox that
//! the host drains each frame. The bridge mutates points through
//! [`ChartWidget::select_silent`], which never touches the outbox.

use std::ops::RangeInclusive;

use crate::bridge::{ChartPoint, ChartWidget, PointSelectionChange};
use crate::data::coords::PointRef;
use crate::data::dataset::DataSet;
use crate::error::LookupFailure;

/// A rectangle in data coordinates. Bounds are inclusive on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Region {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Region spanned by two opposite corners, in any order.
    pub fn from_corners(a: [f64; 2], b: [f64; 2]) -> Self {
        Self {
            x_min: a[0].min(b[0]),
            x_max: a[0].max(b[0]),
            y_min: a[1].min(b[1]),
            y_max: a[1].max(b[1]),
        }
    }

    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Closed outline, counter-clockwise from the lower-left corner.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        vec![
            [self.x_min, self.y_min],
            [self.x_max, self.y_min],
            [self.x_max, self.y_max],
            [self.x_min, self.y_max],
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeriesPoint {
    pub x: f64,
    pub y: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartSeriesPoint>,
}

/// Chart state built from a [`DataSet`]. Point x is the category position.
#[derive(Debug, Clone, Default)]
pub struct ChartModel {
    categories: Vec<String>,
    series: Vec<ChartSeries>,
    outbox: Vec<PointSelectionChange>,
}

impl ChartModel {
    pub fn from_dataset(ds: &DataSet) -> Self {
        let series = ds
            .series
            .iter()
            .map(|s| ChartSeries {
                name: s.name.clone(),
                points: s
                    .data
                    .iter()
                    .enumerate()
                    .map(|(i, y)| ChartSeriesPoint {
                        x: i as f64,
                        y: *y,
                        selected: false,
                    })
                    .collect(),
            })
            .collect();
        Self {
            categories: ds.categories.clone(),
            series,
            outbox: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    pub fn is_selected(&self, point: PointRef) -> bool {
        self.get(point).is_some_and(|p| p.selected)
    }

    /// Value axis range covering every point plus 10% padding.
    ///
    /// Zero stays on the axis. A padded end is only added on the side where
    /// data extends past zero, and the range never collapses below 1.0.
    pub fn y_bounds(&self) -> RangeInclusive<f64> {
        let (lo, hi) = self
            .iter()
            .map(|(_, p)| p.y)
            .filter(|y| y.is_finite())
            .fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
        let pad = (hi - lo).max(1.0) * 0.1;
        let lower = if lo < 0.0 { lo - pad } else { lo };
        let mut upper = if hi > 0.0 { hi + pad } else { hi };
        if upper - lower < 1.0 {
            upper = lower + 1.0;
        }
        lower..=upper
    }

    fn get(&self, point: PointRef) -> Option<&ChartSeriesPoint> {
        self.series.get(point.series)?.points.get(point.index)
    }

    fn change_for(&self, point: PointRef) -> Result<PointSelectionChange, LookupFailure> {
        let missing = LookupFailure::MissingPoint {
            series: point.series,
            index: point.index,
        };
        let series = self.series.get(point.series).ok_or_else(|| missing.clone())?;
        let p = series.points.get(point.index).ok_or_else(|| missing.clone())?;
        let category = self.categories.get(point.index).ok_or(missing)?;
        Ok(PointSelectionChange {
            category: category.clone(),
            series_name: series.name.clone(),
            is_selected: p.selected,
        })
    }

    fn set(&mut self, point: PointRef, selected: bool) -> Result<bool, LookupFailure> {
        let p = self
            .series
            .get_mut(point.series)
            .and_then(|s| s.points.get_mut(point.index))
            .ok_or(LookupFailure::MissingPoint {
                series: point.series,
                index: point.index,
            })?;
        let changed = p.selected != selected;
        p.selected = selected;
        Ok(changed)
    }

    /// User-originated selection. Fires a notification when the state changes.
    pub fn select(&mut self, point: PointRef, selected: bool) -> Result<(), LookupFailure> {
        if self.set(point, selected)? {
            let change = self.change_for(point)?;
            self.outbox.push(change);
        }
        Ok(())
    }

    /// User click on a point.
    ///
    /// Without `accumulate` every other selected point is unselected first.
    /// The clicked point is toggled.
    pub fn click_point(&mut self, point: PointRef, accumulate: bool) -> Result<(), LookupFailure> {
        let was_selected = self
            .get(point)
            .ok_or(LookupFailure::MissingPoint {
                series: point.series,
                index: point.index,
            })?
            .selected;
        if !accumulate {
            for other in self.selected_points() {
                if other != point {
                    self.select(other, false)?;
                }
            }
        }
        self.select(point, !was_selected)
    }

    /// Drain pending select/unselect notifications.
    pub fn take_notifications(&mut self) -> Vec<PointSelectionChange> {
        std::mem::take(&mut self.outbox)
    }

    pub fn has_notifications(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// All points inside `region`.
    pub fn points_in(&self, region: &Region) -> Vec<PointRef> {
        self.iter()
            .filter(|(_, p)| region.contains(p.x, p.y))
            .map(|(r, _)| r)
            .collect()
    }

    /// Nearest point to `(x, y)` according to `distance`, if any is within `max_distance`.
    ///
    /// `distance` lets the caller measure in screen space.
    pub fn nearest<F>(&self, max_distance: f32, mut distance: F) -> Option<PointRef>
    where
        F: FnMut(f64, f64) -> f32,
    {
        self.iter()
            .map(|(r, p)| (r, distance(p.x, p.y)))
            .filter(|(_, d)| *d <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| r)
    }

    fn iter(&self) -> impl Iterator<Item = (PointRef, &ChartSeriesPoint)> + '_ {
        self.series.iter().enumerate().flat_map(|(s, series)| {
            series
                .points
                .iter()
                .enumerate()
                .map(move |(i, p)| (PointRef::new(s, i), p))
        })
    }
}

impl ChartWidget for ChartModel {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn point(&self, point: PointRef) -> Option<ChartPoint> {
        let series = self.series.get(point.series)?;
        let p = series.points.get(point.index)?;
        Some(ChartPoint {
            category: self.categories.get(point.index)?.clone(),
            series_name: series.name.clone(),
            x: p.x,
            y: p.y,
            selected: p.selected,
        })
    }

    fn points(&self) -> Vec<PointRef> {
        self.iter().map(|(r, _)| r).collect()
    }

    fn selected_points(&self) -> Vec<PointRef> {
        self.iter().filter(|(_, p)| p.selected).map(|(r, _)| r).collect()
    }

    fn select_silent(
        &mut self,
        point: PointRef,
        selected: bool,
    ) -> Result<PointSelectionChange, LookupFailure> {
        self.set(point, selected)?;
        self.change_for(point)
    }
}
