//! Controllers for interacting with the linked view from external code.
//!
//! A controller is a cloneable handle around shared state. Non-UI code can
//! query the current selection, subscribe to selection snapshots and push
//! requests that the app applies on its next frame.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

/// One selected point as seen from outside the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPoint {
    pub series: String,
    pub category: String,
    pub value: f64,
}

/// A selection change requested through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRequest {
    /// Unselect every selected point.
    Clear,
    /// Set one point's selection.
    Select {
        series_name: String,
        category: String,
        selected: bool,
    },
}

/// Controller to read the current selection and request changes.
#[derive(Clone)]
pub struct SelectionController {
    pub(crate) inner: Arc<Mutex<SelectionCtrlInner>>, // crate-visible for UI
}

pub(crate) struct SelectionCtrlInner {
    pub(crate) selected: Vec<SelectedPoint>,
    pub(crate) requests: Vec<SelectionRequest>,
    pub(crate) listeners: Vec<Sender<Vec<SelectedPoint>>>,
}

impl SelectionController {
    /// Create a fresh controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SelectionCtrlInner {
                selected: Vec::new(),
                requests: Vec::new(),
                listeners: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SelectionCtrlInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the points selected at the last published frame.
    pub fn selected(&self) -> Vec<SelectedPoint> {
        self.lock().selected.clone()
    }

    /// Subscribe to selection snapshots. A snapshot is sent every time the selection changes.
    pub fn subscribe(&self) -> Receiver<Vec<SelectedPoint>> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().listeners.push(tx);
        rx
    }

    /// Request that every selected point be unselected.
    pub fn request_clear(&self) {
        self.lock().requests.push(SelectionRequest::Clear);
    }

    /// Request a point's selection by series name and category label.
    pub fn request_select<S, C>(&self, series_name: S, category: C, selected: bool)
    where
        S: Into<String>,
        C: Into<String>,
    {
        self.lock().requests.push(SelectionRequest::Select {
            series_name: series_name.into(),
            category: category.into(),
            selected,
        });
    }

    /// Drain pending requests in the order they were made.
    pub(crate) fn take_requests(&self) -> Vec<SelectionRequest> {
        std::mem::take(&mut self.lock().requests)
    }

    /// Store a new selection snapshot and notify listeners if it differs from the last one.
    pub(crate) fn publish(&self, selected: Vec<SelectedPoint>) {
        let mut inner = self.lock();
        if inner.selected == selected {
            return;
        }
        inner.selected = selected;
        let snapshot = inner.selected.clone();
        inner.listeners.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(series: &str, category: &str, value: f64) -> SelectedPoint {
        SelectedPoint {
            series: series.into(),
            category: category.into(),
            value,
        }
    }

    #[test]
    fn requests_drain_in_order() {
        let ctrl = SelectionController::new();
        ctrl.request_select("Installation", "NL", true);
        ctrl.request_clear();
        let reqs = ctrl.take_requests();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[1], SelectionRequest::Clear);
        assert!(ctrl.take_requests().is_empty());
    }

    #[test]
    fn publish_notifies_only_on_change() {
        let ctrl = SelectionController::new();
        let rx = ctrl.subscribe();
        let snap = vec![point("Installation", "NL", 43934.0)];
        ctrl.publish(snap.clone());
        ctrl.publish(snap.clone());
        assert_eq!(rx.try_recv().unwrap(), snap);
        assert!(rx.try_recv().is_err());
        assert_eq!(ctrl.selected(), snap);
    }

    #[test]
    fn dropped_listener_is_pruned() {
        let ctrl = SelectionController::new();
        drop(ctrl.subscribe());
        ctrl.publish(vec![point("Distribution", "DE", 16005.0)]);
        assert!(ctrl.lock().listeners.is_empty());
    }
}
