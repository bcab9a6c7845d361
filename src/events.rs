//! Selection event system.
//!
//! Callers can observe what the sync bridge does via [`EventController`].
//! Each event carries a set of [`EventKind`] flags (bitflags-style) so that a
//! single occurrence can match multiple categories (e.g. a row-header click
//! that also selected points is both `ROW_HEADER_CLICK` and `POINT_SELECTED`).
//!
//! The caller specifies an [`EventFilter`] to receive only the events they
//! care about.  The filter is a simple OR mask: an event is delivered when
//! `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::data::coords::{PointRef, TableCell};

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the *categories* an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    // ── Point side ──────────────────────────────────────────────────────
    /// One or more points became selected.
    pub const POINT_SELECTED: Self = Self(1 << 0);
    /// One or more points became unselected.
    pub const POINT_UNSELECTED: Self = Self(1 << 1);

    // ── Table side ──────────────────────────────────────────────────────
    /// A data cell was clicked.
    pub const CELL_CLICK: Self = Self(1 << 2);
    /// A category label (row header) was clicked.
    pub const ROW_HEADER_CLICK: Self = Self(1 << 3);
    /// A series name (column header) was clicked.
    pub const COLUMN_HEADER_CLICK: Self = Self(1 << 4);

    // ── Chart canvas ────────────────────────────────────────────────────
    /// A rectangular drag selection was applied.
    pub const AREA_SELECTION: Self = Self(1 << 5);
    /// The selection was cleared by clicking the canvas.
    pub const SELECTION_CLEARED: Self = Self(1 << 6);

    // ── Bridge bookkeeping ──────────────────────────────────────────────
    /// A mutation was skipped because a lookup failed.
    pub const LOOKUP_FAILED: Self = Self(1 << 7);
    /// The cached index mapping was dropped.
    pub const MAPPING_INVALIDATED: Self = Self(1 << 8);
    /// A re-entrant call was ignored while a pass was running.
    pub const REENTRY_SUPPRESSED: Self = Self(1 << 9);

    // ── Data ────────────────────────────────────────────────────────────
    /// A new dataset replaced chart and table.
    pub const DATASET_LOADED: Self = Self(1 << 10);

    /// Wildcard: matches *every* event kind.
    pub const ALL: Self = Self(u64::MAX);

    /// Combine two event kinds (bitwise OR).
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` intersects with `other` (at least one bit in common).
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Returns `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::POINT_SELECTED, "POINT_SELECTED"),
            (EventKind::POINT_UNSELECTED, "POINT_UNSELECTED"),
            (EventKind::CELL_CLICK, "CELL_CLICK"),
            (EventKind::ROW_HEADER_CLICK, "ROW_HEADER_CLICK"),
            (EventKind::COLUMN_HEADER_CLICK, "COLUMN_HEADER_CLICK"),
            (EventKind::AREA_SELECTION, "AREA_SELECTION"),
            (EventKind::SELECTION_CLEARED, "SELECTION_CLEARED"),
            (EventKind::LOOKUP_FAILED, "LOOKUP_FAILED"),
            (EventKind::MAPPING_INVALIDATED, "MAPPING_INVALIDATED"),
            (EventKind::REENTRY_SUPPRESSED, "REENTRY_SUPPRESSED"),
            (EventKind::DATASET_LOADED, "DATASET_LOADED"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u64 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata – per-event-type payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Points whose selection changed during one pass.
#[derive(Debug, Clone, Default)]
pub struct PointMeta {
    pub selected: Vec<PointRef>,
    pub unselected: Vec<PointRef>,
}

/// The table position that was clicked.
#[derive(Debug, Clone, Copy)]
pub struct CellMeta {
    pub cell: TableCell,
}

/// Drag rectangle in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaMeta {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Lookups that failed during a pass (rendered messages).
#[derive(Debug, Clone, Default)]
pub struct FailureMeta {
    pub messages: Vec<String>,
}

/// Shape of a freshly loaded dataset.
#[derive(Debug, Clone)]
pub struct DatasetMeta {
    pub title: Option<String>,
    pub categories: usize,
    pub series: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// SyncEvent – the top-level event type
// ─────────────────────────────────────────────────────────────────────────────

/// An event emitted by the sync bridge or the linked app.
#[derive(Debug, Clone)]
pub struct SyncEvent {
    /// Bitflag set of categories this event belongs to.
    pub kinds: EventKind,
    /// Seconds since the controller was created, set on emit.
    pub timestamp: f64,

    pub points: Option<PointMeta>,
    pub cell: Option<CellMeta>,
    pub area: Option<AreaMeta>,
    pub failure: Option<FailureMeta>,
    pub dataset: Option<DatasetMeta>,
}

impl SyncEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0, // will be set by controller
            points: None,
            cell: None,
            area: None,
            failure: None,
            dataset: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// A filter that selects which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    /// Accept all events.
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    /// Accept only the specified event kinds.
    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &SyncEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<SyncEvent>,
}

/// Controller that distributes sync events to subscribers.
///
/// Attach it to [`SyncConfig`](crate::config::SyncConfig) (or directly to a
/// [`SelectionSyncBridge`](crate::bridge::SelectionSyncBridge)) and call
/// [`subscribe`](Self::subscribe) to receive events on an `mpsc` channel.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EventCtrlInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<SyncEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Subscribe to *all* events (no filtering).
    pub fn subscribe_all(&self) -> Receiver<SyncEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Emit an event to all matching subscribers. Subscribers whose receiver
    /// was dropped are removed the next time an event matches them.
    pub fn emit(&self, mut event: SyncEvent) {
        let mut inner = self.lock();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
