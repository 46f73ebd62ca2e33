//! Visual-state model driven by trace events.
//!
//! `apply` is set-based: pointers, windows and the pivot mark are *replaced*,
//! never offset, so re-applying an event with identical payload leaves the
//! state unchanged. The one inherently positional effect is `Swap`, which
//! exchanges two arrangement slots exactly as the sorter did.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::collections::BTreeMap;

use anyhow::{ensure, Result};
use qsviz_core::{Depth, Event, Index, PointerName, Value, Window};

/// The player's entire visual state for one playback.
///
/// Fresh per playback; never shared across runs.
#[derive(Clone, Debug)]
pub struct PlayerState {
    arrangement: Vec<Value>,
    pointers: BTreeMap<(Depth, PointerName), Index>,
    windows: BTreeMap<Depth, Window>,
    pivot: Option<Index>,
    applied: usize,
}

impl PlayerState {
    /// Start a playback over `input` (the trace's pre-sort values).
    #[must_use]
    pub fn new(input: &[Value]) -> Self {
        Self {
            arrangement: input.to_vec(),
            pointers: BTreeMap::new(),
            windows: BTreeMap::new(),
            pivot: None,
            applied: 0,
        }
    }

    /// Apply one event.
    ///
    /// # Errors
    /// Rejects out-of-bounds indices and self-swaps; a validated trace never
    /// triggers either.
    pub fn apply(&mut self, ev: &Event) -> Result<()> {
        let n = self.arrangement.len();
        match *ev {
            Event::Swap { i, j } => {
                ensure!(i != j, "player: self-swap at {i}");
                ensure!(i < n && j < n, "player: swap ({i},{j}) out of bounds");
                self.arrangement.swap(i, j);
            }
            Event::Pointer { name, index, level } => {
                ensure!(index < n, "player: pointer {name:?} at {index} out of bounds");
                self.pointers.insert((level, name), index);
            }
            Event::Range { window, level } => {
                if window.is_empty() {
                    self.windows.remove(&level);
                } else {
                    self.windows.insert(level, window);
                }
            }
            Event::Prepare { pivot } => {
                ensure!(pivot < n, "player: pivot {pivot} out of bounds");
                self.pivot = Some(pivot);
                // Pointer markers are transient per partition call.
                self.pointers.clear();
            }
            Event::Collapse { level } => {
                self.windows.remove(&level);
                self.pointers.retain(|&(l, _), _| l != level);
            }
        }
        self.applied += 1;
        Ok(())
    }

    /// Current value arrangement.
    #[must_use]
    pub fn arrangement(&self) -> &[Value] {
        &self.arrangement
    }

    /// Marker position for `(level, name)`, if set.
    #[must_use]
    pub fn pointer(&self, level: Depth, name: PointerName) -> Option<Index> {
        self.pointers.get(&(level, name)).copied()
    }

    /// Active window at `level`, if any.
    #[must_use]
    pub fn window(&self, level: Depth) -> Option<Window> {
        self.windows.get(&level).copied()
    }

    /// Active windows, shallowest first.
    pub fn windows(&self) -> impl Iterator<Item = (Depth, Window)> + '_ {
        self.windows.iter().map(|(&l, &w)| (l, w))
    }

    /// Pointer markers, keyed by `(level, name)`.
    pub fn pointers(&self) -> impl Iterator<Item = ((Depth, PointerName), Index)> + '_ {
        self.pointers.iter().map(|(&k, &v)| (k, v))
    }

    /// Most recent pivot mark.
    #[must_use]
    pub fn pivot(&self) -> Option<Index> {
        self.pivot
    }

    /// How many events have been applied so far.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st() -> PlayerState {
        PlayerState::new(&[3, 6, 2, 9, 1])
    }

    #[test]
    fn range_application_is_idempotent() {
        let mut s = st();
        let ev = Event::Range {
            window: Window::new(1, 3),
            level: 1,
        };
        s.apply(&ev).unwrap();
        let once = (s.arrangement().to_vec(), s.window(1));
        s.apply(&ev).unwrap();
        assert_eq!((s.arrangement().to_vec(), s.window(1)), once);
    }

    #[test]
    fn inverted_range_clears_the_window() {
        let mut s = st();
        s.apply(&Event::Range {
            window: Window::new(0, 4),
            level: 0,
        })
        .unwrap();
        assert!(s.window(0).is_some());
        s.apply(&Event::Range {
            window: Window::new(3, 2),
            level: 0,
        })
        .unwrap();
        assert!(s.window(0).is_none());
    }

    #[test]
    fn swap_exchanges_arrangement_slots() {
        let mut s = st();
        s.apply(&Event::Swap { i: 0, j: 4 }).unwrap();
        assert_eq!(s.arrangement(), &[1, 6, 2, 9, 3]);
    }

    #[test]
    fn prepare_marks_pivot_and_resets_pointers() {
        let mut s = st();
        s.apply(&Event::Pointer {
            name: PointerName::Scan,
            index: 2,
            level: 0,
        })
        .unwrap();
        s.apply(&Event::Prepare { pivot: 1 }).unwrap();
        assert_eq!(s.pivot(), Some(1));
        assert_eq!(s.pointer(0, PointerName::Scan), None);
    }

    #[test]
    fn collapse_drops_exactly_that_level() {
        let mut s = st();
        s.apply(&Event::Range {
            window: Window::new(0, 4),
            level: 0,
        })
        .unwrap();
        s.apply(&Event::Range {
            window: Window::new(0, 2),
            level: 1,
        })
        .unwrap();
        s.apply(&Event::Pointer {
            name: PointerName::Low,
            index: 0,
            level: 1,
        })
        .unwrap();
        s.apply(&Event::Collapse { level: 1 }).unwrap();
        assert!(s.window(1).is_none());
        assert!(s.window(0).is_some());
        assert_eq!(s.pointer(1, PointerName::Low), None);
    }

    #[test]
    fn out_of_bounds_events_are_rejected() {
        let mut s = st();
        assert!(s.apply(&Event::Swap { i: 0, j: 9 }).is_err());
        assert!(s.apply(&Event::Swap { i: 2, j: 2 }).is_err());
        assert!(s
            .apply(&Event::Pointer {
                name: PointerName::Pivot,
                index: 5,
                level: 0,
            })
            .is_err());
    }
}
