//! Instrumented quicksort.
//!
//! **Partition strategy: Lomuto.** Pivot is the value at the high end of the
//! window; boundary pointer `i` starts at `lo`, scan pointer `j` sweeps
//! `lo..hi`, and each `value[j] < pivot` swaps `(i, j)` and advances `i`.
//! After the scan, `(i, hi)` seats the pivot and `i` is its final index.
//!
//! Emission protocol per window `[lo, hi]` at depth `level`:
//!
//! 1. empty window (`lo > hi`): one clearing `Range` event, nothing else;
//! 2. `Range` announcing the window; singleton windows stop here;
//! 3. partition: `Pointer{p}` at the pivot cell, `Pointer{i}` at `lo`, then
//!    one `Pointer{j}` per scan step; each applied exchange emits `Swap`
//!    *after* mutating the array; self-swaps are suppressed entirely;
//! 4. `Prepare{pivot}` after partitioning and again between the left and
//!    right recursive calls (players reset pointer markers on it);
//! 5. left sub-window fully recursed before the right one, both at
//!    `level + 1`;
//! 6. once the whole tree has returned, one `Collapse` per opened depth in
//!    descending order.
//!
//! The sorter is total: any finite input sorts, and the trace is a lagging,
//! exact record of every mutation.

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

use crate::event::{Depth, Event, Index, PointerName, Trace, Value, Window, TRACE_VERSION};

/// Sort `values` ascending in place and return the full event trace.
///
/// Deterministic: the same input always yields the same trace. Empty and
/// singleton inputs are no-ops on ordering and produce an empty or
/// single-`Range` trace.
#[must_use]
pub fn sort(values: &mut [Value]) -> Trace {
    let input = values.to_vec();
    let mut rec = Recorder {
        values,
        events: Vec::new(),
        max_level: 0,
    };

    if !rec.values.is_empty() {
        let hi = rec.values.len() as i64 - 1;
        rec.qs(0, hi, 0);
    }
    for level in (1..=rec.max_level).rev() {
        rec.events.push(Event::Collapse { level });
    }

    Trace {
        version: TRACE_VERSION,
        input,
        events: rec.events,
        meta: None,
    }
}

/// Mutable sort state: the array being sorted plus the growing event log.
struct Recorder<'a> {
    values: &'a mut [Value],
    events: Vec<Event>,
    /// Deepest level announced with a non-empty window.
    max_level: Depth,
}

impl Recorder<'_> {
    /// Exchange `i` and `j` and record it. Self-swaps are suppressed: they
    /// are no-ops and would replay as a spurious "swap in place".
    fn swap(&mut self, i: Index, j: Index) {
        if i == j {
            return;
        }
        self.values.swap(i, j);
        self.events.push(Event::Swap { i, j });
    }

    fn pointer(&mut self, name: PointerName, index: Index, level: Depth) {
        self.events.push(Event::Pointer { name, index, level });
    }

    /// Lomuto partition of `[lo, hi]` (non-degenerate: `lo < hi`).
    /// Returns the pivot's final index.
    fn partition(&mut self, lo: Index, hi: Index, level: Depth) -> Index {
        let pivot = self.values[hi];
        self.pointer(PointerName::Pivot, hi, level);

        let mut i = lo;
        self.pointer(PointerName::Low, i, level);
        for j in lo..hi {
            self.pointer(PointerName::Scan, j, level);
            if self.values[j] < pivot {
                self.swap(i, j);
                i += 1;
                self.pointer(PointerName::Low, i, level);
            }
        }
        self.swap(i, hi);
        i
    }

    /// Recursive driver over the signed window `[lo, hi]` at `level`.
    fn qs(&mut self, lo: i64, hi: i64, level: Depth) {
        if lo > hi {
            // Empty sub-window: announce the clear so a player can drop the
            // highlight for this side, then return. No pointers, no swaps.
            self.events.push(Event::Range {
                window: Window::new(lo, hi),
                level,
            });
            return;
        }

        if level > self.max_level {
            self.max_level = level;
        }
        self.events.push(Event::Range {
            window: Window::new(lo, hi),
            level,
        });
        if lo == hi {
            return;
        }

        let p = self.partition(lo as Index, hi as Index, level);
        self.events.push(Event::Prepare { pivot: p });
        self.qs(lo, p as i64 - 1, level + 1);
        self.events.push(Event::Prepare { pivot: p });
        self.qs(p as i64 + 1, hi, level + 1);
    }
}
