//! Event vocabulary and trace envelope.
//!
//! The five event variants below are the entire interface between the sorter
//! and any player. The set is closed on purpose: matching is exhaustive, so
//! adding a variant is a compile-time-visible change for every consumer.
//!
//! Serialized form tags each event with a `"type"` field and keeps the short
//! pointer names (`"i"`, `"j"`, `"p"`) of the original vocabulary, so traces
//! stay readable and stable across tooling.

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

use serde::{Deserialize, Serialize};

/// Array element (fixed-range integers; ordering is plain `<`).
pub type Value = i64;

/// Position in the value array.
pub type Index = usize;

/// Recursion depth of a partition call (0 = outermost).
pub type Depth = u32;

/// Current trace envelope version.
pub const TRACE_VERSION: u16 = 1;

/// Named cursor moved by the partition step.
///
/// Serialized as the single-letter names of the original vocabulary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointerName {
    /// Boundary pointer `i`: everything left of it is `< pivot`.
    #[serde(rename = "i")]
    Low,
    /// Scan pointer `j`: sweeps the window comparing against the pivot.
    #[serde(rename = "j")]
    Scan,
    /// Pivot marker `p`: the cell holding the pivot value.
    #[serde(rename = "p")]
    Pivot,
}

/// Inclusive partition window `[lo, hi]`.
///
/// Bounds are signed so degenerate windows such as `[lo, p-1]` with `p == 0`
/// are representable; `hi < lo` means "no active window" and instructs a
/// player to clear the highlight for that depth.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Window {
    /// Left (minimum) bound.
    pub lo: i64,
    /// Right (maximum) bound; `< lo` for an empty window.
    pub hi: i64,
}

impl Window {
    /// Create a new window (no validation).
    #[inline]
    #[must_use]
    pub const fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    /// Whether the window denotes "no active range".
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.hi < self.lo
    }

    /// Number of cells covered (0 if empty).
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.hi - self.lo + 1) as u64
        }
    }

    /// Whether `other` lies fully inside `self` (empty windows are contained
    /// anywhere, they carry no cells).
    #[inline]
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.is_empty() || (other.lo >= self.lo && other.hi <= self.hi)
    }
}

/// One observable step of the instrumented sort.
///
/// Every event is a lagging record: at emission time the described effect has
/// already been applied to the value array.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Values at `i` and `j` were exchanged (`i != j` always).
    Swap {
        /// First position.
        i: Index,
        /// Second position.
        j: Index,
    },
    /// Named cursor `name` is now at `index`, at recursion depth `level`.
    Pointer {
        /// Which cursor moved.
        name: PointerName,
        /// Its new position.
        index: Index,
        /// Depth of the partition call that owns it.
        level: Depth,
    },
    /// The active partition window at `level` is now `window`
    /// (`window.hi < window.lo` clears the highlight).
    Range {
        /// New active window.
        window: Window,
        /// Depth the window belongs to.
        level: Depth,
    },
    /// Partitioning finished; `pivot` is the pivot's final resting index.
    /// Also re-emitted between the left and right recursive calls so players
    /// can reset transient pointer markers.
    Prepare {
        /// Final index of the pivot value.
        pivot: Index,
    },
    /// Recursion at `level` fully returned; visuals owned by that depth
    /// merge back into `level - 1`.
    Collapse {
        /// Depth being retired (always `> 0`).
        level: Depth,
    },
}

/// One complete, immutable recording of a sort execution.
///
/// The envelope carries the original input so a trace file is self-contained:
/// replay and playback need nothing else. Events are append-only during
/// generation and never mutated afterwards (no public mutator exists).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trace {
    /// Envelope version for forward-compat checks.
    pub version: u16,
    /// The values as they were before sorting.
    pub input: Vec<Value>,
    /// Ordered event sequence; replay strictly in this order.
    pub events: Vec<Event>,
    /// Optional metadata (tool version, seed, labels…).
    pub meta: Option<serde_json::Value>,
}

impl Trace {
    /// Number of events.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace carries no events.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
