//! Swap-replay and structural trace validation.
//!
//! A trace is only worth shipping if it is a *faithful substitute* for the
//! sort it recorded: replaying its `Swap` events against the original input
//! must land on the fully sorted array, and its depth bookkeeping must be
//! internally consistent. `validate_trace` enforces both, so a player can
//! trust any trace that passed it without re-deriving sort logic.

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

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, ensure, Result};

use crate::event::{Depth, Event, PointerName, Trace, Value, Window};

/// Apply only the `Swap` events of `trace`, in order, to a copy of `input`.
///
/// The result is what any player's arrangement ends up as after full
/// playback.
#[must_use]
pub fn replay_swaps(input: &[Value], trace: &Trace) -> Vec<Value> {
    let mut out = input.to_vec();
    for ev in &trace.events {
        if let Event::Swap { i, j } = *ev {
            if i < out.len() && j < out.len() {
                out.swap(i, j);
            }
        }
    }
    out
}

/// Per-level pointer trackers, reset whenever a new window is announced at
/// that level (each partition call owns fresh cursors).
#[derive(Default)]
struct PointerTrack {
    low: Option<usize>,
    scan: Option<usize>,
}

/// Validate a trace against the contract the sorter promises.
///
/// Checks, in one pass over the events:
/// - all indices are in bounds and no `Swap` is a self-swap;
/// - the first announced window is at level 0 and every deeper non-empty
///   window nests inside the most recent window one level up;
/// - `Low`/`Scan` pointers move monotonically within one partition call;
/// - every opened level `> 0` is closed by exactly one `Collapse`, all
///   collapses trail the rest of the trace in descending depth order;
/// - replaying the swaps reproduces the sorted input exactly.
///
/// # Errors
/// Returns a descriptive error naming the offending event index on the first
/// violation found.
pub fn validate_trace(trace: &Trace) -> Result<()> {
    let n = trace.input.len();
    let mut last_window: BTreeMap<Depth, Window> = BTreeMap::new();
    let mut opened: BTreeSet<Depth> = BTreeSet::new();
    let mut pointers: BTreeMap<Depth, PointerTrack> = BTreeMap::new();
    let mut collapses: Vec<Depth> = Vec::new();
    let mut saw_collapse = false;

    for (idx, ev) in trace.events.iter().enumerate() {
        if saw_collapse {
            ensure!(
                matches!(ev, Event::Collapse { .. }),
                "event {idx}: {ev:?} after the collapse phase began"
            );
        }
        match *ev {
            Event::Swap { i, j } => {
                ensure!(i != j, "event {idx}: self-swap at index {i}");
                ensure!(
                    i < n && j < n,
                    "event {idx}: swap ({i},{j}) out of bounds for n={n}"
                );
            }
            Event::Pointer { name, index, level } => {
                ensure!(
                    index < n,
                    "event {idx}: pointer {name:?} at {index} out of bounds for n={n}"
                );
                let track = pointers.entry(level).or_default();
                match name {
                    PointerName::Low => {
                        if let Some(prev) = track.low {
                            ensure!(
                                index >= prev,
                                "event {idx}: low pointer moved backwards ({prev} -> {index}) at level {level}"
                            );
                        }
                        track.low = Some(index);
                    }
                    PointerName::Scan => {
                        if let Some(prev) = track.scan {
                            ensure!(
                                index >= prev,
                                "event {idx}: scan pointer moved backwards ({prev} -> {index}) at level {level}"
                            );
                        }
                        track.scan = Some(index);
                    }
                    PointerName::Pivot => {}
                }
            }
            Event::Range { window, level } => {
                if window.is_empty() {
                    // Clearing event for an empty sub-window; nothing to nest.
                    continue;
                }
                if level == 0 {
                    ensure!(
                        window.lo == 0 && window.hi == n as i64 - 1,
                        "event {idx}: top-level window {window:?} does not cover 0..{n}"
                    );
                } else {
                    let Some(parent) = last_window.get(&(level - 1)) else {
                        bail!("event {idx}: window at level {level} with no parent at level {}", level - 1);
                    };
                    ensure!(
                        parent.contains(&window),
                        "event {idx}: window {window:?} escapes parent {parent:?}"
                    );
                    opened.insert(level);
                }
                last_window.insert(level, window);
                // Fresh partition call at this level: cursors restart.
                pointers.insert(level, PointerTrack::default());
            }
            Event::Prepare { pivot } => {
                ensure!(
                    pivot < n,
                    "event {idx}: prepare pivot {pivot} out of bounds for n={n}"
                );
            }
            Event::Collapse { level } => {
                ensure!(level > 0, "event {idx}: collapse at level 0");
                saw_collapse = true;
                collapses.push(level);
            }
        }
    }

    let expected: Vec<Depth> = opened.iter().rev().copied().collect();
    ensure!(
        collapses == expected,
        "collapse sequence {collapses:?} does not close opened levels {expected:?}"
    );

    // The trace must be a complete substitute for direct execution.
    let replayed = replay_swaps(&trace.input, trace);
    let mut sorted = trace.input.clone();
    sorted.sort_unstable();
    ensure!(
        replayed == sorted,
        "swap-replay does not reproduce the sorted input"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::sort;

    #[test]
    fn generated_traces_validate() {
        for input in [
            vec![],
            vec![5],
            vec![3, 6, 2, 9, 1],
            vec![1, 1, 1, 1],
            vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
        ] {
            let mut v = input.clone();
            let trace = sort(&mut v);
            validate_trace(&trace).unwrap();
        }
    }

    #[test]
    fn replay_matches_direct_sort() {
        let input = vec![12, -4, 0, 7, 7, 3, -9, 100];
        let mut v = input.clone();
        let trace = sort(&mut v);
        assert_eq!(replay_swaps(&input, &trace), v);
    }

    #[test]
    fn tampered_self_swap_is_rejected() {
        let mut v = vec![4, 2, 7, 1];
        let mut trace = sort(&mut v);
        trace.events.insert(1, Event::Swap { i: 2, j: 2 });
        assert!(validate_trace(&trace).is_err());
    }

    #[test]
    fn dropped_collapse_is_rejected() {
        let mut v = vec![4, 2, 7, 1, 9, 0];
        let mut trace = sort(&mut v);
        let last = trace.events.len() - 1;
        trace.events.remove(last);
        assert!(validate_trace(&trace).is_err());
    }

    #[test]
    fn reordered_swaps_are_rejected() {
        let mut v = vec![5, 3, 8, 1, 9, 2, 7];
        let mut trace = sort(&mut v);
        // Find two distinct swap events and transpose them.
        let idxs: Vec<usize> = trace
            .events
            .iter()
            .enumerate()
            .filter(|(_, ev)| matches!(ev, Event::Swap { .. }))
            .map(|(i, _)| i)
            .collect();
        assert!(idxs.len() >= 2);
        trace.events.swap(idxs[0], idxs[1]);
        // Either the replay no longer matches or ordering checks fire.
        assert!(validate_trace(&trace).is_err());
    }
}
