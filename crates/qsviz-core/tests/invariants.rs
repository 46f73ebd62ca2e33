//! Invariants of the instrumented sorter and its trace.
//!
//! These tests treat:
//! - the **sorter** as authoritative for ordering (output non-decreasing,
//!   same multiset as the input), and
//! - the **trace** as a complete substitute for direct execution: replaying
//!   its swaps alone must reproduce the sorted array, and its depth
//!   bookkeeping must balance.

use proptest::prelude::*;
use qsviz_core::{replay_swaps, sort, validate_trace, Depth, Event, Trace};

/// Multiset fingerprint: sorted copy.
fn multiset(values: &[i64]) -> Vec<i64> {
    let mut m = values.to_vec();
    m.sort_unstable();
    m
}

fn collapse_levels(trace: &Trace) -> Vec<Depth> {
    trace
        .events
        .iter()
        .filter_map(|ev| match *ev {
            Event::Collapse { level } => Some(level),
            _ => None,
        })
        .collect()
}

proptest! {
    /// Output is non-decreasing and a permutation of the input.
    #[test]
    fn sorts_and_preserves_the_multiset(input in proptest::collection::vec(-1000i64..1000, 0..64)) {
        let mut v = input.clone();
        let _trace = sort(&mut v);
        prop_assert!(v.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(multiset(&input), multiset(&v));
    }

    /// Replaying only the swaps, starting from the original input,
    /// reproduces the final sorted array exactly.
    #[test]
    fn swap_replay_is_a_faithful_substitute(input in proptest::collection::vec(-1000i64..1000, 0..64)) {
        let mut v = input.clone();
        let trace = sort(&mut v);
        prop_assert_eq!(replay_swaps(&input, &trace), v);
    }

    /// The one-pass validator accepts every generated trace.
    #[test]
    fn generated_traces_always_validate(input in proptest::collection::vec(-50i64..50, 0..48)) {
        let mut v = input;
        let trace = sort(&mut v);
        prop_assert!(validate_trace(&trace).is_ok());
    }

    /// No emitted swap is a self-swap, and all indices are in bounds.
    #[test]
    fn swaps_are_real_and_in_bounds(input in proptest::collection::vec(-1000i64..1000, 0..64)) {
        let n = input.len();
        let mut v = input;
        let trace = sort(&mut v);
        for ev in &trace.events {
            if let Event::Swap { i, j } = *ev {
                prop_assert_ne!(i, j);
                prop_assert!(i < n && j < n);
            }
        }
    }

    /// Depth bookkeeping balances: every opened level > 0 is closed by
    /// exactly one trailing Collapse, in descending order.
    #[test]
    fn every_opened_level_collapses(input in proptest::collection::vec(-1000i64..1000, 0..64)) {
        let mut v = input;
        let trace = sort(&mut v);

        let max_opened = trace
            .events
            .iter()
            .filter_map(|ev| match *ev {
                Event::Range { window, level } if !window.is_empty() => Some(level),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let expected: Vec<Depth> = (1..=max_opened).rev().collect();
        prop_assert_eq!(collapse_levels(&trace), expected);
    }

    /// Non-empty windows at level L+1 always nest inside the most recently
    /// announced window at level L (DFS order).
    #[test]
    fn child_windows_nest_in_their_parents(input in proptest::collection::vec(-100i64..100, 2..48)) {
        let mut v = input;
        let trace = sort(&mut v);

        let mut last_at: std::collections::BTreeMap<Depth, (i64, i64)> = Default::default();
        for ev in &trace.events {
            if let Event::Range { window, level } = *ev {
                if !window.is_empty() {
                    if level > 0 {
                        let parent = last_at.get(&(level - 1)).copied();
                        prop_assert!(parent.is_some());
                        let (plo, phi) = parent.unwrap();
                        prop_assert!(window.lo >= plo && window.hi <= phi);
                    }
                    last_at.insert(level, (window.lo, window.hi));
                }
            }
        }
    }
}

/// Determinism: one input, one trace.
#[test]
fn identical_inputs_yield_identical_traces() {
    let input = vec![8, 3, 5, 1, 9, 2, 7, 4, 6, 0];
    let mut a = input.clone();
    let mut b = input;
    assert_eq!(sort(&mut a), sort(&mut b));
}
