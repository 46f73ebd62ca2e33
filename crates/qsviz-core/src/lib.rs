//! qsviz-core — instrumented quicksort and its replayable trace.
//!
//! This crate is the core of the pipeline: it sorts an integer array in
//! place while recording every observable step (comparisons via pointer
//! moves, swaps, partition windows, recursion depth changes) as an ordered
//! sequence of typed events. A separate player replays the trace at an
//! arbitrary pace; the core never touches timing or rendering.
//!
//! - `event`: the closed event vocabulary and the versioned `Trace` envelope.
//! - `sort`: the instrumented Lomuto quicksort (`sort(values) -> Trace`).
//! - `replay`: swap-replay and structural validation of a trace.
//! - `generator`: deterministic synthetic inputs for the CLI and benches.
//! - `io`: JSON/CBOR read/write helpers for `Trace`.
//! - `io_jsonl`: JSON Lines streaming of the event sequence.
//!
//! Determinism is the point: the same input always yields the same trace,
//! and replaying the trace's swaps reproduces the sorted array exactly.

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

/// Event vocabulary and the versioned trace envelope.
pub mod event;
/// Deterministic synthetic input generator (for the CLI and benches).
pub mod generator;
/// JSON/CBOR I/O helpers for `Trace`.
pub mod io;
/// Streaming JSONL helpers for the event sequence.
pub mod io_jsonl;
/// Swap-replay and structural trace validation.
pub mod replay;
/// Instrumented quicksort producing a `Trace`.
pub mod sort;

pub use event::{Depth, Event, Index, PointerName, Trace, Value, Window, TRACE_VERSION};
pub use replay::{replay_swaps, validate_trace};
pub use sort::sort;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use qsviz_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::event::{Depth, Event, Index, PointerName, Trace, Value, Window};
    pub use crate::replay::{replay_swaps, validate_trace};
    pub use crate::sort::sort;
}
