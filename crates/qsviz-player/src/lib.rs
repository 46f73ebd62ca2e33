//! qsviz-player — headless consumer of a sort trace.
//!
//! The player never re-derives sort logic: it only replays positions and
//! highlights described by the trace, one event at a time. All wall-clock
//! concerns (the playback tick) live *outside* this crate, in whatever loop
//! drives `PlayerState::apply`; the state model here is pure.
//!
//! State is per-invocation: construct a fresh [`PlayerState`] for every
//! playback so nothing leaks between runs.
//!
//! - `state`: the visual-state model and its `apply` operation.
//! - `render`: plain-text frames for terminal playback.

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

/// Text-frame rendering of a player state.
pub mod render;
/// Visual-state model and event application.
pub mod state;

pub use render::frame;
pub use state::PlayerState;
