//! JSON Lines (NDJSON) helpers for streaming the event sequence.
//!
//! A JSONL trace file carries one `Event` object per line. Useful for very
//! long traces a player wants to consume incrementally, and for piping into
//! line-oriented tooling.
//!
//! - **Reader**: returns an iterator that *owns* its underlying reader,
//!   yielding `Result<Event>` so callers can surface per-line errors.
//!   (No borrowed iterators that outlive their buffers.)
//! - **Writer**: uses `serde_json::to_writer` to avoid intermediate
//!   allocations.
//!
//! We treat both `.jsonl` and `.ndjson` as equivalent line-delimited JSON.

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

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::event::Event;

/// Owning JSONL iterator over `Event`.
///
/// Holds the file and buffered reader internally to avoid the lifetime
/// pitfalls of returning a borrowed `Lines<'_>` iterator.
pub struct JsonlEventIter {
    rdr: BufReader<File>,
    buf: String,
    line_no: usize,
}

impl JsonlEventIter {
    fn new(file: File) -> Self {
        Self {
            rdr: BufReader::new(file),
            buf: String::with_capacity(256),
            line_no: 0,
        }
    }
}

impl Iterator for JsonlEventIter {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.rdr.read_line(&mut self.buf) {
            Ok(0) => None, // EOF
            Ok(_) => {
                self.line_no += 1;
                // Trim a single trailing '\n' or '\r\n'
                if self.buf.ends_with('\n') {
                    self.buf.pop();
                    if self.buf.ends_with('\r') {
                        self.buf.pop();
                    }
                }
                if self.buf.is_empty() {
                    return Some(Err(anyhow::anyhow!(
                        "parse jsonl line {}: empty line",
                        self.line_no
                    )));
                }
                let parsed: Result<Event> = serde_json::from_str(&self.buf)
                    .with_context(|| format!("parse jsonl line {}", self.line_no));
                Some(parsed)
            }
            Err(e) => Some(Err(e).with_context(|| format!("read line {}", self.line_no + 1))),
        }
    }
}

/// Stream read: one JSON object per line → yields `Event` items.
///
/// Only one event is materialized at a time; parse failures carry the line
/// number.
pub fn stream_events_jsonl<P: AsRef<Path>>(path: P) -> Result<JsonlEventIter> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref)
        .with_context(|| format!("open {}", path_ref.to_string_lossy()))?;
    Ok(JsonlEventIter::new(f))
}

/// Stream write: one JSON object per line.
pub fn write_events_jsonl<'a, P, I>(path: P, events: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Event>,
{
    let path_ref = path.as_ref();
    let f = File::create(path_ref)
        .with_context(|| format!("create {}", path_ref.to_string_lossy()))?;
    let mut w = BufWriter::new(f);

    let mut n = 0usize;
    for ev in events {
        serde_json::to_writer(&mut w, ev).with_context(|| "serialize event to JSON line")?;
        w.write_all(b"\n")?;
        n += 1;
    }
    w.flush().with_context(|| "flush JSONL writer")?;
    Ok(n)
}
