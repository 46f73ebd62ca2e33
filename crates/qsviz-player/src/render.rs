//! Plain-text frames for terminal playback.
//!
//! One frame is: the value row, one bracket row per active window (shallowest
//! first), and a marker row per level carrying pointer glyphs (`i`, `j`, `p`)
//! plus `*` under the pivot mark. Cells are fixed-width so columns line up
//! across frames.

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

use std::fmt::Write as _;

use qsviz_core::PointerName;

use crate::state::PlayerState;

const fn glyph(name: PointerName) -> char {
    match name {
        PointerName::Low => 'i',
        PointerName::Scan => 'j',
        PointerName::Pivot => 'p',
    }
}

/// Render one frame of `state`.
#[must_use]
pub fn frame(state: &PlayerState) -> String {
    let values = state.arrangement();
    if values.is_empty() {
        return String::from("(empty)\n");
    }

    // Column width: widest value plus one space of padding.
    let width = values
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1)
        + 1;
    let mut out = String::new();

    // Value row, with '*' under the most recent pivot mark appended below.
    for v in values {
        let _ = write!(out, "{v:>width$}");
    }
    out.push('\n');

    if let Some(p) = state.pivot() {
        let mut row = vec![' '; values.len() * width];
        mark(&mut row, p, width, '*');
        push_row(&mut out, &row);
    }

    // One bracket row per active window, shallowest first.
    for (level, w) in state.windows() {
        let mut row = vec![' '; values.len() * width];
        let lo = w.lo.max(0) as usize;
        let hi = (w.hi.max(0) as usize).min(values.len() - 1);
        mark(&mut row, lo, width, '[');
        mark(&mut row, hi, width, ']');
        for k in lo..=hi {
            let col = k * width + (width - 1);
            if col < row.len() && row[col] == ' ' {
                row[col] = '-';
            }
        }
        let _ = write!(out, "L{level} ");
        push_row(&mut out, &row);
    }

    // Pointer rows, grouped by level.
    let mut current: Option<(u32, Vec<char>)> = None;
    for ((level, name), index) in state.pointers() {
        match &mut current {
            Some((l, row)) if *l == level => mark(row, index, width, glyph(name)),
            _ => {
                if let Some((l, row)) = current.take() {
                    let _ = write!(out, "L{l} ");
                    push_row(&mut out, &row);
                }
                let mut row = vec![' '; values.len() * width];
                mark(&mut row, index, width, glyph(name));
                current = Some((level, row));
            }
        }
    }
    if let Some((l, row)) = current {
        let _ = write!(out, "L{l} ");
        push_row(&mut out, &row);
    }

    out
}

fn mark(row: &mut [char], index: usize, width: usize, c: char) {
    let col = index * width + (width - 1);
    if col < row.len() {
        row[col] = c;
    }
}

fn push_row(out: &mut String, row: &[char]) {
    out.extend(row.iter());
    // Trim trailing spaces so frames diff cleanly.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsviz_core::{Event, Window};

    #[test]
    fn frame_shows_values_window_and_pointers() {
        let mut s = PlayerState::new(&[3, 6, 2]);
        s.apply(&Event::Range {
            window: Window::new(0, 2),
            level: 0,
        })
        .unwrap();
        s.apply(&Event::Pointer {
            name: PointerName::Scan,
            index: 1,
            level: 0,
        })
        .unwrap();

        let f = frame(&s);
        assert!(f.contains('3') && f.contains('6') && f.contains('2'));
        assert!(f.contains('[') && f.contains(']'));
        assert!(f.contains('j'));
    }

    #[test]
    fn empty_state_renders_placeholder() {
        let s = PlayerState::new(&[]);
        assert_eq!(frame(&s), "(empty)\n");
    }
}
