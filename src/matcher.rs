//! Brute-force longest match search over the trailing window.

use crate::WINDOW_SIZE;

/// A back-reference candidate. `len == 0` means nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Match {
    pub len: usize,
    /// 1-based distance back from the cursor.
    pub disp: usize,
}

impl Match {
    pub const NONE: Match = Match { len: 0, disp: 0 };
}

/// The input as seen from one cursor position.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    data: &'a [u8],
    pos: usize,
    max_len: usize,
}

impl<'a> Window<'a> {
    /// A `pos` past the end of `data` is clamped to the end.
    pub fn new(data: &'a [u8], pos: usize, max_len: usize) -> Self {
        Window {
            data,
            pos: pos.min(data.len()),
            max_len,
        }
    }

    /// Up to `WINDOW_SIZE` already-encoded bytes ending just before the cursor.
    pub fn history(&self) -> &'a [u8] {
        &self.data[self.pos.saturating_sub(WINDOW_SIZE)..self.pos]
    }

    /// Unencoded bytes from the cursor, capped at `max_len`.
    pub fn lookahead(&self) -> &'a [u8] {
        let end = self.data.len().min(self.pos.saturating_add(self.max_len));
        &self.data[self.pos..end]
    }

    pub fn longest_match(&self, min_disp: usize) -> Match {
        find_longest_match(self.history(), self.lookahead(), min_disp)
    }
}

// number of leading bytes of `lookahead` that repeat the bytes at
// `history[start..]`. once the candidate runs off the end of history it keeps
// reading from the lookahead itself, the same bytes a decoder would have
// produced by then.
fn run_len(history: &[u8], lookahead: &[u8], start: usize) -> usize {
    let head = &history[start..];
    let n = head
        .iter()
        .zip(lookahead)
        .take_while(|(a, b)| a == b)
        .count();
    if n < head.len() || n == lookahead.len() {
        return n;
    }
    n + lookahead
        .iter()
        .zip(&lookahead[n..])
        .take_while(|(a, b)| a == b)
        .count()
}

/// Find the longest prefix of `lookahead` that also starts somewhere in
/// `history`, at a displacement of at least `min_disp` (never less than 1).
///
/// Offsets are tried oldest first and only a strictly longer run replaces the
/// best so far, so among equally long runs the farthest one wins. A run that
/// covers the whole lookahead ends the search.
///
/// Runs of 1 or 2 bytes are reported as-is; it is up to the caller to decide
/// they are not worth a back-reference.
pub fn find_longest_match(history: &[u8], lookahead: &[u8], min_disp: usize) -> Match {
    if lookahead.is_empty() {
        return Match::NONE;
    }
    let Some(last) = history.len().checked_sub(min_disp.max(1)) else {
        return Match::NONE;
    };
    let mut best = Match::NONE;
    for i in 0..=last {
        let len = run_len(history, lookahead, i);
        if len > best.len {
            best = Match {
                len,
                disp: history.len() - i,
            };
            if len == lookahead.len() {
                break;
            }
        }
    }
    best
}
