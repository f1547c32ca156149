//! Longest-match search over the window dictionary.
//!
//! An exhaustive O(window × lookahead) scan. The window is a small
//! bounded constant here, not a scaling parameter, so the scan stays
//! simple instead of carrying hash chains.

use crate::code::Symbol;
use crate::window::Window;

/// Best `(offset, length)` match for the head of `lookahead` inside
/// `window`. Length 0 means no symbol matched and the caller must emit a
/// literal.
///
/// Candidate offsets are scanned from 1 (nearest) upward and only a
/// strictly longer run replaces the best, so equal-length ties keep the
/// smallest offset. A run may extend past
/// the window end: once the source catches up with the insertion point it
/// continues through the lookahead itself, which is how a one-symbol
/// window can still cover a long repeat.
pub fn find_longest_match(window: &Window, lookahead: &[Symbol]) -> (u32, u32) {
    let wlen = window.len();
    if wlen == 0 || lookahead.is_empty() {
        return (0, 0);
    }

    let mut best_offset = 0u32;
    let mut best_len = 0usize;

    for offset in 1..=wlen {
        let start = wlen - offset;
        let mut len = 0usize;
        while len < lookahead.len() {
            let source = if start + len < wlen {
                window.get(start + len)
            } else {
                lookahead[len - offset]
            };
            if source != lookahead[len] {
                break;
            }
            len += 1;
        }

        if len > best_len {
            best_len = len;
            best_offset = offset as u32;
            if best_len == lookahead.len() {
                break;
            }
        }
    }

    (best_offset, best_len as u32)
}
