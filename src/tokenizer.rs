//! Greedy left-to-right scan turning raw symbols into a token stream.

use crate::code::{Symbol, Token};
use crate::matcher::find_longest_match;
use crate::window::Window;

/// A produced token together with the window occupancy observed when it
/// was emitted. The offset field width depends on that occupancy, so it
/// is recorded here once; the bit encoder stays a pure function of the
/// steps and never touches the window itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStep {
    pub token: Token,
    pub real_window: u32,
}

/// Tokenize `input` against a fresh window of `window_size` symbols.
///
/// Emits a literal when the matcher comes back empty, otherwise a match
/// covering the returned run. Every iteration consumes at least one
/// symbol, so the loop terminates and the token lengths sum to
/// `input.len()` exactly.
pub fn tokenize(input: &[Symbol], window_size: usize) -> Vec<TokenStep> {
    // Cap the buffer at the input size; occupancy can never exceed the
    // symbols emitted, so a window larger than the input changes nothing.
    let mut window = Window::new(window_size.min(input.len()).max(1));
    let mut steps = Vec::new();
    let mut pos = 0usize;

    while pos < input.len() {
        let lookahead = &input[pos..];
        let real_window = window.len() as u32;
        let (offset, length) = find_longest_match(&window, lookahead);

        if length == 0 {
            steps.push(TokenStep {
                token: Token::Literal { symbol: lookahead[0] },
                real_window,
            });
            window.push_run(&lookahead[..1]);
            pos += 1;
        } else {
            steps.push(TokenStep {
                token: Token::Match { offset, length },
                real_window,
            });
            window.push_run(&lookahead[..length as usize]);
            pos += length as usize;
        }
    }

    log_window_usage(&steps, window_size);
    steps
}

/// Debug-level summary of how hard the scan leaned on the window.
fn log_window_usage(steps: &[TokenStep], window_size: usize) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let mut matches = 0u64;
    let mut literals = 0u64;
    let mut at_capacity = 0u64;
    for step in steps {
        match step.token {
            Token::Match { offset, .. } => {
                matches += 1;
                if offset as usize == window_size {
                    at_capacity += 1;
                }
            }
            Token::Literal { .. } => literals += 1,
        }
    }

    let total = matches + literals;
    if total == 0 {
        return;
    }
    log::debug!(
        "window usage: {}/{} tokens are matches ({:.1}%), {} at full depth {}",
        matches,
        total,
        matches as f64 / total as f64 * 100.0,
        at_capacity,
        window_size
    );
}
