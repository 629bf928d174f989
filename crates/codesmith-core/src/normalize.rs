//! Markdown fence normalization for raw model output.
//!
//! Hosted models frequently wrap generated code in markdown code fences
//! (three backticks, optionally followed by a language hint) even when asked
//! not to. [`normalize_code`] strips boundary fences and surrounding
//! whitespace, leaving the enclosed source text. Fences embedded in the
//! middle of the body (e.g. nested examples) are left untouched -- this is a
//! boundary cleanup, not a markdown parser.

use std::sync::OnceLock;

use regex::Regex;

static LEADING_FENCE: OnceLock<Regex> = OnceLock::new();

/// Matches a fence line at the start of the text: three backticks followed
/// by an optional language hint (word characters, hyphens, plus signs) and
/// an optional newline.
fn leading_fence() -> &'static Regex {
    LEADING_FENCE.get_or_init(|| Regex::new(r"^```[\w+-]*\n?").unwrap())
}

/// Strips markdown fence delimiters from the boundaries of `raw`.
///
/// Applied in order, each step operating on the evolving string:
///
/// 1. leading fence lines (with optional language hint) are removed;
/// 2. trailing triple-backtick sequences (with optional surrounding
///    whitespace) are removed;
/// 3. the result is trimmed.
///
/// Input without fences passes through trimmed. The function never fails;
/// malformed fencing degrades to best-effort cleanup. An empty result means
/// the raw output contained no usable code, which callers must treat as a
/// generation failure.
///
/// Idempotent: the output neither starts with a fence line nor ends with a
/// backtick fence, so a second application is the identity.
pub fn normalize_code(raw: &str) -> String {
    let mut text = raw.trim();

    // Leading fences. Loops so that stacked fence lines at the start (from
    // malformed output) are all consumed.
    loop {
        text = text.trim_start();
        match leading_fence().find(text) {
            Some(m) => text = &text[m.end()..],
            None => break,
        }
    }

    // Trailing fences: a closing ``` line at the very end, plus any
    // standalone trailing backtick runs left behind by malformed output.
    loop {
        text = text.trim_end();
        match text.strip_suffix("```") {
            Some(rest) => text = rest,
            None => break,
        }
    }

    text.trim().to_string()
}
