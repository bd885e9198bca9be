//! Shared scaffolding for the generic lexer loop every language follows
//! (spec.md C10).
//!
//! Concrete lexers call these helpers from their own `Lex`/`Fold`, rather
//! than reimplementing backtracking and init-style sanitisation each time.

use lexi_doc::Document;

/// The style byte a `Lex(startPos, ...)` call should treat as "the state
/// just before `startPos`": the byte at `startPos - 1`, or `0` at the very
/// start of the document (spec.md §4.9).
pub fn init_style_at(doc: &dyn Document, start_pos: usize) -> u8 {
    if start_pos == 0 {
        0
    } else {
        doc.style_at(start_pos - 1)
    }
}

/// Walks `start_pos` back, one line at a time, while the *previous* line's
/// line-state word looks like it's still inside a multi-line construct
/// (`is_unsafe` returns `true`), then returns a new `(start_pos, length)`
/// pair widened to cover what was skipped. `length` is unaffected on the
/// end side -- only the start moves backward.
pub fn backtrack_to_safe_line(
    doc: &dyn Document,
    start_pos: usize,
    length: usize,
    is_unsafe: impl Fn(u32) -> bool,
) -> (usize, usize) {
    let end_pos = start_pos + length;
    let mut line = doc.get_line(start_pos);
    while line > 0 && is_unsafe(doc.get_line_state(line - 1)) {
        line -= 1;
    }
    let new_start = doc.line_start(line);
    (new_start, end_pos.saturating_sub(new_start))
}

/// Clears `init_style` to `0` if it names one of a lexer's transient,
/// EOL-only sub-states (e.g. `STRINGEOL`), which must never leak across a
/// resume boundary (spec.md §4.10 step 2).
pub fn sanitize_init_style(init_style: u8, transient_styles: &[u8]) -> u8 {
    if transient_styles.contains(&init_style) {
        0
    } else {
        init_style
    }
}
