//! Folding for the C-family lexer (spec.md §4.11), ported from
//! `LexerCPP::Fold`.

use crate::options::CppOptions;
use crate::style::{is_stream_comment_style, mask_active, COMMENT_LINE, COMMENT_LINE_DOC, OPERATOR, PREPROCESSOR};
use lexi_charset::is_space_or_tab;
use lexi_doc::Document;
use lexi_state::{pack_level, FoldFlags, LEVEL_MASK};

const FOLD_BASE: i32 = 0;

pub fn fold(doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8, options: &CppOptions) {
    if !options.fold {
        return;
    }

    let end_pos = start_pos + length;
    let mut visible_chars = 0u32;
    let mut in_line_comment = false;
    let mut line_current = doc.get_line(start_pos);
    let mut level_current = if line_current > 0 {
        (doc.get_level(line_current - 1) >> 16) as i32
    } else {
        FOLD_BASE
    };
    let mut line_start_next = doc.line_start(line_current + 1);
    let mut level_min_current = level_current;
    let mut level_next = level_current;
    let mut ch_next = doc.char_at(start_pos);
    let mut style_next = mask_active(doc.style_at(start_pos));
    let mut style = mask_active(init_style);
    let user_defined_fold_markers = !options.fold_explicit_start.is_empty() && !options.fold_explicit_end.is_empty();

    for i in start_pos..end_pos {
        let ch = ch_next;
        ch_next = doc.char_at(i + 1);
        let style_prev = style;
        style = style_next;
        style_next = mask_active(doc.style_at(i + 1));
        let at_eol = i + 1 == line_start_next;

        if style == COMMENT_LINE || style == COMMENT_LINE_DOC {
            in_line_comment = true;
        }

        if options.fold_comment && options.fold_comment_multiline && is_stream_comment_style(style) && !in_line_comment {
            if !is_stream_comment_style(style_prev) {
                level_next += 1;
            } else if !is_stream_comment_style(style_next) && !at_eol {
                level_next -= 1;
            }
        }

        if options.fold_comment && options.fold_comment_explicit && (style == COMMENT_LINE || options.fold_explicit_anywhere) {
            if user_defined_fold_markers {
                if doc.matches(i, options.fold_explicit_start.as_bytes()) {
                    level_next += 1;
                } else if doc.matches(i, options.fold_explicit_end.as_bytes()) {
                    level_next -= 1;
                }
            } else if ch == b'/' && ch_next == b'/' {
                let ch_next2 = doc.char_at(i + 2);
                if ch_next2 == b'{' {
                    level_next += 1;
                } else if ch_next2 == b'}' {
                    level_next -= 1;
                }
            }
        }

        if options.fold_preprocessor && style == PREPROCESSOR && ch == b'#' {
            let mut j = i + 1;
            while j < end_pos && is_space_or_tab(doc.char_at(j)) {
                j += 1;
            }
            if doc.matches(j, b"region") || doc.matches(j, b"if") {
                level_next += 1;
            } else if doc.matches(j, b"end") {
                level_next -= 1;
            }
        }

        if options.fold_syntax_based && style == OPERATOR {
            if ch == b'{' || ch == b'[' {
                if level_min_current > level_next {
                    level_min_current = level_next;
                }
                level_next += 1;
            } else if ch == b'}' || ch == b']' {
                level_next -= 1;
            }
        }

        if ch != b' ' && ch != b'\t' && ch != b'\n' && ch != b'\r' {
            visible_chars += 1;
        }

        if at_eol || i == end_pos - 1 {
            let level_use = if options.fold_syntax_based && options.fold_at_else { level_min_current } else { level_current };
            let flags = if visible_chars == 0 && options.fold_compact {
                FoldFlags::WHITE
            } else {
                FoldFlags::empty()
            };
            let flags = if level_use < level_next { flags | FoldFlags::HEADER } else { flags };
            let lev = pack_level((level_use.max(0) as u32) & LEVEL_MASK, flags, Some((level_next.max(0) as u32) & LEVEL_MASK));
            if lev != doc.get_level(line_current) {
                doc.set_level(line_current, lev);
            }
            line_current += 1;
            line_start_next = doc.line_start(line_current + 1);
            level_current = level_next;
            level_min_current = level_current;
            if at_eol && i == doc.len() - 1 {
                let lev = pack_level(
                    (level_current.max(0) as u32) & LEVEL_MASK,
                    FoldFlags::WHITE,
                    Some((level_current.max(0) as u32) & LEVEL_MASK),
                );
                doc.set_level(line_current, lev);
            }
            visible_chars = 0;
            in_line_comment = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_doc::MemoryDocument;

    fn styled(text: &str, style_for: impl Fn(u8) -> u8) -> MemoryDocument {
        let mut doc = MemoryDocument::from_str(text);
        doc.start_styling(0);
        for (i, &b) in text.as_bytes().iter().enumerate() {
            doc.colour_to(i + 1, style_for(b));
        }
        doc
    }

    #[test]
    fn brace_pair_folds_one_level() {
        let mut doc = styled("{\n}\n", |b| if b == b'{' || b == b'}' { OPERATOR } else { 0 });
        let options = CppOptions::default();
        fold(&mut doc, 0, doc.len(), 0, &options);
        let level0 = doc.get_level(0);
        let level1 = doc.get_level(1);
        assert!(lexi_state::is_header(level0));
        assert_eq!(lexi_state::next_line_level_of(level0), 1);
        assert_eq!(lexi_state::level_of(level1), 1);
    }

    #[test]
    fn disabled_fold_option_is_a_no_op() {
        let mut doc = styled("{\n}\n", |b| if b == b'{' || b == b'}' { OPERATOR } else { 0 });
        let mut options = CppOptions::default();
        options.fold = false;
        fold(&mut doc, 0, doc.len(), 0, &options);
        assert_eq!(doc.get_level(0), 0);
    }

    #[test]
    fn blank_line_gets_white_flag_when_compact() {
        let mut doc = styled("a\n\nb\n", |_| 0);
        let options = CppOptions::default();
        fold(&mut doc, 0, doc.len(), 0, &options);
        assert!(lexi_state::is_white(doc.get_level(1)));
    }
}
