//! Folding for the Lua lexer (spec.md §4.12), ported from
//! `LexerLua::Fold`.

use crate::options::LuaOptions;
use crate::style::{COMMENT, LITERAL_STRING, OPERATOR, WORD};
use lexi_doc::Document;
use lexi_state::{pack_level, FoldFlags, LEVEL_MASK};

fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_space_char(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

pub fn fold(doc: &mut dyn Document, start_pos: usize, length: usize, init_style: u8, options: &LuaOptions) {
    let length_doc = start_pos + length;
    let mut visible_chars = 0u32;
    let mut line_current = doc.get_line(start_pos);
    let mut level_prev = (doc.get_level(line_current) & LEVEL_MASK) as i32;
    let mut level_current = level_prev;
    let mut ch_next = doc.char_at(start_pos);
    let fold_compact = options.fold_compact;
    let mut style = init_style;
    let mut style_next = doc.style_at(start_pos);

    for i in start_pos..length_doc {
        let ch = ch_next;
        ch_next = doc.char_at(i + 1);
        let style_prev = style;
        style = style_next;
        if i + 1 < length_doc {
            style_next = doc.style_at(i + 1);
        }
        let at_eol = (ch == b'\r' && ch_next != b'\n') || ch == b'\n';

        if style == WORD {
            if style != style_prev && matches!(ch, b'i' | b'd' | b'f' | b'e' | b'r' | b'u') {
                const MAX_FOLD_WORD: usize = 9;
                let mut s = Vec::new();
                for j in 0..MAX_FOLD_WORD {
                    let c = doc.char_at(i + j);
                    if !is_word_char(c) {
                        break;
                    }
                    s.push(c);
                }
                let s = String::from_utf8_lossy(&s);
                if s == "if" || s == "do" || s == "function" || s == "repeat" {
                    level_current += 1;
                }
                if s == "end" || s == "until" {
                    level_current -= 1;
                }
            }
        } else if style == OPERATOR {
            if ch == b'{' || ch == b'(' {
                level_current += 1;
            } else if ch == b'}' || ch == b')' {
                level_current -= 1;
            }
        } else if style == LITERAL_STRING || style == COMMENT {
            if style_prev != style {
                level_current += 1;
            } else if style_next != style {
                level_current -= 1;
            }
        }

        if at_eol {
            let flags = if visible_chars == 0 && fold_compact { FoldFlags::WHITE } else { FoldFlags::empty() };
            let flags = if visible_chars > 0 && level_prev < level_current { flags | FoldFlags::HEADER } else { flags };
            let lev = pack_level((level_prev.max(0) as u32) & LEVEL_MASK, flags, Some((level_current.max(0) as u32) & LEVEL_MASK));
            if lev != doc.get_level(line_current) {
                doc.set_level(line_current, lev);
            }
            line_current += 1;
            level_prev = level_current;
            visible_chars = 0;
        }
        if !is_space_char(ch) {
            visible_chars += 1;
        }
    }

    let flags_next = lexi_state::flags_of(doc.get_level(line_current));
    doc.set_level(line_current, pack_level((level_prev.max(0) as u32) & LEVEL_MASK, flags_next, None));
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
    fn function_end_folds_one_level() {
        let text = "function f()\nend\n";
        let mut doc = styled(text, |b| if b.is_ascii_alphabetic() { WORD } else { 0 });
        let options = LuaOptions::default();
        fold(&mut doc, 0, doc.len(), 0, &options);
        assert!(lexi_state::is_header(doc.get_level(0)));
        assert_eq!(lexi_state::level_of(doc.get_level(1)), 1);
    }

    #[test]
    fn blank_line_gets_white_flag_when_compact() {
        let text = "local a\n\nlocal b\n";
        let mut doc = styled(text, |_| 0);
        let options = LuaOptions::default();
        fold(&mut doc, 0, doc.len(), 0, &options);
        assert!(lexi_state::is_white(doc.get_level(1)));
    }
}
