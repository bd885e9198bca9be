//! The Lua `Lex` state machine (spec.md §4.12), ported from
//! `LexLua.cxx`'s `LexerLua::Lex`.

use crate::style::*;
use lexi_charset::{is_digit, is_space_or_tab, CharSet, Seed};
use lexi_context::StyleContext;
use lexi_doc::Document;
use lexi_engine::WordLists;

fn char_sets() -> (CharSet, CharSet, CharSet, CharSet, CharSet, CharSet) {
    let set_word_start = CharSet::new(Seed::Alpha, "_", true);
    let set_word = CharSet::new(Seed::AlphaNum, "_", true);
    let set_number = CharSet::new(Seed::Digits, ".-+abcdefpABCDEFP", false);
    let set_exponent = CharSet::from_str("eEpP");
    let set_lua_operator = CharSet::from_str("*/-+()={}~[];<>,.^%:#&|");
    let set_escape_skip = CharSet::from_str("\"'\\");
    (set_word_start, set_word, set_number, set_exponent, set_lua_operator, set_escape_skip)
}

/// Tests for `[=[ ... ]=]`-style long-bracket delimiters, relative to the
/// cursor's current `[`/`]`: `0` for a bare bracket, `1` for `[[`/`]]`,
/// `>=2` for `[=[`/`]=]` and so on. Caps at 254 `=` characters.
fn long_delim_check<D: Document + ?Sized>(sc: &StyleContext<D>) -> isize {
    const MAX_EQUALS: isize = 254;
    let mut sep: isize = 1;
    while sc.get_relative(sep) == b'=' && sep <= MAX_EQUALS {
        sep += 1;
    }
    if sc.get_relative(sep) == sc.ch {
        sep
    } else {
        0
    }
}

fn any_of(style: u8, options: &[u8]) -> bool {
    options.contains(&style)
}

#[allow(clippy::too_many_lines)]
pub fn lex<D: Document + ?Sized>(doc: &mut D, start_pos: usize, length: usize, init_style: u8, words: &WordLists) {
    let (set_word_start, set_word, set_number, set_exponent, set_lua_operator, set_escape_skip) = char_sets();

    let keywords = words.get(0).cloned().unwrap_or_default();
    let keywords2 = words.get(1).cloned().unwrap_or_default();
    let keywords3 = words.get(2).cloned().unwrap_or_default();
    let keywords4 = words.get(3).cloned().unwrap_or_default();
    let keywords5 = words.get(4).cloned().unwrap_or_default();
    let keywords6 = words.get(5).cloned().unwrap_or_default();
    let keywords7 = words.get(6).cloned().unwrap_or_default();
    let keywords8 = words.get(7).cloned().unwrap_or_default();

    let mut current_line = doc.get_line(start_pos);

    let mut sep_count: u32 = 0;
    let mut string_ws: u32 = 0;
    let mut last_line_doc_comment: u32 = 0;
    if current_line > 0
        && any_of(init_style, &[DEFAULT, LITERAL_STRING, COMMENT, COMMENT_DOC, STRING, CHARACTER])
    {
        let line_state = doc.get_line_state(current_line - 1);
        sep_count = line_state & MASK_SEPARATOR;
        string_ws = line_state & MASK_STRING_WS;
        last_line_doc_comment = line_state & MASK_DOC_COMMENT;
    }

    let mut iden_pos: isize = 0;
    let mut iden_word_pos: isize = 0;
    let mut iden_style = IDENTIFIER;
    let mut found_goto = false;

    let init_style = if any_of(init_style, &[STRING_EOL, COMMENT_LINE, COMMENT_DOC, PREPROCESSOR]) { DEFAULT } else { init_style };

    let mut sc = StyleContext::new(doc, start_pos, length, init_style);
    if start_pos == 0 && sc.ch == b'#' && sc.ch_next == b'!' {
        sc.set_state(COMMENT_LINE);
    }

    while sc.more() {
        if sc.at_line_end {
            current_line = sc.document().get_line(sc.current_pos);
            match sc.state {
                DEFAULT | LITERAL_STRING | COMMENT | COMMENT_DOC | STRING | CHARACTER => {
                    let word = last_line_doc_comment | string_ws | sep_count;
                    sc.document_mut().set_line_state(current_line, word);
                }
                _ => sc.document_mut().set_line_state(current_line, 0),
            }
        }
        if sc.at_line_start && sc.state == STRING {
            sc.set_state(STRING);
        }

        if (sc.state == STRING || sc.state == CHARACTER) && sc.ch == b'\\' {
            if sc.ch_next == b'\n' || sc.ch_next == b'\r' {
                sc.forward();
                if sc.ch == b'\r' && sc.ch_next == b'\n' {
                    sc.forward();
                }
                sc.forward();
                continue;
            }
        }

        if sc.state == OPERATOR {
            if sc.ch == b':' && sc.ch_prev == b':' {
                sc.forward();
                let mut ln: isize = 0;
                while is_space_or_tab(sc.get_relative(ln)) {
                    ln += 1;
                }
                let ws1 = ln;
                if set_word_start.contains(sc.get_relative(ln)) {
                    let mut s = Vec::new();
                    loop {
                        let c_label = sc.get_relative(ln);
                        if !set_word.contains(c_label) {
                            break;
                        }
                        s.push(c_label);
                        ln += 1;
                    }
                    let lbl = ln;
                    let label_str = String::from_utf8_lossy(&s).into_owned();
                    if !keywords.in_list(&label_str) {
                        while is_space_or_tab(sc.get_relative(ln)) {
                            ln += 1;
                        }
                        let ws2 = ln - lbl;
                        if sc.get_relative(ln) == b':' && sc.get_relative(ln + 1) == b':' {
                            sc.change_state(LABEL);
                            if ws1 > 0 {
                                sc.set_state(DEFAULT);
                                sc.forward_bytes(ws1 as usize);
                            }
                            sc.set_state(LABEL);
                            sc.forward_bytes((lbl - ws1) as usize);
                            if ws2 > 0 {
                                sc.set_state(DEFAULT);
                                sc.forward_bytes(ws2 as usize);
                            }
                            sc.set_state(LABEL);
                            sc.forward_bytes(2);
                        }
                    }
                }
            }
            sc.set_state(DEFAULT);
        } else if sc.state == NUMBER {
            if !set_number.contains(sc.ch) {
                sc.set_state(DEFAULT);
            } else if sc.ch == b'-' || sc.ch == b'+' {
                if !set_exponent.contains(sc.ch_prev) {
                    sc.set_state(DEFAULT);
                }
            }
        } else if sc.state == IDENTIFIER {
            iden_pos -= 1;
            if iden_word_pos > 0 {
                iden_word_pos -= 1;
                sc.change_state(iden_style);
                sc.forward_bytes(iden_word_pos as usize);
                iden_pos -= iden_word_pos;
                if iden_pos > 0 {
                    sc.set_state(IDENTIFIER);
                    sc.forward_bytes(iden_pos as usize);
                }
            } else {
                sc.forward_bytes(iden_pos.max(0) as usize);
            }
            sc.set_state(DEFAULT);
            if found_goto {
                while is_space_or_tab(sc.ch) && !sc.at_line_end {
                    sc.forward();
                }
                if set_word_start.contains(sc.ch) {
                    sc.set_state(LABEL);
                    sc.forward();
                    while set_word.contains(sc.ch) {
                        sc.forward();
                    }
                    let s = sc.current_bytes();
                    let s = String::from_utf8_lossy(&s).into_owned();
                    if keywords.in_list(&s) {
                        sc.change_state(WORD);
                    }
                }
                sc.set_state(DEFAULT);
            }
        } else if any_of(sc.state, &[COMMENT_LINE, COMMENT_DOC, PREPROCESSOR]) {
            if sc.at_line_end {
                sc.forward_set_state(DEFAULT);
            }
        } else if sc.state == STRING {
            if string_ws != 0 && !is_space(sc.ch) {
                string_ws = 0;
            }
            if sc.ch == b'\\' {
                if set_escape_skip.contains(sc.ch_next) {
                    sc.forward();
                } else if sc.ch_next == b'z' {
                    sc.forward();
                    string_ws = MASK_STRING_WS;
                }
            } else if sc.ch == b'"' {
                sc.forward_set_state(DEFAULT);
            } else if string_ws == 0 && sc.at_line_end {
                sc.change_state(STRING_EOL);
                sc.forward_set_state(DEFAULT);
            }
        } else if sc.state == CHARACTER {
            if string_ws != 0 && !is_space(sc.ch) {
                string_ws = 0;
            }
            if sc.ch == b'\\' {
                if set_escape_skip.contains(sc.ch_next) {
                    sc.forward();
                } else if sc.ch_next == b'z' {
                    sc.forward();
                    string_ws = MASK_STRING_WS;
                }
            } else if sc.ch == b'\'' {
                sc.forward_set_state(DEFAULT);
            } else if string_ws == 0 && sc.at_line_end {
                sc.change_state(STRING_EOL);
                sc.forward_set_state(DEFAULT);
            }
        } else if sc.ch == b']' && (sc.state == LITERAL_STRING || sc.state == COMMENT) {
            let sep = long_delim_check(&sc);
            if sep == sep_count as isize {
                sc.forward_bytes(sep as usize);
                sc.forward_set_state(DEFAULT);
            }
        }

        if sc.state == DEFAULT {
            if is_digit(sc.ch) || (sc.ch == b'.' && is_digit(sc.ch_next)) {
                sc.set_state(NUMBER);
                if sc.ch == b'0' && (sc.ch_next == b'x' || sc.ch_next == b'X') {
                    sc.forward();
                }
            } else if set_word_start.contains(sc.ch) {
                let mut ident = String::new();
                iden_pos = 0;
                iden_word_pos = 0;
                iden_style = IDENTIFIER;
                found_goto = false;
                let mut c_next: u8;
                loop {
                    let iden_pos_old = iden_pos;
                    let mut ident_seg = String::new();
                    ident_seg.push(sc.get_relative(iden_pos) as char);
                    iden_pos += 1;
                    let mut c_ident;
                    loop {
                        c_ident = sc.get_relative(iden_pos);
                        if !set_word.contains(c_ident) {
                            break;
                        }
                        ident_seg.push(c_ident as char);
                        iden_pos += 1;
                    }
                    if keywords.in_list(&ident_seg) && iden_pos_old > 0 {
                        iden_pos = iden_pos_old - 1;
                        ident.pop();
                        break;
                    }
                    ident.push_str(&ident_seg);
                    let mut new_style = IDENTIFIER;
                    if keywords.in_list(&ident) {
                        new_style = WORD;
                    } else if keywords2.in_list(&ident) {
                        new_style = WORD2;
                    } else if keywords3.in_list(&ident) {
                        new_style = WORD3;
                    } else if keywords4.in_list(&ident) {
                        new_style = WORD4;
                    } else if keywords5.in_list(&ident) {
                        new_style = WORD5;
                    } else if keywords6.in_list(&ident) {
                        new_style = WORD6;
                    } else if keywords7.in_list(&ident) {
                        new_style = WORD7;
                    } else if keywords8.in_list(&ident) {
                        new_style = WORD8;
                    }
                    if new_style != IDENTIFIER {
                        iden_style = new_style;
                        iden_word_pos = iden_pos;
                    }
                    if iden_style == WORD {
                        break;
                    }
                    c_next = sc.get_relative(iden_pos + 1);
                    if (c_ident == b'.' || c_ident == b':') && set_word_start.contains(c_next) {
                        ident.push(c_ident as char);
                        iden_pos += 1;
                    } else {
                        c_next = 0;
                    }
                    if c_next == 0 {
                        break;
                    }
                }
                if iden_style == WORD && ident == "goto" {
                    found_goto = true;
                }
                sc.set_state(IDENTIFIER);
            } else if sc.ch == b'"' {
                sc.set_state(STRING);
                string_ws = 0;
            } else if sc.ch == b'\'' {
                sc.set_state(CHARACTER);
                string_ws = 0;
            } else if sc.ch == b'[' {
                sep_count = long_delim_check(&sc).max(0) as u32;
                if sep_count == 0 {
                    sc.set_state(OPERATOR);
                } else {
                    sc.set_state(LITERAL_STRING);
                    sc.forward_bytes(sep_count as usize);
                }
            } else if sc.match2(b'-', b'-') {
                sc.set_state(if last_line_doc_comment != 0 { COMMENT_DOC } else { COMMENT_LINE });
                if sc.match_literal(b"--[") {
                    sc.forward_bytes(2);
                    let sep = long_delim_check(&sc);
                    if sep > 0 {
                        sep_count = sep as u32;
                        sc.change_state(COMMENT);
                        sc.forward_bytes(sep as usize);
                    }
                } else if sc.match_literal(b"---") {
                    sc.set_state(COMMENT_DOC);
                    last_line_doc_comment = MASK_DOC_COMMENT;
                } else {
                    sc.forward();
                }
            } else if sc.at_line_start && sc.match1(b'$') {
                sc.set_state(PREPROCESSOR);
            } else if set_lua_operator.contains(sc.ch) {
                sc.set_state(OPERATOR);
            }
            if !any_of(sc.state, &[DEFAULT, COMMENT_DOC]) {
                last_line_doc_comment = 0;
            }
        }

        sc.forward();
    }

    sc.complete();
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}
