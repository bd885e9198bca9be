//! The C-family `Lex` state machine (spec.md §4.11), ported from
//! `LexCPP.cxx`'s `LexerCPP::Lex`.

use crate::options::CppOptions;
use crate::style::{self, *};
use lexi_charset::{is_digit, is_operator, is_space_or_tab, CharSet, Seed};
use lexi_context::StyleContext;
use lexi_doc::Document;
use lexi_engine::{backtrack_to_safe_line, init_style_at, sanitize_init_style, WordLists};
use lexi_pp::{evaluate_expression, LinePPState, MacroDef, PPDefinition, SymbolTable};
use std::collections::HashMap;

/// Cross-call state an instance keeps between `Lex` invocations: the
/// per-line preprocessor conditional snapshots, the definition-history
/// log, and the initial (word-list-seeded) symbol table.
#[derive(Debug, Default)]
pub struct CppLexState {
    pub pp_states: lexi_pp::PPStates,
    pub define_history: Vec<PPDefinition>,
    pub initial_table: SymbolTable,
    pub raw_string_terminators: HashMap<usize, String>,
}

fn char_sets() -> (CharSet, CharSet, CharSet) {
    let set_word = CharSet::new(Seed::AlphaNum, "._", true);
    let set_word_start = CharSet::new(Seed::Alpha, "_", true);
    let set_doxygen = CharSet::new(Seed::Alpha, "", false);
    (set_word, set_word_start, set_doxygen)
}

const SET_OK_BEFORE_RE: &[u8] = b"\"\t!%^&*()-+=|{}[]:;,/?~\n\r<>";
const SET_COULD_BE_POST_OP: &[u8] = b"+-";
const SET_INVALID_RAW_FIRST: &[u8] = b" ()\\\t\v\n\r";

/// `true` when the bytes immediately before `pos` on the same line, after
/// skipping trailing spaces/tabs, spell out `return`.
fn follows_return_keyword<D: Document + ?Sized>(doc: &D, pos: usize) -> bool {
    let current_line = doc.get_line(pos);
    let line_start_pos = doc.line_start(current_line);
    let mut back = pos;
    while back > line_start_pos {
        back -= 1;
        let ch = doc.char_at(back);
        if ch != b' ' && ch != b'\t' {
            back += 1;
            break;
        }
    }
    const RET_BACK: &[u8] = b"nruter";
    let mut s = 0usize;
    while s < RET_BACK.len() && back > line_start_pos && doc.char_at(back - 1) == RET_BACK[s] {
        s += 1;
        back -= 1;
    }
    s == RET_BACK.len()
}

/// `true` when the byte immediately before the `+`/`-` run ending at `pos`
/// is the same character, i.e. `pos` sits right after `++` or `--`.
fn follows_postfix_operator<D: Document + ?Sized>(doc: &D, pos: usize) -> bool {
    let mut back = pos;
    while back > 0 {
        back -= 1;
        let ch = doc.char_at(back);
        if ch == b'+' || ch == b'-' {
            return back > 0 && doc.char_at(back - 1) == ch;
        }
    }
    false
}

/// Pulls the rest of the current line from `start`, stopping at `//`/`/*`
/// (spec.md §4.11 preprocessor parsing relies on this for directive
/// arguments), optionally dropping spaces.
fn rest_of_line(doc: &dyn Document, start: usize, allow_space: bool) -> String {
    let line = doc.get_line(start);
    let end_line = doc.line_end(line);
    let mut out = String::new();
    let mut i = start;
    while i < end_line {
        let ch = doc.char_at(i);
        if ch == b'\r' {
            break;
        }
        let ch_next = doc.char_at(i + 1);
        if ch == b'/' && (ch_next == b'/' || ch_next == b'*') {
            break;
        }
        if allow_space || ch != b' ' {
            out.push(ch as char);
        }
        i += 1;
    }
    out
}

fn highlight_task_marker<D: Document + ?Sized>(
    sc: &mut StyleContext<D>,
    marker_list: &lexi_words::WordList,
    activity: u8,
    case_sensitive: bool,
) -> bool {
    if marker_list.len() == 0 || !(is_operator(sc.ch_prev) || is_space_or_tab(sc.ch_prev) || sc.ch_prev == b'\n' || sc.ch_prev == b'\r') {
        return false;
    }
    let mut marker = Vec::new();
    let mut i = 0isize;
    while i < 50 {
        let ch = sc.get_relative(i);
        if is_space_or_tab(ch) || is_operator(ch) || ch == 0 {
            break;
        }
        marker.push(if case_sensitive { ch } else { ch.to_ascii_lowercase() });
        i += 1;
    }
    let word = String::from_utf8_lossy(&marker);
    if marker_list.in_list(&word) {
        sc.set_state(TASK_MARKER | activity);
        true
    } else {
        false
    }
}

/// Parses a word-list blob of `NAME=VALUE` / `NAME(args)=VALUE` / bare
/// `NAME` entries into a seed [`SymbolTable`] (spec.md §4.9,
/// `WordListSet(4, ...)`).
pub fn parse_seed_definitions(blob: &str) -> SymbolTable {
    let mut table = SymbolTable::new();
    for entry in blob.split_whitespace() {
        if let Some(eq) = entry.find('=') {
            let name_part = &entry[..eq];
            let val = &entry[eq + 1..];
            if let (Some(bracket), Some(bracket_end)) = (name_part.find('('), name_part.find(')')) {
                let args: Vec<String> = name_part[bracket + 1..bracket_end].split(',').map(|s| s.trim().to_string()).collect();
                let name = &name_part[..bracket];
                table.define(name, MacroDef::function_like(val, args));
            } else {
                table.define(name_part, MacroDef::value(val));
            }
        } else {
            table.define(entry, MacroDef::value("1"));
        }
    }
    table
}

pub struct LexOutcome {
    pub definitions_changed: bool,
}

#[allow(clippy::too_many_lines)]
pub fn lex<D: Document + ?Sized>(
    doc: &mut D,
    start_pos: usize,
    length: usize,
    init_style: u8,
    options: &CppOptions,
    words: &WordLists,
    state: &mut CppLexState,
) -> LexOutcome {
    let (set_word, set_word_start, set_doxygen) = char_sets();
    let init_style = sanitize_init_style(init_style, &[STRING_EOL]);

    let (start_pos, length) = backtrack_to_safe_line(doc, start_pos, length, |_| false);

    let mut line_current = doc.get_line(start_pos);

    let mut continuation_line = false;
    if matches!(mask_active(init_style), PREPROCESSOR | COMMENT_LINE | COMMENT_LINE_DOC) && line_current > 0 {
        let end_line_previous = doc.line_end(line_current - 1);
        if end_line_previous > 0 {
            continuation_line = doc.char_at(end_line_previous.saturating_sub(1)) == b'\\';
        }
    }

    let mut ch_prev_non_white: u8 = 0;
    if start_pos > 0 {
        let mut back = start_pos;
        while back > 0 {
            back -= 1;
            if back == 0 || !is_space_equiv(mask_active(doc.style_at(back))) {
                break;
            }
        }
        if mask_active(doc.style_at(back)) == OPERATOR {
            ch_prev_non_white = doc.char_at(back);
        }
    }

    let mut sc = StyleContext::new(doc, start_pos, length, init_style);
    let mut preproc = state.pp_states.for_line(line_current);

    let mut definitions_changed = false;
    if !options.update_preprocessor {
        state.define_history.clear();
    }
    let before = state.define_history.len();
    state.define_history.retain(|d| d.line + 1 <= line_current);
    if state.define_history.len() != before {
        definitions_changed = true;
    }

    let mut preprocessor_definitions = state.initial_table.clone();
    for def in &state.define_history {
        if def.is_undef {
            preprocessor_definitions.undef(&def.key);
        } else {
            preprocessor_definitions.define(
                def.key.clone(),
                if def.arguments.is_empty() { MacroDef::value(def.value.clone()) } else { MacroDef::function_like(def.value.clone(), def.arguments.clone()) },
            );
        }
    }

    let mut raw_string_terminator = state.raw_string_terminators.get(&line_current.wrapping_sub(1)).cloned().unwrap_or_default();
    let mut line_end_next = sc.document().line_end(line_current);

    let mut activity_set: u8 = if preproc.is_inactive() { ACTIVE_FLAG } else { 0 };

    let mut visible_chars = 0u32;
    let mut last_word_was_uuid = false;
    let mut is_include_preprocessor = false;
    let mut is_string_in_preprocessor = false;
    let mut in_re_range = false;
    let mut style_before_task_marker = DEFAULT;
    let mut style_before_dc_keyword = COMMENT_DOC;
    let mut seen_doc_key_brace = false;

    let marker_list = words.get(5).cloned().unwrap_or_default();
    let keywords = words.get(0).cloned().unwrap_or_default();
    let keywords2 = words.get(1).cloned().unwrap_or_default();
    let keywords3 = words.get(2).cloned().unwrap_or_default();
    let keywords4 = words.get(3).cloned().unwrap_or_default();

    while sc.more() {
        if sc.at_line_start {
            if sc.state == STRING || sc.state == CHARACTER {
                sc.set_state(sc.state);
            }
            if mask_active(sc.state) == PREPROCESSOR && !continuation_line {
                sc.set_state(DEFAULT | activity_set);
            }
            visible_chars = 0;
            last_word_was_uuid = false;
            is_include_preprocessor = false;
            in_re_range = false;
            if preproc.is_inactive() {
                activity_set = ACTIVE_FLAG;
                sc.set_state(sc.state | activity_set);
            }
        }

        if sc.at_line_end {
            line_current += 1;
            line_end_next = sc.document().line_end(line_current);
            state.pp_states.add(line_current, preproc);
            if !raw_string_terminator.is_empty() {
                state.raw_string_terminators.insert(line_current - 1, raw_string_terminator.clone());
            }
        }

        if sc.ch == b'\\' && sc.current_pos + 1 >= line_end_next {
            line_current += 1;
            line_end_next = sc.document().line_end(line_current);
            state.pp_states.add(line_current, preproc);
            sc.forward();
            if sc.ch == b'\r' && sc.ch_next == b'\n' {
                sc.forward();
            }
            continuation_line = true;
            sc.forward();
            continue;
        }

        let at_line_end_before_switch = sc.at_line_end;

        match mask_active(sc.state) {
            OPERATOR => sc.set_state(DEFAULT | activity_set),
            NUMBER => {
                if sc.ch == b'_' {
                    sc.change_state(USER_LITERAL | activity_set);
                } else if !(set_word.contains(sc.ch)
                    || sc.ch == b'\''
                    || ((sc.ch == b'+' || sc.ch == b'-') && matches!(sc.ch_prev, b'e' | b'E' | b'p' | b'P')))
                {
                    sc.set_state(DEFAULT | activity_set);
                }
            }
            USER_LITERAL => {
                if !set_word.contains(sc.ch) {
                    sc.set_state(DEFAULT | activity_set);
                }
            }
            IDENTIFIER => {
                if sc.at_line_start || sc.at_line_end || !set_word.contains(sc.ch) || sc.ch == b'.' {
                    let bytes = if options.case_sensitive { sc.current_bytes() } else { sc.current_lowered() };
                    let s = String::from_utf8_lossy(&bytes).into_owned();
                    if keywords.in_list(&s) {
                        last_word_was_uuid = s == "uuid";
                        sc.change_state(WORD | activity_set);
                    } else if keywords2.in_list(&s) {
                        sc.change_state(WORD2 | activity_set);
                    } else if keywords4.in_list(&s) {
                        sc.change_state(GLOBAL_CLASS | activity_set);
                    }
                    let literal_string = sc.ch == b'"';
                    if literal_string || sc.ch == b'\'' {
                        let raw = literal_string && sc.ch_prev == b'R' && !SET_INVALID_RAW_FIRST.contains(&sc.ch_next);
                        let len_s = if raw { s.len().saturating_sub(1) } else { s.len() };
                        let prefix = &s[..len_s.min(s.len())];
                        let valid = len_s == 0
                            || (len_s == 1 && matches!(prefix, "L" | "u" | "U"))
                            || (len_s == 2 && literal_string && prefix == "u8");
                        if valid {
                            if literal_string {
                                if raw {
                                    sc.change_state(STRING_RAW | activity_set);
                                    sc.set_state(DEFAULT | activity_set);
                                } else {
                                    sc.change_state(STRING | activity_set);
                                }
                            } else {
                                sc.change_state(CHARACTER | activity_set);
                            }
                        } else {
                            sc.set_state(DEFAULT | activity_set);
                        }
                    } else {
                        sc.set_state(DEFAULT | activity_set);
                    }
                }
            }
            PREPROCESSOR => {
                if options.styling_within_preprocessor {
                    if is_space_or_tab(sc.ch) {
                        sc.set_state(DEFAULT | activity_set);
                    }
                } else if is_string_in_preprocessor && (sc.match1(b'>') || sc.match1(b'"') || sc.at_line_end) {
                    is_string_in_preprocessor = false;
                } else if !is_string_in_preprocessor {
                    if (is_include_preprocessor && sc.match1(b'<')) || sc.match1(b'"') {
                        is_string_in_preprocessor = true;
                    } else if sc.match2(b'/', b'*') {
                        if sc.match_literal(b"/**") || sc.match_literal(b"/*!") {
                            sc.set_state(PREPROCESSOR_COMMENT_DOC | activity_set);
                        } else {
                            sc.set_state(PREPROCESSOR_COMMENT | activity_set);
                        }
                        sc.forward();
                    } else if sc.match2(b'/', b'/') {
                        sc.set_state(DEFAULT | activity_set);
                    }
                }
            }
            PREPROCESSOR_COMMENT | PREPROCESSOR_COMMENT_DOC => {
                if sc.match2(b'*', b'/') {
                    sc.forward();
                    sc.forward_set_state(PREPROCESSOR | activity_set);
                    continue;
                }
            }
            COMMENT => {
                if sc.match2(b'*', b'/') {
                    sc.forward();
                    sc.forward_set_state(DEFAULT | activity_set);
                } else {
                    style_before_task_marker = COMMENT;
                    highlight_task_marker(&mut sc, &marker_list, activity_set, options.case_sensitive);
                }
            }
            COMMENT_DOC => {
                if sc.match2(b'*', b'/') {
                    sc.forward();
                    sc.forward_set_state(DEFAULT | activity_set);
                } else if sc.ch == b'@' || sc.ch == b'\\' {
                    if (is_space_or_tab(sc.ch_prev) || sc.ch_prev == b'*') && !is_space_or_tab(sc.ch_next) {
                        style_before_dc_keyword = COMMENT_DOC;
                        sc.set_state(COMMENT_DOC_KEYWORD | activity_set);
                    }
                }
            }
            COMMENT_LINE => {
                if sc.at_line_start && !continuation_line {
                    sc.set_state(DEFAULT | activity_set);
                } else {
                    style_before_task_marker = COMMENT_LINE;
                    highlight_task_marker(&mut sc, &marker_list, activity_set, options.case_sensitive);
                }
            }
            COMMENT_LINE_DOC => {
                if sc.at_line_start && !continuation_line {
                    sc.set_state(DEFAULT | activity_set);
                } else if sc.ch == b'@' || sc.ch == b'\\' {
                    if (is_space_or_tab(sc.ch_prev) || sc.ch_prev == b'/' || sc.ch_prev == b'!') && !is_space_or_tab(sc.ch_next) {
                        style_before_dc_keyword = COMMENT_LINE_DOC;
                        sc.set_state(COMMENT_DOC_KEYWORD | activity_set);
                    }
                }
            }
            COMMENT_DOC_KEYWORD => {
                if style_before_dc_keyword == COMMENT_DOC && sc.match2(b'*', b'/') {
                    sc.change_state(COMMENT_DOC_KEYWORD_ERROR);
                    sc.forward();
                    sc.forward_set_state(DEFAULT | activity_set);
                    seen_doc_key_brace = false;
                } else if sc.ch == b'[' || sc.ch == b'{' {
                    seen_doc_key_brace = true;
                } else if !set_doxygen.contains(sc.ch) && !(seen_doc_key_brace && (sc.ch == b',' || sc.ch == b'.')) {
                    let bytes = if options.case_sensitive { sc.current_bytes() } else { sc.current_lowered() };
                    let s = String::from_utf8_lossy(&bytes).into_owned();
                    let tail = if s.len() > 1 { &s[1..] } else { "" };
                    if !(is_space_or_tab(sc.ch) || sc.ch == 0) {
                        sc.change_state(COMMENT_DOC_KEYWORD_ERROR | activity_set);
                    } else if !keywords3.in_list(tail) {
                        sc.change_state(COMMENT_DOC_KEYWORD_ERROR | activity_set);
                    }
                    sc.set_state(style_before_dc_keyword | activity_set);
                    seen_doc_key_brace = false;
                }
            }
            STRING => {
                if sc.at_line_end {
                    sc.change_state(STRING_EOL | activity_set);
                } else if is_include_preprocessor {
                    if sc.ch == b'>' {
                        sc.forward_set_state(DEFAULT | activity_set);
                        is_include_preprocessor = false;
                    }
                } else if sc.ch == b'\\' {
                    if options.escape_sequence {
                        sc.set_state(ESCAPE_SEQUENCE | activity_set);
                    }
                    sc.forward();
                } else if sc.ch == b'"' {
                    if sc.ch_next == b'_' {
                        sc.change_state(USER_LITERAL | activity_set);
                    } else {
                        sc.forward_set_state(DEFAULT | activity_set);
                    }
                }
            }
            ESCAPE_SEQUENCE => {
                if sc.ch == b'"' {
                    sc.set_state(STRING | activity_set);
                    sc.forward_set_state(DEFAULT | activity_set);
                } else if sc.ch == b'\\' {
                    sc.forward();
                } else {
                    sc.set_state(STRING | activity_set);
                    if sc.at_line_end {
                        sc.change_state(STRING_EOL | activity_set);
                    }
                }
            }
            HASH_QUOTED_STRING => {
                if sc.ch == b'\\' {
                    if matches!(sc.ch_next, b'"' | b'\'' | b'\\') {
                        sc.forward();
                    }
                } else if sc.ch == b'"' {
                    sc.forward_set_state(DEFAULT | activity_set);
                }
            }
            STRING_RAW => {
                if sc.match_literal(raw_string_terminator.as_bytes()) {
                    for _ in 0..raw_string_terminator.len() {
                        sc.forward();
                    }
                    sc.set_state(DEFAULT | activity_set);
                    raw_string_terminator.clear();
                }
            }
            CHARACTER => {
                if sc.at_line_end {
                    sc.change_state(STRING_EOL | activity_set);
                } else if sc.ch == b'\\' {
                    if matches!(sc.ch_next, b'"' | b'\'' | b'\\') {
                        sc.forward();
                    }
                } else if sc.ch == b'\'' {
                    if sc.ch_next == b'_' {
                        sc.change_state(USER_LITERAL | activity_set);
                    } else {
                        sc.forward_set_state(DEFAULT | activity_set);
                    }
                }
            }
            REGEX => {
                if sc.at_line_start {
                    sc.set_state(DEFAULT | activity_set);
                } else if !in_re_range && sc.ch == b'/' {
                    sc.forward();
                    while sc.ch < 0x80 && sc.ch.is_ascii_lowercase() {
                        sc.forward();
                    }
                    sc.set_state(DEFAULT | activity_set);
                } else if sc.ch == b'\\' && sc.current_pos + 1 < line_end_next {
                    sc.forward();
                } else if sc.ch == b'[' {
                    in_re_range = true;
                } else if sc.ch == b']' {
                    in_re_range = false;
                }
            }
            STRING_EOL => {
                if sc.at_line_start {
                    sc.set_state(DEFAULT | activity_set);
                }
            }
            VERBATIM => {
                if options.verbatim_strings_allow_escapes && sc.ch == b'\\' {
                    sc.forward();
                } else if sc.ch == b'"' {
                    if sc.ch_next == b'"' {
                        sc.forward();
                    } else {
                        sc.forward_set_state(DEFAULT | activity_set);
                    }
                }
            }
            TRIPLE_VERBATIM => {
                if sc.match_literal(b"\"\"\"") {
                    while sc.match1(b'"') {
                        sc.forward();
                    }
                    sc.set_state(DEFAULT | activity_set);
                }
            }
            UUID => {
                if sc.at_line_end || sc.ch == b')' {
                    sc.set_state(DEFAULT | activity_set);
                }
            }
            TASK_MARKER => {
                if is_operator(sc.ch) || is_space_or_tab(sc.ch) {
                    sc.set_state(style_before_task_marker | activity_set);
                    style_before_task_marker = DEFAULT;
                }
            }
            _ => {}
        }

        if sc.at_line_end && !at_line_end_before_switch {
            line_current += 1;
            line_end_next = sc.document().line_end(line_current);
            state.pp_states.add(line_current, preproc);
        }

        if mask_active(sc.state) == DEFAULT {
            if sc.match2(b'@', b'"') {
                sc.set_state(VERBATIM | activity_set);
                sc.forward();
            } else if options.triplequoted_strings && sc.match_literal(b"\"\"\"") {
                sc.set_state(TRIPLE_VERBATIM | activity_set);
                sc.forward_bytes(2);
            } else if options.hashquoted_strings && sc.match2(b'#', b'"') {
                sc.set_state(HASH_QUOTED_STRING | activity_set);
                sc.forward();
            } else if options.back_quoted_strings && sc.match1(b'`') {
                sc.set_state(STRING_RAW | activity_set);
                raw_string_terminator = "`".to_string();
            } else if is_digit(sc.ch) || (sc.ch == b'.' && is_digit(sc.ch_next)) {
                if last_word_was_uuid {
                    sc.set_state(UUID | activity_set);
                    last_word_was_uuid = false;
                } else {
                    sc.set_state(NUMBER | activity_set);
                }
            } else if !sc.at_line_end && (set_word_start.contains(sc.ch) || sc.ch == b'@') {
                if last_word_was_uuid {
                    sc.set_state(UUID | activity_set);
                    last_word_was_uuid = false;
                } else {
                    sc.set_state(IDENTIFIER | activity_set);
                }
            } else if sc.match2(b'/', b'*') {
                if sc.match_literal(b"/**") || sc.match_literal(b"/*!") {
                    sc.set_state(COMMENT_DOC | activity_set);
                } else {
                    sc.set_state(COMMENT | activity_set);
                }
                sc.forward();
            } else if sc.match2(b'/', b'/') {
                if (sc.match_literal(b"///") && !sc.match_literal(b"////")) || sc.match_literal(b"//!") {
                    sc.set_state(COMMENT_LINE_DOC | activity_set);
                } else {
                    sc.set_state(COMMENT_LINE | activity_set);
                }
            } else if sc.ch == b'/'
                && (SET_OK_BEFORE_RE.contains(&ch_prev_non_white) || follows_return_keyword(sc.document(), sc.current_pos))
                && (!SET_COULD_BE_POST_OP.contains(&ch_prev_non_white) || !follows_postfix_operator(sc.document(), sc.current_pos))
            {
                sc.set_state(REGEX | activity_set);
                in_re_range = false;
            } else if sc.ch == b'"' {
                if sc.ch_prev == b'R' && mask_active(sc.document().style_at(sc.current_pos.saturating_sub(1))) == STRING_RAW {
                    sc.set_state(STRING_RAW | activity_set);
                    let mut term = String::from(")");
                    let mut term_pos = sc.current_pos + 1;
                    loop {
                        let c = sc.document().char_at(term_pos);
                        if c == b'(' || term_pos >= sc.document().len() {
                            break;
                        }
                        term.push(c as char);
                        term_pos += 1;
                    }
                    term.push('"');
                    raw_string_terminator = term;
                } else {
                    sc.set_state(STRING | activity_set);
                }
                is_include_preprocessor = false;
            } else if is_include_preprocessor && sc.ch == b'<' {
                sc.set_state(STRING | activity_set);
            } else if sc.ch == b'\'' {
                sc.set_state(CHARACTER | activity_set);
            } else if sc.ch == b'#' && visible_chars == 0 {
                sc.set_state(PREPROCESSOR | activity_set);
                loop {
                    sc.forward();
                    if !((sc.ch == b' ' || sc.ch == b'\t') && sc.more()) {
                        break;
                    }
                }
                if sc.at_line_end {
                    sc.set_state(DEFAULT | activity_set);
                } else if sc.match_literal(b"include") {
                    is_include_preprocessor = true;
                } else if options.track_preprocessor {
                    handle_directive(
                        &mut sc,
                        &mut preproc,
                        &mut activity_set,
                        &mut preprocessor_definitions,
                        &mut state.define_history,
                        line_current,
                        options,
                        &mut definitions_changed,
                    );
                }
            } else if is_operator(sc.ch) {
                sc.set_state(OPERATOR | activity_set);
            }
        }

        if !is_space_or_tab(sc.ch) && sc.ch != b'\n' && sc.ch != b'\r' && !is_space_equiv(mask_active(sc.state)) {
            ch_prev_non_white = sc.ch;
            visible_chars += 1;
        }
        continuation_line = false;
        sc.forward();
    }

    if !raw_string_terminator.is_empty() {
        state.raw_string_terminators.insert(line_current, raw_string_terminator.clone());
    }
    sc.complete();

    LexOutcome { definitions_changed }
}

#[allow(clippy::too_many_arguments)]
fn handle_directive<D: Document + ?Sized>(
    sc: &mut StyleContext<D>,
    preproc: &mut LinePPState,
    activity_set: &mut u8,
    preprocessor_definitions: &mut SymbolTable,
    define_history: &mut Vec<PPDefinition>,
    line_current: usize,
    options: &CppOptions,
    definitions_changed: &mut bool,
) {
    if sc.match_literal(b"ifdef") || sc.match_literal(b"ifndef") {
        let is_if_def = sc.match_literal(b"ifdef");
        let skip = if is_if_def { 5 } else { 6 };
        let rest = rest_of_line(sc.document(), sc.current_pos + skip + 1, false);
        let found = preprocessor_definitions.contains(rest.trim());
        preproc.start_section(is_if_def == found);
    } else if sc.match_literal(b"if") && !sc.match_literal(b"ifdef") && !sc.match_literal(b"ifndef") {
        let rest = rest_of_line(sc.document(), sc.current_pos + 2, true);
        let good = evaluate_expression(&rest, preprocessor_definitions);
        preproc.start_section(good);
    } else if sc.match_literal(b"else") {
        if !preproc.current_if_taken() {
            preproc.invert_current_level();
            *activity_set = if preproc.is_inactive() { ACTIVE_FLAG } else { 0 };
            if *activity_set == 0 {
                sc.change_state(style::PREPROCESSOR | *activity_set);
            }
        } else if !preproc.is_inactive() {
            preproc.invert_current_level();
            *activity_set = if preproc.is_inactive() { ACTIVE_FLAG } else { 0 };
            if *activity_set == 0 {
                sc.change_state(style::PREPROCESSOR | *activity_set);
            }
        }
    } else if sc.match_literal(b"elif") {
        if !preproc.current_if_taken() {
            let rest = rest_of_line(sc.document(), sc.current_pos + 2, true);
            let good = evaluate_expression(&rest, preprocessor_definitions);
            if good {
                preproc.invert_current_level();
                *activity_set = if preproc.is_inactive() { ACTIVE_FLAG } else { 0 };
                if *activity_set == 0 {
                    sc.change_state(style::PREPROCESSOR | *activity_set);
                }
            }
        } else if !preproc.is_inactive() {
            preproc.invert_current_level();
            *activity_set = if preproc.is_inactive() { ACTIVE_FLAG } else { 0 };
            if *activity_set == 0 {
                sc.change_state(style::PREPROCESSOR | *activity_set);
            }
        }
    } else if sc.match_literal(b"endif") {
        preproc.end_section();
        *activity_set = if preproc.is_inactive() { ACTIVE_FLAG } else { 0 };
        sc.change_state(style::PREPROCESSOR | *activity_set);
    } else if sc.match_literal(b"define") {
        if options.update_preprocessor && !preproc.is_inactive() {
            let rest = rest_of_line(sc.document(), sc.current_pos + 6, true);
            let rest_bytes = rest.as_bytes();
            let mut start_name = 0;
            while start_name < rest_bytes.len() && is_space_or_tab(rest_bytes[start_name]) {
                start_name += 1;
            }
            let mut end_name = start_name;
            let set_word = CharSet::new(Seed::AlphaNum, "._", true);
            while end_name < rest_bytes.len() && set_word.contains(rest_bytes[end_name]) {
                end_name += 1;
            }
            let key = rest[start_name..end_name].to_string();
            if end_name < rest_bytes.len() && rest_bytes[end_name] == b'(' {
                let mut end_args = end_name;
                while end_args < rest_bytes.len() && rest_bytes[end_args] != b')' {
                    end_args += 1;
                }
                let args_str = &rest[end_name + 1..end_args.min(rest.len())];
                let arguments: Vec<String> = if args_str.trim().is_empty() {
                    Vec::new()
                } else {
                    args_str.split(',').map(|s| s.trim().to_string()).collect()
                };
                let mut start_value = end_args + 1;
                while start_value < rest_bytes.len() && is_space_or_tab(rest_bytes[start_value]) {
                    start_value += 1;
                }
                let value = if start_value < rest.len() { rest[start_value..].to_string() } else { String::new() };
                preprocessor_definitions.define(key.clone(), MacroDef::function_like(value.clone(), arguments.clone()));
                define_history.push(PPDefinition::define(line_current, key, value, arguments));
                *definitions_changed = true;
            } else {
                let mut start_value = end_name;
                while start_value < rest_bytes.len() && is_space_or_tab(rest_bytes[start_value]) {
                    start_value += 1;
                }
                let value = if start_value < rest.len() { rest[start_value..].to_string() } else { String::new() };
                preprocessor_definitions.define(key.clone(), MacroDef::value(value.clone()));
                define_history.push(PPDefinition::define(line_current, key, value, Vec::new()));
                *definitions_changed = true;
            }
        }
    } else if sc.match_literal(b"undef") {
        if options.update_preprocessor && !preproc.is_inactive() {
            let rest = rest_of_line(sc.document(), sc.current_pos + 5, false);
            let tokens = lexi_pp::tokenize(&rest);
            if let Some(key) = tokens.into_iter().find(|t| !t.trim().is_empty()) {
                preprocessor_definitions.undef(&key);
                define_history.push(PPDefinition::undef(line_current, key));
                *definitions_changed = true;
            }
        }
    }
}
