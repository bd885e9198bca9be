use lexi_cpp::{style, CppLexer};
use lexi_doc::{Document, MemoryDocument};
use lexi_engine::Lexer;

fn lex(src: &str, keywords: &[&str]) -> MemoryDocument {
    let mut lexer = CppLexer::new();
    if !keywords.is_empty() {
        lexer.word_list_set(0, &keywords.join(" "));
    }
    let mut doc = MemoryDocument::from_str(src);
    lexer.lex(&mut doc, 0, doc.len(), 0);
    doc
}

#[test]
fn inactive_preprocessor_branch_is_greyed_out() {
    let doc = lex("#if 0\nint x;\n#else\nint y;\n#endif\n", &["int"]);
    let greyed_pos = doc.bytes().iter().position(|&b| b == b'x').unwrap();
    let live_pos = doc.bytes().iter().position(|&b| b == b'y').unwrap();
    assert_ne!(doc.style_at(greyed_pos) & style::ACTIVE_FLAG, 0);
    assert_eq!(doc.style_at(live_pos) & style::ACTIVE_FLAG, 0);
}

#[test]
fn doc_comment_keyword_is_highlighted() {
    let doc = lex("/** @brief does a thing */\nint f();\n", &["int"]);
    let at_pos = doc.bytes().iter().position(|&b| b == b'@').unwrap();
    assert_eq!(style::mask_active(doc.style_at(at_pos)), style::COMMENT_DOC_KEYWORD);
}

#[test]
fn task_marker_is_highlighted_inside_line_comment() {
    let mut lexer = CppLexer::new();
    lexer.word_list_set(5, "TODO FIXME");
    let mut doc = MemoryDocument::from_str("// TODO: fix this\n");
    lexer.lex(&mut doc, 0, doc.len(), 0);
    let todo_pos = doc.bytes().iter().position(|&b| b == b'T').unwrap();
    assert_eq!(style::mask_active(doc.style_at(todo_pos)), style::TASK_MARKER);
}

#[test]
fn escape_sequence_is_highlighted_when_enabled() {
    let mut lexer = CppLexer::new();
    lexer.property_set("lexer.cpp.escape.sequence", "1");
    let mut doc = MemoryDocument::from_str("\"a\\nb\"\n");
    lexer.lex(&mut doc, 0, doc.len(), 0);
    let backslash_pos = doc.bytes().iter().position(|&b| b == b'\\').unwrap();
    assert_eq!(style::mask_active(doc.style_at(backslash_pos)), style::ESCAPE_SEQUENCE);
}

#[test]
fn raw_string_terminator_is_honoured_across_parens() {
    let doc = lex("R\"marker(hello (nested) world)marker\"\n", &[]);
    let inner_paren = doc.bytes().iter().position(|&b| b == b'(').unwrap() + 1;
    assert_eq!(style::mask_active(doc.style_at(inner_paren)), style::STRING_RAW);
}

#[test]
fn define_then_conditional_uses_the_new_macro() {
    let doc = lex("#define FEATURE 1\n#if FEATURE\nint on;\n#else\nint off;\n#endif\n", &["int"]);
    let on_idx = String::from_utf8_lossy(doc.bytes()).find("on;").unwrap();
    assert_eq!(doc.style_at(on_idx) & style::ACTIVE_FLAG, 0);
}

#[test]
fn regex_heuristic_fires_after_return_keyword() {
    let doc = lex("function f() {\n  return /foo/;\n}\n", &["return"]);
    let slash_idx = String::from_utf8_lossy(doc.bytes()).find("/foo/").unwrap();
    assert_eq!(style::mask_active(doc.style_at(slash_idx)), style::REGEX);
}

#[test]
fn division_after_identifier_is_not_a_regex() {
    let doc = lex("x = a / b;\n", &[]);
    let slash_idx = doc.bytes().iter().rposition(|&b| b == b'/').unwrap();
    assert_ne!(style::mask_active(doc.style_at(slash_idx)), style::REGEX);
}
