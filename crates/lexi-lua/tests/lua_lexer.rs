use lexi_doc::{Document, MemoryDocument};
use lexi_engine::Lexer;
use lexi_lua::{style, LuaLexer};

fn lex(src: &str, keywords: &str) -> MemoryDocument {
    let mut lexer = LuaLexer::new();
    if !keywords.is_empty() {
        lexer.word_list_set(0, keywords);
    }
    let mut doc = MemoryDocument::from_str(src);
    lexer.lex(&mut doc, 0, doc.len(), 0);
    doc
}

#[test]
fn block_comment_with_equals_delimiter_is_not_closed_by_mismatched_brackets() {
    let doc = lex("--[==[\nnot ]] closed yet\n]==]\n", "");
    let inner_idx = String::from_utf8_lossy(doc.bytes()).find("not").unwrap();
    assert_eq!(doc.style_at(inner_idx), style::COMMENT);
}

#[test]
fn doc_comment_marker_carries_across_consecutive_lines() {
    let doc = lex("--- first\n--- second\n", "");
    let second_idx = String::from_utf8_lossy(doc.bytes()).find("second").unwrap();
    assert_eq!(doc.style_at(second_idx), style::COMMENT_DOC);
}

#[test]
fn backslash_z_escape_eats_following_whitespace_in_string() {
    let doc = lex("\"a\\z\n   b\"\n", "");
    let b_idx = String::from_utf8_lossy(doc.bytes()).find('b').unwrap();
    assert_eq!(doc.style_at(b_idx), style::STRING);
}

#[test]
fn unterminated_string_is_flagged_as_eol_error() {
    let doc = lex("\"unterminated\n", "");
    let nl_idx = doc.bytes().iter().position(|&b| b == b'\n').unwrap() - 1;
    assert_eq!(doc.style_at(nl_idx), style::STRING_EOL);
}

#[test]
fn dotted_identifier_keeps_longest_keyword_match() {
    let doc = lex("table.insert(t, 1)\n", "");
    let insert_idx = String::from_utf8_lossy(doc.bytes()).find("insert").unwrap();
    assert_eq!(doc.style_at(insert_idx), style::IDENTIFIER);
}

#[test]
fn hex_number_with_exponent_sign_is_one_token() {
    let doc = lex("local x = 0x1p-4\n", "local");
    let p_idx = String::from_utf8_lossy(doc.bytes()).find("0x1p").unwrap();
    assert_eq!(doc.style_at(p_idx), style::NUMBER);
    assert_eq!(doc.style_at(p_idx + 5), style::NUMBER); // trailing '4' after the exponent sign
}
