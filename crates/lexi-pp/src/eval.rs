//! The `#if`/`#elif` expression evaluator (spec.md §3, "Expression
//! evaluator").
//!
//! Ported from `LexCPP.cxx`'s `Tokenize`/`EvaluateTokens`/`EvaluateExpression`,
//! including its left-to-right-within-a-class, arithmetic-then-relative-then-
//! logical precedence order. That order gives `*` no tighter binding than `+`
//! and is flagged in the source as possibly unintended; it is preserved here
//! bit-for-bit rather than "fixed" (spec.md §9).

use crate::macros::SymbolTable;

fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$' || c >= 0x80
}

fn is_word(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'.' || c >= 0x80
}

fn is_space_or_tab(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_rel_op(c: u8) -> bool {
    matches!(c, b'=' | b'!' | b'<' | b'>')
}

fn is_logical_op(c: u8) -> bool {
    matches!(c, b'|' | b'&')
}

fn is_arithmetic_op(c: u8) -> bool {
    matches!(c, b'+' | b'-' | b'/' | b'*' | b'%')
}

fn only_space_or_tab(tok: &str) -> bool {
    !tok.is_empty() && tok.bytes().all(is_space_or_tab)
}

/// Split an expression's rest-of-line into the same token classes the
/// original tokenizer recognizes: identifiers/numbers, runs of whitespace,
/// one- or two-character relational/logical operators, and single
/// punctuation characters.
pub fn tokenize(expr: &str) -> Vec<String> {
    let bytes = expr.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if is_word(c) {
            let start = i;
            while i < bytes.len() && is_word(bytes[i]) {
                i += 1;
            }
            tokens.push(String::from_utf8_lossy(&bytes[start..i]).into_owned());
        } else if is_space_or_tab(c) {
            let start = i;
            while i < bytes.len() && is_space_or_tab(bytes[i]) {
                i += 1;
            }
            tokens.push(String::from_utf8_lossy(&bytes[start..i]).into_owned());
        } else if is_rel_op(c) {
            let start = i;
            i += 1;
            if i < bytes.len() && is_rel_op(bytes[i]) {
                i += 1;
            }
            tokens.push(String::from_utf8_lossy(&bytes[start..i]).into_owned());
        } else if is_logical_op(c) {
            let start = i;
            i += 1;
            if i < bytes.len() && is_logical_op(bytes[i]) {
                i += 1;
            }
            tokens.push(String::from_utf8_lossy(&bytes[start..i]).into_owned());
        } else {
            tokens.push((c as char).to_string());
            i += 1;
        }
    }
    tokens
}

fn atoi(s: &str) -> i64 {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut neg = false;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        neg = bytes[i] == b'-';
        i += 1;
    }
    let mut value: i64 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value * 10 + (bytes[i] - b'0') as i64;
        i += 1;
    }
    if neg {
        -value
    } else {
        value
    }
}

/// Position of the first top-level `(...)` pair, if any.
fn find_bracket_pair(tokens: &[String]) -> Option<(usize, usize)> {
    let open = tokens.iter().position(|t| t == "(")?;
    let mut nest = 0usize;
    for (idx, tok) in tokens.iter().enumerate().skip(open) {
        if tok == "(" {
            nest += 1;
        } else if tok == ")" {
            nest -= 1;
            if nest == 0 {
                return Some((open, idx));
            }
        }
    }
    None
}

const MAX_MACRO_ITERATIONS: usize = 100;

/// Recursively reduce `tokens` to a single numeric result token in place,
/// mutating `tokens` the way the original does.
pub fn evaluate_tokens(tokens: &mut Vec<String>, table: &SymbolTable) {
    tokens.retain(|t| !only_space_or_tab(t));

    // defined X / defined(X) -> "1" / "0"
    let mut i = 0;
    while i + 1 < tokens.len() {
        if tokens[i] == "defined" {
            let mut val = "0";
            if tokens[i + 1] == "(" {
                if i + 2 < tokens.len() && tokens[i + 2] == ")" {
                    tokens.drain(i + 1..i + 3);
                } else if i + 3 < tokens.len() && tokens[i + 3] == ")" {
                    if table.contains(&tokens[i + 2]) {
                        val = "1";
                    }
                    tokens.drain(i + 1..i + 4);
                } else {
                    tokens.drain(i + 1..i + 2);
                }
            } else {
                if table.contains(&tokens[i + 1]) {
                    val = "1";
                }
            }
            tokens[i] = val.to_string();
        } else {
            i += 1;
        }
    }

    // Identifier expansion, capped against self-referential macros.
    let mut iterations = 0;
    let mut i = 0;
    while i < tokens.len() && iterations < MAX_MACRO_ITERATIONS {
        iterations += 1;
        let first_byte = tokens[i].as_bytes().first().copied().unwrap_or(0);
        if is_word_start(first_byte) {
            if let Some(def) = table.get(&tokens[i]) {
                let mut macro_tokens = tokenize(&def.value);
                if def.is_function_like() {
                    if i + 1 < tokens.len() && tokens[i + 1] == "(" {
                        let mut arguments = std::collections::HashMap::new();
                        let mut arg = 0usize;
                        let mut tok = i + 2;
                        while tok < tokens.len() && arg < def.arguments.len() && tokens[tok] != ")" {
                            if tokens[tok] != "," {
                                arguments.insert(def.arguments[arg].clone(), tokens[tok].clone());
                                arg += 1;
                            }
                            tok += 1;
                        }
                        tokens.drain(i..=tok.min(tokens.len() - 1));
                        macro_tokens.retain(|t| !only_space_or_tab(t));
                        for mt in macro_tokens.iter_mut() {
                            let b = mt.as_bytes().first().copied().unwrap_or(0);
                            if is_word_start(b) {
                                if let Some(replacement) = arguments.get(mt) {
                                    *mt = replacement.clone();
                                }
                            }
                        }
                        let rest = tokens.split_off(i);
                        tokens.extend(macro_tokens);
                        tokens.extend(rest);
                    } else {
                        i += 1;
                    }
                } else {
                    tokens.remove(i);
                    let rest = tokens.split_off(i);
                    tokens.extend(macro_tokens.drain(..));
                    tokens.extend(rest);
                }
            } else {
                tokens.remove(i);
            }
        } else {
            i += 1;
        }
    }

    // Bracketed sub-expressions, recursively reduced to one token.
    while let Some((open, close)) = find_bracket_pair(tokens) {
        let mut inner: Vec<String> = tokens[open + 1..close].to_vec();
        evaluate_tokens(&mut inner, table);
        tokens.splice(open..=close, inner);
        if let Some((open2, close2)) = find_bracket_pair(tokens) {
            tokens.drain(open2..=close2);
        }
    }

    // Logical negation.
    let mut j = 0;
    while j + 1 < tokens.len() {
        if tokens[j].as_bytes().first() == Some(&b'!') {
            let mut is_true = atoi(&tokens[j + 1]) != 0;
            if tokens[j] == "!" {
                is_true = !is_true;
            }
            tokens.splice(j..j + 2, [if is_true { "1".to_string() } else { "0".to_string() }]);
        } else {
            j += 1;
        }
    }

    // Arithmetic -> relative -> logical, left-to-right within each class.
    for class in 0..3u8 {
        let mut k = 0;
        while k + 2 < tokens.len() {
            let op_byte = tokens[k + 1].as_bytes().first().copied().unwrap_or(0);
            let applies = match class {
                0 => is_arithmetic_op(op_byte),
                1 => is_rel_op(op_byte),
                _ => is_logical_op(op_byte),
            };
            if applies {
                let a = atoi(&tokens[k]);
                let b = atoi(&tokens[k + 2]);
                let op = tokens[k + 1].as_str();
                let result = match op {
                    "+" => a + b,
                    "-" => a - b,
                    "*" => a * b,
                    "/" => a / if b == 0 { 1 } else { b },
                    "%" => a % if b == 0 { 1 } else { b },
                    "<" => (a < b) as i64,
                    "<=" => (a <= b) as i64,
                    ">" => (a > b) as i64,
                    ">=" => (a >= b) as i64,
                    "==" => (a == b) as i64,
                    "!=" => (a != b) as i64,
                    "||" => (a != 0 || b != 0) as i64,
                    "&&" => (a != 0 && b != 0) as i64,
                    _ => 0,
                };
                tokens.splice(k..k + 3, [result.to_string()]);
            } else {
                k += 1;
            }
        }
    }
}

/// Tokenize, evaluate, and reduce `expr` to a boolean. `""` and `"0"` mean
/// false.
pub fn evaluate_expression(expr: &str, table: &SymbolTable) -> bool {
    let mut tokens = tokenize(expr);
    evaluate_tokens(&mut tokens, table);
    let is_false = tokens.is_empty() || (tokens.len() == 1 && (tokens[0].is_empty() || tokens[0] == "0"));
    !is_false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros::MacroDef;

    #[test]
    fn literal_numbers() {
        let table = SymbolTable::new();
        assert!(evaluate_expression("1", &table));
        assert!(!evaluate_expression("0", &table));
        assert!(!evaluate_expression("", &table));
    }

    #[test]
    fn defined_substitution() {
        let mut table = SymbolTable::new();
        table.define("FOO", MacroDef::value("1"));
        assert!(evaluate_expression("defined FOO", &table));
        assert!(evaluate_expression("defined(FOO)", &table));
        assert!(!evaluate_expression("defined(BAR)", &table));
        assert!(!evaluate_expression("defined()", &table));
    }

    #[test]
    fn macro_value_expansion() {
        let mut table = SymbolTable::new();
        table.define("VERSION", MacroDef::value("3"));
        assert!(evaluate_expression("VERSION > 2", &table));
        assert!(!evaluate_expression("VERSION > 5", &table));
    }

    #[test]
    fn bracketed_subexpression() {
        let table = SymbolTable::new();
        assert!(evaluate_expression("(1 || 0) && 1", &table));
    }

    #[test]
    fn negation() {
        let table = SymbolTable::new();
        assert!(evaluate_expression("!0", &table));
        assert!(!evaluate_expression("!1", &table));
    }

    #[test]
    fn function_like_macro_argument_substitution() {
        let mut table = SymbolTable::new();
        table.define("ADD", MacroDef::function_like("a + b", vec!["a".into(), "b".into()]));
        assert!(evaluate_expression("ADD(2,3) == 5", &table));
    }

    #[test]
    fn precedence_order_matches_the_flagged_quirk() {
        // Arithmetic reduces before relative, so "1 + 1 == 2" reduces
        // "1 + 1" to "2" first, then "2 == 2" to true -- same as proper
        // precedence here, but "2 == 2 - 1" shows the quirk: relative
        // class never gets a chance to run on "2 == 2" because arithmetic
        // eagerly consumes "2 - 1" first, left-to-right within its class.
        let table = SymbolTable::new();
        assert!(!evaluate_expression("2 == 2 - 1", &table));
    }

    #[test]
    fn division_by_zero_uses_divisor_one() {
        let table = SymbolTable::new();
        assert!(evaluate_expression("4 / 0 == 4", &table));
    }
}
