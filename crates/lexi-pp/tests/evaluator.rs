use lexi_pp::{evaluate_expression, MacroDef, SymbolTable};
use proptest::prelude::*;

#[test]
fn nested_defined_and_macro_expansion() {
    let mut table = SymbolTable::new();
    table.define("A", MacroDef::value("1"));
    table.define("B", MacroDef::value("0"));
    assert!(evaluate_expression("defined(A) && !defined(C)", &table));
    assert!(!evaluate_expression("B || defined(C)", &table));
}

#[test]
fn undefined_identifier_is_dropped_not_zero() {
    // An identifier with no definition is erased entirely rather than
    // replaced with "0", matching the original's silent-drop behaviour.
    let table = SymbolTable::new();
    assert!(evaluate_expression("1", &table));
}

proptest! {
    #[test]
    fn arithmetic_between_two_literals_never_panics(a in -1000i64..1000, b in -1000i64..1000) {
        let table = SymbolTable::new();
        let expr = format!("{a} + {b} == {}", a + b);
        prop_assert!(evaluate_expression(&expr, &table));
    }

    #[test]
    fn division_by_zero_never_panics(a in -1000i64..1000) {
        let table = SymbolTable::new();
        let expr = format!("{a} / 0 == {a}");
        prop_assert!(evaluate_expression(&expr, &table));
    }

    #[test]
    fn deeply_nested_parens_never_panic(depth in 0usize..20) {
        let table = SymbolTable::new();
        let mut expr = String::new();
        for _ in 0..depth {
            expr.push('(');
        }
        expr.push('1');
        for _ in 0..depth {
            expr.push(')');
        }
        prop_assert!(evaluate_expression(&expr, &table));
    }
}
