//! Property tests: the interner's index guarantees, scanner totality over
//! arbitrary input, and parse-tree id numbering over generated
//! expressions.

use proptest::prelude::*;

use lemma::{calc, ParseNode, StringTable};

proptest! {
    #[test]
    fn interner_roundtrips_any_string(s in ".*") {
        let mut table = StringTable::new();
        let idx = table.push(&s);
        prop_assert_eq!(table.get(idx), s.as_str());
    }

    #[test]
    fn interner_is_idempotent(s in ".*") {
        let mut table = StringTable::new();
        prop_assert_eq!(table.push(&s), table.push(&s));
    }

    #[test]
    fn interner_distinguishes_distinct_strings(a in ".*", b in ".*") {
        prop_assume!(a != b);
        let mut table = StringTable::new();
        prop_assert_ne!(table.push(&a), table.push(&b));
    }

    /// The scanner and driver never panic: any input either parses or
    /// reports a fatal error.
    #[test]
    fn parse_is_total(input in ".{0,64}") {
        let _ = calc::parse(&input);
    }

    /// Well-formed expressions always parse, and the resulting ids are a
    /// contiguous pre-order numbering from 0.
    #[test]
    fn generated_expressions_parse_with_preorder_ids(expr in arb_expr()) {
        let tree = calc::parse(&expr).unwrap();
        let mut ids = Vec::new();
        collect_ids(&tree, &mut ids);
        let expected: Vec<i64> = (0..ids.len() as i64).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Parsing is a pure function of the token stream: re-parsing yields a
    /// structurally equal tree.
    #[test]
    fn reparsing_is_deterministic(expr in arb_expr()) {
        let a = calc::parse(&expr).unwrap();
        let b = calc::parse(&expr).unwrap();
        prop_assert_eq!(a, b);
    }
}

fn collect_ids(node: &ParseNode, out: &mut Vec<i64>) {
    out.push(node.id);
    for child in node {
        collect_ids(child, out);
    }
}

/// Random well-formed arithmetic over `+`, `*`, parentheses, and numbers.
fn arb_expr() -> impl Strategy<Value = String> {
    let leaf = proptest::num::u32::ANY.prop_map(|n| (n % 1000).to_string());
    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} + {}", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} * {}", a, b)),
            inner.prop_map(|a| format!("({})", a)),
        ]
    })
}
