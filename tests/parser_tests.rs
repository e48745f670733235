//! End-to-end lexing and parsing of grammar text.

use morfix::errors::{ErrorCategory, ErrorKind, MorfixError, SourceContext};
use morfix::grammar::{ConditionTest, Grammar, Operand, Rewrite, RuleElement};
use morfix::syntax::parser::parse_grammar;

fn parse(src: &str) -> Grammar {
    parse_grammar(&SourceContext::from_file("test.mgr", src)).expect("grammar should parse")
}

fn parse_err(src: &str) -> MorfixError {
    parse_grammar(&SourceContext::from_file("test.mgr", src)).expect_err("grammar should not parse")
}

#[test]
fn suffix_set_with_descriptions() {
    let grammar = parse(r#"SUFFIX case: "case endings" { ni: "accusative", ga: "dative" }"#);

    let set = grammar.suffix_set("case").unwrap();
    assert_eq!(set.name, "case");
    assert_eq!(set.description, "case endings");
    assert_eq!(set.suffixes.len(), 2);
    assert_eq!(set.suffixes["ni"].description, "accusative");
    assert!(set.suffixes["ni"].condition.is_none());
}

#[test]
fn set_description_is_optional() {
    let grammar = parse(r#"SUFFIX s { a: "x" }"#);
    assert_eq!(grammar.suffix_set("s").unwrap().description, "");
}

#[test]
fn all_condition_forms() {
    let grammar = parse(
        r#"
        SUFFIX s: "set" {
            a: "one" WHEN ENDSWITH [xy],
            b: "two" WHEN STARTSWITH /ab/,
            c: "three" WHEN ISVOWEL CUT 1,
            d: "four" WHEN ENDSWITH /q/ REPLACE "g",
            e: "five" WHEN CUT 2
        }
        "#,
    );

    let set = grammar.suffix_set("s").unwrap();
    assert_eq!(
        set.suffixes["a"].condition.test,
        ConditionTest::EndsWith(Operand::Chars(vec!['x', 'y']))
    );
    assert_eq!(set.suffixes["a"].condition.rewrite, Rewrite::Keep);
    assert_eq!(
        set.suffixes["b"].condition.test,
        ConditionTest::StartsWith(Operand::Pattern("ab".to_string()))
    );
    assert_eq!(set.suffixes["c"].condition.test, ConditionTest::IsVowel);
    assert_eq!(set.suffixes["c"].condition.rewrite, Rewrite::Cut(1));
    assert_eq!(
        set.suffixes["d"].condition.test,
        ConditionTest::EndsWith(Operand::Pattern("q".to_string()))
    );
    assert_eq!(
        set.suffixes["d"].condition.rewrite,
        Rewrite::Replace("g".to_string())
    );
    // A bare rewrite has no test at all.
    assert_eq!(set.suffixes["e"].condition.test, ConditionTest::None);
    assert_eq!(set.suffixes["e"].condition.rewrite, Rewrite::Cut(2));
}

#[test]
fn second_rewrite_clause_is_ignored() {
    let grammar = parse(r#"SUFFIX s { a: "x" WHEN ISCONSONANT CUT 2 REPLACE "y" }"#);
    let condition = &grammar.suffix_set("s").unwrap().suffixes["a"].condition;
    assert_eq!(condition.rewrite, Rewrite::Cut(2));
}

#[test]
fn duplicate_suffix_declaration_last_wins() {
    let grammar = parse(r#"SUFFIX case { ni: "first", ni: "second" }"#);
    let set = grammar.suffix_set("case").unwrap();
    assert_eq!(set.suffixes.len(), 1);
    assert_eq!(set.suffixes["ni"].description, "second");
}

#[test]
fn rule_elements_and_alternatives() {
    let grammar = parse(
        r#"
        SUFFIX plural { lar: "pl" }
        SUFFIX case { ni: "acc" }

        RULE noun: "noun chain" {
            ish + [@plural],
            {miz: "we", siz: "you"} + @case
        }
        "#,
    );

    let rules = grammar.rules_named("noun").unwrap();
    assert_eq!(rules.len(), 1);
    let rule = &rules[0];
    assert_eq!(rule.description, "noun chain");
    assert_eq!(rule.alternatives.len(), 2);

    assert_eq!(
        rule.alternatives[0],
        vec![
            RuleElement::Literal("ish".to_string()),
            RuleElement::Optional(Box::new(RuleElement::SuffixSetRef("plural".to_string()))),
        ]
    );
    match &rule.alternatives[1][0] {
        RuleElement::LiteralWithDescription(map) => {
            assert_eq!(map["miz"], "we");
            assert_eq!(map["siz"], "you");
        }
        other => panic!("expected literal map, got {other:?}"),
    }
    assert_eq!(
        rule.alternatives[1][1],
        RuleElement::SuffixSetRef("case".to_string())
    );
}

#[test]
fn same_name_rules_accumulate_with_sequential_ids() {
    let grammar = parse(
        r#"
        SUFFIX case { ni: "acc" }
        RULE noun { @case }
        RULE noun { [@case] }
        "#,
    );

    let rules = grammar.rules_named("noun").unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].id, 1);
    assert_eq!(rules[1].id, 2);
}

#[test]
fn trailing_comma_in_a_rule_block_adds_no_alternative() {
    let grammar = parse(r#"SUFFIX case { ni: "acc" } RULE case { @case, }"#);
    let rule = &grammar.rules_named("case").unwrap()[0];
    assert_eq!(rule.alternatives.len(), 1);
}

#[test]
fn plus_separators_are_optional() {
    let with_plus = parse(r#"SUFFIX c { ni: "a" } RULE r { [@c] + @c }"#);
    let without = parse(r#"SUFFIX c { ni: "a" } RULE r { [@c] @c }"#);
    assert_eq!(
        with_plus.rules_named("r").unwrap()[0].alternatives,
        without.rules_named("r").unwrap()[0].alternatives
    );
}

#[test]
fn top_level_junk_is_fatal() {
    let err = parse_err("kitob");
    assert_eq!(err.kind.category(), ErrorCategory::Parse);
    match err.kind {
        ErrorKind::UnexpectedToken { expected, .. } => assert_eq!(expected, "SUFFIX or RULE"),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn syntax_error_carries_position() {
    let err = parse_err("SUFFIX s {\n  ni \"acc\"\n}");
    match err.kind {
        ErrorKind::UnexpectedToken { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn missing_condition_operand_is_fatal() {
    let err = parse_err(r#"SUFFIX s { a: "x" WHEN ENDSWITH CUT 1 }"#);
    match err.kind {
        ErrorKind::UnexpectedToken { expected, .. } => {
            assert_eq!(expected, "character set or regex pattern");
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn failed_parse_yields_no_partial_grammar() {
    // The first set is well formed but the parse as a whole must fail.
    assert!(parse_grammar(&SourceContext::from_file(
        "test.mgr",
        r#"SUFFIX ok { ni: "acc" } RULE broken { "#,
    ))
    .is_err());
}
