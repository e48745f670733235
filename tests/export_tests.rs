//! Hunspell affix export.

use morfix::errors::{ErrorCategory, ErrorKind};
use morfix::hunspell::FLAG_LIMIT;
use morfix::{alphabet, Engine};

fn export(src: &str) -> String {
    Engine::from_source("test.mgr", src)
        .expect("grammar should load")
        .export_affix()
        .expect("export should succeed")
}

#[test]
fn sets_get_sequential_flags_in_name_order() {
    let affix = export(
        r#"
        SUFFIX case: "case endings" { ni: "accusative" }
        SUFFIX plural: "plural" { lar: "plural marker" }
        "#,
    );

    assert!(affix.starts_with("SET UTF-8\nLANG uz\n"));
    // Flags follow the sorted set names: case before plural.
    assert!(affix.contains("SFX A Y 1\n"));
    assert!(affix.contains("SFX A 0 ni . # case endings:accusative\n"));
    assert!(affix.contains("SFX B Y 1\n"));
    assert!(affix.contains("SFX B 0 lar . # plural:plural marker\n"));
}

#[test]
fn cut_rewrite_becomes_the_stripping_count() {
    let affix = export(r#"SUFFIX infinitive { moq: "infinitive" WHEN ENDSWITH [a] CUT 1 }"#);
    assert!(affix.contains("SFX A 1 moq [a]"));
}

#[test]
fn replace_rewrite_strips_one_and_prepends() {
    let affix = export(r#"SUFFIX past { gan: "past" WHEN ENDSWITH /q/ REPLACE "g" }"#);
    assert!(affix.contains("SFX A 1 ggan q"));
}

#[test]
fn empty_replacement_text_strips_nothing() {
    let affix = export(r#"SUFFIX past { gan: "past" WHEN ENDSWITH /q/ REPLACE "" }"#);
    assert!(affix.contains("SFX A 0 gan q"));
}

#[test]
fn vowel_condition_exports_the_vowel_class() {
    let affix = export(r#"SUFFIX possessive { si: "3sg" WHEN ISVOWEL }"#);
    assert!(affix.contains(&alphabet::vowel_class()));
}

#[test]
fn rules_export_as_compound_rules() {
    let affix = export(
        r#"
        SUFFIX case: "case" { ni: "accusative" }
        SUFFIX plural: "plural" { lar: "plural marker" }
        RULE noun: "noun chain" { [@plural] + @case }
        "#,
    );

    assert!(affix.contains("# Rule: noun - noun chain\n"));
    assert!(affix.contains("COMPOUNDRULE (B)A\n"));
}

#[test]
fn literal_only_rules_export_nothing() {
    let affix = export(r#"SUFFIX case { ni: "a" } RULE bare { lik }"#);
    assert!(!affix.contains("COMPOUNDRULE"));
    assert!(!affix.contains("# Rule: bare"));
}

#[test]
fn too_many_sets_exhaust_the_flag_space() {
    let mut src = String::new();
    for i in 0..FLAG_LIMIT + 1 {
        src.push_str(&format!("SUFFIX set{i:02} {{ fx{i:02}: \"d\" }}\n"));
    }

    let err = Engine::from_source("test.mgr", src)
        .expect("grammar should load")
        .export_affix()
        .unwrap_err();
    assert_eq!(err.kind.category(), ErrorCategory::Export);
    assert!(matches!(err.kind, ErrorKind::FlagSpaceExhausted { limit } if limit == FLAG_LIMIT));
}
