//! End-to-end CLI checks against the Uzbek fixture grammar.

use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = "tests/fixtures/uzbek.mgr";

fn morfix() -> Command {
    Command::cargo_bin("morfix").expect("binary builds")
}

#[test]
fn analyze_reports_the_matched_rule() {
    morfix()
        .args(["analyze", FIXTURE, "kitoblarni"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"kitob\"")
                .and(predicate::str::contains("rule: noun - noun declension")),
        );
}

#[test]
fn analyze_all_lists_every_segmentation() {
    morfix()
        .args(["analyze", FIXTURE, "kitoblarni", "--all"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("variants found")
                .and(predicate::str::contains("+lar (plural: plural marker)")),
        );
}

#[test]
fn analyze_json_emits_analysis_fields() {
    morfix()
        .args(["analyze", FIXTURE, "kitoblarni", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"root\"").and(predicate::str::contains("\"suffixes\"")));
}

#[test]
fn generate_lists_forms() {
    morfix()
        .args(["generate", FIXTURE, "case", "kitob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kitobni").and(predicate::str::contains("kitobga")));
}

#[test]
fn generate_json_emits_a_form_array() {
    morfix()
        .args(["generate", FIXTURE, "case", "kitob", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kitobni\""));
}

#[test]
fn generate_unknown_rule_fails() {
    morfix()
        .args(["generate", FIXTURE, "missing", "kitob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rule named 'missing'"));
}

#[test]
fn show_prints_sets_and_rules() {
    morfix()
        .args(["show", FIXTURE])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("SUFFIX plural")
                .and(predicate::str::contains("RULE noun"))
                .and(predicate::str::contains("WHEN ISVOWEL")),
        );
}

#[test]
fn export_prints_affix_text() {
    morfix()
        .args(["export", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("SET UTF-8").and(predicate::str::contains("SFX")));
}

#[test]
fn missing_grammar_file_fails() {
    morfix()
        .args(["show", "tests/fixtures/nope.mgr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read grammar file"));
}

#[test]
fn malformed_grammar_fails_with_a_syntax_error() {
    morfix()
        .args(["analyze", "tests/fixtures/broken.mgr", "kitob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SUFFIX or RULE"));
}
