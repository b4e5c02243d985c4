mod common;

use common::{Ty, UnitBuilder};
use tolr::ast::PlaceholderKind;
use tolr::config::GenerationSettings;
use tolr::rewrite::{TargetBody, TreeRewrite};

fn three_field_unit() -> common::Unit {
    UnitBuilder::new("Box")
        .package("p")
        .field(Ty::Prim("int"), "a")
        .field(Ty::Prim("int"), "b")
        .field(Ty::Prim("int"), "c")
        .build()
}

fn member_order(source: &str, names: &[&str]) -> Vec<usize> {
    names
        .iter()
        .map(|name| source.find(name).unwrap_or_else(|| panic!("'{name}' missing in:\n{source}")))
        .collect()
}

#[test]
fn no_pending_edits_yield_empty_edit() {
    let unit = three_field_unit();
    let rewrite = TreeRewrite::new(&unit.source, &GenerationSettings::default());
    let edit = rewrite.compute_text_edit().unwrap();
    assert!(edit.is_noop());
    assert_eq!(edit.apply(&unit.source).unwrap(), unit.source);
}

#[test]
fn insert_last_appends_after_last_member() {
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let node = rewrite.create_placeholder("int d;", PlaceholderKind::Member);
    rewrite.insert_last(&target, node).unwrap();

    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    assert!(result.contains("int c;\n    int d;\n"), "{result}");
}

#[test]
fn insert_before_places_node_at_anchor() {
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let node = rewrite.create_placeholder("int x;", PlaceholderKind::Member);
    rewrite.insert_before(&target, node, 1).unwrap();

    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    let positions = member_order(&result, &["int a;", "int x;", "int b;", "int c;"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{result}");
}

#[test]
fn same_anchor_insertions_stack_before_the_first() {
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let first = rewrite.create_placeholder("int x;", PlaceholderKind::Member);
    let second = rewrite.create_placeholder("int y;", PlaceholderKind::Member);
    rewrite.insert_before(&target, first, 1).unwrap();
    rewrite.insert_before(&target, second, 1).unwrap();

    // the first call ends up immediately before the anchor
    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    let positions = member_order(&result, &["int y;", "int x;", "int b;"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{result}");
}

#[test]
fn removing_anchor_relocates_insertion_to_next_sibling() {
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let node = rewrite.create_placeholder("int x;", PlaceholderKind::Member);
    rewrite.insert_before(&target, node, 1).unwrap();
    rewrite.remove(&target, 1).unwrap();

    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    assert!(!result.contains("int b;"), "{result}");
    let positions = member_order(&result, &["int a;", "int x;", "int c;"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{result}");
}

#[test]
fn removing_last_anchor_appends_insertion() {
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let node = rewrite.create_placeholder("int x;", PlaceholderKind::Member);
    rewrite.insert_before(&target, node, 2).unwrap();
    rewrite.remove(&target, 2).unwrap();

    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    assert!(!result.contains("int c;"), "{result}");
    let positions = member_order(&result, &["int a;", "int b;", "int x;"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{result}");
}

#[test]
fn replace_swaps_member_text_in_place() {
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let node = rewrite.create_placeholder("long a;", PlaceholderKind::Member);
    rewrite.replace(&target, 0, node).unwrap();

    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    assert!(result.contains("long a;"), "{result}");
    assert!(!result.contains("int a;"), "{result}");
    let positions = member_order(&result, &["long a;", "int b;", "int c;"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{result}");
}

#[test]
fn double_remove_is_a_structural_error() {
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    rewrite.remove(&target, 1).unwrap();
    let err = rewrite.remove(&target, 1).unwrap_err().to_string();
    assert!(err.contains("already removed"), "{err}");
}

#[test]
fn insert_into_empty_body_indents_below_owner() {
    let unit = UnitBuilder::new("Empty").package("p").build();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let node = rewrite.create_placeholder("int x;", PlaceholderKind::Member);
    rewrite.insert_last(&target, node).unwrap();

    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    assert!(result.contains("{\n    int x;\n}"), "{result}");
}

#[test]
fn final_membership_matches_intended_list() {
    // removals, replacements and insertions combined: the surviving list is
    // exactly (original minus removed/replaced) with insertions at anchors
    let unit = three_field_unit();
    let settings = GenerationSettings::default();
    let mut rewrite = TreeRewrite::new(&unit.source, &settings);
    let target = TargetBody::of_class(unit.class());
    let replacement = rewrite.create_placeholder("double b;", PlaceholderKind::Member);
    let appended = rewrite.create_placeholder("int d;", PlaceholderKind::Member);
    rewrite.remove(&target, 0).unwrap();
    rewrite.replace(&target, 1, replacement).unwrap();
    rewrite.insert_last(&target, appended).unwrap();

    let result = rewrite.compute_text_edit().unwrap().apply(&unit.source).unwrap();
    assert!(!result.contains("int a;"), "{result}");
    assert!(!result.contains("int b;"), "{result}");
    let positions = member_order(&result, &["double b;", "int c;", "int d;"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{result}");
}
