mod common;

use common::{Ty, UnitBuilder};
use tolr::config::Config;
use tolr::operations::{SortMembersOperation, TargetRef};
use tolr::project::StringDocument;

fn target() -> TargetRef {
    TargetRef::Named("Mixed".into())
}

#[test]
fn fields_sort_before_methods() {
    let unit = UnitBuilder::new("Mixed")
        .package("p")
        .method(Some(Ty::Prim("int")), "getValue", "return value;")
        .field(Ty::Prim("int"), "value")
        .build();
    let config = Config::default();
    let op = SortMembersOperation::new(&unit.ast, &unit.source, &config);
    let mut document = StringDocument::new(unit.source.clone());

    let outcome = op.run(&target(), &mut document, false).unwrap();
    assert_eq!(outcome.moved, 2);
    let result = document.text();
    assert!(result.find("int value;").unwrap() < result.find("public int getValue").unwrap());
}

#[test]
fn already_sorted_body_yields_empty_edit() {
    let unit = UnitBuilder::new("Mixed")
        .package("p")
        .field(Ty::Prim("int"), "value")
        .method(Some(Ty::Prim("int")), "getValue", "return value;")
        .build();
    let config = Config::default();
    let op = SortMembersOperation::new(&unit.ast, &unit.source, &config);

    let outcome = op.create_text_edit(&target()).unwrap();
    assert_eq!(outcome.moved, 0);
    assert!(outcome.edit.is_noop());
}

#[test]
fn members_sort_alphabetically_within_a_category() {
    let unit = UnitBuilder::new("Mixed")
        .package("p")
        .field(Ty::Prim("int"), "zeta")
        .field(Ty::Prim("int"), "alpha")
        .build();
    let config = Config::default();
    let op = SortMembersOperation::new(&unit.ast, &unit.source, &config);

    let outcome = op.create_text_edit(&target()).unwrap();
    let result = outcome.edit.apply(&unit.source).unwrap();
    assert!(result.find("int alpha;").unwrap() < result.find("int zeta;").unwrap(), "{result}");
}

#[test]
fn static_fields_sort_before_instance_fields() {
    let unit = UnitBuilder::new("Mixed")
        .package("p")
        .field(Ty::Prim("int"), "value")
        .static_field(Ty::Prim("int"), "counter")
        .build();
    let config = Config::default();
    let op = SortMembersOperation::new(&unit.ast, &unit.source, &config);

    let outcome = op.create_text_edit(&target()).unwrap();
    let result = outcome.edit.apply(&unit.source).unwrap();
    assert!(
        result.find("static int counter;").unwrap() < result.find("int value;").unwrap(),
        "{result}"
    );
}

#[test]
fn alphabetical_sorting_can_be_disabled() {
    let unit = UnitBuilder::new("Mixed")
        .package("p")
        .field(Ty::Prim("int"), "zeta")
        .field(Ty::Prim("int"), "alpha")
        .build();
    let mut config = Config::default();
    config.sort.sort_alphabetically = false;
    let op = SortMembersOperation::new(&unit.ast, &unit.source, &config);

    // category-equal members keep their declared order
    let outcome = op.create_text_edit(&target()).unwrap();
    assert_eq!(outcome.moved, 0);
    assert!(outcome.edit.is_noop());
}

#[test]
fn missing_target_is_a_structural_error() {
    let unit = UnitBuilder::new("Mixed").package("p").build();
    let config = Config::default();
    let op = SortMembersOperation::new(&unit.ast, &unit.source, &config);
    assert!(op.create_text_edit(&TargetRef::Named("Absent".into())).is_err());
}
