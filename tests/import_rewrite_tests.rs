mod common;

use common::{Ty, UnitBuilder};
use tolr::imports::{ContextKind, ContextResult, ImportContext, ImportRewrite};

#[test]
fn no_additions_yield_empty_edit() {
    let unit = UnitBuilder::new("A").package("p").import("a.b.C").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);
    let edit = imports.rewrite_imports(&unit.source);
    assert!(edit.is_noop());
    assert_eq!(edit.apply(&unit.source).unwrap(), unit.source);
}

#[test]
fn conflicting_simple_name_falls_back_to_qualified() {
    let unit = UnitBuilder::new("A").package("p").import("pkg1.Foo").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);

    let name = imports.add_import_qualified("pkg2.Foo");
    assert_eq!(name, "pkg2.Foo");

    // no second Foo import materializes
    let result = imports.rewrite_imports(&unit.source).apply(&unit.source).unwrap();
    assert_eq!(result.matches("Foo;").count(), 1, "{result}");
    assert!(imports.created_imports().is_empty());
}

#[test]
fn added_import_goes_after_existing_block() {
    let unit = UnitBuilder::new("A").package("p").import("a.b.C").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);

    assert_eq!(imports.add_import_qualified("x.y.Z"), "Z");
    let result = imports.rewrite_imports(&unit.source).apply(&unit.source).unwrap();
    assert!(result.contains("import a.b.C;\nimport x.y.Z;\n"), "{result}");
}

#[test]
fn added_import_goes_below_package_when_no_imports_exist() {
    let unit = UnitBuilder::new("A").package("p").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);

    imports.add_import_qualified("x.y.Z");
    let result = imports.rewrite_imports(&unit.source).apply(&unit.source).unwrap();
    assert!(result.contains("package p;\n\nimport x.y.Z;\n"), "{result}");
}

#[test]
fn same_package_and_implicit_package_need_no_import() {
    let unit = UnitBuilder::new("A").package("p").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);

    assert_eq!(imports.add_import_qualified("p.Local"), "Local");
    assert_eq!(imports.add_import_qualified("java.lang.String"), "String");
    assert!(imports.rewrite_imports(&unit.source).is_noop());
}

#[test]
fn resolved_binding_routes_through_qualified_name() {
    let builder = UnitBuilder::new("A");
    let string_id = builder.string_type();
    let unit = builder.package("p").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);
    // java.lang is implicit, nothing is recorded
    assert_eq!(imports.add_import(string_id), "String");
    assert!(imports.rewrite_imports(&unit.source).is_noop());
}

#[test]
fn organize_mode_removes_unused_seed_imports() {
    let unit = UnitBuilder::new("A").package("p").import("x.y.Unused").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, false);

    let result = imports.rewrite_imports(&unit.source).apply(&unit.source).unwrap();
    assert!(!result.contains("x.y.Unused"), "{result}");
    assert_eq!(imports.removed_count(), 1);
}

#[test]
fn organize_mode_keeps_readded_seed_import_once() {
    let unit = UnitBuilder::new("A").package("p").import("a.b.C").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, false);

    imports.add_import_qualified("a.b.C");
    let result = imports.rewrite_imports(&unit.source).apply(&unit.source).unwrap();
    assert_eq!(result.matches("import a.b.C;").count(), 1, "{result}");
    assert_eq!(imports.removed_count(), 0);
    assert!(imports.created_imports().is_empty());
}

#[test]
fn on_demand_seed_covers_added_import_in_organize_mode() {
    let unit = UnitBuilder::new("A").package("p").import_on_demand("a.b").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, false);

    imports.add_import_qualified("a.b.C");
    let result = imports.rewrite_imports(&unit.source).apply(&unit.source).unwrap();
    assert!(result.contains("import a.b.*;"), "{result}");
    assert!(!result.contains("import a.b.C;"), "{result}");
}

#[test]
fn static_import_emitted_after_normal_imports() {
    let unit = UnitBuilder::new("A").package("p").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);

    assert_eq!(imports.add_static_import_qualified("tools.Util", "helper", false), "helper");
    imports.add_import_qualified("x.y.Z");
    let result = imports.rewrite_imports(&unit.source).apply(&unit.source).unwrap();
    assert!(result.contains("import x.y.Z;\nimport static tools.Util.helper;\n"), "{result}");
}

#[test]
fn static_import_conflict_returns_member_qualified_form() {
    let unit = UnitBuilder::new("A").package("p").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);

    assert_eq!(imports.add_static_import_qualified("tools.Util", "helper", false), "helper");
    assert_eq!(
        imports.add_static_import_qualified("other.Helpers", "helper", false),
        "Helpers.helper"
    );
}

#[test]
fn find_in_context_reports_session_additions() {
    let unit = UnitBuilder::new("A").package("p").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);

    assert_eq!(imports.find_in_context("x.y", "Z", ContextKind::Type), ContextResult::Unknown);
    imports.add_import_qualified("x.y.Z");
    assert_eq!(imports.find_in_context("x.y", "Z", ContextKind::Type), ContextResult::Found);
    assert_eq!(imports.find_in_context("q.r", "Z", ContextKind::Type), ContextResult::Conflict);
}

#[test]
fn installed_context_is_consulted_first() {
    struct AlwaysFound;
    impl ImportContext for AlwaysFound {
        fn find_in_context(&self, _: &str, _: &str, _: ContextKind) -> ContextResult {
            ContextResult::Found
        }
    }

    let unit = UnitBuilder::new("A").package("p").build();
    let context = AlwaysFound;
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);
    imports.set_context(&context);

    // a decisive context answer means nothing is ever recorded
    assert_eq!(imports.add_import_qualified("x.y.Z"), "Z");
    assert!(imports.rewrite_imports(&unit.source).is_noop());
}

#[test]
fn find_in_context_sees_in_scope_type_declarations() {
    let unit = UnitBuilder::new("Widget").package("p").field(Ty::Prim("int"), "id").build();
    let mut imports = ImportRewrite::new(&unit.ast, &unit.table, true);
    imports.set_scope_position(unit.class().body_span.start.offset + 1);

    // the unit's own top-level type occupies its simple name
    assert_eq!(imports.find_in_context("p", "Widget", ContextKind::Type), ContextResult::Found);
    assert_eq!(
        imports.find_in_context("other", "Widget", ContextKind::Type),
        ContextResult::Conflict
    );
}
