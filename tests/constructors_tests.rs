mod common;

use common::{Ty, UnitBuilder};
use tolr::binding::{MethodBinding, Modifiers, TypeBinding, TypeUse};
use tolr::config::Config;
use tolr::operations::{ConstructorRequest, GenerateConstructorsOperation, TargetRef};
use tolr::project::{Never, NullTemplates};
use tolr::stubs::candidates::visible_super_constructors;

#[test]
fn field_assignment_collision_forces_this_qualifier() {
    let builder = UnitBuilder::new("Person");
    let string = builder.string_type();
    let unit = builder.package("p").field(Ty::Class(string), "name").build();
    let config = Config::default();
    let op = GenerateConstructorsOperation::new(
        &unit.ast,
        &unit.source,
        &unit.table,
        &config,
        &NullTemplates,
    );
    let request = ConstructorRequest {
        target: TargetRef::Named("Person".into()),
        super_constructors: vec![],
        fields: vec![unit.field_id("name")],
    };

    let outcome = op.create_text_edit(&request, &Never).unwrap();
    let result = outcome.edit.apply(&unit.source).unwrap();
    assert!(result.contains("public Person(String name) {"), "{result}");
    assert!(result.contains("this.name = name;"), "{result}");
    assert!(!result.contains("\n        name = name;"), "{result}");
}

#[test]
fn super_constructor_parameters_are_forwarded() {
    let mut builder = UnitBuilder::new("Child");
    let int_ty = builder.table.primitive("int");
    let base = builder.table.add_type(TypeBinding::class("p", "Base", Modifiers::PUBLIC));
    let base_ctor = builder.table.add_method(MethodBinding {
        name: "Base".into(),
        declaring: base,
        modifiers: Modifiers::PUBLIC,
        params: vec![TypeUse::of(int_ty)],
        param_names: vec!["seed".into()],
        return_type: TypeUse::of(builder.table.void_type()),
        is_constructor: true,
        is_varargs: false,
    });
    let unit = builder.package("p").extends(base).build();
    let config = Config::default();
    let op = GenerateConstructorsOperation::new(
        &unit.ast,
        &unit.source,
        &unit.table,
        &config,
        &NullTemplates,
    );
    let request = ConstructorRequest {
        target: TargetRef::Named("Child".into()),
        super_constructors: vec![base_ctor],
        fields: vec![],
    };

    let outcome = op.create_text_edit(&request, &Never).unwrap();
    assert_eq!(outcome.generated, 1);
    let result = outcome.edit.apply(&unit.source).unwrap();
    assert!(result.contains("public Child(int seed) {\n        super(seed);\n    }"), "{result}");
}

#[test]
fn empty_request_is_rejected() {
    let unit = UnitBuilder::new("Child").package("p").build();
    let config = Config::default();
    let op = GenerateConstructorsOperation::new(
        &unit.ast,
        &unit.source,
        &unit.table,
        &config,
        &NullTemplates,
    );
    let request = ConstructorRequest {
        target: TargetRef::Named("Child".into()),
        super_constructors: vec![],
        fields: vec![],
    };
    assert!(op.create_text_edit(&request, &Never).is_err());
}

#[test]
fn discovery_filters_invisible_and_mirrored_constructors() {
    let mut builder = UnitBuilder::new("Child");
    let int_ty = builder.table.primitive("int");
    let void_ty = builder.table.void_type();
    let base = builder.table.add_type(TypeBinding::class("q", "Base", Modifiers::PUBLIC));
    let public_ctor = builder.table.add_method(MethodBinding {
        name: "Base".into(),
        declaring: base,
        modifiers: Modifiers::PUBLIC,
        params: vec![TypeUse::of(int_ty)],
        param_names: vec!["seed".into()],
        return_type: TypeUse::of(void_ty),
        is_constructor: true,
        is_varargs: false,
    });
    // package-private in another package: not callable from p.Child
    builder.table.add_method(MethodBinding {
        name: "Base".into(),
        declaring: base,
        modifiers: Modifiers::NONE,
        params: vec![],
        param_names: vec![],
        return_type: TypeUse::of(void_ty),
        is_constructor: true,
        is_varargs: false,
    });
    let unit = builder.package("p").extends(base).build();

    let visible = visible_super_constructors(&unit.table, unit.class_id, true);
    assert_eq!(visible, vec![public_ctor]);

    // a subclass constructor with the same parameter list suppresses the hit
    let mut table = unit.table;
    table.add_method(MethodBinding {
        name: "Child".into(),
        declaring: unit.class_id,
        modifiers: Modifiers::PUBLIC,
        params: vec![TypeUse::of(int_ty)],
        param_names: vec!["seed".into()],
        return_type: TypeUse::of(void_ty),
        is_constructor: true,
        is_varargs: false,
    });
    assert!(visible_super_constructors(&table, unit.class_id, true).is_empty());
    assert_eq!(visible_super_constructors(&table, unit.class_id, false), vec![public_ctor]);
}
