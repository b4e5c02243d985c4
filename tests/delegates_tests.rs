mod common;

use common::{Ty, UnitBuilder};
use tolr::binding::{MethodBinding, Modifiers, TypeBinding, TypeUse};
use tolr::config::Config;
use tolr::operations::{AddDelegateMethodsOperation, DelegateRequest, TargetRef};
use tolr::project::{Never, NullTemplates};
use tolr::stubs::candidates::delegatable_methods;

struct LoggerSetup {
    builder: UnitBuilder,
    info: tolr::binding::MethodId,
    count: tolr::binding::MethodId,
}

fn logger_builder() -> LoggerSetup {
    let mut builder = UnitBuilder::new("Service");
    let string = builder.string_type();
    let int_ty = builder.table.primitive("int");
    let void_ty = builder.table.void_type();
    let logger = builder.table.add_type(TypeBinding::class("logging", "Logger", Modifiers::PUBLIC));
    let info = builder.table.add_method(MethodBinding {
        name: "info".into(),
        declaring: logger,
        modifiers: Modifiers::PUBLIC,
        params: vec![TypeUse::of(string)],
        param_names: vec!["message".into()],
        return_type: TypeUse::of(void_ty),
        is_constructor: false,
        is_varargs: false,
    });
    let count = builder.table.add_method(MethodBinding {
        name: "count".into(),
        declaring: logger,
        modifiers: Modifiers::PUBLIC,
        params: vec![],
        param_names: vec![],
        return_type: TypeUse::of(int_ty),
        is_constructor: false,
        is_varargs: false,
    });
    let builder = builder.package("p").field(Ty::Class(logger), "log");
    LoggerSetup { builder, info, count }
}

#[test]
fn void_delegate_invokes_through_the_field() {
    let setup = logger_builder();
    let unit = setup.builder.build();
    let config = Config::default();
    let op = AddDelegateMethodsOperation::new(
        &unit.ast,
        &unit.source,
        &unit.table,
        &config,
        &NullTemplates,
    );
    let request = DelegateRequest {
        target: TargetRef::Named("Service".into()),
        tuples: vec![(unit.field_id("log"), setup.info)],
    };

    let outcome = op.create_text_edit(&request, &Never).unwrap();
    assert_eq!(outcome.generated, 1);
    let result = outcome.edit.apply(&unit.source).unwrap();
    assert!(
        result.contains("public void info(String message) {\n        log.info(message);\n    }"),
        "{result}"
    );
}

#[test]
fn non_void_delegate_returns_the_result() {
    let setup = logger_builder();
    let unit = setup.builder.build();
    let config = Config::default();
    let op = AddDelegateMethodsOperation::new(
        &unit.ast,
        &unit.source,
        &unit.table,
        &config,
        &NullTemplates,
    );
    let request = DelegateRequest {
        target: TargetRef::Named("Service".into()),
        tuples: vec![(unit.field_id("log"), setup.count)],
    };

    let outcome = op.create_text_edit(&request, &Never).unwrap();
    let result = outcome.edit.apply(&unit.source).unwrap();
    assert!(
        result.contains("public int count() {\n        return log.count();\n    }"),
        "{result}"
    );
}

#[test]
fn varargs_signature_is_preserved() {
    let mut builder = UnitBuilder::new("Service");
    let string = builder.string_type();
    let void_ty = builder.table.void_type();
    let logger = builder.table.add_type(TypeBinding::class("logging", "Logger", Modifiers::PUBLIC));
    let log_all = builder.table.add_method(MethodBinding {
        name: "logAll".into(),
        declaring: logger,
        modifiers: Modifiers::PUBLIC,
        params: vec![TypeUse::array(string, 1)],
        param_names: vec!["parts".into()],
        return_type: TypeUse::of(void_ty),
        is_constructor: false,
        is_varargs: true,
    });
    let unit = builder.package("p").field(Ty::Class(logger), "delegate").build();
    let config = Config::default();
    let op = AddDelegateMethodsOperation::new(
        &unit.ast,
        &unit.source,
        &unit.table,
        &config,
        &NullTemplates,
    );
    let request = DelegateRequest {
        target: TargetRef::Named("Service".into()),
        tuples: vec![(unit.field_id("delegate"), log_all)],
    };

    let outcome = op.create_text_edit(&request, &Never).unwrap();
    let result = outcome.edit.apply(&unit.source).unwrap();
    assert!(result.contains("public void logAll(String... parts)"), "{result}");
    assert!(result.contains("delegate.logAll(parts);"), "{result}");
}

#[test]
fn tuples_already_declared_on_the_type_are_skipped() {
    let setup = logger_builder();
    let unit = setup.builder.method(None, "info", "").build();
    let config = Config::default();
    let op = AddDelegateMethodsOperation::new(
        &unit.ast,
        &unit.source,
        &unit.table,
        &config,
        &NullTemplates,
    );
    let request = DelegateRequest {
        target: TargetRef::Named("Service".into()),
        tuples: vec![(unit.field_id("log"), setup.info)],
    };

    let outcome = op.create_text_edit(&request, &Never).unwrap();
    assert_eq!(outcome.generated, 0);
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn discovery_pairs_fields_with_their_type_methods() {
    let setup = logger_builder();
    let unit = setup.builder.build();
    let tuples = delegatable_methods(&unit.table, unit.class_id);
    let field = unit.field_id("log");
    assert!(tuples.contains(&(field, setup.info)));
    assert!(tuples.contains(&(field, setup.count)));
}

#[test]
fn discovery_excludes_methods_the_type_already_declares() {
    let setup = logger_builder();
    // Service declares its own override-equivalent count()
    let unit = setup.builder.method(Some(Ty::Prim("int")), "count", "return 0;").build();
    let tuples = delegatable_methods(&unit.table, unit.class_id);
    let field = unit.field_id("log");
    assert!(tuples.contains(&(field, setup.info)));
    assert!(!tuples.contains(&(field, setup.count)));
}
