//! Stub synthesis
//!
//! Builds new declaration subtrees from member bindings: constructors,
//! accessors, delegating methods and implementation/override stubs. Bodies
//! are synthesized as statement text, routed through the template provider
//! and attached as placeholder nodes, the same way rendered fragments flow
//! through the tree rewriter. Type names referenced by a stub go through
//! the import engine, which decides between the simple and the qualified
//! form.

pub mod candidates;
pub mod naming;

use crate::ast::{
    Block, ClassMember, ConstructorDecl, MethodDecl, Parameter, Placeholder, PlaceholderKind,
    Span, Stmt, TypeRef,
};
use crate::binding::{BindingTable, FieldId, MethodBinding, MethodId, Modifiers, TypeKind, TypeUse};
use crate::config::GenerationSettings;
use crate::error::{Error, Result};
use crate::imports::ImportRewrite;
use crate::project::TemplateProvider;

/// Constructor stub mirroring a super constructor: same parameters with
/// non-colliding suggested names, body forwarding everything to `super`
pub fn create_constructor_stub(
    table: &BindingTable,
    imports: &mut ImportRewrite<'_>,
    templates: &dyn TemplateProvider,
    settings: &GenerationSettings,
    super_ctor: MethodId,
    type_name: &str,
) -> Result<ClassMember> {
    let binding = table.method(super_ctor);
    if !binding.is_constructor {
        return Err(Error::structural(format!(
            "'{}' is not a constructor binding",
            binding.name
        )));
    }
    let modifiers = binding.modifiers.without(Modifiers::ABSTRACT | Modifiers::NATIVE);
    let mut excluded = Vec::new();
    let parameters = create_parameters(table, imports, binding, &mut excluded);
    let param_names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();

    let statement =
        if settings.omit_super_call_for_default_constructor && parameters.is_empty() {
            String::new()
        } else {
            format!("super({});", param_names.join(", "))
        };
    let body = build_body(templates, type_name, type_name, true, &statement);

    Ok(ClassMember::Constructor(ConstructorDecl {
        modifiers: modifiers.to_ast(),
        name: type_name.to_string(),
        parameters,
        body,
        doc_comment: comment_for(templates, settings, type_name, type_name, &param_names),
        binding: None,
        span: Span::default(),
    }))
}

/// Constructor stub that forwards to `super` and assigns the given fields
/// from same-named parameters. An assignment uses `this.field` whenever the
/// parameter name would otherwise shadow the field, or unconditionally when
/// the keyword-this setting is on.
pub fn create_constructor_with_fields(
    table: &BindingTable,
    imports: &mut ImportRewrite<'_>,
    templates: &dyn TemplateProvider,
    settings: &GenerationSettings,
    type_name: &str,
    super_ctor: Option<MethodId>,
    fields: &[FieldId],
) -> Result<ClassMember> {
    let mut excluded = Vec::new();
    let mut parameters = Vec::new();
    let mut statements = Vec::new();

    if let Some(super_ctor) = super_ctor {
        let binding = table.method(super_ctor);
        if !binding.is_constructor {
            return Err(Error::structural(format!(
                "'{}' is not a constructor binding",
                binding.name
            )));
        }
        parameters = create_parameters(table, imports, binding, &mut excluded);
        let names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();
        statements.push(placeholder_stmt(format!("super({});", names.join(", "))));
    }

    for &field in fields {
        let field_binding = table.field(field);
        let base = naming::base_name(&field_binding.name, settings);
        let param_name = naming::suggest_parameter_name(&base, &excluded);
        excluded.push(param_name.clone());
        parameters.push(Parameter {
            modifiers: vec![],
            type_ref: type_ref_for(table, imports, field_binding.ty),
            name: param_name.clone(),
            varargs: false,
            binding: None,
            span: Span::default(),
        });
        let target = if param_name == field_binding.name || settings.use_keyword_this {
            format!("this.{}", field_binding.name)
        } else {
            field_binding.name.clone()
        };
        statements.push(placeholder_stmt(format!("{target} = {param_name};")));
    }

    let param_names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();
    Ok(ClassMember::Constructor(ConstructorDecl {
        modifiers: vec![crate::ast::Modifier::Public],
        name: type_name.to_string(),
        parameters,
        body: Block { statements, span: Span::default() },
        doc_comment: comment_for(templates, settings, type_name, type_name, &param_names),
        binding: None,
        span: Span::default(),
    }))
}

/// Getter stub returning the field, named by convention
pub fn create_getter_stub(
    table: &BindingTable,
    imports: &mut ImportRewrite<'_>,
    templates: &dyn TemplateProvider,
    settings: &GenerationSettings,
    field: FieldId,
    type_name: &str,
) -> Result<ClassMember> {
    let binding = table.field(field);
    let name = naming::getter_name(&binding.name, table.is_boolean(binding.ty), settings);
    let access = if settings.use_keyword_this {
        format!("this.{}", binding.name)
    } else {
        binding.name.clone()
    };
    let statement = format!("return {access};");
    let body = build_body(templates, type_name, &name, false, &statement);

    let mut modifiers = Modifiers::PUBLIC;
    if binding.modifiers.is_static() {
        modifiers = modifiers.with(Modifiers::STATIC);
    }
    Ok(ClassMember::Method(MethodDecl {
        modifiers: modifiers.to_ast(),
        return_type: Some(type_ref_for(table, imports, binding.ty)),
        name: name.clone(),
        parameters: vec![],
        body: Some(body),
        doc_comment: comment_for(templates, settings, type_name, &name, &[]),
        binding: None,
        span: Span::default(),
    }))
}

/// Setter stub assigning the field from one parameter
pub fn create_setter_stub(
    table: &BindingTable,
    imports: &mut ImportRewrite<'_>,
    templates: &dyn TemplateProvider,
    settings: &GenerationSettings,
    field: FieldId,
    type_name: &str,
) -> Result<ClassMember> {
    let binding = table.field(field);
    let name = naming::setter_name(&binding.name, settings);
    let base = naming::base_name(&binding.name, settings);
    let param_name = naming::suggest_parameter_name(&base, &[]);

    let target = if param_name == binding.name || settings.use_keyword_this {
        format!("this.{}", binding.name)
    } else {
        binding.name.clone()
    };
    let statement = format!("{target} = {param_name};");
    let body = build_body(templates, type_name, &name, false, &statement);

    let mut modifiers = Modifiers::PUBLIC;
    if binding.modifiers.is_static() {
        modifiers = modifiers.with(Modifiers::STATIC);
    }
    let param_names = vec![param_name.clone()];
    Ok(ClassMember::Method(MethodDecl {
        modifiers: modifiers.to_ast(),
        return_type: None,
        name: name.clone(),
        parameters: vec![Parameter {
            modifiers: vec![],
            type_ref: type_ref_for(table, imports, binding.ty),
            name: param_name,
            varargs: false,
            binding: None,
            span: Span::default(),
        }],
        body: Some(body),
        doc_comment: comment_for(templates, settings, type_name, &name, &param_names),
        binding: None,
        span: Span::default(),
    }))
}

/// Delegating method: same signature as the target method, body forwarding
/// to it through the field. Varargs stay varargs; non-void targets return
/// the delegated result.
pub fn create_delegate_stub(
    table: &BindingTable,
    imports: &mut ImportRewrite<'_>,
    templates: &dyn TemplateProvider,
    settings: &GenerationSettings,
    field: FieldId,
    method: MethodId,
    type_name: &str,
) -> Result<ClassMember> {
    let field_binding = table.field(field);
    let method_binding = table.method(method);
    if method_binding.is_constructor {
        return Err(Error::structural("cannot delegate to a constructor"));
    }
    let modifiers = method_binding
        .modifiers
        .without(Modifiers::SYNCHRONIZED | Modifiers::ABSTRACT | Modifiers::NATIVE);

    let mut excluded = Vec::new();
    let parameters = create_parameters(table, imports, method_binding, &mut excluded);
    let param_names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();

    let receiver = if settings.use_keyword_this {
        format!("this.{}", field_binding.name)
    } else {
        field_binding.name.clone()
    };
    let call = format!("{receiver}.{}({})", method_binding.name, param_names.join(", "));
    let statement = if table.is_void(method_binding.return_type) {
        format!("{call};")
    } else {
        format!("return {call};")
    };
    let body = build_body(templates, type_name, &method_binding.name, false, &statement);

    let return_type = if table.is_void(method_binding.return_type) {
        None
    } else {
        Some(type_ref_for(table, imports, method_binding.return_type))
    };
    Ok(ClassMember::Method(MethodDecl {
        modifiers: modifiers.to_ast(),
        return_type,
        name: method_binding.name.clone(),
        parameters,
        body: Some(body),
        doc_comment: comment_for(
            templates,
            settings,
            type_name,
            &method_binding.name,
            &param_names,
        ),
        binding: None,
        span: Span::default(),
    }))
}

/// Implementation/override stub: same signature with `abstract`/`native`
/// stripped. Abstract targets get a synthesized default-value return,
/// overridable ones a `super` forwarding call. With `deferred` the body is
/// left out and visibility widens to public.
pub fn create_implementation_stub(
    table: &BindingTable,
    imports: &mut ImportRewrite<'_>,
    templates: &dyn TemplateProvider,
    settings: &GenerationSettings,
    method: MethodId,
    type_name: &str,
    deferred: bool,
) -> Result<ClassMember> {
    let binding = table.method(method);
    if binding.is_constructor {
        return Err(Error::structural("cannot implement a constructor binding"));
    }
    let mut modifiers = binding
        .modifiers
        .without(Modifiers::ABSTRACT | Modifiers::NATIVE | Modifiers::PRIVATE);
    if deferred {
        modifiers = modifiers.without(Modifiers::PROTECTED).with(Modifiers::PUBLIC);
    }
    // interface methods arrive package-flagless; their implementations must
    // be public
    if table.type_binding(binding.declaring).kind == TypeKind::Interface {
        modifiers = modifiers.with(Modifiers::PUBLIC);
    }

    let mut excluded = Vec::new();
    let parameters = create_parameters(table, imports, binding, &mut excluded);
    let param_names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();

    let body = if deferred {
        None
    } else {
        let statement = if binding.modifiers.is_abstract()
            || table.type_binding(binding.declaring).kind == TypeKind::Interface
        {
            default_return_statement(table, binding.return_type)
        } else {
            let call = format!("super.{}({})", binding.name, param_names.join(", "));
            if table.is_void(binding.return_type) {
                format!("{call};")
            } else {
                format!("return {call};")
            }
        };
        Some(build_body(templates, type_name, &binding.name, false, &statement))
    };

    let return_type = if table.is_void(binding.return_type) {
        None
    } else {
        Some(type_ref_for(table, imports, binding.return_type))
    };
    Ok(ClassMember::Method(MethodDecl {
        modifiers: modifiers.to_ast(),
        return_type,
        name: binding.name.clone(),
        parameters,
        body,
        doc_comment: comment_for(templates, settings, type_name, &binding.name, &param_names),
        binding: None,
        span: Span::default(),
    }))
}

/// Parameter list for a stub mirroring `binding`, names suggested from the
/// declared names (or the parameter types) and kept free of collisions
fn create_parameters(
    table: &BindingTable,
    imports: &mut ImportRewrite<'_>,
    binding: &MethodBinding,
    excluded: &mut Vec<String>,
) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    let count = binding.params.len();
    for (i, &param) in binding.params.iter().enumerate() {
        let base = match binding.param_names.get(i) {
            Some(declared) if !declared.is_empty() => declared.clone(),
            _ => {
                let type_name = table.type_binding(param.id).name.clone();
                naming::suggest_parameter_name(&lower_first(&type_name), &[])
            }
        };
        let name = naming::suggest_parameter_name(&base, excluded);
        excluded.push(name.clone());
        let varargs = binding.is_varargs && i + 1 == count && param.dims > 0;
        parameters.push(Parameter {
            modifiers: vec![],
            type_ref: type_ref_for(table, imports, param),
            name,
            varargs,
            binding: None,
            span: Span::default(),
        });
    }
    parameters
}

/// Type reference for generated code; the import engine answers with the
/// simple name or, on a conflict, the qualified one
fn type_ref_for(table: &BindingTable, imports: &mut ImportRewrite<'_>, use_: TypeUse) -> TypeRef {
    let name = imports.add_import(use_.id);
    TypeRef { name, array_dims: use_.dims, binding: Some(use_.id), span: Span::default() }
}

fn placeholder_stmt(text: String) -> Stmt {
    Stmt::Placeholder(Placeholder { text, kind: PlaceholderKind::Statement, span: Span::default() })
}

/// Route the synthesized core statement through the body template; with no
/// template configured the raw statement is the body
fn build_body(
    templates: &dyn TemplateProvider,
    type_name: &str,
    method_name: &str,
    is_constructor: bool,
    statement: &str,
) -> Block {
    let text = match templates.method_body(type_name, method_name, is_constructor, statement) {
        Some(expanded) => expanded,
        None => statement.to_string(),
    };
    let statements = if text.is_empty() { vec![] } else { vec![placeholder_stmt(text)] };
    Block { statements, span: Span::default() }
}

fn comment_for(
    templates: &dyn TemplateProvider,
    settings: &GenerationSettings,
    type_name: &str,
    method_name: &str,
    param_names: &[String],
) -> Option<String> {
    if !settings.create_comments {
        return None;
    }
    templates.method_comment(type_name, method_name, param_names)
}

/// Default-value return for a synthesized abstract-method body
fn default_return_statement(table: &BindingTable, ret: TypeUse) -> String {
    if table.is_void(ret) {
        return String::new();
    }
    if ret.dims > 0 {
        return "return null;".to_string();
    }
    let binding = table.type_binding(ret.id);
    if binding.kind != TypeKind::Primitive {
        return "return null;".to_string();
    }
    match binding.name.as_str() {
        "boolean" => "return false;".to_string(),
        "char" => "return '\\0';".to_string(),
        _ => "return 0;".to_string(),
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
