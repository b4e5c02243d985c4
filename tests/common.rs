// Shared test fixtures
//
// Builds a parsed unit the way the external parser/resolver would deliver
// it: source text, a tree whose spans index into that text, and a binding
// table kept in sync with both.

use tolr::ast::*;
use tolr::binding::*;

/// One ready-to-edit unit
pub struct Unit {
    pub source: String,
    pub ast: Ast,
    pub table: BindingTable,
    pub class_id: TypeId,
}

impl Unit {
    pub fn class(&self) -> &ClassDecl {
        match &self.ast.type_decls[0] {
            TypeDecl::Class(c) => c,
            _ => panic!("fixture unit has no class"),
        }
    }

    pub fn field_id(&self, name: &str) -> FieldId {
        self.table
            .type_binding(self.class_id)
            .fields
            .iter()
            .copied()
            .find(|&f| self.table.field(f).name == name)
            .unwrap_or_else(|| panic!("no field '{name}' in fixture"))
    }
}

/// A type as written in a field/return position
#[derive(Clone, Copy)]
pub enum Ty {
    Prim(&'static str),
    Class(TypeId),
    /// Written as-is, no binding behind it
    Unresolved(&'static str),
}

struct FieldSpec {
    modifiers: Vec<Modifier>,
    ty: Ty,
    name: String,
}

struct MethodSpec {
    modifiers: Vec<Modifier>,
    ret: Option<Ty>,
    name: String,
    body: String,
}

pub struct UnitBuilder {
    pub table: BindingTable,
    package: Option<String>,
    imports: Vec<(String, bool, bool)>,
    class_name: String,
    class_modifiers: Vec<Modifier>,
    extends: Option<TypeId>,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
    string_id: TypeId,
}

impl UnitBuilder {
    pub fn new(class_name: &str) -> Self {
        let mut table = BindingTable::new();
        let string_id =
            table.add_type(TypeBinding::class("java.lang", "String", Modifiers::PUBLIC));
        Self {
            table,
            package: None,
            imports: Vec::new(),
            class_name: class_name.to_string(),
            class_modifiers: vec![Modifier::Public],
            extends: None,
            fields: Vec::new(),
            methods: Vec::new(),
            string_id,
        }
    }

    pub fn string_type(&self) -> TypeId {
        self.string_id
    }

    pub fn package(mut self, name: &str) -> Self {
        self.package = Some(name.to_string());
        self
    }

    pub fn import(mut self, name: &str) -> Self {
        self.imports.push((name.to_string(), false, false));
        self
    }

    pub fn import_on_demand(mut self, package: &str) -> Self {
        self.imports.push((package.to_string(), false, true));
        self
    }

    pub fn extends(mut self, superclass: TypeId) -> Self {
        self.extends = Some(superclass);
        self
    }

    pub fn field(mut self, ty: Ty, name: &str) -> Self {
        self.fields.push(FieldSpec { modifiers: Vec::new(), ty, name: name.to_string() });
        self
    }

    pub fn static_field(mut self, ty: Ty, name: &str) -> Self {
        self.fields.push(FieldSpec {
            modifiers: vec![Modifier::Static],
            ty,
            name: name.to_string(),
        });
        self
    }

    pub fn method(mut self, ret: Option<Ty>, name: &str, body: &str) -> Self {
        self.methods.push(MethodSpec {
            modifiers: vec![Modifier::Public],
            ret,
            name: name.to_string(),
            body: body.to_string(),
        });
        self
    }

    pub fn build(mut self) -> Unit {
        let mut src = String::new();

        let package_decl = self.package.clone().map(|name| {
            let start = src.len();
            let text = format!("package {name};");
            src.push_str(&text);
            let span = Span::from_offsets(start, src.len());
            src.push_str("\n\n");
            PackageDecl { name, span }
        });

        let mut import_decls = Vec::new();
        for (name, is_static, is_wildcard) in &self.imports {
            let start = src.len();
            let rendered = match (is_static, is_wildcard) {
                (true, _) => format!("import static {name};"),
                (false, true) => format!("import {name}.*;"),
                (false, false) => format!("import {name};"),
            };
            src.push_str(&rendered);
            import_decls.push(ImportDecl {
                name: name.clone(),
                is_static: *is_static,
                is_wildcard: *is_wildcard,
                span: Span::from_offsets(start, src.len()),
            });
            src.push('\n');
        }
        if !import_decls.is_empty() {
            src.push('\n');
        }

        let package_name = self.package.clone().unwrap_or_default();
        let class_id = self.table.add_type(TypeBinding {
            superclass: self.extends,
            ..TypeBinding::class(&package_name, &self.class_name, mod_bits(&self.class_modifiers))
        });

        let class_start = src.len();
        for modifier in &self.class_modifiers {
            src.push_str(&modifier.to_string());
            src.push(' ');
        }
        src.push_str("class ");
        src.push_str(&self.class_name);
        let extends_ref = self.extends.map(|id| {
            let name = self.table.type_binding(id).name.clone();
            src.push_str(" extends ");
            let start = src.len();
            src.push_str(&name);
            TypeRef {
                name,
                array_dims: 0,
                binding: Some(id),
                span: Span::from_offsets(start, src.len()),
            }
        });
        src.push_str(" {");
        let body_open = src.len() - 1;
        src.push('\n');

        let mut members = Vec::new();
        let fields = std::mem::take(&mut self.fields);
        for spec in fields {
            members.push(self.emit_field(&mut src, class_id, spec));
        }
        let methods = std::mem::take(&mut self.methods);
        for spec in methods {
            members.push(self.emit_method(&mut src, class_id, spec));
        }

        src.push('}');
        let body_close = src.len();
        src.push('\n');

        let class_decl = ClassDecl {
            modifiers: self.class_modifiers.clone(),
            name: self.class_name.clone(),
            extends: extends_ref,
            implements: Vec::new(),
            body: members,
            body_span: Span::from_offsets(body_open, body_close),
            binding: Some(class_id),
            span: Span::from_offsets(class_start, body_close),
        };

        let ast = Ast {
            package_decl,
            imports: import_decls,
            type_decls: vec![TypeDecl::Class(class_decl)],
            span: Span::from_offsets(0, src.len()),
        };
        Unit { source: src, ast, table: self.table, class_id }
    }

    fn emit_field(&mut self, src: &mut String, class_id: TypeId, spec: FieldSpec) -> ClassMember {
        src.push_str("    ");
        let start = src.len();
        for modifier in &spec.modifiers {
            src.push_str(&modifier.to_string());
            src.push(' ');
        }
        let ty_start = src.len();
        let ty_name = self.ty_name(spec.ty);
        src.push_str(&ty_name);
        let type_ref = TypeRef {
            name: ty_name,
            array_dims: 0,
            binding: self.ty_id(spec.ty),
            span: Span::from_offsets(ty_start, src.len()),
        };
        src.push(' ');
        src.push_str(&spec.name);
        src.push(';');
        let span = Span::from_offsets(start, src.len());
        src.push('\n');

        let binding = self.ty_use(spec.ty).map(|ty| {
            self.table.add_field(FieldBinding {
                name: spec.name.clone(),
                declaring: class_id,
                modifiers: mod_bits(&spec.modifiers),
                ty,
            })
        });
        ClassMember::Field(FieldDecl {
            modifiers: spec.modifiers,
            type_ref,
            name: spec.name,
            initializer: None,
            binding,
            span,
        })
    }

    fn emit_method(&mut self, src: &mut String, class_id: TypeId, spec: MethodSpec) -> ClassMember {
        src.push_str("    ");
        let start = src.len();
        for modifier in &spec.modifiers {
            src.push_str(&modifier.to_string());
            src.push(' ');
        }
        let return_type = spec.ret.map(|ty| {
            let ty_start = src.len();
            let name = self.ty_name(ty);
            src.push_str(&name);
            TypeRef {
                name,
                array_dims: 0,
                binding: self.ty_id(ty),
                span: Span::from_offsets(ty_start, src.len()),
            }
        });
        if return_type.is_none() {
            src.push_str("void");
        }
        src.push(' ');
        src.push_str(&spec.name);
        src.push_str("() {");
        let block_open = src.len() - 1;
        src.push('\n');
        src.push_str("        ");
        src.push_str(&spec.body);
        src.push('\n');
        src.push_str("    }");
        let end = src.len();
        src.push('\n');

        let ret_use = match spec.ret {
            Some(ty) => self.ty_use(ty),
            None => Some(TypeUse::of(self.table.void_type())),
        };
        let binding = ret_use.map(|ret| {
            self.table.add_method(MethodBinding {
                name: spec.name.clone(),
                declaring: class_id,
                modifiers: mod_bits(&spec.modifiers),
                params: Vec::new(),
                param_names: Vec::new(),
                return_type: ret,
                is_constructor: false,
                is_varargs: false,
            })
        });
        ClassMember::Method(MethodDecl {
            modifiers: spec.modifiers,
            return_type,
            name: spec.name,
            parameters: Vec::new(),
            body: Some(Block { statements: Vec::new(), span: Span::from_offsets(block_open, end) }),
            doc_comment: None,
            binding,
            span: Span::from_offsets(start, end),
        })
    }

    fn ty_name(&self, ty: Ty) -> String {
        match ty {
            Ty::Prim(name) | Ty::Unresolved(name) => name.to_string(),
            Ty::Class(id) => self.table.type_binding(id).name.clone(),
        }
    }

    fn ty_id(&self, ty: Ty) -> Option<TypeId> {
        match ty {
            Ty::Prim(name) => Some(self.table.primitive(name)),
            Ty::Class(id) => Some(id),
            Ty::Unresolved(_) => None,
        }
    }

    fn ty_use(&self, ty: Ty) -> Option<TypeUse> {
        self.ty_id(ty).map(TypeUse::of)
    }
}

fn mod_bits(modifiers: &[Modifier]) -> Modifiers {
    let mut bits = Modifiers::NONE;
    for modifier in modifiers {
        bits = bits.with(match modifier {
            Modifier::Public => Modifiers::PUBLIC,
            Modifier::Protected => Modifiers::PROTECTED,
            Modifier::Private => Modifiers::PRIVATE,
            Modifier::Abstract => Modifiers::ABSTRACT,
            Modifier::Static => Modifiers::STATIC,
            Modifier::Final => Modifiers::FINAL,
            Modifier::Native => Modifiers::NATIVE,
            Modifier::Synchronized => Modifiers::SYNCHRONIZED,
            Modifier::Default => Modifiers::NONE,
        });
    }
    bits
}
