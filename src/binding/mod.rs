//! Resolved-symbol model
//!
//! Bindings describe the program symbols behind names in the tree: types,
//! methods, fields and variables. They are produced by the external
//! parser/resolver, stored in one arena per resolution session, and treated
//! as read-only by every engine component. Identity is the arena id; the
//! `key` string gives a stable representation for cross-session comparison.

use crate::consts;
use std::fmt;

/// Modifier bit set, values aligned with class-file access flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers(pub u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const PUBLIC: Modifiers = Modifiers(0x0001);
    pub const PRIVATE: Modifiers = Modifiers(0x0002);
    pub const PROTECTED: Modifiers = Modifiers(0x0004);
    pub const STATIC: Modifiers = Modifiers(0x0008);
    pub const FINAL: Modifiers = Modifiers(0x0010);
    pub const SYNCHRONIZED: Modifiers = Modifiers(0x0020);
    pub const NATIVE: Modifiers = Modifiers(0x0100);
    pub const ABSTRACT: Modifiers = Modifiers(0x0400);

    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn with(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    pub fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    pub fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    pub fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    pub fn is_protected(self) -> bool {
        self.contains(Self::PROTECTED)
    }

    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    pub fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    /// Convert to the AST modifier list, visibility first
    pub fn to_ast(self) -> Vec<crate::ast::Modifier> {
        use crate::ast::Modifier as M;
        let mut out = Vec::new();
        if self.is_public() {
            out.push(M::Public);
        }
        if self.is_protected() {
            out.push(M::Protected);
        }
        if self.is_private() {
            out.push(M::Private);
        }
        if self.is_abstract() {
            out.push(M::Abstract);
        }
        if self.is_static() {
            out.push(M::Static);
        }
        if self.is_final() {
            out.push(M::Final);
        }
        if self.contains(Self::NATIVE) {
            out.push(M::Native);
        }
        if self.contains(Self::SYNCHRONIZED) {
            out.push(M::Synchronized);
        }
        out
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// Tagged union over the binding arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Type(TypeId),
    Method(MethodId),
    Field(FieldId),
    Variable(VarId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Primitive,
}

/// A use of a type, carrying array dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeUse {
    pub id: TypeId,
    pub dims: usize,
}

impl TypeUse {
    pub fn of(id: TypeId) -> Self {
        Self { id, dims: 0 }
    }

    pub fn array(id: TypeId, dims: usize) -> Self {
        Self { id, dims }
    }
}

#[derive(Debug, Clone)]
pub struct TypeBinding {
    pub name: String,
    pub package: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub declaring: Option<TypeId>,
    pub superclass: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub methods: Vec<MethodId>,
    pub fields: Vec<FieldId>,
    /// Declared inside a method body
    pub is_local: bool,
    pub is_anonymous: bool,
    /// The resolver could not fully resolve this type; never a safe import target
    pub is_recovered: bool,
}

impl TypeBinding {
    pub fn class(package: &str, name: &str, modifiers: Modifiers) -> Self {
        Self {
            name: name.to_string(),
            package: package.to_string(),
            kind: TypeKind::Class,
            modifiers,
            declaring: None,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            is_local: false,
            is_anonymous: false,
            is_recovered: false,
        }
    }

    pub fn interface(package: &str, name: &str, modifiers: Modifiers) -> Self {
        Self { kind: TypeKind::Interface, ..Self::class(package, name, modifiers) }
    }

    fn primitive(name: &str) -> Self {
        Self {
            kind: TypeKind::Primitive,
            modifiers: Modifiers::PUBLIC,
            ..Self::class("", name, Modifiers::NONE)
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.declaring.is_none() && !self.is_local && !self.is_anonymous
    }

    pub fn is_member(&self) -> bool {
        self.declaring.is_some() && !self.is_local && !self.is_anonymous
    }
}

#[derive(Debug, Clone)]
pub struct MethodBinding {
    pub name: String,
    pub declaring: TypeId,
    pub modifiers: Modifiers,
    pub params: Vec<TypeUse>,
    /// Parameter names as declared, when the resolver knows them; may be empty
    pub param_names: Vec<String>,
    pub return_type: TypeUse,
    pub is_constructor: bool,
    pub is_varargs: bool,
}

#[derive(Debug, Clone)]
pub struct FieldBinding {
    pub name: String,
    pub declaring: TypeId,
    pub modifiers: Modifiers,
    pub ty: TypeUse,
}

#[derive(Debug, Clone)]
pub struct VariableBinding {
    pub name: String,
    pub ty: Option<TypeUse>,
    pub is_parameter: bool,
}

/// Arena of bindings for one resolution session
#[derive(Debug, Default)]
pub struct BindingTable {
    types: Vec<TypeBinding>,
    methods: Vec<MethodBinding>,
    fields: Vec<FieldBinding>,
    variables: Vec<VariableBinding>,
}

impl BindingTable {
    /// Create a table with the primitive types pre-registered
    pub fn new() -> Self {
        let mut table = Self::default();
        for name in consts::PRIMITIVE_TYPES {
            table.types.push(TypeBinding::primitive(name));
        }
        table
    }

    /// Id of a pre-registered primitive type
    pub fn primitive(&self, name: &str) -> TypeId {
        let idx = consts::PRIMITIVE_TYPES
            .iter()
            .position(|p| *p == name)
            .unwrap_or_else(|| panic!("not a primitive type: {name}"));
        TypeId(idx)
    }

    pub fn void_type(&self) -> TypeId {
        self.primitive("void")
    }

    pub fn add_type(&mut self, binding: TypeBinding) -> TypeId {
        let id = TypeId(self.types.len());
        if let Some(declaring) = binding.declaring {
            debug_assert!(declaring.0 < self.types.len());
        }
        self.types.push(binding);
        id
    }

    /// Register a method and link it into its declaring type
    pub fn add_method(&mut self, binding: MethodBinding) -> MethodId {
        let id = MethodId(self.methods.len());
        let declaring = binding.declaring;
        self.methods.push(binding);
        self.types[declaring.0].methods.push(id);
        id
    }

    /// Register a field and link it into its declaring type
    pub fn add_field(&mut self, binding: FieldBinding) -> FieldId {
        let id = FieldId(self.fields.len());
        let declaring = binding.declaring;
        self.fields.push(binding);
        self.types[declaring.0].fields.push(id);
        id
    }

    pub fn add_variable(&mut self, binding: VariableBinding) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(binding);
        id
    }

    pub fn type_binding(&self, id: TypeId) -> &TypeBinding {
        &self.types[id.0]
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn type_binding_mut(&mut self, id: TypeId) -> &mut TypeBinding {
        &mut self.types[id.0]
    }

    pub fn method(&self, id: MethodId) -> &MethodBinding {
        &self.methods[id.0]
    }

    pub fn field(&self, id: FieldId) -> &FieldBinding {
        &self.fields[id.0]
    }

    pub fn variable(&self, id: VarId) -> &VariableBinding {
        &self.variables[id.0]
    }

    /// Fully qualified name of a type, `pkg.Outer.Inner` for members
    pub fn qualified_name(&self, id: TypeId) -> String {
        let binding = self.type_binding(id);
        match binding.declaring {
            Some(outer) => format!("{}.{}", self.qualified_name(outer), binding.name),
            None if binding.package.is_empty() => binding.name.clone(),
            None => format!("{}.{}", binding.package, binding.name),
        }
    }

    /// Simple name of any binding
    pub fn name_of(&self, binding: Binding) -> &str {
        match binding {
            Binding::Type(id) => &self.type_binding(id).name,
            Binding::Method(id) => &self.method(id).name,
            Binding::Field(id) => &self.field(id).name,
            Binding::Variable(id) => &self.variable(id).name,
        }
    }

    pub fn modifiers_of(&self, binding: Binding) -> Modifiers {
        match binding {
            Binding::Type(id) => self.type_binding(id).modifiers,
            Binding::Method(id) => self.method(id).modifiers,
            Binding::Field(id) => self.field(id).modifiers,
            Binding::Variable(_) => Modifiers::NONE,
        }
    }

    /// Stable key string usable for cross-table comparison
    pub fn key(&self, binding: Binding) -> String {
        match binding {
            Binding::Type(id) => self.qualified_name(id),
            Binding::Method(id) => {
                let m = self.method(id);
                format!(
                    "{}#{}({})",
                    self.qualified_name(m.declaring),
                    m.name,
                    self.signature_string(&m.params)
                )
            }
            Binding::Field(id) => {
                let f = self.field(id);
                format!("{}#{}", self.qualified_name(f.declaring), f.name)
            }
            Binding::Variable(id) => format!("#{}", self.variable(id).name),
        }
    }

    /// Qualified source name of a type use, e.g. `java.util.List[]`
    pub fn type_use_name(&self, use_: TypeUse) -> String {
        let mut name = self.qualified_name(use_.id);
        for _ in 0..use_.dims {
            name.push_str("[]");
        }
        name
    }

    pub fn is_void(&self, use_: TypeUse) -> bool {
        use_.dims == 0 && use_.id == self.void_type()
    }

    pub fn is_boolean(&self, use_: TypeUse) -> bool {
        use_.dims == 0 && use_.id == self.primitive("boolean")
    }

    fn signature_string(&self, params: &[TypeUse]) -> String {
        let names: Vec<String> = params.iter().map(|p| self.type_use_name(*p)).collect();
        names.join(",")
    }

    /// Override-equivalence: same name and same erased parameter type list
    pub fn overrides(&self, a: MethodId, b: MethodId) -> bool {
        let (ma, mb) = (self.method(a), self.method(b));
        ma.name == mb.name
            && ma.params.len() == mb.params.len()
            && ma.params.iter().zip(&mb.params).all(|(x, y)| x == y)
    }

    /// Signature-equivalence for constructors (name is the type name, so
    /// parameter lists decide)
    pub fn same_constructor_signature(&self, a: MethodId, b: MethodId) -> bool {
        let (ma, mb) = (self.method(a), self.method(b));
        ma.params.len() == mb.params.len() && ma.params.iter().zip(&mb.params).all(|(x, y)| x == y)
    }

    /// Superclass chain of a type, nearest first, cycle-capped
    pub fn superclass_chain(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = self.type_binding(id).superclass;
        let mut steps = 0usize;
        while let Some(next) = current {
            if steps >= consts::HIERARCHY_MAX_STEPS {
                break;
            }
            chain.push(next);
            current = self.type_binding(next).superclass;
            steps += 1;
        }
        chain
    }

    /// All interfaces implemented by a type, transitively through both the
    /// interface-extends graph and the superclass chain
    pub fn all_interfaces(&self, id: TypeId) -> Vec<TypeId> {
        let mut out = Vec::new();
        let mut work: Vec<TypeId> = vec![id];
        work.extend(self.superclass_chain(id));
        let mut steps = 0usize;
        while let Some(current) = work.pop() {
            if steps >= consts::HIERARCHY_MAX_STEPS {
                break;
            }
            steps += 1;
            for iface in &self.type_binding(current).interfaces {
                if !out.contains(iface) {
                    out.push(*iface);
                    work.push(*iface);
                }
            }
        }
        out
    }

    /// Whether a member with the given modifiers declared in `declaring` is
    /// accessible from code in `from_package`, optionally from within
    /// `from_type` or one of its subclasses
    pub fn is_member_visible(
        &self,
        modifiers: Modifiers,
        declaring: TypeId,
        from_package: &str,
        from_type: Option<TypeId>,
    ) -> bool {
        if modifiers.is_public() {
            return true;
        }
        if modifiers.is_private() {
            return from_type == Some(declaring);
        }
        // protected or package-private: same package always works
        if self.type_binding(declaring).package == from_package {
            return true;
        }
        // protected additionally works from subclasses
        if modifiers.is_protected() {
            if let Some(from) = from_type {
                return from == declaring || self.superclass_chain(from).contains(&declaring);
            }
        }
        false
    }

    /// Whether a super constructor is callable from a subtype in `from_package`
    pub fn is_visible_in_hierarchy(&self, method: MethodId, from_package: &str) -> bool {
        let m = self.method(method);
        if m.modifiers.is_public() || m.modifiers.is_protected() {
            return true;
        }
        if m.modifiers.is_private() {
            return false;
        }
        self.type_binding(m.declaring).package == from_package
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.to_ast().iter().map(|m| m.to_string()).collect();
        f.write_str(&parts.join(" "))
    }
}
