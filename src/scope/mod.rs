//! Scope analysis
//!
//! Pure queries over (tree, binding table): which declarations are visible
//! at a given offset, with standard shadowing (an inner declaration of a
//! simple name hides outer ones of the same kind) and an optional
//! accessibility filter. Used by the import engine to decide whether a name
//! needs an import and whether adding one would collide.

use crate::ast::*;
use crate::binding::{Binding, BindingTable, TypeId};
use std::collections::HashSet;

/// Include type declarations in the result
pub const TYPES: u32 = 1;
/// Include methods in the result
pub const METHODS: u32 = 2;
/// Include variables, parameters and fields in the result
pub const VARIABLES: u32 = 4;
/// Filter out declarations not accessible from the query position
pub const CHECK_VISIBILITY: u32 = 8;

pub struct ScopeAnalyzer<'a> {
    ast: &'a Ast,
    table: &'a BindingTable,
}

/// Enclosing type declaration, ordinary or anonymous
#[derive(Clone, Copy)]
enum TypeScope<'a> {
    Class(&'a ClassDecl),
    Interface(&'a InterfaceDecl),
}

impl<'a> TypeScope<'a> {
    fn binding(&self) -> Option<TypeId> {
        match self {
            TypeScope::Class(c) => c.binding,
            TypeScope::Interface(i) => i.binding,
        }
    }
}

/// Everything enclosing one source offset, innermost first where it matters
struct ScopePath<'a> {
    types: Vec<TypeScope<'a>>,
    parameters: Vec<&'a Parameter>,
    locals: Vec<&'a VariableDeclarator>,
}

impl<'a> ScopeAnalyzer<'a> {
    pub fn new(ast: &'a Ast, table: &'a BindingTable) -> Self {
        Self { ast, table }
    }

    /// Collect the declarations visible at `offset`, restricted to the kinds
    /// in `flags`. Inner declarations shadow outer ones of the same kind.
    pub fn declarations_in_scope(&self, offset: usize, flags: u32) -> Vec<Binding> {
        let path = self.path_to(offset);
        let mut out = Vec::new();
        let mut seen_vars: HashSet<String> = HashSet::new();
        let mut seen_methods: HashSet<String> = HashSet::new();
        let mut seen_types: HashSet<String> = HashSet::new();

        if flags & VARIABLES != 0 {
            // innermost declarations first so they win the shadowing race
            for local in path.locals.iter().rev() {
                if seen_vars.insert(local.name.clone()) {
                    if let Some(binding) = local.binding {
                        out.push(binding);
                    }
                }
            }
            for param in &path.parameters {
                if seen_vars.insert(param.name.clone()) {
                    if let Some(binding) = param.binding {
                        out.push(binding);
                    }
                }
            }
        }

        let current_package = self.ast.package_name().to_string();
        // innermost enclosing type first
        for scope in path.types.iter().rev() {
            if let Some(type_id) = scope.binding() {
                self.collect_type_members(
                    type_id,
                    type_id,
                    &current_package,
                    flags,
                    &mut seen_vars,
                    &mut seen_methods,
                    &mut seen_types,
                    &mut out,
                );
            }
        }

        if flags & TYPES != 0 {
            for decl in &self.ast.type_decls {
                let (name, binding) = match decl {
                    TypeDecl::Class(c) => (&c.name, c.binding),
                    TypeDecl::Interface(i) => (&i.name, i.binding),
                };
                if let Some(id) = binding {
                    if seen_types.insert(name.clone()) {
                        out.push(Binding::Type(id));
                    }
                }
            }
        }
        out
    }

    /// True when any declaration of the given simple name is in scope
    pub fn is_declared_in_scope(&self, name: &str, offset: usize, flags: u32) -> bool {
        self.declarations_in_scope(offset, flags)
            .into_iter()
            .any(|b| self.table.name_of(b) == name)
    }

    /// The binding in scope under the given simple name, if any
    pub fn declaration_named(&self, name: &str, offset: usize, flags: u32) -> Option<Binding> {
        self.declarations_in_scope(offset, flags)
            .into_iter()
            .find(|b| self.table.name_of(b) == name)
    }

    #[allow(clippy::too_many_arguments)]
    fn collect_type_members(
        &self,
        start: TypeId,
        from_type: TypeId,
        current_package: &str,
        flags: u32,
        seen_vars: &mut HashSet<String>,
        seen_methods: &mut HashSet<String>,
        seen_types: &mut HashSet<String>,
        out: &mut Vec<Binding>,
    ) {
        let mut chain = vec![start];
        chain.extend(self.table.superclass_chain(start));
        chain.extend(self.table.all_interfaces(start));
        for type_id in chain {
            let binding = self.table.type_binding(type_id);
            if flags & VARIABLES != 0 {
                for &field in &binding.fields {
                    let f = self.table.field(field);
                    if flags & CHECK_VISIBILITY != 0
                        && !self.table.is_member_visible(
                            f.modifiers,
                            type_id,
                            current_package,
                            Some(from_type),
                        )
                    {
                        continue;
                    }
                    if seen_vars.insert(f.name.clone()) {
                        out.push(Binding::Field(field));
                    }
                }
            }
            if flags & METHODS != 0 {
                for &method in &binding.methods {
                    let m = self.table.method(method);
                    if m.is_constructor {
                        continue;
                    }
                    if flags & CHECK_VISIBILITY != 0
                        && !self.table.is_member_visible(
                            m.modifiers,
                            type_id,
                            current_package,
                            Some(from_type),
                        )
                    {
                        continue;
                    }
                    if seen_methods.insert(m.name.clone()) {
                        out.push(Binding::Method(method));
                    }
                }
            }
        }
        // member types declared directly on the enclosing type chain
        if flags & TYPES != 0 {
            let mut chain = vec![start];
            chain.extend(self.table.superclass_chain(start));
            for parent in chain {
                for candidate in self.all_type_ids() {
                    let b = self.table.type_binding(candidate);
                    if b.declaring == Some(parent) {
                        if flags & CHECK_VISIBILITY != 0
                            && !self.table.is_member_visible(
                                b.modifiers,
                                parent,
                                current_package,
                                Some(from_type),
                            )
                        {
                            continue;
                        }
                        if seen_types.insert(b.name.clone()) {
                            out.push(Binding::Type(candidate));
                        }
                    }
                }
            }
        }
    }

    fn all_type_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.table.type_count()).map(TypeId)
    }

    fn path_to(&self, offset: usize) -> ScopePath<'a> {
        let mut path = ScopePath { types: Vec::new(), parameters: Vec::new(), locals: Vec::new() };
        for decl in &self.ast.type_decls {
            self.descend_type(decl, offset, &mut path);
        }
        path
    }

    fn descend_type(&self, decl: &'a TypeDecl, offset: usize, path: &mut ScopePath<'a>) {
        match decl {
            TypeDecl::Class(c) => {
                if !c.span.contains_offset(offset) {
                    return;
                }
                path.types.push(TypeScope::Class(c));
                for member in &c.body {
                    self.descend_member(member, offset, path);
                }
            }
            TypeDecl::Interface(i) => {
                if !i.span.contains_offset(offset) {
                    return;
                }
                path.types.push(TypeScope::Interface(i));
                for member in &i.body {
                    self.descend_member(member, offset, path);
                }
            }
        }
    }

    fn descend_member(&self, member: &'a ClassMember, offset: usize, path: &mut ScopePath<'a>) {
        match member {
            ClassMember::Method(m) if m.span.contains_offset(offset) => {
                path.parameters.extend(m.parameters.iter());
                if let Some(ref body) = m.body {
                    self.descend_block(body, offset, path);
                }
            }
            ClassMember::Constructor(c) if c.span.contains_offset(offset) => {
                path.parameters.extend(c.parameters.iter());
                self.descend_block(&c.body, offset, path);
            }
            ClassMember::Initializer(i) if i.span.contains_offset(offset) => {
                self.descend_block(&i.body, offset, path);
            }
            ClassMember::Type(t) => self.descend_type(t, offset, path),
            _ => {}
        }
    }

    fn descend_block(&self, block: &'a Block, offset: usize, path: &mut ScopePath<'a>) {
        if !block.span.contains_offset(offset) && !block.span.is_empty() {
            return;
        }
        for stmt in &block.statements {
            self.descend_stmt(stmt, offset, path);
        }
    }

    fn descend_stmt(&self, stmt: &'a Stmt, offset: usize, path: &mut ScopePath<'a>) {
        match stmt {
            Stmt::LocalVar(decl) => {
                for var in &decl.variables {
                    if var.span.start.offset < offset {
                        path.locals.push(var);
                    }
                }
            }
            Stmt::Block(b) => self.descend_block(b, offset, path),
            Stmt::If(s) => {
                self.descend_stmt(&s.then_branch, offset, path);
                if let Some(ref e) = s.else_branch {
                    self.descend_stmt(e, offset, path);
                }
            }
            Stmt::While(s) => self.descend_stmt(&s.body, offset, path),
            Stmt::For(s) => {
                for init in &s.init {
                    self.descend_stmt(init, offset, path);
                }
                self.descend_stmt(&s.body, offset, path);
            }
            Stmt::Expression(s) => self.descend_expr(&s.expr, offset, path),
            _ => {}
        }
    }

    fn descend_expr(&self, expr: &'a Expr, offset: usize, path: &mut ScopePath<'a>) {
        // anonymous class bodies open a new type scope
        if let Expr::New(new) = expr {
            if let Some(ref body) = new.anonymous_body {
                if body.span.contains_offset(offset) {
                    path.types.push(TypeScope::Class(body));
                    for member in &body.body {
                        self.descend_member(member, offset, path);
                    }
                }
            }
        }
    }
}
