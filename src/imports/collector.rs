//! Import reference collection
//!
//! Restricted traversal that finds every name a file's import list must
//! account for. Import and package declarations themselves are never
//! descended into. A name whose binding could not be resolved is treated as
//! a type reference, which errs on the side of producing an import.

use crate::ast::*;
use crate::binding::{Binding, BindingTable, TypeId};
use crate::scope::{self, ScopeAnalyzer};

/// A reference that may need a same-name (single) import
#[derive(Debug, Clone)]
pub struct TypeRefCandidate {
    /// Leftmost simple name of the reference; the unit imports are keyed by
    pub name: String,
    pub span: Span,
    pub binding: Option<TypeId>,
}

/// A reference that may need a static import
#[derive(Debug, Clone)]
pub struct StaticRefCandidate {
    pub name: String,
    pub span: Span,
    pub member: Binding,
}

/// Collect type and static-member references from the unit, optionally
/// restricted to references intersecting `region`
pub fn collect_references(
    ast: &Ast,
    table: &BindingTable,
    region: Option<Span>,
) -> (Vec<TypeRefCandidate>, Vec<StaticRefCandidate>) {
    let mut collector = Collector {
        table,
        analyzer: ScopeAnalyzer::new(ast, table),
        region,
        type_refs: Vec::new(),
        static_refs: Vec::new(),
    };
    collector.visit_ast(ast);
    (collector.type_refs, collector.static_refs)
}

struct Collector<'a> {
    table: &'a BindingTable,
    analyzer: ScopeAnalyzer<'a>,
    region: Option<Span>,
    type_refs: Vec<TypeRefCandidate>,
    static_refs: Vec<StaticRefCandidate>,
}

impl<'a> Collector<'a> {
    fn in_region(&self, span: Span) -> bool {
        match self.region {
            Some(region) => region.intersects(span),
            None => true,
        }
    }

    fn add_type_ref(&mut self, name: &str, span: Span, binding: Option<TypeId>) {
        if !self.in_region(span) {
            return;
        }
        // the leftmost segment is what an import declaration can introduce
        let simple = name.split('.').next().unwrap_or("");
        if simple.is_empty() {
            return;
        }
        self.type_refs.push(TypeRefCandidate { name: simple.to_string(), span, binding });
    }

    /// A static reference qualifies only when the member really is static,
    /// the reference is a use (not the declaration itself), the declaring
    /// type could be named in an import, and no unqualified in-scope
    /// declaration already provides the name
    fn add_static_ref(&mut self, name: &str, span: Span, member: Binding) {
        if !self.in_region(span) {
            return;
        }
        let (modifiers, declaring) = match member {
            Binding::Field(id) => {
                let f = self.table.field(id);
                (f.modifiers, f.declaring)
            }
            Binding::Method(id) => {
                let m = self.table.method(id);
                if m.is_constructor {
                    return;
                }
                (m.modifiers, m.declaring)
            }
            _ => return,
        };
        if !modifiers.is_static() {
            return;
        }
        let declaring_binding = self.table.type_binding(declaring);
        if declaring_binding.is_local || declaring_binding.is_anonymous {
            return;
        }
        if self.analyzer.is_declared_in_scope(
            name,
            span.start.offset,
            scope::METHODS | scope::VARIABLES,
        ) {
            return;
        }
        self.static_refs.push(StaticRefCandidate { name: name.to_string(), span, member });
    }
}

impl<'a> AstVisitor for Collector<'a> {
    // never descend into the import list or the package declaration
    fn visit_import_decl(&mut self, _import: &ImportDecl) {}

    fn visit_package_decl(&mut self, _package: &PackageDecl) {}

    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        self.add_type_ref(&type_ref.name, type_ref.span, type_ref.binding);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(id) => {
                if let Some(Binding::Type(ty)) = id.binding {
                    self.add_type_ref(&id.name, id.span, Some(ty));
                }
            }
            Expr::FieldAccess(fa) => {
                let handled =
                    self.classify_qualified(fa.target.as_deref(), &fa.name, fa.span, fa.binding);
                if !handled {
                    if let Some(ref target) = fa.target {
                        self.visit_expr(target);
                    }
                }
            }
            Expr::MethodCall(mc) => {
                let member = mc.binding.map(Binding::Method);
                let handled =
                    self.classify_qualified(mc.target.as_deref(), &mc.name, mc.span, member);
                if !handled {
                    if let Some(ref target) = mc.target {
                        self.visit_expr(target);
                    }
                }
                for arg in &mc.arguments {
                    self.visit_expr(arg);
                }
            }
            _ => walk_expr(self, expr),
        }
    }
}

impl<'a> Collector<'a> {
    /// Member access `Qualifier.name`: decide whether the qualifier is a
    /// type reference, and whether the member itself is a static-import
    /// candidate. Returns true when the qualifier was a simple name and has
    /// been fully classified here.
    fn classify_qualified(
        &mut self,
        target: Option<&Expr>,
        name: &str,
        span: Span,
        member: Option<Binding>,
    ) -> bool {
        let Some(Expr::Identifier(qualifier)) = target else {
            return false;
        };
        match qualifier.binding {
            Some(Binding::Type(ty)) => {
                self.add_type_ref(&qualifier.name, qualifier.span, Some(ty));
                if let Some(member) = member {
                    self.add_static_ref(name, span, member);
                }
            }
            // qualifier is a value; nothing to import
            Some(_) => {}
            // unresolved qualifier: bias toward a type reference
            None => self.add_type_ref(&qualifier.name, qualifier.span, None),
        }
        true
    }
}
