//! Operation facades
//!
//! One entry point per user-visible command. Each facade validates its
//! target, resolves the body-declaration list to edit, drives scope
//! analysis, import rewriting, stub synthesis and the tree rewriter, and
//! merges everything into a single text edit. Application and persistence
//! go through the injected document; nothing is applied when an operation
//! fails or is cancelled.

pub mod accessors;
pub mod add_import;
pub mod constructors;
pub mod delegates;
pub mod implement;
pub mod organize_imports;
pub mod sort_members;

pub use accessors::{AccessorOutcome, AccessorRequest, GenerateAccessorsOperation};
pub use add_import::{AddImportOperation, AddImportOutcome};
pub use constructors::{ConstructorOutcome, ConstructorRequest, GenerateConstructorsOperation};
pub use delegates::{AddDelegateMethodsOperation, DelegateOutcome, DelegateRequest};
pub use implement::{ImplementMethodsOperation, ImplementOutcome, ImplementRequest};
pub use organize_imports::{OrganizeImportsOperation, OrganizeOutcome};
pub use sort_members::{SortMembersOperation, SortOutcome};

use crate::ast::*;
use crate::edit::TextEdit;
use crate::error::{Error, Result};
use crate::project::{Cancel, Document};

/// How a facade identifies the type declaration it edits
#[derive(Debug, Clone)]
pub enum TargetRef {
    /// A named (top-level or nested) class
    Named(String),
    /// The anonymous class body enclosing the given offset
    AnonymousAt(usize),
}

/// Resolve a target reference to the class declaration owning the body list
pub fn resolve_target<'t>(ast: &'t Ast, target: &TargetRef) -> Result<&'t ClassDecl> {
    match target {
        TargetRef::Named(name) => ast
            .find_class(name)
            .ok_or_else(|| Error::structural(format!("type '{name}' not found in unit"))),
        TargetRef::AnonymousAt(offset) => {
            let mut finder = AnonymousBodyFinder { offset: *offset, found: None };
            finder.visit_ast(ast);
            finder
                .found
                .ok_or_else(|| Error::structural(format!("no anonymous class body at {offset}")))
        }
    }
}

/// Poll the cancellation handle; one call per synthesized member
pub fn check_cancelled(cancel: &dyn Cancel) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    Ok(())
}

/// Apply a finished edit through the document, optionally persisting it
pub fn apply_edit(document: &mut dyn Document, edit: &TextEdit, save: bool) -> Result<()> {
    document.apply(edit)?;
    if save {
        document.save()?;
    }
    Ok(())
}

/// Index of a directly declared method with the given name, placeholders
/// and other member kinds ignored
pub fn find_method_index(body: &[ClassMember], name: &str) -> Option<usize> {
    body.iter().position(|member| match member {
        ClassMember::Method(m) => m.name == name,
        _ => false,
    })
}

#[inline]
pub(crate) fn debug_log(msg: impl AsRef<str>) {
    if std::env::var("TOLR_DEBUG").is_ok() {
        eprintln!("[tolr-debug] {}", msg.as_ref());
    }
}

struct AnonymousBodyFinder<'t> {
    offset: usize,
    found: Option<&'t ClassDecl>,
}

impl<'t> AnonymousBodyFinder<'t> {
    fn visit_ast(&mut self, ast: &'t Ast) {
        for decl in &ast.type_decls {
            self.visit_type_decl(decl);
        }
    }

    fn visit_type_decl(&mut self, decl: &'t TypeDecl) {
        let body = match decl {
            TypeDecl::Class(c) => &c.body,
            TypeDecl::Interface(i) => &i.body,
        };
        for member in body {
            self.visit_member(member);
        }
    }

    fn visit_member(&mut self, member: &'t ClassMember) {
        match member {
            ClassMember::Field(f) => {
                if let Some(ref init) = f.initializer {
                    self.visit_expr(init);
                }
            }
            ClassMember::Method(m) => {
                if let Some(ref body) = m.body {
                    self.visit_block(body);
                }
            }
            ClassMember::Constructor(c) => self.visit_block(&c.body),
            ClassMember::Initializer(i) => self.visit_block(&i.body),
            ClassMember::Type(t) => self.visit_type_decl(t),
            ClassMember::Placeholder(_) => {}
        }
    }

    fn visit_block(&mut self, block: &'t Block) {
        for stmt in &block.statements {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &'t Stmt) {
        match stmt {
            Stmt::Expression(s) => self.visit_expr(&s.expr),
            Stmt::LocalVar(s) => {
                for var in &s.variables {
                    if let Some(ref init) = var.initializer {
                        self.visit_expr(init);
                    }
                }
            }
            Stmt::If(s) => {
                self.visit_expr(&s.condition);
                self.visit_stmt(&s.then_branch);
                if let Some(ref e) = s.else_branch {
                    self.visit_stmt(e);
                }
            }
            Stmt::While(s) => self.visit_stmt(&s.body),
            Stmt::For(s) => self.visit_stmt(&s.body),
            Stmt::Return(s) => {
                if let Some(ref value) = s.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Throw(s) => self.visit_expr(&s.expr),
            Stmt::Block(b) => self.visit_block(b),
            Stmt::Placeholder(_) | Stmt::Empty => {}
        }
    }

    fn visit_expr(&mut self, expr: &'t Expr) {
        if let Expr::New(new) = expr {
            if let Some(ref body) = new.anonymous_body {
                if body.span.contains_offset(self.offset) {
                    // keep descending: the innermost enclosing body wins
                    self.found = Some(&**body);
                    for member in &body.body {
                        self.visit_member(member);
                    }
                    return;
                }
            }
        }
        match expr {
            Expr::Binary(e) => {
                self.visit_expr(&e.left);
                self.visit_expr(&e.right);
            }
            Expr::Unary(e) => self.visit_expr(&e.operand),
            Expr::Assignment(e) => {
                self.visit_expr(&e.target);
                self.visit_expr(&e.value);
            }
            Expr::MethodCall(e) => {
                if let Some(ref target) = e.target {
                    self.visit_expr(target);
                }
                for arg in &e.arguments {
                    self.visit_expr(arg);
                }
            }
            Expr::FieldAccess(e) => {
                if let Some(ref target) = e.target {
                    self.visit_expr(target);
                }
            }
            Expr::ArrayAccess(e) => {
                self.visit_expr(&e.array);
                self.visit_expr(&e.index);
            }
            Expr::Cast(e) => self.visit_expr(&e.expr),
            Expr::Conditional(e) => {
                self.visit_expr(&e.condition);
                self.visit_expr(&e.then_expr);
                self.visit_expr(&e.else_expr);
            }
            Expr::New(e) => {
                for arg in &e.arguments {
                    self.visit_expr(arg);
                }
            }
            Expr::Parenthesized(e) => self.visit_expr(e),
            Expr::Literal(_) | Expr::Identifier(_) => {}
        }
    }
}
