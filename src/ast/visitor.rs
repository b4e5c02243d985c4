use super::nodes::*;
use super::Ast;

/// AST visitor trait for traversing the tree
///
/// Every hook defaults to the structural walk below, so implementations only
/// override the nodes they care about and still see the whole subtree.
pub trait AstVisitor: Sized {
    fn visit_ast(&mut self, ast: &Ast) {
        walk_ast(self, ast)
    }

    fn visit_package_decl(&mut self, _package: &PackageDecl) {}

    fn visit_import_decl(&mut self, _import: &ImportDecl) {}

    fn visit_type_decl(&mut self, type_decl: &TypeDecl) {
        walk_type_decl(self, type_decl)
    }

    fn visit_class_decl(&mut self, class: &ClassDecl) {
        walk_class_decl(self, class)
    }

    fn visit_interface_decl(&mut self, interface: &InterfaceDecl) {
        walk_interface_decl(self, interface)
    }

    fn visit_class_member(&mut self, member: &ClassMember) {
        walk_class_member(self, member)
    }

    fn visit_field_decl(&mut self, field: &FieldDecl) {
        walk_field_decl(self, field)
    }

    fn visit_method_decl(&mut self, method: &MethodDecl) {
        walk_method_decl(self, method)
    }

    fn visit_constructor_decl(&mut self, constructor: &ConstructorDecl) {
        walk_constructor_decl(self, constructor)
    }

    fn visit_parameter(&mut self, parameter: &Parameter) {
        walk_parameter(self, parameter)
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr)
    }

    fn visit_type_ref(&mut self, _type_ref: &TypeRef) {}
}

pub fn walk_ast<V: AstVisitor>(v: &mut V, ast: &Ast) {
    if let Some(ref package) = ast.package_decl {
        v.visit_package_decl(package);
    }
    for import in &ast.imports {
        v.visit_import_decl(import);
    }
    for type_decl in &ast.type_decls {
        v.visit_type_decl(type_decl);
    }
}

pub fn walk_type_decl<V: AstVisitor>(v: &mut V, type_decl: &TypeDecl) {
    match type_decl {
        TypeDecl::Class(c) => v.visit_class_decl(c),
        TypeDecl::Interface(i) => v.visit_interface_decl(i),
    }
}

pub fn walk_class_decl<V: AstVisitor>(v: &mut V, class: &ClassDecl) {
    if let Some(ref extends) = class.extends {
        v.visit_type_ref(extends);
    }
    for implements in &class.implements {
        v.visit_type_ref(implements);
    }
    for member in &class.body {
        v.visit_class_member(member);
    }
}

pub fn walk_interface_decl<V: AstVisitor>(v: &mut V, interface: &InterfaceDecl) {
    for extends in &interface.extends {
        v.visit_type_ref(extends);
    }
    for member in &interface.body {
        v.visit_class_member(member);
    }
}

pub fn walk_class_member<V: AstVisitor>(v: &mut V, member: &ClassMember) {
    match member {
        ClassMember::Field(f) => v.visit_field_decl(f),
        ClassMember::Method(m) => v.visit_method_decl(m),
        ClassMember::Constructor(c) => v.visit_constructor_decl(c),
        ClassMember::Initializer(i) => v.visit_block(&i.body),
        ClassMember::Type(t) => v.visit_type_decl(t),
        ClassMember::Placeholder(_) => {}
    }
}

pub fn walk_field_decl<V: AstVisitor>(v: &mut V, field: &FieldDecl) {
    v.visit_type_ref(&field.type_ref);
    if let Some(ref init) = field.initializer {
        v.visit_expr(init);
    }
}

pub fn walk_method_decl<V: AstVisitor>(v: &mut V, method: &MethodDecl) {
    if let Some(ref ret) = method.return_type {
        v.visit_type_ref(ret);
    }
    for param in &method.parameters {
        v.visit_parameter(param);
    }
    if let Some(ref body) = method.body {
        v.visit_block(body);
    }
}

pub fn walk_constructor_decl<V: AstVisitor>(v: &mut V, constructor: &ConstructorDecl) {
    for param in &constructor.parameters {
        v.visit_parameter(param);
    }
    v.visit_block(&constructor.body);
}

pub fn walk_parameter<V: AstVisitor>(v: &mut V, parameter: &Parameter) {
    v.visit_type_ref(&parameter.type_ref);
}

pub fn walk_block<V: AstVisitor>(v: &mut V, block: &Block) {
    for stmt in &block.statements {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: AstVisitor>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expression(s) => v.visit_expr(&s.expr),
        Stmt::LocalVar(s) => {
            v.visit_type_ref(&s.type_ref);
            for var in &s.variables {
                if let Some(ref init) = var.initializer {
                    v.visit_expr(init);
                }
            }
        }
        Stmt::If(s) => {
            v.visit_expr(&s.condition);
            v.visit_stmt(&s.then_branch);
            if let Some(ref else_branch) = s.else_branch {
                v.visit_stmt(else_branch);
            }
        }
        Stmt::While(s) => {
            v.visit_expr(&s.condition);
            v.visit_stmt(&s.body);
        }
        Stmt::For(s) => {
            for init in &s.init {
                v.visit_stmt(init);
            }
            if let Some(ref cond) = s.condition {
                v.visit_expr(cond);
            }
            for update in &s.update {
                v.visit_expr(&update.expr);
            }
            v.visit_stmt(&s.body);
        }
        Stmt::Return(s) => {
            if let Some(ref value) = s.value {
                v.visit_expr(value);
            }
        }
        Stmt::Throw(s) => v.visit_expr(&s.expr),
        Stmt::Block(b) => v.visit_block(b),
        Stmt::Placeholder(_) | Stmt::Empty => {}
    }
}

pub fn walk_expr<V: AstVisitor>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) => {}
        Expr::Binary(e) => {
            v.visit_expr(&e.left);
            v.visit_expr(&e.right);
        }
        Expr::Unary(e) => v.visit_expr(&e.operand),
        Expr::Assignment(e) => {
            v.visit_expr(&e.target);
            v.visit_expr(&e.value);
        }
        Expr::MethodCall(e) => {
            if let Some(ref target) = e.target {
                v.visit_expr(target);
            }
            for arg in &e.arguments {
                v.visit_expr(arg);
            }
        }
        Expr::FieldAccess(e) => {
            if let Some(ref target) = e.target {
                v.visit_expr(target);
            }
        }
        Expr::ArrayAccess(e) => {
            v.visit_expr(&e.array);
            v.visit_expr(&e.index);
        }
        Expr::Cast(e) => {
            v.visit_type_ref(&e.target_type);
            v.visit_expr(&e.expr);
        }
        Expr::Conditional(e) => {
            v.visit_expr(&e.condition);
            v.visit_expr(&e.then_expr);
            v.visit_expr(&e.else_expr);
        }
        Expr::New(e) => {
            v.visit_type_ref(&e.target_type);
            for arg in &e.arguments {
                v.visit_expr(arg);
            }
            if let Some(ref body) = e.anonymous_body {
                v.visit_class_decl(body);
            }
        }
        Expr::Parenthesized(e) => v.visit_expr(e),
    }
}
