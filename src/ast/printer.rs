use super::nodes::*;

/// Renders synthesized declarations to source text
///
/// Only nodes the rewrite engine can insert need rendering; placeholder
/// nodes pass their text through with the indentation fixed up.
pub struct SourcePrinter {
    indent_unit: String,
    delimiter: String,
    output: String,
    indent_level: usize,
}

impl SourcePrinter {
    pub fn new(indent_unit: &str, delimiter: &str) -> Self {
        Self {
            indent_unit: indent_unit.to_string(),
            delimiter: delimiter.to_string(),
            output: String::new(),
            indent_level: 0,
        }
    }

    /// Render a class member at the given indentation level. The result has
    /// no trailing line delimiter.
    pub fn print_member(&mut self, member: &ClassMember, level: usize) -> String {
        self.output.clear();
        self.indent_level = level;
        self.write_member(member);
        std::mem::take(&mut self.output)
    }

    /// Render a statement at the given indentation level
    pub fn print_stmt(&mut self, stmt: &Stmt, level: usize) -> String {
        self.output.clear();
        self.indent_level = level;
        self.write_stmt(stmt);
        std::mem::take(&mut self.output)
    }

    /// Render an expression with no surrounding layout
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        self.output.clear();
        self.write_expr(expr);
        std::mem::take(&mut self.output)
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_unit);
        }
    }

    fn newline(&mut self) {
        self.output.push_str(&self.delimiter);
    }

    fn write_modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.output.push_str(&modifier.to_string());
            self.output.push(' ');
        }
    }

    fn write_type_ref(&mut self, type_ref: &TypeRef) {
        self.output.push_str(&type_ref.name);
        for _ in 0..type_ref.array_dims {
            self.output.push_str("[]");
        }
    }

    fn write_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(f) => self.write_field(f),
            ClassMember::Method(m) => self.write_method(m),
            ClassMember::Constructor(c) => self.write_constructor(c),
            ClassMember::Initializer(i) => self.write_initializer(i),
            ClassMember::Type(t) => self.write_type_decl(t),
            ClassMember::Placeholder(p) => self.write_placeholder(p),
        }
    }

    /// Reindent placeholder text: the fragment keeps its own relative
    /// indentation but starts each line at the current level
    fn write_placeholder(&mut self, placeholder: &Placeholder) {
        let mut first = true;
        for line in placeholder.text.lines() {
            if !first {
                self.newline();
            }
            if !line.is_empty() {
                self.write_indent();
                self.output.push_str(line);
            }
            first = false;
        }
    }

    fn write_doc_comment(&mut self, comment: &Option<String>) {
        if let Some(text) = comment {
            for line in text.lines() {
                self.write_indent();
                self.output.push_str(line);
                self.newline();
            }
        }
    }

    fn write_field(&mut self, field: &FieldDecl) {
        self.write_indent();
        self.write_modifiers(&field.modifiers);
        self.write_type_ref(&field.type_ref);
        self.output.push(' ');
        self.output.push_str(&field.name);
        if let Some(ref init) = field.initializer {
            self.output.push_str(" = ");
            self.write_expr(init);
        }
        self.output.push(';');
    }

    fn write_parameters(&mut self, parameters: &[Parameter]) {
        self.output.push('(');
        for (i, param) in parameters.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_modifiers(&param.modifiers);
            if param.varargs {
                self.output.push_str(&param.type_ref.name);
                for _ in 0..param.type_ref.array_dims.saturating_sub(1) {
                    self.output.push_str("[]");
                }
                self.output.push_str("...");
            } else {
                self.write_type_ref(&param.type_ref);
            }
            self.output.push(' ');
            self.output.push_str(&param.name);
        }
        self.output.push(')');
    }

    fn write_method(&mut self, method: &MethodDecl) {
        self.write_doc_comment(&method.doc_comment);
        self.write_indent();
        self.write_modifiers(&method.modifiers);
        match method.return_type {
            Some(ref ret) => self.write_type_ref(ret),
            None => self.output.push_str("void"),
        }
        self.output.push(' ');
        self.output.push_str(&method.name);
        self.write_parameters(&method.parameters);
        match method.body {
            Some(ref body) => {
                self.output.push(' ');
                self.write_block(body);
            }
            None => self.output.push(';'),
        }
    }

    fn write_constructor(&mut self, constructor: &ConstructorDecl) {
        self.write_doc_comment(&constructor.doc_comment);
        self.write_indent();
        self.write_modifiers(&constructor.modifiers);
        self.output.push_str(&constructor.name);
        self.write_parameters(&constructor.parameters);
        self.output.push(' ');
        self.write_block(&constructor.body);
    }

    fn write_initializer(&mut self, initializer: &InitializerBlock) {
        self.write_indent();
        self.write_modifiers(&initializer.modifiers);
        self.write_block(&initializer.body);
    }

    fn write_type_decl(&mut self, type_decl: &TypeDecl) {
        match type_decl {
            TypeDecl::Class(c) => self.write_class(c),
            TypeDecl::Interface(i) => self.write_interface(i),
        }
    }

    fn write_class(&mut self, class: &ClassDecl) {
        self.write_indent();
        self.write_modifiers(&class.modifiers);
        self.output.push_str("class ");
        self.output.push_str(&class.name);
        if let Some(ref extends) = class.extends {
            self.output.push_str(" extends ");
            self.write_type_ref(extends);
        }
        if !class.implements.is_empty() {
            self.output.push_str(" implements ");
            for (i, implements) in class.implements.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.write_type_ref(implements);
            }
        }
        self.output.push_str(" {");
        self.indent_level += 1;
        for member in &class.body {
            self.newline();
            self.write_member(member);
        }
        self.indent_level -= 1;
        self.newline();
        self.write_indent();
        self.output.push('}');
    }

    fn write_interface(&mut self, interface: &InterfaceDecl) {
        self.write_indent();
        self.write_modifiers(&interface.modifiers);
        self.output.push_str("interface ");
        self.output.push_str(&interface.name);
        if !interface.extends.is_empty() {
            self.output.push_str(" extends ");
            for (i, extends) in interface.extends.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.write_type_ref(extends);
            }
        }
        self.output.push_str(" {");
        self.indent_level += 1;
        for member in &interface.body {
            self.newline();
            self.write_member(member);
        }
        self.indent_level -= 1;
        self.newline();
        self.write_indent();
        self.output.push('}');
    }

    fn write_block(&mut self, block: &Block) {
        self.output.push('{');
        if block.statements.is_empty() {
            self.output.push('}');
            return;
        }
        self.indent_level += 1;
        for stmt in &block.statements {
            self.newline();
            self.write_stmt(stmt);
        }
        self.indent_level -= 1;
        self.newline();
        self.write_indent();
        self.output.push('}');
    }

    fn write_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(s) => {
                self.write_indent();
                self.write_expr(&s.expr);
                self.output.push(';');
            }
            Stmt::LocalVar(s) => {
                self.write_indent();
                self.write_modifiers(&s.modifiers);
                self.write_type_ref(&s.type_ref);
                self.output.push(' ');
                for (i, var) in s.variables.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.output.push_str(&var.name);
                    if let Some(ref init) = var.initializer {
                        self.output.push_str(" = ");
                        self.write_expr(init);
                    }
                }
                self.output.push(';');
            }
            Stmt::If(s) => {
                self.write_indent();
                self.output.push_str("if (");
                self.write_expr(&s.condition);
                self.output.push_str(") ");
                self.write_nested_stmt(&s.then_branch);
                if let Some(ref else_branch) = s.else_branch {
                    self.output.push_str(" else ");
                    self.write_nested_stmt(else_branch);
                }
            }
            Stmt::While(s) => {
                self.write_indent();
                self.output.push_str("while (");
                self.write_expr(&s.condition);
                self.output.push_str(") ");
                self.write_nested_stmt(&s.body);
            }
            Stmt::For(s) => {
                // rendered flat; synthesized code never produces for loops
                self.write_indent();
                self.output.push_str("for (;;) ");
                self.write_nested_stmt(&s.body);
            }
            Stmt::Return(s) => {
                self.write_indent();
                self.output.push_str("return");
                if let Some(ref value) = s.value {
                    self.output.push(' ');
                    self.write_expr(value);
                }
                self.output.push(';');
            }
            Stmt::Throw(s) => {
                self.write_indent();
                self.output.push_str("throw ");
                self.write_expr(&s.expr);
                self.output.push(';');
            }
            Stmt::Block(b) => {
                self.write_indent();
                self.write_block(b);
            }
            Stmt::Placeholder(p) => self.write_placeholder(p),
            Stmt::Empty => {
                self.write_indent();
                self.output.push(';');
            }
        }
    }

    fn write_nested_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::Block(b) = stmt {
            self.write_block(b);
        } else {
            self.newline();
            self.indent_level += 1;
            self.write_stmt(stmt);
            self.indent_level -= 1;
        }
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(e) => self.write_literal(&e.value),
            Expr::Identifier(e) => self.output.push_str(&e.name),
            Expr::Binary(e) => {
                self.write_expr(&e.left);
                self.output.push(' ');
                self.output.push_str(binary_op_token(e.operator));
                self.output.push(' ');
                self.write_expr(&e.right);
            }
            Expr::Unary(e) => match e.operator {
                UnaryOp::PostInc => {
                    self.write_expr(&e.operand);
                    self.output.push_str("++");
                }
                UnaryOp::PostDec => {
                    self.write_expr(&e.operand);
                    self.output.push_str("--");
                }
                op => {
                    self.output.push_str(unary_op_token(op));
                    self.write_expr(&e.operand);
                }
            },
            Expr::Assignment(e) => {
                self.write_expr(&e.target);
                self.output.push_str(" = ");
                self.write_expr(&e.value);
            }
            Expr::MethodCall(e) => {
                if let Some(ref target) = e.target {
                    self.write_expr(target);
                    self.output.push('.');
                }
                self.output.push_str(&e.name);
                self.output.push('(');
                for (i, arg) in e.arguments.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_expr(arg);
                }
                self.output.push(')');
            }
            Expr::FieldAccess(e) => {
                if let Some(ref target) = e.target {
                    self.write_expr(target);
                    self.output.push('.');
                }
                self.output.push_str(&e.name);
            }
            Expr::ArrayAccess(e) => {
                self.write_expr(&e.array);
                self.output.push('[');
                self.write_expr(&e.index);
                self.output.push(']');
            }
            Expr::Cast(e) => {
                self.output.push('(');
                self.write_type_ref(&e.target_type);
                self.output.push_str(") ");
                self.write_expr(&e.expr);
            }
            Expr::Conditional(e) => {
                self.write_expr(&e.condition);
                self.output.push_str(" ? ");
                self.write_expr(&e.then_expr);
                self.output.push_str(" : ");
                self.write_expr(&e.else_expr);
            }
            Expr::New(e) => {
                self.output.push_str("new ");
                self.write_type_ref(&e.target_type);
                self.output.push('(');
                for (i, arg) in e.arguments.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_expr(arg);
                }
                self.output.push(')');
            }
            Expr::Parenthesized(e) => {
                self.output.push('(');
                self.write_expr(e);
                self.output.push(')');
            }
        }
    }

    fn write_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Integer(v) => self.output.push_str(&v.to_string()),
            Literal::Float(v) => self.output.push_str(&v.to_string()),
            Literal::Boolean(v) => self.output.push_str(if *v { "true" } else { "false" }),
            Literal::String(v) => {
                self.output.push('"');
                self.output.push_str(v);
                self.output.push('"');
            }
            Literal::Char(v) => {
                self.output.push('\'');
                self.output.push(*v);
                self.output.push('\'');
            }
            Literal::Null => self.output.push_str("null"),
        }
    }
}

fn binary_op_token(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Lt => "<",
        BinaryOp::Le => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Ge => ">=",
        BinaryOp::Eq => "==",
        BinaryOp::Ne => "!=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
    }
}

fn unary_op_token(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus => "+",
        UnaryOp::Minus => "-",
        UnaryOp::Not => "!",
        UnaryOp::PreInc => "++",
        UnaryOp::PreDec => "--",
        UnaryOp::PostInc | UnaryOp::PostDec => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    fn getter(name: &str, field: &str) -> ClassMember {
        ClassMember::Method(MethodDecl {
            modifiers: vec![Modifier::Public],
            return_type: Some(TypeRef::named("int")),
            name: name.to_string(),
            parameters: vec![],
            body: Some(Block {
                statements: vec![Stmt::Placeholder(Placeholder {
                    text: format!("return this.{};", field),
                    kind: PlaceholderKind::Statement,
                    span: Span::default(),
                })],
                span: Span::default(),
            }),
            doc_comment: None,
            binding: None,
            span: Span::default(),
        })
    }

    #[test]
    fn renders_method_with_placeholder_body() {
        let mut printer = SourcePrinter::new("    ", "\n");
        let text = printer.print_member(&getter("getId", "id"), 1);
        assert_eq!(
            text,
            "    public int getId() {\n        return this.id;\n    }"
        );
    }

    #[test]
    fn renders_varargs_parameter() {
        let mut printer = SourcePrinter::new("    ", "\n");
        let member = ClassMember::Method(MethodDecl {
            modifiers: vec![Modifier::Public],
            return_type: None,
            name: "log".to_string(),
            parameters: vec![Parameter {
                modifiers: vec![],
                type_ref: TypeRef { name: "String".into(), array_dims: 1, binding: None, span: Span::default() },
                name: "messages".to_string(),
                varargs: true,
                binding: None,
                span: Span::default(),
            }],
            body: None,
            doc_comment: None,
            binding: None,
            span: Span::default(),
        });
        assert_eq!(printer.print_member(&member, 0), "public void log(String... messages);");
    }
}
