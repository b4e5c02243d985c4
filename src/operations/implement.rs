//! Implement and override methods
//!
//! Generates implementation stubs for selected method bindings: abstract
//! (and interface) methods get a default-value return, overridable concrete
//! methods a `super` forwarding call. Methods the type already declares are
//! skipped.

use crate::binding::{BindingTable, MethodId};
use crate::config::Config;
use crate::edit::TextEdit;
use crate::error::{Error, Result};
use crate::imports::ImportRewrite;
use crate::project::{Cancel, Document, TemplateProvider};
use crate::rewrite::{TargetBody, TreeRewrite};
use crate::stubs;

use super::{apply_edit, check_cancelled, debug_log, find_method_index, resolve_target, TargetRef};

#[derive(Debug, Clone)]
pub struct ImplementRequest {
    pub target: TargetRef,
    /// Methods to implement or override, typically from
    /// `stubs::candidates::unimplemented_methods` or
    /// `stubs::candidates::overridable_methods`
    pub methods: Vec<MethodId>,
    /// Generate bodyless redeclarations instead of implementations
    pub deferred: bool,
}

#[derive(Debug)]
pub struct ImplementOutcome {
    pub edit: TextEdit,
    pub generated: usize,
    pub skipped: usize,
}

pub struct ImplementMethodsOperation<'a> {
    ast: &'a crate::ast::Ast,
    source: &'a str,
    table: &'a BindingTable,
    config: &'a Config,
    templates: &'a dyn TemplateProvider,
}

impl<'a> ImplementMethodsOperation<'a> {
    pub fn new(
        ast: &'a crate::ast::Ast,
        source: &'a str,
        table: &'a BindingTable,
        config: &'a Config,
        templates: &'a dyn TemplateProvider,
    ) -> Self {
        Self { ast, source, table, config, templates }
    }

    pub fn create_text_edit(
        &self,
        request: &ImplementRequest,
        cancel: &dyn Cancel,
    ) -> Result<ImplementOutcome> {
        let class = resolve_target(self.ast, &request.target)?;
        if class.binding.is_none() {
            return Err(Error::structural(format!("type '{}' has no binding", class.name)));
        }
        log::debug!("implement methods: type={} methods={}", class.name, request.methods.len());

        let mut imports = ImportRewrite::new(self.ast, self.table, true);
        imports.set_settings(self.config.imports.clone());
        imports.set_scope_position(class.body_span.start.offset + 1);
        let mut rewrite = TreeRewrite::new(self.source, &self.config.generation);
        let target = TargetBody::of_class(class);

        let mut generated = 0usize;
        let mut skipped = 0usize;
        for &method in &request.methods {
            check_cancelled(cancel)?;
            let name = self.table.method(method).name.clone();
            if find_method_index(&class.body, &name).is_some() {
                skipped += 1;
                continue;
            }
            let stub = stubs::create_implementation_stub(
                self.table,
                &mut imports,
                self.templates,
                &self.config.generation,
                method,
                &class.name,
                request.deferred,
            )?;
            rewrite.insert_last(&target, stub)?;
            generated += 1;
        }

        let mut edit = rewrite.compute_text_edit()?;
        let imports_edit = imports.rewrite_imports(self.source);
        if !imports_edit.is_noop() {
            edit.add_child(imports_edit);
        }
        debug_log(format!("implement: generated={generated} skipped={skipped}"));
        Ok(ImplementOutcome { edit, generated, skipped })
    }

    pub fn run(
        &self,
        request: &ImplementRequest,
        cancel: &dyn Cancel,
        document: &mut dyn Document,
        save: bool,
    ) -> Result<ImplementOutcome> {
        let outcome = self.create_text_edit(request, cancel)?;
        apply_edit(document, &outcome.edit, save)?;
        Ok(outcome)
    }
}
