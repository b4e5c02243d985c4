//! Add delegate methods
//!
//! Generates delegating methods for (field, method) pairs picked from the
//! delegation candidates of the target type, appending them to the type
//! body. Pairs whose method name the type already declares are skipped.

use crate::binding::{BindingTable, FieldId, MethodId};
use crate::config::Config;
use crate::edit::TextEdit;
use crate::error::{Error, Result};
use crate::imports::ImportRewrite;
use crate::project::{Cancel, Document, TemplateProvider};
use crate::rewrite::{TargetBody, TreeRewrite};
use crate::stubs;

use super::{apply_edit, check_cancelled, debug_log, find_method_index, resolve_target, TargetRef};

#[derive(Debug, Clone)]
pub struct DelegateRequest {
    pub target: TargetRef,
    /// (field, method) tuples, typically from `stubs::candidates::delegatable_methods`
    pub tuples: Vec<(FieldId, MethodId)>,
}

#[derive(Debug)]
pub struct DelegateOutcome {
    pub edit: TextEdit,
    pub generated: usize,
    pub skipped: usize,
}

pub struct AddDelegateMethodsOperation<'a> {
    ast: &'a crate::ast::Ast,
    source: &'a str,
    table: &'a BindingTable,
    config: &'a Config,
    templates: &'a dyn TemplateProvider,
}

impl<'a> AddDelegateMethodsOperation<'a> {
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
        request: &DelegateRequest,
        cancel: &dyn Cancel,
    ) -> Result<DelegateOutcome> {
        let class = resolve_target(self.ast, &request.target)?;
        if class.binding.is_none() {
            return Err(Error::structural(format!("type '{}' has no binding", class.name)));
        }
        log::debug!("add delegates: type={} tuples={}", class.name, request.tuples.len());

        let mut imports = ImportRewrite::new(self.ast, self.table, true);
        imports.set_settings(self.config.imports.clone());
        imports.set_scope_position(class.body_span.start.offset + 1);
        let mut rewrite = TreeRewrite::new(self.source, &self.config.generation);
        let target = TargetBody::of_class(class);

        let mut generated = 0usize;
        let mut skipped = 0usize;
        for &(field, method) in &request.tuples {
            check_cancelled(cancel)?;
            let method_name = self.table.method(method).name.clone();
            if find_method_index(&class.body, &method_name).is_some() {
                skipped += 1;
                continue;
            }
            let stub = stubs::create_delegate_stub(
                self.table,
                &mut imports,
                self.templates,
                &self.config.generation,
                field,
                method,
                &class.name,
            )?;
            rewrite.insert_last(&target, stub)?;
            generated += 1;
        }

        let mut edit = rewrite.compute_text_edit()?;
        let imports_edit = imports.rewrite_imports(self.source);
        if !imports_edit.is_noop() {
            edit.add_child(imports_edit);
        }
        debug_log(format!("delegates: generated={generated} skipped={skipped}"));
        Ok(DelegateOutcome { edit, generated, skipped })
    }

    pub fn run(
        &self,
        request: &DelegateRequest,
        cancel: &dyn Cancel,
        document: &mut dyn Document,
        save: bool,
    ) -> Result<DelegateOutcome> {
        let outcome = self.create_text_edit(request, cancel)?;
        apply_edit(document, &outcome.edit, save)?;
        Ok(outcome)
    }
}
