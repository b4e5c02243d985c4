//! Generate constructors
//!
//! Builds constructor stubs from the visible constructors of the
//! superclass. In field-initialization mode the stub additionally assigns
//! the requested fields from freshly named parameters.

use crate::binding::{BindingTable, FieldId, MethodId};
use crate::config::Config;
use crate::edit::TextEdit;
use crate::error::{Error, Result};
use crate::imports::ImportRewrite;
use crate::project::{Cancel, Document, TemplateProvider};
use crate::rewrite::{TargetBody, TreeRewrite};
use crate::stubs;

use super::{apply_edit, check_cancelled, debug_log, resolve_target, TargetRef};

#[derive(Debug, Clone)]
pub struct ConstructorRequest {
    pub target: TargetRef,
    /// Super constructors to mirror, typically from
    /// `stubs::candidates::visible_super_constructors`
    pub super_constructors: Vec<MethodId>,
    /// Fields each generated constructor should assign; when non-empty only
    /// the first super constructor is mirrored
    pub fields: Vec<FieldId>,
}

#[derive(Debug)]
pub struct ConstructorOutcome {
    pub edit: TextEdit,
    pub generated: usize,
}

pub struct GenerateConstructorsOperation<'a> {
    ast: &'a crate::ast::Ast,
    source: &'a str,
    table: &'a BindingTable,
    config: &'a Config,
    templates: &'a dyn TemplateProvider,
}

impl<'a> GenerateConstructorsOperation<'a> {
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
        request: &ConstructorRequest,
        cancel: &dyn Cancel,
    ) -> Result<ConstructorOutcome> {
        let class = resolve_target(self.ast, &request.target)?;
        if class.binding.is_none() {
            return Err(Error::structural(format!("type '{}' has no binding", class.name)));
        }
        if request.super_constructors.is_empty() && request.fields.is_empty() {
            return Err(Error::structural("nothing to generate: no constructors selected"));
        }
        log::debug!(
            "generate constructors: type={} supers={} fields={}",
            class.name,
            request.super_constructors.len(),
            request.fields.len()
        );

        let mut imports = ImportRewrite::new(self.ast, self.table, true);
        imports.set_settings(self.config.imports.clone());
        imports.set_scope_position(class.body_span.start.offset + 1);
        let mut rewrite = TreeRewrite::new(self.source, &self.config.generation);
        let target = TargetBody::of_class(class);

        let mut generated = 0usize;
        if request.fields.is_empty() {
            for &super_ctor in &request.super_constructors {
                check_cancelled(cancel)?;
                let stub = stubs::create_constructor_stub(
                    self.table,
                    &mut imports,
                    self.templates,
                    &self.config.generation,
                    super_ctor,
                    &class.name,
                )?;
                rewrite.insert_last(&target, stub)?;
                generated += 1;
            }
        } else {
            check_cancelled(cancel)?;
            let stub = stubs::create_constructor_with_fields(
                self.table,
                &mut imports,
                self.templates,
                &self.config.generation,
                &class.name,
                request.super_constructors.first().copied(),
                &request.fields,
            )?;
            rewrite.insert_last(&target, stub)?;
            generated += 1;
        }

        let mut edit = rewrite.compute_text_edit()?;
        let imports_edit = imports.rewrite_imports(self.source);
        if !imports_edit.is_noop() {
            edit.add_child(imports_edit);
        }
        debug_log(format!("constructors: generated={generated}"));
        Ok(ConstructorOutcome { edit, generated })
    }

    pub fn run(
        &self,
        request: &ConstructorRequest,
        cancel: &dyn Cancel,
        document: &mut dyn Document,
        save: bool,
    ) -> Result<ConstructorOutcome> {
        let outcome = self.create_text_edit(request, cancel)?;
        apply_edit(document, &outcome.edit, save)?;
        Ok(outcome)
    }
}
