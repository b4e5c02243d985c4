//! Generate getters and setters
//!
//! Builds accessor stubs for selected fields and appends them to the target
//! type body. An existing accessor of the same name is removed and
//! regenerated when the duplicate query allows it, skipped otherwise.

use crate::binding::{BindingTable, FieldId};
use crate::config::Config;
use crate::edit::TextEdit;
use crate::error::{Error, Result};
use crate::imports::ImportRewrite;
use crate::project::{Cancel, Document, DuplicateQuery, QueryAnswer, TemplateProvider};
use crate::rewrite::{TargetBody, TreeRewrite};
use crate::stubs;

use super::{apply_edit, check_cancelled, debug_log, find_method_index, resolve_target, TargetRef};

/// What to generate, field names in generation order
#[derive(Debug, Clone)]
pub struct AccessorRequest {
    pub target: TargetRef,
    pub getter_fields: Vec<String>,
    pub setter_fields: Vec<String>,
}

#[derive(Debug)]
pub struct AccessorOutcome {
    pub edit: TextEdit,
    pub generated: usize,
    pub skipped: usize,
}

pub struct GenerateAccessorsOperation<'a> {
    ast: &'a crate::ast::Ast,
    source: &'a str,
    table: &'a BindingTable,
    config: &'a Config,
    templates: &'a dyn TemplateProvider,
}

impl<'a> GenerateAccessorsOperation<'a> {
    pub fn new(
        ast: &'a crate::ast::Ast,
        source: &'a str,
        table: &'a BindingTable,
        config: &'a Config,
        templates: &'a dyn TemplateProvider,
    ) -> Self {
        Self { ast, source, table, config, templates }
    }

    /// Compute the combined edit without touching any document
    pub fn create_text_edit(
        &self,
        request: &AccessorRequest,
        query: &mut dyn DuplicateQuery,
        cancel: &dyn Cancel,
    ) -> Result<AccessorOutcome> {
        let class = resolve_target(self.ast, &request.target)?;
        let type_id = class
            .binding
            .ok_or_else(|| Error::structural(format!("type '{}' has no binding", class.name)))?;
        log::debug!(
            "generate accessors: type={} getters={} setters={}",
            class.name,
            request.getter_fields.len(),
            request.setter_fields.len()
        );

        let mut imports = ImportRewrite::new(self.ast, self.table, true);
        imports.set_settings(self.config.imports.clone());
        imports.set_scope_position(class.body_span.start.offset + 1);
        let mut rewrite = TreeRewrite::new(self.source, &self.config.generation);
        let target = TargetBody::of_class(class);

        let mut generated = 0usize;
        let mut skipped = 0usize;
        let mut yes_to_all = false;

        for field_name in &request.getter_fields {
            check_cancelled(cancel)?;
            let field = self.field_named(type_id, field_name)?;
            let is_boolean = self.table.is_boolean(self.table.field(field).ty);
            let duplicates = stubs::naming::getter_duplicate_names(
                field_name,
                is_boolean,
                &self.config.generation,
            );
            if !self.clear_duplicate(
                &mut rewrite,
                &target,
                class,
                &duplicates,
                query,
                &mut yes_to_all,
                &mut skipped,
            )? {
                continue;
            }
            let stub = stubs::create_getter_stub(
                self.table,
                &mut imports,
                self.templates,
                &self.config.generation,
                field,
                &class.name,
            )?;
            rewrite.insert_last(&target, stub)?;
            generated += 1;
        }

        for field_name in &request.setter_fields {
            check_cancelled(cancel)?;
            let field = self.field_named(type_id, field_name)?;
            let setter = stubs::naming::setter_name(field_name, &self.config.generation);
            if !self.clear_duplicate(
                &mut rewrite,
                &target,
                class,
                std::slice::from_ref(&setter),
                query,
                &mut yes_to_all,
                &mut skipped,
            )? {
                continue;
            }
            let stub = stubs::create_setter_stub(
                self.table,
                &mut imports,
                self.templates,
                &self.config.generation,
                field,
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
        debug_log(format!("accessors: generated={generated} skipped={skipped}"));
        Ok(AccessorOutcome { edit, generated, skipped })
    }

    /// Compute the edit, apply it through the document and optionally save
    pub fn run(
        &self,
        request: &AccessorRequest,
        query: &mut dyn DuplicateQuery,
        cancel: &dyn Cancel,
        document: &mut dyn Document,
        save: bool,
    ) -> Result<AccessorOutcome> {
        let outcome = self.create_text_edit(request, query, cancel)?;
        apply_edit(document, &outcome.edit, save)?;
        Ok(outcome)
    }

    fn field_named(&self, type_id: crate::binding::TypeId, name: &str) -> Result<FieldId> {
        self.table
            .type_binding(type_id)
            .fields
            .iter()
            .copied()
            .find(|&f| self.table.field(f).name == name)
            .ok_or_else(|| Error::structural(format!("field '{name}' not found on target type")))
    }

    /// Handle an existing accessor with one of the duplicate names: remove
    /// it when allowed, otherwise record a skip. Returns whether the new
    /// stub should still be generated.
    #[allow(clippy::too_many_arguments)]
    fn clear_duplicate(
        &self,
        rewrite: &mut TreeRewrite<'_>,
        target: &TargetBody<'_>,
        class: &crate::ast::ClassDecl,
        names: &[String],
        query: &mut dyn DuplicateQuery,
        yes_to_all: &mut bool,
        skipped: &mut usize,
    ) -> Result<bool> {
        for name in names {
            let Some(index) = find_method_index(&class.body, name) else {
                continue;
            };
            let allowed = *yes_to_all || {
                match query.do_query(name) {
                    QueryAnswer::Cancel => return Err(Error::Cancelled),
                    QueryAnswer::No => false,
                    QueryAnswer::Yes => true,
                    QueryAnswer::YesToAll => {
                        *yes_to_all = true;
                        true
                    }
                }
            };
            if !allowed {
                *skipped += 1;
                return Ok(false);
            }
            rewrite.remove(target, index)?;
        }
        Ok(true)
    }
}
