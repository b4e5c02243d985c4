//! Organize imports
//!
//! Rebuilds the file's import list from the references it actually
//! contains: collects every name the import list must account for, resolves
//! each against bindings, existing imports and the project type index, asks
//! the choice callback about genuinely ambiguous names, and emits the edit
//! that adds missing import lines and removes unused ones.

use crate::ast::Span;
use crate::binding::{Binding, BindingTable};
use crate::config::Config;
use crate::consts;
use crate::edit::TextEdit;
use crate::error::{Error, Result};
use crate::imports::{collect_references, ImportRewrite};
use crate::project::{Cancel, Document, ImportsChoice, TypeNameMatch, TypeSearch, SEARCH_ALL_TYPES};

use super::{apply_edit, check_cancelled, debug_log};

#[derive(Debug)]
pub struct OrganizeOutcome {
    pub edit: TextEdit,
    /// Import lines the rewrite created
    pub added: usize,
    /// Seed import declarations the rewrite removed
    pub removed: usize,
}

pub struct OrganizeImportsOperation<'a> {
    ast: &'a crate::ast::Ast,
    source: &'a str,
    table: &'a BindingTable,
    config: &'a Config,
    search: &'a dyn TypeSearch,
}

impl<'a> OrganizeImportsOperation<'a> {
    pub fn new(
        ast: &'a crate::ast::Ast,
        source: &'a str,
        table: &'a BindingTable,
        config: &'a Config,
        search: &'a dyn TypeSearch,
    ) -> Self {
        Self { ast, source, table, config, search }
    }

    pub fn create_text_edit(
        &self,
        choice: &mut dyn ImportsChoice,
        cancel: &dyn Cancel,
    ) -> Result<OrganizeOutcome> {
        let (type_refs, static_refs) = collect_references(self.ast, self.table, None);
        log::debug!(
            "organize imports: {} type refs, {} static refs",
            type_refs.len(),
            static_refs.len()
        );

        let mut imports = ImportRewrite::new(self.ast, self.table, false);
        imports.set_settings(self.config.imports.clone());

        // resolved references go straight in; unresolved names are collected
        // once each and resolved below
        let mut unresolved: Vec<(String, Span)> = Vec::new();
        for candidate in &type_refs {
            match candidate.binding {
                Some(ty) => {
                    imports.add_import(ty);
                }
                None => {
                    if !unresolved.iter().any(|(name, _)| *name == candidate.name) {
                        unresolved.push((candidate.name.clone(), candidate.span));
                    }
                }
            }
        }
        for candidate in &static_refs {
            match candidate.member {
                Binding::Field(id) => {
                    let field = self.table.field(id);
                    imports.add_static_import(field.declaring, &candidate.name, true);
                }
                Binding::Method(id) => {
                    let method = self.table.method(id);
                    imports.add_static_import(method.declaring, &candidate.name, false);
                }
                _ => {}
            }
        }

        let mut open_choices: Vec<Vec<TypeNameMatch>> = Vec::new();
        let mut open_ranges: Vec<Span> = Vec::new();
        for (name, span) in unresolved {
            check_cancelled(cancel)?;
            if self.config.imports.ignore_lowercase_names
                && name.chars().next().is_some_and(|c| c.is_lowercase())
            {
                continue;
            }
            // an old single import of the name decides the qualified form
            if let Some(seed) = self
                .ast
                .imports
                .iter()
                .find(|i| !i.is_static && !i.is_wildcard && i.simple_name() == name)
            {
                imports.add_import_qualified(&seed.name);
                continue;
            }
            let mut hits = self.search.search_types(&name, SEARCH_ALL_TYPES);
            if !self.config.imports.allow_default_package_imports {
                hits.retain(|hit| !hit.container_name().is_empty());
            }
            match hits.len() {
                // a name the project does not know stays untouched
                0 => {}
                1 => {
                    imports.add_import_qualified(&hits[0].qualified_name);
                }
                _ => {
                    // a unique hit reachable through an on-demand import, the
                    // current package or the implicit package wins outright
                    let preferred: Vec<&TypeNameMatch> = hits
                        .iter()
                        .filter(|hit| self.is_preferred_container(hit.container_name()))
                        .collect();
                    if preferred.len() == 1 {
                        imports.add_import_qualified(&preferred[0].qualified_name);
                    } else {
                        open_choices.push(hits);
                        open_ranges.push(span);
                    }
                }
            }
        }

        if !open_choices.is_empty() {
            let selected =
                choice.choose(&open_choices, &open_ranges).ok_or(Error::Cancelled)?;
            for (hits, index) in open_choices.iter().zip(selected) {
                let Some(hit) = hits.get(index) else {
                    return Err(Error::structural("import choice index out of range"));
                };
                imports.add_import_qualified(&hit.qualified_name);
            }
        }

        let edit = imports.rewrite_imports(self.source);
        let added = imports.created_imports().len() + imports.created_static_imports().len();
        let removed = imports.removed_count();
        debug_log(format!("organize imports: added={added} removed={removed}"));
        Ok(OrganizeOutcome { edit, added, removed })
    }

    pub fn run(
        &self,
        choice: &mut dyn ImportsChoice,
        cancel: &dyn Cancel,
        document: &mut dyn Document,
        save: bool,
    ) -> Result<OrganizeOutcome> {
        let outcome = self.create_text_edit(choice, cancel)?;
        apply_edit(document, &outcome.edit, save)?;
        Ok(outcome)
    }

    fn is_preferred_container(&self, container: &str) -> bool {
        container == self.ast.package_name()
            || container == consts::IMPLICIT_PACKAGE
            || self
                .ast
                .imports
                .iter()
                .any(|i| i.is_wildcard && !i.is_static && i.name == container)
    }
}
