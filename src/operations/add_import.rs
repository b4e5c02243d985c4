//! Selection-based add import
//!
//! Takes a selection in the source, expands it to the full dotted name
//! around it, and makes the name reachable through an import: a name the
//! context already resolves gets its qualifier removed, a colliding name is
//! reported, and an unknown name is looked up in the project type index
//! (asking the choice callback when several types match).

use crate::ast::Span;
use crate::binding::BindingTable;
use crate::config::Config;
use crate::edit::TextEdit;
use crate::error::{Error, Result};
use crate::imports::{ContextKind, ContextResult, ImportRewrite};
use crate::project::{Cancel, Document, ImportChoice, TypeSearch, SEARCH_ALL_TYPES};

use super::{apply_edit, check_cancelled, debug_log};

#[derive(Debug)]
pub struct AddImportOutcome {
    pub edit: TextEdit,
    /// The name generated code at the selection should use from now on
    pub chosen_name: String,
}

pub struct AddImportOperation<'a> {
    ast: &'a crate::ast::Ast,
    source: &'a str,
    table: &'a BindingTable,
    config: &'a Config,
    search: &'a dyn TypeSearch,
}

impl<'a> AddImportOperation<'a> {
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
        offset: usize,
        length: usize,
        choice: &mut dyn ImportChoice,
        cancel: &dyn Cancel,
    ) -> Result<AddImportOutcome> {
        let (name_start, name) = self.name_at(offset, length)?;
        let name_span = Span::from_offsets(name_start, name_start + name.len());
        log::debug!("add import: '{name}' at {name_span}");

        let mut imports = ImportRewrite::new(self.ast, self.table, true);
        imports.set_settings(self.config.imports.clone());
        imports.set_scope_position(name_start);

        let (container, simple) = match name.rfind('.') {
            Some(idx) => (&name[..idx], &name[idx + 1..]),
            None => ("", name.as_str()),
        };
        if simple.is_empty() {
            return Err(Error::structural(format!("'{name}' is not a type name")));
        }

        let mut reference_edit = None;
        let chosen = match imports.find_in_context(container, simple, ContextKind::Type) {
            ContextResult::Found => {
                // already reachable; all the reference needs is the shortening
                if !container.is_empty() {
                    reference_edit =
                        Some(TextEdit::replace(name_start, name.len(), simple.to_string()));
                }
                simple.to_string()
            }
            ContextResult::Conflict => {
                return Err(Error::import_conflict(simple));
            }
            ContextResult::Unknown => {
                check_cancelled(cancel)?;
                let qualified = if container.is_empty() {
                    // types from the default package can never be imported
                    let mut hits = self.search.search_types(simple, SEARCH_ALL_TYPES);
                    hits.retain(|hit| !hit.container_name().is_empty());
                    match hits.len() {
                        0 => return Err(Error::unresolved(simple, name_span)),
                        1 => hits[0].qualified_name.clone(),
                        _ => {
                            let index = choice
                                .choose(&hits, container)
                                .ok_or(Error::Cancelled)?;
                            let Some(hit) = hits.get(index) else {
                                return Err(Error::structural(
                                    "import choice index out of range",
                                ));
                            };
                            hit.qualified_name.clone()
                        }
                    }
                } else {
                    name.clone()
                };
                let result = imports.add_import_qualified(&qualified);
                if result == simple && !container.is_empty() {
                    reference_edit =
                        Some(TextEdit::replace(name_start, name.len(), simple.to_string()));
                }
                result
            }
        };

        let mut edit = imports.rewrite_imports(self.source);
        if let Some(reference) = reference_edit {
            edit.add_child(reference);
        }
        debug_log(format!("add import: '{name}' -> '{chosen}'"));
        Ok(AddImportOutcome { edit, chosen_name: chosen })
    }

    pub fn run(
        &self,
        offset: usize,
        length: usize,
        choice: &mut dyn ImportChoice,
        cancel: &dyn Cancel,
        document: &mut dyn Document,
        save: bool,
    ) -> Result<AddImportOutcome> {
        let outcome = self.create_text_edit(offset, length, choice, cancel)?;
        apply_edit(document, &outcome.edit, save)?;
        Ok(outcome)
    }

    /// Expand the selection to the dotted name around it
    fn name_at(&self, offset: usize, length: usize) -> Result<(usize, String)> {
        let bytes = self.source.as_bytes();
        if offset + length > bytes.len() {
            return Err(Error::structural("selection out of document bounds"));
        }
        let mut start = offset;
        while start > 0 && is_name_part(bytes[start - 1]) {
            start -= 1;
        }
        let mut end = offset + length;
        while end < bytes.len() && is_name_part(bytes[end]) {
            end += 1;
        }
        let name = self.source[start..end].trim_matches('.');
        if name.is_empty() || !name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
            return Err(Error::structural("no name at selection"));
        }
        let trimmed_start = start + self.source[start..end].find(name).unwrap_or(0);
        Ok((trimmed_start, name.to_string()))
    }
}

fn is_name_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || byte == b'.'
}
