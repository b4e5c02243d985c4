//! Import rewrite engine
//!
//! Owns the working set of imports for one file during a rewrite session.
//! The seed is taken from the tree's import declarations; additions are
//! resolved against the seed, the session's own additions and the
//! declarations in scope before anything is recorded. A name that would
//! collide never shadows silently: the caller gets the fully qualified name
//! back and the import list stays untouched.

use crate::ast::{Ast, Span};
use crate::binding::{Binding, BindingTable, TypeId, TypeKind};
use crate::config::ImportSettings;
use crate::consts;
use crate::edit::TextEdit;
use crate::scope::{self, ScopeAnalyzer};

/// Result of probing a (qualifier, name) pair against the current context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextResult {
    /// The simple name already resolves to exactly this qualified name
    Found,
    /// The simple name is taken by a different qualified name
    Conflict,
    /// Nothing is known; an import (and a re-check) is required
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Type,
    Static,
}

/// Caller-supplied resolution context consulted before the engine's own
/// state, e.g. a context wrapping an in-flight tree rewrite
pub trait ImportContext {
    fn find_in_context(&self, qualifier: &str, name: &str, kind: ContextKind) -> ContextResult;
}

#[derive(Debug, Clone)]
struct SeedImport {
    /// Imported name: qualified type for singles, package for on-demand,
    /// `Type.member` for static singles, type for static on-demand
    name: String,
    simple: String,
    is_static: bool,
    on_demand: bool,
    span: Span,
}

#[derive(Debug, Clone)]
struct AddedImport {
    qualified: String,
    simple: String,
}

#[derive(Debug, Clone)]
struct AddedStaticImport {
    declaring: String,
    member: String,
    #[allow(dead_code)]
    is_field: bool,
}

pub struct ImportRewrite<'a> {
    table: &'a BindingTable,
    analyzer: ScopeAnalyzer<'a>,
    current_package: String,
    restore_existing: bool,
    seed: Vec<SeedImport>,
    added: Vec<AddedImport>,
    added_static: Vec<AddedStaticImport>,
    context: Option<&'a dyn ImportContext>,
    scope_position: Option<usize>,
    settings: ImportSettings,
    created: Vec<String>,
    created_static: Vec<String>,
    removed: usize,
    package_end: Option<usize>,
}

impl<'a> ImportRewrite<'a> {
    /// Create a rewrite session seeded from the unit's import declarations.
    /// With `restore_existing == false` the final import list is rebuilt
    /// from scratch and seed imports that are not re-added get removed
    /// (organize mode); with `true` the seed survives and the session only
    /// ever extends it.
    pub fn new(ast: &'a Ast, table: &'a BindingTable, restore_existing: bool) -> Self {
        let seed = ast
            .imports
            .iter()
            .map(|decl| SeedImport {
                name: decl.name.clone(),
                simple: decl.simple_name().to_string(),
                is_static: decl.is_static,
                on_demand: decl.is_wildcard,
                span: decl.span,
            })
            .collect();
        Self {
            table,
            analyzer: ScopeAnalyzer::new(ast, table),
            current_package: ast.package_name().to_string(),
            restore_existing,
            seed,
            added: Vec::new(),
            added_static: Vec::new(),
            context: None,
            scope_position: None,
            settings: ImportSettings::default(),
            created: Vec::new(),
            created_static: Vec::new(),
            removed: 0,
            package_end: ast.package_decl.as_ref().map(|p| p.span.end.offset),
        }
    }

    /// Install a context consulted before the engine's own state
    pub fn set_context(&mut self, context: &'a dyn ImportContext) {
        self.context = Some(context);
    }

    pub fn set_settings(&mut self, settings: ImportSettings) {
        self.settings = settings;
    }

    /// Set the point of use for in-scope collision checks
    pub fn set_scope_position(&mut self, offset: usize) {
        self.scope_position = Some(offset);
    }

    /// Add an import for a resolved type binding. Returns the name generated
    /// code must use for the type: the simple name when the import went
    /// through (or none was needed), the qualified name on a conflict.
    pub fn add_import(&mut self, ty: TypeId) -> String {
        let binding = self.table.type_binding(ty);
        if binding.kind == TypeKind::Primitive
            || binding.is_recovered
            || binding.is_local
            || binding.is_anonymous
        {
            return binding.name.clone();
        }
        let qualified = self.table.qualified_name(ty);
        self.add_import_qualified(&qualified)
    }

    /// Add an import for a qualified name with no binding behind it (names
    /// coming back from the project search index)
    pub fn add_import_qualified(&mut self, qualified: &str) -> String {
        let simple = simple_name_of(qualified).to_string();
        let container = container_of(qualified);
        match self.find_in_context(container, &simple, ContextKind::Type) {
            ContextResult::Found => return simple,
            ContextResult::Conflict => return qualified.to_string(),
            ContextResult::Unknown => {}
        }
        if self.is_implicit(container) {
            return simple;
        }
        self.added.push(AddedImport { qualified: qualified.to_string(), simple: simple.clone() });
        simple
    }

    /// Add a static import for a member of a resolved type
    pub fn add_static_import(&mut self, declaring: TypeId, member: &str, is_field: bool) -> String {
        let declaring_name = self.table.qualified_name(declaring);
        self.add_static_import_qualified(&declaring_name, member, is_field)
    }

    pub fn add_static_import_qualified(
        &mut self,
        declaring: &str,
        member: &str,
        is_field: bool,
    ) -> String {
        match self.find_in_context(declaring, member, ContextKind::Static) {
            ContextResult::Found => return member.to_string(),
            ContextResult::Conflict => {
                return format!("{}.{}", simple_name_of(declaring), member);
            }
            ContextResult::Unknown => {}
        }
        self.added_static.push(AddedStaticImport {
            declaring: declaring.to_string(),
            member: member.to_string(),
            is_field,
        });
        member.to_string()
    }

    /// Probe whether introducing `name` (qualified by `qualifier`) would
    /// resolve, collide, or needs an import. Resolution order: the installed
    /// context, declarations in scope at the session's point of use, imports
    /// already present in this session, imports added by this session.
    pub fn find_in_context(&self, qualifier: &str, name: &str, kind: ContextKind) -> ContextResult {
        if let Some(context) = self.context {
            match context.find_in_context(qualifier, name, kind) {
                ContextResult::Unknown => {}
                decisive => return decisive,
            }
        }
        if kind == ContextKind::Type {
            if let Some(position) = self.scope_position {
                if let Some(Binding::Type(in_scope)) = self
                    .analyzer
                    .declaration_named(name, position, scope::TYPES | scope::CHECK_VISIBILITY)
                {
                    let scoped = self.table.qualified_name(in_scope);
                    if qualifier.is_empty() || scoped == join_name(qualifier, name) {
                        return ContextResult::Found;
                    }
                    return ContextResult::Conflict;
                }
            }
        }
        match kind {
            ContextKind::Type => {
                // seed imports participate only while they survive the session
                if self.restore_existing {
                    for seed in &self.seed {
                        if !seed.is_static && !seed.on_demand && seed.simple == name {
                            return if seed.name == join_name(qualifier, name) {
                                ContextResult::Found
                            } else {
                                ContextResult::Conflict
                            };
                        }
                    }
                }
                for added in &self.added {
                    if added.simple == name {
                        return if added.qualified == join_name(qualifier, name) {
                            ContextResult::Found
                        } else {
                            ContextResult::Conflict
                        };
                    }
                }
            }
            ContextKind::Static => {
                if self.restore_existing {
                    for seed in &self.seed {
                        if seed.is_static && !seed.on_demand && seed.simple == name {
                            return if seed.name == join_name(qualifier, name) {
                                ContextResult::Found
                            } else {
                                ContextResult::Conflict
                            };
                        }
                    }
                }
                for added in &self.added_static {
                    if added.member == name {
                        return if added.declaring == qualifier {
                            ContextResult::Found
                        } else {
                            ContextResult::Conflict
                        };
                    }
                }
            }
        }
        // same package and the implicit package resolve without an import,
        // but only when the qualifier is known
        if kind == ContextKind::Type && !qualifier.is_empty() && self.is_implicit(qualifier) {
            return ContextResult::Found;
        }
        ContextResult::Unknown
    }

    fn is_implicit(&self, container: &str) -> bool {
        container.is_empty()
            || container == self.current_package
            || container == consts::IMPLICIT_PACKAGE
    }

    /// Number of imports the last `rewrite_imports` call created
    pub fn created_imports(&self) -> &[String] {
        &self.created
    }

    pub fn created_static_imports(&self) -> &[String] {
        &self.created_static
    }

    /// Number of seed imports the last `rewrite_imports` call removed
    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// Diff the seed against the final import set and emit the text edit
    /// that inserts missing import lines and deletes unused ones. Unrelated
    /// lines are never touched.
    pub fn rewrite_imports(&mut self, source: &str) -> TextEdit {
        let kept: Vec<bool> = self.seed.iter().map(|seed| self.keeps_seed(seed)).collect();

        let mut new_singles: Vec<&AddedImport> = Vec::new();
        for added in &self.added {
            let duplicate = self.seed.iter().zip(&kept).any(|(seed, kept)| {
                *kept
                    && !seed.is_static
                    && ((!seed.on_demand && seed.name == added.qualified)
                        || (seed.on_demand && seed.name == container_of(&added.qualified)))
            });
            if !duplicate {
                new_singles.push(added);
            }
        }
        let mut new_statics: Vec<&AddedStaticImport> = Vec::new();
        for added in &self.added_static {
            let full = format!("{}.{}", added.declaring, added.member);
            let duplicate = self.seed.iter().zip(&kept).any(|(seed, kept)| {
                *kept
                    && seed.is_static
                    && ((!seed.on_demand && seed.name == full)
                        || (seed.on_demand && seed.name == added.declaring))
            });
            if !duplicate {
                new_statics.push(added);
            }
        }

        self.created = new_singles.iter().map(|a| a.qualified.clone()).collect();
        self.created_static =
            new_statics.iter().map(|a| format!("{}.{}", a.declaring, a.member)).collect();

        // the insert must precede same-offset deletions in the child list so
        // that application replaces removed lines in place
        let mut children = Vec::new();
        if !new_singles.is_empty() || !new_statics.is_empty() {
            children.push(self.insert_block(source, &kept, &new_singles, &new_statics));
        }
        self.removed = 0;
        for (seed, kept) in self.seed.iter().zip(&kept) {
            if !*kept {
                children.push(delete_line(source, seed.span));
                self.removed += 1;
            }
        }
        TextEdit::Multi { children }
    }

    /// Build the insertion for all new import lines, in configured order
    fn insert_block(
        &self,
        source: &str,
        kept: &[bool],
        singles: &[&AddedImport],
        statics: &[&AddedStaticImport],
    ) -> TextEdit {
        let settings = &self.settings;
        let mut lines: Vec<(bool, usize, String)> = Vec::new();
        for added in singles {
            lines.push((
                false,
                group_index(&added.qualified, &settings.group_order),
                format!("import {};", added.qualified),
            ));
        }
        for added in statics {
            let full = format!("{}.{}", added.declaring, added.member);
            lines.push((
                settings.statics_last,
                group_index(&full, &settings.group_order),
                format!("import static {};", full),
            ));
        }
        lines.sort();

        let body: String =
            lines.iter().map(|(_, _, line)| line.as_str()).collect::<Vec<_>>().join("\n");
        let (offset, blank_before) = self.insertion_point(source, kept);
        let mut text = String::new();
        if offset > 0 && source.as_bytes().get(offset - 1) != Some(&b'\n') {
            text.push('\n');
        }
        if blank_before {
            text.push('\n');
        }
        text.push_str(&body);
        if offset < source.len() {
            text.push('\n');
        }
        TextEdit::insert(offset, text)
    }

    /// Where the new import block goes: after the last surviving import,
    /// else in place of the removed block, else below the package
    /// declaration, else at the top of the unit
    fn insertion_point(&self, source: &str, kept: &[bool]) -> (usize, bool) {
        let last_kept = self
            .seed
            .iter()
            .zip(kept)
            .filter(|(_, kept)| **kept)
            .map(|(seed, _)| seed.span.end.offset)
            .last();
        if let Some(end) = last_kept {
            return (line_end(source, end), false);
        }
        if let Some(first) = self.seed.first() {
            return (line_start(source, first.span.start.offset), false);
        }
        if let Some(end) = self.package_end {
            return (line_end(source, end), true);
        }
        (0, false)
    }

    /// Whether a seed import survives into the final set
    fn keeps_seed(&self, seed: &SeedImport) -> bool {
        if self.restore_existing {
            return true;
        }
        if seed.is_static {
            if seed.on_demand {
                return self.added_static.iter().any(|a| a.declaring == seed.name);
            }
            return self
                .added_static
                .iter()
                .any(|a| format!("{}.{}", a.declaring, a.member) == seed.name);
        }
        if seed.on_demand {
            return self.added.iter().any(|a| container_of(&a.qualified) == seed.name);
        }
        self.added.iter().any(|a| a.qualified == seed.name)
    }
}

fn simple_name_of(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or("")
}

fn container_of(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}

fn join_name(container: &str, name: &str) -> String {
    if container.is_empty() {
        name.to_string()
    } else {
        format!("{container}.{name}")
    }
}

fn group_index(qualified: &str, groups: &[String]) -> usize {
    groups
        .iter()
        .position(|prefix| qualified.starts_with(prefix.as_str()))
        .unwrap_or(groups.len())
}

/// Offset of the first byte of the line containing `offset`
fn line_start(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())].rfind('\n').map(|idx| idx + 1).unwrap_or(0)
}

/// Offset just past the line containing `offset` (past its newline)
fn line_end(source: &str, offset: usize) -> usize {
    match source[offset.min(source.len())..].find('\n') {
        Some(idx) => offset + idx + 1,
        None => source.len(),
    }
}

/// Delete a declaration line-inclusive: from the start of its line past the
/// trailing newline
fn delete_line(source: &str, span: Span) -> TextEdit {
    let start = line_start(source, span.start.offset);
    let end = line_end(source, span.end.offset);
    TextEdit::delete(start, end - start)
}
