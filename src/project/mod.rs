//! External collaborators
//!
//! The engine core performs no I/O: project-wide symbol search, templates,
//! user interaction and the document buffer are all injected behind these
//! traits. In-memory defaults keep everything runnable without a workspace.

use crate::binding::Modifiers;
use crate::edit::TextEdit;
use crate::error::Result;

/// Search-kind bits for the project type index
pub const SEARCH_CLASSES: u32 = 1;
pub const SEARCH_INTERFACES: u32 = 2;
pub const SEARCH_ALL_TYPES: u32 = SEARCH_CLASSES | SEARCH_INTERFACES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatchKind {
    Class,
    Interface,
}

/// One hit from the project-wide type search
#[derive(Debug, Clone)]
pub struct TypeNameMatch {
    pub qualified_name: String,
    pub modifiers: Modifiers,
    pub kind: TypeMatchKind,
}

impl TypeNameMatch {
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            modifiers: Modifiers::PUBLIC,
            kind: TypeMatchKind::Class,
        }
    }

    pub fn simple_name(&self) -> &str {
        self.qualified_name.rsplit('.').next().unwrap_or("")
    }

    /// Name of the package or enclosing type that contains this type
    pub fn container_name(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(idx) => &self.qualified_name[..idx],
            None => "",
        }
    }

    pub fn package_name(&self) -> &str {
        self.container_name()
    }

    pub fn matches_kind(&self, kinds: u32) -> bool {
        match self.kind {
            TypeMatchKind::Class => kinds & SEARCH_CLASSES != 0,
            TypeMatchKind::Interface => kinds & SEARCH_INTERFACES != 0,
        }
    }
}

/// Project-wide symbol search, used when a name cannot be resolved from
/// local scope. A long-running external operation; implementations block.
pub trait TypeSearch {
    fn search_types(&self, simple_name: &str, kinds: u32) -> Vec<TypeNameMatch>;
}

/// A search index with nothing in it
pub struct EmptySearch;

impl TypeSearch for EmptySearch {
    fn search_types(&self, _simple_name: &str, _kinds: u32) -> Vec<TypeNameMatch> {
        Vec::new()
    }
}

/// In-memory index over a fixed list of qualified names
pub struct FixedSearch {
    matches: Vec<TypeNameMatch>,
}

impl FixedSearch {
    pub fn new(qualified_names: &[&str]) -> Self {
        Self { matches: qualified_names.iter().map(|q| TypeNameMatch::class(*q)).collect() }
    }
}

impl TypeSearch for FixedSearch {
    fn search_types(&self, simple_name: &str, kinds: u32) -> Vec<TypeNameMatch> {
        self.matches
            .iter()
            .filter(|m| m.simple_name() == simple_name && m.matches_kind(kinds))
            .cloned()
            .collect()
    }
}

/// Project-configurable text templates for generated bodies and comments.
/// `None` means "nothing configured", which is distinct from an empty
/// template.
pub trait TemplateProvider {
    /// Template expansion for a generated method body. `body_statement` is
    /// the synthesized core statement (super call, delegation, return).
    fn method_body(
        &self,
        type_name: &str,
        method_name: &str,
        is_constructor: bool,
        body_statement: &str,
    ) -> Option<String>;

    /// Doc comment for a generated member
    fn method_comment(&self, type_name: &str, method_name: &str, param_names: &[String])
        -> Option<String>;
}

/// Provider with no templates configured
pub struct NullTemplates;

impl TemplateProvider for NullTemplates {
    fn method_body(
        &self,
        _type_name: &str,
        _method_name: &str,
        _is_constructor: bool,
        _body_statement: &str,
    ) -> Option<String> {
        None
    }

    fn method_comment(
        &self,
        _type_name: &str,
        _method_name: &str,
        _param_names: &[String],
    ) -> Option<String> {
        None
    }
}

/// Answer to "a declaration with this name already exists"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryAnswer {
    Cancel,
    No,
    Yes,
    YesToAll,
}

/// Callback consulted when a stub would duplicate an existing declaration
pub trait DuplicateQuery {
    fn do_query(&mut self, member_name: &str) -> QueryAnswer;
}

/// Always answers the same thing
pub struct FixedAnswer(pub QueryAnswer);

impl DuplicateQuery for FixedAnswer {
    fn do_query(&mut self, _member_name: &str) -> QueryAnswer {
        self.0
    }
}

/// Callback selecting one qualified name when several match a simple name.
/// Returning `None` cancels the operation.
pub trait ImportChoice {
    fn choose(&mut self, candidates: &[TypeNameMatch], container_hint: &str) -> Option<usize>;
}

/// Multi-slot variant used by organize-imports: one selection per
/// ambiguous reference
pub trait ImportsChoice {
    fn choose(
        &mut self,
        open_choices: &[Vec<TypeNameMatch>],
        ranges: &[crate::ast::Span],
    ) -> Option<Vec<usize>>;
}

/// Always picks the first candidate
pub struct FirstCandidate;

impl ImportChoice for FirstCandidate {
    fn choose(&mut self, _candidates: &[TypeNameMatch], _container_hint: &str) -> Option<usize> {
        Some(0)
    }
}

impl ImportsChoice for FirstCandidate {
    fn choose(
        &mut self,
        open_choices: &[Vec<TypeNameMatch>],
        _ranges: &[crate::ast::Span],
    ) -> Option<Vec<usize>> {
        Some(vec![0; open_choices.len()])
    }
}

/// Caller-visible cancellation checkpoint handle
pub trait Cancel {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels
pub struct Never;

impl Cancel for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Settable flag, for driving cancellation from tests or a UI thread
#[derive(Default)]
pub struct CancelFlag {
    cancelled: std::cell::Cell<bool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.cancelled.set(true);
    }
}

impl Cancel for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Document buffer the final edit is applied to and persisted through
pub trait Document {
    fn text(&self) -> &str;
    fn apply(&mut self, edit: &TextEdit) -> Result<()>;
    fn save(&mut self) -> Result<()>;
}

/// In-memory document
pub struct StringDocument {
    text: String,
    pub save_count: usize,
}

impl StringDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), save_count: 0 }
    }
}

impl Document for StringDocument {
    fn text(&self) -> &str {
        &self.text
    }

    fn apply(&mut self, edit: &TextEdit) -> Result<()> {
        self.text = edit.apply(&self.text)?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.save_count += 1;
        Ok(())
    }
}
