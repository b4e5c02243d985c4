//! Abstract Syntax Tree (AST) representation for Terminos source files
//!
//! The tree is produced once per editing session by the external
//! parser/resolver and is never mutated afterwards. Node ranges are byte
//! offsets into the original document text and stay valid for the whole
//! session; structural changes are recorded separately by the rewrite
//! engine and only materialize as text edits.

mod nodes;
mod printer;
mod visitor;

pub use nodes::*;
pub use printer::*;
pub use visitor::*;

use std::fmt;

/// Source location information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Span of source code (start inclusive, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Span covering `[start_offset, end_offset)` when only byte offsets are known
    pub fn from_offsets(start_offset: usize, end_offset: usize) -> Self {
        Self {
            start: Location::new(0, 0, start_offset),
            end: Location::new(0, 0, end_offset),
        }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Check whether a byte offset falls inside the span
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }

    /// Check whether another span intersects this one
    pub fn intersects(&self, other: Span) -> bool {
        self.start.offset < other.end.offset && other.start.offset < self.end.offset
    }

    /// Get the source text for this span
    pub fn source_text<'a>(&self, source: &'a str) -> &'a str {
        if self.start.offset >= source.len() {
            return "";
        }
        let end = self.end.offset.min(source.len());
        &source[self.start.offset..end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start.offset, self.end.offset)
    }
}

/// AST node trait implemented by every node kind
pub trait AstNode {
    /// Get the source span of this node
    fn span(&self) -> Span;
}

/// Root node of a parsed unit
#[derive(Debug, Clone)]
pub struct Ast {
    pub package_decl: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub type_decls: Vec<TypeDecl>,
    pub span: Span,
}

impl Ast {
    /// Name of the package this unit belongs to, or the default package
    pub fn package_name(&self) -> &str {
        self.package_decl.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    /// Find the top-level or nested class declaration with the given name
    pub fn find_class(&self, name: &str) -> Option<&ClassDecl> {
        fn search<'a>(decls: &'a [TypeDecl], name: &str) -> Option<&'a ClassDecl> {
            for decl in decls {
                if let TypeDecl::Class(c) = decl {
                    if c.name == name {
                        return Some(c);
                    }
                    for member in &c.body {
                        if let ClassMember::Type(t) = member {
                            if let Some(found) = search(std::slice::from_ref(t), name) {
                                return Some(found);
                            }
                        }
                    }
                }
            }
            None
        }
        search(&self.type_decls, name)
    }
}

impl AstNode for Ast {
    fn span(&self) -> Span {
        self.span
    }
}
