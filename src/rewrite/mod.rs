//! Tree rewrite engine
//!
//! Records structural edits against an immutable tree without touching it.
//! Each edit targets one body-declaration list, identified by the owner's
//! brace region; anchors and removals refer to original child indices,
//! insertions carry owned synthesized nodes. `compute_text_edit` folds the
//! edit log over the original child list and emits the minimal text edit
//! realizing the intended final sequence, preserving original text for
//! every untouched region.

use crate::ast::{
    AstNode, ClassDecl, ClassMember, InterfaceDecl, Placeholder, PlaceholderKind, SourcePrinter,
    Span,
};
use crate::config::GenerationSettings;
use crate::consts;
use crate::edit::TextEdit;
use crate::error::{Error, Result};

/// The body-declaration list of one type declaration, ordinary or anonymous
#[derive(Clone, Copy)]
pub struct TargetBody<'t> {
    pub body_span: Span,
    pub members: &'t [ClassMember],
}

impl<'t> TargetBody<'t> {
    pub fn of_class(class: &'t ClassDecl) -> Self {
        Self { body_span: class.body_span, members: &class.body }
    }

    pub fn of_interface(interface: &'t InterfaceDecl) -> Self {
        Self { body_span: interface.body_span, members: &interface.body }
    }

    /// Index of the member with the given span, for callers holding a node
    pub fn index_of(&self, member_span: Span) -> Option<usize> {
        self.members.iter().position(|m| m.span() == member_span)
    }
}

#[derive(Debug)]
enum EditOp {
    InsertBefore { node: ClassMember, anchor: usize },
    InsertLast { node: ClassMember },
    Remove { index: usize },
    Replace { index: usize, node: ClassMember },
}

/// Pending edits for one list
#[derive(Debug)]
struct ListEdits {
    owner_body: Span,
    original_spans: Vec<Span>,
    edits: Vec<EditOp>,
}

pub struct TreeRewrite<'a> {
    source: &'a str,
    indent_unit: String,
    delimiter: String,
    lists: Vec<ListEdits>,
}

impl<'a> TreeRewrite<'a> {
    pub fn new(source: &'a str, settings: &GenerationSettings) -> Self {
        Self {
            source,
            indent_unit: settings.indent.clone(),
            delimiter: settings.line_delimiter.clone(),
            lists: Vec::new(),
        }
    }

    /// Wrap raw text as a node usable wherever a synthesized member is
    /// expected; rendering re-indents it and nothing else
    pub fn create_placeholder(&self, text: impl Into<String>, kind: PlaceholderKind) -> ClassMember {
        ClassMember::Placeholder(Placeholder {
            text: text.into(),
            kind,
            span: Span::default(),
        })
    }

    /// Record an insertion immediately before the member at `anchor`
    pub fn insert_before(
        &mut self,
        target: &TargetBody<'_>,
        node: ClassMember,
        anchor: usize,
    ) -> Result<()> {
        if anchor >= target.members.len() {
            return Err(Error::structural(format!(
                "insertion anchor {} out of bounds for list of {}",
                anchor,
                target.members.len()
            )));
        }
        self.list_for(target).edits.push(EditOp::InsertBefore { node, anchor });
        Ok(())
    }

    /// Record an insertion at the end of the list
    pub fn insert_last(&mut self, target: &TargetBody<'_>, node: ClassMember) -> Result<()> {
        self.list_for(target).edits.push(EditOp::InsertLast { node });
        Ok(())
    }

    /// Record removal of the member at `index`
    pub fn remove(&mut self, target: &TargetBody<'_>, index: usize) -> Result<()> {
        self.check_index(target, index)?;
        let list = self.list_for(target);
        if list.edits.iter().any(|e| matches!(e, EditOp::Remove { index: i } | EditOp::Replace { index: i, .. } if *i == index)) {
            return Err(Error::structural(format!("member {index} already removed or replaced")));
        }
        list.edits.push(EditOp::Remove { index });
        Ok(())
    }

    /// Record replacement of the member at `index` with a new node
    pub fn replace(&mut self, target: &TargetBody<'_>, index: usize, node: ClassMember) -> Result<()> {
        self.check_index(target, index)?;
        let list = self.list_for(target);
        if list.edits.iter().any(|e| matches!(e, EditOp::Remove { index: i } | EditOp::Replace { index: i, .. } if *i == index)) {
            return Err(Error::structural(format!("member {index} already removed or replaced")));
        }
        list.edits.push(EditOp::Replace { index, node });
        Ok(())
    }

    /// True when the session has no pending edits
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(|l| l.edits.is_empty())
    }

    fn check_index(&self, target: &TargetBody<'_>, index: usize) -> Result<()> {
        if index >= target.members.len() {
            return Err(Error::structural(format!(
                "member index {} out of bounds for list of {}",
                index,
                target.members.len()
            )));
        }
        Ok(())
    }

    fn list_for(&mut self, target: &TargetBody<'_>) -> &mut ListEdits {
        if let Some(pos) = self.lists.iter().position(|l| l.owner_body == target.body_span) {
            return &mut self.lists[pos];
        }
        self.lists.push(ListEdits {
            owner_body: target.body_span,
            original_spans: target.members.iter().map(|m| m.span()).collect(),
            edits: Vec::new(),
        });
        self.lists.last_mut().unwrap()
    }

    /// Produce the text edit realizing every recorded structural change.
    /// With no pending edits the result is the empty edit.
    pub fn compute_text_edit(&self) -> Result<TextEdit> {
        let total: usize = self.lists.iter().map(|l| l.edits.len()).sum();
        if total > consts::REWRITE_MAX_PENDING_EDITS {
            return Err(Error::structural("pending edit count exceeds cap"));
        }
        let mut printer = SourcePrinter::new(&self.indent_unit, &self.delimiter);
        let mut children = Vec::new();
        for list in &self.lists {
            self.compute_list_edit(list, &mut printer, &mut children);
        }
        Ok(TextEdit::Multi { children })
    }

    fn compute_list_edit(
        &self,
        list: &ListEdits,
        printer: &mut SourcePrinter,
        out: &mut Vec<TextEdit>,
    ) {
        let n = list.original_spans.len();
        let mut removed = vec![false; n];
        let mut replaced: Vec<Option<&ClassMember>> = (0..n).map(|_| None).collect();
        // insertion groups per anchor index; slot n is end-of-list
        let mut groups: Vec<Vec<&ClassMember>> = (0..=n).map(|_| Vec::new()).collect();

        for edit in &list.edits {
            match edit {
                EditOp::InsertBefore { node, anchor } => {
                    // later calls stack before earlier ones at the same anchor
                    groups[*anchor].insert(0, node);
                }
                EditOp::InsertLast { node } => groups[n].push(node),
                EditOp::Remove { index } => removed[*index] = true,
                EditOp::Replace { index, node } => replaced[*index] = Some(node),
            }
        }

        // relocate insertion groups whose anchor vanished to the next
        // sibling, cascading toward end-of-list; replacements keep their
        // anchor, only removals relocate
        for i in 0..n {
            if removed[i] && !groups[i].is_empty() {
                let moved = std::mem::take(&mut groups[i]);
                let target = &mut groups[i + 1];
                for (k, node) in moved.into_iter().enumerate() {
                    target.insert(k, node);
                }
            }
        }

        for i in 0..n {
            let span = list.original_spans[i];
            let anchor_offset = line_start(self.source, span.start.offset);
            if !groups[i].is_empty() {
                let level = self.indent_level_at(anchor_offset);
                let mut text = String::new();
                for node in &groups[i] {
                    text.push_str(&printer.print_member(node, level));
                    text.push_str(&self.delimiter);
                }
                out.push(TextEdit::insert(anchor_offset, text));
            }
            if removed[i] {
                let start = anchor_offset;
                let end = line_end(self.source, span.end.offset);
                out.push(TextEdit::delete(start, end - start));
            } else if let Some(node) = replaced[i] {
                let level = self.indent_level_at(anchor_offset);
                let text = printer.print_member(node, level);
                out.push(TextEdit::replace(anchor_offset, span.end.offset - anchor_offset, text));
            }
        }

        if !groups[n].is_empty() {
            let surviving_last = (0..n).rev().find(|&i| !removed[i]);
            let (offset, prefix, level) = match surviving_last {
                Some(i) => {
                    let span = list.original_spans[i];
                    let level =
                        self.indent_level_at(line_start(self.source, span.start.offset));
                    (line_end(self.source, span.end.offset), String::new(), level)
                }
                None => {
                    // append into an empty (or fully emptied) body, right
                    // after the opening brace
                    let open = list.owner_body.start.offset;
                    let owner_level = self.indent_level_at(line_start(self.source, open));
                    let brace_line_end = line_end(self.source, open);
                    if list.owner_body.end.offset.saturating_sub(1) < brace_line_end {
                        // single-line body `{}`: break it open
                        (open + 1, self.delimiter.clone(), owner_level + 1)
                    } else {
                        (brace_line_end, String::new(), owner_level + 1)
                    }
                }
            };
            let mut text = prefix;
            for node in &groups[n] {
                text.push_str(&printer.print_member(node, level));
                text.push_str(&self.delimiter);
            }
            out.push(TextEdit::insert(offset, text));
        }
    }

    /// Indentation level of the line starting at `line_offset`, measured in
    /// units of the configured indent string
    fn indent_level_at(&self, line_offset: usize) -> usize {
        let rest = &self.source[line_offset.min(self.source.len())..];
        let ws_len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        if self.indent_unit.is_empty() {
            return 0;
        }
        ws_len / self.indent_unit.len()
    }
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())].rfind('\n').map(|idx| idx + 1).unwrap_or(0)
}

fn line_end(source: &str, offset: usize) -> usize {
    match source[offset.min(source.len())..].find('\n') {
        Some(idx) => offset + idx + 1,
        None => source.len(),
    }
}
