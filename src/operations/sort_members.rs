//! Sort members
//!
//! Reorders the body declarations of a type by the configured category
//! order, alphabetically within a category when requested. The sort is
//! stable, so members the ordering does not distinguish keep their original
//! relative positions. Only slots whose occupant changes produce text
//! edits; a body that is already in order yields the empty edit.

use crate::ast::{AstNode, ClassMember, Modifier};
use crate::config::{Config, MemberCategory};
use crate::edit::TextEdit;
use crate::error::Result;
use crate::project::Document;

use super::{apply_edit, debug_log, resolve_target, TargetRef};

#[derive(Debug)]
pub struct SortOutcome {
    pub edit: TextEdit,
    /// Members that ended up in a different slot
    pub moved: usize,
}

pub struct SortMembersOperation<'a> {
    ast: &'a crate::ast::Ast,
    source: &'a str,
    config: &'a Config,
}

impl<'a> SortMembersOperation<'a> {
    pub fn new(ast: &'a crate::ast::Ast, source: &'a str, config: &'a Config) -> Self {
        Self { ast, source, config }
    }

    pub fn create_text_edit(&self, target: &TargetRef) -> Result<SortOutcome> {
        let class = resolve_target(self.ast, target)?;
        log::debug!("sort members: type={} members={}", class.name, class.body.len());

        let settings = &self.config.sort;
        let mut order: Vec<usize> = (0..class.body.len()).collect();
        order.sort_by_key(|&i| {
            let member = &class.body[i];
            let rank = settings
                .category_order
                .iter()
                .position(|c| *c == category_of(member))
                .unwrap_or(settings.category_order.len());
            let name = if settings.sort_alphabetically {
                member_name(member).to_lowercase()
            } else {
                String::new()
            };
            (rank, name)
        });

        let mut children = Vec::new();
        let mut moved = 0usize;
        for (slot, &from) in order.iter().enumerate() {
            if from == slot {
                continue;
            }
            moved += 1;
            let (dest_start, dest_end) = self.member_range(&class.body[slot]);
            let (src_start, src_end) = self.member_range(&class.body[from]);
            children.push(TextEdit::replace(
                dest_start,
                dest_end - dest_start,
                self.source[src_start..src_end].to_string(),
            ));
        }
        debug_log(format!("sort members: moved={moved}"));
        Ok(SortOutcome { edit: TextEdit::Multi { children }, moved })
    }

    pub fn run(
        &self,
        target: &TargetRef,
        document: &mut dyn Document,
        save: bool,
    ) -> Result<SortOutcome> {
        let outcome = self.create_text_edit(target)?;
        apply_edit(document, &outcome.edit, save)?;
        Ok(outcome)
    }

    /// Text range a member occupies: from the start of its first line to its
    /// last byte, indentation included
    fn member_range(&self, member: &ClassMember) -> (usize, usize) {
        let span = member.span();
        let start = self.source[..span.start.offset.min(self.source.len())]
            .rfind('\n')
            .map(|idx| idx + 1)
            .unwrap_or(0);
        (start, span.end.offset)
    }
}

fn category_of(member: &ClassMember) -> MemberCategory {
    match member {
        ClassMember::Type(_) => MemberCategory::Types,
        ClassMember::Field(f) if is_static(&f.modifiers) => MemberCategory::StaticFields,
        ClassMember::Field(_) => MemberCategory::Fields,
        ClassMember::Initializer(i) if is_static(&i.modifiers) => {
            MemberCategory::StaticInitializers
        }
        ClassMember::Initializer(_) => MemberCategory::Initializers,
        ClassMember::Constructor(_) => MemberCategory::Constructors,
        ClassMember::Method(m) if is_static(&m.modifiers) => MemberCategory::StaticMethods,
        ClassMember::Method(_) | ClassMember::Placeholder(_) => MemberCategory::Methods,
    }
}

fn is_static(modifiers: &[Modifier]) -> bool {
    modifiers.contains(&Modifier::Static)
}

fn member_name(member: &ClassMember) -> &str {
    match member {
        ClassMember::Field(f) => &f.name,
        ClassMember::Method(m) => &m.name,
        ClassMember::Constructor(c) => &c.name,
        ClassMember::Type(t) => t.name(),
        ClassMember::Initializer(_) | ClassMember::Placeholder(_) => "",
    }
}
