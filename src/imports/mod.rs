//! Import management
//!
//! `collector` walks a tree and classifies name references into import
//! candidates; `rewrite` owns the working set of imports for a file and
//! turns the session's additions and removals into a text edit.

pub mod collector;
pub mod rewrite;

pub use collector::{collect_references, StaticRefCandidate, TypeRefCandidate};
pub use rewrite::{ContextKind, ContextResult, ImportContext, ImportRewrite};
