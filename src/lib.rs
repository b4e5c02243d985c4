//! Terminos Language Refactoring engine (tolr)
//!
//! Structural source editing for Terminos source files: computes import
//! rewrites, structural tree edits and synthesized member stubs, and renders
//! everything down to one offset-correct text edit against the original
//! document text.
//!
//! ## Architecture
//!
//! The engine works on trees and bindings produced by an external
//! parser/resolver and never performs I/O of its own:
//!
//! - **ast**: immutable syntax tree of a parsed unit, with byte-offset spans
//! - **binding**: arena of resolved symbols (types, methods, fields, variables)
//! - **scope**: declarations visible at a source position
//! - **imports**: reference collection and the import rewrite engine
//! - **rewrite**: pending structural edits over the immutable tree
//! - **stubs**: synthesized constructors, accessors, delegates and overrides
//! - **edit**: the serializable `{offset, length, text}` edit tree
//! - **project**: traits for the injected workspace collaborators
//! - **operations**: one facade per user-visible command
//!
//! ## Edit Flow
//!
//! ```text
//! Tree + Bindings → Stub Synthesis → Tree Rewrite ┐
//!                 ↘ Import Rewrite ───────────────┴→ TextEdit → Document
//! ```

pub mod ast;
pub mod binding;
pub mod scope;
pub mod imports;
pub mod rewrite;
pub mod stubs;
pub mod edit;
pub mod project;
pub mod operations;
pub mod error;
pub mod config;
pub mod consts;

pub use config::Config;
pub use error::{Error, Result};
