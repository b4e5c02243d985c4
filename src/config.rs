//! Engine configuration
//!
//! Settings that control member generation, import rewriting and member
//! sorting. Everything has a sensible default so the engine is usable
//! without a workspace preference store behind it.

/// Settings for synthesized members
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Attach a generated doc comment to synthesized members (when the
    /// template provider has one configured)
    pub create_comments: bool,
    /// Qualify field accesses in generated bodies with `this.` even when
    /// no name collision forces it
    pub use_keyword_this: bool,
    /// Prefer `isX()` over `getX()` for boolean fields
    pub use_is_for_boolean_getters: bool,
    /// Leave out the `super()` call in a generated default constructor
    pub omit_super_call_for_default_constructor: bool,
    /// Field name prefixes stripped when deriving parameter/accessor names,
    /// e.g. `f` or `m_`
    pub field_prefixes: Vec<String>,
    /// Field name suffixes stripped when deriving parameter/accessor names
    pub field_suffixes: Vec<String>,
    /// Indent unit used when rendering inserted declarations
    pub indent: String,
    /// Line delimiter used in generated text
    pub line_delimiter: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            create_comments: false,
            use_keyword_this: false,
            use_is_for_boolean_getters: true,
            omit_super_call_for_default_constructor: false,
            field_prefixes: Vec::new(),
            field_suffixes: Vec::new(),
            indent: "    ".to_string(),
            line_delimiter: "\n".to_string(),
        }
    }
}

/// Settings for the import rewrite engine
#[derive(Debug, Clone)]
pub struct ImportSettings {
    /// Package prefixes defining import groups, in output order. Imports not
    /// matching any prefix sort after the configured groups.
    pub group_order: Vec<String>,
    /// Emit static imports after non-static ones
    pub statics_last: bool,
    /// During organize, skip unresolved names starting with a lowercase
    /// letter (they are most likely variables the resolver gave up on)
    pub ignore_lowercase_names: bool,
    /// Allow importing from the unnamed default package
    pub allow_default_package_imports: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            group_order: Vec::new(),
            statics_last: true,
            ignore_lowercase_names: true,
            allow_default_package_imports: false,
        }
    }
}

/// Member categories used by the sort-members operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCategory {
    Types,
    StaticFields,
    StaticInitializers,
    StaticMethods,
    Fields,
    Initializers,
    Constructors,
    Methods,
}

/// Settings for the sort-members operation
#[derive(Debug, Clone)]
pub struct SortSettings {
    /// Category order, first sorts first
    pub category_order: Vec<MemberCategory>,
    /// Sort members alphabetically within a category
    pub sort_alphabetically: bool,
}

impl Default for SortSettings {
    fn default() -> Self {
        use MemberCategory::*;
        Self {
            category_order: vec![
                Types,
                StaticFields,
                StaticInitializers,
                StaticMethods,
                Fields,
                Initializers,
                Constructors,
                Methods,
            ],
            sort_alphabetically: true,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub generation: GenerationSettings,
    pub imports: ImportSettings,
    pub sort: SortSettings,
}
