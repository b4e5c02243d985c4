// Global safety caps to prevent pathological or cyclic hierarchy walks

// Scope/candidate discovery: superclass and interface chain walks
pub const HIERARCHY_MAX_STEPS: usize = 200_000;

// Tree rewrite: upper bound on pending edits per rewrite session
pub const REWRITE_MAX_PENDING_EDITS: usize = 200_000;

/// Package that is imported implicitly in every unit
pub const IMPLICIT_PACKAGE: &str = "java.lang";

/// The unnamed default package
pub const DEFAULT_PACKAGE: &str = "";

// Primitive type names; never import candidates
pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "char", "byte", "short", "int", "long", "float", "double", "void",
];

/// Returns true for names that can never be imported
pub fn is_primitive_type_name(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}
