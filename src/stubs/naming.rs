//! Naming conventions for synthesized members
//!
//! Derives accessor names and parameter name suggestions from field names,
//! honoring configured field prefixes/suffixes and avoiding reserved words
//! and caller-supplied exclusions.

use crate::config::GenerationSettings;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
        "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
        "interface", "long", "native", "new", "package", "private", "protected", "public",
        "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
        "throw", "throws", "transient", "try", "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

/// Field name with configured prefixes/suffixes stripped, e.g. `fValue` ->
/// `value` with prefix `f`
pub fn base_name(field_name: &str, settings: &GenerationSettings) -> String {
    let mut name = field_name;
    for prefix in &settings.field_prefixes {
        if name.len() > prefix.len() && name.starts_with(prefix.as_str()) {
            let rest = &name[prefix.len()..];
            // only strip when the remainder looks like a fresh word
            if rest.chars().next().map_or(false, |c| c.is_uppercase() || prefix.ends_with('_')) {
                name = rest;
                break;
            }
        }
    }
    let mut name = name.to_string();
    for suffix in &settings.field_suffixes {
        if name.len() > suffix.len() && name.ends_with(suffix.as_str()) {
            name.truncate(name.len() - suffix.len());
            break;
        }
    }
    decapitalize(&name)
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Pick a parameter name from a base, avoiding reserved words and the
/// excluded set by numeric suffixing
pub fn suggest_parameter_name(base: &str, excluded: &[String]) -> String {
    let mut candidate = if base.is_empty() { "arg".to_string() } else { base.to_string() };
    if RESERVED_WORDS.contains(candidate.as_str()) {
        candidate.push('1');
    }
    if !excluded.iter().any(|e| e == &candidate) {
        return candidate;
    }
    let mut counter = 2usize;
    loop {
        let numbered = format!("{candidate}{counter}");
        if !excluded.iter().any(|e| e == &numbered) {
            return numbered;
        }
        counter += 1;
    }
}

/// Getter name for a field. Boolean fields prefer the `is` form when
/// configured; a boolean field already carrying an `is` prefix keeps its
/// name as the getter name.
pub fn getter_name(field_name: &str, is_boolean: bool, settings: &GenerationSettings) -> String {
    let base = base_name(field_name, settings);
    if is_boolean && settings.use_is_for_boolean_getters {
        if let Some(rest) = base.strip_prefix("is") {
            if rest.chars().next().map_or(false, |c| c.is_uppercase()) {
                return base;
            }
        }
        return format!("is{}", capitalize(&base));
    }
    format!("get{}", capitalize(&base))
}

/// Setter name for a field. Never special-cases booleans; the asymmetry
/// with getter naming is deliberate.
pub fn setter_name(field_name: &str, settings: &GenerationSettings) -> String {
    let base = base_name(field_name, settings);
    format!("set{}", capitalize(&base))
}

/// Names an existing method may carry that make it a duplicate of the
/// getter about to be generated. For booleans both the `is` and the `get`
/// form count.
pub fn getter_duplicate_names(
    field_name: &str,
    is_boolean: bool,
    settings: &GenerationSettings,
) -> Vec<String> {
    let base = base_name(field_name, settings);
    let mut names = Vec::new();
    if is_boolean {
        names.push(format!("is{}", capitalize(&base)));
    }
    names.push(format!("get{}", capitalize(&base)));
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_prefix(prefix: &str) -> GenerationSettings {
        GenerationSettings { field_prefixes: vec![prefix.to_string()], ..Default::default() }
    }

    #[test]
    fn strips_configured_prefix() {
        assert_eq!(base_name("fValue", &settings_with_prefix("f")), "value");
        assert_eq!(base_name("m_count", &settings_with_prefix("m_")), "count");
        // no uppercase boundary, prefix stays
        assert_eq!(base_name("flag", &settings_with_prefix("f")), "flag");
    }

    #[test]
    fn boolean_getter_prefers_is() {
        let settings = GenerationSettings::default();
        assert_eq!(getter_name("visible", true, &settings), "isVisible");
        assert_eq!(getter_name("isVisible", true, &settings), "isVisible");
        assert_eq!(getter_name("visible", false, &settings), "getVisible");
    }

    #[test]
    fn setter_never_special_cases_booleans() {
        let settings = GenerationSettings::default();
        assert_eq!(setter_name("visible", &settings), "setVisible");
        assert_eq!(setter_name("isVisible", &settings), "setIsVisible");
    }

    #[test]
    fn parameter_suggestion_avoids_collisions() {
        assert_eq!(suggest_parameter_name("name", &[]), "name");
        assert_eq!(suggest_parameter_name("name", &["name".into()]), "name2");
        assert_eq!(
            suggest_parameter_name("name", &["name".into(), "name2".into()]),
            "name3"
        );
        assert_eq!(suggest_parameter_name("class", &[]), "class1");
    }
}
