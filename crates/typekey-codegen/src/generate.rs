//! Registry generation
//!
//! Renders the validated entry set as one Rust module: a provider type whose
//! `load()` returns the immutable key → type mapping. Rendering is
//! deterministic — identical input ordering yields byte-identical output —
//! and preserves discovery order; no sorting happens here.

use crate::validate::RegistryEntry;

/// Name of the provider type in the generated module.
pub const PROVIDER_TYPE: &str = "GeneratedRegistry";

const HEADER: &str = "\
// @generated by typekey-codegen. Do not edit.
//
// Immutable key -> type mapping for this build unit. The module is
// regenerated wholesale on every successful build; there is no incremental
// patching.

use typekey_model::TypeRef;
use typekey_runtime::{ProviderError, RegistryProvider};

/// Provider backed by the `#[type_key]` markers discovered in this build.
pub struct GeneratedRegistry;

impl RegistryProvider for GeneratedRegistry {
    fn load(&self) -> Result<Vec<(String, TypeRef)>, ProviderError> {
";

const FOOTER: &str = "\
    }
}
";

/// Render the generated registry module.
///
/// Entries are emitted verbatim in the given order; the qualified name is
/// used both as the type path and as the descriptor's name string, so it
/// must be a path the generated module's crate can see.
#[must_use]
pub fn render_registry(entries: &[RegistryEntry]) -> String {
    let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + entries.len() * 96);
    out.push_str(HEADER);

    if entries.is_empty() {
        out.push_str("        Ok(Vec::new())\n");
    } else {
        out.push_str("        Ok(vec![\n");
        for entry in entries {
            let key = escape_str(&entry.key);
            let name = escape_str(&entry.qualified_name);
            out.push_str(&format!(
                "            (\n                \"{key}\".to_owned(),\n                \
                 TypeRef::of::<{path}>(\"{name}\"),\n            ),\n",
                path = entry.qualified_name,
            ));
        }
        out.push_str("        ])\n");
    }

    out.push_str(FOOTER);
    out
}

/// Escape a string for embedding in a Rust string literal.
///
/// Key validation already restricts the character set; escaping anyway keeps
/// the generator safe should the allowed set ever widen.
fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, name: &str) -> RegistryEntry {
        RegistryEntry {
            key: key.to_owned(),
            qualified_name: name.to_owned(),
        }
    }

    #[test]
    fn renders_entries_in_input_order() {
        let source = render_registry(&[
            entry("z-last", "app::Z"),
            entry("a-first", "app::A"),
        ]);

        let z = source.find("\"z-last\"").unwrap();
        let a = source.find("\"a-first\"").unwrap();
        assert!(z < a, "input order must be preserved");
        assert!(source.contains("TypeRef::of::<app::Z>(\"app::Z\")"));
    }

    #[test]
    fn empty_entry_set_renders_empty_mapping() {
        let source = render_registry(&[]);
        assert!(source.contains("Ok(Vec::new())"));
        assert!(!source.contains("vec!["));
    }

    #[test]
    fn rendering_is_byte_identical_for_identical_input() {
        let entries = vec![
            entry("user-profile", "app::model::UserProfile"),
            entry("order-v2", "app::model::Order"),
        ];
        assert_eq!(render_registry(&entries), render_registry(&entries));
    }

    #[test]
    fn escapes_string_literals() {
        assert_eq!(escape_str(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_str("a\\b"), "a\\\\b");
        assert_eq!(escape_str("plain"), "plain");
    }
}
