//! Candidate validation
//!
//! Checks every scanned [`Candidate`] in discovery order and accumulates all
//! violations instead of stopping at the first, so one build reports every
//! problem at once. A build with any error never produces an artifact.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::scan::Candidate;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Human-readable description of the allowed key character set.
pub const ALLOWED_KEY_CHARS: &str =
    "alphanumeric characters and '.', '_', '#', '-'";

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._#-]+$").expect("key pattern is valid"));

/// Whether a key fully matches the allowed character set.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Validated `(key, type)` pair, ready for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// The stable key.
    pub key: String,
    /// Qualified path of the mapped type.
    pub qualified_name: String,
}

/// Outcome of validating a candidate set.
#[derive(Debug)]
pub struct Validation {
    /// Entries that passed every check, in discovery order.
    pub entries: Vec<RegistryEntry>,
    /// Everything the validator had to say.
    pub diagnostics: Diagnostics,
}

/// Validate candidates in discovery order.
///
/// Per candidate: target kind, blankness, charset, then global uniqueness.
/// A candidate failing any check is excluded from the entry set but never
/// stops the remaining checks; duplicates cite both the new and the original
/// declaration site in a single diagnostic.
#[must_use]
pub fn validate(candidates: &[Candidate]) -> Validation {
    let mut diagnostics = Diagnostics::new();
    let mut claims: IndexMap<&str, &Candidate> = IndexMap::new();

    for candidate in candidates {
        if !candidate.kind.is_concrete() {
            diagnostics.error(
                DiagnosticKind::TargetKind,
                format!(
                    "#[type_key] can only be applied to structs and enums, \
                     found {} `{}`",
                    candidate.kind, candidate.qualified_name
                ),
                candidate.site.clone(),
            );
            continue;
        }

        if candidate.key.trim().is_empty() {
            diagnostics.error(
                DiagnosticKind::BlankKey,
                format!(
                    "#[type_key] value on `{}` cannot be blank",
                    candidate.qualified_name
                ),
                candidate.site.clone(),
            );
            continue;
        }

        if !is_valid_key(&candidate.key) {
            diagnostics.error(
                DiagnosticKind::InvalidCharacter,
                format!(
                    "#[type_key] value '{}' contains invalid characters; \
                     only {ALLOWED_KEY_CHARS} are allowed",
                    candidate.key
                ),
                candidate.site.clone(),
            );
            continue;
        }

        if let Some(original) = claims.get(candidate.key.as_str()) {
            diagnostics.error_with_related(
                DiagnosticKind::DuplicateKey,
                format!(
                    "duplicate #[type_key] value '{}' on `{}`; already used \
                     by `{}`",
                    candidate.key, candidate.qualified_name, original.qualified_name
                ),
                candidate.site.clone(),
                original.site.clone(),
            );
            continue;
        }

        claims.insert(candidate.key.as_str(), candidate);
    }

    let entries = claims
        .into_values()
        .map(|c| RegistryEntry {
            key: c.key.clone(),
            qualified_name: c.qualified_name.clone(),
        })
        .collect();

    Validation {
        entries,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::SourceSite;
    use crate::scan::TargetKind;
    use pretty_assertions::assert_eq;

    fn candidate(key: &str, name: &str, kind: TargetKind, line: usize) -> Candidate {
        Candidate {
            key: key.to_owned(),
            qualified_name: name.to_owned(),
            kind,
            site: SourceSite::new("src/lib.rs", line, 0),
        }
    }

    #[test]
    fn charset_accepts_the_full_allowed_set() {
        assert!(is_valid_key("user.profile-2#v1_x"));
        assert!(is_valid_key("#1"));
        assert!(!is_valid_key("user/profile"));
        assert!(!is_valid_key("user profile"));
        assert!(!is_valid_key(""));
    }

    #[test]
    fn valid_candidates_become_entries_in_order() {
        let outcome = validate(&[
            candidate("user-profile", "app::UserProfile", TargetKind::Struct, 1),
            candidate("order-v2", "app::Order", TargetKind::Enum, 5),
        ]);

        assert!(outcome.diagnostics.is_clean());
        assert_eq!(outcome.entries.len(), 2);
        assert_eq!(outcome.entries[0].key, "user-profile");
        assert_eq!(outcome.entries[1].qualified_name, "app::Order");
    }

    #[test]
    fn trait_target_is_rejected() {
        let outcome = validate(&[candidate(
            "behaviour",
            "app::Behaviour",
            TargetKind::Trait,
            1,
        )]);

        assert_eq!(outcome.diagnostics.error_count(), 1);
        assert_eq!(
            outcome.diagnostics.records()[0].kind,
            DiagnosticKind::TargetKind
        );
        assert!(outcome.entries.is_empty());
    }

    #[test]
    fn blank_and_whitespace_keys_are_rejected() {
        let outcome = validate(&[
            candidate("", "app::A", TargetKind::Struct, 1),
            candidate("   ", "app::B", TargetKind::Struct, 2),
        ]);

        assert_eq!(outcome.diagnostics.error_count(), 2);
        for record in outcome.diagnostics.records() {
            assert_eq!(record.kind, DiagnosticKind::BlankKey);
        }
    }

    #[test]
    fn duplicate_cites_both_sites_once() {
        let outcome = validate(&[
            candidate("user-profile", "app::UserProfile", TargetKind::Struct, 1),
            candidate("user-profile", "app::Order", TargetKind::Enum, 9),
        ]);

        assert_eq!(outcome.diagnostics.error_count(), 1);
        let record = &outcome.diagnostics.records()[0];
        assert_eq!(record.kind, DiagnosticKind::DuplicateKey);
        assert_eq!(record.site.as_ref().unwrap().line, 9);
        assert_eq!(record.related_site.as_ref().unwrap().line, 1);

        // The first claimant survives.
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].qualified_name, "app::UserProfile");
    }

    #[test]
    fn all_violations_accumulate() {
        let outcome = validate(&[
            candidate("ok-key", "app::Ok", TargetKind::Struct, 1),
            candidate("bad/key", "app::Bad", TargetKind::Struct, 2),
            candidate("", "app::Blank", TargetKind::Struct, 3),
            candidate("ok-key", "app::Dup", TargetKind::Struct, 4),
            candidate("t", "app::T", TargetKind::Trait, 5),
        ]);

        assert_eq!(outcome.diagnostics.error_count(), 4);
        assert_eq!(outcome.entries.len(), 1);
    }
}
