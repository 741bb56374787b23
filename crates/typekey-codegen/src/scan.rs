//! Metadata scanner
//!
//! Discovers `#[type_key("...")]` markers in Rust source. The scanner only
//! collects: it records every marked declaration as a [`Candidate`] in
//! discovery order and leaves all judgement to the validator. It may be fed
//! the same sources across several incremental passes; a declaration site is
//! never accumulated twice.

use crate::diagnostics::SourceSite;
use std::collections::HashSet;
use std::fmt;

/// Name of the marker attribute.
pub const MARKER_ATTRIBUTE: &str = "type_key";

/// Declaration kind a marker was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TargetKind {
    Struct,
    Enum,
    Union,
    Trait,
    TypeAlias,
}

impl TargetKind {
    /// Whether this kind is a concrete nominal type that may carry a marker.
    #[inline]
    #[must_use]
    pub fn is_concrete(self) -> bool {
        matches!(self, TargetKind::Struct | TargetKind::Enum)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Struct => "struct",
            TargetKind::Enum => "enum",
            TargetKind::Union => "union",
            TargetKind::Trait => "trait",
            TargetKind::TypeAlias => "type alias",
        };
        f.write_str(name)
    }
}

/// One discovered marker, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Key as written in the attribute; empty when the attribute carried no
    /// parseable string literal (rejected downstream as blank).
    pub key: String,
    /// Qualified path of the marked declaration.
    pub qualified_name: String,
    /// Kind of the marked declaration.
    pub kind: TargetKind,
    /// Where the declaration lives.
    pub site: SourceSite,
}

/// Failure to parse a source file.
#[derive(Debug, thiserror::Error)]
#[error("cannot parse {origin}:{line}:{column}: {message}")]
pub struct ScanError {
    /// Originating source name.
    pub origin: String,
    /// 1-based line of the parse failure.
    pub line: usize,
    /// 0-based column of the parse failure.
    pub column: usize,
    /// Parser message.
    pub message: String,
}

/// Accumulating marker scanner.
///
/// One scanner instance spans the whole build unit; call a `scan_*` method
/// once per source (or repeatedly across passes) and read the ordered
/// [`candidates`](Scanner::candidates) at the end.
#[derive(Debug, Default)]
pub struct Scanner {
    candidates: Vec<Candidate>,
    seen: HashSet<(String, String)>,
}

impl Scanner {
    /// Empty scanner.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one source text.
    ///
    /// `origin` names the source for diagnostics; `module_path` is the
    /// `::`-joined module prefix the file's items live under (empty for the
    /// crate root).
    ///
    /// # Errors
    /// Returns [`ScanError`] when the source is not parseable Rust. Already
    /// accumulated candidates are unaffected.
    pub fn scan_source(
        &mut self,
        origin: &str,
        module_path: &str,
        source: &str,
    ) -> Result<usize, ScanError> {
        let file = syn::parse_file(source).map_err(|err| {
            let start = err.span().start();
            ScanError {
                origin: origin.to_owned(),
                line: start.line,
                column: start.column,
                message: err.to_string(),
            }
        })?;

        let before = self.candidates.len();
        let mut prefix: Vec<String> = module_path
            .split("::")
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        self.walk_items(origin, &mut prefix, &file.items);

        let added = self.candidates.len() - before;
        tracing::trace!(origin, added, "scanned source");
        Ok(added)
    }

    /// All candidates accumulated so far, in discovery order.
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Consume the scanner, yielding the ordered candidate set.
    #[inline]
    #[must_use]
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    fn walk_items(&mut self, origin: &str, prefix: &mut Vec<String>, items: &[syn::Item]) {
        for item in items {
            match item {
                syn::Item::Struct(it) => {
                    self.collect(origin, prefix, &it.attrs, &it.ident, TargetKind::Struct);
                }
                syn::Item::Enum(it) => {
                    self.collect(origin, prefix, &it.attrs, &it.ident, TargetKind::Enum);
                }
                syn::Item::Union(it) => {
                    self.collect(origin, prefix, &it.attrs, &it.ident, TargetKind::Union);
                }
                syn::Item::Trait(it) => {
                    self.collect(origin, prefix, &it.attrs, &it.ident, TargetKind::Trait);
                }
                syn::Item::Type(it) => {
                    self.collect(origin, prefix, &it.attrs, &it.ident, TargetKind::TypeAlias);
                }
                syn::Item::Mod(module) => {
                    if let Some((_, nested)) = &module.content {
                        prefix.push(module.ident.to_string());
                        self.walk_items(origin, prefix, nested);
                        prefix.pop();
                    }
                }
                _ => {}
            }
        }
    }

    fn collect(
        &mut self,
        origin: &str,
        prefix: &[String],
        attrs: &[syn::Attribute],
        ident: &syn::Ident,
        kind: TargetKind,
    ) {
        let Some(attr) = attrs
            .iter()
            .find(|a| a.path().is_ident(MARKER_ATTRIBUTE))
        else {
            return;
        };

        let qualified_name = if prefix.is_empty() {
            ident.to_string()
        } else {
            format!("{}::{}", prefix.join("::"), ident)
        };

        // A site already seen in an earlier pass is not accumulated again.
        let seen_key = (origin.to_owned(), qualified_name.clone());
        if !self.seen.insert(seen_key) {
            return;
        }

        // Malformed attribute arguments become an empty key; the validator
        // rejects it as blank with the declaration's site attached.
        let key = attr
            .parse_args::<syn::LitStr>()
            .map(|lit| lit.value())
            .unwrap_or_default();

        let start: proc_macro2::LineColumn = ident.span().start();
        self.candidates.push(Candidate {
            key,
            qualified_name,
            kind,
            site: SourceSite::new(origin, start.line, start.column),
        });
    }
}
