//! Build pipeline
//!
//! Strings the stages together: feed sources in (any number of passes),
//! then [`finish`](Pipeline::finish) validates the accumulated candidates
//! and renders the artifact. Any validation error aborts generation with
//! every finding attached; a partially valid artifact is never produced.

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, SourceSite};
use crate::generate::render_registry;
use crate::scan::Scanner;
use crate::validate::{validate, RegistryEntry};
use std::path::Path;

/// Fatal pipeline failure.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Validation recorded at least one error; no artifact was generated.
    #[error("cannot generate registry due to #[type_key] validation errors; fix them and rebuild")]
    ValidationFailed {
        /// Every finding of the build, errors and warnings, in order.
        diagnostics: Vec<Diagnostic>,
    },

    /// Reading a source or writing the artifact failed.
    #[error("registry I/O failed for {path}: {source}")]
    Io {
        /// Path involved.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A successfully generated registry artifact.
#[derive(Debug)]
pub struct GeneratedArtifact {
    /// Rendered Rust source of the registry module.
    pub source: String,
    /// The validated entries behind it, in discovery order.
    pub entries: Vec<RegistryEntry>,
    /// Non-fatal findings (warnings) recorded along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedArtifact {
    /// Write the rendered module to disk.
    ///
    /// # Errors
    /// Returns [`BuildError::Io`] when the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), BuildError> {
        std::fs::write(path, &self.source).map_err(|source| BuildError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), entries = self.entries.len(), "wrote registry module");
        Ok(())
    }
}

/// Scan → validate → generate driver for one build unit.
#[derive(Debug, Default)]
pub struct Pipeline {
    scanner: Scanner,
    diagnostics: Diagnostics,
}

impl Pipeline {
    /// Pipeline with no sources scanned yet.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one source text under the given module path.
    ///
    /// An unparsable source becomes an error diagnostic rather than a hard
    /// failure, so the rest of the build unit is still scanned and reported.
    pub fn scan_source(&mut self, origin: &str, module_path: &str, source: &str) {
        if let Err(err) = self.scanner.scan_source(origin, module_path, source) {
            self.diagnostics.error(
                DiagnosticKind::ParseFailure,
                err.message.clone(),
                SourceSite::new(err.origin.clone(), err.line, err.column),
            );
        }
    }

    /// Scan a source file from disk under the given module path.
    ///
    /// # Errors
    /// Returns [`BuildError::Io`] when the file cannot be read; parse
    /// failures are recorded as diagnostics like with
    /// [`scan_source`](Pipeline::scan_source).
    pub fn scan_file(&mut self, path: &Path, module_path: &str) -> Result<(), BuildError> {
        let source = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.scan_source(&path.display().to_string(), module_path, &source);
        Ok(())
    }

    /// Candidates discovered so far.
    #[inline]
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.scanner.candidates().len()
    }

    /// Validate everything scanned and render the artifact.
    ///
    /// Runs exactly once per build, after the last pass. With zero
    /// candidates a non-fatal [`DiagnosticKind::EmptyRegistry`] warning is
    /// recorded and an empty mapping is still generated.
    ///
    /// # Errors
    /// Returns [`BuildError::ValidationFailed`] carrying every diagnostic
    /// when any error was recorded; no artifact exists in that case.
    pub fn finish(self) -> Result<GeneratedArtifact, BuildError> {
        let Pipeline {
            scanner,
            mut diagnostics,
        } = self;

        let candidates = scanner.into_candidates();
        let had_candidates = !candidates.is_empty();

        let outcome = validate(&candidates);
        diagnostics.extend(outcome.diagnostics);

        if !diagnostics.is_clean() {
            let error_count = diagnostics.error_count();
            tracing::warn!(error_count, "registry generation aborted");
            return Err(BuildError::ValidationFailed {
                diagnostics: diagnostics.into_records(),
            });
        }

        if !had_candidates {
            diagnostics.warning(
                DiagnosticKind::EmptyRegistry,
                "no #[type_key] markers found; registry will be empty",
            );
        }

        let source = render_registry(&outcome.entries);
        tracing::debug!(entries = outcome.entries.len(), "generated registry");

        Ok(GeneratedArtifact {
            source,
            entries: outcome.entries,
            diagnostics: diagnostics.into_records(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    #[test]
    fn unparsable_source_becomes_error_diagnostic() {
        let mut pipeline = Pipeline::new();
        pipeline.scan_source("src/broken.rs", "app", "not rust at all {{{");
        pipeline.scan_source(
            "src/ok.rs",
            "app",
            r#"
            #[type_key("still-scanned")]
            pub struct StillScanned;
            "#,
        );
        assert_eq!(pipeline.candidate_count(), 1);

        let err = pipeline.finish().unwrap_err();
        let BuildError::ValidationFailed { diagnostics } = err else {
            panic!("expected validation failure");
        };
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::ParseFailure && d.severity == Severity::Error));
    }

    #[test]
    fn empty_build_warns_and_generates_empty_mapping() {
        let artifact = Pipeline::new().finish().unwrap();
        assert!(artifact.entries.is_empty());
        assert!(artifact.source.contains("Ok(Vec::new())"));
        assert_eq!(artifact.diagnostics.len(), 1);
        assert_eq!(artifact.diagnostics[0].kind, DiagnosticKind::EmptyRegistry);
        assert_eq!(artifact.diagnostics[0].severity, Severity::Warning);
    }
}
