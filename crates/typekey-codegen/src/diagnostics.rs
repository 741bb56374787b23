//! Build diagnostics
//!
//! Ordered sink for validation findings. Severities map onto what a build
//! pipeline exposes: warnings keep the build alive, errors block generation.

use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Non-fatal; generation proceeds.
    Warning,
    /// Fatal; generation is aborted if any error was recorded.
    Error,
}

/// Classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Marker attached to a declaration kind that is not a concrete
    /// nominal type.
    TargetKind,
    /// Key without any non-whitespace character.
    BlankKey,
    /// Key containing characters outside the allowed set.
    InvalidCharacter,
    /// Key already claimed by an earlier declaration in the same build.
    DuplicateKey,
    /// No markers found in the whole build unit.
    EmptyRegistry,
    /// A source file could not be parsed.
    ParseFailure,
}

/// Location of a declaration inside the build unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSite {
    /// Originating file or logical source name.
    pub origin: String,
    /// 1-based line.
    pub line: usize,
    /// 0-based column, as reported by the parser.
    pub column: usize,
}

impl SourceSite {
    /// Site at the given coordinates.
    #[inline]
    pub fn new(origin: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            origin: origin.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.origin, self.line, self.column)
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the finding.
    pub severity: Severity,
    /// Classification.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// Primary site, when the finding is tied to a declaration.
    pub site: Option<SourceSite>,
    /// Secondary site, e.g. the first claimant of a duplicated key.
    pub related_site: Option<SourceSite>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.site {
            Some(site) => write!(f, "{label}: {} ({site})", self.message),
            None => write!(f, "{label}: {}", self.message),
        }
    }
}

/// Ordered diagnostics sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Empty sink.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error tied to a declaration site.
    pub fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>, site: SourceSite) {
        self.records.push(Diagnostic {
            severity: Severity::Error,
            kind,
            message: message.into(),
            site: Some(site),
            related_site: None,
        });
    }

    /// Record an error citing two sites (duplicate reporting).
    pub fn error_with_related(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        site: SourceSite,
        related_site: SourceSite,
    ) {
        self.records.push(Diagnostic {
            severity: Severity::Error,
            kind,
            message: message.into(),
            site: Some(site),
            related_site: Some(related_site),
        });
    }

    /// Record a warning not tied to any site.
    pub fn warning(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            site: None,
            related_site: None,
        });
    }

    /// Append every record of another sink, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.records.extend(other.records);
    }

    /// Number of error-severity records.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.records
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Whether no error-severity record exists.
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }

    /// All records, in insertion order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Consume the sink, yielding its records.
    #[inline]
    #[must_use]
    pub fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }
}
