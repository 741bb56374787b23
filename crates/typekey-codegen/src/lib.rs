//! TypeKey Build Pipeline
//!
//! Scans Rust source for `#[type_key("...")]` markers, validates them, and
//! deterministically generates the immutable registry module consumed by
//! `typekey-runtime`.
//!
//! # Stages
//!
//! - [`Scanner`]: discovers marker candidates across incremental passes
//! - [`validate()`]: enforces target-kind, blank, charset, and uniqueness
//!   invariants, accumulating every violation
//! - [`render_registry`]: emits the provider module, byte-identical for
//!   identical input ordering
//! - [`Pipeline`]: strings the stages together and owns the diagnostics sink
//!
//! # Example
//!
//! ```rust
//! use typekey_codegen::Pipeline;
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.scan_source(
//!     "src/model.rs",
//!     "app::model",
//!     r#"
//!         #[type_key("user-profile")]
//!         pub struct UserProfile { pub id: u64 }
//!     "#,
//! );
//!
//! let artifact = pipeline.finish().unwrap();
//! assert!(artifact.source.contains("user-profile"));
//! ```

pub mod diagnostics;
pub mod generate;
pub mod pipeline;
pub mod scan;
pub mod validate;

// Re-exports
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity, SourceSite};
pub use generate::render_registry;
pub use pipeline::{BuildError, GeneratedArtifact, Pipeline};
pub use scan::{Candidate, Scanner, TargetKind};
pub use validate::{validate, RegistryEntry, Validation, ALLOWED_KEY_CHARS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
