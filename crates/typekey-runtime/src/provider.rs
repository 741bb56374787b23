//! Registry provider seam
//!
//! The generated artifact implements [`RegistryProvider`]; the resolver
//! calls `load()` exactly once, on first use. A failing load is survivable:
//! the resolver degrades to an empty mapping instead of taking the host
//! process down.

use typekey_model::TypeRef;

/// Failure to load the generated mapping.
#[derive(Debug, Clone, thiserror::Error)]
#[error("cannot load the generated registry: {reason}")]
pub struct ProviderError {
    /// What went wrong.
    pub reason: String,
}

impl ProviderError {
    /// Error with the given reason.
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Source of the immutable key → type mapping.
///
/// Implemented by the module `typekey-codegen` generates; test code and
/// manual wiring use [`StaticProvider`].
pub trait RegistryProvider: Send + Sync {
    /// Produce the mapping entries, in generation order.
    ///
    /// # Errors
    /// Returns [`ProviderError`] when the artifact cannot be produced; the
    /// resolver logs it and continues with an empty mapping.
    fn load(&self) -> Result<Vec<(String, TypeRef)>, ProviderError>;
}

/// Provider over a fixed entry list.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    entries: Vec<(String, TypeRef)>,
}

impl StaticProvider {
    /// Provider yielding exactly the given entries.
    #[inline]
    #[must_use]
    pub fn new(entries: Vec<(String, TypeRef)>) -> Self {
        Self { entries }
    }

    /// Provider with no entries.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl RegistryProvider for StaticProvider {
    fn load(&self) -> Result<Vec<(String, TypeRef)>, ProviderError> {
        Ok(self.entries.clone())
    }
}
