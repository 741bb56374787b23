//! Type directory extension point
//!
//! The last forward-resolution tier interprets a key as a qualified type
//! name known to the running environment. Rust has no ambient reflection,
//! so that capability is an explicit, optional seam the host plugs in; with
//! no directory configured the tier simply never matches.

use std::collections::HashMap;
use typekey_model::TypeRef;

/// Host-supplied qualified-name → type lookup.
pub trait TypeDirectory: Send + Sync {
    /// Resolve a qualified type name, if this environment knows it.
    fn lookup(&self, qualified_name: &str) -> Option<TypeRef>;
}

/// Map-backed directory, populated up front by the host.
#[derive(Debug, Default)]
pub struct StaticTypeDirectory {
    types: HashMap<String, TypeRef>,
}

impl StaticTypeDirectory {
    /// Empty directory.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register type `T` under its qualified name.
    #[must_use]
    pub fn with<T: 'static>(mut self, qualified_name: &str) -> Self {
        self.types
            .insert(qualified_name.to_owned(), TypeRef::of::<T>(qualified_name));
        self
    }

    /// Register an explicit reference under a qualified name.
    #[must_use]
    pub fn with_ref(mut self, qualified_name: &str, type_ref: TypeRef) -> Self {
        self.types.insert(qualified_name.to_owned(), type_ref);
        self
    }

    /// Number of registered names.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no name is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeDirectory for StaticTypeDirectory {
    fn lookup(&self, qualified_name: &str) -> Option<TypeRef> {
        self.types.get(qualified_name).cloned()
    }
}
