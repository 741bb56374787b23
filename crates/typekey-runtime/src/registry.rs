//! Resolver service
//!
//! [`TypeKeyRegistry`] serves tiered forward (key → type) and total reverse
//! (type → key) lookups over the generated mapping. The mapping pair is
//! loaded lazily exactly once: the cell performs the uninitialized fast-path
//! check outside the lock, re-checks under the one initialization lock, and
//! derives the reverse mapping inside the same critical section. After
//! publication both maps are immutable and reads take no lock.

use crate::directory::TypeDirectory;
use crate::provider::RegistryProvider;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use typekey_model::{Primitive, TypeRef, ARRAY_SUFFIX};

/// Forward-resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No tier produced a type for the key.
    #[error("no type mapped for key '{key}'")]
    UnresolvedKey {
        /// The key as originally passed in.
        key: String,
    },

    /// The key resolved, but not to the expected type.
    #[error("registry mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        /// The key that was resolved.
        key: String,
        /// Name of the type the caller expected.
        expected: String,
        /// Name of the type actually mapped.
        found: String,
    },
}

/// The immutable mapping pair, published once.
#[derive(Debug, Default)]
struct Mappings {
    forward: IndexMap<String, TypeRef>,
    reverse: HashMap<TypeRef, String>,
}

/// Key ⇄ type resolution service.
///
/// An explicit service object rather than ambient global state: each
/// instance owns its provider, its optional [`TypeDirectory`], and its own
/// lazily initialized mapping pair, so tests construct independent
/// registries freely.
///
/// Forward resolution is deliberately partial — an unknown business key
/// fails loudly, surfacing typos and stale artifacts. Reverse resolution is
/// deliberately total — serialization code can always obtain some stable
/// string for any type, marked or not.
pub struct TypeKeyRegistry {
    provider: Box<dyn RegistryProvider>,
    directory: Option<Box<dyn TypeDirectory>>,
    mappings: OnceCell<Mappings>,
}

impl std::fmt::Debug for TypeKeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeKeyRegistry")
            .field("initialized", &self.mappings.get().is_some())
            .field("has_directory", &self.directory.is_some())
            .finish()
    }
}

impl TypeKeyRegistry {
    /// Registry over the given provider, with no type directory.
    #[must_use]
    pub fn new(provider: impl RegistryProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            directory: None,
            mappings: OnceCell::new(),
        }
    }

    /// Attach the host's type directory, enabling the qualified-name
    /// forward tier.
    #[must_use]
    pub fn with_directory(mut self, directory: impl TypeDirectory + 'static) -> Self {
        self.directory = Some(Box::new(directory));
        self
    }

    /// One-time load of the mapping pair.
    ///
    /// Exactly one of any number of concurrent first callers performs the
    /// load; the rest block on the cell and observe the published pair. An
    /// unloadable artifact degrades to an empty pair with a logged
    /// diagnostic so the host can still start.
    fn mappings(&self) -> &Mappings {
        self.mappings.get_or_init(|| match self.provider.load() {
            Ok(entries) => {
                let mut forward = IndexMap::with_capacity(entries.len());
                let mut reverse = HashMap::with_capacity(entries.len());
                for (key, type_ref) in entries {
                    // First key claiming a type wins the reverse slot.
                    reverse.entry(type_ref.clone()).or_insert_with(|| key.clone());
                    forward.insert(key, type_ref);
                }
                tracing::debug!(entries = forward.len(), "type key registry initialized");
                Mappings { forward, reverse }
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    "cannot load the generated registry; continuing with an empty mapping"
                );
                Mappings::default()
            }
        })
    }

    /// Whether the generated mapping directly contains `key`.
    ///
    /// Fallback tiers (arrays, primitives, type directory) are not
    /// consulted; this answers "was a marker with this key built in".
    #[must_use]
    pub fn can_resolve(&self, key: &str) -> bool {
        self.mappings().forward.contains_key(key)
    }

    /// Resolve a key to a type reference.
    ///
    /// Tiers, first match wins: the generated mapping; the `[]` array
    /// suffix (component resolved recursively through all tiers); the fixed
    /// primitive table; the type directory, when one is attached.
    ///
    /// # Errors
    /// Returns [`ResolveError::UnresolvedKey`] naming the original key when
    /// no tier matches.
    pub fn resolve(&self, key: &str) -> Result<TypeRef, ResolveError> {
        self.resolve_tiers(self.mappings(), key)
            .ok_or_else(|| ResolveError::UnresolvedKey {
                key: key.to_owned(),
            })
    }

    /// Resolve a key and require it to map to `expected`.
    ///
    /// # Errors
    /// [`ResolveError::UnresolvedKey`] when no tier matches;
    /// [`ResolveError::TypeMismatch`] when the resolved type differs from
    /// `expected`.
    pub fn resolve_expected(
        &self,
        key: &str,
        expected: &TypeRef,
    ) -> Result<TypeRef, ResolveError> {
        let resolved = self.resolve(key)?;
        if resolved != *expected {
            return Err(ResolveError::TypeMismatch {
                key: key.to_owned(),
                expected: expected.to_string(),
                found: resolved.to_string(),
            });
        }
        Ok(resolved)
    }

    /// Stable key for a type. Total: every type gets some key.
    ///
    /// Tiers: the derived reverse mapping; the primitive table; arrays
    /// (component key plus `[]`, recursively); finally the type's own
    /// qualified name.
    #[must_use]
    pub fn key_of(&self, type_ref: &TypeRef) -> String {
        Self::compute_key(self.mappings(), type_ref)
    }

    /// Number of entries in the generated mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings().forward.len()
    }

    /// Whether the generated mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings().forward.is_empty()
    }

    /// Keys of the generated mapping, in generation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.mappings().forward.keys().map(String::as_str)
    }

    fn resolve_tiers(&self, mappings: &Mappings, key: &str) -> Option<TypeRef> {
        if let Some(found) = mappings.forward.get(key) {
            return Some(found.clone());
        }

        // Each strip shortens the key, so the recursion terminates.
        if let Some(component_key) = key.strip_suffix(ARRAY_SUFFIX) {
            return self
                .resolve_tiers(mappings, component_key)
                .map(TypeRef::array_of);
        }

        if let Some(primitive) = Primitive::from_name(key) {
            return Some(primitive.into());
        }

        self.directory.as_ref().and_then(|d| d.lookup(key))
    }

    fn compute_key(mappings: &Mappings, type_ref: &TypeRef) -> String {
        if let Some(key) = mappings.reverse.get(type_ref) {
            return key.clone();
        }

        match type_ref {
            TypeRef::Primitive(p) => p.name().to_owned(),
            TypeRef::Array(component) => {
                format!("{}{ARRAY_SUFFIX}", Self::compute_key(mappings, component))
            }
            TypeRef::Named(named) => named.qualified_name().to_owned(),
        }
    }
}
