//! TypeKey Runtime
//!
//! Resolves stable string keys to concrete type references and back, over
//! the immutable mapping a build generated.
//!
//! # Core Concepts
//!
//! - [`TypeKeyRegistry`]: the resolver service — tiered forward lookup,
//!   total reverse lookup, lazy one-time initialization
//! - [`RegistryProvider`]: seam implemented by the generated artifact
//! - [`TypeDirectory`]: optional host capability backing the last forward
//!   tier (qualified-name lookup)
//! - envelope codec: `wrap`/`unwrap` carrying type identity around opaque
//!   payloads
//!
//! # Example
//!
//! ```rust
//! use typekey_model::TypeRef;
//! use typekey_runtime::{StaticProvider, TypeKeyRegistry};
//!
//! struct UserProfile;
//!
//! let registry = TypeKeyRegistry::new(StaticProvider::new(vec![(
//!     "user-profile".to_owned(),
//!     TypeRef::of::<UserProfile>("app::UserProfile"),
//! )]));
//!
//! assert!(registry.can_resolve("user-profile"));
//! assert_eq!(
//!     registry.key_of(&TypeRef::named("app::UserProfile")),
//!     "user-profile",
//! );
//! ```

mod codec;
mod directory;
mod provider;
mod registry;

// Re-exports
pub use codec::UnwrapError;
pub use directory::{StaticTypeDirectory, TypeDirectory};
pub use provider::{ProviderError, RegistryProvider, StaticProvider};
pub use registry::{ResolveError, TypeKeyRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
