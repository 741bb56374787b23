//! TypeKey Data Model
//!
//! Shared descriptors for the TypeKey registry system.
//!
//! # Core Concepts
//!
//! - [`TypeRef`]: owned, cheaply clonable reference to a concrete program type
//! - [`Primitive`]: the fixed table of primitive types and their stable names
//! - [`Envelope`]: a `(type key, opaque value)` pair carrying type identity
//!   across a boundary without serializing the value
//! - [`Typed`]: trait letting payload values report their own [`TypeRef`]
//!
//! # Example
//!
//! ```rust
//! use typekey_model::{Primitive, TypeRef};
//!
//! let user = TypeRef::named("app::model::UserProfile");
//! let users = TypeRef::array_of(user.clone());
//!
//! assert_eq!(users.to_string(), "app::model::UserProfile[]");
//! assert_eq!(TypeRef::from(Primitive::I64).to_string(), "i64");
//! ```

mod envelope;
mod type_ref;

pub use envelope::{Envelope, Typed, NULL_KEY};
pub use type_ref::{Primitive, TypeRef, ARRAY_SUFFIX};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
