//! Type references
//!
//! Provides [`TypeRef`], the descriptor the registry hands out for forward
//! resolution and accepts for reverse resolution, plus the fixed
//! [`Primitive`] table.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Suffix marking an array key, e.g. `"user-profile[]"`.
pub const ARRAY_SUFFIX: &str = "[]";

/// The fixed table of primitive types.
///
/// Primitive keys resolve even when no marker was ever declared; the name of
/// each variant is its stable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Primitive {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Bool,
    Char,
    Str,
}

impl Primitive {
    /// Every primitive, in table order.
    pub const ALL: &'static [Primitive] = &[
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::I128,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::U128,
        Primitive::F32,
        Primitive::F64,
        Primitive::Bool,
        Primitive::Char,
        Primitive::Str,
    ];

    /// Stable name of this primitive, identical to the Rust type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::I128 => "i128",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U128 => "u128",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Str => "str",
        }
    }

    /// Reverse lookup in the primitive table.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Primitive> {
        Primitive::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// Runtime identity witness for this primitive.
    #[must_use]
    pub fn type_id(self) -> TypeId {
        match self {
            Primitive::I8 => TypeId::of::<i8>(),
            Primitive::I16 => TypeId::of::<i16>(),
            Primitive::I32 => TypeId::of::<i32>(),
            Primitive::I64 => TypeId::of::<i64>(),
            Primitive::I128 => TypeId::of::<i128>(),
            Primitive::U8 => TypeId::of::<u8>(),
            Primitive::U16 => TypeId::of::<u16>(),
            Primitive::U32 => TypeId::of::<u32>(),
            Primitive::U64 => TypeId::of::<u64>(),
            Primitive::U128 => TypeId::of::<u128>(),
            Primitive::F32 => TypeId::of::<f32>(),
            Primitive::F64 => TypeId::of::<f64>(),
            Primitive::Bool => TypeId::of::<bool>(),
            Primitive::Char => TypeId::of::<char>(),
            Primitive::Str => TypeId::of::<str>(),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named (nominal) type, identified by its qualified path.
///
/// The optional [`TypeId`] witness is runtime metadata only: two `NamedType`
/// values with the same qualified path are equal whether or not either side
/// carries a witness, so descriptors built by generated code and descriptors
/// built by hand compare equal.
#[derive(Debug, Clone)]
pub struct NamedType {
    qualified_name: Arc<str>,
    type_id: Option<TypeId>,
}

impl NamedType {
    /// Qualified path of the type, e.g. `"app::model::UserProfile"`.
    #[inline]
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Runtime identity witness, when one was captured at construction.
    #[inline]
    #[must_use]
    pub fn witness(&self) -> Option<TypeId> {
        self.type_id
    }
}

impl PartialEq for NamedType {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for NamedType {}

impl Hash for NamedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

/// Reference to a concrete program type.
///
/// Three shapes: a primitive from the fixed table, a named nominal type, or
/// an array of a component type. Identity is structural; cloning is cheap
/// (names and components are reference-counted).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Entry of the fixed primitive table.
    Primitive(Primitive),
    /// Nominal type identified by qualified path.
    Named(NamedType),
    /// Array of a component type.
    Array(Arc<TypeRef>),
}

impl TypeRef {
    /// Named type reference with a runtime identity witness.
    ///
    /// The qualified name must match whatever path the registry artifact was
    /// generated with; the witness lets hosts check [`TypeRef::is`] later.
    #[must_use]
    pub fn of<T: 'static>(qualified_name: impl Into<Arc<str>>) -> Self {
        TypeRef::Named(NamedType {
            qualified_name: qualified_name.into(),
            type_id: Some(TypeId::of::<T>()),
        })
    }

    /// Named type reference without a witness.
    #[must_use]
    pub fn named(qualified_name: impl Into<Arc<str>>) -> Self {
        TypeRef::Named(NamedType {
            qualified_name: qualified_name.into(),
            type_id: None,
        })
    }

    /// Array of the given component type.
    #[inline]
    #[must_use]
    pub fn array_of(component: TypeRef) -> Self {
        TypeRef::Array(Arc::new(component))
    }

    /// Component type, if this is an array.
    #[inline]
    #[must_use]
    pub fn component(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Qualified path, if this is a named type.
    #[inline]
    #[must_use]
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(named) => Some(named.qualified_name()),
            _ => None,
        }
    }

    /// Whether this reference describes the concrete Rust type `T`.
    ///
    /// Only meaningful for primitives and named references carrying a
    /// witness; a witness-less named reference always answers `false`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        match self {
            TypeRef::Primitive(p) => p.type_id() == TypeId::of::<T>(),
            TypeRef::Named(named) => named.type_id == Some(TypeId::of::<T>()),
            TypeRef::Array(_) => false,
        }
    }

    /// Whether this is an array reference.
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }
}

impl From<Primitive> for TypeRef {
    fn from(p: Primitive) -> Self {
        TypeRef::Primitive(p)
    }
}

/// Displays the intrinsic name of the type: the primitive name, the
/// qualified path, or the component followed by `[]`. This is the total
/// fallback the reverse-resolution chain bottoms out on.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.name()),
            TypeRef::Named(named) => f.write_str(named.qualified_name()),
            TypeRef::Array(component) => write!(f, "{component}{ARRAY_SUFFIX}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_names_round_trip() {
        for p in Primitive::ALL {
            assert_eq!(Primitive::from_name(p.name()), Some(*p));
        }
        assert_eq!(Primitive::from_name("int"), None);
    }

    #[test]
    fn named_equality_ignores_witness() {
        struct UserProfile;

        let with_witness = TypeRef::of::<UserProfile>("app::UserProfile");
        let without = TypeRef::named("app::UserProfile");
        assert_eq!(with_witness, without);

        let other = TypeRef::named("app::Order");
        assert_ne!(with_witness, other);
    }

    #[test]
    fn witness_checks() {
        struct UserProfile;
        struct Order;

        let user = TypeRef::of::<UserProfile>("app::UserProfile");
        assert!(user.is::<UserProfile>());
        assert!(!user.is::<Order>());
        assert!(!TypeRef::named("app::UserProfile").is::<UserProfile>());
        assert!(TypeRef::from(Primitive::Bool).is::<bool>());
    }

    #[test]
    fn display_recurses_through_arrays() {
        let nested = TypeRef::array_of(TypeRef::array_of(TypeRef::from(Primitive::U8)));
        assert_eq!(nested.to_string(), "u8[][]");

        let named = TypeRef::array_of(TypeRef::named("app::UserProfile"));
        assert_eq!(named.to_string(), "app::UserProfile[]");
    }

    #[test]
    fn component_access() {
        let arr = TypeRef::array_of(TypeRef::from(Primitive::I32));
        assert!(arr.is_array());
        assert_eq!(arr.component(), Some(&TypeRef::from(Primitive::I32)));
        assert_eq!(TypeRef::from(Primitive::I32).component(), None);
    }
}
