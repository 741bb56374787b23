//! Parameter envelopes
//!
//! An [`Envelope`] pairs a stable type key with an opaque payload so the
//! payload's type identity survives a boundary crossing (persistence, RPC,
//! deferred execution). The envelope never serializes the payload; whether
//! the whole envelope is serializable is decided by the payload type.

use crate::type_ref::TypeRef;
use serde::{Deserialize, Serialize};

/// Sentinel type key denoting an absent value.
pub const NULL_KEY: &str = "null";

/// Values that can report their own [`TypeRef`].
///
/// Implemented for the scalar primitives out of the box; payload enums or
/// dynamic value types implement it themselves. Object-safe, so boxed
/// heterogeneous payloads work too.
pub trait Typed {
    /// The type reference describing this value.
    fn type_ref(&self) -> TypeRef;
}

macro_rules! impl_typed_primitive {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Typed for $ty {
                fn type_ref(&self) -> TypeRef {
                    TypeRef::Primitive($crate::Primitive::$variant)
                }
            }
        )+
    };
}

impl_typed_primitive! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    char => Char,
}

impl Typed for str {
    fn type_ref(&self) -> TypeRef {
        TypeRef::Primitive(crate::Primitive::Str)
    }
}

impl<T: Typed + ?Sized> Typed for &T {
    fn type_ref(&self) -> TypeRef {
        (**self).type_ref()
    }
}

impl<T: Typed + ?Sized> Typed for Box<T> {
    fn type_ref(&self) -> TypeRef {
        (**self).type_ref()
    }
}

/// A `(type key, opaque value)` pair.
///
/// Produced by `wrap`, consumed by `unwrap`. An absent slot carries the
/// [`NULL_KEY`] sentinel and no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<V> {
    /// Stable key of the value's type, or [`NULL_KEY`].
    pub type_key: String,
    /// The raw, untransformed payload; `None` for absent slots.
    pub value: Option<V>,
}

impl<V> Envelope<V> {
    /// Envelope carrying a present value under the given key.
    #[inline]
    pub fn new(type_key: impl Into<String>, value: V) -> Self {
        Self {
            type_key: type_key.into(),
            value: Some(value),
        }
    }

    /// Envelope for an absent slot.
    #[inline]
    #[must_use]
    pub fn absent() -> Self {
        Self {
            type_key: NULL_KEY.to_owned(),
            value: None,
        }
    }

    /// Whether this envelope denotes an absent value.
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.type_key == NULL_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_envelope_uses_sentinel() {
        let env: Envelope<i32> = Envelope::absent();
        assert!(env.is_absent());
        assert_eq!(env.type_key, "null");
        assert_eq!(env.value, None);
    }

    #[test]
    fn scalar_values_report_primitives() {
        assert_eq!(42_i64.type_ref(), TypeRef::Primitive(Primitive::I64));
        assert_eq!(true.type_ref(), TypeRef::Primitive(Primitive::Bool));
        assert_eq!("x".type_ref(), TypeRef::Primitive(Primitive::Str));

        let boxed: Box<dyn Typed> = Box::new(1.5_f64);
        assert_eq!(boxed.type_ref(), TypeRef::Primitive(Primitive::F64));
    }

    #[test]
    fn envelope_serde_round_trip() {
        let env = Envelope::new("user-profile", serde_json::json!({"id": 7}));
        let text = serde_json::to_string(&env).unwrap();
        let back: Envelope<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, env);
    }
}
