//! Parameter envelope codec
//!
//! Carries type identity for a sequence of heterogeneous values across an
//! opaque boundary. `wrap` records each value's stable key; `unwrap`
//! resolves the key back to a type and hands both to a caller-supplied
//! mapper. Nothing is serialized here — the mapper owns all value
//! transformation.

use crate::registry::{ResolveError, TypeKeyRegistry};
use typekey_model::{Envelope, TypeRef, Typed};

/// Failure while unwrapping envelopes.
#[derive(Debug, thiserror::Error)]
pub enum UnwrapError<E> {
    /// An envelope's type key did not resolve.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An envelope claimed a present value but carried none.
    #[error("envelope with key '{key}' carries no value")]
    MissingValue {
        /// The offending envelope's key.
        key: String,
    },

    /// The caller-supplied mapper rejected a value.
    #[error("mapper failed: {0}")]
    Mapper(E),
}

impl TypeKeyRegistry {
    /// Wrap a sequence of optional values into envelopes.
    ///
    /// Each present value is paired with the key of its reported type (via
    /// [`Typed`]); absent slots become [`Envelope::absent`]. Output length
    /// and order mirror the input exactly.
    pub fn wrap<V: Typed + Clone>(&self, values: &[Option<V>]) -> Vec<Envelope<V>> {
        values
            .iter()
            .map(|slot| match slot {
                Some(value) => Envelope::new(self.key_of(&value.type_ref()), value.clone()),
                None => Envelope::absent(),
            })
            .collect()
    }

    /// Reconstruct a value sequence from envelopes.
    ///
    /// Absent envelopes yield `None` slots. For every other envelope the
    /// key is forward-resolved and `mapper(raw_value, resolved_type)`
    /// produces the output slot. Output length and order mirror the input.
    ///
    /// # Errors
    /// [`UnwrapError::Resolve`] when a key resolves through no tier;
    /// [`UnwrapError::MissingValue`] on a non-absent envelope without a
    /// value; [`UnwrapError::Mapper`] when the mapper fails.
    pub fn unwrap<V, T, E, F>(
        &self,
        envelopes: &[Envelope<V>],
        mut mapper: F,
    ) -> Result<Vec<Option<T>>, UnwrapError<E>>
    where
        F: FnMut(&V, &TypeRef) -> Result<T, E>,
    {
        let mut out = Vec::with_capacity(envelopes.len());
        for envelope in envelopes {
            if envelope.is_absent() {
                out.push(None);
                continue;
            }

            let resolved = self.resolve(&envelope.type_key)?;
            let value = envelope
                .value
                .as_ref()
                .ok_or_else(|| UnwrapError::MissingValue {
                    key: envelope.type_key.clone(),
                })?;
            let mapped = mapper(value, &resolved).map_err(UnwrapError::Mapper)?;
            out.push(Some(mapped));
        }
        Ok(out)
    }
}
