use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use typekey_model::{Envelope, Primitive, TypeRef, Typed, NULL_KEY};
use typekey_runtime::{StaticProvider, TypeKeyRegistry, UnwrapError};

struct UserProfile;

/// Heterogeneous payload crossing the boundary in the tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Payload {
    User(String),
    Count(i64),
}

impl Typed for Payload {
    fn type_ref(&self) -> TypeRef {
        match self {
            Payload::User(_) => TypeRef::named("app::model::UserProfile"),
            Payload::Count(_) => TypeRef::Primitive(Primitive::I64),
        }
    }
}

fn registry() -> TypeKeyRegistry {
    TypeKeyRegistry::new(StaticProvider::new(vec![(
        "user-profile".to_owned(),
        TypeRef::of::<UserProfile>("app::model::UserProfile"),
    )]))
}

#[test]
fn wrap_uses_registered_keys_and_sentinel() {
    let registry = registry();
    let values = [
        Some(Payload::User("alice".to_owned())),
        None,
        Some(Payload::Count(3)),
    ];

    let envelopes = registry.wrap(&values);

    assert_eq!(envelopes.len(), 3);
    assert_eq!(envelopes[0].type_key, "user-profile");
    assert_eq!(envelopes[1].type_key, NULL_KEY);
    assert_eq!(envelopes[2].type_key, "i64");
}

#[test]
fn envelope_round_trip_preserves_length_order_and_absence() {
    let registry = registry();
    let values = [
        Some(Payload::User("alice".to_owned())),
        None,
        Some(Payload::Count(3)),
    ];

    let envelopes = registry.wrap(&values);
    let restored: Vec<Option<Payload>> = registry
        .unwrap(&envelopes, |value, _resolved| {
            Ok::<_, std::convert::Infallible>(value.clone())
        })
        .unwrap();

    assert_eq!(restored.as_slice(), values.as_slice());
}

#[test]
fn mapper_receives_the_resolved_type() {
    let registry = registry();
    let envelopes = registry.wrap(&[Some(Payload::User("bob".to_owned()))]);

    registry
        .unwrap(&envelopes, |_, resolved| {
            assert_eq!(resolved.qualified_name(), Some("app::model::UserProfile"));
            Ok::<_, std::convert::Infallible>(())
        })
        .unwrap();
}

#[test]
fn unresolvable_envelope_key_fails_unwrap() {
    let registry = registry();
    let envelopes = vec![Envelope::new("stale-key", Payload::Count(1))];

    let err = registry
        .unwrap(&envelopes, |value, _| {
            Ok::<_, std::convert::Infallible>(value.clone())
        })
        .unwrap_err();

    assert!(matches!(err, UnwrapError::Resolve(_)));
}

#[test]
fn envelopes_survive_serialization() {
    // The codec never serializes, but envelopes must be serializable when
    // the payload is: that is how identity crosses the boundary.
    let registry = registry();
    let envelopes = registry.wrap(&[Some(Payload::Count(42)), None]);

    let text = serde_json::to_string(&envelopes).unwrap();
    let back: Vec<Envelope<Payload>> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, envelopes);

    let restored: Vec<Option<Payload>> = registry
        .unwrap(&back, |value, _| Ok::<_, std::convert::Infallible>(value.clone()))
        .unwrap();
    assert_eq!(restored[0], Some(Payload::Count(42)));
    assert_eq!(restored[1], None);
}
