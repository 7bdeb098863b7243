//! The registry of item encoders.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use crate::error::EncodeError;
use crate::ident::TagSet;
use crate::schema::{Schema, TypeId};
use super::item::ItemEncoder;


//------------ Registry ------------------------------------------------------

/// The item encoders to use for types.
///
/// A registry contains two maps. The type map finds an encoder by the kind
/// of type, the tag map by the tags of a type. The type map is consulted
/// first. The tag map is used for types the type map doesn’t know.
///
/// The default registry returned by [`Registry::builtin`] contains the
/// encoders of this crate for all kinds of types. The tag map of the
/// default registry maps the tags of SEQUENCE and SET to the encoder for
/// SEQUENCE OF and SET OF since both share the same tags. Only the type map
/// can tell them apart.
///
/// Registries are immutable once in use. To use encoders of your own,
/// create a new registry with them:
///
/// ```
/// use oer_encoder::{
///     Dispatcher, EncodeError, EncodeValue, Encoded, Encoder, ItemEncoder,
///     Options, Registry, Schema, TypeId, Value,
/// };
///
/// struct Yes;
///
/// impl EncodeValue for Yes {
///     fn encode_value(
///         &self, _: &Value, _: &Schema, _: &Dispatcher, _: Options,
///     ) -> Result<Encoded, EncodeError> {
///         Ok(Encoded::primitive(b"yes".to_vec(), true))
///     }
/// }
///
/// let registry = Registry::default().with_type(
///     TypeId::Boolean, ItemEncoder::custom(Yes)
/// );
/// let encoder = Encoder::with_registry(registry);
/// let data = encoder.encode(
///     &Value::from(true), Some(&Schema::boolean()), Options::default()
/// ).unwrap();
/// assert_eq!(data.as_ref(), b"yes");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Registry {
    /// The encoders by tag set.
    tag_map: HashMap<TagSet, ItemEncoder>,

    /// The encoders by type.
    type_map: HashMap<TypeId, ItemEncoder>,
}

/// The shared default registry.
static BUILTIN: LazyLock<Arc<Registry>> = LazyLock::new(|| {
    Arc::new(Registry::defaults())
});

impl Registry {
    /// Returns the shared default registry.
    pub fn builtin() -> Arc<Self> {
        BUILTIN.clone()
    }

    /// Creates a registry without any encoders.
    pub fn empty() -> Self {
        Registry {
            tag_map: HashMap::new(),
            type_map: HashMap::new(),
        }
    }

    /// Creates a new registry with the default encoders.
    pub fn defaults() -> Self {
        let mut res = Self::empty();
        for &type_id in TypeId::ALL {
            let encoder = builtin_encoder(type_id);
            match type_id {
                // The tags of these belong to the OF types, ANY shares the
                // empty tag set with CHOICE.
                TypeId::Sequence | TypeId::Set | TypeId::Any => { }
                _ => {
                    res.tag_map.insert(type_id.tag_set(), encoder.clone());
                }
            }
            res.type_map.insert(type_id, encoder);
        }
        res
    }

    /// Returns the registry with an encoder for a type added.
    ///
    /// An existing encoder for the type is replaced.
    #[must_use]
    pub fn with_type(
        mut self, type_id: TypeId, encoder: ItemEncoder
    ) -> Self {
        self.type_map.insert(type_id, encoder);
        self
    }

    /// Returns the registry with an encoder for a tag set added.
    ///
    /// An existing encoder for the tag set is replaced.
    #[must_use]
    pub fn with_tags(
        mut self, tag_set: TagSet, encoder: ItemEncoder
    ) -> Self {
        self.tag_map.insert(tag_set, encoder);
        self
    }

    /// Returns the registry with all the encoders of `other` added.
    ///
    /// Where both registries have an encoder for the same key, the one from
    /// `other` is used.
    #[must_use]
    pub fn merge(mut self, other: &Registry) -> Self {
        self.tag_map.extend(
            other.tag_map.iter().map(|(k, v)| (k.clone(), v.clone()))
        );
        self.type_map.extend(
            other.type_map.iter().map(|(k, v)| (*k, v.clone()))
        );
        self
    }

    /// Returns the encoder registered for a type.
    pub fn get_type(&self, type_id: TypeId) -> Option<&ItemEncoder> {
        self.type_map.get(&type_id)
    }

    /// Returns the encoder registered for a tag set.
    pub fn get_tags(&self, tag_set: &TagSet) -> Option<&ItemEncoder> {
        self.tag_map.get(tag_set)
    }

    /// Returns the encoder to use for the given schema.
    ///
    /// The encoder registered for the kind of type is preferred. If there
    /// is none, the encoder for the type’s tag set is used. If that doesn’t
    /// exist either and the type has been tagged, the encoder for the tag
    /// set of the untagged type is used.
    pub fn resolve(
        &self, schema: &Schema
    ) -> Result<&ItemEncoder, EncodeError> {
        if let Some(res) = self.type_map.get(&schema.type_id()) {
            return Ok(res)
        }
        if let Some(res) = self.tag_map.get(schema.tag_set()) {
            return Ok(res)
        }
        if let Some(base) = schema.tag_set().base_set() {
            if let Some(res) = self.tag_map.get(&base) {
                log::debug!(
                    "no encoder for tags {}, using base tags {} for {}",
                    schema.tag_set(), base, schema.type_id()
                );
                return Ok(res)
            }
        }
        Err(EncodeError::UnregisteredType {
            type_id: schema.type_id(),
            tag_set: schema.tag_set().clone(),
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Returns the built-in encoder for a kind of type.
fn builtin_encoder(type_id: TypeId) -> ItemEncoder {
    match type_id {
        TypeId::Boolean => ItemEncoder::Boolean,
        TypeId::Integer | TypeId::Enumerated => ItemEncoder::Integer,
        TypeId::BitString => ItemEncoder::BitString,
        TypeId::Null => ItemEncoder::Null,
        TypeId::ObjectIdentifier => ItemEncoder::ObjectIdentifier,
        TypeId::Real => ItemEncoder::Real,
        TypeId::Sequence | TypeId::Set => ItemEncoder::Sequence,
        TypeId::SequenceOf | TypeId::SetOf => ItemEncoder::SequenceOf,
        TypeId::Choice => ItemEncoder::Choice,
        TypeId::Any => ItemEncoder::Any,
        TypeId::External | TypeId::EmbeddedPdv => ItemEncoder::Unimplemented,
        _ => {
            debug_assert!(type_id.is_octets());
            ItemEncoder::OctetString
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::encode::{EncodeValue, Encoded, Options};
    use crate::ident::{Form, Tag};
    use crate::value::Value;
    use super::*;

    #[test]
    fn defaults() {
        let registry = Registry::builtin();
        for &type_id in TypeId::ALL {
            assert!(registry.resolve(&Schema::simple(type_id)).is_ok());
        }
        assert_eq!(
            registry.get_type(TypeId::Sequence), Some(&ItemEncoder::Sequence)
        );
        assert_eq!(
            registry.get_tags(&TypeId::Sequence.tag_set()),
            Some(&ItemEncoder::SequenceOf)
        );
        assert_eq!(
            registry.get_tags(&TagSet::untagged()),
            Some(&ItemEncoder::Choice)
        );
        assert_eq!(
            registry.get_type(TypeId::Enumerated), Some(&ItemEncoder::Integer)
        );
        assert_eq!(
            registry.get_type(TypeId::GeneralizedTime),
            Some(&ItemEncoder::OctetString)
        );
        assert_eq!(
            registry.get_type(TypeId::External),
            Some(&ItemEncoder::Unimplemented)
        );
        assert!(Arc::ptr_eq(&registry, &Registry::builtin()));
        assert_eq!(
            *registry, Registry::default().merge(&Registry::defaults())
        );
    }

    #[test]
    fn resolve_is_deterministic() {
        let registry = Registry::builtin();
        let schema = Schema::integer().explicit(Tag::ctx(0));
        let first = registry.resolve(&schema).unwrap();
        let second = registry.resolve(&schema).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(
            first, registry.resolve(&Schema::integer()).unwrap()
        ));
    }

    #[test]
    fn tag_fallback() {
        let registry = Registry::empty().with_tags(
            TagSet::universal(Tag::INTEGER, Form::Primitive),
            ItemEncoder::Integer
        );
        assert_eq!(
            registry.resolve(&Schema::integer()), Ok(&ItemEncoder::Integer)
        );
        assert_eq!(
            registry.resolve(&Schema::integer().implicit(Tag::ctx(1))),
            Ok(&ItemEncoder::Integer)
        );
        assert_eq!(
            registry.resolve(&Schema::integer().explicit(Tag::ctx(1))),
            Ok(&ItemEncoder::Integer)
        );
        assert!(matches!(
            registry.resolve(&Schema::boolean()),
            Err(EncodeError::UnregisteredType {
                type_id: TypeId::Boolean, ..
            })
        ));

        // The full tag set wins over the base tag set.
        let tagged = Schema::integer().implicit(Tag::ctx(1));
        let registry = registry.with_tags(
            tagged.tag_set().clone(), ItemEncoder::Null
        );
        assert_eq!(registry.resolve(&tagged), Ok(&ItemEncoder::Null));
    }

    #[test]
    fn unregistered() {
        let schema = Schema::integer().implicit(Tag::ctx(1));
        match Registry::empty().resolve(&schema) {
            Err(EncodeError::UnregisteredType { type_id, tag_set }) => {
                assert_eq!(type_id, TypeId::Integer);
                assert_eq!(&tag_set, schema.tag_set());
            }
            res => panic!("unexpected result {:?}", res),
        }
    }

    #[test]
    fn overrides() {
        fn yes(
            _: &Value, _: &Schema, _: &crate::encode::Dispatcher, _: Options
        ) -> Result<Encoded, EncodeError> {
            Ok(Encoded::primitive(b"yes".to_vec(), true))
        }

        let custom = ItemEncoder::custom(yes);
        let overrides = Registry::empty()
            .with_type(TypeId::Boolean, custom.clone());
        let registry = Registry::default().merge(&overrides);
        assert_eq!(registry.get_type(TypeId::Boolean), Some(&custom));
        assert_eq!(
            registry.get_type(TypeId::Integer), Some(&ItemEncoder::Integer)
        );
        assert_eq!(
            registry.get_tags(&TypeId::Boolean.tag_set()),
            Some(&ItemEncoder::Boolean)
        );

        let encoder = registry.resolve(&Schema::boolean()).unwrap();
        let res = encoder.encode_value(
            &true.into(), &Schema::boolean(),
            &crate::encode::Dispatcher::default(), Options::new()
        ).unwrap();
        assert_eq!(res.substrate, b"yes");

        let replaced = Registry::empty().merge(&overrides);
        assert!(replaced.resolve(&Schema::integer()).is_err());
    }
}
