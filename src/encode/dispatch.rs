//! Encoding a single value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::sync::Arc;
use crate::error::EncodeError;
use crate::schema::Schema;
use crate::value::Value;
use super::{Encoded, Options};
use super::item::EncodeValue;
use super::registry::Registry;


//------------ Dispatcher ----------------------------------------------------

/// Encodes values with the item encoders of a registry.
///
/// The dispatcher determines the schema of a value, picks the item encoder
/// for it from its registry, and runs the encoder. It hands itself to the
/// encoder so that encoders of constructed types can use it to encode
/// their components.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Creates a dispatcher using the given registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Dispatcher { registry }
    }

    /// Returns the registry of the dispatcher.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes a value.
    ///
    /// The value is encoded as `schema` if given or as its own schema
    /// otherwise. The returned substrate is not framed.
    ///
    /// The encoder receives the options with `max_depth` reduced by one.
    /// If it already is zero, the value is not encoded at all.
    pub fn dispatch(
        &self,
        value: &Value,
        schema: Option<&Schema>,
        options: Options,
    ) -> Result<Encoded, EncodeError> {
        let schema = match schema.or_else(|| value.schema()) {
            Some(schema) => schema,
            None => {
                return Err(EncodeError::MissingSchema {
                    payload: value.payload().kind_name()
                })
            }
        };
        let depth = match options.max_depth.checked_sub(1) {
            Some(depth) => depth,
            None => {
                return Err(EncodeError::NestingTooDeep {
                    type_id: schema.type_id()
                })
            }
        };
        let encoder = self.registry.resolve(schema)?;
        log::trace!(
            "resolved {} with tags {} to {:?}",
            schema.type_id(), schema.tag_set(), encoder
        );
        encoder.encode_value(
            value, schema, self, options.with_max_depth(depth)
        )
    }

    /// Encodes a value and appends the framed result to `target`.
    ///
    /// This is what encoders of constructed types use for their components.
    pub fn encode_nested(
        &self,
        value: &Value,
        schema: Option<&Schema>,
        options: Options,
        target: &mut Vec<u8>,
    ) -> Result<(), EncodeError> {
        self.dispatch(value, schema, options)?.append_framed(options, target);
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Registry::builtin())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::sync::Mutex;
    use crate::encode::ItemEncoder;
    use crate::ident::Tag;
    use crate::int::Integer;
    use crate::schema::TypeId;
    use crate::value::Payload;
    use super::*;

    #[test]
    fn effective_schema() {
        let dispatcher = Dispatcher::default();
        let value = Value::from(5).with_schema(Schema::integer());
        assert_eq!(
            dispatcher.dispatch(&value, None, Options::new()).unwrap()
                .substrate,
            b"\x01\x05"
        );

        // An explicit schema wins.
        let value = Value::from(true).with_schema(Schema::integer());
        assert_eq!(
            dispatcher.dispatch(
                &value, Some(&Schema::boolean()), Options::new()
            ).unwrap().substrate,
            b"\xff"
        );

        assert_eq!(
            dispatcher.dispatch(&Value::from(true), None, Options::new()),
            Err(EncodeError::MissingSchema { payload: "boolean" })
        );
    }

    #[test]
    fn null_ignores_payload() {
        let dispatcher = Dispatcher::default();
        for value in [Value::null(), Value::from(12), Value::from("x")] {
            let res = dispatcher.dispatch(
                &value, Some(&Schema::null()), Options::new()
            ).unwrap();
            assert!(res.substrate.is_empty());
            assert!(!res.constructed);
        }
    }

    #[test]
    fn integers_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let counting = ItemEncoder::custom(
            move |value: &Value, schema: &Schema, dispatcher: &Dispatcher,
                  options: Options| {
                if let Payload::Integer(ref int) = *value.payload() {
                    recorder.lock().unwrap().push(int.to_i128());
                }
                ItemEncoder::Integer.encode_value(
                    value, schema, dispatcher, options
                )
            }
        );
        let dispatcher = Dispatcher::new(Arc::new(
            Registry::default().with_type(TypeId::Integer, counting)
        ));
        let res = dispatcher.dispatch(
            &Value::sequence_of([1i32, 2, 3]),
            Some(&Schema::sequence_of(Schema::integer())),
            Options::new()
        ).unwrap();
        assert_eq!(res.substrate, b"\x01\x01\x01\x02\x01\x03");
        assert!(res.constructed);
        assert_eq!(*seen.lock().unwrap(), [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn nested_choice_is_framed_once() {
        let schema = Schema::sequence_of(
            Schema::choice(vec![])
                .alternative("list", Schema::sequence_of(Schema::boolean()))
        );
        let value = Value::sequence_of([
            Value::choice("list", Value::sequence_of([true, false])),
        ]);
        let res = Dispatcher::default().dispatch(
            &value, Some(&schema), Options::new()
        ).unwrap();
        assert_eq!(res.substrate, b"\x02\xff\x00");
    }

    #[test]
    fn nesting_depth() {
        let dispatcher = Dispatcher::default();
        let mut schema = Schema::integer();
        let mut value = Value::from(1);
        for _ in 0..3 {
            schema = Schema::sequence_of(schema);
            value = Value::sequence_of([value]);
        }

        // Three levels of SEQUENCE OF plus the INTEGER make four.
        let options = Options::new().with_max_depth(4);
        assert_eq!(
            dispatcher.dispatch(&value, Some(&schema), options).unwrap()
                .substrate,
            b"\x03\x02\x01\x01"
        );
        assert_eq!(
            dispatcher.dispatch(
                &value, Some(&schema), options.with_max_depth(3)
            ),
            Err(EncodeError::NestingTooDeep { type_id: TypeId::Integer })
        );
        assert_eq!(
            dispatcher.dispatch(
                &value, Some(&schema), options.with_max_depth(0)
            ),
            Err(EncodeError::NestingTooDeep { type_id: TypeId::SequenceOf })
        );

        // CHOICE alternatives count, too.
        let mut schema = Schema::null();
        let mut value = Value::null();
        for _ in 0..3 {
            schema = Schema::choice(vec![]).alternative("x", schema);
            value = Value::choice("x", value);
        }
        assert_eq!(
            dispatcher.dispatch(
                &value, Some(&schema), options.with_max_depth(3)
            ),
            Err(EncodeError::NestingTooDeep { type_id: TypeId::Null })
        );
    }

    #[test]
    fn tag_fallback() {
        let registry = Registry::empty().with_tags(
            TypeId::Integer.tag_set(), ItemEncoder::Integer
        );
        let dispatcher = Dispatcher::new(Arc::new(registry));
        let value = Value::from(Integer::from(-2));
        assert_eq!(
            dispatcher.dispatch(
                &value, Some(&Schema::integer().implicit(Tag::ctx(7))),
                Options::new()
            ).unwrap().substrate,
            b"\x01\xfe"
        );
        assert!(matches!(
            dispatcher.dispatch(
                &Value::null(), Some(&Schema::null()), Options::new()
            ),
            Err(EncodeError::UnregisteredType { type_id: TypeId::Null, .. })
        ));
    }
}
