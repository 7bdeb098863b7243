//! The encoders for types with components.
//!
//! This is a private module. The functions are used by
//! [`ItemEncoder`][super::ItemEncoder].
//!
//! None of these encoders add framing of their own. Components are encoded
//! through [`Dispatcher::encode_nested`] which frames constructed
//! components so they can be told apart.

use crate::error::EncodeError;
use crate::schema::{Presence, Schema};
use crate::value::{Payload, Value};
use super::{Encoded, Options};
use super::dispatch::Dispatcher;
use super::leaf;


//------------ sequence ------------------------------------------------------

/// Encodes a SEQUENCE or SET.
///
/// The components are encoded in the order given by the schema. If the
/// schema has OPTIONAL or DEFAULT components, their presence is marked in
/// a bitmap preceding the components, one bit per such component starting
/// with the most significant bit of the first octet. A DEFAULT component
/// with its default value is left out.
pub fn sequence(
    value: &Value,
    schema: &Schema,
    dispatcher: &Dispatcher,
    options: Options,
) -> Result<Encoded, EncodeError> {
    let present = match *value.payload() {
        Payload::Components(ref present) => present,
        ref other => return Err(leaf::mismatch(schema, other)),
    };
    for (idx, (name, _)) in present.iter().enumerate() {
        if !schema.components().iter().any(|item| item.name() == name) {
            return Err(EncodeError::mismatch(
                schema.type_id(), format!("unknown component '{}'", name)
            ))
        }
        if present[..idx].iter().any(|(item, _)| item == name) {
            return Err(EncodeError::mismatch(
                schema.type_id(), format!("duplicate component '{}'", name)
            ))
        }
    }

    let marked = schema.components().iter().filter(|item| {
        item.presence().is_marked()
    }).count();
    let mut res = vec![0u8; marked.div_ceil(8)];
    let mut bit = 0;
    for component in schema.components() {
        let item = match (value.get(component.name()), component.presence()) {
            (None, Presence::Required) => {
                return Err(EncodeError::mismatch(
                    schema.type_id(),
                    format!("missing component '{}'", component.name())
                ))
            }
            (Some(item), Presence::Default(default))
                if item.payload() == default.payload() => None,
            (item, _) => item,
        };
        if component.presence().is_marked() {
            if item.is_some() {
                res[bit / 8] |= 0x80 >> (bit % 8);
            }
            bit += 1;
        }
        if let Some(item) = item {
            dispatcher.encode_nested(
                item, Some(component.schema()), options, &mut res
            )?;
        }
    }
    log::trace!(
        "encoded {} with {} components into {} octets",
        schema.type_id(), present.len(), res.len()
    );
    Ok(Encoded::constructed(res))
}


//------------ sequence_of ---------------------------------------------------

/// Encodes a SEQUENCE OF or SET OF.
///
/// The elements are encoded one after another in their given order.
pub fn sequence_of(
    value: &Value,
    schema: &Schema,
    dispatcher: &Dispatcher,
    options: Options,
) -> Result<Encoded, EncodeError> {
    let elements = match *value.payload() {
        Payload::Elements(ref elements) => elements,
        ref other => return Err(leaf::mismatch(schema, other)),
    };
    let element = match schema.element() {
        Some(element) => element,
        None => {
            return Err(EncodeError::mismatch(
                schema.type_id(), "schema has no element type"
            ))
        }
    };
    let mut res = Vec::new();
    for item in elements {
        dispatcher.encode_nested(item, Some(element), options, &mut res)?;
    }
    log::trace!(
        "encoded {} with {} elements into {} octets",
        schema.type_id(), elements.len(), res.len()
    );
    Ok(Encoded::constructed(res))
}


//------------ choice --------------------------------------------------------

/// Encodes a CHOICE.
///
/// The result is that of the selected alternative.
pub fn choice(
    value: &Value,
    schema: &Schema,
    dispatcher: &Dispatcher,
    options: Options,
) -> Result<Encoded, EncodeError> {
    let (name, item) = match *value.payload() {
        Payload::Choice(Some((ref name, ref item))) => (name, item),
        Payload::Choice(None) => {
            return Err(EncodeError::NoAlternativeSelected {
                tag_set: schema.tag_set().clone()
            })
        }
        ref other => return Err(leaf::mismatch(schema, other)),
    };
    let alternative = schema.alternatives().iter().find(|alternative| {
        alternative.name() == name
    });
    let alternative = match alternative {
        Some(alternative) => alternative,
        None => {
            return Err(EncodeError::mismatch(
                schema.type_id(), format!("unknown alternative '{}'", name)
            ))
        }
    };
    log::trace!("encoding alternative '{}' of {}", name, schema.type_id());
    dispatcher.dispatch(item, Some(alternative.schema()), options)
}


//------------ any -----------------------------------------------------------

/// Encodes an ANY.
///
/// The value must already contain the encoded octets of the actual value.
/// These are encoded as an OCTET STRING.
pub fn any(
    value: &Value, schema: &Schema, options: Options
) -> Result<Encoded, EncodeError> {
    leaf::octet_string(value, schema, options)
}


//============ Tests =========================================================
