//! Item encoders.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::fmt;
use std::sync::Arc;
use crate::error::EncodeError;
use crate::schema::Schema;
use crate::value::Value;
use super::{composite, leaf};
use super::{Encoded, Options};
use super::dispatch::Dispatcher;


//------------ EncodeValue ---------------------------------------------------

/// A type that can encode values of some ASN.1 type.
///
/// The encoder is given the value, the schema the value is to be encoded
/// as, and the options. If the type contains other values, the encoder can
/// use the dispatcher to encode them.
///
/// The trait is implemented for closures with the same signature as
/// [`encode_value`][Self::encode_value], which is the easiest way to
/// provide an encoder of your own.
pub trait EncodeValue {
    /// Encodes a value.
    ///
    /// If the value can’t be encoded as the schema’s type, the method
    /// should return [`EncodeError::ValueSchemaMismatch`].
    fn encode_value(
        &self,
        value: &Value,
        schema: &Schema,
        dispatcher: &Dispatcher,
        options: Options,
    ) -> Result<Encoded, EncodeError>;
}

impl<F> EncodeValue for F
where F: Fn(&Value, &Schema, &Dispatcher, Options)
    -> Result<Encoded, EncodeError>
{
    fn encode_value(
        &self,
        value: &Value,
        schema: &Schema,
        dispatcher: &Dispatcher,
        options: Options,
    ) -> Result<Encoded, EncodeError> {
        (self)(value, schema, dispatcher, options)
    }
}


//------------ ItemEncoder ---------------------------------------------------

/// An encoder for one kind of ASN.1 type.
///
/// All the encoders provided by this crate have their own variant. Any
/// other encoder can be wrapped into the `Custom` variant.
///
/// Cloning an item encoder is cheap. The clone of a custom encoder refers
/// to the same encoder and compares equal to it.
#[derive(Clone)]
pub enum ItemEncoder {
    /// Encodes BOOLEAN values.
    Boolean,

    /// Encodes INTEGER and ENUMERATED values.
    Integer,

    /// Encodes BIT STRING values.
    BitString,

    /// Encodes OCTET STRING values and all types encoded like them.
    OctetString,

    /// Encodes NULL values.
    Null,

    /// Encodes OBJECT IDENTIFIER values.
    ObjectIdentifier,

    /// Encodes REAL values.
    Real,

    /// Encodes SEQUENCE and SET values.
    Sequence,

    /// Encodes SEQUENCE OF and SET OF values.
    SequenceOf,

    /// Encodes CHOICE values.
    Choice,

    /// Encodes ANY values.
    Any,

    /// Rejects all values with an unimplemented encoding error.
    Unimplemented,

    /// An encoder provided by the user.
    Custom(Arc<dyn EncodeValue + Send + Sync>),
}

impl ItemEncoder {
    /// Creates an item encoder for a user-provided encoder.
    pub fn custom(encoder: impl EncodeValue + Send + Sync + 'static) -> Self {
        ItemEncoder::Custom(Arc::new(encoder))
    }

    /// Returns a name for the encoder.
    pub fn name(&self) -> &'static str {
        match *self {
            ItemEncoder::Boolean => "boolean",
            ItemEncoder::Integer => "integer",
            ItemEncoder::BitString => "bit string",
            ItemEncoder::OctetString => "octet string",
            ItemEncoder::Null => "null",
            ItemEncoder::ObjectIdentifier => "object identifier",
            ItemEncoder::Real => "real",
            ItemEncoder::Sequence => "sequence",
            ItemEncoder::SequenceOf => "sequence of",
            ItemEncoder::Choice => "choice",
            ItemEncoder::Any => "any",
            ItemEncoder::Unimplemented => "unimplemented",
            ItemEncoder::Custom(_) => "custom",
        }
    }
}

impl EncodeValue for ItemEncoder {
    fn encode_value(
        &self,
        value: &Value,
        schema: &Schema,
        dispatcher: &Dispatcher,
        options: Options,
    ) -> Result<Encoded, EncodeError> {
        match *self {
            ItemEncoder::Boolean => leaf::boolean(value, schema),
            ItemEncoder::Integer => leaf::integer(value, schema),
            ItemEncoder::BitString => leaf::bit_string(value, schema),
            ItemEncoder::OctetString => {
                leaf::octet_string(value, schema, options)
            }
            ItemEncoder::Null => Ok(leaf::null(schema)),
            ItemEncoder::ObjectIdentifier => leaf::oid(value, schema),
            ItemEncoder::Real => leaf::real(value, schema),
            ItemEncoder::Sequence => {
                composite::sequence(value, schema, dispatcher, options)
            }
            ItemEncoder::SequenceOf => {
                composite::sequence_of(value, schema, dispatcher, options)
            }
            ItemEncoder::Choice => {
                composite::choice(value, schema, dispatcher, options)
            }
            ItemEncoder::Any => composite::any(value, schema, options),
            ItemEncoder::Unimplemented => {
                Err(EncodeError::UnimplementedEncoding {
                    type_id: schema.type_id()
                })
            }
            ItemEncoder::Custom(ref encoder) => {
                encoder.encode_value(value, schema, dispatcher, options)
            }
        }
    }
}


//--- PartialEq and Eq

impl PartialEq for ItemEncoder {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ItemEncoder::Custom(left), ItemEncoder::Custom(right)) => {
                Arc::ptr_eq(left, right)
            }
            (ItemEncoder::Custom(_), _) | (_, ItemEncoder::Custom(_)) => {
                false
            }
            _ => self.name() == other.name()
        }
    }
}

impl Eq for ItemEncoder { }


//--- Debug

impl fmt::Debug for ItemEncoder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ItemEncoder::Custom(ref encoder) => {
                write!(f, "ItemEncoder::Custom({:p})", Arc::as_ptr(encoder))
            }
            _ => write!(f, "ItemEncoder({})", self.name())
        }
    }
}


//============ Tests =========================================================
