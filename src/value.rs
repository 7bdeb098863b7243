//! Values to be encoded.
//!
//! A [`Value`] consists of its content, the [`Payload`], and, optionally, the
//! [`Schema`] of the type the value belongs to. Values without a schema are
//! bare native values: they can only be encoded if a schema is given
//! alongside.
//!
//! Values are most easily created via `From`:
//!
//! ```
//! use oer_encoder::{Payload, Value};
//!
//! assert_eq!(Value::from(true).payload(), &Payload::Boolean(true));
//! assert_eq!(Value::from("hello").payload().kind_name(), "octets");
//! ```

use std::sync::Arc;
use bytes::Bytes;
use crate::int::Integer;
use crate::oid::Oid;
use crate::real::Real;
use crate::schema::Schema;
use crate::string::BitString;


//------------ Value ---------------------------------------------------------

/// A value of some ASN.1 type.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    /// The content of the value.
    payload: Payload,

    /// The type of the value if it is known.
    schema: Option<Arc<Schema>>,
}

impl Value {
    /// Creates a bare value from a payload.
    pub fn new(payload: Payload) -> Self {
        Value { payload, schema: None }
    }

    /// Creates the NULL value.
    pub fn null() -> Self {
        Self::new(Payload::Null)
    }

    /// Creates a value from octets.
    pub fn octets(octets: impl Into<Bytes>) -> Self {
        Self::new(Payload::Octets(octets.into()))
    }

    /// Creates the value of a SEQUENCE or SET from its present components.
    pub fn components<I, S>(components: I) -> Self
    where I: IntoIterator<Item = (S, Value)>, S: Into<String> {
        Self::new(Payload::Components(
            components.into_iter().map(|(name, value)| {
                (name.into(), value)
            }).collect()
        ))
    }

    /// Creates the value of a SEQUENCE OF or SET OF from its elements.
    pub fn sequence_of<I, V>(elements: I) -> Self
    where I: IntoIterator<Item = V>, V: Into<Value> {
        Self::new(Payload::Elements(
            elements.into_iter().map(Into::into).collect()
        ))
    }

    /// Creates a CHOICE value with the given alternative selected.
    pub fn choice(name: impl Into<String>, value: Value) -> Self {
        Self::new(Payload::Choice(Some((name.into(), Box::new(value)))))
    }

    /// Creates a CHOICE value without a selected alternative.
    pub fn no_choice() -> Self {
        Self::new(Payload::Choice(None))
    }

    /// Attaches a schema to the value.
    pub fn with_schema(self, schema: impl Into<Arc<Schema>>) -> Self {
        Value { payload: self.payload, schema: Some(schema.into()) }
    }

    /// Returns the content of the value.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the schema attached to the value.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    /// Returns the component with the given name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.payload {
            Payload::Components(ref components) => {
                components.iter().find_map(|(item, value)| {
                    (item == name).then_some(value)
                })
            }
            _ => None
        }
    }
}


//--- From

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        Self::new(payload)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::new(Payload::Boolean(value))
    }
}

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Self::new(Payload::Integer(value))
    }
}

macro_rules! integer_from {
    ( $( $type:ident ),* ) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    Self::new(Payload::Integer(value.into()))
                }
            }
        )*
    }
}

integer_from!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::new(Payload::Real(value))
    }
}

impl From<BitString> for Value {
    fn from(value: BitString) -> Self {
        Self::new(Payload::BitString(value))
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Self::new(Payload::Octets(value))
    }
}

impl From<&'_ [u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::new(Payload::Octets(Bytes::copy_from_slice(value)))
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::new(Payload::Octets(value.into()))
    }
}

impl From<&'_ str> for Value {
    fn from(value: &str) -> Self {
        Self::new(Payload::Octets(Bytes::copy_from_slice(value.as_bytes())))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::new(Payload::Octets(value.into_bytes().into()))
    }
}

impl From<Oid> for Value {
    fn from(value: Oid) -> Self {
        Self::new(Payload::Oid(value))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::null()
    }
}


//------------ Payload -------------------------------------------------------

/// The content of a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// A BOOLEAN.
    Boolean(bool),

    /// An INTEGER or ENUMERATED.
    Integer(Integer),

    /// A REAL.
    ///
    /// The value is converted into its encoded form via [`Real`] only when
    /// encoding.
    Real(f64),

    /// A BIT STRING.
    BitString(BitString),

    /// An OCTET STRING, any of the character or time strings, or ANY.
    Octets(Bytes),

    /// NULL.
    Null,

    /// An OBJECT IDENTIFIER.
    Oid(Oid),

    /// The present components of a SEQUENCE or SET by name.
    Components(Vec<(String, Value)>),

    /// The elements of a SEQUENCE OF or SET OF.
    Elements(Vec<Value>),

    /// The selected alternative of a CHOICE, if any.
    Choice(Option<(String, Box<Value>)>),
}

impl Payload {
    /// Returns a short name of the kind of payload for error messages.
    pub fn kind_name(&self) -> &'static str {
        match *self {
            Payload::Boolean(_) => "boolean",
            Payload::Integer(_) => "integer",
            Payload::Real(_) => "real",
            Payload::BitString(_) => "bit string",
            Payload::Octets(_) => "octets",
            Payload::Null => "null",
            Payload::Oid(_) => "object identifier",
            Payload::Components(_) => "components",
            Payload::Elements(_) => "elements",
            Payload::Choice(_) => "choice",
        }
    }

    /// Returns the encoded content octets of a REAL payload.
    pub fn to_real(&self) -> Option<Real> {
        match *self {
            Payload::Real(value) => Some(Real::new(value)),
            _ => None
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_natives() {
        assert_eq!(
            Value::from(-3i16).payload(),
            &Payload::Integer(Integer::from(-3))
        );
        assert_eq!(
            Value::from(200u8).payload(),
            &Payload::Integer(Integer::from(200))
        );
        assert_eq!(
            Value::from(vec![1u8, 2]).payload(),
            &Payload::Octets(Bytes::from_static(b"\x01\x02"))
        );
        assert_eq!(Value::from(()), Value::null());
        assert!(Value::from(1.5).schema().is_none());
    }

    #[test]
    fn schema_attachment() {
        let value = Value::from(true).with_schema(Schema::boolean());
        assert_eq!(value.schema(), Some(&Schema::boolean()));
        assert_ne!(value, Value::from(true));
        assert_eq!(value.payload(), Value::from(true).payload());
    }

    #[test]
    fn composites() {
        let value = Value::components(
            [("a", Value::from(1)), ("b", ().into())]
        );
        assert_eq!(value.get("a"), Some(&Value::from(1)));
        assert_eq!(value.get("b"), Some(&Value::null()));
        assert_eq!(value.get("c"), None);

        let value = Value::sequence_of([1i32, 2, 3]);
        match value.payload() {
            Payload::Elements(elements) => assert_eq!(elements.len(), 3),
            _ => panic!("not elements"),
        }

        assert_eq!(Value::no_choice().payload(), &Payload::Choice(None));
        assert_eq!(
            Value::choice("x", Value::from(1)).payload().kind_name(),
            "choice"
        );
    }

    #[test]
    fn real_payload() {
        assert_eq!(
            Value::from(1.).payload().to_real()
                .map(|x| x.as_slice().to_vec()),
            Some(b"\x80\x00\x01".to_vec())
        );
        assert!(Value::null().payload().to_real().is_none());
    }
}
