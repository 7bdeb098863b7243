//! Encoding data in Octet Encoding Rules.
//!
//! This crate encodes values of ASN.1 types using the Octet Encoding Rules
//! (OER) defined in ITU-T recommendation X.696. Only the unconstrained
//! forms of the types are used.
//!
//! Values of types without inner types are encoded as X.696 describes. The
//! framing of constructed values is the crate’s own, however, and is not
//! conformant with X.696:
//!
//! * SEQUENCE and SET values are preceded by their length,
//! * SEQUENCE OF and SET OF values are preceded by their length in octets
//!   instead of the number of elements,
//! * with indefinite lengths, constructed values are enclosed by 0x80 and
//!   two zero octets, and
//! * a CHOICE value is encoded as its alternative without any tag, so
//!   alternatives of the same type can’t be told apart.
//!
//! A value is described by a [`Value`] and the type to encode it as by a
//! [`Schema`]. The [`encode()`] function turns the two into octets:
//!
//! ```
//! use oer_encoder::{encode, Options, Schema, Value};
//!
//! let schema = Schema::sequence(vec![])
//!     .component("id", Schema::integer())
//!     .optional("name", Schema::utf8_string());
//! let value = Value::components([("id", Value::from(7))]);
//!
//! let data = encode(&value, Some(&schema), Options::default()).unwrap();
//! assert_eq!(data.as_ref(), b"\x03\x00\x01\x07");
//! ```
//!
//! How each kind of type is encoded is determined by the item encoders of
//! a [`Registry`]. The [`encode`] module explains how this works and how to
//! provide encoders of your own.
//!
//! For a short introduction to ASN.1 and OER, see the [guide].
//!
//! [`encode`]: encode/index.html
//! [guide]: guide/index.html

pub use self::encode::{
    Dispatcher, EncodeValue, Encoded, Encoder, ItemEncoder, Options,
    Registry, encode,
};
pub use self::error::{EncodeError, InvalidOid};
pub use self::ident::{Class, Form, Ident, Tag, TagSet};
pub use self::int::Integer;
pub use self::oid::Oid;
pub use self::real::Real;
pub use self::schema::{NamedType, Presence, Schema, Shape, TypeId};
pub use self::string::BitString;
pub use self::value::{Payload, Value};

pub mod encode;
pub mod oid;
pub mod string;

pub mod guide;

mod error;
mod ident;
mod int;
mod length;
mod real;
mod schema;
mod value;
