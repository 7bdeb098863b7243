//! Encoding data in OER.
//!
//! Encoding a value needs two things: the value itself and the type it is
//! to be encoded as. The crate represents the former with [`Value`] and the
//! latter with [`Schema`].
//!
//! As an example, take this ASN.1 definition:
//!
//! ```text
//! EncapsulatedContentInfo  ::=  SEQUENCE  {
//!     eContentType ContentType,
//!     eContent [0] EXPLICIT OCTET STRING OPTIONAL
//! }
//!
//! ContentType  ::=  OBJECT IDENTIFIER
//! ```
//!
//! The schema for the type is built from the constructor functions of
//! [`Schema`]. Tagging only affects the tag set of a schema. It doesn’t
//! change the encoding.
//!
//! ```
//! use oer_encoder::{Schema, Tag};
//!
//! let schema = Schema::sequence(vec![])
//!     .component("eContentType", Schema::oid())
//!     .optional(
//!         "eContent", Schema::octet_string().explicit(Tag::ctx(0))
//!     );
//! ```
//!
//! A value is made of the components that are actually present, in any
//! order. Values for the components can be created from Rust’s native
//! types via `From`:
//!
//! ```
//! # use oer_encoder::{Schema, Tag};
//! # let schema = Schema::sequence(vec![])
//! #     .component("eContentType", Schema::oid())
//! #     .optional(
//! #         "eContent", Schema::octet_string().explicit(Tag::ctx(0))
//! #     );
//! use oer_encoder::{encode, Oid, Options, Value};
//!
//! let oid: Oid = "1.2.840.113549.1.7.1".parse().unwrap();
//! let value = Value::components([
//!     ("eContent", Value::from("hi")),
//!     ("eContentType", Value::from(oid)),
//! ]);
//! let data = encode(&value, Some(&schema), Options::default()).unwrap();
//! assert_eq!(
//!     data.as_ref(),
//!     b"\x0e\x80\x09\x2a\x86\x48\x86\xf7\x0d\x01\x07\x01\x02hi"
//! );
//! ```
//!
//! The first octet is the length of the sequence, the second the bitmap
//! marking the present optional component. It is followed by the object
//! identifier and the octet string, each with its own length.
//!
//! Note that X.696 doesn’t put a length in front of a SEQUENCE. This
//! length is part of the crate’s own framing of constructed values, which
//! is described in the [crate documentation][crate].
//!
//! If a value already has its schema attached via [`Value::with_schema`],
//! `None` can be given instead of a schema.
//!
//! How particular types are encoded is determined by the item encoders of
//! a [`Registry`]. A registry with item encoders of your own can be used
//! with an [`Encoder`] of its own.
//!
//! [`Encoder`]: crate::Encoder
//! [`Registry`]: crate::Registry
//! [`Schema`]: crate::Schema
//! [`Value`]: crate::Value
//! [`Value::with_schema`]: crate::Value::with_schema
