//! Error types.
//!
//! This is a private module. Its public items are re-exported by the parent.

use thiserror::Error;
use crate::ident::TagSet;
use crate::schema::TypeId;


//------------ EncodeError ---------------------------------------------------

/// An error happened while encoding a value.
///
/// Errors are never recovered from inside the encoder. Any partially
/// encoded data is dropped and the error is returned to the caller of
/// [`Encoder::encode`][crate::Encoder::encode].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EncodeError {
    /// There is no encoder for the type or its tags.
    #[error("no encoder registered for {type_id} with tags {tag_set}")]
    UnregisteredType {
        type_id: TypeId,
        tag_set: TagSet,
    },

    /// The value can’t be encoded as the type given by the schema.
    #[error("value doesn’t match {type_id}: {reason}")]
    ValueSchemaMismatch {
        type_id: TypeId,
        reason: String,
    },

    /// A CHOICE value has no alternative selected.
    #[error("no alternative selected for CHOICE with tags {tag_set}")]
    NoAlternativeSelected {
        tag_set: TagSet,
    },

    /// The encoding for the type hasn’t been implemented.
    #[error("encoding {type_id} is not implemented")]
    UnimplementedEncoding {
        type_id: TypeId,
    },

    /// The value is nested deeper than the options allow.
    #[error("{type_id} is nested too deeply")]
    NestingTooDeep {
        type_id: TypeId,
    },

    /// A value without type information was given without a schema.
    #[error("{payload} value has no type and no schema was given")]
    MissingSchema {
        payload: &'static str,
    },
}

impl EncodeError {
    /// Creates a mismatch error for the given type.
    pub fn mismatch(type_id: TypeId, reason: impl Into<String>) -> Self {
        EncodeError::ValueSchemaMismatch { type_id, reason: reason.into() }
    }
}


//------------ InvalidOid ----------------------------------------------------

/// An object identifier couldn’t be created.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum InvalidOid {
    #[error("empty object identifier")]
    Empty,

    #[error("last subidentifier is incomplete")]
    Truncated,

    #[error("at least two components required")]
    TooShort,

    #[error("first component can only be 0, 1, or 2, not {0}")]
    FirstArc(u32),

    #[error("second component for 0. and 1. must be less than 40, not {0}")]
    SecondArc(u32),

    #[error("only integer components allowed")]
    NotAnInteger,
}
