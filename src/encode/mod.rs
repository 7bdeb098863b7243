//! Encoding values in OER.
//!
//! This module provides the machinery to encode [`Value`]s according to
//! the Octet Encoding Rules.
//!
//! Encoding is done by _item encoders_, represented by [`ItemEncoder`],
//! that each know how to encode one kind of ASN.1 type. A [`Registry`]
//! maps types to item encoders, both by the kind of type given as a
//! [`TypeId`] and by the tags of the type given as a [`TagSet`]. The
//! [`Dispatcher`] picks the right encoder for a value from its registry and
//! is handed to the encoder so that encoders for constructed types can
//! encode their components in turn.
//!
//! The [`Encoder`] wraps all this into a simple interface. Most of the time,
//! the free function [`encode`] is all you need:
//!
//! ```
//! use oer_encoder::{encode, Options, Schema, Value};
//!
//! let value = Value::sequence_of([1, 2, 3]);
//! let schema = Schema::sequence_of(Schema::integer());
//! let data = encode(&value, Some(&schema), Options::default()).unwrap();
//! assert_eq!(data.as_ref(), b"\x06\x01\x01\x01\x02\x01\x03");
//! ```
//!
//! Own encoders can be used by implementing [`EncodeValue`] and adding them
//! to a registry via [`ItemEncoder::custom`].
//!
//! [`Value`]: crate::Value
//! [`TypeId`]: crate::TypeId
//! [`TagSet`]: crate::TagSet

pub use self::dispatch::Dispatcher;
pub use self::encoder::{Encoder, encode};
pub use self::item::{EncodeValue, ItemEncoder};
pub use self::registry::Registry;
pub use self::target::{ChunkTarget, Target, infallible};

mod composite;
mod dispatch;
mod encoder;
mod item;
mod leaf;
mod registry;
mod target;

use crate::length::Length;


//------------ Options -------------------------------------------------------

/// Options that affect how values are encoded.
///
/// The options are passed on to every item encoder. Only `max_depth` is
/// reduced by one for every level of nesting.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Options {
    /// Whether constructed values are preceded by their length.
    ///
    /// If this is `false`, constructed values are delimited by the
    /// indefinite length marker and the end-of-contents octets instead.
    pub definite_length: bool,

    /// The maximum number of octets in a single chunk of a string.
    ///
    /// Longer strings are broken up into chunks of this size. If the value
    /// is zero, strings are never broken up.
    pub max_chunk_size: usize,

    /// The maximum number of nested values.
    ///
    /// The top-level value and every component, element or alternative
    /// inside it count as one level each. Encoding a value nested deeper
    /// fails with [`EncodeError::NestingTooDeep`].
    ///
    /// [`EncodeError::NestingTooDeep`]: crate::EncodeError::NestingTooDeep
    pub max_depth: usize,
}

impl Options {
    /// The default value of `max_depth`.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Returns the default options.
    pub const fn new() -> Self {
        Options {
            definite_length: true,
            max_chunk_size: 0,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Returns the options with `definite_length` changed.
    #[must_use]
    pub const fn with_definite_length(mut self, value: bool) -> Self {
        self.definite_length = value;
        self
    }

    /// Returns the options with `max_chunk_size` changed.
    #[must_use]
    pub const fn with_max_chunk_size(mut self, value: usize) -> Self {
        self.max_chunk_size = value;
        self
    }

    /// Returns the options with `max_depth` changed.
    #[must_use]
    pub const fn with_max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Returns the chunk size if strings of `len` octets need chunking.
    pub(crate) fn chunk_size(self, len: usize) -> Option<usize> {
        if self.max_chunk_size > 0 && len > self.max_chunk_size {
            Some(self.max_chunk_size)
        }
        else {
            None
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}


//------------ Encoded -------------------------------------------------------

/// The result of encoding a single value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Encoded {
    /// The encoded octets.
    pub substrate: Vec<u8>,

    /// Whether the substrate is made up of nested encodings.
    ///
    /// Constructed substrates are not self-delimiting and are framed when
    /// they are embedded into another value or returned to the user.
    pub constructed: bool,

    /// Whether the substrate is a whole number of octets by nature.
    pub octet_aligned: bool,
}

impl Encoded {
    /// Creates a primitive result.
    pub fn primitive(substrate: Vec<u8>, octet_aligned: bool) -> Self {
        Encoded { substrate, constructed: false, octet_aligned }
    }

    /// Creates a constructed result.
    pub fn constructed(substrate: Vec<u8>) -> Self {
        Encoded { substrate, constructed: true, octet_aligned: true }
    }

    /// Returns the length of the framed substrate.
    pub fn framed_len(&self, options: Options) -> usize {
        if !self.constructed {
            self.substrate.len()
        }
        else if options.definite_length {
            Length::definite(self.substrate.len()).encoded_len()
                + self.substrate.len()
        }
        else {
            Length::indefinite().encoded_len() + self.substrate.len() + 2
        }
    }

    /// Appends the framed substrate to the end of `target`.
    ///
    /// Primitive substrates are appended unchanged. Constructed substrates
    /// get a length determinant in front of them or, if definite lengths
    /// aren’t requested, are enclosed by the indefinite length marker and
    /// the end-of-contents octets.
    pub fn append_framed(&self, options: Options, target: &mut Vec<u8>) {
        if !self.constructed {
            target.extend_from_slice(&self.substrate);
        }
        else if options.definite_length {
            Length::definite(self.substrate.len()).append_encoded(target);
            target.extend_from_slice(&self.substrate);
        }
        else {
            Length::indefinite().append_encoded(target);
            target.extend_from_slice(&self.substrate);
            target.extend_from_slice(b"\0\0");
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn framed(encoded: &Encoded, options: Options) -> Vec<u8> {
        let mut res = Vec::new();
        encoded.append_framed(options, &mut res);
        assert_eq!(res.len(), encoded.framed_len(options));
        res
    }

    #[test]
    fn options() {
        let options = Options::new()
            .with_definite_length(false)
            .with_max_chunk_size(4);
        assert!(!options.definite_length);
        assert_eq!(options.chunk_size(4), None);
        assert_eq!(options.chunk_size(5), Some(4));
        assert_eq!(Options::default().chunk_size(10000), None);
        assert!(Options::default().definite_length);
        assert_eq!(Options::default().max_depth, Options::DEFAULT_MAX_DEPTH);
        assert_eq!(options.with_max_depth(3).max_depth, 3);
    }

    #[test]
    fn framing() {
        let prim = Encoded::primitive(b"\x01\x05".to_vec(), false);
        let cons = Encoded::constructed(b"\x01\x05".to_vec());
        let indefinite = Options::new().with_definite_length(false);

        assert_eq!(framed(&prim, Options::new()), b"\x01\x05");
        assert_eq!(framed(&prim, indefinite), b"\x01\x05");
        assert_eq!(framed(&cons, Options::new()), b"\x02\x01\x05");
        assert_eq!(framed(&cons, indefinite), b"\x80\x01\x05\0\0");
        assert_eq!(
            framed(&Encoded::constructed(Vec::new()), Options::new()),
            b"\x00"
        );

        let long = Encoded::constructed(vec![0; 200]);
        assert_eq!(&framed(&long, Options::new())[..3], b"\x81\xc8\x00");
    }
}
