//! The length determinant.
//!
//! This is a private module. The [`Length`] defined herein is not
//! publicly exposed.

use crate::encode::{Target, infallible};


//------------ Length -------------------------------------------------------

/// The length determinant of an encoded value.
///
/// A length can either be definite, meaning it provides the actual
/// number of content octets in the value, or indefinite, in which case the
/// content is delimited by the end-of-contents octets.
///
/// # Encoding
///
/// A definite length of less than 128 is encoded as a single octet
/// containing the length (the short form). Larger lengths are encoded with
/// a first octet that has the most significant bit set and the remaining
/// bits giving the number of octets that follow. Those following octets
/// give the big-endian encoding of the length in as few octets as possible
/// (the long form).
///
/// The indefinite length is encoded as the single octet 0x80, which can’t
/// appear as the start of a valid long form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Length {
    /// The length.
    ///
    /// If this is `None`, the length is indefinite. Otherwise it is definite
    /// with the given value.
    length: Option<Definite>,
}

impl Length {
    /// Creates a new definite length.
    pub fn definite(len: usize) -> Self {
        Self { length: Some(Definite(len)) }
    }

    /// Creates the indefinite length.
    pub fn indefinite() -> Self {
        Self { length: None }
    }

    /// Returns the length of the encoded representation of the value.
    pub fn encoded_len(self) -> usize {
        match self.length {
            Some(definite) => definite.encoded_len(),
            None => 1,
        }
    }

    /// Appends the encoded length to the end of `target`.
    pub fn append_encoded(self, target: &mut Vec<u8>) {
        infallible(self.write_encoded(target))
    }

    /// Writes the encoded length to the given target.
    pub fn write_encoded<T: Target>(
        self, target: &mut T
    ) -> Result<(), T::Error> {
        match self.length {
            Some(definite) => definite.write_encoded(target),
            None => target.write_all(&[0x80]),
        }
    }
}


//------------ Definite ------------------------------------------------------

/// A definite length.
///
/// This is a newtype of `usize` which allows us to do all the encoding
/// things on it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
struct Definite(usize);

impl Definite {
    const LEN: usize = 0usize.to_ne_bytes().len();

    fn encoded_len(self) -> usize {
        if self.0 > 0x7F {
            let idx = self.encoded_start_idx();
            debug_assert!(idx < Self::LEN);

            Self::LEN - idx + 1
        }
        else {
            1
        }
    }

    fn write_encoded<T: Target>(
        self, target: &mut T
    ) -> Result<(), T::Error> {
        if self.0 > 0x7F {
            let idx = self.encoded_start_idx();
            debug_assert!(idx < Self::LEN);

            // LEN will never be greater than 126 bytes. Also, `idx` won’t be
            // greater than LEN, so the subtraction here is fine.
            target.write_all(&[((Self::LEN - idx) | 0x80) as u8])?;
            target.write_all(&self.0.to_be_bytes()[idx..])
        }
        else {
            target.write_all(&[self.0 as u8])
        }
    }

    /// Returns the index of the first non-zero octet of `len`.
    fn encoded_start_idx(self) -> usize {
        (self.0.leading_zeros() / 8) as usize
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode() {
        fn step<const N: usize>(l: Length, res: &[u8; N]) {
            let mut vec = Vec::new();
            l.append_encoded(&mut vec);
            assert_eq!(
                vec.as_slice(), res.as_ref(),
                "append failed for {l:?}: {vec:?}"
            );
            assert_eq!(l.encoded_len(), N, "wrong length for {l:?}");

            let mut vec = Vec::new();
            l.write_encoded(&mut vec).unwrap();
            assert_eq!(
                vec.as_slice(), res.as_ref(),
                "write failed for {l:?}: {vec:?}"
            );
        }

        step(Length::indefinite(), b"\x80");
        step(Length::definite(0), b"\x00");
        step(Length::definite(0x12), b"\x12");
        step(Length::definite(0x7f), b"\x7f");
        step(Length::definite(0x80), b"\x81\x80");
        step(Length::definite(0xff), b"\x81\xff");
        step(Length::definite(0x100), b"\x82\x01\x00");
        step(Length::definite(0xdead), b"\x82\xde\xad");
        step(Length::definite(0x01_0000), b"\x83\x01\x00\x00");
    }
}
