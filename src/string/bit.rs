//! Bit strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::encode::Target;
use crate::length::Length;


//------------ BitString -----------------------------------------------------

/// A bit string value.
///
/// Bit strings are a sequence of bits. Unlike octet strings, they do not
/// need to contain a multiple of eight bits.
///
/// You can create a bit string from its octets and the number of unused
/// bits in the last octet via [`new`][Self::new] or from a sequence of
/// individual bits via [`from_bits`][Self::from_bits].
///
/// There are two types of methods for accessing the data in a bit string.
/// Methods starting with `bit` operate on the individual bits while those
/// prefixed with `octet` access entire octets and ignore the fact that there
/// may be unused bits in the final octet.
///
/// # Encoding
///
/// A bit string without size constraints is encoded as a length determinant
/// followed by an octet containing the number of unused bits in the last
/// octet and then the octets containing the bits with the first bit in the
/// most significant bit of the first octet. The unused bits are zero.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BitString {
    /// The number of unused bits in the last byte.
    unused: u8,

    /// The bytes of the bit string.
    bits: Bytes,
}

impl BitString {
    /// Creates a new bit string.
    ///
    /// # Panics
    ///
    /// The function panics if `unused` is larger than seven or if it is
    /// not zero for an empty bit string.
    pub fn new(unused: u8, bits: Bytes) -> Self {
        assert!(unused < 8, "more than seven unused bits");
        assert!(
            unused == 0 || !bits.is_empty(),
            "unused bits in empty bit string"
        );
        Self { unused, bits }
    }

    /// Creates a bit string from a sequence of bits.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        let mut octets = Vec::new();
        let mut len = 0usize;
        for bit in bits {
            if len % 8 == 0 {
                octets.push(0u8);
            }
            if bit {
                if let Some(last) = octets.last_mut() {
                    *last |= 0x80 >> (len % 8);
                }
            }
            len += 1;
        }
        let unused = ((8 - len % 8) % 8) as u8;
        Self { unused, bits: octets.into() }
    }

    /// Returns the value of the given bit.
    pub fn bit(&self, bit: usize) -> bool {
        if bit >= self.bit_len() {
            return false
        }
        let idx = bit >> 3;
        let bit = 7 - (bit as u8 & 7);
        self.bits[idx] & (1 << bit) != 0
    }

    /// Returns the number of bits in the bit string.
    pub fn bit_len(&self) -> usize {
        (self.bits.len() << 3) - (self.unused as usize)
    }

    /// Returns the number of unused bits in the last octet.
    pub fn unused(&self) -> u8 {
        self.unused
    }

    /// Returns the number of octets in the bit string.
    pub fn octet_len(&self) -> usize {
        self.bits.len()
    }

    /// Returns a slice of the octets in the bit string.
    pub fn octet_slice(&self) -> &[u8] {
        self.bits.as_ref()
    }

    /// Returns the length of the encoded bit string.
    pub fn encoded_len(&self) -> usize {
        let len = self.bits.len() + 1;
        Length::definite(len).encoded_len() + len
    }

    /// Writes the encoded bit string to a target.
    ///
    /// Unused bits are written as zero regardless of their value.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        Length::definite(self.bits.len() + 1).write_encoded(target)?;
        target.write_all(&[self.unused])?;
        match self.bits.split_last() {
            Some((&last, head)) => {
                target.write_all(head)?;
                target.write_all(&[last & (0xFFu8 << self.unused)])
            }
            None => Ok(())
        }
    }
}


//============ Tests =========================================================
