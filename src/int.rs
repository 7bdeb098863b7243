//! Arbitrary-precision integers.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use crate::encode::Target;
use crate::length::Length;


//------------ Integer -------------------------------------------------------

/// An arbitrary-precision signed integer.
///
/// As integers are variable length in OER, this type is just a simple
/// wrapper atop a `Bytes` value containing the content octets: a
/// variable-length, big-endian, two‘s complement byte sequence of the
/// integer using as few octets as possible. Thus, the most-significant bit
/// of the first octet serves as the sign bit.
///
/// Values can be created from all the built-in integer types via `From`
/// or from arbitrary two’s complement or unsigned big-endian octets.
///
/// The same representation is used for ENUMERATED values.
///
/// # Encoding
///
/// An integer without constraints is encoded as a length determinant
/// followed by the content octets.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Integer(Bytes);

impl Integer {
    /// Creates an integer from big-endian two’s complement octets.
    ///
    /// Redundant leading octets are removed. An empty slice is zero.
    pub fn from_signed_octets(octets: &[u8]) -> Self {
        Integer(Bytes::copy_from_slice(trim_signed(octets)))
    }

    /// Creates a non-negative integer from big-endian unsigned octets.
    ///
    /// Leading zeros are removed and a zero octet is added if the sign
    /// bit would be set otherwise. An empty slice is zero.
    pub fn from_unsigned_octets(octets: &[u8]) -> Self {
        let start = octets.iter().position(|&x| x != 0);
        let octets = match start {
            Some(start) => &octets[start..],
            None => return Integer(Bytes::from_static(b"\0")),
        };
        if octets[0] & 0x80 != 0 {
            let mut res = Vec::with_capacity(octets.len() + 1);
            res.push(0);
            res.extend_from_slice(octets);
            Integer(res.into())
        }
        else {
            Integer(Bytes::copy_from_slice(octets))
        }
    }

    /// Returns the content octets of the integer.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns whether the integer is less than zero.
    pub fn is_negative(&self) -> bool {
        self.0[0] & 0x80 != 0
    }

    /// Converts the integer into an `i128` if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        if self.0.len() > 16 {
            return None
        }
        let mut res: i128 = if self.is_negative() { -1 } else { 0 };
        for &octet in self.0.iter() {
            res = (res << 8) | i128::from(octet);
        }
        Some(res)
    }

    /// Returns the length of the encoded integer.
    pub fn encoded_len(&self) -> usize {
        Length::definite(self.0.len()).encoded_len() + self.0.len()
    }

    /// Writes the encoded integer to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        Length::definite(self.0.len()).write_encoded(target)?;
        target.write_all(self.0.as_ref())
    }
}

/// Removes redundant leading octets from two’s complement octets.
///
/// The first octet is redundant if it is all zeros and the sign bit of the
/// next octet is clear or if it is all ones and that sign bit is set.
fn trim_signed(mut octets: &[u8]) -> &[u8] {
    if octets.is_empty() {
        return b"\0"
    }
    while let [first, second, ..] = octets {
        if (*first == 0 && second & 0x80 == 0)
            || (*first == 0xFF && second & 0x80 != 0)
        {
            octets = &octets[1..];
        }
        else {
            break
        }
    }
    octets
}


//--- From

macro_rules! signed_from {
    ( $( $type:ident ),* ) => {
        $(
            impl From<$type> for Integer {
                fn from(value: $type) -> Self {
                    Self::from_signed_octets(&value.to_be_bytes())
                }
            }
        )*
    }
}

macro_rules! unsigned_from {
    ( $( $type:ident ),* ) => {
        $(
            impl From<$type> for Integer {
                fn from(value: $type) -> Self {
                    Self::from_unsigned_octets(&value.to_be_bytes())
                }
            }
        )*
    }
}

signed_from!(i8, i16, i32, i64, i128);
unsigned_from!(u8, u16, u32, u64, u128);


//--- Debug

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_i128() {
            Some(value) => write!(f, "Integer({})", value),
            None => write!(f, "Integer({:?})", self.0.as_ref()),
        }
    }
}


//============ Tests =========================================================
