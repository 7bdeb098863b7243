//! Floating point values.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::encode::Target;
use crate::int::Integer;
use crate::length::Length;


//------------ Real ----------------------------------------------------------

/// The content octets of a REAL value.
///
/// OER encodes a REAL without constraints as a length determinant followed
/// by the contents octets of its CER encoding. This type produces those
/// contents octets from an `f64`.
///
/// # Encoding
///
/// Positive zero has no contents octets at all. Negative zero, the two
/// infinities, and NaN are encoded as a single special octet. All other
/// values use the binary form with base 2: a first octet containing the
/// sign and the length of the exponent, the exponent as a two’s complement
/// integer in as few octets as possible, and the mantissa as an unsigned
/// integer. The mantissa is odd, which makes the encoding unique.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Real(Vec<u8>);

impl Real {
    const PLUS_INFINITY: u8 = 0x40;
    const MINUS_INFINITY: u8 = 0x41;
    const NOT_A_NUMBER: u8 = 0x42;
    const MINUS_ZERO: u8 = 0x43;

    /// Creates the contents octets for the given value.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Real(vec![Self::NOT_A_NUMBER])
        }
        if value.is_infinite() {
            if value.is_sign_positive() {
                return Real(vec![Self::PLUS_INFINITY])
            }
            else {
                return Real(vec![Self::MINUS_INFINITY])
            }
        }
        if value == 0. {
            if value.is_sign_positive() {
                return Real(Vec::new())
            }
            else {
                return Real(vec![Self::MINUS_ZERO])
            }
        }

        let (mut mantissa, mut exponent) = decompose(value);
        let shift = mantissa.trailing_zeros();
        mantissa >>= shift;
        exponent += shift as i32;

        let exponent = Integer::from(exponent);
        let exponent = exponent.as_slice();
        let mantissa = mantissa.to_be_bytes();
        let start = mantissa.iter().position(|&x| x != 0).unwrap_or(
            mantissa.len() - 1
        );
        let mantissa = &mantissa[start..];

        let mut res = Vec::with_capacity(
            1 + exponent.len() + mantissa.len() + 1
        );
        let mut first = 0x80;
        if value.is_sign_negative() {
            first |= 0x40;
        }
        match exponent.len() {
            1 => res.push(first),
            2 => res.push(first | 0x01),
            3 => res.push(first | 0x02),
            len => {
                res.push(first | 0x03);
                res.push(len as u8);
            }
        }
        res.extend_from_slice(exponent);
        res.extend_from_slice(mantissa);
        Real(res)
    }

    /// Returns the contents octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the encoded value.
    pub fn encoded_len(&self) -> usize {
        Length::definite(self.0.len()).encoded_len() + self.0.len()
    }

    /// Writes the encoded value to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        Length::definite(self.0.len()).write_encoded(target)?;
        target.write_all(self.0.as_ref())
    }
}

/// Splits a finite, non-zero value into an integer mantissa and exponent.
///
/// The absolute value equals `mantissa * 2^exponent`.
fn decompose(value: f64) -> (u64, i32) {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & 0x000f_ffff_ffff_ffff;
    if exponent == 0 {
        // Subnormal: no implicit leading one.
        (fraction, -1074)
    }
    else {
        (fraction | 0x0010_0000_0000_0000, exponent - 1075)
    }
}


//============ Tests =========================================================
