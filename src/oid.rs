//! ASN.1 Object Identifiers.
//!
//! This module contains the [`Oid`] type that implements object identifiers,
//! a construct used by ANS.1 to uniquely identify all sorts of things. The
//! type is also re-exported at the top-level.

use std::{fmt, str};
use bytes::Bytes;
use crate::encode::Target;
use crate::error::InvalidOid;
use crate::length::Length;


//------------ Oid -----------------------------------------------------------

/// An object identifer.
///
/// Object identifiers are globally unique, hierarchical values that are used
/// to identify objects or their type. When written, they are presented as a
/// sequence of integers separated by dots such as ‘1.3.6.1.5.5.7.1’ or with
/// the integers separated by white space and enclosed in curly braces such
/// as ‘{ 1 3 6 1 5 5 7 1 }’.
///
/// Values of this type keep a single object identifer in its encoded form,
/// i.e., the sequence of subidentifiers. You can create a value from its
/// components via [`from_arcs`][Self::from_arcs] or by parsing the dotted
/// notation via `FromStr`.
///
/// # Encoding
///
/// The first two components are combined into a single subidentifier as
/// `40 * first + second`. Each subidentifier is encoded in base 128, most
/// significant digit first, with the most significant bit set in all octets
/// but the last. The encoded value is preceded by a length determinant.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Oid(Bytes);

impl Oid {
    /// Creates an object identifier from its encoded subidentifiers.
    ///
    /// The function checks that the octets are a sequence of complete
    /// subidentifiers.
    pub fn from_octets(octets: Bytes) -> Result<Self, InvalidOid> {
        match octets.last() {
            None => Err(InvalidOid::Empty),
            Some(last) if last & 0x80 != 0 => Err(InvalidOid::Truncated),
            Some(_) => Ok(Oid(octets))
        }
    }

    /// Creates an object identifier from its components.
    ///
    /// There need to be at least two components. The first one must be 0,
    /// 1, or 2. If it is 0 or 1, the second one must be less than 40.
    pub fn from_arcs(arcs: &[u32]) -> Result<Self, InvalidOid> {
        let (first, second, tail) = match arcs {
            [first, second, tail @ ..] => (*first, *second, tail),
            _ => return Err(InvalidOid::TooShort),
        };
        if first > 2 {
            return Err(InvalidOid::FirstArc(first))
        }
        if first < 2 && second >= 40 {
            return Err(InvalidOid::SecondArc(second))
        }
        let mut res = Vec::new();
        push_subidentifier(
            &mut res, 40 * u64::from(first) + u64::from(second)
        );
        for &item in tail {
            push_subidentifier(&mut res, u64::from(item));
        }
        Ok(Oid(res.into()))
    }

    /// Returns the encoded subidentifiers.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns an iterator to the components of this object identifier.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.0.as_ref())
    }

    /// Returns the length of the encoded object identifier.
    pub fn encoded_len(&self) -> usize {
        Length::definite(self.0.len()).encoded_len() + self.0.len()
    }

    /// Writes the encoded object identifier to a target.
    pub fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        Length::definite(self.0.len()).write_encoded(target)?;
        target.write_all(self.0.as_ref())
    }
}

/// Appends a subidentifier in base 128 to the end of `target`.
fn push_subidentifier(target: &mut Vec<u8>, mut value: u64) {
    let mut buf = [0u8; 10];
    let mut idx = buf.len() - 1;
    buf[idx] = (value & 0x7F) as u8;
    value >>= 7;
    while value != 0 {
        idx -= 1;
        buf[idx] = (value & 0x7F) as u8 | 0x80;
        value >>= 7;
    }
    target.extend_from_slice(&buf[idx..]);
}


//--- FromStr

impl str::FromStr for Oid {
    type Err = InvalidOid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s.split('.').map(|item| {
            u32::from_str(item).map_err(|_| InvalidOid::NotAnInteger)
        }).collect::<Result<Vec<_>, _>>()?;
        Self::from_arcs(&arcs)
    }
}


//--- AsRef

impl AsRef<[u8]> for Oid {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//--- Display and Debug

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut components = self.iter();
        // There’s always at least one and they can’t be illegal.
        if let Some(first) = components.next() {
            match first.to_u64() {
                Some(value) => write!(f, "{}", value)?,
                None => write!(f, "(not implemented)")?,
            }
        }
        for component in components {
            match component.to_u64() {
                Some(value) => write!(f, ".{}", value)?,
                None => write!(f, ".(not implemented)")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}


//------------ Component -----------------------------------------------------

/// A component of an object identifier.
///
/// Although these components are integers, they are encoded in a slightly
/// weird way. Because of this, we keep them as the encoded octets.
#[derive(Clone, Copy, Debug)]
pub struct Component<'a> {
    /// The position of the component in the object identifier.
    position: Position,

    /// The octets of the subidentifer.
    ///
    /// These octets translate to an integer value. The most significant bit
    /// of each octet indicates whether there are more octets to follow (and
    /// can thus be ignored in this context), the lower seven bits are then
    /// shifted accordingly to make up an unsigned integer in big endian
    /// notation.
    slice: &'a [u8],
}

/// The position of the component in the object identifier.
///
/// As the first two components of the object identifer are encoded in the
/// first subidentifier of the encoded value, we have three different cases.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Position {
    /// This is the first component of the identifier.
    ///
    /// This is 0 if the integer value of the subidentifer is 0..39,
    /// 1 for 40..79, and 2 for anything else.
    First,

    /// This is the second component of the identifier.
    ///
    /// This is the integer value of the subidentifer module 40 if the value
    /// is below 80 and otherwise the value minus 80.
    Second,

    /// This is any later component of the identifier.
    ///
    /// This is identical to the integer value of the subidentifier.
    Other,
}

impl<'a> Component<'a> {
    /// Creates a new component.
    fn new(slice: &'a [u8], position: Position) -> Self {
        Component { slice, position }
    }

    /// Attempts to convert the component to `u64`.
    ///
    /// Since the component’s value can be larger than the maximum value of
    /// a `u64`, this may fail in which case the method will return `None`.
    pub fn to_u64(self) -> Option<u64> {
        // This can be at most ten octets with at most one bit in the
        // topmost octet.
        if self.slice.len() > 10
            || (self.slice.len() == 10 && self.slice[0] & 0x7E != 0)
        {
            return None
        }
        let mut res = 0;
        for &ch in self.slice {
            res = res << 7 | u64::from(ch & 0x7F);
        }
        match self.position {
            Position::First => {
                if res < 40 {
                    Some(0)
                }
                else if res < 80 {
                    Some(1)
                }
                else {
                    Some(2)
                }
            }
            Position::Second => {
                if res < 80 {
                    Some(res % 40)
                }
                else {
                    Some(res - 80)
                }
            }
            Position::Other => Some(res)
        }
    }
}


//--- PartialEq and Eq

impl<'a> PartialEq for Component<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.slice == other.slice
    }
}

impl<'a> Eq for Component<'a> { }


//------------ Iter ----------------------------------------------------------

/// An iterator over the components in an object identifier.
pub struct Iter<'a> {
    /// The remainder of the object identifier’s encoded octets.
    slice: &'a [u8],

    /// The position of the next component.
    position: Position,
}

impl<'a> Iter<'a> {
    /// Creates a new iterator.
    fn new(slice: &'a [u8]) -> Self {
        Iter {
            slice,
            position: Position::First
        }
    }

    fn advance_position(&mut self) -> Position {
        let res = self.position;
        self.position = match res {
            Position::First => Position::Second,
            _ => Position::Other
        };
        res
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Component<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.slice.is_empty() {
            return None
        }
        let end = self.slice.iter().position(|&x| x & 0x80 == 0)?;
        let res = &self.slice[..=end];

        // The first two components share the first subidentifier.
        if self.position != Position::First {
            self.slice = &self.slice[end + 1..];
        }
        Some(Component::new(res, self.advance_position()))
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::*;

    #[test]
    fn from_arcs() {
        assert_eq!(
            Oid::from_arcs(&[1, 2, 840, 113549]).unwrap().as_slice(),
            b"\x2a\x86\x48\x86\xf7\x0d"
        );
        assert_eq!(
            Oid::from_arcs(&[2, 999, 3]).unwrap().as_slice(),
            b"\x88\x37\x03"
        );
        assert_eq!(Oid::from_arcs(&[0, 0]).unwrap().as_slice(), b"\x00");
        assert_eq!(Oid::from_arcs(&[1]), Err(InvalidOid::TooShort));
        assert_eq!(Oid::from_arcs(&[3, 1]), Err(InvalidOid::FirstArc(3)));
        assert_eq!(Oid::from_arcs(&[1, 40]), Err(InvalidOid::SecondArc(40)));
    }

    #[test]
    fn from_str_and_display() {
        for s in &["1.2.840.113549.1.1.11", "2.5.4.3", "0.9", "2.999.3"] {
            assert_eq!(Oid::from_str(s).unwrap().to_string(), *s);
        }
        assert_eq!(Oid::from_str("1.x.3"), Err(InvalidOid::NotAnInteger));
        assert_eq!(Oid::from_str(""), Err(InvalidOid::NotAnInteger));
    }

    #[test]
    fn from_octets() {
        assert!(Oid::from_octets(Bytes::from_static(b"\x2a\x03")).is_ok());
        assert_eq!(
            Oid::from_octets(Bytes::from_static(b"\x2a\x86")),
            Err(InvalidOid::Truncated)
        );
        assert_eq!(Oid::from_octets(Bytes::new()), Err(InvalidOid::Empty));
    }

    #[test]
    fn encode() {
        let oid = Oid::from_str("2.5.4.3").unwrap();
        let mut res = Vec::new();
        oid.write_encoded(&mut res).unwrap();
        assert_eq!(res, b"\x03\x55\x04\x03");
        assert_eq!(res.len(), oid.encoded_len());
    }
}
