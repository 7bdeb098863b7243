//! String types.
//!
//! Octet strings as well as the character and time string types are kept
//! as plain octets in a [`Payload`][crate::Payload] since their encoding
//! doesn’t depend on their content. Only bit strings, which do not need to
//! be a multiple of eight bits long, need a type of their own.

pub use self::bit::BitString;

mod bit;
