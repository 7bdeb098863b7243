//! Getting started with the oer-encoder crate.
//!
//! This module provides a short introduction to ASN.1 and the Octet
//! Encoding Rules and how the crate can be used to encode values.
//! It is only for documentation and does not contain any code.
//!
//! The guide consists of the following sections:

pub mod asn1_and_oer;
pub mod encode;
