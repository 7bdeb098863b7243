//! A short introduction to ASN.1 and OER.
//!
//! # ASN.1 and Encoding Rules
//!
//! The _Abstract Syntax Notation One_ (ASN.1) is a formal language that can
//! be used to describe the structure of data. Statements describe both data
//! types and how they are composed from other types. In addition, values of
//! these types can be specified. These rules do not, however, describe how
//! the values are to be represented in files or on the network. This is done
//! by accompanying standards known as _encoding rules._ Different such rules
//! exist.
//!
//! One set of such encoding rules is the _Octet Encoding Rules_ (OER).
//! Unlike the _Basic Encoding Rules_ (BER), they don’t encode the type of a
//! value at all. Both sides know the type from the ASN.1 definition, so only
//! the content is sent, and for many types its length. All fields are whole
//! octets, which keeps encoding and decoding simple and fast.
//!
//! ASN.1 is currently defined in ITU-T recommendation [X.680], OER in
//! [X.696]. Both these recommendations are freely available from the ITU.
//!
//! [X.680]: https://www.itu.int/rec/T-REC-X.680-202102-I/en
//! [X.696]: https://www.itu.int/rec/T-REC-X.696-202102-I/en
//!
//!
//! # ASN.1 Definitions
//!
//! ASN.1 collects definitions into documents called modules. All definitions
//! create named objects: data types if the names start with a capital letter
//! or values if they start with a small letter.
//!
//! As an example, here is how a certificate is defined by RFC 5280:
//!
//! ```text
//! Certificate  ::=  SEQUENCE  {
//!      tbsCertificate       TBSCertificate,
//!      signatureAlgorithm   AlgorithmIdentifier,
//!      signature            BIT STRING  }
//! ```
//!
//! This snippet defines a data type `Certificate` in terms of a number of
//! other types. The terms in all caps are universal types that are part of
//! the standard. `SEQUENCE` is a sequence of well defined elements
//! provided one after another within the braces. In this case there are
//! three elements. The first part is the name of the element and the
//! second its type. The two types `TBSCertificate` and `AlgorithmIdentifer`
//! are in turn defined elsewhere in the module while `BIT STRING` is a
//! universal type representing a sequence of bits.
//!
//! Universal types are the fundamental building blocks that all ASN.1
//! structures eventually boil down to. Each of these types has an
//! identifying code called their tag. The BIT STRING type, for instance,
//! has the tag 3 in universal class. A type can be given a different tag,
//! either replacing its own (implicit tagging) or in addition to it
//! (explicit tagging). In this crate, a [`Schema`] keeps all the tags of a
//! type in its [`TagSet`].
//!
//! Elements of a SEQUENCE or SET can be marked as OPTIONAL, in which case
//! they can be missing from a value, or as having a DEFAULT value, in which
//! case they are missing if they have exactly that value.
//!
//!
//! # Encoding ASN.1 Values
//!
//! Since OER doesn’t encode the type of a value, encoding a value always
//! needs the value’s type. The encoding of most types that don’t contain
//! other types is their content preceded by a _length determinant_ that
//! gives the number of content octets. Lengths below 128 take a single
//! octet. Longer lengths are given by an octet stating the number of length
//! octets followed by the length itself. The exceptions are BOOLEAN,
//! which is always one octet, and NULL, which has no octets at all.
//!
//! Values of types that contain other types, such as SEQUENCE and
//! SEQUENCE OF, are the encodings of their elements one after another. If
//! a SEQUENCE has OPTIONAL or DEFAULT elements, a bitmap marking which of
//! those are present comes first. A CHOICE value is the encoding of the
//! chosen alternative.
//!
//! In this crate, the encoding of such a constructed value is framed by its
//! length when it appears inside another value or is returned to the user.
//! This framing is not part of X.696. Neither is the encoding of CHOICE,
//! which in this crate leaves out the tag of the chosen alternative.
//! Alternatively, it can be framed by an indefinite length marker in front
//! and two zero octets at its end. See [`Options`] for how to choose
//! between the two.
//!
//! [`Options`]: crate::Options
//! [`Schema`]: crate::Schema
//! [`TagSet`]: crate::TagSet
