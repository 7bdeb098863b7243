//! Tags, tag signatures, and tag sets.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::{fmt, hash};
use smallvec::SmallVec;


//------------ Tag -----------------------------------------------------------

/// The tag of a value.
///
/// In ASN.1, tags are used to identify the type of a value. Tags consist of
/// one of four classes, represented by the [`Class`] enum, and a number
/// within this class. The number is an unsigned integer.
///
/// Together with the [`Form`] of the encoding, the tag becomes a tag
/// signature represented by [`Ident`].
///
/// # Limitations
///
/// We only support tag numbers that fit into a `u32`. This should be more
/// than enough in practice.
//
//  Internally, we store the tag as the identifier octets of a primitive value
//  with the same tag.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Tag(Ident);

impl Tag {
    /// Creates a tag from a class and number.
    pub const fn new(class: Class, number: u32) -> Self {
        Self(Ident::new(class, Form::Primitive, number))
    }

    /// Creates a new tag in class “context dependent” with the given number.
    pub const fn ctx(number: u32) -> Self {
        Self::new(Class::Context, number)
    }

    /// Creates a new tag in class “application” with the given number.
    pub const fn application(number: u32) -> Self {
        Self::new(Class::Application, number)
    }

    /// Creates a new tag in class “private” with the given number.
    pub const fn private(number: u32) -> Self {
        Self::new(Class::Private, number)
    }

    /// Returns the class of the tag.
    pub const fn class(self) -> Class {
        self.0.class()
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u32 {
        self.0.number()
    }
}

/// # Constants for universal tags.
///
/// See clause 8.4 of ITU Recommendation X.690.
///
impl Tag {
    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Self::new(Class::Universal, 1);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Self::new(Class::Universal, 2);

    /// The tag for the BIT STRING type, UNIVERSAL 3.
    pub const BIT_STRING: Self = Self::new(Class::Universal, 3);

    /// The tag for the OCTET STRING type, UNIVERSAL 4.
    pub const OCTET_STRING: Self = Self::new(Class::Universal, 4);

    /// The tag for the NULL type, UNIVERSAL 5.
    pub const NULL: Self = Self::new(Class::Universal, 5);

    /// The tag for the OBJECT IDENTIFIER type, UNIVERSAL 6.
    pub const OID: Self = Self::new(Class::Universal, 6);

    /// The tag for the ObjectDescriptor type, UNIVERSAL 7.
    pub const OBJECT_DESCRIPTOR: Self = Self::new(Class::Universal, 7);

    /// The tag for the EXTERNAL and Instance-of types, UNIVERSAL 8.
    pub const EXTERNAL: Self = Self::new(Class::Universal, 8);

    /// The tag for the REAL type, UNIVERSAL 9.
    pub const REAL: Self = Self::new(Class::Universal, 9);

    /// The tag for the ENUMERATED type, UNIVERSAL 10.
    pub const ENUMERATED: Self = Self::new(Class::Universal, 10);

    /// The tag for the EMBEDDED PDV type, UNIVERSAL 11.
    pub const EMBEDDED_PDV: Self = Self::new(Class::Universal, 11);

    /// The tag for the UTF8String type, UNIVERSAL 12
    pub const UTF8_STRING: Self = Self::new(Class::Universal, 12);

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Self::new(Class::Universal, 16);

    /// The tag for the SET and SET OF types, UNIVERSAL 17.
    pub const SET: Self = Self::new(Class::Universal, 17);

    /// The tag for the NumericString type, UNIVERSAL 18.
    pub const NUMERIC_STRING: Self = Self::new(Class::Universal, 18);

    /// The tag for the PrintableString type, UNIVERSAL 19.
    pub const PRINTABLE_STRING: Self = Self::new(Class::Universal, 19);

    /// The tag for the TeletexString type, UNIVERSAL 20.
    pub const TELETEX_STRING: Self = Self::new(Class::Universal, 20);

    /// The tag for the VideotexString type, UNIVERSAL 21.
    pub const VIDEOTEX_STRING: Self = Self::new(Class::Universal, 21);

    /// The tag for the IA5String type, UNIVERSAL 22.
    pub const IA5_STRING: Self = Self::new(Class::Universal, 22);

    /// The tag for the UTCTime type, UNIVERSAL 23.
    pub const UTC_TIME: Self = Self::new(Class::Universal, 23);

    /// The tag for the GeneralizedType type, UNIVERSAL 24.
    pub const GENERALIZED_TIME: Self = Self::new(Class::Universal, 24);

    /// The tag for the GraphicString type, UNIVERSAL 25.
    pub const GRAPHIC_STRING: Self = Self::new(Class::Universal, 25);

    /// The tag for the VisibleString type, UNIVERSAL 26.
    pub const VISIBLE_STRING: Self = Self::new(Class::Universal, 26);

    /// The tag for the GeneralString type, UNIVERSAL 27.
    pub const GENERAL_STRING: Self = Self::new(Class::Universal, 27);

    /// The tag for the UniversalString type, UNIVERSAL 28.
    pub const UNIVERSAL_STRING: Self = Self::new(Class::Universal, 28);

    /// The tag for the BMPString type, UNIVERSAL 30.
    pub const BMP_STRING: Self = Self::new(Class::Universal, 30);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::BOOLEAN => write!(f, "BOOLEAN"),
            Tag::INTEGER => write!(f, "INTEGER"),
            Tag::BIT_STRING => write!(f, "BIT STRING"),
            Tag::OCTET_STRING => write!(f, "OCTET STRING"),
            Tag::NULL => write!(f, "NULL"),
            Tag::OID => write!(f, "OBJECT IDENTIFIER"),
            Tag::OBJECT_DESCRIPTOR => write!(f, "ObjectDescriptor"),
            Tag::EXTERNAL => write!(f, "EXTERNAL"),
            Tag::REAL => write!(f, "REAL"),
            Tag::ENUMERATED => write!(f, "ENUMERATED"),
            Tag::EMBEDDED_PDV => write!(f, "EMBEDDED PDV"),
            Tag::UTF8_STRING => write!(f, "UTF8String"),
            Tag::SEQUENCE => write!(f, "SEQUENCE"),
            Tag::SET => write!(f, "SET"),
            Tag::NUMERIC_STRING => write!(f, "NumericString"),
            Tag::PRINTABLE_STRING => write!(f, "PrintableString"),
            Tag::TELETEX_STRING => write!(f, "TeletexString"),
            Tag::VIDEOTEX_STRING => write!(f, "VideotexString"),
            Tag::IA5_STRING => write!(f, "IA5String"),
            Tag::UTC_TIME => write!(f, "UTCTime"),
            Tag::GENERALIZED_TIME => write!(f, "GeneralizedTime"),
            Tag::GRAPHIC_STRING => write!(f, "GraphicString"),
            Tag::VISIBLE_STRING => write!(f, "VisibleString"),
            Tag::GENERAL_STRING => write!(f, "GeneralString"),
            Tag::UNIVERSAL_STRING => write!(f, "UniversalString"),
            Tag::BMP_STRING => write!(f, "BMPString"),
            tag => {
                match tag.class() {
                    Class::Universal => write!(f, "[UNIVERSAL ")?,
                    Class::Application => write!(f, "[APPLICATION ")?,
                    Class::Context => write!(f, "[")?,
                    Class::Private => write!(f, "[PRIVATE ")?,
                }
                write!(f, "{}]", tag.number())
            }
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({} - {:?})", self, self.0.as_slice())
    }
}


//------------ Ident ---------------------------------------------------------

/// A tag signature.
///
/// The signature combines the class and number of a tag with the form of
/// the encoding, i.e., whether a value of the type is primitive or
/// constructed. Two signatures are equal if all three parts are equal.
///
/// The signature is kept in the form of the identifier octets a value with
/// this tag and form would have in the basic encoding rules. This gives us
/// a cheap, hashable representation.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ident(I);

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
enum I {
    L1([u8; 1]),
    L2([u8; 2]),
    L3([u8; 3]),
    L4([u8; 4]),
    L5([u8; 5]),
    L6([u8; 6]),
}

impl Ident {
    /// Creates the signature from its three parts.
    pub const fn new(class: Class, form: Form, number: u32) -> Self {
        let first = match form {
            Form::Constructed => class.into_u8() | 0x20,
            Form::Primitive => class.into_u8(),
        };

        if number <= 0x1e {
            // five bits but not all of them one (so not 0x1f)
            return Self(I::L1([first | number as u8]))
        }

        // Now the first octet is always the class plus bits 1 to 5 all 1.
        let first = first | 0x1f;

        // The lowest seven bits are the last octet. Shift the number by
        // seven to see what’s left. If that’s zero, we have a two octet
        // tag.
        let n0 = (number & 0x7F) as u8;
        let number = number >> 7;
        if number == 0 {
            return Self(I::L2([first, n0]))
        }

        // Now rince an repeat.
        let n1 = (number | 0x80) as u8;
        let number = number >> 7;
        if number == 0 {
            return Self(I::L3([first, n1, n0]))
        }

        let n2 = (number | 0x80) as u8;
        let number = number >> 7;
        if number == 0 {
            return Self(I::L4([first, n2, n1, n0]))
        }

        let n3 = (number | 0x80) as u8;
        let number = number >> 7;
        if number == 0 {
            return Self(I::L5([first, n3, n2, n1, n0]))
        }

        let n4 = (number | 0x80) as u8;
        let number = number >> 7;
        debug_assert!(number == 0);
        Self(I::L6([first, n4, n3, n2, n1, n0]))
    }

    /// Creates a signature from a tag and a form.
    pub const fn from_tag(tag: Tag, form: Form) -> Self {
        match form {
            Form::Constructed => {
                match tag.0.0 {
                    I::L1([x]) => Self(I::L1([x | 0x20])),
                    I::L2([x, y0]) => Self(I::L2([x | 0x20, y0])),
                    I::L3([x, y0, y1]) => {
                        Self(I::L3([x | 0x20, y0, y1]))
                    }
                    I::L4([x, y0, y1, y2]) => {
                        Self(I::L4([x | 0x20, y0, y1, y2]))
                    }
                    I::L5([x, y0, y1, y2, y3]) => {
                        Self(I::L5([x | 0x20, y0, y1, y2, y3]))
                    }
                    I::L6([x, y0, y1, y2, y3, y4]) => {
                        Self(I::L6([x | 0x20, y0, y1, y2, y3, y4]))
                    }
                }
            }
            Form::Primitive => tag.0
        }
    }

    /// Returns the tag of the signature.
    pub const fn tag(self) -> Tag {
        match self.0 {
            I::L1([x]) => Tag(Self(I::L1([x & 0xDF]))),
            I::L2([x, y0]) => Tag(Self(I::L2([x & 0xDF, y0]))),
            I::L3([x, y0, y1]) => {
                Tag(Self(I::L3([x & 0xDF, y0, y1])))
            }
            I::L4([x, y0, y1, y2]) => {
                Tag(Self(I::L4([x & 0xDF, y0, y1, y2])))
            }
            I::L5([x, y0, y1, y2, y3]) => {
                Tag(Self(I::L5([x & 0xDF, y0, y1, y2, y3])))
            }
            I::L6([x, y0, y1, y2, y3, y4]) => {
                Tag(Self(I::L6([x & 0xDF, y0, y1, y2, y3, y4])))
            }
        }
    }

    /// Returns the class of the signature.
    pub const fn class(self) -> Class {
        Class::from_u8(self.first())
    }

    /// Returns the form of the signature.
    pub const fn form(self) -> Form {
        if self.first() & 0x20 != 0 {
            Form::Constructed
        }
        else {
            Form::Primitive
        }
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u32 {
        match self.0 {
            I::L1([x]) => (x & 0x1f) as u32,
            I::L2([_, x0]) => x0 as u32,
            I::L3([_, x1, x2]) => {
                  ((x1 & 0x7f) as u32) << 7
                | (x2 as u32)
            }
            I::L4([_, x1, x2, x3]) => {
                  ((x1 & 0x7f) as u32) << 14
                | ((x2 & 0x7f) as u32) << 7
                | (x3 as u32)
            }
            I::L5([_, x1, x2, x3, x4]) => {
                  ((x1 & 0x7f) as u32) << 21
                | ((x2 & 0x7f) as u32) << 14
                | ((x3 & 0x7f) as u32) << 7
                | (x4 as u32)
            }
            I::L6([_, x1, x2, x3, x4, x5]) => {
                  ((x1 & 0x7f) as u32) << 28
                | ((x2 & 0x7f) as u32) << 21
                | ((x3 & 0x7f) as u32) << 14
                | ((x4 & 0x7f) as u32) << 7
                | (x5 as u32)
            }
        }
    }

    /// Returns a slice of the identifier octets.
    const fn as_slice(&self) -> &[u8] {
        match &self.0 {
            I::L1(arr) => arr.as_slice(),
            I::L2(arr) => arr.as_slice(),
            I::L3(arr) => arr.as_slice(),
            I::L4(arr) => arr.as_slice(),
            I::L5(arr) => arr.as_slice(),
            I::L6(arr) => arr.as_slice(),
        }
    }

    /// Returns the first octet.
    const fn first(self) -> u8 {
        match self.0 {
            I::L1([x]) => x,
            I::L2([x, ..]) => x,
            I::L3([x, ..]) => x,
            I::L4([x, ..]) => x,
            I::L5([x, ..]) => x,
            I::L6([x, ..]) => x,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.form() {
            Form::Primitive => write!(f, "{}", self.tag()),
            Form::Constructed => write!(f, "{} (constructed)", self.tag()),
        }
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ident({} - {:?})", self, self.as_slice())
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    const fn from_u8(octet: u8) -> Self {
        match octet {
            0x00..=0x3F => Self::Universal,
            0x40..=0x7F => Self::Application,
            0x80..=0xBF => Self::Context,
            0xC0..=0xFF => Self::Private
        }
    }

    const fn into_u8(self) -> u8 {
        match self {
            Self::Universal => 0x00,
            Self::Application => 0x40,
            Self::Context => 0x80,
            Self::Private => 0xC0,
        }
    }
}


//------------ Form ----------------------------------------------------------

/// The form of an encoding: primitive or constructed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Form {
    Primitive,
    Constructed,
}


//------------ TagSet --------------------------------------------------------

/// The ordered tag signatures of a type.
///
/// A type that hasn’t been tagged has a tag set with a single signature,
/// its base signature. Implicit tagging replaces the outermost signature,
/// explicit tagging adds a new, constructed outermost signature. The base
/// signature is remembered so the type can still be found by it.
///
/// The untagged CHOICE and ANY types have an empty tag set.
///
/// Two tag sets are equal if their signatures are equal. The base
/// signature is not considered.
#[derive(Clone)]
pub struct TagSet {
    /// The signature of the type before any tagging.
    base: Option<Ident>,

    /// The signatures, innermost first.
    tags: SmallVec<[Ident; 2]>,
}

impl TagSet {
    /// Creates the tag set of an untagged type.
    pub fn new(base: Ident) -> Self {
        let mut tags = SmallVec::new();
        tags.push(base);
        TagSet { base: Some(base), tags }
    }

    /// Creates the universal tag set for a tag and form.
    pub fn universal(tag: Tag, form: Form) -> Self {
        Self::new(Ident::from_tag(tag, form))
    }

    /// Creates an empty tag set.
    pub fn untagged() -> Self {
        TagSet { base: None, tags: SmallVec::new() }
    }

    /// Returns a new tag set with the outermost signature replaced.
    ///
    /// The replacement keeps the form of the signature it replaces. If the
    /// tag set is empty, the tag is added as a constructed signature.
    pub fn tag_implicitly(&self, tag: Tag) -> Self {
        let mut res = self.clone();
        match res.tags.pop() {
            Some(outer) => res.tags.push(Ident::from_tag(tag, outer.form())),
            None => res.tags.push(Ident::from_tag(tag, Form::Constructed)),
        }
        res
    }

    /// Returns a new tag set with a constructed outer signature added.
    pub fn tag_explicitly(&self, tag: Tag) -> Self {
        let mut res = self.clone();
        res.tags.push(Ident::from_tag(tag, Form::Constructed));
        res
    }

    /// Returns the base signature if there is one.
    pub fn base(&self) -> Option<Ident> {
        self.base
    }

    /// Returns the tag set of the base signature.
    ///
    /// Returns `None` if there is no base signature or if the tag set is
    /// untagged already, i.e., if falling back to the base wouldn’t change
    /// anything.
    pub fn base_set(&self) -> Option<Self> {
        let base = self.base?;
        if self.tags.len() == 1 && self.tags[0] == base {
            None
        }
        else {
            Some(Self::new(base))
        }
    }

    /// Returns the outermost signature.
    pub fn outermost(&self) -> Option<Ident> {
        self.tags.last().copied()
    }

    /// Returns whether the tag set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the number of signatures.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns an iterator over the signatures, innermost first.
    pub fn iter(&self) -> impl Iterator<Item = Ident> + '_ {
        self.tags.iter().copied()
    }
}


//--- PartialEq, Eq, and Hash

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.tags == other.tags
    }
}

impl Eq for TagSet { }

impl hash::Hash for TagSet {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.tags.hash(state)
    }
}


//--- Display and Debug

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.tags.is_empty() {
            return write!(f, "{{}}")
        }
        write!(f, "{{")?;
        let mut first = true;
        for tag in self.tags.iter().rev() {
            if first {
                first = false
            }
            else {
                write!(f, ", ")?;
            }
            write!(f, "{}", tag)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TagSet({})", self)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    const CLASSES: &[Class] = &[
        Class::Universal, Class::Application, Class::Context, Class::Private
    ];

    #[test]
    fn ident_parts() {
        let numbers = [
            0, 1, 0x1e, 0x1f, 0x7f, 0x80, 0x3fff, 0x4000, 0x1f_ffff,
            0x20_0000, 0x0fff_ffff, 0x1000_0000, u32::MAX
        ];
        for &class in CLASSES {
            for &form in &[Form::Primitive, Form::Constructed] {
                for &number in &numbers {
                    let ident = Ident::new(class, form, number);
                    assert_eq!(ident.class(), class);
                    assert_eq!(ident.form(), form);
                    assert_eq!(ident.number(), number);
                    assert_eq!(ident.tag(), Tag::new(class, number));
                }
            }
        }
    }

    #[test]
    fn ident_octets() {
        fn octets(ident: Ident) -> Vec<u8> {
            ident.as_slice().to_vec()
        }

        assert_eq!(
            octets(Ident::from_tag(Tag::INTEGER, Form::Primitive)),
            b"\x02"
        );
        assert_eq!(
            octets(Ident::from_tag(Tag::SEQUENCE, Form::Constructed)),
            b"\x30"
        );
        assert_eq!(
            octets(Ident::new(Class::Context, Form::Primitive, 0x1f)),
            b"\x9f\x1f"
        );
        assert_eq!(
            octets(Ident::new(Class::Application, Form::Constructed, 0x80)),
            b"\x7f\x81\x00"
        );
    }

    #[test]
    fn signature_equality() {
        let prim = Ident::new(Class::Context, Form::Primitive, 3);
        let cons = Ident::new(Class::Context, Form::Constructed, 3);
        assert_ne!(prim, cons);
        assert_eq!(prim, Ident::from_tag(Tag::ctx(3), Form::Primitive));
        assert_ne!(prim, Ident::new(Class::Private, Form::Primitive, 3));
    }

    #[test]
    fn implicit_tagging() {
        let int = TagSet::universal(Tag::INTEGER, Form::Primitive);
        let tagged = int.tag_implicitly(Tag::ctx(0));
        assert_eq!(tagged.len(), 1);
        assert_eq!(
            tagged.outermost(),
            Some(Ident::new(Class::Context, Form::Primitive, 0))
        );
        assert_eq!(tagged.base(), int.base());
        assert_eq!(tagged.base_set(), Some(int.clone()));
        assert_eq!(int.base_set(), None);

        let seq = TagSet::universal(Tag::SEQUENCE, Form::Constructed);
        let tagged = seq.tag_implicitly(Tag::application(7));
        assert_eq!(
            tagged.outermost(),
            Some(Ident::new(Class::Application, Form::Constructed, 7))
        );
    }

    #[test]
    fn explicit_tagging() {
        let int = TagSet::universal(Tag::INTEGER, Form::Primitive);
        let tagged = int.tag_explicitly(Tag::ctx(1));
        assert_eq!(tagged.len(), 2);
        assert_eq!(
            tagged.iter().collect::<Vec<_>>(),
            vec![
                Ident::from_tag(Tag::INTEGER, Form::Primitive),
                Ident::new(Class::Context, Form::Constructed, 1),
            ]
        );
        assert_ne!(tagged, int);
        assert_eq!(tagged.base_set(), Some(int));

        let choice = TagSet::untagged();
        assert!(choice.is_empty());
        assert_eq!(choice.base_set(), None);
        assert_eq!(choice.tag_explicitly(Tag::ctx(2)).len(), 1);
    }

    #[test]
    fn tag_set_equality_ignores_base() {
        let implicit = TagSet::universal(Tag::INTEGER, Form::Primitive)
            .tag_implicitly(Tag::ctx(0));
        let octets = TagSet::universal(Tag::OCTET_STRING, Form::Primitive)
            .tag_implicitly(Tag::ctx(0));
        assert_eq!(implicit, octets);
        assert_ne!(implicit.base_set(), octets.base_set());
    }

    #[test]
    fn display() {
        assert_eq!(
            TagSet::universal(Tag::INTEGER, Form::Primitive)
                .tag_explicitly(Tag::ctx(4)).to_string(),
            "{[4] (constructed), INTEGER}"
        );
        assert_eq!(TagSet::untagged().to_string(), "{}");
        assert_eq!(Tag::private(12).to_string(), "[PRIVATE 12]");
    }
}
