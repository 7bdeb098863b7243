//! Type information for values.
//!
//! A [`Schema`] describes the ASN.1 type a value is to be encoded as. It
//! combines the kind of type, given by a [`TypeId`], with the tags the type
//! carries and, for constructed types, the types of its components.
//!
//! Schemas are built from the constructor functions of [`Schema`] and are
//! refined through tagging:
//!
//! ```
//! use oer_encoder::{Schema, Tag};
//!
//! let schema = Schema::sequence(vec![])
//!     .component("version", Schema::integer().explicit(Tag::ctx(0)))
//!     .optional("name", Schema::utf8_string());
//! assert_eq!(schema.components().len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;
use crate::ident::{Form, Tag, TagSet};
use crate::value::Value;


//------------ TypeId --------------------------------------------------------

/// The kind of an ASN.1 type.
///
/// Every ASN.1 type is of exactly one of these kinds. Unlike its tags, the
/// kind of a type doesn’t change through tagging.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TypeId {
    Boolean,
    Integer,
    Enumerated,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Real,
    Sequence,
    SequenceOf,
    Set,
    SetOf,
    Choice,
    Any,
    Utf8String,
    NumericString,
    PrintableString,
    TeletexString,
    VideotexString,
    Ia5String,
    GraphicString,
    VisibleString,
    GeneralString,
    UniversalString,
    BmpString,
    ObjectDescriptor,
    GeneralizedTime,
    UtcTime,
    External,
    EmbeddedPdv,
}

impl TypeId {
    /// All kinds in declaration order.
    pub const ALL: &'static [TypeId] = &[
        TypeId::Boolean, TypeId::Integer, TypeId::Enumerated,
        TypeId::BitString, TypeId::OctetString, TypeId::Null,
        TypeId::ObjectIdentifier, TypeId::Real, TypeId::Sequence,
        TypeId::SequenceOf, TypeId::Set, TypeId::SetOf, TypeId::Choice,
        TypeId::Any, TypeId::Utf8String, TypeId::NumericString,
        TypeId::PrintableString, TypeId::TeletexString,
        TypeId::VideotexString, TypeId::Ia5String, TypeId::GraphicString,
        TypeId::VisibleString, TypeId::GeneralString,
        TypeId::UniversalString, TypeId::BmpString,
        TypeId::ObjectDescriptor, TypeId::GeneralizedTime, TypeId::UtcTime,
        TypeId::External, TypeId::EmbeddedPdv,
    ];

    /// Returns the tag set of an untagged type of this kind.
    ///
    /// The container kinds as well as EXTERNAL and EMBEDDED PDV have a
    /// constructed signature. CHOICE and ANY have no tags at all.
    pub fn tag_set(self) -> TagSet {
        match self.tag() {
            Some(tag) => {
                let form = match self {
                    TypeId::Sequence | TypeId::SequenceOf
                    | TypeId::Set | TypeId::SetOf
                    | TypeId::External | TypeId::EmbeddedPdv
                        => Form::Constructed,
                    _ => Form::Primitive,
                };
                TagSet::universal(tag, form)
            }
            None => TagSet::untagged()
        }
    }

    /// Returns the universal tag of the kind if it has one.
    pub fn tag(self) -> Option<Tag> {
        let res = match self {
            TypeId::Boolean => Tag::BOOLEAN,
            TypeId::Integer => Tag::INTEGER,
            TypeId::Enumerated => Tag::ENUMERATED,
            TypeId::BitString => Tag::BIT_STRING,
            TypeId::OctetString => Tag::OCTET_STRING,
            TypeId::Null => Tag::NULL,
            TypeId::ObjectIdentifier => Tag::OID,
            TypeId::Real => Tag::REAL,
            TypeId::Sequence | TypeId::SequenceOf => Tag::SEQUENCE,
            TypeId::Set | TypeId::SetOf => Tag::SET,
            TypeId::Choice | TypeId::Any => return None,
            TypeId::Utf8String => Tag::UTF8_STRING,
            TypeId::NumericString => Tag::NUMERIC_STRING,
            TypeId::PrintableString => Tag::PRINTABLE_STRING,
            TypeId::TeletexString => Tag::TELETEX_STRING,
            TypeId::VideotexString => Tag::VIDEOTEX_STRING,
            TypeId::Ia5String => Tag::IA5_STRING,
            TypeId::GraphicString => Tag::GRAPHIC_STRING,
            TypeId::VisibleString => Tag::VISIBLE_STRING,
            TypeId::GeneralString => Tag::GENERAL_STRING,
            TypeId::UniversalString => Tag::UNIVERSAL_STRING,
            TypeId::BmpString => Tag::BMP_STRING,
            TypeId::ObjectDescriptor => Tag::OBJECT_DESCRIPTOR,
            TypeId::GeneralizedTime => Tag::GENERALIZED_TIME,
            TypeId::UtcTime => Tag::UTC_TIME,
            TypeId::External => Tag::EXTERNAL,
            TypeId::EmbeddedPdv => Tag::EMBEDDED_PDV,
        };
        Some(res)
    }

    /// Returns whether values of this kind are kept as plain octets.
    pub fn is_octets(self) -> bool {
        matches!(
            self,
            TypeId::OctetString | TypeId::Any
            | TypeId::Utf8String | TypeId::NumericString
            | TypeId::PrintableString | TypeId::TeletexString
            | TypeId::VideotexString | TypeId::Ia5String
            | TypeId::GraphicString | TypeId::VisibleString
            | TypeId::GeneralString | TypeId::UniversalString
            | TypeId::BmpString | TypeId::ObjectDescriptor
            | TypeId::GeneralizedTime | TypeId::UtcTime
        )
    }

    /// Returns the ASN.1 name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            TypeId::Boolean => "BOOLEAN",
            TypeId::Integer => "INTEGER",
            TypeId::Enumerated => "ENUMERATED",
            TypeId::BitString => "BIT STRING",
            TypeId::OctetString => "OCTET STRING",
            TypeId::Null => "NULL",
            TypeId::ObjectIdentifier => "OBJECT IDENTIFIER",
            TypeId::Real => "REAL",
            TypeId::Sequence => "SEQUENCE",
            TypeId::SequenceOf => "SEQUENCE OF",
            TypeId::Set => "SET",
            TypeId::SetOf => "SET OF",
            TypeId::Choice => "CHOICE",
            TypeId::Any => "ANY",
            TypeId::Utf8String => "UTF8String",
            TypeId::NumericString => "NumericString",
            TypeId::PrintableString => "PrintableString",
            TypeId::TeletexString => "TeletexString",
            TypeId::VideotexString => "VideotexString",
            TypeId::Ia5String => "IA5String",
            TypeId::GraphicString => "GraphicString",
            TypeId::VisibleString => "VisibleString",
            TypeId::GeneralString => "GeneralString",
            TypeId::UniversalString => "UniversalString",
            TypeId::BmpString => "BMPString",
            TypeId::ObjectDescriptor => "ObjectDescriptor",
            TypeId::GeneralizedTime => "GeneralizedTime",
            TypeId::UtcTime => "UTCTime",
            TypeId::External => "EXTERNAL",
            TypeId::EmbeddedPdv => "EMBEDDED PDV",
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


//------------ Schema --------------------------------------------------------

/// The description of an ASN.1 type.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    /// The kind of the type.
    type_id: TypeId,

    /// The tags of the type.
    tag_set: TagSet,

    /// The structure of the type.
    shape: Shape,
}

/// The structure of a type.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// The type has no inner types.
    Simple,

    /// The named components of a SEQUENCE or SET.
    Components(Vec<NamedType>),

    /// The type of the elements of a SEQUENCE OF or SET OF.
    Elements(Box<Schema>),

    /// The alternatives of a CHOICE.
    Alternatives(Vec<NamedType>),
}

impl Schema {
    /// Creates an untagged schema of the given kind and shape.
    pub fn new(type_id: TypeId, shape: Shape) -> Self {
        Schema { type_id, tag_set: type_id.tag_set(), shape }
    }

    /// Creates an untagged schema of a kind without inner types.
    pub fn simple(type_id: TypeId) -> Self {
        Self::new(type_id, Shape::Simple)
    }

    /// Creates a schema with an arbitrary tag set.
    ///
    /// This is mostly useful for types the registry only knows by their
    /// tags.
    pub fn with_tag_set(
        type_id: TypeId, tag_set: TagSet, shape: Shape
    ) -> Self {
        Schema { type_id, tag_set, shape }
    }

    /// Creates an untagged BOOLEAN.
    pub fn boolean() -> Self {
        Self::simple(TypeId::Boolean)
    }

    /// Creates an untagged INTEGER.
    pub fn integer() -> Self {
        Self::simple(TypeId::Integer)
    }

    /// Creates an untagged ENUMERATED.
    pub fn enumerated() -> Self {
        Self::simple(TypeId::Enumerated)
    }

    /// Creates an untagged BIT STRING.
    pub fn bit_string() -> Self {
        Self::simple(TypeId::BitString)
    }

    /// Creates an untagged OCTET STRING.
    pub fn octet_string() -> Self {
        Self::simple(TypeId::OctetString)
    }

    /// Creates an untagged NULL.
    pub fn null() -> Self {
        Self::simple(TypeId::Null)
    }

    /// Creates an untagged OBJECT IDENTIFIER.
    pub fn oid() -> Self {
        Self::simple(TypeId::ObjectIdentifier)
    }

    /// Creates an untagged REAL.
    pub fn real() -> Self {
        Self::simple(TypeId::Real)
    }

    /// Creates an untagged ANY.
    pub fn any() -> Self {
        Self::simple(TypeId::Any)
    }

    /// Creates an untagged UTF8String.
    pub fn utf8_string() -> Self {
        Self::simple(TypeId::Utf8String)
    }

    /// Creates an untagged IA5String.
    pub fn ia5_string() -> Self {
        Self::simple(TypeId::Ia5String)
    }

    /// Creates an untagged PrintableString.
    pub fn printable_string() -> Self {
        Self::simple(TypeId::PrintableString)
    }

    /// Creates an untagged UTCTime.
    pub fn utc_time() -> Self {
        Self::simple(TypeId::UtcTime)
    }

    /// Creates an untagged GeneralizedTime.
    pub fn generalized_time() -> Self {
        Self::simple(TypeId::GeneralizedTime)
    }

    /// Creates a SEQUENCE with the given components.
    pub fn sequence(components: Vec<NamedType>) -> Self {
        Self::new(TypeId::Sequence, Shape::Components(components))
    }

    /// Creates a SET with the given components.
    pub fn set(components: Vec<NamedType>) -> Self {
        Self::new(TypeId::Set, Shape::Components(components))
    }

    /// Creates a SEQUENCE OF the given element type.
    pub fn sequence_of(element: Schema) -> Self {
        Self::new(TypeId::SequenceOf, Shape::Elements(Box::new(element)))
    }

    /// Creates a SET OF the given element type.
    pub fn set_of(element: Schema) -> Self {
        Self::new(TypeId::SetOf, Shape::Elements(Box::new(element)))
    }

    /// Creates a CHOICE between the given alternatives.
    pub fn choice(alternatives: Vec<NamedType>) -> Self {
        Self::new(TypeId::Choice, Shape::Alternatives(alternatives))
    }

    /// Adds a required component to a SEQUENCE or SET.
    ///
    /// # Panics
    ///
    /// The method panics if the schema doesn’t have components.
    pub fn component(self, name: &str, schema: Schema) -> Self {
        self.push_component(NamedType::new(name, schema))
    }

    /// Adds an OPTIONAL component to a SEQUENCE or SET.
    ///
    /// # Panics
    ///
    /// The method panics if the schema doesn’t have components.
    pub fn optional(self, name: &str, schema: Schema) -> Self {
        self.push_component(NamedType::optional(name, schema))
    }

    /// Adds a component with a DEFAULT value to a SEQUENCE or SET.
    ///
    /// # Panics
    ///
    /// The method panics if the schema doesn’t have components.
    pub fn with_default(
        self, name: &str, schema: Schema, default: Value
    ) -> Self {
        self.push_component(NamedType::with_default(name, schema, default))
    }

    /// Adds an alternative to a CHOICE.
    ///
    /// # Panics
    ///
    /// The method panics if the schema isn’t a CHOICE.
    pub fn alternative(mut self, name: &str, schema: Schema) -> Self {
        match self.shape {
            Shape::Alternatives(ref mut alternatives) => {
                alternatives.push(NamedType::new(name, schema))
            }
            _ => panic!("{} has no alternatives", self.type_id),
        }
        self
    }

    fn push_component(mut self, named: NamedType) -> Self {
        match self.shape {
            Shape::Components(ref mut components) => components.push(named),
            _ => panic!("{} has no components", self.type_id),
        }
        self
    }

    /// Returns a schema for the type with an implicit tag.
    pub fn implicit(mut self, tag: Tag) -> Self {
        self.tag_set = self.tag_set.tag_implicitly(tag);
        self
    }

    /// Returns a schema for the type with an explicit tag.
    pub fn explicit(mut self, tag: Tag) -> Self {
        self.tag_set = self.tag_set.tag_explicitly(tag);
        self
    }

    /// Converts the schema into a shareable one.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns the kind of the type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the tags of the type.
    pub fn tag_set(&self) -> &TagSet {
        &self.tag_set
    }

    /// Returns the structure of the type.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the components of a SEQUENCE or SET.
    ///
    /// For all other types, the slice is empty.
    pub fn components(&self) -> &[NamedType] {
        match self.shape {
            Shape::Components(ref components) => components,
            _ => &[]
        }
    }

    /// Returns the element type of a SEQUENCE OF or SET OF.
    pub fn element(&self) -> Option<&Schema> {
        match self.shape {
            Shape::Elements(ref element) => Some(element),
            _ => None
        }
    }

    /// Returns the alternatives of a CHOICE.
    ///
    /// For all other types, the slice is empty.
    pub fn alternatives(&self) -> &[NamedType] {
        match self.shape {
            Shape::Alternatives(ref alternatives) => alternatives,
            _ => &[]
        }
    }
}


//------------ NamedType -----------------------------------------------------

/// A component of a SEQUENCE or SET or an alternative of a CHOICE.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    name: String,
    schema: Schema,
    presence: Presence,
}

impl NamedType {
    /// Creates a required component.
    pub fn new(name: &str, schema: Schema) -> Self {
        NamedType {
            name: name.into(), schema, presence: Presence::Required
        }
    }

    /// Creates an OPTIONAL component.
    pub fn optional(name: &str, schema: Schema) -> Self {
        NamedType {
            name: name.into(), schema, presence: Presence::Optional
        }
    }

    /// Creates a component with a DEFAULT value.
    pub fn with_default(name: &str, schema: Schema, default: Value) -> Self {
        NamedType {
            name: name.into(), schema, presence: Presence::Default(default)
        }
    }

    /// Returns the name of the component or alternative.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type of the component or alternative.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns whether the component has to be present.
    ///
    /// Alternatives of a CHOICE are always [`Presence::Required`].
    pub fn presence(&self) -> &Presence {
        &self.presence
    }
}


//------------ Presence ------------------------------------------------------

/// Whether a component has to be present in a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Presence {
    /// The component must always be present.
    Required,

    /// The component may be missing.
    Optional,

    /// The component may be missing and then has the given value.
    Default(Value),
}

impl Presence {
    /// Returns whether the component is marked in the presence bitmap.
    pub fn is_marked(&self) -> bool {
        !matches!(self, Presence::Required)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::ident::{Class, Ident};
    use super::*;

    #[test]
    fn tag_sets() {
        assert_eq!(
            TypeId::Integer.tag_set(),
            TagSet::universal(Tag::INTEGER, Form::Primitive)
        );
        assert_eq!(
            TypeId::SequenceOf.tag_set(),
            TagSet::universal(Tag::SEQUENCE, Form::Constructed)
        );
        assert_eq!(TypeId::Sequence.tag_set(), TypeId::SequenceOf.tag_set());
        assert_eq!(TypeId::Set.tag_set(), TypeId::SetOf.tag_set());
        assert!(TypeId::Choice.tag_set().is_empty());
        assert!(TypeId::Any.tag_set().is_empty());
        for &type_id in TypeId::ALL {
            assert_eq!(type_id.tag().is_none(), type_id.tag_set().is_empty());
        }
    }

    #[test]
    fn tagging() {
        let schema = Schema::integer().implicit(Tag::ctx(3));
        assert_eq!(schema.type_id(), TypeId::Integer);
        assert_eq!(
            schema.tag_set().outermost(),
            Some(Ident::new(Class::Context, Form::Primitive, 3))
        );
        assert_eq!(
            schema.tag_set().base_set(), Some(TypeId::Integer.tag_set())
        );

        let schema = Schema::choice(vec![]).explicit(Tag::ctx(1));
        assert_eq!(schema.tag_set().len(), 1);
        assert_eq!(schema.tag_set().base_set(), None);
    }

    #[test]
    fn arbitrary_tag_set() {
        let tag_set = TagSet::universal(Tag::BMP_STRING, Form::Primitive)
            .tag_implicitly(Tag::application(2));
        let schema = Schema::with_tag_set(
            TypeId::OctetString, tag_set.clone(), Shape::Simple
        );
        assert_eq!(schema.type_id(), TypeId::OctetString);
        assert_eq!(schema.tag_set(), &tag_set);
        assert_ne!(schema.tag_set(), &TypeId::OctetString.tag_set());
        assert_eq!(schema.shape(), &Shape::Simple);
        assert_eq!(
            schema.tag_set().base_set(),
            Some(TagSet::universal(Tag::BMP_STRING, Form::Primitive))
        );
    }

    #[test]
    fn components() {
        let schema = Schema::sequence(vec![])
            .component("a", Schema::boolean())
            .optional("b", Schema::integer())
            .with_default("c", Schema::integer(), Value::from(5));
        let names = schema.components().iter().map(NamedType::name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(!schema.components()[0].presence().is_marked());
        assert!(schema.components()[1].presence().is_marked());
        assert!(schema.components()[2].presence().is_marked());
        assert!(schema.alternatives().is_empty());
        assert!(schema.element().is_none());

        let schema = Schema::sequence_of(Schema::integer());
        assert_eq!(schema.element(), Some(&Schema::integer()));
        assert!(schema.components().is_empty());
    }

    #[test]
    #[should_panic]
    fn alternative_on_sequence() {
        let _ = Schema::sequence(vec![]).alternative("x", Schema::null());
    }
}
