//! The encoders for types without components.
//!
//! This is a private module. The functions are used by
//! [`ItemEncoder`][super::ItemEncoder].

use crate::error::EncodeError;
use crate::length::Length;
use crate::schema::Schema;
use crate::value::{Payload, Value};
use super::{Encoded, Options};
use super::target::{ChunkTarget, Target, infallible};


/// Encodes a BOOLEAN as a single octet.
pub fn boolean(
    value: &Value, schema: &Schema
) -> Result<Encoded, EncodeError> {
    let res = match *value.payload() {
        Payload::Boolean(true) => 0xFF,
        Payload::Boolean(false) => 0x00,
        ref other => return Err(mismatch(schema, other)),
    };
    log::trace!("encoded {} as {:#04x}", schema.type_id(), res);
    Ok(Encoded::primitive(vec![res], false))
}

/// Encodes an INTEGER or ENUMERATED.
pub fn integer(
    value: &Value, schema: &Schema
) -> Result<Encoded, EncodeError> {
    let int = match *value.payload() {
        Payload::Integer(ref int) => int,
        ref other => return Err(mismatch(schema, other)),
    };
    let mut res = Vec::with_capacity(int.encoded_len());
    infallible(int.write_encoded(&mut res));
    log::trace!(
        "encoded {} {:?} into {} octets", schema.type_id(), int, res.len()
    );
    Ok(Encoded::primitive(res, false))
}

/// Encodes a BIT STRING.
pub fn bit_string(
    value: &Value, schema: &Schema
) -> Result<Encoded, EncodeError> {
    let bits = match *value.payload() {
        Payload::BitString(ref bits) => bits,
        ref other => return Err(mismatch(schema, other)),
    };
    let mut res = Vec::with_capacity(bits.encoded_len());
    infallible(bits.write_encoded(&mut res));
    log::trace!("encoded {} of {} bits", schema.type_id(), bits.bit_len());
    Ok(Encoded::primitive(res, false))
}

/// Encodes an OCTET STRING or any type encoded the same way.
///
/// If the options ask for it, the octets are broken up into chunks. The
/// result is constructed then.
pub fn octet_string(
    value: &Value, schema: &Schema, options: Options,
) -> Result<Encoded, EncodeError> {
    let octets = match *value.payload() {
        Payload::Octets(ref octets) => octets,
        ref other => return Err(mismatch(schema, other)),
    };
    match options.chunk_size(octets.len()) {
        Some(step) => {
            let mut res = Vec::with_capacity(
                ChunkTarget::encoded_len(octets.len(), step)
            );
            infallible(
                ChunkTarget::new(
                    octets.len(), step, &mut res
                ).write_all(octets.as_ref())
            );
            log::trace!(
                "encoded {} of {} octets in chunks of {}",
                schema.type_id(), octets.len(), step
            );
            Ok(Encoded::constructed(res))
        }
        None => {
            let len = Length::definite(octets.len());
            let mut res = Vec::with_capacity(
                len.encoded_len() + octets.len()
            );
            infallible(len.write_encoded(&mut res));
            res.extend_from_slice(octets.as_ref());
            log::trace!(
                "encoded {} of {} octets", schema.type_id(), octets.len()
            );
            Ok(Encoded::primitive(res, true))
        }
    }
}

/// Encodes NULL.
///
/// The payload is ignored. NULL never has any octets.
pub fn null(schema: &Schema) -> Encoded {
    log::trace!("encoded {}", schema.type_id());
    Encoded::primitive(Vec::new(), true)
}

/// Encodes an OBJECT IDENTIFIER.
pub fn oid(value: &Value, schema: &Schema) -> Result<Encoded, EncodeError> {
    let oid = match *value.payload() {
        Payload::Oid(ref oid) => oid,
        ref other => return Err(mismatch(schema, other)),
    };
    let mut res = Vec::with_capacity(oid.encoded_len());
    infallible(oid.write_encoded(&mut res));
    log::trace!("encoded {} {}", schema.type_id(), oid);
    Ok(Encoded::primitive(res, false))
}

/// Encodes a REAL.
pub fn real(value: &Value, schema: &Schema) -> Result<Encoded, EncodeError> {
    let real = match value.payload().to_real() {
        Some(real) => real,
        None => return Err(mismatch(schema, value.payload())),
    };
    let mut res = Vec::with_capacity(real.encoded_len());
    infallible(real.write_encoded(&mut res));
    log::trace!("encoded {} into {} octets", schema.type_id(), res.len());
    Ok(Encoded::primitive(res, false))
}

/// Creates the error for a payload of the wrong kind.
pub fn mismatch(schema: &Schema, payload: &Payload) -> EncodeError {
    EncodeError::mismatch(
        schema.type_id(),
        format!("unexpected {} payload", payload.kind_name())
    )
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use bytes::Bytes;
    use crate::int::Integer;
    use crate::oid::Oid;
    use crate::string::BitString;
    use crate::schema::TypeId;
    use super::*;

    fn substrate(res: Result<Encoded, EncodeError>) -> Vec<u8> {
        res.unwrap().substrate
    }

    #[test]
    fn encode_boolean() {
        let schema = Schema::boolean();
        assert_eq!(substrate(boolean(&true.into(), &schema)), b"\xff");
        assert_eq!(substrate(boolean(&false.into(), &schema)), b"\x00");
        let res = boolean(&false.into(), &schema).unwrap();
        assert!(!res.constructed);
        assert!(!res.octet_aligned);
        assert!(matches!(
            boolean(&1i32.into(), &schema),
            Err(EncodeError::ValueSchemaMismatch {
                type_id: TypeId::Boolean, ..
            })
        ));
    }

    #[test]
    fn encode_integer() {
        let schema = Schema::integer();
        assert_eq!(substrate(integer(&0i32.into(), &schema)), b"\x01\x00");
        assert_eq!(
            substrate(integer(&(-1i32).into(), &schema)), b"\x01\xff"
        );
        assert_eq!(
            substrate(integer(&65536i32.into(), &schema)),
            b"\x03\x01\x00\x00"
        );
        assert_eq!(
            substrate(integer(
                &Integer::from_unsigned_octets(&[0xAA; 130]).into(), &schema
            ))[..3],
            b"\x81\x83\x00"[..]
        );
        assert_eq!(
            substrate(integer(&7i32.into(), &Schema::enumerated())),
            b"\x01\x07"
        );
        assert!(integer(&true.into(), &schema).is_err());
    }

    #[test]
    fn encode_bit_string() {
        let value = Value::from(BitString::from_bits([true, false, true]));
        let res = bit_string(&value, &Schema::bit_string()).unwrap();
        assert_eq!(res.substrate, b"\x02\x05\xa0");
        assert!(!res.octet_aligned);
    }

    #[test]
    fn encode_octet_string() {
        let schema = Schema::utf8_string();
        let res = octet_string(&"abc".into(), &schema, Options::new());
        let res = res.unwrap();
        assert_eq!(res.substrate, b"\x03abc");
        assert!(!res.constructed);
        assert!(res.octet_aligned);

        let res = octet_string(
            &Bytes::new().into(), &Schema::octet_string(), Options::new()
        ).unwrap();
        assert_eq!(res.substrate, b"\x00");

        let long = vec![0x42u8; 200];
        let res = octet_string(
            &long.clone().into(), &Schema::octet_string(), Options::new()
        ).unwrap();
        assert_eq!(&res.substrate[..2], b"\x81\xc8");
        assert_eq!(&res.substrate[2..], long.as_slice());
    }

    #[test]
    fn encode_chunked() {
        let schema = Schema::octet_string();
        let options = Options::new().with_max_chunk_size(2);
        let res = octet_string(&"abcde".into(), &schema, options).unwrap();
        assert_eq!(res.substrate, b"\x02ab\x02cd\x01e");
        assert!(res.constructed);

        let res = octet_string(&"ab".into(), &schema, options).unwrap();
        assert_eq!(res.substrate, b"\x02ab");
        assert!(!res.constructed);
    }

    #[test]
    fn encode_null() {
        let schema = Schema::null();
        let res = null(&schema);
        assert!(res.substrate.is_empty());
        assert!(!res.constructed);
        assert!(res.octet_aligned);
    }

    #[test]
    fn encode_oid() {
        let value = Value::from(Oid::from_str("1.2.840.113549").unwrap());
        assert_eq!(
            substrate(oid(&value, &Schema::oid())),
            b"\x06\x2a\x86\x48\x86\xf7\x0d"
        );
        assert!(oid(&Value::null(), &Schema::oid()).is_err());
    }

    #[test]
    fn encode_real() {
        assert_eq!(
            substrate(real(&0.5f64.into(), &Schema::real())),
            b"\x03\x80\xff\x01"
        );
        assert_eq!(
            substrate(real(&0f64.into(), &Schema::real())), b"\x00"
        );
        assert!(real(&1i32.into(), &Schema::real()).is_err());
    }
}
