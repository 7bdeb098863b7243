#![no_main]

use std::str::FromStr;
use libfuzzer_sys::fuzz_target;
use bytes::Bytes;
use oer_encoder::{encode, Oid, Options, Schema, Value};

fuzz_target!(|data: &[u8]| {
    let oid = match Oid::from_octets(Bytes::copy_from_slice(data)) {
        Ok(oid) => oid,
        Err(_) => return,
    };
    let res = encode(
        &Value::from(oid.clone()), Some(&Schema::oid()), Options::default()
    ).unwrap();
    assert!(res.ends_with(data));

    let text = oid.to_string();
    if !text.contains("not implemented") {
        if let Ok(parsed) = Oid::from_str(&text) {
            assert_eq!(parsed.to_string(), text);
        }
    }
});
