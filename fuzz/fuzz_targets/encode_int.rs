#![no_main]

use libfuzzer_sys::fuzz_target;
use oer_encoder::{encode, Integer, Options, Schema, Value};

fuzz_target!(|data: &[u8]| {
    let int = Integer::from_signed_octets(data);
    let content = int.as_slice().to_vec();
    let res = encode(
        &Value::from(int), Some(&Schema::integer()), Options::default()
    ).unwrap();

    // The content is minimal and preceded by its length.
    assert!(!content.is_empty());
    if let [first, second, ..] = content.as_slice() {
        assert!(!(*first == 0 && second & 0x80 == 0));
        assert!(!(*first == 0xFF && second & 0x80 != 0));
    }
    assert!(res.ends_with(&content));
    if content.len() < 128 {
        assert_eq!(res[0] as usize, content.len());
    }

    let _ = Integer::from_unsigned_octets(data).to_i128();
});
