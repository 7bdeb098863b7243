#![no_main]

use libfuzzer_sys::fuzz_target;
use oer_encoder::{encode, BitString, Options, Schema, Value};

fuzz_target!(|data: &[u8]| {
    let (chunk, data) = match data.split_first() {
        Some((chunk, data)) => (usize::from(*chunk), data),
        None => return,
    };

    for schema in [
        Schema::octet_string(), Schema::utf8_string(), Schema::ia5_string(),
        Schema::any(),
    ] {
        let options = Options::new().with_max_chunk_size(chunk);
        let res = encode(&Value::from(data), Some(&schema), options).unwrap();
        assert!(res.len() > data.len());

        let options = options.with_definite_length(false);
        let _ = encode(&Value::from(data), Some(&schema), options).unwrap();
    }

    let bits = BitString::from_bits(
        data.iter().map(|octet| octet & 1 != 0)
    );
    assert_eq!(bits.bit_len(), data.len());
    assert!(bits.unused() < 8);
    let _ = encode(
        &Value::from(bits), Some(&Schema::bit_string()), Options::default()
    ).unwrap();
});
