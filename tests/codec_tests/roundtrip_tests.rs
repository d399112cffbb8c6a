//! Property tests: everything the codec writes, it reads back unchanged

use mcpickle::codec::{
    decode, decode_bool, decode_int64, decode_string, encode, encode_bool, encode_int64,
    encode_string, encode_unicode, ScalarValue,
};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = ScalarValue> {
    prop_oneof![
        any::<String>().prop_map(ScalarValue::Str),
        any::<i64>().prop_map(ScalarValue::Int),
        any::<bool>().prop_map(ScalarValue::Bool),
    ]
}

proptest! {
    #[test]
    fn prop_scalar_roundtrip(value in scalar()) {
        prop_assert_eq!(decode(&encode(&value)).unwrap(), value);
    }

    #[test]
    fn prop_plain_string_roundtrip(s in any::<String>()) {
        prop_assert_eq!(decode_string(&encode_string(&s)).unwrap(), s);
    }

    #[test]
    fn prop_unicode_string_roundtrip(s in any::<String>()) {
        let encoded = encode_unicode(&s).unwrap();
        prop_assert_eq!(encoded.bytes.len(), s.len() + 10);
        prop_assert_eq!(decode_string(&encoded).unwrap(), s);
    }

    #[test]
    fn prop_int64_roundtrip(n in any::<i64>()) {
        prop_assert_eq!(decode_int64(&encode_int64(n)).unwrap(), n);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = mcpickle::pickle::decode(&bytes);
    }
}

#[test]
fn test_edge_values_roundtrip() {
    let values = [
        ScalarValue::from(""),
        ScalarValue::from("Iñtërnâtiôn\u{fffd}lizætiøn"),
        ScalarValue::Int(0),
        ScalarValue::Int(-1),
        ScalarValue::Int(i64::MIN),
        ScalarValue::Int(i64::MAX),
        ScalarValue::Bool(true),
        ScalarValue::Bool(false),
    ];
    for value in values {
        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }

    assert!(decode_bool(&encode_bool(true)).unwrap());
    assert!(!decode_bool(&encode_bool(false)).unwrap());
    assert_eq!(decode_string(&encode_unicode("").unwrap()).unwrap(), "");
}
