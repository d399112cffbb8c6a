//! Tests for the tagged value codec
//!
//! These tests verify:
//! - Flags and bytes produced for each value kind
//! - Strict flag matching on decode
//! - The FLAG_NONE pickle fallback
//! - Legacy boolean handling

use mcpickle::codec::{
    decode, decode_bool, decode_int64, decode_string, encode, encode_bool, encode_int64,
    encode_string, encode_unicode, Item, ScalarValue, TaggedValue, TypeFlag,
};
use mcpickle::McError;

// =============================================================================
// Helper Functions
// =============================================================================

fn tagged(bytes: &[u8], flag: TypeFlag) -> TaggedValue {
    TaggedValue::new(bytes.to_vec(), flag)
}

// =============================================================================
// Flag Values
// =============================================================================

#[test]
fn test_flag_bits_match_pylibmc() {
    assert_eq!(TypeFlag::NONE.bits(), 0);
    assert_eq!(TypeFlag::PICKLE.bits(), 1);
    assert_eq!(TypeFlag::INTEGER.bits(), 2);
    assert_eq!(TypeFlag::LONG.bits(), 4);
    assert_eq!(TypeFlag::ZLIB.bits(), 8);
    assert_eq!(TypeFlag::BOOL.bits(), 16);
}

#[test]
fn test_from_raw_keeps_unknown_bits() {
    let value = TaggedValue::from_raw(b"x".to_vec(), 0x101);
    assert_eq!(value.raw_flags(), 0x101);
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_encode_string_is_verbatim() {
    let value = encode_string("héllo");
    assert_eq!(value.flag, TypeFlag::NONE);
    assert_eq!(&value.bytes[..], "héllo".as_bytes());
}

#[test]
fn test_encode_unicode_is_pickled() {
    let value = encode_unicode("hi").unwrap();
    assert_eq!(value.flag, TypeFlag::PICKLE);
    assert_eq!(&value.bytes[..], b"\x80\x02X\x02\x00\x00\x00hiq\x01.");
}

#[test]
fn test_encode_int64_literal() {
    let item = Item::int64("counter", 1234567890);
    assert_eq!(item.key, "counter");
    assert_eq!(item.value.flag, TypeFlag::INTEGER);
    assert_eq!(&item.value.bytes[..], b"1234567890");
    assert_eq!(decode_int64(&item.value).unwrap(), 1234567890);
}

#[test]
fn test_encode_int64_formatting() {
    assert_eq!(&encode_int64(0).bytes[..], b"0");
    assert_eq!(&encode_int64(-42).bytes[..], b"-42");
    assert_eq!(&encode_int64(i64::MAX).bytes[..], b"9223372036854775807");
    assert_eq!(&encode_int64(i64::MIN).bytes[..], b"-9223372036854775808");
}

#[test]
fn test_encode_bool() {
    let t = encode_bool(true);
    let f = encode_bool(false);
    assert_eq!(t.flag, TypeFlag::BOOL);
    assert_eq!(&t.bytes[..], b"1");
    assert_eq!(&f.bytes[..], b"0");
}

#[test]
fn test_generic_encode_uses_plain_strings() {
    assert_eq!(encode(&ScalarValue::from("s")).flag, TypeFlag::NONE);
    assert_eq!(encode(&ScalarValue::Int(1)).flag, TypeFlag::INTEGER);
    assert_eq!(encode(&ScalarValue::Bool(true)).flag, TypeFlag::BOOL);
}

// =============================================================================
// String Decoding
// =============================================================================

#[test]
fn test_decode_plain_string() {
    let value = tagged(b"plain", TypeFlag::NONE);
    assert_eq!(decode_string(&value).unwrap(), "plain");
    assert_eq!(decode(&value).unwrap(), ScalarValue::Str("plain".into()));
}

#[test]
fn test_decode_pickled_unicode_literal() {
    let s = "Iñtërnâtiôn\u{fffd}lizætiøn";
    let value = encode_unicode(s).unwrap();
    assert_eq!(decode_string(&value).unwrap(), s);
}

#[test]
fn test_decode_python3_pickle_with_memo_zero() {
    // pickle.dumps('hello', 2) uses BINPUT 0
    let value = tagged(b"\x80\x02X\x05\x00\x00\x00helloq\x00.", TypeFlag::PICKLE);
    assert_eq!(decode_string(&value).unwrap(), "hello");
}

#[test]
fn test_flag_none_pickle_fallback() {
    let bytes = encode_unicode("fallback").unwrap().bytes;
    let unflagged = TaggedValue::new(bytes.clone(), TypeFlag::NONE);
    let flagged = TaggedValue::new(bytes, TypeFlag::PICKLE);

    assert_eq!(decode_string(&unflagged).unwrap(), "fallback");
    assert_eq!(decode(&unflagged).unwrap(), decode(&flagged).unwrap());
}

#[test]
fn test_flag_none_pickled_bool_fallback() {
    let bytes: &[u8] = &[0x80, 0x02, 0x88, 0x2e];
    let unflagged = tagged(bytes, TypeFlag::NONE);
    let flagged = tagged(bytes, TypeFlag::PICKLE);

    assert_eq!(decode(&unflagged).unwrap(), decode(&flagged).unwrap());
    assert_eq!(decode_bool(&unflagged).unwrap(), decode_bool(&flagged).unwrap());
    assert!(decode_bool(&unflagged).unwrap());

    let corrupt = tagged(b"\x80\x02\x88", TypeFlag::NONE);
    assert!(decode_bool(&corrupt).unwrap_err().is_pickle_error());
    assert!(matches!(
        decode_bool(&tagged(b"\xff", TypeFlag::NONE)),
        Err(McError::InvalidType { .. })
    ));
}

#[test]
fn test_flag_none_corrupt_pickle_is_error() {
    let value = tagged(b"\x80\x02X\xff\x00\x00\x00ab", TypeFlag::NONE);
    assert!(matches!(
        decode_string(&value),
        Err(McError::TruncatedStream { .. })
    ));
}

#[test]
fn test_pickled_python2_str_is_string() {
    let value = tagged(b"\x80\x02U\x03abcq\x01.", TypeFlag::PICKLE);
    assert_eq!(decode_string(&value).unwrap(), "abc");
}

#[test]
fn test_pickled_non_string_is_invalid_type() {
    let value = tagged(b"\x80\x02K\x2a.", TypeFlag::PICKLE);
    assert!(matches!(
        decode_string(&value),
        Err(McError::InvalidType {
            flag: 1,
            expected: "string"
        })
    ));

    let none = tagged(b"\x80\x02N.", TypeFlag::PICKLE);
    assert!(matches!(decode(&none), Err(McError::InvalidType { .. })));
}

#[test]
fn test_malformed_pickle_never_yields_value() {
    let cases: [&[u8]; 4] = [
        b"\x80\x02X\x05\x00",
        b"\x80\x02\xff",
        b"\x80\x02.",
        b"\x80\x02K\x01K\x02.",
    ];
    for bytes in cases {
        let value = tagged(bytes, TypeFlag::PICKLE);
        assert!(decode_string(&value).is_err());
        assert!(decode(&value).is_err());
    }
}

#[test]
fn test_non_utf8_plain_value() {
    let value = tagged(b"\xff\xfe", TypeFlag::NONE);
    assert!(matches!(decode_string(&value), Err(McError::InvalidUtf8)));
}

#[test]
fn test_string_from_integer_flag_is_invalid_type() {
    let value = tagged(b"12", TypeFlag::INTEGER);
    assert!(matches!(
        decode_string(&value),
        Err(McError::InvalidType { .. })
    ));
}

// =============================================================================
// Integer Decoding
// =============================================================================

#[test]
fn test_decode_int64_flags() {
    assert_eq!(decode_int64(&tagged(b"-17", TypeFlag::INTEGER)).unwrap(), -17);
    assert_eq!(decode_int64(&tagged(b"17", TypeFlag::LONG)).unwrap(), 17);
    assert_eq!(
        decode(&tagged(b"17", TypeFlag::LONG)).unwrap(),
        ScalarValue::Int(17)
    );
}

#[test]
fn test_decode_int64_malformed_text() {
    let cases: [&[u8]; 5] = [b"12a", b"", b" 1", b"1.5", b"99999999999999999999"];
    for bytes in cases {
        let result = decode_int64(&tagged(bytes, TypeFlag::INTEGER));
        assert!(matches!(result, Err(McError::Parse(_))), "{:?}", bytes);
    }
}

#[test]
fn test_decode_int64_wrong_flag() {
    let result = decode_int64(&tagged(b"5", TypeFlag::NONE));
    assert!(matches!(result, Err(McError::InvalidType { .. })));
}

// =============================================================================
// Boolean Decoding
// =============================================================================

#[test]
fn test_decode_bool_flag() {
    assert!(decode_bool(&tagged(b"1", TypeFlag::BOOL)).unwrap());
    assert!(!decode_bool(&tagged(b"0", TypeFlag::BOOL)).unwrap());
    assert_eq!(
        decode(&tagged(b"1", TypeFlag::BOOL)).unwrap(),
        ScalarValue::Bool(true)
    );
}

#[test]
fn test_decode_bool_rejects_other_text() {
    let cases: [&[u8]; 5] = [b"2", b"true", b"", b"01", b"-1"];
    for bytes in cases {
        let result = decode_bool(&tagged(bytes, TypeFlag::BOOL));
        assert!(matches!(result, Err(McError::Parse(_))), "{:?}", bytes);
    }
}

#[test]
fn test_legacy_integer_bool() {
    assert!(decode_bool(&tagged(b"1", TypeFlag::INTEGER)).unwrap());
    assert!(!decode_bool(&tagged(b"0", TypeFlag::INTEGER)).unwrap());
    assert!(matches!(
        decode_bool(&tagged(b"2", TypeFlag::INTEGER)),
        Err(McError::Parse(_))
    ));
}

#[test]
fn test_pickled_bool() {
    assert!(decode_bool(&tagged(b"\x80\x02\x88.", TypeFlag::PICKLE)).unwrap());
    assert!(!decode_bool(&tagged(b"\x80\x02\x89.", TypeFlag::PICKLE)).unwrap());
    assert!(matches!(
        decode_bool(&tagged(b"\x80\x02K\x01.", TypeFlag::PICKLE)),
        Err(McError::InvalidType { .. })
    ));
}

#[test]
fn test_bool_from_plain_string_is_invalid_type() {
    assert!(matches!(
        decode_bool(&tagged(b"1", TypeFlag::NONE)),
        Err(McError::InvalidType { .. })
    ));
}

// =============================================================================
// Unsupported Flags
// =============================================================================

#[test]
fn test_zlib_and_combined_flags_rejected() {
    let zlib = tagged(b"x\x9c", TypeFlag::ZLIB);
    assert!(matches!(decode(&zlib), Err(McError::InvalidType { flag: 8, .. })));

    let combined = tagged(b"1", TypeFlag::INTEGER | TypeFlag::ZLIB);
    assert!(decode_int64(&combined).is_err());
    assert!(decode(&combined).is_err());

    let unknown = TaggedValue::from_raw(b"1".to_vec(), 0x40);
    assert!(decode(&unknown).is_err());
}
