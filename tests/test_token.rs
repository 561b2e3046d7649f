use cbor_xml_dictionary::{Error, NameToken, TokenValue};
use dcbor::prelude::*;

fn roundtrip(token: NameToken) {
    let cbor = CBOR::from(&token);
    match NameToken::try_from(&cbor) {
        Ok(result) => {
            if result != token {
                panic!("=== Expected ===\n{}\n\n=== Got ===\n{}", token, result);
            }
        }
        Err(e) => panic!("{:?}", e),
    }
}

#[test]
fn test_clone_is_equal_and_keeps_tag() {
    let token = NameToken::unicode_string("opmeta").with_tag(1234);
    let copy = token.clone();
    assert_eq!(copy, token);
    assert_eq!(copy.tag(), Some(1234));
    assert!(!std::ptr::eq(&copy, &token));
}

#[test]
fn test_equality_by_variant_payload_and_tag() {
    assert_eq!(NameToken::unsigned(1), NameToken::unsigned(1));
    assert_ne!(NameToken::unsigned(1), NameToken::unsigned(2));
    assert_ne!(NameToken::unsigned(1), NameToken::double(1.0));
    assert_ne!(NameToken::unsigned(0), NameToken::bool(false));
    assert_eq!(NameToken::double(1.11), NameToken::double(1.11));
    assert_eq!(NameToken::double(f64::NAN), NameToken::double(f64::NAN));
    assert_eq!(
        NameToken::byte_string(vec![0xAD, 0xFC, 0xB3]),
        NameToken::byte_string(vec![0xAD, 0xFC, 0xB3])
    );

    let tagged = NameToken::unsigned(1).with_tag(7);
    assert_ne!(tagged, NameToken::unsigned(1));
    assert_eq!(tagged.untagged(), NameToken::unsigned(1));
    assert!(tagged.has_tag());
    assert!(!tagged.untagged().has_tag());
}

#[test]
fn test_value_access() {
    let token = NameToken::negative(-5);
    assert!(matches!(token.value(), TokenValue::NegativeInt(-5)));
    let token: NameToken = TokenValue::Bool(true).into();
    assert_eq!(token, NameToken::bool(true));
}

#[test]
fn test_display() {
    assert_eq!(NameToken::unsigned(7).to_string(), "7");
    assert_eq!(NameToken::negative(-1).to_string(), "-1");
    assert_eq!(NameToken::unsigned(7).with_tag(42).to_string(), "42(7)");
    assert_eq!(NameToken::byte_string(vec![0xAD, 0xFC]).to_string(), "h'adfc'");
    assert_eq!(NameToken::unicode_string("abc").to_string(), r#""abc""#);
    assert_eq!(NameToken::bool(false).to_string(), "false");
    assert_eq!(NameToken::double(1.5).to_string(), "1.5");
}

#[test]
fn test_cbor_roundtrip() {
    roundtrip(NameToken::unsigned(0));
    roundtrip(NameToken::unsigned(u64::MAX));
    roundtrip(NameToken::negative(-1));
    roundtrip(NameToken::negative(-1000));
    roundtrip(NameToken::double(1.5));
    roundtrip(NameToken::byte_string(vec![0x01, 0x02, 0x03]));
    roundtrip(NameToken::unicode_string("Hello, world!"));
    roundtrip(NameToken::bool(true));
    roundtrip(NameToken::bool(false));
    roundtrip(NameToken::unsigned(3).with_tag(1234));
    roundtrip(NameToken::unicode_string("x").with_tag(5678));
}

#[test]
fn test_cbor_conversion() {
    assert_eq!(CBOR::from(&NameToken::unsigned(10)), CBOR::from(10u64));
    assert_eq!(CBOR::from(&NameToken::unicode_string("abc")), CBOR::from("abc"));
    assert_eq!(
        CBOR::from(NameToken::byte_string(vec![0xDE, 0xAD])),
        CBOR::to_byte_string(vec![0xDE, 0xAD])
    );
    assert_eq!(
        CBOR::from(&NameToken::unicode_string("Hello").with_tag(5678)),
        CBOR::to_tagged_value(5678, "Hello")
    );
}

#[test]
fn test_integral_double_is_reduced() {
    let double = NameToken::double(2.0);
    assert_eq!(double.to_cbor_data(), NameToken::unsigned(2).to_cbor_data());
    assert_eq!(double.to_cbor_data(), vec![0x02]);

    let decoded = NameToken::try_from(&CBOR::from(&double)).unwrap();
    assert!(matches!(decoded.value(), TokenValue::UnsignedInt(2)));
    assert_ne!(decoded, double);

    let tagged = NameToken::double(-3.0).with_tag(7);
    let decoded = NameToken::try_from(&CBOR::from(&tagged)).unwrap();
    assert_eq!(decoded, NameToken::negative(-3).with_tag(7));
}

#[test]
fn test_cbor_data() {
    assert_eq!(NameToken::unsigned(1).to_cbor_data(), vec![0x01]);
    assert_eq!(NameToken::unsigned(24).to_cbor_data(), vec![0x18, 0x18]);
    assert_eq!(NameToken::unsigned(0).with_tag(1).to_cbor_data(), vec![0xC1, 0x00]);
    assert_eq!(NameToken::bool(true).to_cbor_data(), vec![0xF5]);
}

#[test]
fn test_unsupported_cbor() {
    let array: CBOR = vec![1, 2, 3].into();
    assert!(matches!(NameToken::try_from(&array), Err(Error::UnsupportedCbor(_))));
    assert!(matches!(NameToken::try_from(&CBOR::null()), Err(Error::UnsupportedCbor(_))));
}
