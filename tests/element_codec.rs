//! Integration tests for credential element construction and framing
//!
//! Covers the concrete encode/decode scenarios, the builder validation rules
//! and truncation handling on the public API.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use credential_element::error::constants;
use credential_element::{CodecError, CredentialElement};

fn be(n: u32) -> [u8; 4] {
    n.to_be_bytes()
}

#[test]
fn test_device_id_scenario() {
    let element = CredentialElement::builder()
        .set_element("device_id", vec![0x01, 0x02, 0x03])
        .build()
        .expect("valid element");

    let bytes = element.encode();

    // [key len][key][value len][value]
    assert_eq!(&bytes[..4], &be(9));
    assert_eq!(&bytes[4..13], b"device_id");
    assert_eq!(&bytes[13..17], &be(3));
    assert_eq!(&bytes[17..], &[0x01, 0x02, 0x03]);

    let decoded = CredentialElement::decode(&mut &bytes[..]).expect("decode");
    assert_eq!(decoded.key(), "device_id");
    assert_eq!(decoded.value(), &[0x01, 0x02, 0x03]);
}

#[test]
fn test_empty_value_scenario() {
    let element = CredentialElement::new("empty", Vec::new()).unwrap();
    let decoded = CredentialElement::from_bytes(&element.encode()).unwrap();

    assert_eq!(decoded.key(), "empty");
    assert!(decoded.value().is_empty());
    assert_eq!(decoded, element);
}

#[test]
fn test_declared_length_exceeds_input() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&be(3));
    bytes.extend_from_slice(b"key");
    bytes.extend_from_slice(&be(10));
    bytes.extend_from_slice(&[0xAA; 4]);

    match CredentialElement::from_bytes(&bytes) {
        Err(CodecError::TruncatedInput { needed, available }) => {
            assert_eq!(needed, 10);
            assert_eq!(available, 4);
        }
        other => panic!("expected truncated input, got {other:?}"),
    }
}

#[test]
fn test_declared_key_length_exceeds_input() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&be(50));
    bytes.extend_from_slice(b"short");

    let err = CredentialElement::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CodecError::TruncatedInput {
            needed: 50,
            available: 5
        }
    ));
}

#[test]
fn test_missing_value_length_prefix() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&be(1));
    bytes.push(b'k');
    bytes.extend_from_slice(&[0, 0]);

    let err = CredentialElement::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CodecError::TruncatedInput {
            needed: 4,
            available: 2
        }
    ));
}

#[test]
fn test_empty_input() {
    let err = CredentialElement::from_bytes(&[]).unwrap_err();
    assert!(matches!(
        err,
        CodecError::TruncatedInput {
            needed: 4,
            available: 0
        }
    ));
}

#[test]
fn test_build_without_key() {
    let result = CredentialElement::builder().set_value(vec![1]).build();
    assert!(matches!(result, Err(CodecError::Validation(_))));
}

#[test]
fn test_build_without_value() {
    let result = CredentialElement::builder().set_key("k").build();
    assert!(matches!(result, Err(CodecError::Validation(_))));
}

#[test]
fn test_build_without_either() {
    let result = CredentialElement::builder().build();
    assert!(matches!(
        result,
        Err(CodecError::Validation(constants::ERR_MISSING_KEY_OR_VALUE))
    ));
}

#[test]
fn test_encoding_is_deterministic() {
    let element = CredentialElement::new("nonce", vec![0x5A; 64]).unwrap();
    assert_eq!(element.encode(), element.encode());
    assert_eq!(element.to_bytes(), element.encode().to_vec());
}

#[test]
fn test_sequential_elements_share_a_buffer() {
    let first = CredentialElement::new("a", vec![1, 2]).unwrap();
    let second = CredentialElement::new("b", vec![3]).unwrap();

    let mut buf = Vec::new();
    first.encode_into(&mut buf);
    second.encode_into(&mut buf);
    buf.extend_from_slice(b"caller-owned trailer");

    let mut cursor = &buf[..];
    assert_eq!(CredentialElement::decode(&mut cursor).unwrap(), first);
    assert_eq!(CredentialElement::decode(&mut cursor).unwrap(), second);
    assert_eq!(cursor, b"caller-owned trailer");
}

#[test]
fn test_unicode_key() {
    let element = CredentialElement::new("clé-🔑", vec![0xFF]).unwrap();
    let bytes = element.encode();
    assert_eq!(&bytes[..4], &be("clé-🔑".len() as u32));
    assert_eq!(CredentialElement::from_bytes(&bytes).unwrap(), element);
}
