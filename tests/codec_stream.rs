//! Integration tests for the element stream codec
//!
//! Exercises `CredentialElementCodec` directly on `BytesMut` buffers and
//! through `FramedRead` / `FramedWrite` over async byte streams.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use bytes::BytesMut;
use credential_element::config::LimitsConfig;
use credential_element::error::ElementPart;
use credential_element::utils::CodecMetrics;
use credential_element::{CodecError, CredentialElement, CredentialElementCodec};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder, FramedRead, FramedWrite};

fn elements() -> Vec<CredentialElement> {
    vec![
        CredentialElement::new("device_id", vec![0x01, 0x02, 0x03]).unwrap(),
        CredentialElement::new("empty", Vec::new()).unwrap(),
        CredentialElement::new("metadata_key", vec![0xAB; 300]).unwrap(),
    ]
}

#[test]
fn test_codec_multiple_elements_in_buffer() {
    let mut codec = CredentialElementCodec::default();
    let mut buffer = BytesMut::new();
    for element in elements() {
        codec.encode(element, &mut buffer).expect("encode");
    }

    for expected in elements() {
        let decoded = codec
            .decode(&mut buffer)
            .expect("Failed to decode")
            .expect("Should have element");
        assert_eq!(decoded, expected);
    }

    assert!(buffer.is_empty());
    assert!(codec.decode(&mut buffer).unwrap().is_none());
}

#[test]
fn test_codec_encode_exact_size() {
    let mut codec = CredentialElementCodec::default();
    let element = CredentialElement::new("k", vec![0u8; 100]).unwrap();

    let mut buffer = BytesMut::new();
    codec.encode(&element, &mut buffer).expect("encode");

    assert_eq!(buffer.len(), 4 + 1 + 4 + 100);
    assert_eq!(&buffer[..], &element.to_bytes()[..]);
}

#[test]
fn test_codec_rejects_oversized_value_before_buffering() {
    let limits = LimitsConfig {
        max_value_len: 16,
        ..LimitsConfig::default()
    };
    let metrics = Arc::new(CodecMetrics::new());
    let mut codec = CredentialElementCodec::new(limits).with_metrics(metrics.clone());

    // Only the headers have arrived; the claimed value is far above the limit.
    let mut buffer = BytesMut::new();
    buffer.extend_from_slice(&1u32.to_be_bytes());
    buffer.extend_from_slice(b"k");
    buffer.extend_from_slice(&1_000_000u32.to_be_bytes());

    let err = codec.decode(&mut buffer).unwrap_err();
    assert!(matches!(
        err,
        CodecError::OversizedElement {
            part: ElementPart::Value,
            len: 1_000_000,
            limit: 16
        }
    ));
    assert_eq!(metrics.snapshot().oversized_rejections, 1);
}

#[test]
fn test_codec_rejects_invalid_utf8_key() {
    let mut codec = CredentialElementCodec::default();
    let mut buffer = BytesMut::new();
    buffer.extend_from_slice(&1u32.to_be_bytes());
    buffer.extend_from_slice(&[0xFF]);
    buffer.extend_from_slice(&0u32.to_be_bytes());

    assert!(matches!(
        codec.decode(&mut buffer),
        Err(CodecError::InvalidKey(_))
    ));
}

#[tokio::test]
async fn test_framed_read_from_byte_stream() {
    let mut wire = Vec::new();
    for element in elements() {
        element.encode_into(&mut wire);
    }

    let mut reader = FramedRead::new(&wire[..], CredentialElementCodec::default());
    let mut decoded = Vec::new();
    while let Some(element) = reader.next().await {
        decoded.push(element.expect("frame"));
    }

    assert_eq!(decoded, elements());
}

#[tokio::test]
async fn test_framed_read_truncated_stream() {
    let wire = CredentialElement::new("device_id", vec![1, 2, 3])
        .unwrap()
        .to_bytes();

    let mut reader = FramedRead::new(&wire[..wire.len() - 2], CredentialElementCodec::default());
    let result = reader.next().await.expect("an item");
    assert!(matches!(result, Err(CodecError::TruncatedInput { .. })));
}

#[tokio::test]
async fn test_framed_write_then_read_over_duplex() {
    let (client, server) = tokio::io::duplex(64);

    let writer = tokio::spawn(async move {
        let mut sink = FramedWrite::new(client, CredentialElementCodec::default());
        for element in elements() {
            sink.send(element).await.expect("send");
        }
    });

    let mut reader = FramedRead::new(server, CredentialElementCodec::default());
    let mut decoded = Vec::new();
    while let Some(element) = reader.next().await {
        decoded.push(element.expect("frame"));
    }

    writer.await.expect("writer task");
    assert_eq!(decoded, elements());
}

#[test]
fn test_codec_encode_enforces_limits() {
    let limits = LimitsConfig {
        max_value_len: 16,
        ..LimitsConfig::default()
    };
    let metrics = Arc::new(CodecMetrics::new());
    let mut codec = CredentialElementCodec::new(limits).with_metrics(metrics.clone());
    assert_eq!(codec.limits().max_value_len, 16);

    let element = CredentialElement::new("k", vec![0u8; 64]).unwrap();
    let mut buffer = BytesMut::new();
    let err = codec.encode(&element, &mut buffer).unwrap_err();

    assert!(matches!(
        err,
        CodecError::OversizedElement {
            part: ElementPart::Value,
            len: 64,
            limit: 16
        }
    ));
    assert!(buffer.is_empty());

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.elements_encoded, 0);
    assert_eq!(snapshot.oversized_rejections, 1);

    // An element at the limit still goes through and reads back.
    let element = CredentialElement::new("k", vec![0u8; 16]).unwrap();
    codec.encode(&element, &mut buffer).expect("encode at limit");
    assert_eq!(codec.decode(&mut buffer).unwrap(), Some(element));
}

#[test]
fn test_decode_eof_reports_value_shortfall() {
    let mut buffer = BytesMut::new();
    buffer.extend_from_slice(&1u32.to_be_bytes());
    buffer.extend_from_slice(b"k");
    buffer.extend_from_slice(&1000u32.to_be_bytes());
    buffer.extend_from_slice(&[0xAA, 0xBB]);

    let expected = CredentialElement::from_bytes(&buffer).unwrap_err();
    assert!(matches!(
        expected,
        CodecError::TruncatedInput {
            needed: 1000,
            available: 2
        }
    ));

    let mut codec = CredentialElementCodec::default();
    assert!(codec.decode(&mut buffer).unwrap().is_none());
    assert!(matches!(
        codec.decode_eof(&mut buffer),
        Err(CodecError::TruncatedInput {
            needed: 1000,
            available: 2
        })
    ));
}

#[test]
fn test_decode_eof_reports_key_shortfall() {
    let mut codec = CredentialElementCodec::default();
    let mut buffer = BytesMut::from(&[0u8, 0, 0, 5, b'a'][..]);

    assert!(matches!(
        codec.decode_eof(&mut buffer),
        Err(CodecError::TruncatedInput {
            needed: 5,
            available: 1
        })
    ));
}
