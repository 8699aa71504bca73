//! Example: Encoding Credential Elements
//!
//! Builds a small set of credential elements, frames them with the native
//! length-prefixed encoding, compares the alternative serde formats and
//! streams them through the metered codec.
//!
//! Run with: `cargo run --example serialization_formats`

#![allow(clippy::uninlined_format_args)]

use bytes::BytesMut;
use credential_element::config::CodecConfig;
use credential_element::core::list::{encode_list, list_from_bytes};
use credential_element::core::serialization::{MultiFormat, SerializationFormat};
use credential_element::utils::logging::init_logging;
use credential_element::utils::CodecMetrics;
use credential_element::{CredentialElement, CredentialElementCodec};
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CodecConfig::from_env()?;
    config.validate_strict()?;
    init_logging(&config.logging)?;

    println!("=== Credential Element Encoding Demo ===\n");

    let element = CredentialElement::builder()
        .set_element("device_id", vec![0x01, 0x02, 0x03])
        .build()?;

    let native = element.encode();
    println!("Element: {:?}", element);
    println!("Native encoding ({} bytes): {:02X?}\n", native.len(), &native[..]);

    for format in SerializationFormat::ALL {
        let bytes = element.serialize_format(format)?;
        let recovered = CredentialElement::deserialize_format(&bytes, format)?;
        println!(
            "{:<12} {:>4} bytes  roundtrip: {}",
            format.name(),
            bytes.len(),
            if recovered == element {
                "✓ Success"
            } else {
                "✗ Failed"
            }
        );
    }

    let elements = vec![
        element,
        CredentialElement::new("empty", Vec::new())?,
        CredentialElement::new("salt", vec![0x5A; 16])?,
    ];
    let list = encode_list(&elements)?;
    let decoded = list_from_bytes(&list)?;
    println!(
        "\nList of {} elements: {} bytes, decoded {} elements",
        elements.len(),
        list.len(),
        decoded.len()
    );

    let metrics = Arc::new(CodecMetrics::new());
    let mut codec = CredentialElementCodec::new(config.limits).with_metrics(metrics.clone());
    let mut stream = BytesMut::new();
    for element in &elements {
        codec.encode(element, &mut stream)?;
    }
    while let Some(element) = codec.decode(&mut stream)? {
        println!("Streamed element {:?}", element.key());
    }
    metrics.log_summary();

    // Missing fields are rejected at build time.
    match CredentialElement::builder().set_key("orphan").build() {
        Ok(_) => println!("Unexpectedly built an element without a value"),
        Err(e) => println!("Builder rejected incomplete element: {}", e),
    }

    Ok(())
}
