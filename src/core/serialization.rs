//! # Serialization Formats
//!
//! Alternative encodings of credential elements for storage, debugging and
//! interop. The native length-prefixed framing remains the canonical wire
//! format; bincode, JSON and MessagePack go through serde.
//!
//! Every deserialized element is rebuilt through the validating builder, so
//! all formats share the same construction rules. [`LimitsConfig`] applies
//! through `deserialize_format_with_limits`: the native framing rejects a
//! declared length before reading it, while serde formats are checked once
//! the payload has been parsed.
//!
//! ## Format Header
//! `serialize_with_header` prefixes a single identifier byte so the reader
//! can detect the format:
//! ```text
//! [Format(1)] [Payload(N)]
//! ```
//!
//! ## Usage
//! ```rust
//! use credential_element::core::serialization::{MultiFormat, SerializationFormat};
//! use credential_element::CredentialElement;
//!
//! let element = CredentialElement::new("device_id", vec![1, 2, 3])?;
//! let json = element.serialize_format(SerializationFormat::Json)?;
//! let (recovered, format) = CredentialElement::deserialize_with_header(
//!     &element.serialize_with_header(SerializationFormat::MessagePack)?,
//! )?;
//!
//! assert!(std::str::from_utf8(&json).is_ok());
//! assert_eq!(recovered, element);
//! assert_eq!(format, SerializationFormat::MessagePack);
//! # Ok::<(), credential_element::CodecError>(())
//! ```

use crate::config::LimitsConfig;
use crate::core::element::CredentialElement;
use crate::core::list;
use crate::core::wire::check_limit;
use crate::error::{constants, CodecError, ElementPart, Result};
use serde::{Deserialize, Serialize};

/// Supported serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationFormat {
    /// Length-prefixed element framing (default, canonical)
    #[default]
    Native,
    /// Bincode via serde
    Bincode,
    /// Human-readable JSON format (debugging, interop)
    Json,
    /// Compact binary format (MessagePack)
    MessagePack,
}

impl SerializationFormat {
    /// Every format, in identifier order
    pub const ALL: [SerializationFormat; 4] = [
        SerializationFormat::Native,
        SerializationFormat::Bincode,
        SerializationFormat::Json,
        SerializationFormat::MessagePack,
    ];

    /// Get the format identifier byte for the header
    pub fn format_byte(self) -> u8 {
        match self {
            SerializationFormat::Native => 0x00,
            SerializationFormat::Bincode => 0x01,
            SerializationFormat::Json => 0x02,
            SerializationFormat::MessagePack => 0x03,
        }
    }

    /// Detect format from identifier byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(SerializationFormat::Native),
            0x01 => Some(SerializationFormat::Bincode),
            0x02 => Some(SerializationFormat::Json),
            0x03 => Some(SerializationFormat::MessagePack),
            _ => None,
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            SerializationFormat::Native => "Native",
            SerializationFormat::Bincode => "Bincode",
            SerializationFormat::Json => "JSON",
            SerializationFormat::MessagePack => "MessagePack",
        }
    }
}

/// Types that can be written in any [`SerializationFormat`]
pub trait MultiFormat: Serialize + for<'de> Deserialize<'de> + Sized {
    /// Encode with the native length-prefixed framing
    fn to_native(&self) -> Result<Vec<u8>>;

    /// Decode from the native length-prefixed framing
    fn from_native(data: &[u8]) -> Result<Self>;

    /// Decode from the native framing, rejecting lengths above `limits`
    fn from_native_with_limits(data: &[u8], limits: &LimitsConfig) -> Result<Self>;

    /// Reject a decoded value whose fields exceed `limits`
    fn enforce_limits(&self, limits: &LimitsConfig) -> Result<()>;

    /// Serialize to bytes using the specified format
    fn serialize_format(&self, format: SerializationFormat) -> Result<Vec<u8>> {
        match format {
            SerializationFormat::Native => self.to_native(),
            SerializationFormat::Bincode => {
                bincode::serialize(self).map_err(|e| CodecError::SerializeError(e.to_string()))
            }
            SerializationFormat::Json => {
                serde_json::to_vec(self).map_err(|e| CodecError::SerializeError(e.to_string()))
            }
            SerializationFormat::MessagePack => {
                rmp_serde::to_vec(self).map_err(|e| CodecError::SerializeError(e.to_string()))
            }
        }
    }

    /// Serialize to bytes with format header
    fn serialize_with_header(&self, format: SerializationFormat) -> Result<Vec<u8>> {
        let mut data = vec![format.format_byte()];
        let mut payload = self.serialize_format(format)?;
        data.append(&mut payload);
        Ok(data)
    }

    /// Deserialize from bytes using the specified format
    fn deserialize_format(data: &[u8], format: SerializationFormat) -> Result<Self> {
        match format {
            SerializationFormat::Native => Self::from_native(data),
            SerializationFormat::Bincode => bincode::deserialize(data)
                .map_err(|e| CodecError::DeserializeError(e.to_string())),
            SerializationFormat::Json => serde_json::from_slice(data)
                .map_err(|e| CodecError::DeserializeError(e.to_string())),
            SerializationFormat::MessagePack => rmp_serde::from_slice(data)
                .map_err(|e| CodecError::DeserializeError(e.to_string())),
        }
    }

    /// Deserialize from bytes using the specified format, applying `limits`
    fn deserialize_format_with_limits(
        data: &[u8],
        format: SerializationFormat,
        limits: &LimitsConfig,
    ) -> Result<Self> {
        match format {
            SerializationFormat::Native => Self::from_native_with_limits(data, limits),
            _ => {
                let value = Self::deserialize_format(data, format)?;
                value.enforce_limits(limits)?;
                Ok(value)
            }
        }
    }

    /// Deserialize from bytes with format header
    fn deserialize_with_header(data: &[u8]) -> Result<(Self, SerializationFormat)> {
        let (&first, payload) = data
            .split_first()
            .ok_or_else(|| CodecError::DeserializeError(constants::ERR_EMPTY_DATA.to_string()))?;

        let format = SerializationFormat::from_byte(first).ok_or_else(|| {
            CodecError::DeserializeError(format!("Unknown format byte: {first}"))
        })?;

        let value = Self::deserialize_format(payload, format)?;
        Ok((value, format))
    }
}

impl MultiFormat for CredentialElement {
    fn to_native(&self) -> Result<Vec<u8>> {
        Ok(self.to_bytes())
    }

    fn from_native(data: &[u8]) -> Result<Self> {
        CredentialElement::from_bytes(data)
    }

    fn from_native_with_limits(data: &[u8], limits: &LimitsConfig) -> Result<Self> {
        let mut cursor = data;
        let element = CredentialElement::decode_with_limits(&mut cursor, limits)?;
        if !cursor.is_empty() {
            return Err(CodecError::TrailingBytes(cursor.len()));
        }
        Ok(element)
    }

    fn enforce_limits(&self, limits: &LimitsConfig) -> Result<()> {
        self.check_limits(limits)
    }
}

impl MultiFormat for Vec<CredentialElement> {
    fn to_native(&self) -> Result<Vec<u8>> {
        Ok(list::encode_list(self)?.to_vec())
    }

    fn from_native(data: &[u8]) -> Result<Self> {
        list::list_from_bytes(data)
    }

    fn from_native_with_limits(data: &[u8], limits: &LimitsConfig) -> Result<Self> {
        list::list_from_bytes_with_limits(data, limits)
    }

    fn enforce_limits(&self, limits: &LimitsConfig) -> Result<()> {
        check_limit(ElementPart::List, self.len(), limits.max_elements)?;
        self.iter().try_for_each(|element| element.check_limits(limits))
    }
}
