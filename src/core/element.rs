//! # Credential Element
//!
//! A single named byte value carried inside a presence credential.
//!
//! Elements are only ever produced by a successful
//! [`CredentialElementBuilder::build`], so every `CredentialElement` in
//! existence has both a key and a value. Once built, neither field can be
//! changed.
//!
//! ## Usage
//! ```rust
//! use credential_element::CredentialElement;
//!
//! let element = CredentialElement::builder()
//!     .set_element("device_id", vec![0x01, 0x02, 0x03])
//!     .build()?;
//!
//! assert_eq!(element.key(), "device_id");
//! assert_eq!(element.value(), &[0x01, 0x02, 0x03]);
//! # Ok::<(), credential_element::CodecError>(())
//! ```

use crate::config::MAX_WIRE_LEN;
use crate::error::{constants, CodecError, ElementPart, Result};
use serde::{Deserialize, Serialize};

/// Immutable key/value pair. Empty keys and empty values are both valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ElementFields")]
pub struct CredentialElement {
    key: String,
    value: Vec<u8>,
}

impl CredentialElement {
    /// Single-step validated construction.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Result<Self> {
        Self::builder().set_element(key, value).build()
    }

    /// Start staged construction.
    pub fn builder() -> CredentialElementBuilder {
        CredentialElementBuilder::default()
    }

    /// Returns the key of the credential element.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value of the credential element.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Consume the element, returning its key and value.
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.key, self.value)
    }
}

/// Staged construction helper; nothing is validated until [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct CredentialElementBuilder {
    key: Option<String>,
    value: Option<Vec<u8>>,
}

impl CredentialElementBuilder {
    /// Set the key and value for this credential element.
    ///
    /// Calling this again replaces both previously stored fields.
    pub fn set_element(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.key = Some(key.into());
        self.value = Some(value.into());
        self
    }

    /// Set only the key, keeping any previously stored value.
    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set only the value, keeping any previously stored key.
    pub fn set_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builds a [`CredentialElement`], failing if either field was never set.
    ///
    /// Fields longer than a u32 length prefix can describe are rejected too,
    /// which keeps encoding infallible.
    pub fn build(self) -> Result<CredentialElement> {
        match (self.key, self.value) {
            (Some(key), Some(value)) => {
                check_wire_len(ElementPart::Key, key.len())?;
                check_wire_len(ElementPart::Value, value.len())?;
                Ok(CredentialElement { key, value })
            }
            (None, Some(_)) => Err(CodecError::Validation(constants::ERR_MISSING_KEY)),
            (Some(_), None) => Err(CodecError::Validation(constants::ERR_MISSING_VALUE)),
            (None, None) => Err(CodecError::Validation(
                constants::ERR_MISSING_KEY_OR_VALUE,
            )),
        }
    }
}

fn check_wire_len(part: ElementPart, len: usize) -> Result<()> {
    if len > MAX_WIRE_LEN {
        return Err(CodecError::OversizedElement {
            part,
            len,
            limit: MAX_WIRE_LEN,
        });
    }
    Ok(())
}

// Serde entry point; routes through the builder like every other constructor.
#[derive(Deserialize)]
struct ElementFields {
    key: String,
    value: Vec<u8>,
}

impl TryFrom<ElementFields> for CredentialElement {
    type Error = CodecError;

    fn try_from(fields: ElementFields) -> Result<Self> {
        CredentialElement::builder()
            .set_element(fields.key, fields.value)
            .build()
    }
}
