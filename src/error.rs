//! # Error Types
//!
//! Error handling for credential element construction and encoding.
//!
//! ## Error Categories
//! - **Validation Errors**: Required key/value missing at build time
//! - **Framing Errors**: Truncated input, oversized declared lengths, invalid UTF-8 keys
//! - **Format Errors**: Alternative serde format failures, unknown format bytes
//! - **Configuration Errors**: Unreadable or invalid configuration
//!
//! All errors implement `std::error::Error` for interoperability.
//!
//! ## Example Usage
//! ```rust
//! use credential_element::error::{CodecError, Result};
//! use credential_element::CredentialElement;
//!
//! fn parse(bytes: &[u8]) -> Result<CredentialElement> {
//!     CredentialElement::from_bytes(bytes)
//! }
//!
//! match parse(&[0, 0, 0, 9]) {
//!     Err(CodecError::TruncatedInput { needed, available }) => {
//!         assert_eq!((needed, available), (9, 0));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Static error messages shared across the crate.
pub mod constants {
    /// Builder validation
    pub const ERR_MISSING_KEY_OR_VALUE: &str = "neither key or value can be null";
    pub const ERR_MISSING_KEY: &str = "credential element key was never set";
    pub const ERR_MISSING_VALUE: &str = "credential element value was never set";

    /// Format negotiation
    pub const ERR_EMPTY_DATA: &str = "Empty data";
}

/// Which part of an element a size limit was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPart {
    Key,
    Value,
    List,
}

impl std::fmt::Display for ElementPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ElementPart::Key => "key",
            ElementPart::Value => "value",
            ElementPart::List => "element list",
        };
        f.write_str(name)
    }
}

// CodecError is the primary error type for all element operations
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Validation error: {0}")]
    Validation(&'static str),

    #[error("Truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("Oversized {part}: {len} exceeds limit of {limit}")]
    OversizedElement {
        part: ElementPart,
        len: usize,
        limit: usize,
    },

    #[error("Trailing data: {0} bytes after the last element")]
    TrailingBytes(usize),

    #[error("Invalid key: {0}")]
    InvalidKey(#[from] std::string::FromUtf8Error),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Deserialize error: {0}")]
    DeserializeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// True for errors caused by malformed or incomplete input bytes.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            CodecError::TruncatedInput { .. }
                | CodecError::TrailingBytes(_)
                | CodecError::OversizedElement { .. }
                | CodecError::InvalidKey(_)
                | CodecError::DeserializeError(_)
        )
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
