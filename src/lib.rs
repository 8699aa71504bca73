//! # Credential Element
//!
//! Length-prefixed key/value encoding for the elements of a presence
//! credential.
//!
//! A [`CredentialElement`] is a text key paired with an opaque byte value.
//! Elements are built through a validating builder, are immutable once
//! built, and encode to a minimal self-delimiting binary form:
//!
//! ```text
//! [KeyLen(4)] [Key(K)] [ValueLen(4)] [Value(V)]
//! ```
//!
//! ## Modules
//! - [`core`]: element model, wire format, lists, stream codec, serde formats
//! - [`config`]: decoding limits and logging configuration
//! - [`error`]: error type and result alias
//! - [`utils`]: logging setup and metrics
//!
//! ## Quick Start
//! ```rust
//! use credential_element::CredentialElement;
//!
//! let element = CredentialElement::builder()
//!     .set_element("device_id", vec![0x01, 0x02, 0x03])
//!     .build()?;
//!
//! let bytes = element.encode();
//! let decoded = CredentialElement::decode(&mut &bytes[..])?;
//! assert_eq!(decoded, element);
//! # Ok::<(), credential_element::CodecError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::{CodecConfig, LimitsConfig};
pub use crate::core::codec::CredentialElementCodec;
pub use crate::core::element::{CredentialElement, CredentialElementBuilder};
pub use crate::core::list::{decode_list, encode_list};
pub use crate::error::{CodecError, Result};
