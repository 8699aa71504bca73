//! # Core Components
//!
//! Credential element model, binary framing, and format adapters.
//!
//! ## Components
//! - **Element**: `CredentialElement` and its validating builder
//! - **Wire**: Length-prefixed encode/decode over `bytes::Buf`/`BufMut`
//! - **List**: Count-prefixed sequences of elements
//! - **Codec**: Tokio codec for framing elements over byte streams
//! - **Serialization**: Bincode, JSON and MessagePack adapters
//!
//! ## Wire Format
//! ```text
//! [KeyLen(4)] [Key(K)] [ValueLen(4)] [Value(V)]
//! ```
//! All lengths are unsigned 32-bit big-endian.
//!
//! ## Safety
//! - Every declared length is checked against the remaining input before
//!   anything is copied or allocated
//! - Decoding consumes exactly one element and never reads into trailing data

pub mod codec;
pub mod element;
pub mod list;
pub mod serialization;
pub mod wire;
