//! # Element Lists
//!
//! A presence credential carries its elements as an ordered sequence:
//!
//! ```text
//! [Count(4)] [Element]*
//! ```
//!
//! The count is an unsigned 32-bit big-endian integer. Decoding never
//! preallocates more slots than the remaining input could hold, since the
//! smallest element (empty key, empty value) still occupies eight bytes.

use crate::config::{LimitsConfig, MIN_ELEMENT_SIZE};
use crate::core::element::CredentialElement;
use crate::core::wire::{check_limit, read_len};
use crate::error::{CodecError, ElementPart, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

/// Content flags reported for encoded elements: no file descriptors or
/// other special objects are ever embedded.
pub const CONTENTS_FLAGS: u32 = 0;

/// Exact encoded size of `elements` as a list.
pub fn encoded_list_len(elements: &[CredentialElement]) -> usize {
    elements
        .iter()
        .fold(4, |total: usize, element| total.saturating_add(element.encoded_len()))
}

/// Encode `elements` with a leading count.
///
/// Fails only if the list holds more than `u32::MAX` elements.
pub fn encode_list(elements: &[CredentialElement]) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(encoded_list_len(elements));
    encode_list_into(elements, &mut buf)?;
    Ok(buf.freeze())
}

/// Append `elements` with a leading count to `dst`.
pub fn encode_list_into<B: BufMut>(elements: &[CredentialElement], dst: &mut B) -> Result<()> {
    let count = u32::try_from(elements.len()).map_err(|_| CodecError::OversizedElement {
        part: ElementPart::List,
        len: elements.len(),
        limit: u32::MAX as usize,
    })?;

    dst.put_u32(count);
    for element in elements {
        element.encode_into(dst);
    }

    debug!(count, "Encoded credential element list");
    Ok(())
}

/// Decode a count-prefixed list, bounded only by the input itself.
pub fn decode_list<B: Buf>(src: &mut B) -> Result<Vec<CredentialElement>> {
    decode_list_with_limits(src, &LimitsConfig::unbounded())
}

/// Decode a count-prefixed list, applying `limits` to the count and to
/// every element.
pub fn decode_list_with_limits<B: Buf>(
    src: &mut B,
    limits: &LimitsConfig,
) -> Result<Vec<CredentialElement>> {
    let count = read_len(src)?;
    check_limit(ElementPart::List, count, limits.max_elements)?;

    let mut elements = new_array(count.min(src.remaining() / MIN_ELEMENT_SIZE));
    for _ in 0..count {
        elements.push(CredentialElement::decode_with_limits(src, limits)?);
    }

    debug!(count, "Decoded credential element list");
    Ok(elements)
}

/// Decode a buffer that holds exactly one list.
pub fn list_from_bytes(bytes: &[u8]) -> Result<Vec<CredentialElement>> {
    list_from_bytes_with_limits(bytes, &LimitsConfig::unbounded())
}

/// Decode a buffer that holds exactly one list, applying `limits`.
pub fn list_from_bytes_with_limits(
    bytes: &[u8],
    limits: &LimitsConfig,
) -> Result<Vec<CredentialElement>> {
    let mut cursor = bytes;
    let elements = decode_list_with_limits(&mut cursor, limits)?;
    if !cursor.is_empty() {
        return Err(CodecError::TrailingBytes(cursor.len()));
    }
    Ok(elements)
}

/// Preallocate room for `size` elements.
pub fn new_array(size: usize) -> Vec<CredentialElement> {
    Vec::with_capacity(size)
}
