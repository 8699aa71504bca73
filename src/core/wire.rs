//! # Element Wire Format
//!
//! Length-prefixed binary encoding of a single [`CredentialElement`].
//!
//! ```text
//! [KeyLen(4)] [Key(K) UTF-8] [ValueLen(4)] [Value(V)]
//! ```
//!
//! Lengths are unsigned 32-bit big-endian. There is no magic, version byte,
//! or padding: the encoding is a minimal framing meant to be embedded in a
//! caller-defined outer structure, so decoding stops exactly at the end of
//! the element and leaves any following bytes in the source untouched.
//!
//! Every declared length is compared with `Buf::remaining()` before any
//! bytes are copied, so a hostile length can neither over-read nor force a
//! large allocation.

use crate::config::{LimitsConfig, LENGTH_PREFIX_SIZE, MIN_ELEMENT_SIZE};
use crate::core::element::CredentialElement;
use crate::error::{CodecError, ElementPart, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{trace, warn};

impl CredentialElement {
    /// Exact number of bytes [`encode`](Self::encode) produces.
    pub fn encoded_len(&self) -> usize {
        MIN_ELEMENT_SIZE
            .saturating_add(self.key().len())
            .saturating_add(self.value().len())
    }

    /// Reject an already built element whose fields exceed `limits`.
    pub fn check_limits(&self, limits: &LimitsConfig) -> Result<()> {
        check_limit(ElementPart::Key, self.key().len(), limits.max_key_len)?;
        check_limit(ElementPart::Value, self.value().len(), limits.max_value_len)
    }

    /// Encode into a fresh buffer.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Append the encoded element to `dst`.
    pub fn encode_into<B: BufMut>(&self, dst: &mut B) {
        // Lengths fit in u32: enforced by the builder.
        dst.put_u32(self.key().len() as u32);
        dst.put_slice(self.key().as_bytes());
        dst.put_u32(self.value().len() as u32);
        dst.put_slice(self.value());

        trace!(
            key = self.key(),
            value_len = self.value().len(),
            "Encoded credential element"
        );
    }

    /// Encode into a plain byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    /// Decode one element from the front of `src`.
    ///
    /// On success the cursor sits directly after the element's value.
    pub fn decode<B: Buf>(src: &mut B) -> Result<Self> {
        Self::decode_with_limits(src, &LimitsConfig::unbounded())
    }

    /// Decode one element, rejecting declared lengths above `limits`.
    pub fn decode_with_limits<B: Buf>(src: &mut B, limits: &LimitsConfig) -> Result<Self> {
        let key_len = read_len(src)?;
        check_limit(ElementPart::Key, key_len, limits.max_key_len)?;
        let key = String::from_utf8(read_exact(src, key_len)?).inspect_err(|e| {
            warn!(error = %e, "Rejected credential element key");
        })?;

        let value_len = read_len(src)?;
        check_limit(ElementPart::Value, value_len, limits.max_value_len)?;
        let value = read_exact(src, value_len)?;

        trace!(key = %key, value_len, "Decoded credential element");

        CredentialElement::builder().set_element(key, value).build()
    }

    /// Decode a buffer that holds exactly one element.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        let element = Self::decode(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(CodecError::TrailingBytes(cursor.len()));
        }
        Ok(element)
    }
}

/// Size of the complete element at the front of `buf`, if it is all there.
///
/// Returns `Ok(None)` when more input is needed. Nothing is consumed; limits
/// are checked as soon as the corresponding length prefix is visible.
pub fn peek_frame_len(buf: &[u8], limits: &LimitsConfig) -> Result<Option<usize>> {
    let Some(key_len) = peek_len(buf, 0) else {
        return Ok(None);
    };
    check_limit(ElementPart::Key, key_len, limits.max_key_len)?;

    let value_prefix_at = frame_end(ElementPart::Key, LENGTH_PREFIX_SIZE, key_len)?;
    let Some(value_len) = peek_len(buf, value_prefix_at) else {
        return Ok(None);
    };
    check_limit(ElementPart::Value, value_len, limits.max_value_len)?;

    // The value prefix is buffered, so this first sum is bounded by `buf.len()`.
    let total = frame_end(ElementPart::Value, value_prefix_at + LENGTH_PREFIX_SIZE, value_len)?;
    Ok((buf.len() >= total).then_some(total))
}

/// Offset just past a `len`-byte field starting at `start`.
///
/// A frame whose end does not fit in `usize` can never be buffered.
fn frame_end(part: ElementPart, start: usize, len: usize) -> Result<usize> {
    start.checked_add(len).ok_or_else(|| {
        let limit = usize::MAX - start;
        warn!(%part, len, limit, "Declared length overflows the frame size");
        CodecError::OversizedElement { part, len, limit }
    })
}

fn peek_len(buf: &[u8], at: usize) -> Option<usize> {
    let bytes = buf.get(at..at.checked_add(LENGTH_PREFIX_SIZE)?)?;
    let prefix: [u8; LENGTH_PREFIX_SIZE] = bytes.try_into().ok()?;
    Some(u32::from_be_bytes(prefix) as usize)
}

pub(crate) fn read_len<B: Buf>(src: &mut B) -> Result<usize> {
    ensure_remaining(src, LENGTH_PREFIX_SIZE)?;
    Ok(src.get_u32() as usize)
}

fn read_exact<B: Buf>(src: &mut B, len: usize) -> Result<Vec<u8>> {
    ensure_remaining(src, len)?;
    let mut out = vec![0u8; len];
    src.copy_to_slice(&mut out);
    Ok(out)
}

fn ensure_remaining<B: Buf>(src: &B, needed: usize) -> Result<()> {
    let available = src.remaining();
    if available < needed {
        warn!(needed, available, "Truncated credential element input");
        return Err(CodecError::TruncatedInput { needed, available });
    }
    Ok(())
}

pub(crate) fn check_limit(part: ElementPart, len: usize, limit: usize) -> Result<()> {
    if len > limit {
        warn!(%part, len, limit, "Declared length exceeds limit");
        return Err(CodecError::OversizedElement { part, len, limit });
    }
    Ok(())
}
