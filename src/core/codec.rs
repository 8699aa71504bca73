//! # Element Stream Codec
//!
//! `tokio_util::codec` adapter that frames credential elements over a byte
//! stream, for use with `FramedRead` / `FramedWrite`.
//!
//! Decoding returns `Ok(None)` without consuming anything until a whole
//! element is buffered, then splits exactly that element off the front of
//! the buffer. Declared lengths are checked against the configured limits
//! as soon as their prefix arrives, so a peer cannot make the codec buffer
//! an arbitrarily large frame. Encoding applies the same limits, so a codec
//! never writes a frame that a peer with the same configuration rejects.

use crate::config::LimitsConfig;
use crate::core::element::CredentialElement;
use crate::core::wire::peek_frame_len;
use crate::error::{CodecError, Result};
use crate::utils::metrics::CodecMetrics;
use bytes::BytesMut;
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct CredentialElementCodec {
    limits: LimitsConfig,
    metrics: Option<Arc<CodecMetrics>>,
}

impl CredentialElementCodec {
    /// Codec enforcing `limits` on both encode and decode
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            limits,
            metrics: None,
        }
    }

    /// Record encode/decode activity into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<CodecMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    fn record_error(&self, err: &CodecError) {
        if let Some(metrics) = &self.metrics {
            metrics.record_error(err);
        }
    }
}

impl Decoder for CredentialElementCodec {
    type Item = CredentialElement;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let frame_len = match peek_frame_len(src, &self.limits) {
            Ok(Some(len)) => len,
            Ok(None) => return Ok(None),
            Err(e) => {
                self.record_error(&e);
                return Err(e);
            }
        };

        let mut frame = src.split_to(frame_len).freeze();
        let element = CredentialElement::decode_with_limits(&mut frame, &self.limits)
            .inspect_err(|e| self.record_error(e))?;

        if let Some(metrics) = &self.metrics {
            metrics.element_decoded(frame_len as u64);
        }
        Ok(Some(element))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>> {
        match self.decode(buf)? {
            Some(element) => Ok(Some(element)),
            None if buf.is_empty() => Ok(None),
            None => {
                warn!(remaining = buf.len(), "Stream ended inside a credential element");
                // Re-reading the partial frame reports the field that ran short.
                let err = CredentialElement::decode_with_limits(&mut &buf[..], &self.limits)
                    .err()
                    .unwrap_or(CodecError::TruncatedInput {
                        needed: buf.len() + 1,
                        available: buf.len(),
                    });
                self.record_error(&err);
                Err(err)
            }
        }
    }
}

impl Encoder<CredentialElement> for CredentialElementCodec {
    type Error = CodecError;

    fn encode(&mut self, item: CredentialElement, dst: &mut BytesMut) -> Result<()> {
        <Self as Encoder<&CredentialElement>>::encode(self, &item, dst)
    }
}

impl Encoder<&CredentialElement> for CredentialElementCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &CredentialElement, dst: &mut BytesMut) -> Result<()> {
        item.check_limits(&self.limits).inspect_err(|e| self.record_error(e))?;

        let len = item.encoded_len();
        dst.reserve(len);
        item.encode_into(dst);

        if let Some(metrics) = &self.metrics {
            metrics.element_encoded(len as u64);
        }
        Ok(())
    }
}
