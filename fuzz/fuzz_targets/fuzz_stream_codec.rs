#![no_main]

use bytes::BytesMut;
use credential_element::CredentialElementCodec;
use libfuzzer_sys::fuzz_target;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut codec = CredentialElementCodec::default();
    let mut buf = BytesMut::from(data);
    // Each successful decode consumes input, so this terminates.
    while let Ok(Some(_)) = codec.decode(&mut buf) {}
    let _ = codec.decode_eof(&mut buf);
});
