#![no_main]

use credential_element::core::list::decode_list;
use credential_element::CredentialElement;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz element and list decoding - test for panics, over-reads, huge allocations
    let _ = CredentialElement::from_bytes(data);
    let _ = decode_list(&mut &data[..]);
});
