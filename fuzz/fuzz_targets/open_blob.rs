#![no_main]
use libfuzzer_sys::fuzz_target;
use sealshare::aead;

fuzz_target!(|data: &[u8]| {
    let _plaintext = aead::decrypt(data, None);
});
