#![no_main]
use libfuzzer_sys::fuzz_target;
use sealshare::{codec, Share};

fuzz_target!(|share: Share| {
    let _record = codec::encode_share(&share);
});
