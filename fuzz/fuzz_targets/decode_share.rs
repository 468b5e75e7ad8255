#![no_main]
use libfuzzer_sys::fuzz_target;
use sealshare::codec;

fuzz_target!(|text: &str| {
    if let Ok(share) = codec::decode(text) {
        assert!(!share.is_empty());
        let record = codec::encode_share(&share).unwrap();
        assert_eq!(codec::decode(&record).unwrap(), share);
    }
});
