#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use sealshare::{recover_secret, split_secret, Options};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub threshold: u8,
    pub total: u8,
    pub authenticated: bool,
    pub secret: Vec<u8>,
}

fuzz_target!(|params: Parameters| {
    let options = Options {
        authenticated: params.authenticated,
        associated_data: None,
    };
    if let Ok(records) = split_secret(&params.secret, params.threshold, params.total, &options) {
        let needed = params.threshold as usize;
        let secret = recover_secret(&records[..needed], &options).unwrap();
        assert_eq!(secret, params.secret);
    }
});
