#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use sealshare::{recover_secret, Options};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub authenticated: bool,
    pub records: Vec<String>,
}

fuzz_target!(|params: Parameters| {
    let options = Options {
        authenticated: params.authenticated,
        associated_data: None,
    };
    let _secret = recover_secret(&params.records, &options);
});
