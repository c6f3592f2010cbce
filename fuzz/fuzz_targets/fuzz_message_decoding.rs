#![no_main]

use fiat_shamir_zkp::{Challenge, Commitment, Response};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = Commitment::from_bytes_be(data);
    if let Some(bit) = data.first() {
        let _ = Challenge::from_bit(*bit);
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<Response>();
    }
});
