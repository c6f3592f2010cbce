#![no_main]

use fiat_shamir_zkp::{Parameters, ProofTranscript};
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

fuzz_target!(|data: &[u8]| {
    if let Ok(transcript) = ProofTranscript::from_bytes(data) {
        let params = Parameters::new(BigUint::from(23u32), BigUint::from(2u32))
            .unwrap_or_else(|_| unreachable!("fixed parameters are valid"));
        let _ = transcript.replay(&params);
        let reencoded = transcript
            .to_bytes()
            .and_then(|bytes| ProofTranscript::from_bytes(&bytes));
        assert_eq!(reencoded.ok(), Some(transcript));
    }
});
