//! Common test utilities shared across integration tests.
#![allow(dead_code)]

use fiat_shamir_zkp::{Challenge, Commitment, Parameters, ProverRole, RandomSource, Response, Result};
use num_bigint::BigUint;

/// Mersenne prime 2^127 - 1.
pub const M127: &str = "170141183460469231731687303715884105727";

/// Initialize test tracing (call once at the beginning of tests).
///
/// Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("fiat_shamir_zkp=info");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

pub fn n(v: u32) -> BigUint {
    BigUint::from(v)
}

pub fn m127() -> BigUint {
    BigUint::parse_bytes(M127.as_bytes(), 10).unwrap()
}

/// The regression parameters: n = 23, y = 2 (= 5^2 mod 23).
pub fn small_params() -> Parameters {
    Parameters::new(n(23), n(2)).unwrap()
}

/// Replays a fixed script of values from `random_below`, then fails.
pub struct ScriptedSource {
    values: Vec<BigUint>,
}

impl ScriptedSource {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.iter().rev().map(|v| n(*v)).collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn random_below(&mut self, bound: &BigUint) -> Result<BigUint> {
        let value = self.values.pop().ok_or_else(|| {
            fiat_shamir_zkp::Error::RandomnessUnavailable("script exhausted".to_string())
        })?;
        assert!(&value < bound, "scripted value out of range");
        Ok(value)
    }
}

/// Records every value drawn with the prover's bound (`n - 1`).
pub struct RecordingSource<S> {
    inner: S,
    nonce_bound: BigUint,
    pub nonces: Vec<BigUint>,
}

impl<S> RecordingSource<S> {
    pub fn new(inner: S, params: &Parameters) -> Self {
        Self {
            inner,
            nonce_bound: params.modulus() - 1u32,
            nonces: Vec::new(),
        }
    }
}

impl<S: RandomSource> RandomSource for RecordingSource<S> {
    fn random_below(&mut self, bound: &BigUint) -> Result<BigUint> {
        let value = self.inner.random_below(bound)?;
        if bound == &self.nonce_bound {
            // the prover uses r = value + 1
            self.nonces.push(&value + 1u32);
        }
        Ok(value)
    }
}

/// A prover without the secret that commits honestly to `r^2` and always
/// answers `r`, independent of the challenge.
pub struct CheatingProver {
    modulus: BigUint,
    nonce: Option<BigUint>,
}

impl CheatingProver {
    pub fn new(params: &Parameters) -> Self {
        Self {
            modulus: params.modulus().clone(),
            nonce: None,
        }
    }
}

impl ProverRole for CheatingProver {
    fn begin_round<S: RandomSource + ?Sized>(&mut self, rng: &mut S) -> Result<Commitment> {
        let r = rng.random_below(&(&self.modulus - 1u32))? + 1u32;
        let commitment = r.modpow(&n(2), &self.modulus);
        self.nonce = Some(r);
        Ok(Commitment::new(commitment))
    }

    fn respond(&mut self, _challenge: Challenge) -> Result<Response> {
        let r = self.nonce.take().ok_or_else(|| {
            fiat_shamir_zkp::Error::ProtocolSequence("no round in flight".to_string())
        })?;
        Ok(Response::new(r))
    }
}
