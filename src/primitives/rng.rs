//! Cryptographically secure randomness for the protocol.
//!
//! [`RandomSource`] is the provider contract the prover and verifier draw from.
//! Every `rand_core` generator that is `RngCore + CryptoRng` implements it, so
//! callers can pass [`SecureRng`], `OsRng` or a seeded `StdRng` directly.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, OsRng, RngCore};
use zeroize::Zeroizing;

use crate::{Error, Result};

/// Upper bound on rejection-sampling draws for one value.
///
/// Each draw is accepted with probability at least 1/2.
pub(crate) const MAX_SAMPLING_ATTEMPTS: usize = 128;

/// Source of uniformly random integers.
pub trait RandomSource {
    /// Returns an integer drawn uniformly from `[0, bound)`.
    ///
    /// Fails with [`Error::RandomnessUnavailable`] rather than returning biased
    /// or zero output when the underlying entropy source fails.
    fn random_below(&mut self, bound: &BigUint) -> Result<BigUint>;

    /// Returns a uniformly random bit.
    fn random_bit(&mut self) -> Result<bool> {
        Ok(self.random_below(&BigUint::from(2u32))?.is_one())
    }
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn random_below(&mut self, bound: &BigUint) -> Result<BigUint> {
        if bound.is_zero() {
            return Err(Error::InvalidParameters(
                "random bound must be positive".to_string(),
            ));
        }

        let bits = bound.bits();
        let byte_len = bits.div_ceil(8) as usize;
        let excess_bits = (byte_len as u64 * 8 - bits) as u32;
        let mut buf = Zeroizing::new(vec![0u8; byte_len]);

        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            self.try_fill_bytes(&mut buf)
                .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
            buf[0] &= 0xFFu8 >> excess_bits;

            let candidate = BigUint::from_bytes_be(&buf);
            if &candidate < bound {
                return Ok(candidate);
            }
        }

        Err(Error::RandomnessUnavailable(
            "rejection sampling exhausted its attempts".to_string(),
        ))
    }
}

/// Cryptographically secure random number generator.
///
/// Thin wrapper around `OsRng`; the default randomness handle for a session.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new generator backed by the operating system.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}
