//! Modular arithmetic over arbitrary-precision integers.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::{Error, Result};

/// Computes `base^exp mod modulus` by square-and-multiply.
///
/// # Security Note
///
/// `BigUint::modpow` is not constant-time. The exponents used by the protocol
/// are public (always 2), so only the base's bit length can leak through timing.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidParameters(
            "modulus cannot be zero".to_string(),
        ));
    }

    Ok(base.modpow(exp, modulus))
}

/// Computes `base^2 mod modulus`.
pub fn mod_square(base: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    mod_pow(base, &BigUint::from(2u32), modulus)
}

/// Computes `(a * b) mod modulus`.
pub fn mod_mul(a: &BigUint, b: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidParameters(
            "modulus cannot be zero".to_string(),
        ));
    }

    Ok((a * b) % modulus)
}
