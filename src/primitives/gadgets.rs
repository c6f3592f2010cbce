//! Protocol gadgets for the Fiat-Shamir zero-knowledge proof.
//!
//! This module contains the values exchanged or held during a session:
//! public parameters, the prover's secret, and the three per-round messages
//! (commitment, challenge, response) together with their wire encodings.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;

use super::arith::mod_square;
use crate::{Error, Result};

/// Public parameters of a proof session.
///
/// The prover claims knowledge of `x` such that `x^2 = public_value (mod modulus)`.
///
/// # Security
///
/// The soundness argument assumes `modulus` is prime and `public_value` is a
/// quadratic residue modulo it. Neither property is checked here: primality
/// testing and residuosity are the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    modulus: BigUint,
    public_value: BigUint,
}

impl Parameters {
    /// Creates parameters from a modulus and the public value to be proven.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if:
    /// - `modulus <= 2`
    /// - `public_value >= modulus`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiat_shamir_zkp::Parameters;
    /// use num_bigint::BigUint;
    ///
    /// let params = Parameters::new(BigUint::from(23u32), BigUint::from(2u32)).unwrap();
    /// assert_eq!(params.public_value(), &BigUint::from(2u32));
    /// ```
    pub fn new(modulus: BigUint, public_value: BigUint) -> Result<Self> {
        if modulus <= BigUint::from(2u32) {
            return Err(Error::InvalidParameters(format!(
                "modulus must be greater than 2, got {modulus}"
            )));
        }

        if public_value >= modulus {
            return Err(Error::InvalidParameters(
                "public value must be reduced below the modulus".to_string(),
            ));
        }

        Ok(Self {
            modulus,
            public_value,
        })
    }

    /// Derives parameters from a secret: `public_value = x^2 mod modulus`.
    pub fn from_secret(modulus: BigUint, secret: &Secret) -> Result<Self> {
        if modulus <= BigUint::from(2u32) {
            return Err(Error::InvalidParameters(format!(
                "modulus must be greater than 2, got {modulus}"
            )));
        }

        let public_value = mod_square(secret.value(), &modulus)?;
        Self::new(modulus, public_value)
    }

    /// Returns the public modulus `n`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns the public value `y`.
    pub fn public_value(&self) -> &BigUint {
        &self.public_value
    }
}

/// The prover's secret square root `x`.
///
/// # Security
///
/// - Never transmitted and never logged; `Debug` output is redacted
/// - Not `Clone`: a secret is moved into exactly one [`Prover`](crate::Prover)
pub struct Secret(BigUint);

impl Secret {
    /// Wraps a secret value.
    pub fn new(x: BigUint) -> Self {
        Self(x)
    }

    pub(crate) fn value(&self) -> &BigUint {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Prover's first message: `r^2 mod n` for a fresh round-local `r`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Commitment(BigUint);

/// Prover's third message: `r` or `r * x mod n`, depending on the challenge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Response(BigUint);

macro_rules! integer_message {
    ($name:ident, $label:literal) => {
        impl $name {
            /// Wraps an integer value.
            pub fn new(value: BigUint) -> Self {
                Self(value)
            }

            /// Returns the integer value.
            pub fn value(&self) -> &BigUint {
                &self.0
            }

            /// Encodes the value as unsigned big-endian bytes.
            pub fn to_bytes_be(&self) -> Vec<u8> {
                self.0.to_bytes_be()
            }

            /// Decodes a value from unsigned big-endian bytes.
            pub fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
                if bytes.is_empty() {
                    return Err(Error::MalformedMessage(
                        concat!("empty ", $label, " encoding").to_string(),
                    ));
                }
                Ok(Self(BigUint::from_bytes_be(bytes)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                BigUint::from_str(s.trim()).map(Self).map_err(|e| {
                    Error::MalformedMessage(format!(concat!("invalid decimal ", $label, ": {}"), e))
                })
            }
        }
    };
}

integer_message!(Commitment, "commitment");
integer_message!(Response, "response");

/// Verifier's second message: a single uniformly random bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Challenge {
    /// Prover must reveal `r`.
    Zero,
    /// Prover must reveal `r * x mod n`.
    One,
}

impl Challenge {
    /// Returns the challenge as a bit.
    pub fn bit(self) -> u8 {
        match self {
            Challenge::Zero => 0,
            Challenge::One => 1,
        }
    }

    /// Decodes a challenge from its single-byte wire form.
    pub fn from_bit(bit: u8) -> Result<Self> {
        match bit {
            0 => Ok(Challenge::Zero),
            1 => Ok(Challenge::One),
            other => Err(Error::MalformedMessage(format!(
                "challenge must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl From<bool> for Challenge {
    fn from(bit: bool) -> Self {
        if bit {
            Challenge::One
        } else {
            Challenge::Zero
        }
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}
