//! Core building blocks for the Fiat-Shamir protocol.
//!
//! - **arith**: modular arithmetic over arbitrary-precision integers
//! - **rng**: the randomness provider and secure generator
//! - **gadgets**: parameters, secret, and per-round protocol messages

/// Modular arithmetic primitives.
pub mod arith;
/// Protocol gadgets (parameters, secret, commitment, challenge, response).
pub mod gadgets;
/// Cryptographically secure random number generation.
pub mod rng;

pub use gadgets::{Challenge, Commitment, Parameters, Response, Secret};
pub use rng::{RandomSource, SecureRng};
