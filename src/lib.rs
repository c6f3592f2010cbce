//! Interactive Fiat-Shamir zero-knowledge proof of knowledge of a modular square root.
//!
//! A prover convinces a verifier that it knows `x` with `x^2 = y (mod n)` for
//! public `n` and `y`, without revealing `x`. Each round runs
//! commit, challenge, respond, verify; `k` rounds bound the soundness error
//! by `2^-k`.
//!
//! # Quick start
//!
//! ```rust
//! use fiat_shamir_zkp::{run_protocol, Parameters, ProofOptions, Secret, SecureRng, Verdict};
//! use num_bigint::BigUint;
//!
//! let secret = Secret::new(BigUint::from(5u32));
//! let params = Parameters::from_secret(BigUint::from(23u32), &secret).unwrap();
//! let mut rng = SecureRng::new();
//!
//! let outcome = run_protocol(&params, secret, 40, ProofOptions::default(), &mut rng).unwrap();
//! assert_eq!(outcome.verdict(), Verdict::Accept);
//! ```
//!
//! Callers that carry the messages between separate processes drive
//! [`Prover`] and [`Verifier`] directly and encode the integers with
//! [`Commitment::to_bytes_be`] / [`Response::to_bytes_be`] (or their decimal
//! `Display`/`FromStr` forms) and the challenge with [`Challenge::bit`].

#![warn(missing_docs)]

/// Layered configuration for callers.
pub mod config;
/// Error types.
pub mod error;
/// Arithmetic, randomness, and protocol values.
pub mod primitives;
/// Prover, verifier, transcript, and round orchestration.
pub mod protocol;
/// Async session driver with timeouts and parallel sessions.
pub mod session;

pub use config::ProtocolConfig;
pub use error::{Error, Result};
pub use primitives::{Challenge, Commitment, Parameters, RandomSource, Response, Secret, SecureRng};
pub use protocol::{
    prove_knowledge, rounds_for_security, run_protocol, FailurePolicy, ProofOptions, ProofOutcome,
    ProofTranscript, Prover, ProverRole, ProverState, RoundOrchestrator, TranscriptEntry, Verdict,
    Verifier, VerifierState,
};
pub use session::{run_session, run_sessions, SessionRequest};
