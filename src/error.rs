//! Error types for the Fiat-Shamir protocol engine.
//!
//! A rejected proof is not an error: it is reported as a
//! [`Verdict`](crate::Verdict) inside a [`ProofOutcome`](crate::ProofOutcome).

/// Main error types for the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed modulus, public value, or session setting. The session cannot start.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The randomness source failed or timed out. Fatal to the current round.
    #[error("Randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// An operation was invoked out of the state machine's allowed order.
    #[error("Protocol sequence error: {0}")]
    ProtocolSequence(String),

    /// A wire-encoded protocol message or transcript could not be decoded.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),
}

/// Result type alias for library operations.
pub type Result<T> = core::result::Result<T, Error>;
