/// Multi-round orchestration and the caller-facing entry points.
pub mod orchestrator;
/// Prover state machine.
pub mod prover;
/// Audit transcript of a protocol run.
pub mod transcript;
/// Verifier state machine.
pub mod verifier;

pub use crate::primitives::{Challenge, Commitment, Parameters, Response, Secret};
pub use orchestrator::{
    prove_knowledge, rounds_for_security, run_protocol, FailurePolicy, ProofOptions, ProofOutcome,
    RoundOrchestrator, Verdict,
};
pub use prover::{Prover, ProverRole, ProverState};
pub use transcript::{ProofTranscript, TranscriptEntry};
pub use verifier::{Verifier, VerifierState};
