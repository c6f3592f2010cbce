//! Multi-round driver for the interactive protocol.
//!
//! Each round halves a cheating prover's chance of success, so running
//! `k` rounds bounds the soundness error by `2^-k`.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::prover::ProverRole;
use super::{Parameters, ProofTranscript, Prover, Secret, TranscriptEntry, Verifier};
use crate::{Error, RandomSource, Result, SecureRng};

/// Final decision of a protocol run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every executed round held.
    Accept,
    /// At least one round failed.
    Reject,
}

/// What to do after the first failing round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing round.
    ShortCircuit,
    /// Execute every round even after a failure.
    RunAllRounds,
}

/// Caller-configurable orchestration options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofOptions {
    /// Record a [`ProofTranscript`] of every executed round.
    pub record_transcript: bool,
    /// Behaviour after a failing round.
    pub failure_policy: FailurePolicy,
}

impl ProofOptions {
    /// Options that record a transcript and run every round.
    pub fn with_transcript() -> Self {
        Self {
            record_transcript: true,
            failure_policy: FailurePolicy::RunAllRounds,
        }
    }

    /// Overrides the failure policy.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

impl Default for ProofOptions {
    fn default() -> Self {
        Self {
            record_transcript: false,
            failure_policy: FailurePolicy::ShortCircuit,
        }
    }
}

/// Result of a protocol run.
#[derive(Clone, Debug)]
pub struct ProofOutcome {
    verdict: Verdict,
    rounds_executed: u32,
    transcript: Option<ProofTranscript>,
}

impl ProofOutcome {
    /// Returns the verdict.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns `true` if the verdict is [`Verdict::Accept`].
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accept
    }

    /// Returns the number of rounds actually executed.
    pub fn rounds_executed(&self) -> u32 {
        self.rounds_executed
    }

    /// Returns the transcript, if recording was enabled.
    pub fn transcript(&self) -> Option<&ProofTranscript> {
        self.transcript.as_ref()
    }

    /// Consumes the outcome and returns the transcript.
    pub fn into_transcript(self) -> Option<ProofTranscript> {
        self.transcript
    }

    /// Upper bound on the probability that a prover without the secret would
    /// have been accepted: `2^-rounds_executed`.
    pub fn soundness_error(&self) -> f64 {
        0.5f64.powi(self.rounds_executed.min(i32::MAX as u32) as i32)
    }
}

/// Number of rounds needed for `security_bits` bits of soundness.
///
/// Each round contributes exactly one bit.
pub fn rounds_for_security(security_bits: u32) -> Result<u32> {
    if security_bits == 0 {
        return Err(Error::InvalidParameters(
            "security bits must be at least 1".to_string(),
        ));
    }

    Ok(security_bits)
}

/// Drives prover and verifier through repeated rounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundOrchestrator {
    options: ProofOptions,
}

impl RoundOrchestrator {
    /// Creates an orchestrator with the given options.
    pub fn new(options: ProofOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &ProofOptions {
        &self.options
    }

    /// Runs a full session for an honest prover holding `secret`.
    pub fn run<S: RandomSource + ?Sized>(
        &self,
        params: &Parameters,
        secret: Secret,
        security_bits: u32,
        rng: &mut S,
    ) -> Result<ProofOutcome> {
        let mut prover = Prover::new(params.clone(), secret);
        self.run_with(params, &mut prover, security_bits, rng)
    }

    /// Runs a full session against any [`ProverRole`].
    ///
    /// A fresh verifier is created for the session. Any error aborts the
    /// session; partial sessions are never resumed.
    pub fn run_with<P, S>(
        &self,
        params: &Parameters,
        prover: &mut P,
        security_bits: u32,
        rng: &mut S,
    ) -> Result<ProofOutcome>
    where
        P: ProverRole + ?Sized,
        S: RandomSource + ?Sized,
    {
        let rounds = rounds_for_security(security_bits)?;
        let mut verifier = Verifier::new(params.clone());
        let mut transcript = self.options.record_transcript.then(ProofTranscript::new);
        let mut verdict = Verdict::Accept;
        let mut rounds_executed = 0;

        for round in 1..=rounds {
            let commitment = prover.begin_round(rng)?;
            let challenge = verifier.receive_commitment(commitment.clone(), rng)?;
            let response = prover.respond(challenge)?;
            let holds = verifier.check_response(&response, challenge)?;
            rounds_executed = round;

            debug!(round, challenge = challenge.bit(), holds, "round complete");

            if let Some(transcript) = transcript.as_mut() {
                transcript.append(TranscriptEntry::new(commitment, challenge, response));
            }

            if !holds {
                verdict = Verdict::Reject;
                if self.options.failure_policy == FailurePolicy::ShortCircuit {
                    break;
                }
            }
        }

        match verdict {
            Verdict::Accept => info!(rounds = rounds_executed, "proof accepted"),
            Verdict::Reject => warn!(rounds = rounds_executed, "proof rejected"),
        }

        Ok(ProofOutcome {
            verdict,
            rounds_executed,
            transcript,
        })
    }
}

/// Runs the protocol for validated parameters with the given options.
pub fn run_protocol<S: RandomSource + ?Sized>(
    params: &Parameters,
    secret: Secret,
    security_bits: u32,
    options: ProofOptions,
    rng: &mut S,
) -> Result<ProofOutcome> {
    RoundOrchestrator::new(options).run(params, secret, security_bits, rng)
}

/// Proves knowledge of `secret` with `secret^2 = public_value (mod modulus)`.
///
/// Validates the parameters, draws from [`SecureRng`] and uses default options.
///
/// # Examples
///
/// ```rust
/// use fiat_shamir_zkp::prove_knowledge;
/// use num_bigint::BigUint;
///
/// let outcome = prove_knowledge(
///     BigUint::from(23u32),
///     BigUint::from(2u32),
///     BigUint::from(5u32),
///     40,
/// )
/// .unwrap();
/// assert!(outcome.is_accepted());
/// assert_eq!(outcome.rounds_executed(), 40);
/// ```
pub fn prove_knowledge(
    modulus: BigUint,
    public_value: BigUint,
    secret: BigUint,
    security_bits: u32,
) -> Result<ProofOutcome> {
    let params = Parameters::new(modulus, public_value)?;
    let mut rng = SecureRng::new();
    run_protocol(
        &params,
        Secret::new(secret),
        security_bits,
        ProofOptions::default(),
        &mut rng,
    )
}
