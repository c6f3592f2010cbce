use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::warn;

use super::{Challenge, Commitment, Parameters, Response, Secret};
use crate::primitives::arith::{mod_mul, mod_square};
use crate::primitives::rng::MAX_SAMPLING_ATTEMPTS;
use crate::{Error, RandomSource, Result};

/// The prover side of a round, as driven by the
/// [`RoundOrchestrator`](crate::RoundOrchestrator).
///
/// Implemented by the honest [`Prover`]; tests and simulations can implement it
/// for provers that do not know the secret.
pub trait ProverRole {
    /// Produces the commitment that opens a new round.
    fn begin_round<S: RandomSource + ?Sized>(&mut self, rng: &mut S) -> Result<Commitment>;

    /// Answers the verifier's challenge for the round in flight.
    fn respond(&mut self, challenge: Challenge) -> Result<Response>;
}

/// Observable state of a [`Prover`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProverState {
    /// No round in flight.
    Idle,
    /// A commitment was sent; awaiting the challenge.
    Committed,
}

/// Prover for the Fiat-Shamir protocol.
///
/// Proves knowledge of `x` such that `x^2 = y (mod n)` without revealing `x`.
///
/// State machine: `Idle --begin_round--> Committed --respond--> Idle`.
/// Any other call order fails with [`Error::ProtocolSequence`].
///
/// # Security
///
/// - The round-local `r` is dropped as soon as the challenge is answered and
///   can never be used for a second response
/// - A sequence error leaves the session unusable; start a fresh prover
pub struct Prover {
    params: Parameters,
    secret: Secret,
    round: Option<PendingRound>,
}

struct PendingRound {
    nonce: Nonce,
    commitment: Commitment,
}

/// Round-local random value `r`. Deliberately neither `Clone` nor `Debug`.
struct Nonce(BigUint);

impl Prover {
    /// Creates an idle prover bound to the given parameters and secret.
    ///
    /// The caller guarantees `x^2 mod n == y`; a wrong secret is only
    /// detected by the verifier.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiat_shamir_zkp::{Parameters, Prover, Secret};
    /// use num_bigint::BigUint;
    ///
    /// let params = Parameters::new(BigUint::from(23u32), BigUint::from(2u32)).unwrap();
    /// let prover = Prover::new(params, Secret::new(BigUint::from(5u32)));
    /// ```
    pub fn new(params: Parameters, secret: Secret) -> Self {
        Self {
            params,
            secret,
            round: None,
        }
    }

    /// Returns the public parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Returns the current state.
    pub fn state(&self) -> ProverState {
        match self.round {
            Some(_) => ProverState::Committed,
            None => ProverState::Idle,
        }
    }

    /// Returns the commitment of the round in flight, if any.
    pub fn pending_commitment(&self) -> Option<&Commitment> {
        self.round.as_ref().map(|round| &round.commitment)
    }

    /// Starts a round: draws `r` from `[1, n)` and commits to `r^2 mod n`.
    ///
    /// `r` is redrawn while `r^2 mod n == 0`, which can only happen for a
    /// composite modulus. A source that keeps yielding such values fails
    /// with [`Error::RandomnessUnavailable`] after a bounded number of draws.
    pub fn begin_round<S: RandomSource + ?Sized>(&mut self, rng: &mut S) -> Result<Commitment> {
        if self.round.is_some() {
            warn!("begin_round called while a commitment is outstanding");
            return Err(Error::ProtocolSequence(
                "a round is already in flight; its challenge must be answered first".to_string(),
            ));
        }

        let modulus = self.params.modulus();
        let range = modulus - BigUint::one();

        let mut drawn = None;
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let r = rng.random_below(&range)? + BigUint::one();
            let commitment = mod_square(&r, modulus)?;
            if !commitment.is_zero() {
                drawn = Some((r, commitment));
                break;
            }
        }

        let (r, commitment) = drawn.ok_or_else(|| {
            warn!("every drawn nonce squared to zero");
            Error::RandomnessUnavailable("no nonce with a nonzero commitment was drawn".to_string())
        })?;

        let commitment = Commitment::new(commitment);
        self.round = Some(PendingRound {
            nonce: Nonce(r),
            commitment: commitment.clone(),
        });

        Ok(commitment)
    }

    /// Answers the challenge for the round in flight and returns to idle.
    ///
    /// Computes `r` for [`Challenge::Zero`] and `r * x mod n` for [`Challenge::One`].
    pub fn respond(&mut self, challenge: Challenge) -> Result<Response> {
        let PendingRound { nonce, .. } = self.round.take().ok_or_else(|| {
            warn!("respond called with no round in flight");
            Error::ProtocolSequence(
                "response requested before a commitment was made".to_string(),
            )
        })?;

        let value = match challenge {
            Challenge::Zero => nonce.0,
            Challenge::One => mod_mul(&nonce.0, self.secret.value(), self.params.modulus())?,
        };

        Ok(Response::new(value))
    }
}

impl ProverRole for Prover {
    fn begin_round<S: RandomSource + ?Sized>(&mut self, rng: &mut S) -> Result<Commitment> {
        Prover::begin_round(self, rng)
    }

    fn respond(&mut self, challenge: Challenge) -> Result<Response> {
        Prover::respond(self, challenge)
    }
}
