use num_traits::Zero;
use tracing::warn;

use super::{Challenge, Commitment, Parameters, Response};
use crate::primitives::arith::{mod_mul, mod_square};
use crate::{Error, RandomSource, Result};

/// Observable state of a [`Verifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifierState {
    /// No round in flight.
    Idle,
    /// A challenge was issued; awaiting the prover's response.
    AwaitingResponse,
}

/// Verifier for the Fiat-Shamir protocol.
///
/// State machine: `Idle --receive_commitment--> AwaitingResponse --check_response--> Idle`.
/// Any other call order fails with [`Error::ProtocolSequence`].
///
/// A prover that does not know a square root of `y` can answer at most one of
/// the two challenges for a given commitment, so each round catches it with
/// probability 1/2.
pub struct Verifier {
    params: Parameters,
    pending: Option<PendingRound>,
}

struct PendingRound {
    commitment: Commitment,
    challenge: Challenge,
}

impl Verifier {
    /// Creates an idle verifier for the given parameters.
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            pending: None,
        }
    }

    /// Returns the public parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Returns the current state.
    pub fn state(&self) -> VerifierState {
        match self.pending {
            Some(_) => VerifierState::AwaitingResponse,
            None => VerifierState::Idle,
        }
    }

    /// Interactive protocol: records the commitment and issues a random challenge.
    ///
    /// If the randomness source fails the verifier stays idle.
    pub fn receive_commitment<S: RandomSource + ?Sized>(
        &mut self,
        commitment: Commitment,
        rng: &mut S,
    ) -> Result<Challenge> {
        if self.pending.is_some() {
            warn!("commitment received while a response is outstanding");
            return Err(Error::ProtocolSequence(
                "a challenge is already outstanding for the current round".to_string(),
            ));
        }

        let challenge = Challenge::from(rng.random_bit()?);
        self.pending = Some(PendingRound {
            commitment,
            challenge,
        });

        Ok(challenge)
    }

    /// Interactive protocol: checks the response and returns the round result.
    ///
    /// Checks `s^2 = c (mod n)` for challenge 0 and `s^2 = c * y (mod n)` for
    /// challenge 1. The pending commitment is discarded whatever the outcome,
    /// including when `challenge` does not match the one just issued.
    pub fn check_response(&mut self, response: &Response, challenge: Challenge) -> Result<bool> {
        let pending = self.pending.take().ok_or_else(|| {
            warn!("check_response called with no challenge outstanding");
            Error::ProtocolSequence("no challenge has been issued for this round".to_string())
        })?;

        if pending.challenge != challenge {
            warn!("check_response called with a stale challenge");
            return Err(Error::ProtocolSequence(format!(
                "challenge {} does not match the issued challenge {}",
                challenge, pending.challenge
            )));
        }

        round_holds(&self.params, &pending.commitment, challenge, response)
    }
}

/// Evaluates the verification equation for one round.
///
/// A zero or unreduced commitment and an unreduced response never hold: a
/// zero commitment would let a prover answer both challenges with `0`.
pub(crate) fn round_holds(
    params: &Parameters,
    commitment: &Commitment,
    challenge: Challenge,
    response: &Response,
) -> Result<bool> {
    let modulus = params.modulus();
    let c = commitment.value();
    let s = response.value();

    if c.is_zero() || c >= modulus || s >= modulus {
        return Ok(false);
    }

    let left = mod_square(s, modulus)?;
    let right = match challenge {
        Challenge::Zero => c.clone(),
        Challenge::One => mod_mul(c, params.public_value(), modulus)?,
    };

    Ok(left == right)
}
