//! Async driver for independent proof sessions.
//!
//! A session is sequential and CPU-bound, so it runs on the tokio blocking
//! pool with its own [`SecureRng`] handle. Independent sessions share no
//! mutable state and run in parallel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use num_bigint::BigUint;
use tokio::task::JoinError;
use tracing::{instrument, warn};

use crate::{
    run_protocol, Error, Parameters, ProofOptions, ProofOutcome, RandomSource, Result, Secret,
    SecureRng,
};

/// Inputs of one independent proof session.
#[derive(Debug)]
pub struct SessionRequest {
    /// Public parameters.
    pub params: Parameters,
    /// The prover's secret.
    pub secret: Secret,
    /// Desired soundness in bits (one round per bit).
    pub security_bits: u32,
}

/// Runs one session off the async runtime, bounded by `timeout`.
///
/// The randomness source is the only step that can block; a session that
/// does not finish in time fails with [`Error::RandomnessUnavailable`].
///
/// Once the timeout expires, or the returned future is dropped, the session
/// is cancelled: its next draw from the randomness source fails, so the
/// blocking-pool thread is released within one round. A cancelled session
/// is never resumed and its result is dropped.
#[instrument(skip(request), fields(security_bits = request.security_bits))]
pub async fn run_session(
    request: SessionRequest,
    options: ProofOptions,
    timeout: Duration,
) -> Result<ProofOutcome> {
    let SessionRequest {
        params,
        secret,
        security_bits,
    } = request;

    let cancel = CancelOnDrop(Arc::new(AtomicBool::new(false)));
    let mut rng = CancellableSource {
        inner: SecureRng::new(),
        cancelled: Arc::clone(&cancel.0),
    };

    let task = tokio::task::spawn_blocking(move || {
        run_protocol(&params, secret, security_bits, options, &mut rng)
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined.unwrap_or_else(|e| Err(join_failure(e))),
        Err(_) => {
            warn!(?timeout, "session timed out");
            Err(Error::RandomnessUnavailable(format!(
                "session did not complete within {timeout:?}"
            )))
        }
    }
}

/// Runs independent sessions in parallel.
///
/// Results are returned in request order; one failing session does not
/// affect the others.
pub async fn run_sessions(
    requests: Vec<SessionRequest>,
    options: ProofOptions,
    timeout: Duration,
) -> Vec<Result<ProofOutcome>> {
    let handles = requests
        .into_iter()
        .map(|request| tokio::spawn(run_session(request, options, timeout)))
        .collect::<Vec<_>>();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap_or_else(|e| Err(join_failure(e))));
    }
    results
}

/// Sets the shared flag when the owning session future completes or is dropped.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Randomness source that stops yielding once its session is cancelled.
struct CancellableSource<S> {
    inner: S,
    cancelled: Arc<AtomicBool>,
}

impl<S: RandomSource> RandomSource for CancellableSource<S> {
    fn random_below(&mut self, bound: &BigUint) -> Result<BigUint> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(Error::RandomnessUnavailable(
                "session was cancelled".to_string(),
            ));
        }
        self.inner.random_below(bound)
    }
}

fn join_failure(error: JoinError) -> Error {
    if error.is_panic() {
        std::panic::resume_unwind(error.into_panic());
    }
    Error::RandomnessUnavailable("session task was cancelled".to_string())
}
