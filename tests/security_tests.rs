mod common;

use std::collections::HashSet;

use common::{init_tracing, m127, n, small_params, CheatingProver, RecordingSource};
use fiat_shamir_zkp::{
    Challenge, Commitment, Error, Parameters, ProofOptions, Prover, ProverState, Response,
    RoundOrchestrator, Secret, SecureRng, Verdict, Verifier, VerifierState,
};

#[test]
fn cheating_prover_is_caught_at_twenty_rounds() {
    init_tracing();
    let params = small_params();
    let orchestrator = RoundOrchestrator::new(ProofOptions::default());
    let mut rng = SecureRng::new();

    let accepted = (0..10_000)
        .filter(|_| {
            let mut cheater = CheatingProver::new(&params);
            orchestrator
                .run_with(&params, &mut cheater, 20, &mut rng)
                .unwrap()
                .is_accepted()
        })
        .count();

    // Expected 10_000 * 2^-20 < 0.01 acceptances.
    assert!(accepted <= 2, "cheating prover accepted {accepted} times");
}

#[test]
fn cheating_prover_passes_single_round_half_the_time() {
    let params = small_params();
    let orchestrator = RoundOrchestrator::new(ProofOptions::default());
    let mut rng = SecureRng::new();

    let accepted = (0..10_000)
        .filter(|_| {
            let mut cheater = CheatingProver::new(&params);
            orchestrator
                .run_with(&params, &mut cheater, 1, &mut rng)
                .unwrap()
                .is_accepted()
        })
        .count();

    assert!(
        (4_500..=5_500).contains(&accepted),
        "expected about 5000 single-round acceptances, got {accepted}"
    );
}

#[test]
fn cheating_prover_fails_every_challenge_one_round() {
    let params = small_params();
    let orchestrator = RoundOrchestrator::new(ProofOptions::with_transcript());
    let mut rng = SecureRng::new();
    let mut cheater = CheatingProver::new(&params);

    let outcome = orchestrator.run_with(&params, &mut cheater, 64, &mut rng).unwrap();
    assert_eq!(outcome.verdict(), Verdict::Reject);
    assert_eq!(outcome.rounds_executed(), 64);

    for entry in outcome.transcript().unwrap().entries() {
        let mut verifier = Verifier::new(params.clone());
        let mut script = common::ScriptedSource::new(&[entry.challenge().bit() as u32]);
        let challenge = verifier
            .receive_commitment(entry.commitment().clone(), &mut script)
            .unwrap();
        let holds = verifier.check_response(entry.response(), challenge).unwrap();
        assert_eq!(holds, challenge == Challenge::Zero);
    }
}

#[test]
fn round_nonces_never_repeat() {
    let params = Parameters::from_secret(m127(), &Secret::new(n(987_654_321))).unwrap();
    let mut rng = RecordingSource::new(SecureRng::new(), &params);
    let orchestrator = RoundOrchestrator::new(ProofOptions::with_transcript());

    let outcome = orchestrator
        .run(&params, Secret::new(n(987_654_321)), 10_000, &mut rng)
        .unwrap();
    assert!(outcome.is_accepted());
    assert_eq!(rng.nonces.len(), 10_000);

    let distinct_nonces: HashSet<_> = rng.nonces.iter().collect();
    assert_eq!(distinct_nonces.len(), 10_000);

    // r and n - r give the same commitment; no commitment may repeat either.
    let distinct_commitments: HashSet<_> = outcome
        .transcript()
        .unwrap()
        .entries()
        .iter()
        .map(|entry| entry.commitment().clone())
        .collect();
    assert_eq!(distinct_commitments.len(), 10_000);

    let modulus = params.modulus();
    for pair in rng.nonces.windows(2) {
        assert_ne!(&pair[0] + &pair[1], modulus.clone());
        assert_ne!((&pair[0] * 2u32) % modulus, pair[1]);
    }
}

#[test]
fn prover_state_machine_is_enforced() {
    let mut rng = SecureRng::new();

    // Idle: respond is illegal for both challenges.
    for challenge in [Challenge::Zero, Challenge::One] {
        let mut prover = Prover::new(small_params(), Secret::new(n(5)));
        assert!(matches!(
            prover.respond(challenge),
            Err(Error::ProtocolSequence(_))
        ));
        assert_eq!(prover.state(), ProverState::Idle);
    }

    // Committed: begin_round is illegal, respond is legal once.
    for challenge in [Challenge::Zero, Challenge::One] {
        let mut prover = Prover::new(small_params(), Secret::new(n(5)));
        prover.begin_round(&mut rng).unwrap();
        assert!(matches!(
            prover.begin_round(&mut rng),
            Err(Error::ProtocolSequence(_))
        ));
        assert_eq!(prover.state(), ProverState::Committed);

        prover.respond(challenge).unwrap();
        assert_eq!(prover.state(), ProverState::Idle);
        for again in [Challenge::Zero, Challenge::One] {
            assert!(matches!(
                prover.respond(again),
                Err(Error::ProtocolSequence(_))
            ));
        }
    }
}

#[test]
fn verifier_state_machine_is_enforced() {
    let mut rng = SecureRng::new();
    let commitment = Commitment::new(n(3));

    // Idle: check_response is illegal for both challenges.
    for challenge in [Challenge::Zero, Challenge::One] {
        let mut verifier = Verifier::new(small_params());
        assert!(matches!(
            verifier.check_response(&Response::new(n(7)), challenge),
            Err(Error::ProtocolSequence(_))
        ));
        assert_eq!(verifier.state(), VerifierState::Idle);
    }

    // AwaitingResponse: a second commitment is illegal; a stale challenge
    // fails and burns the round; the issued challenge is accepted once.
    for use_issued in [true, false] {
        let mut verifier = Verifier::new(small_params());
        let issued = verifier
            .receive_commitment(commitment.clone(), &mut rng)
            .unwrap();
        assert!(matches!(
            verifier.receive_commitment(commitment.clone(), &mut rng),
            Err(Error::ProtocolSequence(_))
        ));

        let stale = match issued {
            Challenge::Zero => Challenge::One,
            Challenge::One => Challenge::Zero,
        };
        let presented = if use_issued { issued } else { stale };
        let result = verifier.check_response(&Response::new(n(7)), presented);
        if use_issued {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(Error::ProtocolSequence(_))));
        }

        assert_eq!(verifier.state(), VerifierState::Idle);
        assert!(matches!(
            verifier.check_response(&Response::new(n(7)), issued),
            Err(Error::ProtocolSequence(_))
        ));
    }
}

#[test]
fn randomness_failure_aborts_session() {
    let params = small_params();
    let orchestrator = RoundOrchestrator::new(ProofOptions::default());
    // enough script for one full round, then exhaustion
    let mut rng = common::ScriptedSource::new(&[6, 1]);

    let result = orchestrator.run(&params, Secret::new(n(5)), 2, &mut rng);
    assert!(matches!(result, Err(Error::RandomnessUnavailable(_))));
}
