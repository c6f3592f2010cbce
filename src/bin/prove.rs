use std::process::ExitCode;

use clap::Parser;
use fiat_shamir_zkp::{
    run_session, FailurePolicy, Parameters, ProtocolConfig, Secret, SessionRequest, Verdict,
};
use num_bigint::BigUint;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "prove")]
#[command(about = "Run an interactive Fiat-Shamir proof of knowledge of a square root", long_about = None)]
#[command(version)]
struct Args {
    /// Public modulus n (decimal)
    #[arg(short, long, env = "ZKP_MODULUS")]
    modulus: BigUint,

    /// Prover's secret x (decimal)
    #[arg(short, long, env = "ZKP_SECRET", hide_env_values = true)]
    secret: BigUint,

    /// Public value y (decimal); derived as x^2 mod n when omitted
    #[arg(short, long, env = "ZKP_PUBLIC_VALUE")]
    public_value: Option<BigUint>,

    /// Soundness in bits; overrides the configured value
    #[arg(short = 'k', long)]
    security_bits: Option<u32>,

    /// Record and print the hex-encoded transcript
    #[arg(long)]
    transcript: bool,

    /// Execute every round even after a failure
    #[arg(long)]
    run_all: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ProtocolConfig::from_env().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        info!("Using default configuration");
        ProtocolConfig::default()
    });

    if let Some(bits) = args.security_bits {
        config.security_bits = bits;
    }
    if args.transcript {
        config.record_transcript = true;
    }
    if args.run_all {
        config.failure_policy = Some(FailurePolicy::RunAllRounds);
    }

    let secret = Secret::new(args.secret);
    let params = match args.public_value {
        Some(public_value) => Parameters::new(args.modulus, public_value),
        None => Parameters::from_secret(args.modulus, &secret),
    };
    let params = match params {
        Ok(params) => params,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    println!("Modulus:      {}", params.modulus());
    println!("Public value: {}", params.public_value());

    let request = SessionRequest {
        params,
        secret,
        security_bits: config.security_bits,
    };

    let outcome = match run_session(request, config.proof_options(), config.randomness_timeout()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Session aborted: {e}");
            return ExitCode::from(2);
        }
    };

    println!("Rounds:       {}", outcome.rounds_executed());
    println!("Soundness:    2^-{}", outcome.rounds_executed());
    if let Some(transcript) = outcome.transcript() {
        match transcript.to_bytes() {
            Ok(bytes) => println!("Transcript:   {}", hex::encode(bytes)),
            Err(e) => error!("Transcript not encoded: {e}"),
        }
    }

    match outcome.verdict() {
        Verdict::Accept => {
            println!("Verdict:      ACCEPT");
            ExitCode::SUCCESS
        }
        Verdict::Reject => {
            println!("Verdict:      REJECT");
            ExitCode::FAILURE
        }
    }
}
