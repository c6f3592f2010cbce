use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{FailurePolicy, ProofOptions};

/// Session settings for callers of the protocol engine.
///
/// The library core never reads configuration itself; callers load this and
/// pass the derived [`ProofOptions`] and timeout in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Desired soundness in bits (one round per bit).
    pub security_bits: u32,
    /// Record a transcript of every round.
    pub record_transcript: bool,
    /// Behaviour after a failing round. Defaults to running every round when
    /// a transcript is recorded and stopping early otherwise.
    pub failure_policy: Option<FailurePolicy>,
    /// Per-session timeout in milliseconds.
    pub randomness_timeout_ms: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            security_bits: 40,
            record_transcript: false,
            failure_policy: None,
            randomness_timeout_ms: 5_000,
        }
    }
}

impl ProtocolConfig {
    /// Loads configuration from TOML file and environment variables.
    ///
    /// Configuration priority: environment variables (`ZKP_*`) > `config/protocol.toml` > defaults.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        Self::from_file("config/protocol.toml")
    }

    /// Loads configuration from the given TOML file and environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &str) -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Toml};
        use figment::Figment;

        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("ZKP_"))
            .extract()
    }

    /// Orchestration options derived from this configuration.
    pub fn proof_options(&self) -> ProofOptions {
        let base = if self.record_transcript {
            ProofOptions::with_transcript()
        } else {
            ProofOptions::default()
        };

        match self.failure_policy {
            Some(policy) => base.failure_policy(policy),
            None => base,
        }
    }

    /// Per-session timeout.
    pub fn randomness_timeout(&self) -> Duration {
        Duration::from_millis(self.randomness_timeout_ms)
    }
}
