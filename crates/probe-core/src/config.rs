use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ProbeError, Result};
use crate::types::Commitment;

/// Upper bound accepted by `getSignaturesForAddress`.
pub const MAX_SIGNATURE_LIMIT: usize = 1000;

// ---------------------------------------------------------------------------
// PollConfig
// ---------------------------------------------------------------------------

/// Everything the poller needs to know about one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub marker: String,
    pub max_attempts: u32,
    pub interval: Duration,
    /// Handles requested per attempt.
    pub signature_limit: usize,
    pub commitment: Commitment,
    /// Treat ledger query failures as a non-match instead of aborting.
    pub retry_query_errors: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            max_attempts: default_max_attempts(),
            interval: Duration::from_millis(default_interval_ms()),
            signature_limit: default_signature_limit(),
            commitment: Commitment::default(),
            retry_query_errors: false,
        }
    }
}

// ---------------------------------------------------------------------------
// ProbeConfig
// ---------------------------------------------------------------------------

/// On-disk probe configuration (YAML). Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_signature_limit")]
    pub signature_limit: usize,
    #[serde(default)]
    pub commitment: Commitment,
    #[serde(default)]
    pub retry_query_errors: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_program() -> String {
    "ci_proof_core".to_string()
}

fn default_rpc_url() -> String {
    "http://localhost:8899".to_string()
}

fn default_marker() -> String {
    "Program log: Hello, world!".to_string()
}

fn default_max_attempts() -> u32 {
    60
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_signature_limit() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            manifest: None,
            rpc_url: default_rpc_url(),
            marker: default_marker(),
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
            signature_limit: default_signature_limit(),
            commitment: Commitment::default(),
            retry_query_errors: false,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| ProbeError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping.
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: ProbeConfig = serde_yaml::from_str(data)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(ProbeError::InvalidConfig("program name is empty".into()));
        }
        if self.marker.is_empty() {
            return Err(ProbeError::InvalidConfig("marker is empty".into()));
        }
        if self.max_attempts == 0 {
            return Err(ProbeError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        if !(1..=MAX_SIGNATURE_LIMIT).contains(&self.signature_limit) {
            return Err(ProbeError::InvalidConfig(format!(
                "signature_limit must be between 1 and {MAX_SIGNATURE_LIMIT}, got {}",
                self.signature_limit
            )));
        }
        Ok(())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            marker: self.marker.clone(),
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.interval_ms),
            signature_limit: self.signature_limit,
            commitment: self.commitment,
            retry_query_errors: self.retry_query_errors,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_ci_probe() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.program, "ci_proof_core");
        assert_eq!(cfg.rpc_url, "http://localhost:8899");
        assert_eq!(cfg.marker, "Program log: Hello, world!");
        assert_eq!(cfg.max_attempts, 60);
        assert_eq!(cfg.interval_ms, 1000);
        assert_eq!(cfg.signature_limit, 5);
        assert_eq!(cfg.commitment, Commitment::Confirmed);
        assert!(!cfg.retry_query_errors);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg = ProbeConfig::from_yaml("max_attempts: 3\ncommitment: finalized\n").unwrap();
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.commitment, Commitment::Finalized);
        assert_eq!(cfg.interval_ms, 1000);
        assert_eq!(cfg.program, "ci_proof_core");
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(ProbeConfig::from_yaml("\n").unwrap(), ProbeConfig::default());
    }

    #[test]
    fn unknown_commitment_is_rejected() {
        let err = ProbeConfig::from_yaml("commitment: eventually\n").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("probe.yaml");
        std::fs::write(&path, "program: token_vault\ninterval_ms: 250\n").unwrap();
        let cfg = ProbeConfig::load(&path).unwrap();
        assert_eq!(cfg.program, "token_vault");
        assert_eq!(cfg.poll_config().interval, Duration::from_millis(250));
    }

    #[test]
    fn load_missing_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = ProbeConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let cfg = ProbeConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ProbeError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_signature_limit_out_of_range() {
        for limit in [0, MAX_SIGNATURE_LIMIT + 1] {
            let cfg = ProbeConfig {
                signature_limit: limit,
                ..Default::default()
            };
            assert!(cfg.validate().is_err(), "limit {limit}");
        }
    }

    #[test]
    fn validate_rejects_empty_marker() {
        let cfg = ProbeConfig {
            marker: String::new(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn poll_config_carries_fields() {
        let cfg = ProbeConfig {
            retry_query_errors: true,
            signature_limit: 10,
            ..Default::default()
        };
        let poll = cfg.poll_config();
        assert_eq!(poll.signature_limit, 10);
        assert!(poll.retry_query_errors);
        assert_eq!(poll.max_attempts, 60);
        assert_eq!(
            poll,
            PollConfig {
                signature_limit: 10,
                retry_query_errors: true,
                ..PollConfig::default()
            }
        );
    }
}
