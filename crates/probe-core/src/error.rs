use std::path::PathBuf;

use thiserror::Error;

use crate::types::ProgramId;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not find {name} in {manifest}")]
    ProgramNotInManifest { name: String, manifest: String },

    #[error("invalid program id '{value}' for {name}: {reason}")]
    InvalidProgramId {
        name: String,
        value: String,
        reason: String,
    },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("ledger query '{operation}' failed")]
    Query {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("timed out waiting for \"{marker}\" from {program_id} after {attempts} attempts")]
    Timeout {
        program_id: ProgramId,
        marker: String,
        attempts: u32,
    },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ProbeError {
    /// Wrap a ledger backend failure.
    pub fn query(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ProbeError::Query {
            operation,
            source: source.into(),
        }
    }

    /// Configuration problems are fatal and never retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProbeError::ProgramNotInManifest { .. }
                | ProbeError::InvalidProgramId { .. }
                | ProbeError::ReadFile { .. }
                | ProbeError::InvalidConfig(_)
                | ProbeError::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
