use std::path::PathBuf;

use zkverify_policy::{RootError, ValidateError, ValidationReport};

use crate::groth16::Groth16Error;

/// Verifier facade errors.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    /// Proof container or signal vector has the wrong shape.
    #[error("failed to validate proof: failed to validate arguments: {0}")]
    Arguments(ValidationReport),

    /// One or more public signals violate the policy.
    #[error("failed to validate proof: {0}")]
    Signals(ValidationReport),

    /// The root registry could not be consulted.
    #[error("failed to validate proof: identity state root unavailable: {0}")]
    RootUnavailable(#[source] RootError),

    /// The pairing check rejected the proof.
    #[error("failed to verify proof: {0}")]
    Proof(#[source] Groth16Error),

    #[error("{0}")]
    ExternalId(ValidationReport),

    #[error("invalid verifier configuration: {0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VerifierError {
    /// Failure of a collaborator or the environment rather than of the proof.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::RootUnavailable(_) | Self::Io { .. })
    }

    /// Failure attributable to specific fields.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Arguments(_) | Self::Signals(_) | Self::ExternalId(_)
        )
    }

    /// Per-field report, when there is one.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Arguments(report) | Self::Signals(report) | Self::ExternalId(report) => {
                Some(report)
            }
            _ => None,
        }
    }
}

impl From<ValidateError> for VerifierError {
    fn from(err: ValidateError) -> Self {
        match err {
            ValidateError::Shape(report) => Self::Arguments(report),
            ValidateError::RootUnavailable(source) => Self::RootUnavailable(source),
            ValidateError::MissingRootVerifier => {
                Self::Config("root verifier is not configured".into())
            }
        }
    }
}
