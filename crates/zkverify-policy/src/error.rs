use crate::report::ValidationReport;
use crate::root::RootError;

/// Errors that stop signal validation before a field report can be produced.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// The proof container or signal vector has the wrong shape.
    #[error("failed to validate arguments: {0}")]
    Shape(ValidationReport),

    /// The root registry could not be consulted. Says nothing about the proof.
    #[error("identity state root unavailable: {0}")]
    RootUnavailable(#[source] RootError),

    #[error("root verifier is not configured")]
    MissingRootVerifier,
}

impl ValidateError {
    /// Whether the failure came from infrastructure rather than the proof.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::RootUnavailable(_))
    }
}
