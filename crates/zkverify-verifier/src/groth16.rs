use std::fmt;
use std::path::Path;
use std::sync::Arc;

use zkverify_core::ZkProof;

use crate::error::VerifierError;

/// The pairing check rejected a proof.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct Groth16Error {
    pub reason: String,
}

impl Groth16Error {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Groth16 pairing check over a proof and the raw verification key bytes.
/// Called only once the public signals have passed policy validation.
pub trait Groth16Verifier: Send + Sync + fmt::Debug {
    fn verify_groth16(&self, proof: &ZkProof, verification_key: &[u8]) -> Result<(), Groth16Error>;
}

/// Verification key content, shared between verifiers derived from one another.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationKey(Arc<[u8]>);

impl VerificationKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, VerifierError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(VerifierError::Config("verification key is empty".into()));
        }
        Ok(Self(bytes.into()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VerifierError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| VerifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationKey")
            .field("len", &self.0.len())
            .finish()
    }
}
