use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::signals::PubSignals;

/// Groth16 proof points as emitted by snarkjs / rapidsnark. Opaque to the
/// policy engine; only the pairing check reads them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProofData {
    #[serde(rename = "pi_a")]
    pub a: Vec<String>,
    #[serde(rename = "pi_b")]
    pub b: Vec<Vec<String>>,
    #[serde(rename = "pi_c")]
    pub c: Vec<String>,
    pub protocol: String,
}

/// A zero-knowledge proof together with its public signals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZkProof {
    #[serde(default)]
    pub proof: Option<ProofData>,
    #[serde(default)]
    pub pub_signals: Vec<String>,
}

impl ZkProof {
    pub fn new(proof: ProofData, pub_signals: Vec<String>) -> Self {
        Self {
            proof: Some(proof),
            pub_signals,
        }
    }

    /// Length-checked view over the public signals.
    pub fn signals(&self) -> Result<PubSignals<'_>, CoreError> {
        PubSignals::new(&self.pub_signals)
    }
}
