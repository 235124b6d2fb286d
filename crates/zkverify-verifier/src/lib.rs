//! zkverify Verifier — facade combining public signal policy validation with
//! the Groth16 pairing check.
//!
//! ```ignore
//! let verifier = Verifier::builder()
//!     .verification_key_file("passport.vkey.json")
//!     .groth16(groth16)
//!     .option(with_root_verifier(roots))
//!     .option(with_age_above(18))
//!     .build()?;
//!
//! verifier.verify_proof(&proof, [with_event_id(event_id)])?;
//! ```

pub mod config;
pub mod error;
pub mod groth16;
pub mod verifier;

pub use config::{PolicyConfig, VerifierConfig};
pub use error::VerifierError;
pub use groth16::{Groth16Error, Groth16Verifier, VerificationKey};
pub use verifier::{Verifier, VerifierBuilder};

pub use zkverify_core::{ProofData, ZkProof};
pub use zkverify_policy::{
    with_address, with_age_above, with_citizenships, with_event_id, with_external_id,
    with_max_identity_count, with_max_identity_creation_time, with_root_verifier,
    IdentityCountLimit, KnownRoots, RootError, RootVerifier, ValidationReport, Violation,
    VerifyOption, VerifyOptions,
};
