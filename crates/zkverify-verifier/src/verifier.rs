use std::path::PathBuf;
use std::sync::Arc;

use zkverify_core::ZkProof;
use zkverify_policy::{
    ExternalIdHash, SignalValidator, ValidationReport, Violation, VerifyOption, VerifyOptions,
};

use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::groth16::{Groth16Verifier, VerificationKey};

const EXTERNAL_ID_PATH: &str = "external_id";

/// Validates passport proofs against a base policy and checks them with a
/// Groth16 verifier.
///
/// The base policy and verification key never change after construction.
/// Per-call overrides are merged into a fresh policy, so one verifier can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Verifier {
    verification_key: VerificationKey,
    groth16: Arc<dyn Groth16Verifier>,
    opts: Arc<VerifyOptions>,
}

impl Verifier {
    pub fn builder() -> VerifierBuilder {
        VerifierBuilder::default()
    }

    /// Create a verifier from an already loaded key.
    pub fn new<I>(
        verification_key: VerificationKey,
        groth16: Arc<dyn Groth16Verifier>,
        options: I,
    ) -> Result<Self, VerifierError>
    where
        I: IntoIterator<Item = VerifyOption>,
    {
        let opts = VerifyOptions::from_options(options);
        if opts.root_verifier_ref().is_none() {
            return Err(VerifierError::Config("no root verifier provided".into()));
        }

        tracing::info!(
            key_len = verification_key.len(),
            min_age = ?opts.min_age(),
            event_bound = opts.bound_event_id().is_some(),
            address_bound = opts.bound_address().is_some(),
            "passport verifier initialized"
        );

        Ok(Self {
            verification_key,
            groth16,
            opts: Arc::new(opts),
        })
    }

    /// Base policy.
    pub fn options(&self) -> &VerifyOptions {
        &self.opts
    }

    pub fn verification_key(&self) -> &VerificationKey {
        &self.verification_key
    }

    /// A verifier whose base policy is this one's with `overrides` applied.
    /// Key and Groth16 verifier are shared; `self` is unchanged.
    pub fn with_options<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = VerifyOption>,
    {
        Self {
            verification_key: self.verification_key.clone(),
            groth16: Arc::clone(&self.groth16),
            opts: Arc::new(self.opts.merged(overrides)),
        }
    }

    /// Validate public signals under the base policy plus `overrides`, then
    /// run the pairing check. The pairing check is skipped when validation
    /// fails.
    pub fn verify_proof<I>(&self, proof: &ZkProof, overrides: I) -> Result<(), VerifierError>
    where
        I: IntoIterator<Item = VerifyOption>,
    {
        let opts = self.opts.merged(overrides);

        let report = SignalValidator::new(&opts).validate(proof)?;
        if !report.is_empty() {
            return Err(VerifierError::Signals(report));
        }

        self.groth16
            .verify_groth16(proof, self.verification_key.as_bytes())
            .map_err(|err| {
                tracing::warn!(error = %err, "groth16 verification failed");
                VerifierError::Proof(err)
            })?;

        tracing::info!("proof verified");
        Ok(())
    }

    /// Check that `external_id` (raw, unhashed) is the identifier the policy
    /// is bound to. Fails when no identifier is configured.
    pub fn verify_external_id(&self, external_id: &str) -> Result<(), VerifierError> {
        let outcome = match self.opts.external_id_hash() {
            None => Err(Violation::Blank),
            Some(expected) if *expected == ExternalIdHash::of(external_id) => Ok(()),
            Some(_) => Err(Violation::NotAllowed),
        };

        let mut report = ValidationReport::new();
        report.check(EXTERNAL_ID_PATH, outcome);
        if report.is_empty() {
            Ok(())
        } else {
            Err(VerifierError::ExternalId(report))
        }
    }
}

/// Builder for [`Verifier`]. The key can come from bytes or from a file;
/// explicit bytes take precedence.
#[derive(Debug, Default)]
pub struct VerifierBuilder {
    verification_key: Option<Vec<u8>>,
    verification_key_path: Option<PathBuf>,
    groth16: Option<Arc<dyn Groth16Verifier>>,
    options: Vec<VerifyOption>,
}

impl VerifierBuilder {
    pub fn verification_key(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.verification_key = Some(bytes.into());
        self
    }

    pub fn verification_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.verification_key_path = Some(path.into());
        self
    }

    pub fn groth16(mut self, verifier: Arc<dyn Groth16Verifier>) -> Self {
        self.groth16 = Some(verifier);
        self
    }

    pub fn option(mut self, option: VerifyOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn options<I: IntoIterator<Item = VerifyOption>>(mut self, options: I) -> Self {
        self.options.extend(options);
        self
    }

    /// Apply a loaded config: its policy is added to the options collected so
    /// far and its key path is used unless one was already given.
    pub fn config(mut self, config: &VerifierConfig) -> Result<Self, VerifierError> {
        self.options.extend(config.to_options()?);
        if self.verification_key_path.is_none() {
            self.verification_key_path = config.verification_key_path.clone();
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Verifier, VerifierError> {
        let verification_key = match (self.verification_key, self.verification_key_path) {
            (Some(bytes), _) => VerificationKey::from_bytes(bytes)?,
            (None, Some(path)) => VerificationKey::from_file(path)?,
            (None, None) => {
                return Err(VerifierError::Config("no verification key provided".into()))
            }
        };
        let groth16 = self
            .groth16
            .ok_or_else(|| VerifierError::Config("no groth16 verifier provided".into()))?;

        Verifier::new(verification_key, groth16, self.options)
    }
}
