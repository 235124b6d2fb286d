//! Verifier configuration loaded from TOML.
//!
//! ```toml
//! verification_key_path = "circuits/passport.vkey.json"
//!
//! [policy]
//! age_above = 18
//! citizenships = ["UKR", "POL"]
//! address_hex = "ae2acb25aca3d022a40c95b02a8241d9455875bb"
//! max_identity_count = 1
//! max_identity_creation_time = "2024-01-01T00:00:00Z"
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use zkverify_policy::{
    with_address, with_age_above, with_citizenships, with_event_id, with_external_id,
    with_max_identity_count, with_max_identity_creation_time, IdentityCountLimit, VerifyOption,
};

use crate::error::VerifierError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VerifierConfig {
    /// Path to the circuit verification key.
    #[serde(default)]
    pub verification_key_path: Option<PathBuf>,

    /// Base verification policy.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Policy fields; every one is optional and absent means "not checked".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyConfig {
    /// Raw external identifier; hashed before use.
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub age_above: Option<u32>,
    /// ISO 3166 alpha-3 codes.
    #[serde(default)]
    pub citizenships: Option<Vec<String>>,
    /// Bound address as hex, with or without `0x`.
    #[serde(default)]
    pub address_hex: Option<String>,
    /// Decimal event identifier.
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub max_identity_count: Option<u64>,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub max_identity_creation_time: Option<DateTime<Utc>>,
}

impl VerifierConfig {
    /// Load config from a TOML file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, VerifierError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| VerifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, VerifierError> {
        Ok(toml::from_str(contents)?)
    }

    /// Policy as verify options, in field order.
    pub fn to_options(&self) -> Result<Vec<VerifyOption>, VerifierError> {
        let policy = &self.policy;
        let mut options = Vec::new();

        if let Some(id) = &policy.external_id {
            options.push(with_external_id(id));
        }
        if let Some(years) = policy.age_above {
            options.push(with_age_above(years));
        }
        if let Some(codes) = &policy.citizenships {
            options.push(with_citizenships(codes.iter().cloned()));
        }
        if let Some(address) = &policy.address_hex {
            let digits = address.strip_prefix("0x").unwrap_or(address);
            let bytes = hex::decode(digits)
                .map_err(|e| VerifierError::Config(format!("invalid address_hex: {}", e)))?;
            options.push(with_address(bytes));
        }
        if let Some(event_id) = &policy.event_id {
            options.push(with_event_id(event_id.clone()));
        }
        if let Some(count) = policy.max_identity_count {
            options.push(with_max_identity_count(IdentityCountLimit::AtMost(count)));
        }
        if let Some(time) = policy.max_identity_creation_time {
            options.push(with_max_identity_creation_time(time));
        }

        Ok(options)
    }
}
