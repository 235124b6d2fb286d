//! zkverify Policy — validation of passport proof public signals against a
//! caller-configured policy.
//!
//! - Verify options: composable, field-wise overridable configuration
//! - Comparison rules: layout-independent predicates over signal values
//! - Signal validator: runs every applicable rule and collects a per-field report
//! - Root verification capability for the identity state root

pub mod error;
pub mod options;
pub mod report;
pub mod root;
pub mod rules;
pub mod validator;

pub use error::ValidateError;
pub use options::{
    with_address, with_age_above, with_citizenships, with_event_id, with_external_id,
    with_max_identity_count, with_max_identity_creation_time, with_root_verifier, ExternalIdHash,
    IdentityCountLimit, Setting, VerifyOption, VerifyOptions,
};
pub use report::{ValidationReport, Violation};
pub use root::{KnownRoots, RootError, RootVerifier};
pub use validator::{validate, SignalValidator};
