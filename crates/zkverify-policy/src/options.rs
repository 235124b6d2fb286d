//! Verification policy options.
//!
//! A [`VerifyOptions`] value is built by folding [`VerifyOption`]s over a
//! base. Each option touches exactly one field and later options win for that
//! field. Merging always produces a new value; nothing is updated in place
//! behind a shared reference.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::root::RootVerifier;

/// A policy field that may be left unset. Unset is distinct from every valid
/// value, including zero and the empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    Unset,
    Set(T),
}

impl<T> Default for Setting<T> {
    fn default() -> Self {
        Setting::Unset
    }
}

impl<T> Setting<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Setting::Set(value) => Some(value),
            Setting::Unset => None,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Setting::Set(_))
    }

    /// `other` if it is set, otherwise `self`.
    pub fn overridden_by(self, other: Setting<T>) -> Setting<T> {
        match other {
            Setting::Set(_) => other,
            Setting::Unset => self,
        }
    }
}

impl<T> From<Option<T>> for Setting<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Setting::Unset, Setting::Set)
    }
}

/// Upper limit on the number of identities a holder may have registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityCountLimit {
    /// No restriction.
    Unbounded,
    AtMost(u64),
}

impl IdentityCountLimit {
    pub fn limit(self) -> Option<u64> {
        match self {
            IdentityCountLimit::Unbounded => None,
            IdentityCountLimit::AtMost(n) => Some(n),
        }
    }
}

/// Hex-encoded SHA-256 digest of an external identifier. The raw identifier
/// is never retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalIdHash(String);

impl ExternalIdHash {
    pub fn of(identifier: &str) -> Self {
        Self(hex::encode(Sha256::digest(identifier.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalIdHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single-field update to [`VerifyOptions`].
#[derive(Debug, Clone)]
pub enum VerifyOption {
    ExternalId(ExternalIdHash),
    AgeAbove(u32),
    Citizenships(BTreeSet<String>),
    Address(Vec<u8>),
    EventId(String),
    MaxIdentityCount(IdentityCountLimit),
    MaxIdentityCreationTime(DateTime<Utc>),
    RootVerifier(Arc<dyn RootVerifier>),
}

/// Bind proofs to an external identifier (email, account address, ...).
/// Only the SHA-256 digest is kept.
pub fn with_external_id(identifier: impl AsRef<str>) -> VerifyOption {
    VerifyOption::ExternalId(ExternalIdHash::of(identifier.as_ref()))
}

/// Require the holder to be at least `years` old on the day of verification.
pub fn with_age_above(years: u32) -> VerifyOption {
    VerifyOption::AgeAbove(years)
}

/// Accept only the listed ISO 3166 alpha-3 citizenships (e.g. `"UKR"`).
pub fn with_citizenships<I, S>(codes: I) -> VerifyOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    VerifyOption::Citizenships(codes.into_iter().map(Into::into).collect())
}

/// Require the proof to be bound to `address`, given as raw bytes already
/// decoded from its text form (bech32 data part, hex, ...).
pub fn with_address(address: impl Into<Vec<u8>>) -> VerifyOption {
    VerifyOption::Address(address.into())
}

/// Require the proof to be generated for the event with this decimal id.
pub fn with_event_id(event_id: impl Into<String>) -> VerifyOption {
    VerifyOption::EventId(event_id.into())
}

pub fn with_max_identity_count(limit: IdentityCountLimit) -> VerifyOption {
    VerifyOption::MaxIdentityCount(limit)
}

pub fn with_max_identity_creation_time(time: DateTime<Utc>) -> VerifyOption {
    VerifyOption::MaxIdentityCreationTime(time)
}

pub fn with_root_verifier(verifier: Arc<dyn RootVerifier>) -> VerifyOption {
    VerifyOption::RootVerifier(verifier)
}

/// Policy applied to a proof's public signals.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    external_id: Setting<ExternalIdHash>,
    age_above: Setting<u32>,
    citizenships: Setting<BTreeSet<String>>,
    address: Setting<Vec<u8>>,
    event_id: Setting<String>,
    max_identity_count: Setting<IdentityCountLimit>,
    max_identity_creation_time: Setting<DateTime<Utc>>,
    root_verifier: Setting<Arc<dyn RootVerifier>>,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold options over an empty policy.
    pub fn from_options<I: IntoIterator<Item = VerifyOption>>(options: I) -> Self {
        Self::default().with_options(options)
    }

    /// Apply one option, replacing only the field it names.
    pub fn apply(mut self, option: VerifyOption) -> Self {
        match option {
            VerifyOption::ExternalId(hash) => self.external_id = Setting::Set(hash),
            VerifyOption::AgeAbove(years) => self.age_above = Setting::Set(years),
            VerifyOption::Citizenships(codes) => self.citizenships = Setting::Set(codes),
            VerifyOption::Address(bytes) => self.address = Setting::Set(bytes),
            VerifyOption::EventId(id) => self.event_id = Setting::Set(id),
            VerifyOption::MaxIdentityCount(limit) => self.max_identity_count = Setting::Set(limit),
            VerifyOption::MaxIdentityCreationTime(time) => {
                self.max_identity_creation_time = Setting::Set(time)
            }
            VerifyOption::RootVerifier(verifier) => self.root_verifier = Setting::Set(verifier),
        }
        self
    }

    /// Apply options in order.
    pub fn with_options<I: IntoIterator<Item = VerifyOption>>(self, options: I) -> Self {
        options.into_iter().fold(self, Self::apply)
    }

    /// A copy of this policy with `options` applied on top. `self` is untouched.
    pub fn merged<I: IntoIterator<Item = VerifyOption>>(&self, options: I) -> Self {
        self.clone().with_options(options)
    }

    /// Field-wise merge: every field set in `other` replaces the one in `self`.
    pub fn merge(self, other: VerifyOptions) -> Self {
        Self {
            external_id: self.external_id.overridden_by(other.external_id),
            age_above: self.age_above.overridden_by(other.age_above),
            citizenships: self.citizenships.overridden_by(other.citizenships),
            address: self.address.overridden_by(other.address),
            event_id: self.event_id.overridden_by(other.event_id),
            max_identity_count: self.max_identity_count.overridden_by(other.max_identity_count),
            max_identity_creation_time: self
                .max_identity_creation_time
                .overridden_by(other.max_identity_creation_time),
            root_verifier: self.root_verifier.overridden_by(other.root_verifier),
        }
    }

    pub fn external_id(self, identifier: impl AsRef<str>) -> Self {
        self.apply(with_external_id(identifier))
    }

    pub fn age_above(self, years: u32) -> Self {
        self.apply(with_age_above(years))
    }

    pub fn citizenships<I, S>(self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(with_citizenships(codes))
    }

    pub fn address(self, address: impl Into<Vec<u8>>) -> Self {
        self.apply(with_address(address))
    }

    pub fn event_id(self, event_id: impl Into<String>) -> Self {
        self.apply(with_event_id(event_id))
    }

    pub fn max_identity_count(self, limit: IdentityCountLimit) -> Self {
        self.apply(with_max_identity_count(limit))
    }

    pub fn max_identity_creation_time(self, time: DateTime<Utc>) -> Self {
        self.apply(with_max_identity_creation_time(time))
    }

    pub fn root_verifier(self, verifier: Arc<dyn RootVerifier>) -> Self {
        self.apply(with_root_verifier(verifier))
    }

    pub fn external_id_hash(&self) -> Option<&ExternalIdHash> {
        self.external_id.get()
    }

    pub fn min_age(&self) -> Option<u32> {
        self.age_above.get().copied()
    }

    pub fn allowed_citizenships(&self) -> Option<&BTreeSet<String>> {
        self.citizenships.get()
    }

    pub fn bound_address(&self) -> Option<&[u8]> {
        self.address.get().map(Vec::as_slice)
    }

    pub fn bound_event_id(&self) -> Option<&str> {
        self.event_id.get().map(String::as_str)
    }

    /// Configured identity count limit; `None` when unset or unbounded.
    pub fn identity_count_limit(&self) -> Option<u64> {
        self.max_identity_count.get().and_then(|limit| limit.limit())
    }

    pub fn identity_creation_time_limit(&self) -> Option<DateTime<Utc>> {
        self.max_identity_creation_time.get().copied()
    }

    pub fn root_verifier_ref(&self) -> Option<&Arc<dyn RootVerifier>> {
        self.root_verifier.get()
    }

    /// Latest birth date that satisfies the age requirement on `today`.
    /// Resolved per call so a long-lived policy stays correct over time.
    pub fn latest_birth_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        let years = self.min_age()?;
        Some(
            today
                .checked_sub_months(Months::new(years.saturating_mul(12)))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}
