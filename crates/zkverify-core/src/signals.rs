use std::fmt;

use crate::error::CoreError;

/// Number of public signals the passport circuit emits.
pub const PUB_SIGNALS_LEN: usize = 21;

/// Selector value identifying the disclosure configuration this engine
/// accepts.
pub const PROOF_SELECTOR_VALUE: &str = "39";

/// Named positions in the public signal vector. Indices not listed here are
/// reserved by the circuit and never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Signal {
    Nullifier,
    /// Packed ISO 3166 alpha-3 code.
    Citizenship,
    EventId,
    /// Packed bytes bound by the prover, usually an address.
    EventData,
    /// Identity state root, checked against the registry.
    IdStateHash,
    Selector,
    /// Unix timestamp (seconds) the identity creation time is proven to be at or below.
    TimestampUpperBound,
    IdentityCounterUpperBound,
    /// Packed `YYMMDD` date the holder's birth date is proven to be at or before.
    BirthDateUpperBound,
    /// Packed `YYMMDD` date the document expiry is proven to be at or after.
    ExpirationDateLowerBound,
}

impl Signal {
    pub const ALL: [Signal; 10] = [
        Signal::Nullifier,
        Signal::Citizenship,
        Signal::EventId,
        Signal::EventData,
        Signal::IdStateHash,
        Signal::Selector,
        Signal::TimestampUpperBound,
        Signal::IdentityCounterUpperBound,
        Signal::BirthDateUpperBound,
        Signal::ExpirationDateLowerBound,
    ];

    /// Position in the public signal vector.
    pub const fn index(self) -> usize {
        match self {
            Signal::Nullifier => 0,
            Signal::Citizenship => 6,
            Signal::EventId => 9,
            Signal::EventData => 10,
            Signal::IdStateHash => 11,
            Signal::Selector => 12,
            Signal::TimestampUpperBound => 14,
            Signal::IdentityCounterUpperBound => 16,
            Signal::BirthDateUpperBound => 18,
            Signal::ExpirationDateLowerBound => 19,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Signal::Nullifier => "nullifier",
            Signal::Citizenship => "citizenship",
            Signal::EventId => "event_id",
            Signal::EventData => "event_data",
            Signal::IdStateHash => "id_state_hash",
            Signal::Selector => "selector",
            Signal::TimestampUpperBound => "timestamp_upper_bound",
            Signal::IdentityCounterUpperBound => "identity_counter_upper_bound",
            Signal::BirthDateUpperBound => "birth_date",
            Signal::ExpirationDateLowerBound => "expiration_date",
        }
    }

    /// Field path used in validation reports, e.g. `pub_signals/citizenship`.
    pub fn path(self) -> String {
        format!("pub_signals/{}", self.name())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A public signal vector whose length has been checked against
/// [`PUB_SIGNALS_LEN`], so every [`Signal`] position is addressable.
#[derive(Debug, Clone, Copy)]
pub struct PubSignals<'a> {
    values: &'a [String],
}

impl<'a> PubSignals<'a> {
    pub fn new(values: &'a [String]) -> Result<Self, CoreError> {
        if values.len() != PUB_SIGNALS_LEN {
            return Err(CoreError::SignalCount {
                expected: PUB_SIGNALS_LEN,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Value at a named position.
    pub fn get(&self, signal: Signal) -> &'a str {
        &self.values[signal.index()]
    }

    pub fn as_slice(&self) -> &'a [String] {
        self.values
    }
}
