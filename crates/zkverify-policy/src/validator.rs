use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigUint;

use zkverify_core::{PubSignals, Signal, ZkProof, PROOF_SELECTOR_VALUE, PUB_SIGNALS_LEN};

use crate::error::ValidateError;
use crate::options::VerifyOptions;
use crate::report::{ValidationReport, Violation};
use crate::root::RootError;
use crate::rules;

const PROOF_PATH: &str = "zk_proof/proof";
const PUB_SIGNALS_PATH: &str = "zk_proof/pub_signals";

/// Validate `proof` against `options` using the current UTC time.
pub fn validate(proof: &ZkProof, options: &VerifyOptions) -> Result<ValidationReport, ValidateError> {
    SignalValidator::new(options).validate(proof)
}

/// Runs every applicable rule over a proof's public signals.
///
/// Field failures never stop sibling checks; they are collected into the
/// returned [`ValidationReport`]. Shape problems, then a missing root
/// verifier, then root registry outages end validation early, as
/// [`ValidateError`]s.
pub struct SignalValidator<'a> {
    options: &'a VerifyOptions,
}

impl<'a> SignalValidator<'a> {
    pub fn new(options: &'a VerifyOptions) -> Self {
        Self { options }
    }

    pub fn validate(&self, proof: &ZkProof) -> Result<ValidationReport, ValidateError> {
        self.validate_at(proof, Utc::now())
    }

    /// Validate as of `now`. Date rules compare whole UTC days.
    pub fn validate_at(
        &self,
        proof: &ZkProof,
        now: DateTime<Utc>,
    ) -> Result<ValidationReport, ValidateError> {
        let signals = self.check_shape(proof)?;
        let root_verifier = self
            .options
            .root_verifier_ref()
            .ok_or(ValidateError::MissingRootVerifier)?;
        let today = now.date_naive();

        let mut report = ValidationReport::new();

        match root_verifier.verify_root(signals.get(Signal::IdStateHash)) {
            Ok(()) => {}
            Err(RootError::Invalid(reason)) => {
                report.insert(Signal::IdStateHash.path(), Violation::Rejected(reason));
            }
            Err(err @ RootError::Unavailable(_)) => {
                tracing::warn!(error = %err, "root verifier unavailable");
                return Err(ValidateError::RootUnavailable(err));
            }
        }

        self.check_required(&signals, today, &mut report);
        self.check_configured(&signals, today, &mut report);
        self.check_identity_bounds(&signals, &mut report);

        for (field, reason) in report.iter() {
            tracing::debug!(field, %reason, "public signal check failed");
        }

        Ok(report)
    }

    fn check_shape<'p>(&self, proof: &'p ZkProof) -> Result<PubSignals<'p>, ValidateError> {
        let mut report = ValidationReport::new();

        if proof.proof.is_none() {
            report.insert(PROOF_PATH, Violation::Blank);
        }

        let signals = match proof.signals() {
            Ok(signals) => Some(signals),
            Err(_) if proof.pub_signals.is_empty() => {
                report.insert(PUB_SIGNALS_PATH, Violation::Blank);
                None
            }
            Err(_) => {
                report.insert(PUB_SIGNALS_PATH, Violation::Length(PUB_SIGNALS_LEN));
                None
            }
        };

        let signals = match signals {
            Some(signals) if report.is_empty() => signals,
            _ => return Err(ValidateError::Shape(report)),
        };

        // Identity bounds are compared numerically; a configured bound over a
        // non-integer signal cannot be evaluated at all.
        if self.options.identity_count_limit().is_some() {
            let signal = Signal::IdentityCounterUpperBound;
            report.check(signal.path(), rules::integer(signals.get(signal)));
        }
        if self.options.identity_creation_time_limit().is_some() {
            let signal = Signal::TimestampUpperBound;
            report.check(signal.path(), rules::integer(signals.get(signal)));
        }
        if !report.is_empty() {
            return Err(ValidateError::Shape(report));
        }

        Ok(signals)
    }

    fn check_required(&self, signals: &PubSignals<'_>, today: NaiveDate, report: &mut ValidationReport) {
        report.check(
            Signal::Nullifier.path(),
            rules::required(signals.get(Signal::Nullifier)),
        );
        report.check(
            Signal::Selector.path(),
            rules::equals(signals.get(Signal::Selector), PROOF_SELECTOR_VALUE),
        );
        report.check(
            Signal::ExpirationDateLowerBound.path(),
            rules::date_after(signals.get(Signal::ExpirationDateLowerBound), today),
        );
    }

    fn check_configured(&self, signals: &PubSignals<'_>, today: NaiveDate, report: &mut ValidationReport) {
        if let Some(event_id) = self.options.bound_event_id() {
            report.check(
                Signal::EventId.path(),
                rules::equals(signals.get(Signal::EventId), event_id),
            );
        }

        if let Some(latest) = self.options.latest_birth_date(today) {
            report.check(
                Signal::BirthDateUpperBound.path(),
                rules::date_on_or_before(signals.get(Signal::BirthDateUpperBound), latest, today),
            );
        }

        if let Some(allowed) = self.options.allowed_citizenships() {
            report.check(
                Signal::Citizenship.path(),
                rules::packed_one_of(signals.get(Signal::Citizenship), allowed),
            );
        }

        if let Some(address) = self.options.bound_address() {
            report.check(
                Signal::EventData.path(),
                rules::packed_equals(signals.get(Signal::EventData), address),
            );
        }
    }

    /// The identity counter and creation timestamp bounds substitute for each
    /// other. A leg whose limit is unset or unbounded counts as satisfied, so
    /// the pair fails only when both limits are configured and both are
    /// exceeded. Both fields are reported then.
    fn check_identity_bounds(&self, signals: &PubSignals<'_>, report: &mut ValidationReport) {
        let count = Signal::IdentityCounterUpperBound;
        let count_outcome = match self.options.identity_count_limit() {
            Some(limit) => rules::at_most(signals.get(count), &BigUint::from(limit)),
            None => Ok(()),
        };

        let timestamp = Signal::TimestampUpperBound;
        let timestamp_outcome = match self.options.identity_creation_time_limit() {
            Some(time) => match u64::try_from(time.timestamp()) {
                Ok(limit) => rules::at_most(signals.get(timestamp), &BigUint::from(limit)),
                // No unsigned timestamp can precede the epoch.
                Err(_) => Err(Violation::AboveLimit(time.timestamp().to_string())),
            },
            None => Ok(()),
        };

        if count_outcome.is_ok() || timestamp_outcome.is_ok() {
            return;
        }

        report.check(count.path(), count_outcome);
        report.check(timestamp.path(), timestamp_outcome);
    }
}
