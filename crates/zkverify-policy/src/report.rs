use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Why a single field failed. The rendered text is relied upon by downstream
/// consumers that match on error strings, so it must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("cannot be blank")]
    Blank,

    #[error("must be a valid value")]
    NotAllowed,

    /// Value outside an allow-list; carries the list rendered as `A, B`.
    #[error("must be one of {0}")]
    NotOneOf(String),

    #[error("date is too late")]
    DateTooLate,

    #[error("date is too early")]
    DateTooEarly,

    #[error("must be a valid date")]
    InvalidDate,

    #[error("must be a valid integer")]
    InvalidInteger,

    #[error("must be no greater than {0}")]
    AboveLimit(String),

    #[error("the length must be exactly {0}")]
    Length(usize),

    /// Rejection reason supplied by an external collaborator.
    #[error("{0}")]
    Rejected(String),
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Field path → failure reason. Empty means every check passed.
///
/// Entries are kept sorted by path so the rendered form is deterministic:
/// `pub_signals/a: reason; pub_signals/b: reason.`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<String, Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. A later failure for the same path replaces the earlier one.
    pub fn insert(&mut self, path: impl Into<String>, violation: Violation) {
        self.errors.insert(path.into(), violation);
    }

    /// Record the outcome of a rule; successes are ignored.
    pub fn check(&mut self, path: impl Into<String>, outcome: Result<(), Violation>) {
        if let Err(violation) = outcome {
            self.insert(path, violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, path: &str) -> Option<&Violation> {
        self.errors.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    /// Failed field paths in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Violation)> {
        self.errors.iter().map(|(path, v)| (path.as_str(), v))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return Ok(());
        }
        for (i, (path, violation)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", path, violation)?;
        }
        f.write_str(".")
    }
}

impl std::error::Error for ValidationReport {}
