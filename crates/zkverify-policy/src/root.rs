use std::collections::HashSet;
use std::fmt;

/// Outcome of a failed root lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RootError {
    /// The registry answered and does not accept the root.
    #[error("{0}")]
    Invalid(String),

    /// The registry could not be reached or failed for an unrelated reason.
    #[error("{0}")]
    Unavailable(String),
}

/// Checks a claimed identity state root against a registry of trusted roots.
///
/// Implementations block; any retry policy is their own.
pub trait RootVerifier: Send + Sync + fmt::Debug {
    fn verify_root(&self, root: &str) -> Result<(), RootError>;
}

/// Root verifier backed by an in-memory set of accepted roots.
#[derive(Debug, Clone, Default)]
pub struct KnownRoots {
    roots: HashSet<String>,
}

impl KnownRoots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an accepted root.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.roots.insert(root.into());
        self
    }

    pub fn contains(&self, root: &str) -> bool {
        self.roots.contains(root)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownRoots {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl RootVerifier for KnownRoots {
    fn verify_root(&self, root: &str) -> Result<(), RootError> {
        if self.contains(root) {
            Ok(())
        } else {
            Err(RootError::Invalid("root is not registered".into()))
        }
    }
}
