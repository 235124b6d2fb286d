/// Core decoding and layout errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid decimal integer: {0:?}")]
    InvalidDecimal(String),

    #[error("packed value is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid packed date: {0:?}")]
    InvalidDate(String),

    #[error("invalid public signal count: expected {expected}, got {actual}")]
    SignalCount { expected: usize, actual: usize },
}
