//! zkverify Core — proof container types, the public signal layout of the
//! passport circuit, and the packed-integer codec the circuit uses for byte
//! strings, country codes and dates.

pub mod codec;
pub mod error;
pub mod signals;
pub mod types;

pub use error::CoreError;
pub use signals::{PubSignals, Signal, PROOF_SELECTOR_VALUE, PUB_SIGNALS_LEN};
pub use types::{ProofData, ZkProof};
