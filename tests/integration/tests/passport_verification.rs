//! Integration test: passport proof verification through the verifier facade.

use std::sync::Arc;

use zkverify_integration_tests::{
    FakeGroth16, FakeRootVerifier, SignalsBuilder, ADDRESS_HEX, EVENT_ID, HASHED_EXTERNAL_ID,
    INVALID_EVENT_ID, OTHER_ADDRESS_HEX, RAW_EXTERNAL_ID, VERIFICATION_KEY,
};
use zkverify_verifier::{
    with_address, with_age_above, with_citizenships, with_event_id, with_external_id,
    with_root_verifier, Verifier, VerifierError, VerifyOption, ZkProof,
};

fn verifier_with(options: Vec<VerifyOption>) -> (Verifier, Arc<FakeGroth16>) {
    let groth16 = Arc::new(FakeGroth16::valid());
    let verifier = Verifier::builder()
        .verification_key(VERIFICATION_KEY.to_vec())
        .groth16(groth16.clone())
        .option(with_root_verifier(Arc::new(FakeRootVerifier::accepting())))
        .options(options)
        .build()
        .expect("verifier should build");
    (verifier, groth16)
}

fn valid_proof() -> ZkProof {
    SignalsBuilder::new().proof()
}

// =========================================================================
// Citizenship
// =========================================================================

#[test]
fn test_with_citizenship() {
    let (verifier, groth16) = verifier_with(vec![with_citizenships(["UKR"])]);
    verifier.verify_proof(&valid_proof(), []).unwrap();
    assert_eq!(groth16.calls(), 1);
}

#[test]
fn test_with_citizenship_fail() {
    let (verifier, groth16) = verifier_with(vec![with_citizenships(["USA", "ENG"])]);
    let err = verifier.verify_proof(&valid_proof(), []).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to validate proof: pub_signals/citizenship: must be one of ENG, USA."
    );
    assert_eq!(groth16.calls(), 0, "pairing check must not run");
}

// =========================================================================
// Address binding
// =========================================================================

#[test]
fn test_with_address() {
    let address = hex::decode(ADDRESS_HEX).unwrap();
    let (verifier, _) = verifier_with(vec![with_address(address)]);
    verifier.verify_proof(&valid_proof(), []).unwrap();
}

#[test]
fn test_with_address_fail() {
    let address = hex::decode(OTHER_ADDRESS_HEX).unwrap();
    let (verifier, _) = verifier_with(vec![with_address(address)]);
    let err = verifier.verify_proof(&valid_proof(), []).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to validate proof: pub_signals/event_data: must be a valid value."
    );
}

// =========================================================================
// Age
// =========================================================================

#[test]
fn test_with_age_lower() {
    let (verifier, _) = verifier_with(vec![with_age_above(13)]);
    verifier.verify_proof(&valid_proof(), []).unwrap();
}

#[test]
fn test_with_age_equal() {
    let (verifier, _) = verifier_with(vec![with_age_above(25)]);
    verifier.verify_proof(&valid_proof(), []).unwrap();
}

#[test]
fn test_with_age_higher() {
    let (verifier, _) = verifier_with(vec![with_age_above(98)]);
    let err = verifier.verify_proof(&valid_proof(), []).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to validate proof: pub_signals/birth_date: date is too late."
    );
}

// =========================================================================
// Event binding
// =========================================================================

#[test]
fn test_with_event_id() {
    let (verifier, _) = verifier_with(vec![with_event_id(EVENT_ID)]);
    verifier.verify_proof(&valid_proof(), []).unwrap();
}

#[test]
fn test_with_invalid_event_id() {
    let (verifier, _) = verifier_with(vec![with_event_id(INVALID_EVENT_ID)]);
    let err = verifier.verify_proof(&valid_proof(), []).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to validate proof: pub_signals/event_id: must be a valid value."
    );
}

// =========================================================================
// External identifier
// =========================================================================

#[test]
fn test_with_external_id() {
    let (verifier, _) = verifier_with(vec![with_external_id(RAW_EXTERNAL_ID)]);
    assert_eq!(
        verifier.options().external_id_hash().unwrap().as_str(),
        HASHED_EXTERNAL_ID
    );
    verifier.verify_external_id(RAW_EXTERNAL_ID).unwrap();
}

#[test]
fn test_with_invalid_external_id() {
    let (verifier, _) = verifier_with(vec![with_external_id(RAW_EXTERNAL_ID)]);
    // The already hashed form is not the raw identifier.
    let err = verifier.verify_external_id(HASHED_EXTERNAL_ID).unwrap_err();
    assert_eq!(err.to_string(), "external_id: must be a valid value.");
}

#[test]
fn test_external_id_required() {
    let (verifier, _) = verifier_with(vec![]);
    let err = verifier.verify_external_id(RAW_EXTERNAL_ID).unwrap_err();
    assert!(matches!(err, VerifierError::ExternalId(_)));
    assert_eq!(err.to_string(), "external_id: cannot be blank.");
}

// =========================================================================
// Combined policies
// =========================================================================

#[test]
fn test_with_many_options() {
    let (verifier, groth16) = verifier_with(vec![
        with_age_above(18),
        with_address(hex::decode(ADDRESS_HEX).unwrap()),
        with_citizenships(["UKR"]),
        with_event_id(EVENT_ID),
    ]);
    verifier.verify_proof(&valid_proof(), []).unwrap();
    assert_eq!(groth16.calls(), 1);
}

#[test]
fn test_with_many_options_fail() {
    let (verifier, _) = verifier_with(vec![
        with_age_above(98),
        with_address(hex::decode(ADDRESS_HEX).unwrap()),
        with_citizenships(["USA"]),
        with_event_id(INVALID_EVENT_ID),
    ]);
    let err = verifier.verify_proof(&valid_proof(), []).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to validate proof: pub_signals/birth_date: date is too late; pub_signals/citizenship: must be one of USA; pub_signals/event_id: must be a valid value."
    );
    let report = err.report().expect("field report");
    assert_eq!(report.len(), 3);
}

// =========================================================================
// Per-call overrides
// =========================================================================

#[test]
fn test_per_call_override_applies_once() {
    let (verifier, _) = verifier_with(vec![with_citizenships(["UKR"])]);

    let err = verifier
        .verify_proof(&valid_proof(), [with_citizenships(["USA"])])
        .unwrap_err();
    assert!(err.report().unwrap().contains("pub_signals/citizenship"));

    verifier.verify_proof(&valid_proof(), []).unwrap();
    assert!(verifier
        .options()
        .allowed_citizenships()
        .unwrap()
        .contains("UKR"));
}

#[test]
fn test_concurrent_calls_with_different_overrides() {
    let (verifier, groth16) = verifier_with(vec![]);
    let verifier = Arc::new(verifier);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let verifier = Arc::clone(&verifier);
            std::thread::spawn(move || {
                let code = if i % 2 == 0 { "UKR" } else { "USA" };
                verifier.verify_proof(&valid_proof(), [with_citizenships([code])])
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.is_ok(), i % 2 == 0, "call {i}");
    }
    assert_eq!(groth16.calls(), 4);
    assert!(verifier.options().allowed_citizenships().is_none());
}

// =========================================================================
// Error taxonomy
// =========================================================================

#[test]
fn test_pairing_failure_is_distinct() {
    let groth16 = Arc::new(FakeGroth16::invalid());
    let verifier = Verifier::builder()
        .verification_key(VERIFICATION_KEY.to_vec())
        .groth16(groth16.clone())
        .option(with_root_verifier(Arc::new(FakeRootVerifier::accepting())))
        .build()
        .unwrap();

    let err = verifier.verify_proof(&valid_proof(), []).unwrap_err();
    assert!(matches!(err, VerifierError::Proof(_)));
    assert_eq!(err.to_string(), "failed to verify proof: pairing check failed");
    assert_eq!(groth16.calls(), 1);
}

#[test]
fn test_root_outage_is_infrastructure() {
    let groth16 = Arc::new(FakeGroth16::valid());
    let verifier = Verifier::builder()
        .verification_key(VERIFICATION_KEY.to_vec())
        .groth16(groth16.clone())
        .option(with_root_verifier(Arc::new(FakeRootVerifier::unavailable(
            "registry timeout",
        ))))
        .build()
        .unwrap();

    let err = verifier.verify_proof(&valid_proof(), []).unwrap_err();
    assert!(err.is_infrastructure());
    assert!(!err.is_validation());
    assert_eq!(
        err.to_string(),
        "failed to validate proof: identity state root unavailable: registry timeout"
    );
    assert_eq!(groth16.calls(), 0);
}

#[test]
fn test_root_rejection_is_field_error() {
    let (verifier, _) = verifier_with(vec![]);
    let rejecting = Arc::new(FakeRootVerifier::rejecting("root is not registered"));
    let err = verifier
        .verify_proof(&valid_proof(), [with_root_verifier(rejecting.clone())])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to validate proof: pub_signals/id_state_hash: root is not registered."
    );
    assert_eq!(rejecting.calls(), 1);
}

#[test]
fn test_missing_proof_is_argument_error() {
    let (verifier, _) = verifier_with(vec![]);
    let mut proof = valid_proof();
    proof.proof = None;
    let err = verifier.verify_proof(&proof, []).unwrap_err();
    assert!(matches!(err, VerifierError::Arguments(_)));
    assert_eq!(
        err.to_string(),
        "failed to validate proof: failed to validate arguments: zk_proof/proof: cannot be blank."
    );
}

#[test]
fn test_proof_from_json() {
    let json = serde_json::json!({
        "proof": {
            "pi_a": ["1", "2", "1"],
            "pi_b": [["1", "0"], ["1", "0"], ["1", "0"]],
            "pi_c": ["1", "2", "1"],
            "protocol": "groth16"
        },
        "pub_signals": SignalsBuilder::new().signals(),
    });
    let proof: ZkProof = serde_json::from_value(json).unwrap();
    let (verifier, _) = verifier_with(vec![with_citizenships(["UKR"])]);
    verifier.verify_proof(&proof, []).unwrap();
}
