//! Property-based tests for the request signing protocol.
//!
//! Uses proptest to check that whatever the signer produces the verifier
//! accepts, and that any change to the body or the secret is caught.

use proptest::prelude::*;

use donation_gateway::domain::signing::{
    body_digest, CanonicalSigner, CanonicalVerifier, Rejection, SecurityHeaders,
    SignedRequestContext, SigningCredential,
};

// ============================================================================
// STRATEGIES
// ============================================================================

fn arb_secret() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,40}"
}

fn arb_client_id() -> impl Strategy<Value = String> {
    "[A-Z]{3}-[0-9]{4,12}"
}

fn arb_target() -> impl Strategy<Value = String> {
    "(/[a-z0-9_-]{1,12}){1,4}"
}

fn arb_body() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

fn verifier(client_id: &str, secret: &str, target: &str) -> CanonicalVerifier {
    CanonicalVerifier::new(SigningCredential::new(client_id, secret), target).with_freshness(None)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn signed_requests_always_verify(
        client_id in arb_client_id(),
        secret in arb_secret(),
        target in arb_target(),
        body in arb_body(),
    ) {
        let signer = CanonicalSigner::new(SigningCredential::new(client_id.as_str(), secret.as_str()));
        let signed = signer.sign(&target, &body).unwrap();

        let result = verifier(&client_id, &secret, &target)
            .verify(&SecurityHeaders::from(&signed), &body);

        prop_assert!(result.is_authentic(), "rejected: {:?}", result.rejection);
    }

    #[test]
    fn tampered_body_fails_digest(
        secret in arb_secret(),
        target in arb_target(),
        mut body in prop::collection::vec(any::<u8>(), 1..512),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let signer = CanonicalSigner::new(SigningCredential::new("BRN-0001", secret.as_str()));
        let signed = signer.sign(&target, &body).unwrap();

        let position = index.index(body.len());
        body[position] ^= flip;

        let result = verifier("BRN-0001", &secret, &target)
            .verify(&SecurityHeaders::from(&signed), &body);

        prop_assert!(!result.digest_ok);
        prop_assert!(!result.is_authentic());
        prop_assert_eq!(result.rejection, Some(Rejection::DigestMismatch));
    }

    #[test]
    fn different_secret_fails_signature(
        secret in arb_secret(),
        other in arb_secret(),
        target in arb_target(),
        body in arb_body(),
    ) {
        prop_assume!(secret != other);

        let signer = CanonicalSigner::new(SigningCredential::new("BRN-0001", secret.as_str()));
        let signed = signer.sign(&target, &body).unwrap();

        let result = verifier("BRN-0001", &other, &target)
            .verify(&SecurityHeaders::from(&signed), &body);

        prop_assert!(result.digest_ok);
        prop_assert!(!result.signature_ok);
        prop_assert_eq!(result.rejection, Some(Rejection::SignatureMismatch));
    }

    #[test]
    fn signing_is_deterministic_for_fixed_context(
        secret in arb_secret(),
        target in arb_target(),
        body in arb_body(),
        request_id in "[0-9a-f]{8}-[0-9a-f]{4}",
    ) {
        let signer = CanonicalSigner::new(SigningCredential::new("BRN-0001", secret.as_str()));
        let context = SignedRequestContext::fixed(request_id, "2024-01-01T00:00:00Z", target);

        let first = signer.sign_with(&context, &body).unwrap();
        let second = signer.sign_with(&context, &body).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.digest, body_digest(&body));
    }

    #[test]
    fn fresh_contexts_never_reuse_request_ids(target in arb_target()) {
        let first = SignedRequestContext::fresh(target.as_str());
        let second = SignedRequestContext::fresh(target.as_str());

        prop_assert_ne!(first.request_id, second.request_id);
    }
}

#[test]
fn empty_body_digest_matches_known_value() {
    assert_eq!(
        body_digest(b""),
        "SHA-256=47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
    );
}
