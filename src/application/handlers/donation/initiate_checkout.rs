//! InitiateCheckoutHandler - Command handler for opening a checkout session.

use std::sync::Arc;

use crate::domain::donation::{
    extract_checkout_url, CheckoutPayload, DonationDraft, DonationError, DonationRecord,
    DonorInfo, InvoiceNumber, InvoiceNumberGenerator, PayloadOptions, RawAmount, RedirectUrls,
    DEFAULT_FREQUENCY,
};
use crate::domain::signing::CanonicalSigner;
use crate::ports::{CheckoutGateway, DonationLedger, SaveResult, SignedPaymentRequest};

/// Attempts at minting an invoice number not already in the ledger.
const MAX_INVOICE_ATTEMPTS: usize = 5;

/// Command to open a checkout session for one donation.
#[derive(Debug, Clone)]
pub struct InitiateCheckoutCommand {
    pub amount: RawAmount,
    pub donor: DonorInfo,
    pub frequency: Option<String>,
    /// Scheme and host the donor reached us on, e.g. `https://give.example`.
    pub origin: String,
}

/// Result of a successfully opened checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateCheckoutResult {
    pub checkout_url: String,
    pub invoice_number: InvoiceNumber,
}

/// Installation settings for checkout requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOptions {
    /// Processor endpoint, signed as `Request-Target`.
    pub payment_path: String,
    /// Where the processor delivers callbacks.
    pub webhook_path: String,
    pub success_url: Option<String>,
    pub failed_url: Option<String>,
    pub callback_url: Option<String>,
    pub payload: PayloadOptions,
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            payment_path: "/checkout/v1/payment".to_string(),
            webhook_path: "/api/webhooks/doku".to_string(),
            success_url: None,
            failed_url: None,
            callback_url: None,
            payload: PayloadOptions::default(),
        }
    }
}

impl CheckoutOptions {
    /// Configured overrides, otherwise URLs under `origin`.
    pub fn redirect_urls(&self, origin: &str, invoice_number: &InvoiceNumber) -> RedirectUrls {
        let origin = origin.trim_end_matches('/');
        RedirectUrls {
            success_url: self.success_url.clone().unwrap_or_else(|| {
                format!("{}/payment/success?invoice={}", origin, invoice_number)
            }),
            failed_url: self.failed_url.clone().unwrap_or_else(|| {
                format!("{}/payment/failed?invoice={}", origin, invoice_number)
            }),
            callback_url: self
                .callback_url
                .clone()
                .unwrap_or_else(|| format!("{}{}", origin, self.webhook_path)),
        }
    }
}

/// Handler for opening checkout sessions with the processor.
///
/// The ledger is written only after the processor returns a checkout URL, so
/// a failed or timed-out call leaves no record behind.
pub struct InitiateCheckoutHandler {
    ledger: Arc<dyn DonationLedger>,
    gateway: Arc<dyn CheckoutGateway>,
    signer: CanonicalSigner,
    invoices: Arc<InvoiceNumberGenerator>,
    options: CheckoutOptions,
}

impl InitiateCheckoutHandler {
    pub fn new(
        ledger: Arc<dyn DonationLedger>,
        gateway: Arc<dyn CheckoutGateway>,
        signer: CanonicalSigner,
        invoices: Arc<InvoiceNumberGenerator>,
        options: CheckoutOptions,
    ) -> Self {
        Self {
            ledger,
            gateway,
            signer,
            invoices,
            options,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiateCheckoutCommand,
    ) -> Result<InitiateCheckoutResult, DonationError> {
        // 1. Validate input
        let amount = cmd.amount.parse()?;
        let frequency = cmd
            .frequency
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string());

        // 2. Reserve an invoice number
        let invoice_number = self.unused_invoice_number().await?;
        let draft = DonationDraft {
            invoice_number: invoice_number.clone(),
            amount,
            donor: cmd.donor,
            frequency,
        };

        // 3. Build, serialize once, sign those bytes
        let urls = self.options.redirect_urls(&cmd.origin, &invoice_number);
        let body = CheckoutPayload::for_donation(&draft, &urls, &self.options.payload)
            .to_bytes()
            .map_err(|e| DonationError::infrastructure(e.to_string()))?;
        let headers = self.signer.sign(&self.options.payment_path, &body)?;

        tracing::info!(
            invoice_number = %invoice_number,
            amount = amount.value(),
            request_id = %headers.request_id,
            "Initiating checkout"
        );

        // 4. Submit
        let response = self
            .gateway
            .submit_payment(SignedPaymentRequest { headers, body })
            .await
            .map_err(|e| {
                tracing::error!(
                    invoice_number = %invoice_number,
                    status = ?e.status(),
                    error = %e,
                    "Checkout submission failed"
                );
                DonationError::from(e)
            })?;

        // 5. Extract checkout URL
        let checkout_url = match extract_checkout_url(&response.body) {
            Some(url) => url.to_string(),
            None => {
                tracing::error!(
                    invoice_number = %invoice_number,
                    status = response.status,
                    "Processor response has no checkout URL"
                );
                return Err(DonationError::contract_violation(response.body));
            }
        };

        // 6. Record
        let record = DonationRecord::created(draft, Some(checkout_url.clone()));
        if self.ledger.upsert_created(record).await? == SaveResult::AlreadyExists {
            return Err(DonationError::infrastructure(format!(
                "invoice number {} was recorded concurrently",
                invoice_number
            )));
        }

        Ok(InitiateCheckoutResult {
            checkout_url,
            invoice_number,
        })
    }

    async fn unused_invoice_number(&self) -> Result<InvoiceNumber, DonationError> {
        for _ in 0..MAX_INVOICE_ATTEMPTS {
            let candidate = self.invoices.next();
            if !self.ledger.contains(&candidate).await? {
                return Ok(candidate);
            }
            tracing::warn!(invoice_number = %candidate, "Invoice number collision, retrying");
        }
        Err(DonationError::infrastructure(
            "could not mint an unused invoice number",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::doku::MockCheckoutGateway;
    use crate::adapters::storage::InMemoryDonationLedger;
    use crate::domain::donation::DonationStatus;
    use crate::domain::signing::{
        body_digest, CanonicalVerifier, SecurityHeaders, SigningCredential,
    };
    use crate::ports::GatewayError;
    use serde_json::json;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn credential() -> SigningCredential {
        SigningCredential::new("C1", "s3cr3t")
    }

    fn setup(
        gateway: MockCheckoutGateway,
    ) -> (InitiateCheckoutHandler, Arc<InMemoryDonationLedger>, MockCheckoutGateway) {
        setup_with(gateway, credential(), CheckoutOptions::default())
    }

    fn setup_with(
        gateway: MockCheckoutGateway,
        credential: SigningCredential,
        options: CheckoutOptions,
    ) -> (InitiateCheckoutHandler, Arc<InMemoryDonationLedger>, MockCheckoutGateway) {
        let ledger = Arc::new(InMemoryDonationLedger::new());
        let handler = InitiateCheckoutHandler::new(
            ledger.clone(),
            Arc::new(gateway.clone()),
            CanonicalSigner::new(credential),
            Arc::new(InvoiceNumberGenerator::new()),
            options,
        );
        (handler, ledger, gateway)
    }

    fn command(amount: i64) -> InitiateCheckoutCommand {
        InitiateCheckoutCommand {
            amount: RawAmount::from(amount),
            donor: DonorInfo::new(Some("Sari".into()), None, None),
            frequency: None,
            origin: "https://give.example".to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn opens_session_and_records_created_donation() {
        let (handler, ledger, _) =
            setup(MockCheckoutGateway::with_checkout_url("https://pay.example/x"));

        let result = handler.handle(command(50_000)).await.unwrap();

        assert_eq!(result.checkout_url, "https://pay.example/x");
        assert_eq!(ledger.len().await, 1);
        let record = ledger.get(&result.invoice_number).await.unwrap().unwrap();
        assert_eq!(record.status, DonationStatus::Created);
        assert_eq!(record.amount.value(), 50_000);
        assert_eq!(record.frequency, "one-time");
        assert_eq!(record.checkout_url.as_deref(), Some("https://pay.example/x"));
    }

    #[tokio::test]
    async fn submitted_body_is_signed_byte_for_byte() {
        let (handler, _, gateway) =
            setup(MockCheckoutGateway::with_checkout_url("https://pay.example/x"));

        handler.handle(command(50_000)).await.unwrap();

        let call = gateway.last_call().unwrap();
        assert_eq!(call.headers.request_target, "/checkout/v1/payment");
        assert_eq!(call.headers.client_id, "C1");
        assert_eq!(call.headers.digest, body_digest(&call.body));

        let verifier = CanonicalVerifier::new(credential(), "/checkout/v1/payment");
        let result = verifier.verify(&SecurityHeaders::from(&call.headers), &call.body);
        assert!(result.is_authentic());
    }

    #[tokio::test]
    async fn payload_uses_origin_for_redirects() {
        let (handler, _, gateway) =
            setup(MockCheckoutGateway::with_checkout_url("https://pay.example/x"));

        let result = handler.handle(command(50_000)).await.unwrap();

        let body: serde_json::Value = serde_json::from_slice(&gateway.last_call().unwrap().body)
            .unwrap();
        assert_eq!(
            body["order"]["success_url"],
            format!(
                "https://give.example/payment/success?invoice={}",
                result.invoice_number
            )
        );
        assert_eq!(
            body["order"]["callback_url"],
            "https://give.example/api/webhooks/doku"
        );
        assert_eq!(body["order"]["invoice_number"], result.invoice_number.as_str());
        assert_eq!(body["customer"]["name"], "Sari");
    }

    #[tokio::test]
    async fn configured_redirect_overrides_win() {
        let options = CheckoutOptions {
            success_url: Some("https://give.example/thanks".into()),
            callback_url: Some("https://hooks.example/doku".into()),
            ..Default::default()
        };
        let (handler, _, gateway) = setup_with(
            MockCheckoutGateway::with_checkout_url("https://pay.example/x"),
            credential(),
            options,
        );

        handler.handle(command(50_000)).await.unwrap();

        let body: serde_json::Value = serde_json::from_slice(&gateway.last_call().unwrap().body)
            .unwrap();
        assert_eq!(body["order"]["success_url"], "https://give.example/thanks");
        assert_eq!(body["order"]["callback_url"], "https://hooks.example/doku");
    }

    #[tokio::test]
    async fn numeric_string_amount_is_accepted() {
        let (handler, ledger, _) =
            setup(MockCheckoutGateway::with_checkout_url("https://pay.example/x"));

        let mut cmd = command(0);
        cmd.amount = RawAmount::Text("75000".into());
        let result = handler.handle(cmd).await.unwrap();

        let record = ledger.get(&result.invoice_number).await.unwrap().unwrap();
        assert_eq!(record.amount.value(), 75_000);
    }

    #[tokio::test]
    async fn wrapped_response_shape_is_understood() {
        let gateway = MockCheckoutGateway::new();
        gateway.set_response(json!({"response": {"payment": {"url": "https://pay.example/w"}}}));
        let (handler, _, _) = setup(gateway);

        let result = handler.handle(command(50_000)).await.unwrap();

        assert_eq!(result.checkout_url, "https://pay.example/w");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn zero_and_negative_amounts_are_rejected_before_submission() {
        let (handler, ledger, gateway) =
            setup(MockCheckoutGateway::with_checkout_url("https://pay.example/x"));

        for amount in [0, -5] {
            let result = handler.handle(command(amount)).await;
            assert!(matches!(result, Err(DonationError::InvalidAmount(_))));
        }

        assert_eq!(gateway.call_count(), 0);
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn missing_credentials_fail_without_submitting() {
        let (handler, ledger, gateway) = setup_with(
            MockCheckoutGateway::with_checkout_url("https://pay.example/x"),
            SigningCredential::new("", ""),
            CheckoutOptions::default(),
        );

        let result = handler.handle(command(50_000)).await;

        assert!(matches!(result, Err(DonationError::Configuration(_))));
        assert_eq!(gateway.call_count(), 0);
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn upstream_timeout_leaves_no_record() {
        let gateway = MockCheckoutGateway::with_checkout_url("https://pay.example/x");
        gateway.set_error(GatewayError::Timeout(20));
        let (handler, ledger, _) = setup(gateway);

        let result = handler.handle(command(50_000)).await;

        assert!(matches!(
            result,
            Err(DonationError::UpstreamUnavailable { .. })
        ));
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn upstream_rejection_carries_status() {
        let gateway = MockCheckoutGateway::with_checkout_url("https://pay.example/x");
        gateway.set_error(GatewayError::Rejected {
            status: 401,
            body: "{\"error\":\"invalid signature\"}".into(),
        });
        let (handler, ledger, _) = setup(gateway);

        let result = handler.handle(command(50_000)).await;

        assert!(matches!(
            result,
            Err(DonationError::UpstreamUnavailable {
                status: Some(401),
                ..
            })
        ));
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn missing_checkout_url_surfaces_raw_payload() {
        let gateway = MockCheckoutGateway::new();
        gateway.set_response(json!({"message": ["SUCCESS"], "response": {}}));
        let (handler, ledger, _) = setup(gateway);

        let result = handler.handle(command(50_000)).await;

        match result {
            Err(DonationError::UpstreamContractViolation { raw }) => {
                assert_eq!(raw["message"][0], "SUCCESS");
            }
            other => panic!("expected contract violation, got {:?}", other),
        }
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn back_to_back_checkouts_get_distinct_invoices() {
        let (handler, ledger, _) =
            setup(MockCheckoutGateway::with_checkout_url("https://pay.example/x"));

        let first = handler.handle(command(10_000)).await.unwrap();
        let second = handler.handle(command(10_000)).await.unwrap();

        assert_ne!(first.invoice_number, second.invoice_number);
        assert_eq!(ledger.len().await, 2);
    }
}
