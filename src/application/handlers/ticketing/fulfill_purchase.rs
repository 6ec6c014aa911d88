//! FulfillPurchaseHandler - orchestrates one webhook delivery end to end.
//!
//! State machine over an inbound event:
//! 1. Signature failure rejects the delivery (401) before anything else.
//! 2. A verified payload is parsed into a typed event; malformed shapes
//!    are rejected (400).
//! 3. Non-success event types are acknowledged without action.
//! 4. The ledger write happens before any fulfillment. A duplicate
//!    reference short-circuits the whole delivery: the provider retries
//!    until acknowledged, and the reference's uniqueness constraint is
//!    what prevents double issuance.
//! 5. Units are fulfilled sequentially and independently; one unit's
//!    failure never aborts its siblings, and the delivery is always
//!    acknowledged once fulfillment has begun.

use std::sync::Arc;

use crate::application::artifacts::ArtifactGenerator;
use crate::application::notifications::TicketNotifier;
use crate::domain::ticketing::{
    expand_cart, PaymentEvent, PaystackWebhookVerifier, Purchase, TicketUnit, WebhookError,
};
use crate::ports::{PurchaseLedger, RecordOutcome};

/// Command carrying one raw webhook delivery.
#[derive(Debug, Clone)]
pub struct FulfillPurchaseCommand {
    /// Raw request body, exactly as transmitted.
    pub payload: Vec<u8>,

    /// Value of the signature header, if present.
    pub signature: Option<String>,
}

/// Terminal outcome of a webhook delivery that passed authentication.
#[derive(Debug)]
pub enum FulfillmentOutcome {
    /// Success event accepted; per-unit results are in the report.
    Fulfilled(FulfillmentReport),

    /// This reference was already recorded; nothing was done.
    AlreadyProcessed,

    /// Event type carries no fulfillment action; acknowledged as-is.
    Ignored,
}

/// Per-delivery record of what happened to each unit.
#[derive(Debug)]
pub struct FulfillmentReport {
    /// Payment reference the report belongs to.
    pub reference: String,

    /// Purchaser address every ticket was (to be) sent to.
    pub recipient: String,

    /// One entry per expanded unit, in fulfillment order.
    pub outcomes: Vec<UnitOutcome>,
}

impl FulfillmentReport {
    /// Number of units fully issued (artifact generated and email sent).
    pub fn issued_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, UnitStatus::Issued))
            .count()
    }

    /// Number of units that failed at any stage.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.issued_count()
    }

    /// Logs the report centrally, one line per failed unit plus a summary.
    fn log(&self) {
        for outcome in &self.outcomes {
            match &outcome.status {
                UnitStatus::Issued => {}
                UnitStatus::ArtifactFailed(reason) => {
                    tracing::warn!(
                        reference = %self.reference,
                        ticket_type = %outcome.unit.ticket_type,
                        display_name = %outcome.unit.display_name,
                        index_in_line = outcome.unit.index_in_line,
                        %reason,
                        "ticket artifact generation failed"
                    );
                }
                UnitStatus::DispatchFailed(reason) => {
                    tracing::warn!(
                        reference = %self.reference,
                        recipient = %self.recipient,
                        ticket_type = %outcome.unit.ticket_type,
                        display_name = %outcome.unit.display_name,
                        index_in_line = outcome.unit.index_in_line,
                        identifier = outcome.identifier.as_deref().unwrap_or(""),
                        %reason,
                        "ticket email dispatch failed"
                    );
                }
            }
        }

        tracing::info!(
            reference = %self.reference,
            issued = self.issued_count(),
            failed = self.failed_count(),
            "fulfillment finished"
        );
    }
}

/// What happened to one unit.
#[derive(Debug)]
pub struct UnitOutcome {
    /// The unit this outcome describes.
    pub unit: TicketUnit,

    /// Identifier generated for the unit, if generation got that far.
    pub identifier: Option<String>,

    /// Terminal status for the unit.
    pub status: UnitStatus,
}

/// Terminal status of a single unit's fulfillment.
#[derive(Debug)]
pub enum UnitStatus {
    /// Artifact generated and email dispatched.
    Issued,

    /// Artifact generation failed; no email was attempted.
    ArtifactFailed(String),

    /// Artifact generated but the email could not be sent.
    DispatchFailed(String),
}

/// Handler for processing payment provider webhooks into issued tickets.
pub struct FulfillPurchaseHandler {
    verifier: PaystackWebhookVerifier,
    ledger: Arc<dyn PurchaseLedger>,
    artifacts: ArtifactGenerator,
    notifier: TicketNotifier,
}

impl FulfillPurchaseHandler {
    /// Creates a handler wired to the given collaborators.
    pub fn new(
        verifier: PaystackWebhookVerifier,
        ledger: Arc<dyn PurchaseLedger>,
        artifacts: ArtifactGenerator,
        notifier: TicketNotifier,
    ) -> Self {
        Self {
            verifier,
            ledger,
            artifacts,
            notifier,
        }
    }

    /// Processes one webhook delivery.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError` only for deliveries rejected before
    /// fulfillment: missing/invalid signature or a malformed payload.
    /// Everything past those gates is acknowledged via `Ok`.
    pub async fn handle(
        &self,
        cmd: FulfillPurchaseCommand,
    ) -> Result<FulfillmentOutcome, WebhookError> {
        // 1. Authenticate against the raw bytes.
        let signature = cmd
            .signature
            .as_deref()
            .ok_or(WebhookError::MissingSignature)?;
        if !self.verifier.verify(&cmd.payload, signature) {
            tracing::warn!("webhook rejected: invalid signature");
            return Err(WebhookError::InvalidSignature);
        }

        // 2. Parse at the trust boundary.
        let event = PaymentEvent::from_slice(&cmd.payload)?;

        // 3. Only successful charges trigger fulfillment.
        if !event.is_charge_success() {
            tracing::debug!(event_type = %event.event_type, "event acknowledged without action");
            return Ok(FulfillmentOutcome::Ignored);
        }

        // 4. Ledger write gates fulfillment. Exactly one delivery of a
        //    reference gets past this point, however many times the
        //    provider retries or overlaps deliveries.
        let purchase = Purchase::from_event(&event);
        match self.ledger.record_purchase(&purchase).await {
            Ok(RecordOutcome::Recorded) => {
                tracing::info!(
                    reference = %purchase.paystack_reference,
                    buyer = %purchase.buyer_email,
                    amount = purchase.total_amount,
                    "purchase recorded"
                );
            }
            Ok(RecordOutcome::DuplicateReference) => {
                tracing::info!(
                    reference = %purchase.paystack_reference,
                    "duplicate delivery, fulfillment skipped"
                );
                return Ok(FulfillmentOutcome::AlreadyProcessed);
            }
            Err(e) => {
                // The charge succeeded upstream whether or not our record
                // landed; issue the tickets and let operators reconcile.
                tracing::error!(
                    reference = %purchase.paystack_reference,
                    error = %e,
                    "ledger write failed, continuing best-effort"
                );
            }
        }

        // 5. Fulfill units sequentially, isolating failures per unit.
        let units = expand_cart(&event.data.metadata.cart);
        let mut outcomes = Vec::with_capacity(units.len());
        for unit in units {
            outcomes.push(self.fulfill_unit(&event, unit).await);
        }

        let report = FulfillmentReport {
            reference: event.data.reference.clone(),
            recipient: event.data.customer.email.clone(),
            outcomes,
        };
        report.log();

        Ok(FulfillmentOutcome::Fulfilled(report))
    }

    /// Generates and emails one ticket; never propagates failure.
    async fn fulfill_unit(&self, event: &PaymentEvent, unit: TicketUnit) -> UnitOutcome {
        let artifact = match self.artifacts.generate(&unit).await {
            Ok(artifact) => artifact,
            Err(e) => {
                return UnitOutcome {
                    unit,
                    identifier: None,
                    status: UnitStatus::ArtifactFailed(e.to_string()),
                };
            }
        };

        let identifier = artifact.identifier.as_str().to_string();
        let status = match self
            .notifier
            .send_ticket(
                &event.data.customer.email,
                &event.data.metadata.full_name,
                &unit,
                &artifact,
            )
            .await
        {
            Ok(()) => UnitStatus::Issued,
            Err(e) => UnitStatus::DispatchFailed(e.to_string()),
        };

        UnitOutcome {
            unit,
            identifier: Some(identifier),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticketing::compute_test_signature;
    use crate::ports::{
        ArtifactError, BaseImageStore, CodeRenderer, ImageComposer, LedgerError, MailError,
        MailTransport, TicketEmail,
    };
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    const TEST_SECRET: &str = "sk_test_webhook_secret";

    // ══════════════════════════════════════════════════════════════
    // Test Infrastructure
    // ══════════════════════════════════════════════════════════════

    struct InMemoryLedger {
        references: RwLock<HashSet<String>>,
        recorded: Mutex<Vec<Purchase>>,
        fail: bool,
    }

    impl InMemoryLedger {
        fn new() -> Self {
            Self {
                references: RwLock::new(HashSet::new()),
                recorded: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                references: RwLock::new(HashSet::new()),
                recorded: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn recorded_count(&self) -> usize {
            self.recorded.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PurchaseLedger for InMemoryLedger {
        async fn record_purchase(
            &self,
            purchase: &Purchase,
        ) -> Result<RecordOutcome, LedgerError> {
            if self.fail {
                return Err(LedgerError::Database("simulated outage".to_string()));
            }
            let mut references = self.references.write().await;
            if references.insert(purchase.paystack_reference.clone()) {
                self.recorded.lock().unwrap().push(purchase.clone());
                Ok(RecordOutcome::Recorded)
            } else {
                Ok(RecordOutcome::DuplicateReference)
            }
        }
    }

    struct StubRenderer;

    impl CodeRenderer for StubRenderer {
        fn render(&self, _payload: &str) -> Result<Vec<u8>, ArtifactError> {
            Ok(b"code".to_vec())
        }
    }

    struct StubBaseImageStore {
        missing_type: Option<String>,
    }

    #[async_trait]
    impl BaseImageStore for StubBaseImageStore {
        async fn load(&self, ticket_type: &str) -> Result<Vec<u8>, ArtifactError> {
            if self.missing_type.as_deref() == Some(ticket_type) {
                return Err(ArtifactError::asset(ticket_type, "no such file"));
            }
            Ok(b"base".to_vec())
        }
    }

    struct StubComposer;

    impl ImageComposer for StubComposer {
        fn compose(
            &self,
            _base: &[u8],
            _overlay: &[u8],
            _position: (i64, i64),
        ) -> Result<Vec<u8>, ArtifactError> {
            Ok(b"composed".to_vec())
        }
    }

    struct RecordingTransport {
        sent: Mutex<Vec<TicketEmail>>,
        fail: bool,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, email: TicketEmail) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Transport("simulated".to_string()));
            }
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct TestHarness {
        ledger: Arc<InMemoryLedger>,
        transport: Arc<RecordingTransport>,
        handler: FulfillPurchaseHandler,
    }

    fn harness() -> TestHarness {
        harness_with(InMemoryLedger::new(), RecordingTransport::new(), None)
    }

    fn harness_with(
        ledger: InMemoryLedger,
        transport: RecordingTransport,
        missing_type: Option<&str>,
    ) -> TestHarness {
        let ledger = Arc::new(ledger);
        let transport = Arc::new(transport);
        let artifacts = ArtifactGenerator::new(
            Arc::new(StubRenderer),
            Arc::new(StubBaseImageStore {
                missing_type: missing_type.map(str::to_string),
            }),
            Arc::new(StubComposer),
        );
        let handler = FulfillPurchaseHandler::new(
            PaystackWebhookVerifier::new(TEST_SECRET),
            ledger.clone(),
            artifacts,
            TicketNotifier::new(transport.clone()),
        );
        TestHarness {
            ledger,
            transport,
            handler,
        }
    }

    fn charge_success_payload(reference: &str, cart: serde_json::Value) -> Vec<u8> {
        serde_json::json!({
            "event": "charge.success",
            "data": {
                "reference": reference,
                "amount": 500000,
                "customer": {"email": "a@x.com"},
                "metadata": {"full_name": "Jane Doe", "cart": cart}
            }
        })
        .to_string()
        .into_bytes()
    }

    fn signed(payload: Vec<u8>) -> FulfillPurchaseCommand {
        let signature = compute_test_signature(TEST_SECRET, &payload);
        FulfillPurchaseCommand {
            payload,
            signature: Some(signature),
        }
    }

    fn regular_cart(quantity: u32) -> serde_json::Value {
        serde_json::json!([{"type": "regular", "quantity": quantity, "name": "Regular Ticket"}])
    }

    // ══════════════════════════════════════════════════════════════
    // Authentication Gate Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let h = harness();
        let cmd = FulfillPurchaseCommand {
            payload: charge_success_payload("ref_1", regular_cart(1)),
            signature: None,
        };

        let result = h.handler.handle(cmd).await;

        assert!(matches!(result, Err(WebhookError::MissingSignature)));
        assert_eq!(h.ledger.recorded_count(), 0);
        assert_eq!(h.transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn forged_signature_is_rejected() {
        let h = harness();
        let payload = charge_success_payload("ref_1", regular_cart(1));
        let cmd = FulfillPurchaseCommand {
            payload,
            signature: Some("ab".repeat(64)),
        };

        let result = h.handler.handle(cmd).await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
        assert_eq!(h.ledger.recorded_count(), 0);
        assert_eq!(h.transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn tampered_payload_is_rejected() {
        let h = harness();
        let payload = charge_success_payload("ref_1", regular_cart(1));
        let signature = compute_test_signature(TEST_SECRET, &payload);
        let tampered = charge_success_payload("ref_2", regular_cart(1));

        let result = h
            .handler
            .handle(FulfillPurchaseCommand {
                payload: tampered,
                signature: Some(signature),
            })
            .await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[tokio::test]
    async fn authentic_but_malformed_payload_is_rejected() {
        let h = harness();
        let payload = br#"{"event":"charge.success","data":{"amount":1}}"#.to_vec();

        let result = h.handler.handle(signed(payload)).await;

        assert!(matches!(result, Err(WebhookError::MalformedEvent(_))));
        assert_eq!(h.ledger.recorded_count(), 0);
    }

    // ══════════════════════════════════════════════════════════════
    // Event Type Gate Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn non_success_event_is_ignored() {
        let h = harness();
        let payload = serde_json::json!({
            "event": "transfer.success",
            "data": {
                "reference": "ref_transfer",
                "amount": 100,
                "customer": {"email": "a@x.com"},
                "metadata": {"full_name": "Jane", "cart": []}
            }
        })
        .to_string()
        .into_bytes();

        let result = h.handler.handle(signed(payload)).await.unwrap();

        assert!(matches!(result, FulfillmentOutcome::Ignored));
        assert_eq!(h.ledger.recorded_count(), 0);
        assert_eq!(h.transport.sent_count(), 0);
    }

    // ══════════════════════════════════════════════════════════════
    // Idempotence Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn success_event_records_and_fulfills() {
        let h = harness();
        let cmd = signed(charge_success_payload("abc123", regular_cart(2)));

        let outcome = h.handler.handle(cmd).await.unwrap();

        let FulfillmentOutcome::Fulfilled(report) = outcome else {
            panic!("expected Fulfilled");
        };
        assert_eq!(report.reference, "abc123");
        assert_eq!(report.issued_count(), 2);
        assert_eq!(report.failed_count(), 0);
        assert_eq!(h.ledger.recorded_count(), 1);
        assert_eq!(h.transport.sent_count(), 2);

        // Both identifiers distinct and well-formed.
        let identifiers: Vec<&str> = report
            .outcomes
            .iter()
            .map(|o| o.identifier.as_deref().unwrap())
            .collect();
        assert!(identifiers.iter().all(|id| id.starts_with("ULES-REGULAR-")));
        assert_ne!(identifiers[0], identifiers[1]);
    }

    #[tokio::test]
    async fn redelivery_short_circuits_without_fulfillment() {
        let h = harness();

        h.handler
            .handle(signed(charge_success_payload("abc123", regular_cart(2))))
            .await
            .unwrap();
        let second = h
            .handler
            .handle(signed(charge_success_payload("abc123", regular_cart(2))))
            .await
            .unwrap();

        assert!(matches!(second, FulfillmentOutcome::AlreadyProcessed));
        assert_eq!(h.ledger.recorded_count(), 1);
        assert_eq!(h.transport.sent_count(), 2);
    }

    #[tokio::test]
    async fn distinct_references_fulfill_independently() {
        let h = harness();

        h.handler
            .handle(signed(charge_success_payload("ref_a", regular_cart(1))))
            .await
            .unwrap();
        h.handler
            .handle(signed(charge_success_payload("ref_b", regular_cart(1))))
            .await
            .unwrap();

        assert_eq!(h.ledger.recorded_count(), 2);
        assert_eq!(h.transport.sent_count(), 2);
    }

    #[tokio::test]
    async fn ledger_failure_still_fulfills_best_effort() {
        let h = harness_with(InMemoryLedger::failing(), RecordingTransport::new(), None);
        let cmd = signed(charge_success_payload("ref_down", regular_cart(1)));

        let outcome = h.handler.handle(cmd).await.unwrap();

        assert!(matches!(outcome, FulfillmentOutcome::Fulfilled(_)));
        assert_eq!(h.transport.sent_count(), 1);
    }

    // ══════════════════════════════════════════════════════════════
    // Failure Isolation Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_asset_fails_only_that_line() {
        let h = harness_with(
            InMemoryLedger::new(),
            RecordingTransport::new(),
            Some("vip"),
        );
        let cart = serde_json::json!([
            {"type": "regular", "quantity": 1, "name": "Regular Ticket"},
            {"type": "vip", "quantity": 1, "name": "VIP Ticket"}
        ]);

        let outcome = h
            .handler
            .handle(signed(charge_success_payload("ref_mixed", cart)))
            .await
            .unwrap();

        let FulfillmentOutcome::Fulfilled(report) = outcome else {
            panic!("expected Fulfilled");
        };
        assert_eq!(report.issued_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(matches!(
            report.outcomes[1].status,
            UnitStatus::ArtifactFailed(_)
        ));
        // The regular ticket still went out.
        assert_eq!(h.transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn dispatch_failure_is_recorded_with_identifier() {
        let h = harness_with(InMemoryLedger::new(), RecordingTransport::failing(), None);

        let outcome = h
            .handler
            .handle(signed(charge_success_payload("ref_mail", regular_cart(2))))
            .await
            .unwrap();

        let FulfillmentOutcome::Fulfilled(report) = outcome else {
            panic!("expected Fulfilled");
        };
        assert_eq!(report.issued_count(), 0);
        assert_eq!(report.failed_count(), 2);
        for unit_outcome in &report.outcomes {
            assert!(matches!(unit_outcome.status, UnitStatus::DispatchFailed(_)));
            assert!(unit_outcome.identifier.is_some());
        }
    }

    #[tokio::test]
    async fn empty_cart_fulfills_with_empty_report() {
        let h = harness();
        let cmd = signed(charge_success_payload("ref_empty", serde_json::json!([])));

        let outcome = h.handler.handle(cmd).await.unwrap();

        let FulfillmentOutcome::Fulfilled(report) = outcome else {
            panic!("expected Fulfilled");
        };
        assert!(report.outcomes.is_empty());
        assert_eq!(h.ledger.recorded_count(), 1);
        assert_eq!(h.transport.sent_count(), 0);
    }
}
