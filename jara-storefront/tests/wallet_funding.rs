mod common;

use common::{FakeBackend, ScriptedWidget, customer_session};
use jara_storefront::CheckoutError;
use jara_storefront::payment::{FundingOutcome, UnifiedPaymentService};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn service(
    backend: &Arc<FakeBackend>,
    widget: &Arc<ScriptedWidget>,
    public_key: Option<&str>,
) -> UnifiedPaymentService {
    UnifiedPaymentService::new(
        backend.clone(),
        widget.clone(),
        public_key.map(str::to_string),
    )
}

#[tokio::test]
async fn test_top_up_verifies_then_funds() {
    let backend = Arc::new(FakeBackend::default());
    let widget = Arc::new(ScriptedWidget::default());
    widget.will_pay("card");
    let payments = service(&backend, &widget, Some("pk_test_123"));

    let outcome = payments
        .fund_wallet_via_provider(&customer_session(), dec!(5000))
        .await
        .unwrap();

    let FundingOutcome::Funded { reference, balance } = outcome else {
        panic!("expected a funded wallet");
    };
    assert!(reference.starts_with("wallet_fund_"));
    assert_eq!(balance, dec!(15000));

    let opened = widget.opened.lock().clone();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].amount, 500_000);
    assert_eq!(opened[0].reference, reference);

    assert_eq!(backend.verify_calls.load(Ordering::SeqCst), 1);
    let funded = backend.fund_requests.lock().clone();
    assert_eq!(funded.len(), 1);
    assert_eq!(funded[0].reference, reference);
    assert_eq!(funded[0].provider, "paystack");
    assert_eq!(funded[0].amount, dec!(5000));
}

#[tokio::test]
async fn test_top_up_is_not_funded_when_verification_fails() {
    let backend = Arc::new(FakeBackend::default());
    *backend.verified.lock() = false;
    let widget = Arc::new(ScriptedWidget::default());
    widget.will_pay("bank_transfer");
    let payments = service(&backend, &widget, Some("pk_test_123"));

    let err = payments
        .fund_wallet_via_provider(&customer_session(), dec!(5000))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::PaymentVerificationFailed(_)));
    assert!(backend.fund_requests.lock().is_empty());
    assert_eq!(*backend.balance.lock(), dec!(10000));
}

#[tokio::test]
async fn test_cancelled_top_up_touches_nothing() {
    let backend = Arc::new(FakeBackend::default());
    let widget = Arc::new(ScriptedWidget::default());
    widget.will_cancel();
    let payments = service(&backend, &widget, Some("pk_test_123"));

    let outcome = payments
        .fund_wallet_via_provider(&customer_session(), dec!(5000))
        .await
        .unwrap();

    assert_eq!(outcome, FundingOutcome::Cancelled);
    assert_eq!(backend.verify_calls.load(Ordering::SeqCst), 0);
    assert!(backend.fund_requests.lock().is_empty());
}

#[tokio::test]
async fn test_top_up_without_public_key_never_opens_popup() {
    let backend = Arc::new(FakeBackend::default());
    let widget = Arc::new(ScriptedWidget::default());
    widget.will_pay("card");
    let payments = service(&backend, &widget, None);

    let err = payments
        .fund_wallet_via_provider(&customer_session(), dec!(5000))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::PaymentNotConfigured));
    assert!(widget.opened.lock().is_empty());
}
