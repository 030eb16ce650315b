//! Checkout orchestration

mod orchestrator;
mod receipt;
mod view;

pub use orchestrator::{
    AppliedPromo, CheckoutDeps, CheckoutOrchestrator, CheckoutPhase, CheckoutSettings,
    CheckoutState, PaymentProgress, PlaceOrderOutcome,
};
pub use receipt::{Receipt, ReceiptSource};
pub use view::{CheckoutSection, CheckoutView, HeadlessView};
