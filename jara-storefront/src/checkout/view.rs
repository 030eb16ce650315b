use super::receipt::Receipt;

/// Part of the cart panel a failed gate scrolls to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutSection {
    Cart,
    Address,
    PaymentMethod,
    Fees,
}

/// UI surface the checkout drives
pub trait CheckoutView: Send + Sync {
    fn scroll_to(&self, section: CheckoutSection);
    fn open_login(&self);
    fn close_panel(&self);
    fn show_receipt(&self, receipt: &Receipt);
}

/// View for hosts without a UI; logs what would be shown
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessView;

impl CheckoutView for HeadlessView {
    fn scroll_to(&self, section: CheckoutSection) {
        tracing::debug!(?section, "scroll to section");
    }

    fn open_login(&self) {
        tracing::info!("Login required");
    }

    fn close_panel(&self) {
        tracing::debug!("Cart panel closed");
    }

    fn show_receipt(&self, receipt: &Receipt) {
        tracing::info!(order_id = %receipt.order_id, total = %receipt.total, "Receipt ready");
    }
}
