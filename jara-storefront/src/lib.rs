//! Jara Storefront - headless checkout core
//!
//! # Overview
//!
//! The customer-facing storefront logic without a UI: cart state, money
//! math, fee calculation, payments, address verification, the checkout
//! state machine and business search. Hosts plug in a renderer through
//! [`CheckoutView`], [`Notifier`] and [`PaymentWidget`].
//!
//! # Module layout
//!
//! ```text
//! jara-storefront/src/
//! ├── cart/        # Reducer, store, totals
//! ├── fees.rs      # Delivery/service fee calculator
//! ├── payment/     # Wallet + provider payments, order submission
//! ├── address/     # Selection, zone verification, recent cache
//! ├── checkout/    # Place order / save for later orchestration
//! ├── search/      # Business search and voice keywords
//! ├── storage.rs   # Device and session persistence
//! └── logger.rs    # tracing setup
//! ```

pub mod address;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fees;
pub mod logger;
pub mod notify;
pub mod payment;
pub mod search;
pub mod storage;

pub use auth::AuthState;
pub use cart::{CartAction, CartStore, OrderTotals};
pub use checkout::{CheckoutDeps, CheckoutOrchestrator, CheckoutView, HeadlessView};
pub use config::StorefrontConfig;
pub use error::{AddressError, CheckoutError, SearchError, StorageError};
pub use fees::{FeeCalculator, FeeState};
pub use logger::{init_logger, init_logger_with_file};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use payment::{PaymentProcessor, PaymentWidget, UnifiedPaymentService};
pub use storage::Storage;
