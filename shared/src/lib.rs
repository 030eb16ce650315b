//! Shared types for the Jara storefront
//!
//! Domain types used across the HTTP client and the storefront core:
//! cart, location, fees, payment, order and search models, plus the
//! unified error codes every user-facing notification carries.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::*;
