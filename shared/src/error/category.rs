//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Cart errors (2xxx)
    Cart,
    /// Address and delivery zone errors (3xxx)
    Address,
    /// Order errors (4xxx)
    Order,
    /// Payment errors (5xxx)
    Payment,
    /// Fee errors (6xxx)
    Fee,
    /// Network errors (7xxx)
    Network,
    /// Search errors (8xxx)
    Search,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Cart,
            3000..4000 => Self::Address,
            4000..5000 => Self::Order,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Fee,
            7000..8000 => Self::Network,
            8000..9000 => Self::Search,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Cart => "cart",
            Self::Address => "address",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Fee => "fee",
            Self::Network => "network",
            Self::Search => "search",
            Self::System => "system",
        }
    }

    /// Whether errors in this category are resolved by the user editing
    /// their input rather than by retrying.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::General | Self::Auth | Self::Cart | Self::Address | Self::Fee
        )
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
