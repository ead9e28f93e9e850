//! Swap error taxonomy.
//!
//! Every failure of a user-triggered action maps to one of these
//! variants. They are reported to the notification sink and never
//! escape as panics.

use thiserror::Error;

use super::units::UnitsError;

/// Failure of a quote or swap action.
#[derive(Debug, Error)]
pub enum SwapError {
    /// No connected address or no signer.
    #[error("Wallet is not connected!")]
    WalletNotConnected,

    /// The router could not produce an estimate (no pool, RPC failure)
    /// or no usable quote exists for a slippage-bounded swap.
    #[error("quote unavailable: {reason}")]
    QuoteUnavailable {
        reason: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Allowance read, approval signing, revert or inclusion timeout.
    #[error("approval failed")]
    ApprovalFailed(#[source] anyhow::Error),

    /// Swap signing, revert (including deadline expiry) or inclusion timeout.
    #[error("swap failed")]
    SwapFailed(#[source] anyhow::Error),

    /// Another attempt is still in flight.
    #[error("a swap is already in progress")]
    Busy,

    /// The requested amount is zero or not a valid decimal.
    #[error("invalid amount {amount:?}")]
    InvalidAmount {
        amount: String,
        #[source]
        source: Option<UnitsError>,
    },
}

impl SwapError {
    pub fn quote_unavailable(reason: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn quote_failed(reason: impl Into<String>, source: anyhow::Error) -> Self {
        Self::QuoteUnavailable {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// User-facing message including the root cause, for notifications.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApprovalFailed(cause) | Self::SwapFailed(cause) => {
                format!("{self}: {cause:#}")
            }
            Self::QuoteUnavailable {
                source: Some(cause),
                ..
            } => format!("{self}: {cause:#}"),
            _ => self.to_string(),
        }
    }

    /// Short machine-readable label for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::WalletNotConnected => "wallet_not_connected",
            Self::QuoteUnavailable { .. } => "quote_unavailable",
            Self::ApprovalFailed(_) => "approval_failed",
            Self::SwapFailed(_) => "swap_failed",
            Self::Busy => "busy",
            Self::InvalidAmount { .. } => "invalid_amount",
        }
    }
}
