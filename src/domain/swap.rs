//! Quote and swap execution types.
//!
//! Quotes are ephemeral estimates owned by the quote engine. A swap
//! goes from a user-level [`SwapRequest`] to an executor-owned
//! [`SwapAttempt`] once the wallet gate has passed, and ends in a
//! [`SwapReceipt`] or a `SwapError`.

use std::fmt;

use alloy::primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::SwapPair;

/// Basis-point denominator (100% = 10 000 bps).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Router output estimate for a given input and pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Sequence ticket of the computation that produced this quote.
    pub ticket: u64,
    /// Input as entered by the user.
    pub amount_in: String,
    /// Input in source-token base units.
    pub amount_in_base: U256,
    /// Estimated output formatted at target-token decimals.
    pub amount_out: String,
    /// Estimated output in target-token base units.
    pub amount_out_base: U256,
    pub pair: SwapPair,
}

impl Quote {
    /// Whether this quote was computed for exactly this input and pair.
    pub fn matches(&self, amount_in_base: U256, pair: &SwapPair) -> bool {
        self.amount_in_base == amount_in_base && &self.pair == pair
    }
}

/// Result of a quote request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// Input was zero, empty or unparsable; nothing was queried.
    Skipped,
    /// The quote is now the displayed estimate.
    Applied(Quote),
    /// A newer request was issued while this one was in flight.
    Superseded { ticket: u64 },
}

/// How the swap's minimum-output bound is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlippagePolicy {
    /// `amountOutMin = 0`. No slippage protection at all.
    #[default]
    Unbounded,
    /// Latest matching quote minus `bps` basis points.
    Tolerance { bps: u32 },
}

impl SlippagePolicy {
    pub fn from_bps(bps: Option<u32>) -> Self {
        bps.map_or(Self::Unbounded, |bps| Self::Tolerance { bps })
    }

    /// Minimum acceptable output for a quoted output amount.
    pub fn min_out(self, quoted_out: U256) -> U256 {
        match self {
            Self::Unbounded => U256::ZERO,
            Self::Tolerance { bps } => {
                let keep = BPS_DENOMINATOR.saturating_sub(bps);
                quoted_out * U256::from(keep) / U256::from(BPS_DENOMINATOR)
            }
        }
    }
}

/// The user's intent to swap, before the wallet gate.
#[derive(Debug, Clone)]
pub struct SwapRequest {
    pub amount_in: String,
    pub pair: SwapPair,
    /// Latest estimate shown to the user, needed for bounded slippage.
    pub quote: Option<Quote>,
}

impl SwapRequest {
    pub fn new(amount_in: impl Into<String>, pair: SwapPair) -> Self {
        Self {
            amount_in: amount_in.into(),
            pair,
            quote: None,
        }
    }

    #[must_use]
    pub fn with_quote(mut self, quote: Option<Quote>) -> Self {
        self.quote = quote;
        self
    }
}

/// Executor-owned context of one swap, created after the wallet gate.
#[derive(Debug, Clone)]
pub struct SwapAttempt {
    pub id: Uuid,
    pub amount_in_base: U256,
    pub amount_out_min: U256,
    pub pair: SwapPair,
    pub owner: Address,
}

/// Arguments of `swapExactTokensForTokens`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCall {
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: Vec<Address>,
    pub to: Address,
    pub deadline: U256,
}

/// Handle to a submitted, not yet included transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTx {
    pub hash: TxHash,
}

/// Outcome of waiting for a transaction's inclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InclusionReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// `false` when the transaction was mined but reverted.
    pub success: bool,
}

/// Terminal result of a successful swap.
#[derive(Debug, Clone, Serialize)]
pub struct SwapReceipt {
    pub attempt_id: Uuid,
    pub pair: SwapPair,
    pub amount_in_base: U256,
    pub amount_out_min: U256,
    pub deadline: u64,
    /// Present only when an approval was needed.
    pub approval: Option<InclusionReceipt>,
    pub swap: InclusionReceipt,
}

/// Observable swap executor state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SwapStatus {
    #[default]
    Idle,
    CheckingAllowance,
    Approving,
    Submitting,
    Confirming,
    Succeeded,
    Failed { reason: String },
}

impl SwapStatus {
    /// Idle and terminal states accept a new attempt.
    pub const fn accepts_new_attempt(&self) -> bool {
        matches!(self, Self::Idle | Self::Succeeded | Self::Failed { .. })
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::CheckingAllowance => write!(f, "checking_allowance"),
            Self::Approving => write!(f, "approving"),
            Self::Submitting => write!(f, "submitting"),
            Self::Confirming => write!(f, "confirming"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}
