//! Domain layer - Tokens, amounts, quotes and swap state.
//!
//! Pure data and arithmetic: nothing here performs I/O. Chain types
//! (`Address`, `U256`) come from `alloy::primitives` so values cross the
//! ports boundary without conversion.

pub mod error;
pub mod swap;
pub mod token;
pub mod units;

// Re-export core types for convenience
pub use error::SwapError;
pub use swap::{
    InclusionReceipt, PendingTx, Quote, QuoteOutcome, SlippagePolicy, SwapAttempt, SwapCall,
    SwapReceipt, SwapRequest, SwapStatus,
};
pub use token::{SwapPair, Token, TokenList};
