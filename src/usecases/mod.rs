//! Use Cases Layer - Quote and Swap Workflows
//!
//! Orchestrates domain logic with port interfaces.
//!
//! Use cases:
//! - `QuoteEngine`: Sequence-guarded router estimates
//! - `SwapExecutor`: Allowance check, conditional approval, swap
//! - `SwapForm`: User input state and pair-invariant change handlers

pub mod quote_engine;
pub mod swap_executor;
pub mod swap_form;

pub use quote_engine::QuoteEngine;
pub use swap_executor::{SwapExecutor, SwapSettings};
pub use swap_form::SwapForm;
