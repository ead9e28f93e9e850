//! Chain Adapters - EVM Interaction Layer
//!
//! Provides on-chain access via alloy-rs 0.9 for:
//! - RPC provider management with chain ID validation
//! - Router quotes (`getAmountsOut`) over `eth_call`
//! - ERC-20 allowance/approve and router swaps via a local signer
//! - Receipt polling for inclusion

pub mod abi;
pub mod provider;
pub mod router;
pub mod signer;
pub mod wallet;

pub use provider::ChainProvider;
pub use router::RouterContract;
pub use signer::{ChainSigner, InclusionPolicy};
pub use wallet::LocalWalletSession;
