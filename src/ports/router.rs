//! Router Port - Read-only Quote Interface
//!
//! The quote path never needs a signature: it is a plain `eth_call`
//! against the router's `getAmountsOut`.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

/// Read-only access to a Uniswap-V2-style router.
#[async_trait]
pub trait RouterQuoter: Send + Sync + 'static {
  /// Amounts along `path` for an exact `amount_in`.
  ///
  /// The returned sequence has one entry per path element; the last
  /// entry is the output amount. Reverts (e.g. no pool for the pair)
  /// surface as errors.
  async fn get_amounts_out(
    &self,
    amount_in: U256,
    path: &[Address],
  ) -> anyhow::Result<Vec<U256>>;
}
