//! Wallet Port - Session and Signing Interface
//!
//! The wallet session is external, process-wide state (connect and
//! disconnect happen elsewhere). The swap executor only reads three
//! facts from it: the connected address, whether it is connected, and
//! a signing-capable provider.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::swap::{InclusionReceipt, PendingTx, SwapCall};

/// Connected wallet session.
pub trait WalletSession: Send + Sync + 'static {
  /// Address of the connected account, if any.
  fn connected_address(&self) -> Option<Address>;

  /// Whether a wallet is connected.
  fn is_connected(&self) -> bool;

  /// Signing-capable provider for the connected account.
  fn signer(&self) -> Option<Arc<dyn TransactionSigner>>;
}

/// Contract calls made on behalf of the connected account.
///
/// Write methods return as soon as the transaction is accepted by the
/// node (or rejected by the signer). Inclusion is awaited separately
/// through [`TransactionSigner::wait_for_inclusion`].
#[async_trait]
pub trait TransactionSigner: Send + Sync {
  /// ERC-20 `allowance(owner, spender)` on `token`.
  async fn allowance(
    &self,
    token: Address,
    owner: Address,
    spender: Address,
  ) -> anyhow::Result<U256>;

  /// ERC-20 `approve(spender, amount)` on `token`.
  async fn approve(
    &self,
    token: Address,
    spender: Address,
    amount: U256,
  ) -> anyhow::Result<PendingTx>;

  /// Router `swapExactTokensForTokens`.
  async fn swap_exact_tokens_for_tokens(
    &self,
    router: Address,
    call: &SwapCall,
  ) -> anyhow::Result<PendingTx>;

  /// Wait until `tx` is mined. A mined-but-reverted transaction is
  /// returned with `success == false`; timeouts are errors.
  async fn wait_for_inclusion(&self, tx: &PendingTx) -> anyhow::Result<InclusionReceipt>;
}
