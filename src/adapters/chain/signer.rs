//! Transaction Signer - ERC-20 and Router Writes
//!
//! Implements the `TransactionSigner` port on top of a wallet-filled
//! alloy provider: nonce, gas and chain ID are filled by the provider,
//! the transaction is signed by the local key and broadcast.
//!
//! Inclusion is detected by polling `eth_getTransactionReceipt` until
//! the receipt appears or the client-side timeout elapses.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::config::SwapConfig;
use crate::domain::swap::{InclusionReceipt, PendingTx, SwapCall};
use crate::ports::wallet::TransactionSigner;

use super::abi::{IERC20, IUniswapV2Router02};

/// Receipt polling limits.
#[derive(Debug, Clone, Copy)]
pub struct InclusionPolicy {
    /// Give up waiting after this long.
    pub timeout: Duration,
    /// Delay between receipt queries.
    pub poll_interval: Duration,
}

impl InclusionPolicy {
    pub const fn from_config(config: &SwapConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.receipt_timeout_secs),
            poll_interval: Duration::from_millis(config.receipt_poll_ms),
        }
    }
}

/// Signs and sends transactions for one account.
pub struct ChainSigner {
    /// Wallet-filled provider (type-erased).
    provider: Arc<dyn Provider + Send + Sync>,
    /// Signing account.
    from: Address,
    inclusion: InclusionPolicy,
}

impl ChainSigner {
    pub fn new(
        provider: Arc<dyn Provider + Send + Sync>,
        from: Address,
        inclusion: InclusionPolicy,
    ) -> Self {
        Self {
            provider,
            from,
            inclusion,
        }
    }

    async fn send(&self, to: Address, calldata: Vec<u8>) -> Result<PendingTx> {
        let tx = TransactionRequest::default()
            .from(self.from)
            .to(to)
            .input(Bytes::from(calldata).into());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("Transaction was not accepted")?;

        Ok(PendingTx {
            hash: *pending.tx_hash(),
        })
    }
}

#[async_trait]
impl TransactionSigner for ChainSigner {
    #[instrument(skip(self))]
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        let calldata = IERC20::allowanceCall { owner, spender }.abi_encode();

        let tx = TransactionRequest::default()
            .to(token)
            .input(Bytes::from(calldata).into());

        let output = self
            .provider
            .call(&tx)
            .await
            .context("Allowance query failed")?;

        let remaining = IERC20::allowanceCall::abi_decode_returns(&output, true)
            .context("Malformed allowance response")?
            .remaining;

        debug!(%remaining, "Allowance read");
        Ok(remaining)
    }

    #[instrument(skip(self))]
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<PendingTx> {
        let calldata = IERC20::approveCall { spender, amount }.abi_encode();
        let pending = self.send(token, calldata).await?;
        info!(tx_hash = %pending.hash, "Approval broadcast");
        Ok(pending)
    }

    #[instrument(skip(self, call), fields(deadline = %call.deadline))]
    async fn swap_exact_tokens_for_tokens(
        &self,
        router: Address,
        call: &SwapCall,
    ) -> Result<PendingTx> {
        let calldata = IUniswapV2Router02::swapExactTokensForTokensCall {
            amountIn: call.amount_in,
            amountOutMin: call.amount_out_min,
            path: call.path.clone(),
            to: call.to,
            deadline: call.deadline,
        }
        .abi_encode();

        let pending = self.send(router, calldata).await?;
        info!(tx_hash = %pending.hash, "Swap broadcast");
        Ok(pending)
    }

    #[instrument(skip(self), fields(tx_hash = %tx.hash))]
    async fn wait_for_inclusion(&self, tx: &PendingTx) -> Result<InclusionReceipt> {
        let poll = async {
            loop {
                let receipt = self
                    .provider
                    .get_transaction_receipt(tx.hash)
                    .await
                    .context("Receipt query failed")?;

                if let Some(receipt) = receipt {
                    return Ok::<_, anyhow::Error>(InclusionReceipt {
                        tx_hash: receipt.transaction_hash,
                        block_number: receipt.block_number,
                        gas_used: u64::try_from(receipt.gas_used).unwrap_or(u64::MAX),
                        success: receipt.status(),
                    });
                }

                tokio::time::sleep(self.inclusion.poll_interval).await;
            }
        };

        let receipt = tokio::time::timeout(self.inclusion.timeout, poll)
            .await
            .with_context(|| {
                format!(
                    "Transaction {} not included within {:?}",
                    tx.hash, self.inclusion.timeout
                )
            })??;

        info!(
            block = ?receipt.block_number,
            success = receipt.success,
            "Transaction included"
        );
        Ok(receipt)
    }
}
