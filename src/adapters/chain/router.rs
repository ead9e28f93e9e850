//! Router Contract - `RouterQuoter` over `eth_call`
//!
//! Quotes never need a signer: `getAmountsOut` is executed as a plain
//! call against the shared read-only provider.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::ports::router::RouterQuoter;

use super::abi::IUniswapV2Router02;

/// Read-only router binding.
pub struct RouterContract {
    provider: Arc<dyn Provider + Send + Sync>,
    address: Address,
}

impl RouterContract {
    pub fn new(provider: Arc<dyn Provider + Send + Sync>, address: Address) -> Self {
        Self { provider, address }
    }

    pub const fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl RouterQuoter for RouterContract {
    #[instrument(skip(self, path), fields(router = %self.address, hops = path.len()))]
    async fn get_amounts_out(&self, amount_in: U256, path: &[Address]) -> Result<Vec<U256>> {
        let calldata = IUniswapV2Router02::getAmountsOutCall {
            amountIn: amount_in,
            path: path.to_vec(),
        }
        .abi_encode();

        let tx = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(calldata).into());

        let output = self
            .provider
            .call(&tx)
            .await
            .context("getAmountsOut call failed")?;

        let amounts = IUniswapV2Router02::getAmountsOutCall::abi_decode_returns(&output, true)
            .context("Malformed getAmountsOut response")?
            .amounts;

        debug!(amounts = ?amounts, "Router quote");
        Ok(amounts)
    }
}
