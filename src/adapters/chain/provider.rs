//! RPC Provider - alloy-rs 0.9 Connection Management
//!
//! Read-only connection used for quotes. Validates RPC connectivity
//! and the chain ID at startup and exposes a type-erased provider
//! shared by the read adapters.
//!
//! `on_builtin` yields a `BoxTransport` provider, which is what the
//! default `dyn Provider` expects.

use std::sync::Arc;

use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::NetworkConfig;

/// Shared read-only RPC provider backed by alloy-rs 0.9.
pub struct ChainProvider {
    /// The alloy provider (type-erased).
    provider: Arc<dyn Provider + Send + Sync>,
    /// Chain ID confirmed at connect time.
    chain_id: u64,
}

impl ChainProvider {
    /// Connect to the RPC endpoint and validate the chain ID.
    #[instrument(skip_all)]
    pub async fn connect(config: &NetworkConfig) -> Result<Self> {
        let provider = ProviderBuilder::new()
            .on_builtin(&config.rpc_url)
            .await
            .context("Failed to connect to RPC endpoint")?;

        let provider: Arc<dyn Provider + Send + Sync> = Arc::new(provider);
        let chain_id = validate_chain_id(provider.as_ref(), config.chain_id).await?;

        info!(chain_id, "Connected to RPC");

        Ok(Self { provider, chain_id })
    }

    /// Get a shared reference to the alloy provider (type-erased).
    pub fn inner(&self) -> Arc<dyn Provider + Send + Sync> {
        Arc::clone(&self.provider)
    }

    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Check if the RPC connection is healthy via a lightweight call.
    pub async fn is_healthy(&self) -> bool {
        self.provider.get_block_number().await.is_ok()
    }
}

/// Query the node's chain ID and compare it with the configured one.
pub(super) async fn validate_chain_id(
    provider: &(dyn Provider + Send + Sync),
    expected: u64,
) -> Result<u64> {
    let chain_id = provider
        .get_chain_id()
        .await
        .context("Failed to query chain ID")?;

    if chain_id != expected {
        anyhow::bail!("Expected chain_id={expected}, node reports {chain_id}");
    }

    Ok(chain_id)
}
