//! Local Wallet Session - Private-key Backed `WalletSession`
//!
//! The session is resolved once at startup: if the configured env var
//! holds a key, the wallet is connected and exposes a `ChainSigner`;
//! otherwise the session is disconnected and every swap fails the
//! wallet gate.

use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::config::{NetworkConfig, SwapConfig, WalletConfig};
use crate::ports::wallet::{TransactionSigner, WalletSession};

use super::provider::validate_chain_id;
use super::signer::{ChainSigner, InclusionPolicy};

/// Connected account and its signer.
struct Connection {
    address: Address,
    signer: Arc<ChainSigner>,
}

/// Wallet session backed by a local private key.
pub struct LocalWalletSession {
    connection: Option<Connection>,
}

impl LocalWalletSession {
    /// A session with no connected account.
    pub const fn disconnected() -> Self {
        Self { connection: None }
    }

    /// Connect using the key from the env var named in `wallet`.
    ///
    /// A missing env var yields a disconnected session; a present but
    /// invalid key, or a chain ID mismatch, is an error.
    #[instrument(skip_all)]
    pub async fn from_env(
        wallet: &WalletConfig,
        network: &NetworkConfig,
        swap: &SwapConfig,
    ) -> Result<Self> {
        let Ok(key) = std::env::var(&wallet.private_key_env) else {
            warn!(
                env = %wallet.private_key_env,
                "No signer key in environment, wallet not connected"
            );
            return Ok(Self::disconnected());
        };

        let signer: PrivateKeySigner = key
            .trim()
            .parse()
            .with_context(|| format!("Invalid private key in {}", wallet.private_key_env))?;

        Self::connect(signer, network, swap).await
    }

    /// Connect a session for `signer`.
    pub async fn connect(
        signer: PrivateKeySigner,
        network: &NetworkConfig,
        swap: &SwapConfig,
    ) -> Result<Self> {
        let address = signer.address();

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_builtin(&network.rpc_url)
            .await
            .context("Failed to connect signing provider")?;

        let provider: Arc<dyn Provider + Send + Sync> = Arc::new(provider);
        validate_chain_id(provider.as_ref(), network.chain_id).await?;

        let signer = ChainSigner::new(provider, address, InclusionPolicy::from_config(swap));

        info!(%address, "Wallet connected");

        Ok(Self {
            connection: Some(Connection {
                address,
                signer: Arc::new(signer),
            }),
        })
    }
}

impl WalletSession for LocalWalletSession {
    fn connected_address(&self) -> Option<Address> {
        self.connection.as_ref().map(|c| c.address)
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn signer(&self) -> Option<Arc<dyn TransactionSigner>> {
        self.connection
            .as_ref()
            .map(|c| Arc::clone(&c.signer) as Arc<dyn TransactionSigner>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_session_exposes_nothing() {
        let session = LocalWalletSession::disconnected();
        assert!(!session.is_connected());
        assert!(session.connected_address().is_none());
        assert!(session.signer().is_none());
    }
}
