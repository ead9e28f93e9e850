//! Configuration Module - TOML-based Client Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Router and token addresses are externalized here - nothing is
//! hardcoded in the domain layer. The signer key is never stored in
//! the file; only the name of the env var holding it.

pub mod loader;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::token::{DEFAULT_DECIMALS, Token, TokenList};

/// Top-level client configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any RPC connection is made.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Client identity and logging.
  pub app: ClientConfig,
  /// RPC endpoint and router contract.
  pub network: NetworkConfig,
  /// Ordered token list; entries 0 and 1 are the default pair.
  pub tokens: Vec<TokenConfig>,
  /// Swap execution parameters.
  #[serde(default)]
  pub swap: SwapConfig,
  /// Signer configuration.
  #[serde(default)]
  pub wallet: WalletConfig,
}

impl AppConfig {
  /// Build the validated token list.
  pub fn token_list(&self) -> Result<TokenList> {
    let tokens = self
      .tokens
      .iter()
      .map(|t| {
        Ok(Token {
          address: t
            .address
            .parse()
            .with_context(|| format!("Invalid address for token {}", t.name))?,
          name: t.name.clone(),
          decimals: t.decimals,
        })
      })
      .collect::<Result<Vec<_>>>()?;

    TokenList::new(tokens).context("Invalid token list")
  }
}

/// Client identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
  /// Human-readable client name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
  /// JSON-RPC endpoint.
  pub rpc_url: String,
  /// Expected chain ID (validated against the node at startup).
  pub chain_id: u64,
  /// Uniswap-V2-style router address.
  pub router: String,
}

/// Single token list entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
  /// Display label.
  pub name: String,
  /// ERC-20 contract address.
  pub address: String,
  /// Base-unit scale.
  #[serde(default = "default_decimals")]
  pub decimals: u8,
}

/// Swap execution configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapConfig {
  /// Seconds between submission and the on-chain deadline.
  #[serde(default = "default_deadline")]
  pub deadline_secs: u64,
  /// Slippage tolerance in basis points. Absent = no minimum output.
  #[serde(default)]
  pub slippage_bps: Option<u32>,
  /// Client-side limit on waiting for a transaction's inclusion.
  #[serde(default = "default_receipt_timeout")]
  pub receipt_timeout_secs: u64,
  /// Receipt polling interval (milliseconds).
  #[serde(default = "default_receipt_poll")]
  pub receipt_poll_ms: u64,
}

impl Default for SwapConfig {
  fn default() -> Self {
    Self {
      deadline_secs: default_deadline(),
      slippage_bps: None,
      receipt_timeout_secs: default_receipt_timeout(),
      receipt_poll_ms: default_receipt_poll(),
    }
  }
}

/// Signer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
  /// Env var holding the hex private key. Unset = wallet not connected.
  #[serde(default = "default_private_key_env")]
  pub private_key_env: String,
}

impl Default for WalletConfig {
  fn default() -> Self {
    Self {
      private_key_env: default_private_key_env(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

const fn default_decimals() -> u8 {
  DEFAULT_DECIMALS
}

const fn default_deadline() -> u64 {
  10
}

const fn default_receipt_timeout() -> u64 {
  120
}

const fn default_receipt_poll() -> u64 {
  1_000
}

fn default_private_key_env() -> String {
  "SWAP_PRIVATE_KEY".to_string()
}
