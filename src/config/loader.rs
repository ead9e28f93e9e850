//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Largest token decimal scale accepted from config.
const MAX_TOKEN_DECIMALS: u8 = 36;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    name = %config.app.name,
    tokens = config.tokens.len(),
    chain_id = config.network.chain_id,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty RPC URL and a parseable router address
/// - At least two tokens with parseable, distinct addresses
/// - Sensible decimals, deadline, slippage and receipt limits
fn validate_config(config: &AppConfig) -> Result<()> {
  // Network validation
  anyhow::ensure!(
    !config.network.rpc_url.is_empty(),
    "RPC URL must not be empty"
  );
  config
    .network
    .router
    .parse::<Address>()
    .with_context(|| format!("Invalid router address {:?}", config.network.router))?;

  // Token validation
  anyhow::ensure!(
    config.tokens.len() >= 2,
    "At least two tokens must be configured, got {}",
    config.tokens.len()
  );

  for (i, token) in config.tokens.iter().enumerate() {
    anyhow::ensure!(
      !token.name.is_empty(),
      "Token {} has an empty name",
      i
    );
    anyhow::ensure!(
      token.decimals <= MAX_TOKEN_DECIMALS,
      "Token {} ({}) decimals must be <= {}, got {}",
      i,
      token.name,
      MAX_TOKEN_DECIMALS,
      token.decimals
    );
  }

  // Address parsing and uniqueness
  config.token_list()?;

  // Swap validation
  anyhow::ensure!(
    config.swap.deadline_secs > 0,
    "Swap deadline_secs must be positive"
  );
  if let Some(bps) = config.swap.slippage_bps {
    anyhow::ensure!(
      bps <= 10_000,
      "slippage_bps must be in [0, 10000], got {}",
      bps
    );
  }
  anyhow::ensure!(
    config.swap.receipt_timeout_secs > 0,
    "receipt_timeout_secs must be positive"
  );
  anyhow::ensure!(
    config.swap.receipt_poll_ms > 0,
    "receipt_poll_ms must be positive"
  );

  // Wallet validation
  anyhow::ensure!(
    !config.wallet.private_key_env.is_empty(),
    "wallet.private_key_env must not be empty"
  );

  Ok(())
}
