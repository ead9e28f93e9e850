//! DEX Swap Client - Entry Point
//!
//! Wiring sequence:
//! 1. Parse CLI + load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build the token list and the swap form (default pair = tokens 0, 1)
//! 4. Connect the read-only RPC provider and the router binding
//! 5. Quote the current inputs
//! 6. (swap) Resolve the wallet session from the env, run the executor,
//!    print the receipt as JSON

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use dex_swap_client::adapters::chain::{ChainProvider, LocalWalletSession, RouterContract};
use dex_swap_client::adapters::notify::TracingNotifier;
use dex_swap_client::config::{self, AppConfig};
use dex_swap_client::domain::swap::QuoteOutcome;
use dex_swap_client::usecases::{QuoteEngine, SwapExecutor, SwapForm, SwapSettings};

#[derive(Parser)]
#[command(name = "dex-swap")]
#[command(about = "Quote and swap tokens through a Uniswap-V2-style router", version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, short, default_value = "config.toml", env = "SWAP_CONFIG")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the configured tokens
    Tokens,
    /// Estimate the output amount for a swap
    Quote(SwapArgs),
    /// Approve (if needed) and swap
    Swap(SwapArgs),
}

#[derive(Args)]
struct SwapArgs {
    /// Input amount in source-token units (e.g. "10" or "0.5")
    #[arg(long)]
    amount: String,
    /// Source token name or address (defaults to the first token)
    #[arg(long)]
    from: Option<String>,
    /// Target token name or address (defaults to the second token)
    #[arg(long)]
    to: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── 1. Load configuration ───────────────────────────────
    let config = config::loader::load_config(&cli.config)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        chain_id = config.network.chain_id,
        "Starting swap client"
    );

    // ── 3. Token list + form ────────────────────────────────
    let mut form = SwapForm::new(config.token_list()?);

    match cli.command {
        Command::Tokens => {
            for (i, token) in form.tokens().tokens().iter().enumerate() {
                println!("{i}\t{}\t{}\t{}", token.name, token.address, token.decimals);
            }
            Ok(())
        }
        Command::Quote(args) => {
            apply_args(&mut form, &args)?;
            let engine = connect_quotes(&config).await?;
            run_quote(&mut form, &engine).await
        }
        Command::Swap(args) => {
            apply_args(&mut form, &args)?;
            let engine = connect_quotes(&config).await?;
            run_swap(&config, &mut form, &engine).await
        }
    }
}

/// Apply CLI selections through the form's change handlers.
fn apply_args(form: &mut SwapForm, args: &SwapArgs) -> Result<()> {
    if let Some(from) = &args.from {
        form.select_source(from)?;
    }
    if let Some(to) = &args.to {
        form.select_target(to)?;
    }
    form.set_amount_in(args.amount.clone());
    Ok(())
}

/// Connect the read-only provider and build the quote engine.
async fn connect_quotes(config: &AppConfig) -> Result<QuoteEngine<RouterContract>> {
    let provider = ChainProvider::connect(&config.network).await?;
    let settings = SwapSettings::from_config(config)?;
    let router = RouterContract::new(provider.inner(), settings.router);
    Ok(QuoteEngine::new(Arc::new(router)))
}

async fn run_quote(form: &mut SwapForm, engine: &QuoteEngine<RouterContract>) -> Result<()> {
    match form.refresh(engine).await {
        Ok(QuoteOutcome::Applied(quote)) => {
            println!(
                "{} {} -> {} {}",
                quote.amount_in,
                form.pair().source().name,
                quote.amount_out,
                form.pair().target().name
            );
            Ok(())
        }
        Ok(QuoteOutcome::Skipped) => {
            println!("Nothing to quote for amount {:?}", form.amount_in());
            Ok(())
        }
        Ok(QuoteOutcome::Superseded { .. }) => Ok(()),
        Err(e) => {
            error!(error = %e.user_message(), "Quote failed");
            Err(e.into())
        }
    }
}

async fn run_swap(
    config: &AppConfig,
    form: &mut SwapForm,
    engine: &QuoteEngine<RouterContract>,
) -> Result<()> {
    // A failed quote only matters when the slippage bound needs it;
    // the executor reports that case itself.
    match form.refresh(engine).await {
        Ok(_) => {
            if let Some(out) = form.amount_out() {
                info!(amount_out = out, stale = form.is_stale(), "Estimate before swap");
            }
        }
        Err(e) => warn!(error = %e.user_message(), "No estimate before swap"),
    }

    let wallet = LocalWalletSession::from_env(&config.wallet, &config.network, &config.swap).await?;
    let executor = SwapExecutor::new(
        Arc::new(wallet),
        Arc::new(TracingNotifier),
        SwapSettings::from_config(config)?,
    );

    // Log status transitions until the executor is dropped.
    let mut status_rx = executor.subscribe();
    let status_task = tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let status = status_rx.borrow_and_update().clone();
            info!(status = %status, "Swap status changed");
        }
    });

    let result = executor.execute(form.request(engine).await).await;

    drop(executor);
    if let Err(e) = status_task.await {
        warn!(error = %e, "Status logger task failed");
    }

    let receipt = result?;
    println!(
        "{}",
        serde_json::to_string_pretty(&receipt).context("Failed to encode receipt")?
    );
    Ok(())
}
