//! Swap Executor - Approve-then-Swap State Machine
//!
//! Runs one swap attempt to a terminal state:
//!
//! `Idle → CheckingAllowance → (Approving →) Submitting → Confirming
//!  → Succeeded | Failed`
//!
//! - The wallet gate runs before any chain call.
//! - Allowance is read fresh on every attempt; approval is for the exact
//!   input amount and only when the allowance is short.
//! - The swap deadline is taken from the clock at submission time.
//! - Only one attempt may be in flight; a second trigger gets `Busy`.
//! - A dropped `execute` future ends its attempt as `Failed`.
//!
//! No step is retried. An approval that succeeded before a failed swap
//! stays on-chain and is picked up by the next attempt's allowance read.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use alloy::primitives::{Address, U256};
use anyhow::{Context, anyhow};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::domain::error::SwapError;
use crate::domain::swap::{
  InclusionReceipt, SlippagePolicy, SwapAttempt, SwapCall, SwapReceipt, SwapRequest, SwapStatus,
};
use crate::domain::units::parse_units;
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::notifier::NotificationSink;
use crate::ports::wallet::{TransactionSigner, WalletSession};

/// Swap execution parameters.
#[derive(Debug, Clone, Copy)]
pub struct SwapSettings {
  /// Router contract (also the approval spender).
  pub router: Address,
  /// Seconds added to submission time for the on-chain deadline.
  pub deadline_secs: u64,
  /// Minimum-output policy.
  pub slippage: SlippagePolicy,
}

impl SwapSettings {
  /// Default on-chain deadline window.
  pub const DEFAULT_DEADLINE_SECS: u64 = 10;

  pub const fn new(router: Address) -> Self {
    Self {
      router,
      deadline_secs: Self::DEFAULT_DEADLINE_SECS,
      slippage: SlippagePolicy::Unbounded,
    }
  }

  /// Build settings from validated configuration.
  pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
    let router = config
      .network
      .router
      .parse()
      .context("Invalid router address")?;

    Ok(Self {
      router,
      deadline_secs: config.swap.deadline_secs,
      slippage: SlippagePolicy::from_bps(config.swap.slippage_bps),
    })
  }
}

/// Status reason published when an attempt is dropped mid-flight.
pub const CANCELLED_REASON: &str = "attempt cancelled";

/// Owns the busy flag for one attempt.
///
/// On drop the flag is released, and an attempt that never reached a
/// terminal status is published as `Failed` with [`CANCELLED_REASON`].
struct AttemptGuard<'a> {
  busy: &'a AtomicBool,
  status_tx: &'a watch::Sender<SwapStatus>,
}

impl<'a> AttemptGuard<'a> {
  fn acquire(busy: &'a AtomicBool, status_tx: &'a watch::Sender<SwapStatus>) -> Option<Self> {
    busy
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| Self { busy, status_tx })
  }
}

impl Drop for AttemptGuard<'_> {
  fn drop(&mut self) {
    let cancelled = self.status_tx.send_if_modified(|status| {
      if status.accepts_new_attempt() {
        return false;
      }
      *status = SwapStatus::Failed {
        reason: CANCELLED_REASON.to_string(),
      };
      true
    });
    if cancelled {
      warn!("Swap attempt dropped before completion");
    }
    self.busy.store(false, Ordering::Release);
  }
}

/// Executes swap attempts against the connected wallet.
pub struct SwapExecutor<W: WalletSession, N: NotificationSink> {
  /// Wallet session port.
  wallet: Arc<W>,
  /// User-facing notifications.
  notifier: Arc<N>,
  /// Deadline time source.
  clock: Arc<dyn Clock>,
  settings: SwapSettings,
  /// Re-entrancy guard.
  busy: AtomicBool,
  /// Observable status.
  status_tx: watch::Sender<SwapStatus>,
}

impl<W: WalletSession, N: NotificationSink> SwapExecutor<W, N> {
  /// Create an executor using the system clock.
  pub fn new(wallet: Arc<W>, notifier: Arc<N>, settings: SwapSettings) -> Self {
    Self::with_clock(wallet, notifier, settings, Arc::new(SystemClock))
  }

  /// Create an executor with a custom clock.
  pub fn with_clock(
    wallet: Arc<W>,
    notifier: Arc<N>,
    settings: SwapSettings,
    clock: Arc<dyn Clock>,
  ) -> Self {
    let (status_tx, _) = watch::channel(SwapStatus::Idle);
    Self {
      wallet,
      notifier,
      clock,
      settings,
      busy: AtomicBool::new(false),
      status_tx,
    }
  }

  /// Subscribe to status transitions.
  pub fn subscribe(&self) -> watch::Receiver<SwapStatus> {
    self.status_tx.subscribe()
  }

  /// Current status.
  pub fn status(&self) -> SwapStatus {
    self.status_tx.borrow().clone()
  }

  /// Whether an attempt is in flight.
  pub fn is_busy(&self) -> bool {
    self.busy.load(Ordering::Acquire)
  }

  /// Run one swap attempt to a terminal state.
  ///
  /// Every failure is reported to the notification sink and leaves the
  /// executor ready for the next attempt.
  #[instrument(
    skip(self, request),
    fields(pair = %request.pair, amount_in = %request.amount_in, attempt_id)
  )]
  pub async fn execute(&self, request: SwapRequest) -> Result<SwapReceipt, SwapError> {
    let Some(_guard) = AttemptGuard::acquire(&self.busy, &self.status_tx) else {
      warn!("Swap already in progress, ignoring trigger");
      return Err(SwapError::Busy);
    };

    let result = self.run(request).await;

    match &result {
      Ok(receipt) => {
        self.set_status(SwapStatus::Succeeded);
        info!(
          tx_hash = %receipt.swap.tx_hash,
          approved = receipt.approval.is_some(),
          "Swap succeeded"
        );
      }
      Err(e) => {
        let message = e.user_message();
        self.notifier.error(&message);
        self.set_status(SwapStatus::Failed {
          reason: message.clone(),
        });
        warn!(kind = e.kind(), error = %message, "Swap attempt failed");
      }
    }

    result
  }

  async fn run(&self, request: SwapRequest) -> Result<SwapReceipt, SwapError> {
    let (owner, signer) = self.gate()?;
    let attempt = self.prepare(&request, owner)?;
    tracing::Span::current().record("attempt_id", tracing::field::display(attempt.id));

    let router = self.settings.router;
    let source = attempt.pair.source().address;

    // ── CheckingAllowance ──
    self.set_status(SwapStatus::CheckingAllowance);
    let allowance = signer
      .allowance(source, owner, router)
      .await
      .context("Allowance query failed")
      .map_err(SwapError::ApprovalFailed)?;

    // ── Approving (conditional) ──
    let approval = if allowance < attempt.amount_in_base {
      debug!(%allowance, required = %attempt.amount_in_base, "Allowance short");
      Some(self.approve(signer.as_ref(), &attempt).await?)
    } else {
      debug!(%allowance, "Allowance sufficient, skipping approval");
      None
    };

    // ── Submitting ──
    self.set_status(SwapStatus::Submitting);
    self.notifier.success("Buying now");

    let deadline = self.clock.now_unix().saturating_add(self.settings.deadline_secs);
    let call = SwapCall {
      amount_in: attempt.amount_in_base,
      amount_out_min: attempt.amount_out_min,
      path: attempt.pair.path(),
      to: owner,
      deadline: U256::from(deadline),
    };

    let pending = signer
      .swap_exact_tokens_for_tokens(router, &call)
      .await
      .context("Swap submission rejected")
      .map_err(SwapError::SwapFailed)?;

    info!(tx_hash = %pending.hash, deadline, "Swap submitted");

    // ── Confirming ──
    self.set_status(SwapStatus::Confirming);
    let receipt = signer
      .wait_for_inclusion(&pending)
      .await
      .context("Swap inclusion failed")
      .map_err(SwapError::SwapFailed)?;

    if !receipt.success {
      return Err(SwapError::SwapFailed(anyhow!(
        "swap transaction {} reverted",
        receipt.tx_hash
      )));
    }

    self.notifier.success("Bought successfully");

    Ok(SwapReceipt {
      attempt_id: attempt.id,
      pair: attempt.pair,
      amount_in_base: attempt.amount_in_base,
      amount_out_min: attempt.amount_out_min,
      deadline,
      approval,
      swap: receipt,
    })
  }

  /// Wallet precondition: connected address and signer.
  fn gate(&self) -> Result<(Address, Arc<dyn TransactionSigner>), SwapError> {
    if !self.wallet.is_connected() {
      return Err(SwapError::WalletNotConnected);
    }
    let owner = self
      .wallet
      .connected_address()
      .ok_or(SwapError::WalletNotConnected)?;
    let signer = self.wallet.signer().ok_or(SwapError::WalletNotConnected)?;
    Ok((owner, signer))
  }

  /// Validate the amount and derive the minimum-output bound.
  fn prepare(&self, request: &SwapRequest, owner: Address) -> Result<SwapAttempt, SwapError> {
    let amount_in_base = parse_units(&request.amount_in, request.pair.source().decimals)
      .map_err(|e| SwapError::InvalidAmount {
        amount: request.amount_in.clone(),
        source: Some(e),
      })?;

    if amount_in_base.is_zero() {
      return Err(SwapError::InvalidAmount {
        amount: request.amount_in.clone(),
        source: None,
      });
    }

    let amount_out_min = match self.settings.slippage {
      SlippagePolicy::Unbounded => {
        warn!("Submitting with amountOutMin = 0, no slippage protection");
        U256::ZERO
      }
      policy @ SlippagePolicy::Tolerance { .. } => request
        .quote
        .as_ref()
        .filter(|q| q.matches(amount_in_base, &request.pair))
        .map(|q| policy.min_out(q.amount_out_base))
        .ok_or_else(|| {
          SwapError::quote_unavailable("no recent quote for this amount and pair")
        })?,
    };

    Ok(SwapAttempt {
      id: Uuid::new_v4(),
      amount_in_base,
      amount_out_min,
      pair: request.pair.clone(),
      owner,
    })
  }

  /// Approve the router for exactly the attempt's input amount.
  async fn approve(
    &self,
    signer: &dyn TransactionSigner,
    attempt: &SwapAttempt,
  ) -> Result<InclusionReceipt, SwapError> {
    self.set_status(SwapStatus::Approving);
    self.notifier.success("approving");

    let pending = signer
      .approve(
        attempt.pair.source().address,
        self.settings.router,
        attempt.amount_in_base,
      )
      .await
      .context("Approval rejected")
      .map_err(SwapError::ApprovalFailed)?;

    info!(tx_hash = %pending.hash, "Approval submitted");

    let receipt = signer
      .wait_for_inclusion(&pending)
      .await
      .context("Approval inclusion failed")
      .map_err(SwapError::ApprovalFailed)?;

    if !receipt.success {
      return Err(SwapError::ApprovalFailed(anyhow!(
        "approval transaction {} reverted",
        receipt.tx_hash
      )));
    }

    self.notifier.success("Approved successfully");
    Ok(receipt)
  }

  fn set_status(&self, status: SwapStatus) {
    debug!(status = %status, "Swap status");
    self.status_tx.send_replace(status);
  }
}
