//! Quote Engine - Router Output Estimates
//!
//! Turns (amount, pair) into an output estimate via the router's
//! `getAmountsOut`. Re-run on every input change; responses may arrive
//! out of order, so every query takes a ticket and only the most
//! recently issued ticket may replace the displayed estimate.
//!
//! Failure policy: a failed query for the latest ticket reports
//! `QuoteUnavailable` and keeps the previous estimate in place.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::U256;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::SwapError;
use crate::domain::swap::{Quote, QuoteOutcome};
use crate::domain::token::SwapPair;
use crate::domain::units::{format_units, parse_units};
use crate::ports::router::RouterQuoter;

/// Sequence-guarded quote computation.
pub struct QuoteEngine<R: RouterQuoter> {
  router: Arc<R>,
  /// Last ticket handed out.
  issued: AtomicU64,
  /// Displayed estimate.
  latest: RwLock<Option<Quote>>,
}

impl<R: RouterQuoter> QuoteEngine<R> {
  pub fn new(router: Arc<R>) -> Self {
    Self {
      router,
      issued: AtomicU64::new(0),
      latest: RwLock::new(None),
    }
  }

  /// Compute the output estimate for `amount_in` over `pair`.
  ///
  /// Zero, empty or unparsable input is not an error: nothing is
  /// queried, the shown estimate is kept and `Skipped` is returned.
  /// It still takes a ticket, so older queries in flight are discarded.
  #[instrument(skip(self, pair), fields(pair = %pair, ticket))]
  pub async fn get_quote(
    &self,
    amount_in: &str,
    pair: &SwapPair,
  ) -> Result<QuoteOutcome, SwapError> {
    // Taken before the skip check: clearing the input also supersedes
    // queries still in flight.
    let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
    tracing::Span::current().record("ticket", ticket);

    let amount_in_base = match parse_units(amount_in, pair.source().decimals) {
      Ok(value) if !value.is_zero() => value,
      Ok(_) => {
        debug!("Zero amount, nothing to quote");
        return Ok(QuoteOutcome::Skipped);
      }
      Err(e) => {
        debug!(error = %e, "Unparsable amount, nothing to quote");
        return Ok(QuoteOutcome::Skipped);
      }
    };

    let result = self
      .router
      .get_amounts_out(amount_in_base, &pair.path())
      .await;

    // Hold the write lock across the freshness check so two completions
    // cannot interleave between check and store.
    let mut latest = self.latest.write().await;

    if !self.is_latest(ticket) {
      debug!(
        latest = self.issued.load(Ordering::SeqCst),
        "Discarding superseded quote response"
      );
      return Ok(QuoteOutcome::Superseded { ticket });
    }

    let amounts = result.map_err(|e| {
      warn!(error = %e, "Router quote failed, keeping previous estimate");
      SwapError::quote_failed("router query failed", e)
    })?;

    let Some(&amount_out_base) = amounts.last() else {
      warn!("Router returned no amounts");
      return Err(SwapError::quote_unavailable("router returned no amounts"));
    };

    let quote = Quote {
      ticket,
      amount_in: amount_in.trim().to_string(),
      amount_in_base,
      amount_out: format_units(amount_out_base, pair.target().decimals),
      amount_out_base,
      pair: pair.clone(),
    };

    info!(
      amount_in = %quote.amount_in,
      amount_out = %quote.amount_out,
      "Quote updated"
    );

    *latest = Some(quote.clone());
    Ok(QuoteOutcome::Applied(quote))
  }

  /// The currently displayed estimate, if any.
  pub async fn latest_quote(&self) -> Option<Quote> {
    self.latest.read().await.clone()
  }

  /// Displayed output amount, if any.
  pub async fn amount_out(&self) -> Option<String> {
    self
      .latest
      .read()
      .await
      .as_ref()
      .map(|q| q.amount_out.clone())
  }

  /// Latest estimate only if it was computed for exactly these inputs.
  pub async fn quote_for(&self, amount_in_base: U256, pair: &SwapPair) -> Option<Quote> {
    self
      .latest
      .read()
      .await
      .as_ref()
      .filter(|q| q.matches(amount_in_base, pair))
      .cloned()
  }

  fn is_latest(&self, ticket: u64) -> bool {
    self.issued.load(Ordering::SeqCst) == ticket
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use alloy::primitives::Address;
  use async_trait::async_trait;

  use crate::domain::token::{Token, TokenList};

  struct FixedRouter(Vec<U256>);

  #[async_trait]
  impl RouterQuoter for FixedRouter {
    async fn get_amounts_out(
      &self,
      _amount_in: U256,
      _path: &[alloy::primitives::Address],
    ) -> anyhow::Result<Vec<U256>> {
      Ok(self.0.clone())
    }
  }

  fn pair() -> SwapPair {
    TokenList::new(vec![
      Token::new("TKA", Address::repeat_byte(0xaa)),
      Token::new("TKB", Address::repeat_byte(0xbb)),
    ])
    .unwrap()
    .default_pair()
  }

  #[tokio::test]
  async fn test_empty_amounts_is_quote_unavailable() {
    let engine = QuoteEngine::new(Arc::new(FixedRouter(vec![])));
    let err = engine.get_quote("1", &pair()).await.unwrap_err();
    assert!(matches!(err, SwapError::QuoteUnavailable { .. }));
    assert!(engine.latest_quote().await.is_none());
  }

  #[tokio::test]
  async fn test_quote_for_requires_matching_inputs() {
    let engine = QuoteEngine::new(Arc::new(FixedRouter(vec![
      U256::from(1u8),
      U256::from(2u8),
    ])));
    let pair = pair();
    engine.get_quote("0.000000000000000001", &pair).await.unwrap();

    assert!(engine.quote_for(U256::from(1u8), &pair).await.is_some());
    assert!(engine.quote_for(U256::from(2u8), &pair).await.is_none());
    assert_eq!(engine.amount_out().await.as_deref(), Some("0.000000000000000002"));
  }
}
