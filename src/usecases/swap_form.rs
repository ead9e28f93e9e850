//! Swap Form - Input State and Change Handlers
//!
//! Holds what the user has entered (amount and pair) plus the estimate
//! last shown for it. Every change handler preserves the pair
//! invariant and marks the estimate stale until the next applied quote
//! for the current inputs.

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::domain::error::SwapError;
use crate::domain::swap::{QuoteOutcome, SwapRequest};
use crate::domain::token::{SwapPair, Token, TokenList};
use crate::domain::units::parse_units;
use crate::ports::router::RouterQuoter;

use super::quote_engine::QuoteEngine;

/// User input for one swap.
#[derive(Debug, Clone)]
pub struct SwapForm {
  tokens: TokenList,
  pair: SwapPair,
  amount_in: String,
  /// Last estimate shown; kept across skipped and failed quotes.
  amount_out: Option<String>,
  stale: bool,
}

impl SwapForm {
  /// Start with amount "0" and the list's default pair.
  pub fn new(tokens: TokenList) -> Self {
    let pair = tokens.default_pair();
    Self {
      tokens,
      pair,
      amount_in: "0".to_string(),
      amount_out: None,
      stale: true,
    }
  }

  pub const fn tokens(&self) -> &TokenList {
    &self.tokens
  }

  pub const fn pair(&self) -> &SwapPair {
    &self.pair
  }

  pub fn amount_in(&self) -> &str {
    &self.amount_in
  }

  pub fn amount_out(&self) -> Option<&str> {
    self.amount_out.as_deref()
  }

  /// Whether the shown estimate was computed for different inputs.
  pub const fn is_stale(&self) -> bool {
    self.stale
  }

  pub fn set_amount_in(&mut self, amount: impl Into<String>) {
    let amount = amount.into();
    if amount != self.amount_in {
      self.amount_in = amount;
      self.stale = true;
    }
  }

  /// Select the source token by name or address.
  pub fn select_source(&mut self, key: &str) -> Result<()> {
    let token = self.lookup(key)?;
    let before = self.pair.clone();
    self.pair.select_source(&self.tokens, &token);
    self.mark_if_changed(&before);
    Ok(())
  }

  /// Select the target token by name or address.
  pub fn select_target(&mut self, key: &str) -> Result<()> {
    let token = self.lookup(key)?;
    let before = self.pair.clone();
    self.pair.select_target(&self.tokens, &token);
    self.mark_if_changed(&before);
    Ok(())
  }

  /// Re-run the quote for the current inputs.
  ///
  /// Only an applied quote for exactly the current amount and pair
  /// replaces the shown estimate.
  pub async fn refresh<R: RouterQuoter>(
    &mut self,
    engine: &QuoteEngine<R>,
  ) -> Result<QuoteOutcome, SwapError> {
    let outcome = engine.get_quote(&self.amount_in, &self.pair).await?;

    if let QuoteOutcome::Applied(quote) = &outcome {
      let current = parse_units(&self.amount_in, self.pair.source().decimals).ok();
      if current.is_some_and(|amount| quote.matches(amount, &self.pair)) {
        self.amount_out = Some(quote.amount_out.clone());
        self.stale = false;
      }
    }

    Ok(outcome)
  }

  /// Swap intent for the current inputs, carrying the estimate when fresh.
  pub async fn request<R: RouterQuoter>(&self, engine: &QuoteEngine<R>) -> SwapRequest {
    let quote = match parse_units(&self.amount_in, self.pair.source().decimals) {
      Ok(amount) => engine.quote_for(amount, &self.pair).await,
      Err(_) => None,
    };
    SwapRequest::new(self.amount_in.clone(), self.pair.clone()).with_quote(quote)
  }

  fn lookup(&self, key: &str) -> Result<Token> {
    self
      .tokens
      .find(key)
      .cloned()
      .ok_or_else(|| anyhow!("Unknown token {key:?}"))
  }

  fn mark_if_changed(&mut self, before: &SwapPair) {
    if &self.pair != before {
      debug!(pair = %self.pair, "Pair changed");
      self.stale = true;
    }
  }
}
