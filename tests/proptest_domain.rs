//! Property-Based Tests - Domain Layer Invariants
//!
//! Uses `proptest` to verify that the pair, unit conversion and quote
//! skip rules hold across random inputs.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy::primitives::{Address, U256};
use proptest::prelude::*;

use dex_swap_client::domain::swap::QuoteOutcome;
use dex_swap_client::domain::token::{Token, TokenList};
use dex_swap_client::domain::units::{format_units, parse_units};
use dex_swap_client::ports::router::RouterQuoter;
use dex_swap_client::usecases::QuoteEngine;

fn token_list(n: usize) -> TokenList {
    let tokens = (0..n)
        .map(|i| Token::new(format!("TK{i}"), Address::repeat_byte(i as u8 + 1)))
        .collect();
    TokenList::new(tokens).unwrap()
}

// ── Pair Invariant ──────────────────────────────────────────

proptest! {
    /// No sequence of selections can make source and target coincide.
    #[test]
    fn pair_stays_distinct_under_any_selection(
        n in 2usize..6,
        ops in prop::collection::vec((any::<bool>(), 0usize..6), 0..40),
    ) {
        let list = token_list(n);
        let mut pair = list.default_pair();

        for (as_source, index) in ops {
            let token = list.tokens()[index % n].clone();
            if as_source {
                pair.select_source(&list, &token);
                prop_assert_eq!(pair.source(), &token);
            } else {
                pair.select_target(&list, &token);
                prop_assert_eq!(pair.target(), &token);
            }
            prop_assert_ne!(pair.source().address, pair.target().address);
            prop_assert!(list.by_address(pair.source().address).is_some());
            prop_assert!(list.by_address(pair.target().address).is_some());
        }
    }
}

// ── Unit Conversion ─────────────────────────────────────────

proptest! {
    /// Formatting then parsing at the same scale is lossless.
    #[test]
    fn format_then_parse_preserves_value(
        raw in any::<u128>(),
        decimals in 0u8..=36,
    ) {
        let value = U256::from(raw);
        let text = format_units(value, decimals);
        prop_assert_eq!(parse_units(&text, decimals).unwrap(), value, "text {}", text);
    }
}

// ── Quote Skip Rule ─────────────────────────────────────────

struct CountingRouter(AtomicUsize);

#[async_trait::async_trait]
impl RouterQuoter for CountingRouter {
    async fn get_amounts_out(&self, amount_in: U256, _path: &[Address]) -> anyhow::Result<Vec<U256>> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(vec![amount_in, amount_in])
    }
}

proptest! {
    /// Zero written any way, or text that is not a plain decimal,
    /// never reaches the router.
    #[test]
    fn zero_or_garbage_amount_is_skipped(
        amount in prop_oneof![
            "0{1,5}(\\.0{0,5})?",
            "[a-zA-Z ,+-]{0,8}",
        ],
    ) {
        let router = Arc::new(CountingRouter(AtomicUsize::new(0)));
        let engine = QuoteEngine::new(Arc::clone(&router));
        let pair = token_list(2).default_pair();

        let outcome = tokio_test::block_on(engine.get_quote(&amount, &pair)).unwrap();

        prop_assert_eq!(outcome, QuoteOutcome::Skipped);
        prop_assert_eq!(router.0.load(Ordering::SeqCst), 0);
    }
}
