//! DEX Swap Client - Library Root
//!
//! Quote, approve and swap against a Uniswap-V2-style router.
//! Re-exports all modules for integration tests and benchmarks.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
