//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies.
//!
//! Adapter categories:
//! - `chain`: RPC provider, router quotes, local signer via alloy-rs
//! - `notify`: Notification sinks (tracing log, channel)

pub mod chain;
pub mod notify;
