//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases require from
//! the outside world. Adapters implement these traits; tests mock them.
//!
//! Port categories:
//! - `RouterQuoter`: Read-only router quotes (no signer)
//! - `WalletSession`: Connected account + signing-capable provider
//! - `TransactionSigner`: Token/router writes and inclusion waits
//! - `NotificationSink`: Fire-and-forget user-facing status strings
//! - `Clock`: Wall-clock seconds for swap deadlines

pub mod clock;
pub mod notifier;
pub mod router;
pub mod wallet;

pub use clock::{Clock, SystemClock};
pub use notifier::{NotificationLevel, NotificationSink};
pub use router::RouterQuoter;
pub use wallet::{TransactionSigner, WalletSession};
