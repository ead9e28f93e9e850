//! Clock Port - Wall-clock Time for Deadlines

use chrono::Utc;

/// Source of the current Unix time in seconds.
pub trait Clock: Send + Sync + 'static {
  fn now_unix(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_unix(&self) -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
  }
}
