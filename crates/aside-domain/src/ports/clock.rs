//! Clock Port
//!
//! Wall-clock source for window arithmetic and in-process expiry.

use std::time::Duration;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Time elapsed since the Unix epoch
    fn now(&self) -> Duration;

    /// Whole seconds since the Unix epoch
    fn now_secs(&self) -> u64 {
        self.now().as_secs()
    }
}
