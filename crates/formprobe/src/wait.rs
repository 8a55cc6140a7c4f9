//! Explicit waits.
//!
//! Every element lookup in [`crate::BasePage`] goes through a [`Waiter`]:
//! the condition is probed, then re-probed every poll interval until it
//! yields a value or the timeout elapses. The condition is always probed at
//! least once, so a zero timeout still performs one lookup.

use crate::result::{ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for element waits (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAITER
// =============================================================================

/// Polls an async condition until it produces a value
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a waiter with the given options
    #[must_use]
    pub const fn new(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Options this waiter polls with
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Poll `probe` until it returns `Some`.
    ///
    /// Errors returned by `probe` abort the wait immediately. On timeout the
    /// error built by `on_timeout` (given the timeout in ms) is returned.
    pub async fn until<T, F, Fut, E>(&self, mut probe: F, on_timeout: E) -> ProbeResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ProbeResult<Option<T>>>,
        E: FnOnce(u64) -> ProbeError,
    {
        let start = Instant::now();
        let timeout = self.options.timeout();

        loop {
            if let Some(value) = probe().await? {
                return Ok(value);
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(on_timeout(self.options.timeout_ms));
            }
            let remaining = timeout - elapsed;
            tokio::time::sleep(self.options.poll_interval().min(remaining)).await;
        }
    }
}

/// Sleep for a fixed duration.
///
/// Used only for the post-submit settle delay; element waits should go
/// through [`Waiter::until`].
pub async fn settle(duration_ms: u64) {
    if duration_ms > 0 {
        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
    }
}

// =============================================================================
// TESTS
// =============================================================================
