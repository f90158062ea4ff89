//! Readiness Waits
//!
//! Condition-based polling used in place of fixed sleeps. Every wait has a
//! timeout budget and a polling interval; the decision it gates (click or
//! skip) stays with the caller.

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::{ShopError, ShopResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
    /// Number of times the condition was evaluated
    pub polls: u32,
}

/// Waiter for synchronization operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a waiter with custom options
    #[must_use]
    pub const fn new(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Same polling interval, different timeout
    #[must_use]
    pub const fn with_timeout(self, timeout_ms: u64) -> Self {
        Self {
            options: self.options.with_timeout(timeout_ms),
        }
    }

    /// The options in effect
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Poll `check` until it yields `true` or the timeout elapses.
    ///
    /// The condition is always evaluated at least once. Errors from the
    /// condition abort the wait immediately.
    pub async fn poll_until<F, Fut>(&self, waited_for: &str, mut check: F) -> ShopResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ShopResult<bool>>,
    {
        let start = Instant::now();
        let deadline = start + self.options.timeout();
        let mut polls = 0;

        loop {
            polls += 1;
            if check().await? {
                debug!(
                    waited_for,
                    polls,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "wait satisfied"
                );
                return Ok(WaitResult {
                    elapsed: start.elapsed(),
                    waited_for: waited_for.to_string(),
                    polls,
                });
            }
            if Instant::now() >= deadline {
                return Err(ShopError::Timeout {
                    ms: self.options.timeout_ms,
                    waited_for: waited_for.to_string(),
                });
            }
            tokio::time::sleep(self.options.poll_interval()).await;
        }
    }

    /// Wait until `locator` is visible
    pub async fn wait_for_visible<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        locator: &Locator,
    ) -> ShopResult<WaitResult> {
        self.poll_until(&format!("visible {locator}"), || driver.is_visible(locator))
            .await
    }

    /// Wait until `locator` is visible and enabled
    pub async fn wait_for_enabled<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        locator: &Locator,
    ) -> ShopResult<WaitResult> {
        self.poll_until(&format!("enabled {locator}"), || async move {
            Ok::<_, ShopError>(
                driver.is_visible(locator).await? && driver.is_enabled(locator).await?,
            )
        })
        .await
    }

    /// Like [`Waiter::wait_for_visible`], but a timeout yields `Ok(false)`
    pub async fn is_visible_within<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        locator: &Locator,
    ) -> ShopResult<bool> {
        match self.wait_for_visible(driver, locator).await {
            Ok(_) => Ok(true),
            Err(ShopError::Timeout { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Wait until the texts under `locator` differ from `previous`.
    ///
    /// Returns `false` when the listing never changed within the budget.
    pub async fn listing_changed<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        locator: &Locator,
        previous: &[String],
    ) -> ShopResult<bool> {
        let waited = self
            .poll_until(&format!("listing change {locator}"), || async move {
                let current = driver.all_text_contents(locator).await?;
                Ok::<_, ShopError>(!current.is_empty() && current.as_slice() != previous)
            })
            .await;
        match waited {
            Ok(_) => Ok(true),
            Err(ShopError::Timeout { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
