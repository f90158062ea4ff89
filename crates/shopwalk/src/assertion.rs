//! Auto-retrying element assertions.
//!
//! `expect(driver, locator)` mirrors Playwright's web-first assertions: the
//! check is polled until it passes or the waiter's budget runs out, and only
//! then fails with [`ShopError::AssertionFailed`].

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::{ShopError, ShopResult};
use crate::wait::Waiter;

/// Expected text of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextExpectation {
    /// Text contains the substring exactly
    Contains(String),
    /// Text contains every needle, ignoring case
    ContainsAllIgnoreCase(Vec<String>),
}

impl TextExpectation {
    /// Check actual text against the expectation
    #[must_use]
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            Self::Contains(needle) => actual.contains(needle.as_str()),
            Self::ContainsAllIgnoreCase(needles) => {
                let haystack = actual.to_lowercase();
                needles
                    .iter()
                    .all(|n| haystack.contains(n.to_lowercase().as_str()))
            }
        }
    }

    /// Human-readable form for failure messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Contains(needle) => format!("to contain {needle:?}"),
            Self::ContainsAllIgnoreCase(needles) => {
                format!("to contain all of {needles:?} (case-insensitive)")
            }
        }
    }
}

/// Pending assertion against one locator
#[derive(Debug)]
pub struct Expect<'a, D: PageDriver + ?Sized> {
    driver: &'a D,
    locator: &'a Locator,
    waiter: Waiter,
}

/// Start an assertion on `locator`
pub fn expect<'a, D: PageDriver + ?Sized>(driver: &'a D, locator: &'a Locator) -> Expect<'a, D> {
    Expect {
        driver,
        locator,
        waiter: Waiter::default(),
    }
}

impl<'a, D: PageDriver + ?Sized> Expect<'a, D> {
    /// Use a specific polling budget
    #[must_use]
    pub const fn with_waiter(mut self, waiter: Waiter) -> Self {
        self.waiter = waiter;
        self
    }

    /// Element text satisfies `expectation`
    pub async fn to_have_text_matching(&self, expectation: &TextExpectation) -> ShopResult<()> {
        let (driver, locator) = (self.driver, self.locator);
        let waited = self
            .waiter
            .poll_until(&format!("{locator} {}", expectation.describe()), || async move {
                match driver.text_content(locator).await {
                    Ok(text) => Ok(text.is_some_and(|t| expectation.matches(&t))),
                    Err(ShopError::ElementNotFound { .. }) => Ok(false),
                    Err(e) => Err(e),
                }
            })
            .await;
        match waited {
            Ok(_) => Ok(()),
            Err(ShopError::Timeout { .. }) => {
                let actual = driver.text_content(locator).await.ok().flatten();
                Err(ShopError::assertion(format!(
                    "expected {locator} {}, got {actual:?}",
                    expectation.describe()
                )))
            }
            Err(e) => Err(e),
        }
    }

    /// Element text contains `expected`
    pub async fn to_contain_text(&self, expected: impl Into<String>) -> ShopResult<()> {
        self.to_have_text_matching(&TextExpectation::Contains(expected.into()))
            .await
    }

    /// Element is checked
    pub async fn to_be_checked(&self) -> ShopResult<()> {
        self.checked_state(true).await
    }

    /// Element is not checked
    pub async fn not_to_be_checked(&self) -> ShopResult<()> {
        self.checked_state(false).await
    }

    async fn checked_state(&self, want: bool) -> ShopResult<()> {
        let (driver, locator) = (self.driver, self.locator);
        let label = if want { "checked" } else { "not checked" };
        let waited = self
            .waiter
            .poll_until(&format!("{locator} to be {label}"), || async move {
                match driver.is_checked(locator).await {
                    Ok(checked) => Ok(checked == want),
                    Err(ShopError::ElementNotFound { .. }) => Ok(false),
                    Err(e) => Err(e),
                }
            })
            .await;
        match waited {
            Ok(_) => Ok(()),
            Err(ShopError::Timeout { .. }) => Err(ShopError::assertion(format!(
                "expected {locator} to be {label}"
            ))),
            Err(e) => Err(e),
        }
    }
}
