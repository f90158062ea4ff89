//! Shopwalk: page-object driven product search for retail e2e tests
//!
//! Finds a product by name fragments across a paginated storefront listing,
//! falls back to a filtered search when nothing matches, then drives the
//! product page through size selection, add-to-bag and checkout.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    SHOPWALK Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Search     │    │ Product    │    │ PageDriver │            │
//! │   │ Criteria   │───►│ Selector   │───►│ (chromium  │            │
//! │   │            │    │ SelectPage │    │  or mock)  │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use shopwalk::prelude::*;
//!
//! # async fn run(driver: MockDriver) -> ShopResult<()> {
//! let criteria = SearchCriteria::new("Nike", "Calm", "Slip-On")?;
//! let mut selector = ProductSelector::new(driver, SelectorConfig::default());
//! let outcome = selector.select(&criteria).await?;
//! println!("found: {}, checkout: {:?}", outcome.product_found(), outcome.checkout());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assertion;
mod browser;
mod config;
mod criteria;
#[allow(clippy::missing_errors_doc)]
mod driver;
mod locator;
mod page_object;
mod result;
mod selector;
#[allow(clippy::missing_errors_doc)]
mod wait;

pub use assertion::{expect, Expect, TextExpectation};
#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use browser::BrowserConfig;
pub use config::{SelectorConfig, DEFAULT_MAX_PAGES};
pub use criteria::{
    normalize, CheckoutStep, ListingPage, NextAffordance, SearchCriteria, SelectionOutcome,
    DEFAULT_FALLBACK_TERM,
};
pub use driver::{MockDriver, MockElement, PageDriver};
pub use locator::{Locator, Selector};
pub use page_object::{PageLocators, PageObject, SelectPage};
pub use result::{ShopError, ShopResult};
pub use selector::ProductSelector;
pub use wait::{WaitOptions, WaitResult, Waiter, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::assertion::*;
    pub use super::browser::*;
    pub use super::config::*;
    pub use super::criteria::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::page_object::*;
    pub use super::result::*;
    pub use super::selector::*;
    pub use super::wait::*;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_exposes_flow_types() {
        let config = SelectorConfig::default();
        let page: SelectPage = config.page();
        assert_eq!(page.page_name(), "SelectPage");
        assert!(SearchCriteria::new("a", "b", "c").is_ok());
    }
}
