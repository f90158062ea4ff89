//! Selector configuration.
//!
//! Every field has a default matching the storefront the flow was written
//! against, so an empty YAML document is a valid configuration.

use crate::criteria::DEFAULT_FALLBACK_TERM;
use crate::page_object::{PageLocators, SelectPage};
use crate::result::{ShopError, ShopResult};
use crate::wait::{WaitOptions, Waiter};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard cap on listing pages visited before giving up on pagination
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Configuration for [`ProductSelector`](crate::ProductSelector)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Fallback search term when the criteria carry none
    pub default_fallback_term: String,
    /// Text the product title must contain; `None` checks the fragments instead
    pub expected_title: Option<String>,
    /// Variant picked after a listing match
    pub selection_size: String,
    /// Variant picked in the fallback flow
    pub fallback_size: String,
    /// Price filter minimum
    pub price_min: String,
    /// Price filter maximum
    pub price_max: String,
    /// `name` of the iframe hosting the promotional overlay
    pub promo_frame_name: String,
    /// Pages scanned before pagination is treated as exhausted
    pub max_pages: usize,
    /// Auto-wait budget for each action target
    pub action_timeout_ms: u64,
    /// Budget for the listing to change after clicking next
    pub settle_timeout_ms: u64,
    /// Budget for the checkout affordance to appear after add-to-bag
    pub bag_timeout_ms: u64,
    /// Budget for search/filter results to render
    pub results_timeout_ms: u64,
    /// Polling interval for every wait
    pub poll_interval_ms: u64,
    /// Storefront selectors
    pub locators: PageLocators,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            default_fallback_term: DEFAULT_FALLBACK_TERM.to_string(),
            expected_title: Some("Nike Calm Slip-On".to_string()),
            selection_size: "12".to_string(),
            fallback_size: "10".to_string(),
            price_min: "50".to_string(),
            price_max: "60".to_string(),
            promo_frame_name: "Sign Up via Text for Offers".to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            action_timeout_ms: 10_000,
            settle_timeout_ms: 2_000,
            bag_timeout_ms: 10_000,
            results_timeout_ms: 10_000,
            poll_interval_ms: 100,
            locators: PageLocators::default(),
        }
    }
}

impl SelectorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from YAML and validate
    pub fn from_yaml_str(yaml: &str) -> ShopResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ShopResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ShopResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Reject configurations the selector cannot run with
    pub fn validate(&self) -> ShopResult<()> {
        if self.max_pages == 0 {
            return Err(ShopError::Config {
                message: "max_pages must be at least 1".to_string(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ShopError::Config {
                message: "poll_interval_ms must be positive".to_string(),
            });
        }
        if !self.locators.size_option_template.contains("{size}") {
            return Err(ShopError::Config {
                message: "locators.size_option_template must contain {size}".to_string(),
            });
        }
        Ok(())
    }

    /// Set the expected product title (`None` checks the fragments)
    #[must_use]
    pub fn with_expected_title(mut self, title: Option<&str>) -> Self {
        self.expected_title = title.map(str::to_string);
        self
    }

    /// Set the pagination cap
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Apply one timeout to every wait and set the polling interval
    #[must_use]
    pub const fn with_timeouts(mut self, timeout_ms: u64, poll_interval_ms: u64) -> Self {
        self.action_timeout_ms = timeout_ms;
        self.settle_timeout_ms = timeout_ms;
        self.bag_timeout_ms = timeout_ms;
        self.results_timeout_ms = timeout_ms;
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the storefront selectors
    #[must_use]
    pub fn with_locators(mut self, locators: PageLocators) -> Self {
        self.locators = locators;
        self
    }

    /// Page object built from the configured selectors
    #[must_use]
    pub fn page(&self) -> SelectPage {
        SelectPage::new(self.locators.clone(), &self.promo_frame_name)
    }

    /// Waiter with the configured polling interval and `timeout_ms` budget
    #[must_use]
    pub const fn waiter(&self, timeout_ms: u64) -> Waiter {
        Waiter::new(
            WaitOptions {
                timeout_ms,
                poll_interval_ms: self.poll_interval_ms,
            },
        )
    }
}
