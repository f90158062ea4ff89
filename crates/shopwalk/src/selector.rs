//! Product selection procedure.
//!
//! ```text
//!   listing page N ──match──▶ selection flow ──▶ checkout step ──▶ promo
//!        │
//!   no match, next visible+enabled ──▶ page N+1
//!        │
//!   exhausted ──▶ fallback flow ──▶ checkout step
//! ```
//!
//! The procedure is a strict sequence of awaits on one page handle. Any
//! missing element or failed shipping assertion aborts the run; only the
//! promotional overlay step swallows errors.

use crate::assertion::{expect, TextExpectation};
use crate::config::SelectorConfig;
use crate::criteria::{
    normalize, CheckoutStep, ListingPage, NextAffordance, SearchCriteria, SelectionOutcome,
};
use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::page_object::{PageObject, SelectPage};
use crate::result::{ShopError, ShopResult};
use crate::wait::Waiter;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Listing item matched during the pagination scan
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingMatch {
    page: usize,
    index: usize,
    name: String,
}

/// Drives a page handle through the search-and-purchase flow
#[derive(Debug)]
pub struct ProductSelector<D: PageDriver> {
    driver: D,
    config: SelectorConfig,
    page: SelectPage,
}

impl<D: PageDriver> ProductSelector<D> {
    /// Create a selector over a page already showing the product listing
    #[must_use]
    pub fn new(driver: D, config: SelectorConfig) -> Self {
        let page = config.page();
        Self {
            driver,
            config,
            page,
        }
    }

    /// The page handle
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// The configuration in effect
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Give the page handle back
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Find the product matching `criteria` and take it to the bag.
    ///
    /// # Errors
    ///
    /// Fails when a required element never becomes actionable, when the
    /// product title or shipping options do not match, or on driver errors.
    pub async fn select(&mut self, criteria: &SearchCriteria) -> ShopResult<SelectionOutcome> {
        let outcome = match self.scan(criteria).await? {
            Some(found) => {
                let checkout = self.selection_flow(criteria).await?;
                info!(page = found.page, index = found.index, "Product clicked successfully");
                SelectionOutcome::Matched {
                    page: found.page,
                    index: found.index,
                    name: found.name,
                    checkout,
                }
            }
            None => {
                let term = criteria
                    .fallback_or(&self.config.default_fallback_term)
                    .to_string();
                let checkout = self.fallback_flow(&term).await?;
                info!(%term, "Fallback executed");
                SelectionOutcome::Fallback { term, checkout }
            }
        };
        Ok(outcome)
    }

    /// Read the current listing page
    async fn read_listing(&self, number: usize) -> ShopResult<ListingPage> {
        let list = self.page.product_list();
        let next = self.page.next_page();

        let names = self.driver.all_text_contents(&list).await?;
        let visible = self.driver.is_visible(&next).await?;
        let enabled = visible && self.driver.is_enabled(&next).await?;
        Ok(ListingPage {
            number,
            names,
            next: NextAffordance { visible, enabled },
        })
    }

    /// Walk listing pages until a match, an unavailable next affordance, or the page cap
    async fn scan(&mut self, criteria: &SearchCriteria) -> ShopResult<Option<ListingMatch>> {
        let list = self.page.product_list();
        let next = self.page.next_page();

        let ready = self
            .waiter(self.page.load_timeout_ms().min(self.config.action_timeout_ms))
            .is_visible_within(&self.driver, &self.page.ready_locator())
            .await?;
        if !ready {
            debug!(page = self.page.page_name(), "listing not visible; scanning anyway");
        }

        let mut number = 1;
        loop {
            info!("Searching page {number}");
            let listing = self.read_listing(number).await?;

            if let Some(index) = criteria.first_match(listing.names.as_slice()) {
                let name = listing
                    .names
                    .get(index)
                    .map(|n| normalize(n))
                    .unwrap_or_default();
                info!(%name, page = number, index, "Found product");

                let item = list.nth(index);
                self.driver.scroll_into_view(&item).await?;
                self.click(&item).await?;
                return Ok(Some(ListingMatch {
                    page: number,
                    index,
                    name,
                }));
            }

            if !listing.next.can_advance() {
                debug!(page = number, next = ?listing.next, "pagination exhausted");
                return Ok(None);
            }
            if number >= self.config.max_pages {
                warn!(max_pages = self.config.max_pages, "page limit reached; giving up on pagination");
                return Ok(None);
            }

            self.driver.click(&next).await?;
            let settled = self
                .waiter(self.config.settle_timeout_ms)
                .listing_changed(&self.driver, &list, &listing.names)
                .await?;
            if !settled {
                debug!(page = number, "listing unchanged after next page");
            }
            number += 1;
        }
    }

    /// Title check, shipping check, size, add to bag, checkout, promo
    async fn selection_flow(&mut self, criteria: &SearchCriteria) -> ShopResult<CheckoutStep> {
        let title_locator = self.page.product_title();
        let title = expect(&self.driver, &title_locator)
            .with_waiter(self.waiter(self.config.action_timeout_ms));
        match &self.config.expected_title {
            Some(expected) => title.to_contain_text(expected.as_str()).await?,
            None => {
                let all = TextExpectation::ContainsAllIgnoreCase(criteria.fragments().to_vec());
                title.to_have_text_matching(&all).await?;
            }
        }
        self.verify_shipping().await?;

        let size = self.page.size_option(&self.config.selection_size);
        self.click(&size).await?;
        self.click(&self.page.add_to_bag()).await?;

        let checkout = self.checkout_step().await?;
        self.dismiss_promo().await;
        Ok(checkout)
    }

    /// Search, price filter, sort, first product, size, add to bag, checkout
    async fn fallback_flow(&mut self, term: &str) -> ShopResult<CheckoutStep> {
        info!(%term, "No matching product in listing; running fallback search");
        let results = self.waiter(self.config.results_timeout_ms);

        let search = self.page.search_box();
        self.fill(&search, term).await?;
        self.driver.press(&search, "Enter").await?;

        self.click_within(&self.page.price_filter(), results).await?;
        let (min, max) = (self.config.price_min.clone(), self.config.price_max.clone());
        self.fill(&self.page.price_min(), &min).await?;
        self.fill(&self.page.price_max(), &max).await?;
        self.click(&self.page.price_apply()).await?;

        self.click_within(&self.page.sort_filter(), results).await?;
        self.click_within(&self.page.first_product(), results).await?;

        let size = self.page.size_option(&self.config.fallback_size);
        self.click(&size).await?;
        self.verify_shipping().await?;
        self.click(&self.page.add_to_bag()).await?;

        self.checkout_step().await
    }

    /// "Ship to me" checked, "pick up in store" not
    async fn verify_shipping(&self) -> ShopResult<()> {
        let waiter = self.waiter(self.config.action_timeout_ms);
        expect(&self.driver, &self.page.ship_option())
            .with_waiter(waiter)
            .to_be_checked()
            .await?;
        expect(&self.driver, &self.page.pickup_option())
            .with_waiter(waiter)
            .not_to_be_checked()
            .await
    }

    /// Give the bag request `bag_timeout_ms` to settle, then click review &
    /// checkout only if it is visible and enabled
    async fn checkout_step(&mut self) -> ShopResult<CheckoutStep> {
        let review = self.page.review_checkout();
        let seen = AtomicBool::new(false);
        let (driver, target, seen_ref) = (&self.driver, &review, &seen);
        let ready = self
            .waiter(self.config.bag_timeout_ms)
            .poll_until(&format!("bag processed {review}"), || async move {
                if !driver.is_visible(target).await? {
                    return Ok(false);
                }
                seen_ref.store(true, Ordering::SeqCst);
                driver.is_enabled(target).await
            })
            .await;

        match ready {
            Ok(_) => {
                self.driver.scroll_into_view(&review).await?;
                self.driver.click(&review).await?;
                info!("Clicked Review & Checkout");
                Ok(CheckoutStep::Clicked)
            }
            Err(ShopError::Timeout { .. }) if seen.load(Ordering::SeqCst) => {
                self.driver.scroll_into_view(&review).await?;
                info!("Review & Checkout button disabled; skipping");
                Ok(CheckoutStep::SkippedDisabled)
            }
            Err(ShopError::Timeout { .. }) => {
                info!("Review & Checkout button not visible; skipping");
                Ok(CheckoutStep::SkippedNotVisible)
            }
            Err(e) => Err(e),
        }
    }

    /// Close the promotional overlay if it is showing; never fails
    async fn dismiss_promo(&mut self) {
        let close = self.page.promo_close();
        match self.try_dismiss_promo(&close).await {
            Ok(true) => info!("Closed promotional overlay"),
            Ok(false) => debug!(locator = %close, "no promotional overlay"),
            Err(e) => debug!(error = %e, "promotional overlay dismissal failed"),
        }
    }

    async fn try_dismiss_promo(&mut self, close: &Locator) -> ShopResult<bool> {
        if !self.driver.is_visible(close).await? {
            return Ok(false);
        }
        self.driver.click(close).await?;
        Ok(true)
    }

    fn waiter(&self, timeout_ms: u64) -> Waiter {
        self.config.waiter(timeout_ms)
    }

    /// Auto-wait until visible and enabled, then click
    async fn click(&mut self, locator: &Locator) -> ShopResult<()> {
        let waiter = self.waiter(self.config.action_timeout_ms);
        self.click_within(locator, waiter).await
    }

    async fn click_within(&mut self, locator: &Locator, waiter: Waiter) -> ShopResult<()> {
        waiter.wait_for_enabled(&self.driver, locator).await?;
        self.driver.click(locator).await
    }

    /// Auto-wait until visible and enabled, then fill
    async fn fill(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
        self.waiter(self.config.action_timeout_ms)
            .wait_for_enabled(&self.driver, locator)
            .await?;
        self.driver.fill(locator, text).await
    }
}
