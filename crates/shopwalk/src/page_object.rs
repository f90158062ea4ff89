//! Page Object Model Support
//!
//! The storefront's markup contract lives here: every structural selector the
//! selection procedure touches, bundled into one page object.

use crate::locator::{Locator, Selector};
use serde::{Deserialize, Serialize};

/// Trait for page objects representing a page or component in the UI.
pub trait PageObject {
    /// URL pattern that matches this page (e.g., "/search", "/c/*")
    fn url_pattern(&self) -> &str;

    /// Element whose visibility marks the page as ready for interaction
    fn ready_locator(&self) -> Locator;

    /// Optional wait time for page load (in milliseconds)
    fn load_timeout_ms(&self) -> u64 {
        30000
    }

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Structural selectors of the product listing / detail / bag pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLocators {
    /// Product names in the listing grid
    pub product_list: Selector,
    /// Title on the product detail page
    pub product_title: Selector,
    /// "Ship to me" fulfillment radio
    pub ship_option: Selector,
    /// "Pick up in store" fulfillment radio
    pub pickup_option: Selector,
    /// Variant option; `{size}` is replaced with the size label
    pub size_option_template: String,
    /// Add to bag button
    pub add_to_bag: Selector,
    /// Review & checkout button in the bag flyout
    pub review_checkout: Selector,
    /// Close button of the promotional overlay (inside its frame)
    pub promo_close: Selector,
    /// Pager "next" link
    pub next_page: Selector,
    /// Free-text search box
    pub search_box: Selector,
    /// Price filter panel header
    pub price_filter: Selector,
    /// Minimum price input
    pub price_min: Selector,
    /// Maximum price input
    pub price_max: Selector,
    /// Apply price range button
    pub price_apply: Selector,
    /// Sort control header
    pub sort_filter: Selector,
    /// First product tile name in search results
    pub first_product: Selector,
}

impl Default for PageLocators {
    fn default() -> Self {
        Self {
            product_list: Selector::parse(r#"//div[@class="product-grid__products"]//h3//span"#),
            product_title: Selector::parse(r#"//h1[@id="product-name"]//span"#),
            ship_option: Selector::parse(
                "//label[@id='pdp-fulfillment-option-label-SHIP']//div[@class='radio-fill']",
            ),
            pickup_option: Selector::parse(
                "//label[@id='pdp-fulfillment-option-label-BOPIS']//div[@class='radio-fill']",
            ),
            size_option_template: "//span[normalize-space()='{size}']".to_string(),
            add_to_bag: Selector::parse(r#"//button[@id="add-to-bag-button"]"#),
            review_checkout: Selector::parse(
                r#"//div[@class="bag-info"]//button[@id="atb-review-and-checkout-button"]"#,
            ),
            promo_close: Selector::test_id("closeIcon"),
            next_page: Selector::parse(r#"//a[@aria-label="Go To Next Page"]"#),
            search_box: Selector::css("#searchboxDesktop"),
            price_filter: Selector::css("#title-product-filter-price"),
            price_min: Selector::parse(r#"//input[@formcontrolname="priceRangeMin"]"#),
            price_max: Selector::parse(r#"//input[@formcontrolname="priceRangeMax"]"#),
            price_apply: Selector::parse(
                "//button[contains(@class,'product-filter__price__range')]",
            ),
            sort_filter: Selector::css("#title-product-filter-sort"),
            first_product: Selector::parse("//app-product-listing//app-product-tile[1]//h3//span"),
        }
    }
}

/// Page object for the listing → detail → bag flow
#[derive(Debug, Clone)]
pub struct SelectPage {
    locators: PageLocators,
    promo_frame: String,
    url_pattern: String,
}

impl SelectPage {
    /// Create a page object over a locator set
    #[must_use]
    pub fn new(locators: PageLocators, promo_frame: impl Into<String>) -> Self {
        Self {
            locators,
            promo_frame: promo_frame.into(),
            url_pattern: "*".to_string(),
        }
    }

    /// Set the URL pattern
    #[must_use]
    pub fn with_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.url_pattern = pattern.into();
        self
    }

    /// All product names on the current listing page
    #[must_use]
    pub fn product_list(&self) -> Locator {
        Locator::from_selector(self.locators.product_list.clone())
    }

    /// Product title on the detail page
    #[must_use]
    pub fn product_title(&self) -> Locator {
        Locator::from_selector(self.locators.product_title.clone())
    }

    /// Ship-to-me option
    #[must_use]
    pub fn ship_option(&self) -> Locator {
        Locator::from_selector(self.locators.ship_option.clone())
    }

    /// Pick-up-in-store option
    #[must_use]
    pub fn pickup_option(&self) -> Locator {
        Locator::from_selector(self.locators.pickup_option.clone())
    }

    /// Variant option labelled `size`
    #[must_use]
    pub fn size_option(&self, size: &str) -> Locator {
        Locator::new(self.locators.size_option_template.replace("{size}", size))
    }

    /// Add to bag button
    #[must_use]
    pub fn add_to_bag(&self) -> Locator {
        Locator::from_selector(self.locators.add_to_bag.clone())
    }

    /// Review & checkout button
    #[must_use]
    pub fn review_checkout(&self) -> Locator {
        Locator::from_selector(self.locators.review_checkout.clone())
    }

    /// Close button of the promotional overlay, scoped to its frame
    #[must_use]
    pub fn promo_close(&self) -> Locator {
        Locator::from_selector(self.locators.promo_close.clone()).in_frame(&self.promo_frame)
    }

    /// Pager next link
    #[must_use]
    pub fn next_page(&self) -> Locator {
        Locator::from_selector(self.locators.next_page.clone())
    }

    /// Search box
    #[must_use]
    pub fn search_box(&self) -> Locator {
        Locator::from_selector(self.locators.search_box.clone())
    }

    /// Price filter header
    #[must_use]
    pub fn price_filter(&self) -> Locator {
        Locator::from_selector(self.locators.price_filter.clone())
    }

    /// Minimum price input
    #[must_use]
    pub fn price_min(&self) -> Locator {
        Locator::from_selector(self.locators.price_min.clone())
    }

    /// Maximum price input
    #[must_use]
    pub fn price_max(&self) -> Locator {
        Locator::from_selector(self.locators.price_max.clone())
    }

    /// Apply price range button
    #[must_use]
    pub fn price_apply(&self) -> Locator {
        Locator::from_selector(self.locators.price_apply.clone())
    }

    /// Sort control
    #[must_use]
    pub fn sort_filter(&self) -> Locator {
        Locator::from_selector(self.locators.sort_filter.clone())
    }

    /// First product in search results
    #[must_use]
    pub fn first_product(&self) -> Locator {
        Locator::from_selector(self.locators.first_product.clone())
    }
}

impl Default for SelectPage {
    fn default() -> Self {
        Self::new(PageLocators::default(), "Sign Up via Text for Offers")
    }
}

impl PageObject for SelectPage {
    fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    fn ready_locator(&self) -> Locator {
        self.product_list()
    }

    fn page_name(&self) -> &str {
        "SelectPage"
    }
}
