//! PageDriver - Abstract Page Handle Trait
//!
//! The selection procedure never talks to a browser directly. It drives a
//! caller-supplied page handle through this trait, which keeps the
//! storefront flow testable against an in-memory [`MockDriver`] and lets the
//! CDP-backed `ChromiumDriver` (feature `browser`) slot in for real runs.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  PageDriver (Abstract Trait)                                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────┐        ┌─────────────────────┐      │
//! │  │  ChromiumDriver     │        │  MockDriver         │      │
//! │  │  (feature browser)  │        │  (Unit Tests)       │      │
//! │  │  CDP via            │        │  Scripted listing,  │      │
//! │  │  chromiumoxide      │        │  call history       │      │
//! │  └─────────────────────┘        └─────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::locator::{Locator, Selector};
use crate::result::{ShopError, ShopResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

/// Abstract page handle for browser automation
///
/// Queries take `&self` so they can be polled; actions take `&mut self`.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to URL
    async fn goto(&mut self, url: &str) -> ShopResult<()>;

    /// Get current URL
    async fn current_url(&self) -> ShopResult<String>;

    /// Text content of every element the locator matches, in document order
    async fn all_text_contents(&self, locator: &Locator) -> ShopResult<Vec<String>>;

    /// Text content of the target element
    async fn text_content(&self, locator: &Locator) -> ShopResult<Option<String>>;

    /// Whether the target element exists and is rendered
    async fn is_visible(&self, locator: &Locator) -> ShopResult<bool>;

    /// Whether the target element is enabled
    async fn is_enabled(&self, locator: &Locator) -> ShopResult<bool>;

    /// Whether the target element (or the control it decorates) is checked
    async fn is_checked(&self, locator: &Locator) -> ShopResult<bool>;

    /// Click the target element
    async fn click(&mut self, locator: &Locator) -> ShopResult<()>;

    /// Replace the target input's value
    async fn fill(&mut self, locator: &Locator, text: &str) -> ShopResult<()>;

    /// Press a key (e.g. `"Enter"`) with the target element focused
    async fn press(&mut self, locator: &Locator, key: &str) -> ShopResult<()>;

    /// Scroll the target element into view
    async fn scroll_into_view(&mut self, locator: &Locator) -> ShopResult<()>;
}

/// Scripted element state for [`MockDriver`]
#[derive(Debug, Default)]
pub struct MockElement {
    /// Rendered
    pub visible: bool,
    /// Enabled
    pub enabled: bool,
    /// Checked
    pub checked: bool,
    /// Text content
    pub text: Option<String>,
    /// Number of visibility polls that report hidden before the element shows up
    hidden_polls: AtomicU32,
    /// Number of enabled polls that report disabled before the element unlocks
    disabled_polls: AtomicU32,
}

impl Clone for MockElement {
    fn clone(&self) -> Self {
        Self {
            visible: self.visible,
            enabled: self.enabled,
            checked: self.checked,
            text: self.text.clone(),
            hidden_polls: AtomicU32::new(self.hidden_polls.load(Ordering::SeqCst)),
            disabled_polls: AtomicU32::new(self.disabled_polls.load(Ordering::SeqCst)),
        }
    }
}

impl MockElement {
    /// A visible, enabled element
    #[must_use]
    pub fn visible() -> Self {
        Self {
            visible: true,
            enabled: true,
            ..Self::default()
        }
    }

    /// An element that exists but is not rendered
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Mark disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Mark checked
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Set text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Report hidden for the first `polls` visibility checks
    #[must_use]
    pub fn appears_after(self, polls: u32) -> Self {
        self.hidden_polls.store(polls, Ordering::SeqCst);
        self
    }

    /// Report disabled for the first `polls` enabled checks
    #[must_use]
    pub fn enabled_after(self, polls: u32) -> Self {
        self.disabled_polls.store(polls, Ordering::SeqCst);
        self
    }

    fn poll_visible(&self) -> bool {
        count_down(&self.hidden_polls) && self.visible
    }

    fn poll_enabled(&self) -> bool {
        count_down(&self.disabled_polls) && self.enabled
    }
}

/// Decrement a pending-poll counter; `true` once it has run out
fn count_down(remaining: &AtomicU32) -> bool {
    remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_err()
}

/// Paginated product listing scripted into a [`MockDriver`]
#[derive(Debug, Clone)]
struct MockListing {
    item: Selector,
    next: Selector,
    pages: Vec<Vec<String>>,
    current: usize,
    /// (visible, enabled) overrides for the next affordance, by page index
    next_overrides: HashMap<usize, (bool, bool)>,
    /// Next affordance never runs out; clicking it cycles through the pages
    endless: bool,
}

impl MockListing {
    fn names(&self) -> &[String] {
        self.pages.get(self.current).map_or(&[][..], Vec::as_slice)
    }

    fn next_state(&self) -> (bool, bool) {
        if let Some(state) = self.next_overrides.get(&self.current) {
            return *state;
        }
        let has_next = self.endless || self.current + 1 < self.pages.len();
        (has_next, has_next)
    }

    fn advance(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        if self.endless {
            self.current = (self.current + 1) % self.pages.len();
        } else if self.current + 1 < self.pages.len() {
            self.current += 1;
        }
    }
}

/// Mock driver for unit testing
///
/// Simulates a storefront: a paginated listing with a next-page affordance,
/// plus any number of scripted elements keyed by selector (and frame).
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Current URL
    pub current_url: String,
    listing: Option<MockListing>,
    elements: HashMap<String, MockElement>,
    failing: HashSet<String>,
    /// Call history for verification
    pub call_history: Vec<String>,
}

fn element_key(frame: Option<&str>, selector: &str) -> String {
    match frame {
        Some(frame) => format!("{frame}|{selector}"),
        None => selector.to_string(),
    }
}

fn locator_key(locator: &Locator) -> String {
    element_key(locator.frame(), locator.selector().as_str())
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a paginated listing: `item` matches product names, `next` is the pager
    #[must_use]
    pub fn with_listing(
        mut self,
        item: &Locator,
        next: &Locator,
        pages: Vec<Vec<String>>,
    ) -> Self {
        self.listing = Some(MockListing {
            item: item.selector().clone(),
            next: next.selector().clone(),
            pages,
            current: 0,
            next_overrides: HashMap::new(),
            endless: false,
        });
        self
    }

    /// Override the next affordance state shown on `page` (0-based)
    #[must_use]
    pub fn with_next_affordance(mut self, page: usize, visible: bool, enabled: bool) -> Self {
        if let Some(listing) = self.listing.as_mut() {
            let _ = listing.next_overrides.insert(page, (visible, enabled));
        }
        self
    }

    /// Keep the next affordance available forever
    #[must_use]
    pub fn with_endless_pagination(mut self) -> Self {
        if let Some(listing) = self.listing.as_mut() {
            listing.endless = true;
        }
        self
    }

    /// Script an element
    #[must_use]
    pub fn with_element(mut self, locator: &Locator, element: MockElement) -> Self {
        self.add_element(locator, element);
        self
    }

    /// Make every query and action on `locator` fail with a driver error
    #[must_use]
    pub fn with_failure(mut self, locator: &Locator) -> Self {
        let _ = self.failing.insert(locator_key(locator));
        self
    }

    /// Add or replace a scripted element
    pub fn add_element(&mut self, locator: &Locator, element: MockElement) {
        let _ = self.elements.insert(locator_key(locator), element);
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    /// Number of history entries starting with `prefix`
    #[must_use]
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.call_history
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Whether `locator` was clicked
    #[must_use]
    pub fn clicked(&self, locator: &Locator) -> bool {
        let entry = format!("click:{locator}");
        self.call_history.iter().any(|c| *c == entry)
    }

    /// Values filled into `locator`, in order
    #[must_use]
    pub fn filled(&self, locator: &Locator) -> Vec<&str> {
        let prefix = format!("fill:{locator}=");
        self.call_history
            .iter()
            .filter_map(|c| c.strip_prefix(prefix.as_str()))
            .collect()
    }

    /// Zero-based index of the listing page currently shown
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.listing.as_ref().map_or(0, |l| l.current)
    }

    fn check_failure(&self, locator: &Locator) -> ShopResult<()> {
        if self.failing.contains(&locator_key(locator)) {
            return Err(ShopError::driver(format!("injected failure on {locator}")));
        }
        Ok(())
    }

    fn listing_for<'a>(&'a self, locator: &Locator) -> Option<&'a MockListing> {
        self.listing
            .as_ref()
            .filter(|l| locator.frame().is_none() && &l.item == locator.selector())
    }

    fn is_next(&self, locator: &Locator) -> bool {
        self.listing
            .as_ref()
            .is_some_and(|l| locator.frame().is_none() && &l.next == locator.selector())
    }

    fn element(&self, locator: &Locator) -> Option<&MockElement> {
        self.elements.get(&locator_key(locator))
    }

    fn require_element(&self, locator: &Locator) -> ShopResult<&MockElement> {
        self.element(locator)
            .ok_or_else(|| ShopError::ElementNotFound {
                selector: locator.to_string(),
            })
    }

    fn listing_item(&self, listing: &MockListing, locator: &Locator) -> ShopResult<String> {
        listing
            .names()
            .get(locator.index().unwrap_or(0))
            .cloned()
            .ok_or_else(|| ShopError::ElementNotFound {
                selector: locator.to_string(),
            })
    }

    fn require_actionable(&self, locator: &Locator) -> ShopResult<()> {
        if let Some(listing) = self.listing_for(locator) {
            return self.listing_item(listing, locator).map(|_| ());
        }
        if self.is_next(locator) {
            return Ok(());
        }
        self.require_element(locator).map(|_| ())
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn goto(&mut self, url: &str) -> ShopResult<()> {
        self.call_history.push(format!("goto:{url}"));
        self.current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> ShopResult<String> {
        Ok(self.current_url.clone())
    }

    async fn all_text_contents(&self, locator: &Locator) -> ShopResult<Vec<String>> {
        self.check_failure(locator)?;
        if let Some(listing) = self.listing_for(locator) {
            return Ok(listing.names().to_vec());
        }
        Ok(self
            .element(locator)
            .and_then(|e| e.text.clone())
            .into_iter()
            .collect())
    }

    async fn text_content(&self, locator: &Locator) -> ShopResult<Option<String>> {
        self.check_failure(locator)?;
        if let Some(listing) = self.listing_for(locator) {
            return self.listing_item(listing, locator).map(Some);
        }
        Ok(self.require_element(locator)?.text.clone())
    }

    async fn is_visible(&self, locator: &Locator) -> ShopResult<bool> {
        self.check_failure(locator)?;
        if let Some(listing) = self.listing_for(locator) {
            let idx = locator.index().unwrap_or(0);
            return Ok(idx < listing.names().len());
        }
        if self.is_next(locator) {
            return Ok(self.listing.as_ref().is_some_and(|l| l.next_state().0));
        }
        Ok(self.element(locator).is_some_and(MockElement::poll_visible))
    }

    async fn is_enabled(&self, locator: &Locator) -> ShopResult<bool> {
        self.check_failure(locator)?;
        if self.listing_for(locator).is_some() {
            return Ok(true);
        }
        if self.is_next(locator) {
            return Ok(self.listing.as_ref().is_some_and(|l| l.next_state().1));
        }
        Ok(self.require_element(locator)?.poll_enabled())
    }

    async fn is_checked(&self, locator: &Locator) -> ShopResult<bool> {
        self.check_failure(locator)?;
        Ok(self.require_element(locator)?.checked)
    }

    async fn click(&mut self, locator: &Locator) -> ShopResult<()> {
        self.check_failure(locator)?;
        self.require_actionable(locator)?;
        self.call_history.push(format!("click:{locator}"));
        if self.is_next(locator) {
            if let Some(listing) = self.listing.as_mut() {
                listing.advance();
            }
        }
        Ok(())
    }

    async fn fill(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
        self.check_failure(locator)?;
        self.require_element(locator)?;
        self.call_history.push(format!("fill:{locator}={text}"));
        if let Some(element) = self.elements.get_mut(&locator_key(locator)) {
            element.text = Some(text.to_string());
        }
        Ok(())
    }

    async fn press(&mut self, locator: &Locator, key: &str) -> ShopResult<()> {
        self.check_failure(locator)?;
        self.require_element(locator)?;
        self.call_history.push(format!("press:{locator}:{key}"));
        Ok(())
    }

    async fn scroll_into_view(&mut self, locator: &Locator) -> ShopResult<()> {
        self.check_failure(locator)?;
        self.require_actionable(locator)?;
        self.call_history.push(format!("scroll:{locator}"));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn item() -> Locator {
        Locator::new("//h3//span")
    }

    fn next() -> Locator {
        Locator::new("//a[@aria-label=\"Go To Next Page\"]")
    }

    mod mock_element_tests {
        use super::*;

        #[test]
        fn test_visible_defaults() {
            let el = MockElement::visible();
            assert!(el.visible);
            assert!(el.enabled);
            assert!(!el.checked);
        }

        #[test]
        fn test_hidden_is_enabled_but_not_visible() {
            let el = MockElement::hidden();
            assert!(!el.visible);
            assert!(el.enabled);
        }

        #[test]
        fn test_appears_after_counts_down() {
            let el = MockElement::visible().appears_after(2);
            assert!(!el.poll_visible());
            assert!(!el.poll_visible());
            assert!(el.poll_visible());
        }

        #[test]
        fn test_enabled_after_counts_down() {
            let el = MockElement::visible().enabled_after(1);
            assert!(!el.poll_enabled());
            assert!(el.poll_enabled());
            assert!(el.poll_visible());
        }

        #[test]
        fn test_enabled_after_never_unlocks_disabled() {
            let el = MockElement::visible().disabled().enabled_after(1);
            assert!(!el.poll_enabled());
            assert!(!el.poll_enabled());
        }

        #[test]
        fn test_clone_preserves_countdown() {
            let el = MockElement::visible().appears_after(1);
            let copy = el.clone();
            assert!(!copy.poll_visible());
            assert!(copy.poll_visible());
        }
    }

    mod mock_listing_tests {
        use super::*;

        #[tokio::test]
        async fn test_listing_pages_and_next() {
            let mut driver = MockDriver::new().with_listing(
                &item(),
                &next(),
                vec![names(&["A", "B"]), names(&["C"])],
            );

            assert_eq!(driver.all_text_contents(&item()).await.unwrap(), names(&["A", "B"]));
            assert!(driver.is_visible(&next()).await.unwrap());
            assert!(driver.is_enabled(&next()).await.unwrap());

            driver.click(&next()).await.unwrap();
            assert_eq!(driver.current_page(), 1);
            assert_eq!(driver.all_text_contents(&item()).await.unwrap(), names(&["C"]));
            assert!(!driver.is_visible(&next()).await.unwrap());
        }

        #[tokio::test]
        async fn test_next_override() {
            let driver = MockDriver::new()
                .with_listing(&item(), &next(), vec![names(&["A"]), names(&["B"])])
                .with_next_affordance(0, true, false);
            assert!(driver.is_visible(&next()).await.unwrap());
            assert!(!driver.is_enabled(&next()).await.unwrap());
        }

        #[tokio::test]
        async fn test_endless_cycles() {
            let mut driver = MockDriver::new()
                .with_listing(&item(), &next(), vec![names(&["A"]), names(&["B"])])
                .with_endless_pagination();
            driver.click(&next()).await.unwrap();
            driver.click(&next()).await.unwrap();
            assert_eq!(driver.current_page(), 0);
            assert!(driver.is_visible(&next()).await.unwrap());
        }

        #[tokio::test]
        async fn test_nth_item_text_and_click() {
            let mut driver =
                MockDriver::new().with_listing(&item(), &next(), vec![names(&["A", "B"])]);
            let second = item().nth(1);
            assert_eq!(
                driver.text_content(&second).await.unwrap(),
                Some("B".to_string())
            );
            driver.click(&second).await.unwrap();
            assert!(driver.clicked(&second));
            assert!(driver.click(&item().nth(5)).await.is_err());
        }
    }

    mod mock_element_driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_unknown_element_is_not_visible() {
            let driver = MockDriver::new();
            assert!(!driver.is_visible(&Locator::new("#nope")).await.unwrap());
            assert!(matches!(
                driver.is_enabled(&Locator::new("#nope")).await,
                Err(ShopError::ElementNotFound { .. })
            ));
        }

        #[tokio::test]
        async fn test_fill_records_value() {
            let search = Locator::new("#searchboxDesktop");
            let mut driver = MockDriver::new().with_element(&search, MockElement::visible());
            driver.fill(&search, "adidas shoes").await.unwrap();
            driver.press(&search, "Enter").await.unwrap();
            assert_eq!(driver.filled(&search), vec!["adidas shoes"]);
            assert!(driver.was_called("press:#searchboxDesktop:Enter"));
            assert_eq!(
                driver.text_content(&search).await.unwrap(),
                Some("adidas shoes".to_string())
            );
        }

        #[tokio::test]
        async fn test_frame_scoped_elements_are_separate() {
            let close = Locator::new("[data-testid=\"closeIcon\"]");
            let framed = close.clone().in_frame("promo");
            let driver = MockDriver::new().with_element(&framed, MockElement::visible());
            assert!(driver.is_visible(&framed).await.unwrap());
            assert!(!driver.is_visible(&close).await.unwrap());
        }

        #[tokio::test]
        async fn test_injected_failure() {
            let loc = Locator::new("#flaky");
            let mut driver = MockDriver::new()
                .with_element(&loc, MockElement::visible())
                .with_failure(&loc);
            assert!(matches!(
                driver.is_visible(&loc).await,
                Err(ShopError::Driver { .. })
            ));
            assert!(driver.click(&loc).await.is_err());
            assert_eq!(driver.count_calls("click:"), 0);
        }

        #[tokio::test]
        async fn test_goto_and_history() {
            let mut driver = MockDriver::new();
            driver.goto("https://shop.test/mens").await.unwrap();
            assert_eq!(driver.current_url().await.unwrap(), "https://shop.test/mens");
            assert_eq!(driver.history(), ["goto:https://shop.test/mens"]);
        }
    }
}
