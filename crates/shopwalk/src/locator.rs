//! Locator abstraction for element selection.
//!
//! Locators describe *where* an element lives in the storefront markup; the
//! [`PageDriver`](crate::PageDriver) decides *how* to reach it.
//!
//! # Design Philosophy
//!
//! - **Structural selectors**: the site contract is a set of XPath/CSS strings
//! - **Playwright conventions**: strings starting with `//` are XPath
//! - **Indexed access**: `nth(i)` picks one element from a multi-match locator
//! - **Frame scoping**: `in_frame(name)` resolves inside a named iframe

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Selector {
    /// CSS selector (e.g., "#searchboxDesktop")
    Css(String),
    /// XPath selector (e.g., "//button[@id='add-to-bag-button']")
    XPath(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a test ID selector (data-testid attribute)
    #[must_use]
    pub fn test_id(id: impl AsRef<str>) -> Self {
        Self::Css(format!("[data-testid={:?}]", id.as_ref()))
    }

    /// Parse a raw selector string, detecting XPath by its leading characters
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim_start();
        if trimmed.starts_with("//") || trimmed.starts_with("..") || trimmed.starts_with('(') {
            Self::XPath(raw)
        } else if let Some(rest) = trimmed.strip_prefix("xpath=") {
            Self::XPath(rest.to_string())
        } else {
            Self::Css(raw)
        }
    }

    /// The raw selector text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }

    /// Whether this is an XPath selector
    #[must_use]
    pub const fn is_xpath(&self) -> bool {
        matches!(self, Self::XPath(_))
    }

    /// JavaScript expression evaluating to an array of matching elements under `root`
    #[must_use]
    pub fn to_query_all(&self, root: &str) -> String {
        match self {
            Self::Css(s) => format!("Array.from({root}.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(() => {{ const snap = ({root}.ownerDocument || {root}).evaluate({s:?}, {root}, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 const out = []; for (let i = 0; i < snap.snapshotLength; i++) out.push(snap.snapshotItem(i)); return out; }})()"
            ),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Selector {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::Css(s) => s,
            Selector::XPath(s) if !s.trim_start().starts_with("//") => format!("xpath={s}"),
            Selector::XPath(s) => s,
        }
    }
}

/// A locator for finding elements on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    selector: Selector,
    nth: Option<usize>,
    frame: Option<String>,
}

impl Locator {
    /// Create a locator from a raw selector string
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::parse(selector))
    }

    /// Create a locator from a selector
    #[must_use]
    pub const fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            nth: None,
            frame: None,
        }
    }

    /// Narrow to the element at `index` (document order)
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        Self {
            nth: Some(index),
            ..self.clone()
        }
    }

    /// Resolve inside the iframe whose `name` attribute equals `name`
    #[must_use]
    pub fn in_frame(mut self, name: impl Into<String>) -> Self {
        self.frame = Some(name.into());
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the index, if narrowed with [`Locator::nth`]
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.nth
    }

    /// Get the enclosing frame name
    #[must_use]
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }

    /// JavaScript expression resolving the root document (the frame's, if scoped)
    #[must_use]
    pub fn root_query(&self) -> String {
        match &self.frame {
            None => "document".to_string(),
            Some(name) => format!(
                "(() => {{ const f = Array.from(document.querySelectorAll('iframe')).find(el => el.name === {name:?}); \
                 try {{ return f ? f.contentDocument : null; }} catch (e) {{ return null; }} }})()"
            ),
        }
    }

    /// JavaScript expression evaluating to all elements this locator covers
    #[must_use]
    pub fn to_query_all(&self) -> String {
        let root = self.root_query();
        let all = self.selector.to_query_all("root");
        format!("(() => {{ const root = {root}; if (!root) return []; return {all}; }})()")
    }

    /// JavaScript expression evaluating to the single target element or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        let idx = self.nth.unwrap_or(0);
        format!("(({}) [{idx}] || null)", self.to_query_all())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(frame) = &self.frame {
            write!(f, "frame[{frame}] >> ")?;
        }
        write!(f, "{}", self.selector)?;
        if let Some(n) = self.nth {
            write!(f, " >> nth={n}")?;
        }
        Ok(())
    }
}
