//! Search criteria, listing snapshots and selection outcomes.

use crate::result::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};

/// Fallback search term used when the caller supplies none
pub const DEFAULT_FALLBACK_TERM: &str = "adidas shoes";

/// Lowercase and trim a display name for matching
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Three name fragments (AND-matched, case-insensitive) plus an optional fallback term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    fragments: [String; 3],
    fallback_term: Option<String>,
}

impl SearchCriteria {
    /// Build criteria from three fragments.
    ///
    /// Fragments are lowercased once here and otherwise kept verbatim, so
    /// `"calm "` still requires the trailing space. A blank fragment would
    /// match every product and is rejected.
    pub fn new(
        first: impl AsRef<str>,
        second: impl AsRef<str>,
        third: impl AsRef<str>,
    ) -> ShopResult<Self> {
        let fragments = [
            first.as_ref().to_lowercase(),
            second.as_ref().to_lowercase(),
            third.as_ref().to_lowercase(),
        ];
        if let Some(pos) = fragments.iter().position(|f| f.trim().is_empty()) {
            return Err(ShopError::InvalidCriteria {
                message: format!("fragment {} is empty", pos + 1),
            });
        }
        Ok(Self {
            fragments,
            fallback_term: None,
        })
    }

    /// Set the fallback search term (blank terms fall back to the default)
    #[must_use]
    pub fn with_fallback(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.fallback_term = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    /// Lowercased fragments
    #[must_use]
    pub const fn fragments(&self) -> &[String; 3] {
        &self.fragments
    }

    /// Caller-supplied fallback term, if any
    #[must_use]
    pub fn fallback_term(&self) -> Option<&str> {
        self.fallback_term.as_deref()
    }

    /// Fallback term, or `default` when none was supplied
    #[must_use]
    pub fn fallback_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.fallback_term.as_deref().unwrap_or(default)
    }

    /// Whether a display name contains every fragment
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = normalize(name);
        self.fragments.iter().all(|f| name.contains(f.as_str()))
    }

    /// Index of the first matching name in document order
    #[must_use]
    pub fn first_match<S: AsRef<str>>(&self, names: &[S]) -> Option<usize> {
        names.iter().position(|n| self.matches(n.as_ref()))
    }
}

/// Pager "next" affordance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NextAffordance {
    /// Rendered
    pub visible: bool,
    /// Clickable
    pub enabled: bool,
}

impl NextAffordance {
    /// Pagination may continue only when both visible and enabled
    #[must_use]
    pub const fn can_advance(&self) -> bool {
        self.visible && self.enabled
    }
}

/// One visit to a listing page; re-read on every visit, never cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// 1-based page number
    pub number: usize,
    /// Product names in document order
    pub names: Vec<String>,
    /// Next-page affordance as observed on this page
    pub next: NextAffordance,
}

/// What the conditional review-and-checkout step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Visible and enabled: clicked
    Clicked,
    /// Visible but disabled: skipped
    SkippedDisabled,
    /// Never became visible: skipped
    SkippedNotVisible,
}

impl CheckoutStep {
    /// Whether the checkout affordance was clicked
    #[must_use]
    pub const fn clicked(&self) -> bool {
        matches!(self, Self::Clicked)
    }
}

/// Terminal outcome of one selection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// A listing item matched and went through the selection flow
    Matched {
        /// 1-based page number of the match
        page: usize,
        /// Index of the item on that page
        index: usize,
        /// Normalized product name
        name: String,
        /// Review-and-checkout result
        checkout: CheckoutStep,
    },
    /// No listing item matched; the fallback search ran
    Fallback {
        /// Search term used
        term: String,
        /// Review-and-checkout result
        checkout: CheckoutStep,
    },
}

impl SelectionOutcome {
    /// Whether a listing item was found
    #[must_use]
    pub const fn product_found(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Review-and-checkout result
    #[must_use]
    pub const fn checkout(&self) -> CheckoutStep {
        match self {
            Self::Matched { checkout, .. } | Self::Fallback { checkout, .. } => *checkout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod criteria_tests {
        use super::*;

        #[test]
        fn test_fragments_are_lowercased_not_trimmed() {
            let c = SearchCriteria::new("Nike", "CALM ", "Slip-On").unwrap();
            assert_eq!(c.fragments(), &["nike", "calm ", "slip-on"].map(String::from));
        }

        #[test]
        fn test_trailing_space_in_fragment_is_significant() {
            let c = SearchCriteria::new("nike", "calm ", "slip-on").unwrap();
            assert!(c.matches("Nike Calm Slip-On"));
            assert!(!c.matches("Nike Calmer-Slip-On"));
        }

        #[test]
        fn test_empty_fragment_rejected() {
            let err = SearchCriteria::new("nike", "  ", "slip-on").unwrap_err();
            assert_eq!(err.to_string(), "Invalid search criteria: fragment 2 is empty");
        }

        #[test]
        fn test_matches_all_fragments_case_insensitive() {
            let c = SearchCriteria::new("Nike", "Calm", "Slip-On").unwrap();
            assert!(c.matches("Nike Calm Slip-On White"));
            assert!(c.matches("  NIKE CALM SLIP-ON  "));
            assert!(!c.matches("Nike Calm Sandal"));
        }

        #[test]
        fn test_first_match_is_earliest() {
            let c = SearchCriteria::new("nike", "calm", "slip").unwrap();
            let names = [
                "Adidas Ultraboost",
                "Nike Calm Slip-On Black",
                "Nike Calm Slip-On White",
            ];
            assert_eq!(c.first_match(&names), Some(1));
            assert_eq!(c.first_match(&["Puma"]), None);
            assert_eq!(c.first_match::<&str>(&[]), None);
        }

        #[test]
        fn test_fallback_defaults() {
            let c = SearchCriteria::new("a", "b", "c").unwrap();
            assert_eq!(c.fallback_term(), None);
            assert_eq!(c.fallback_or(DEFAULT_FALLBACK_TERM), "adidas shoes");

            let c = c.with_fallback("puma sneakers");
            assert_eq!(c.fallback_or(DEFAULT_FALLBACK_TERM), "puma sneakers");

            let c = c.with_fallback("   ");
            assert_eq!(c.fallback_term(), None);
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_next_affordance_gate() {
            assert!(NextAffordance { visible: true, enabled: true }.can_advance());
            assert!(!NextAffordance { visible: true, enabled: false }.can_advance());
            assert!(!NextAffordance { visible: false, enabled: true }.can_advance());
        }

        #[test]
        fn test_outcome_accessors() {
            let matched = SelectionOutcome::Matched {
                page: 2,
                index: 0,
                name: "nike calm slip-on".to_string(),
                checkout: CheckoutStep::Clicked,
            };
            assert!(matched.product_found());
            assert!(matched.checkout().clicked());

            let fallback = SelectionOutcome::Fallback {
                term: DEFAULT_FALLBACK_TERM.to_string(),
                checkout: CheckoutStep::SkippedDisabled,
            };
            assert!(!fallback.product_found());
            assert!(!fallback.checkout().clicked());
        }

        #[test]
        fn test_outcome_json_shape() {
            let fallback = SelectionOutcome::Fallback {
                term: "adidas shoes".to_string(),
                checkout: CheckoutStep::SkippedNotVisible,
            };
            let json = serde_json::to_value(&fallback).unwrap();
            assert_eq!(json["path"], "fallback");
            assert_eq!(json["checkout"], "skipped_not_visible");
        }
    }
}
