//! Outcome rendering

use console::{style, Term};
use shopwalk::{CheckoutStep, SelectionOutcome};

fn checkout_label(step: CheckoutStep) -> &'static str {
    match step {
        CheckoutStep::Clicked => "review & checkout clicked",
        CheckoutStep::SkippedDisabled => "review & checkout disabled, skipped",
        CheckoutStep::SkippedNotVisible => "review & checkout not shown, skipped",
    }
}

/// One-line human summary of a run
#[must_use]
pub fn render_outcome(outcome: &SelectionOutcome, use_color: bool) -> String {
    let (prefix, body) = match outcome {
        SelectionOutcome::Matched {
            page,
            index,
            name,
            checkout,
        } => (
            if use_color {
                style("✓").green().bold().to_string()
            } else {
                "FOUND".to_string()
            },
            format!(
                "{name} (page {page}, item {index}); {}",
                checkout_label(*checkout)
            ),
        ),
        SelectionOutcome::Fallback { term, checkout } => (
            if use_color {
                style("↪").yellow().bold().to_string()
            } else {
                "FALLBACK".to_string()
            },
            format!("searched {term:?}; {}", checkout_label(*checkout)),
        ),
    };
    format!("{prefix} {body}")
}

/// Outcome as pretty JSON
pub fn render_outcome_json(outcome: &SelectionOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

/// Write the outcome to stdout
pub fn print_outcome(outcome: &SelectionOutcome, use_color: bool, json: bool) -> std::io::Result<()> {
    let term = Term::stdout();
    if json {
        let rendered = render_outcome_json(outcome).map_err(std::io::Error::other)?;
        term.write_line(&rendered)
    } else {
        term.write_line(&render_outcome(outcome, use_color))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn matched() -> SelectionOutcome {
        SelectionOutcome::Matched {
            page: 2,
            index: 3,
            name: "nike calm slip-on".to_string(),
            checkout: CheckoutStep::Clicked,
        }
    }

    #[test]
    fn test_render_matched_plain() {
        assert_eq!(
            render_outcome(&matched(), false),
            "FOUND nike calm slip-on (page 2, item 3); review & checkout clicked"
        );
    }

    #[test]
    fn test_render_fallback_plain() {
        let outcome = SelectionOutcome::Fallback {
            term: "adidas shoes".to_string(),
            checkout: CheckoutStep::SkippedDisabled,
        };
        let line = render_outcome(&outcome, false);
        assert!(line.starts_with("FALLBACK"));
        assert!(line.contains("\"adidas shoes\""));
        assert!(line.contains("disabled"));
    }

    #[test]
    fn test_render_json() {
        let json = render_outcome_json(&matched()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["path"], "matched");
        assert_eq!(value["page"], 2);
        assert_eq!(value["checkout"], "clicked");
    }
}
