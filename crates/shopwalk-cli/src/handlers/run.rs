//! Run command handler

use crate::commands::RunArgs;
use crate::config::{load_selector_config, CliConfig};
use crate::error::{CliError, CliResult};
use shopwalk::{BrowserConfig, SearchCriteria, SelectorConfig};

/// Criteria from the three positional fragments and `--fallback`
pub fn build_criteria(args: &RunArgs) -> CliResult<SearchCriteria> {
    let [first, second, third] = <[String; 3]>::try_from(args.fragments.clone()).map_err(|v| {
        CliError::invalid_argument(format!("expected 3 fragments, got {}", v.len()))
    })?;
    let criteria = SearchCriteria::new(first, second, third)?;
    Ok(match &args.fallback {
        Some(term) => criteria.with_fallback(term.clone()),
        None => criteria,
    })
}

/// Selector configuration from `--config` plus command-line overrides
pub fn build_selector_config(args: &RunArgs) -> CliResult<SelectorConfig> {
    let config = load_selector_config(args.config.as_deref())?;
    let config = match args.max_pages {
        Some(0) => return Err(CliError::invalid_argument("--max-pages must be at least 1")),
        Some(max_pages) => config.with_max_pages(max_pages),
        None => config,
    };
    Ok(config)
}

/// Browser launch options from the command line
#[must_use]
pub fn browser_config(args: &RunArgs) -> BrowserConfig {
    let mut config = BrowserConfig::default().with_headless(!args.headed);
    if let Some(path) = &args.chromium {
        config = config.with_chromium_path(path.to_string_lossy());
    }
    if args.no_sandbox {
        config = config.with_no_sandbox();
    }
    config
}

/// Execute the run command
pub fn execute_run(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let criteria = build_criteria(args)?;
    let selector_config = build_selector_config(args)?;
    let browser = browser_config(args);
    drive(config, args, criteria, selector_config, browser)
}

#[cfg(feature = "browser")]
fn drive(
    config: &CliConfig,
    args: &RunArgs,
    criteria: SearchCriteria,
    selector_config: SelectorConfig,
    browser: BrowserConfig,
) -> CliResult<()> {
    use shopwalk::{ChromiumDriver, PageDriver, ProductSelector};
    use tracing::{info, warn};

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::run(format!("Failed to create runtime: {e}")))?;

    let outcome = rt.block_on(async {
        let mut driver = ChromiumDriver::launch(browser).await?;
        info!(url = %args.url, "opening listing");
        driver.goto(&args.url).await?;

        let mut selector = ProductSelector::new(driver, selector_config);
        let outcome = selector.select(&criteria).await;
        if let Err(e) = selector.into_driver().close().await {
            warn!(error = %e, "browser did not close cleanly");
        }
        outcome
    })?;

    if !config.verbosity.is_quiet() || args.json {
        crate::output::print_outcome(&outcome, config.color.should_color(), args.json)?;
    }
    Ok(())
}

#[cfg(not(feature = "browser"))]
fn drive(
    _config: &CliConfig,
    _args: &RunArgs,
    _criteria: SearchCriteria,
    _selector_config: SelectorConfig,
    _browser: BrowserConfig,
) -> CliResult<()> {
    Err(CliError::invalid_argument(
        "Browser support not enabled. Rebuild with --features browser",
    ))
}
