//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shopwalk: find a product on a retail storefront and take it to checkout
#[derive(Parser, Debug)]
#[command(name = "shopwalk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the product selection flow against a listing page
    Run(RunArgs),

    /// Show the effective selector configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Listing page URL to start from
    #[arg(long)]
    pub url: String,

    /// Three name fragments the product must contain (case-insensitive)
    #[arg(value_name = "FRAGMENT", num_args = 3, required = true)]
    pub fragments: Vec<String>,

    /// Search term used when no listing item matches
    #[arg(long)]
    pub fallback: Option<String>,

    /// Selector configuration file (YAML)
    #[arg(short, long, env = "SHOPWALK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the pagination page cap
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Path to the chromium binary
    #[arg(long, env = "SHOPWALK_CHROMIUM")]
    pub chromium: Option<PathBuf>,

    /// Disable the chromium sandbox (containers/CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Selector configuration file (YAML)
    #[arg(short, long, env = "SHOPWALK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML
    #[default]
    Yaml,
    /// JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod cli_parsing_tests {
        use super::*;

        #[test]
        fn test_verify_cli() {
            use clap::CommandFactory;
            Cli::command().debug_assert();
        }

        #[test]
        fn test_parse_run() {
            let cli = Cli::try_parse_from([
                "shopwalk",
                "-vv",
                "run",
                "--url",
                "https://shop.test/c/mens-shoes",
                "Nike",
                "Calm",
                "Slip-On",
                "--fallback",
                "puma sneakers",
                "--headed",
            ])
            .unwrap();
            assert_eq!(cli.verbose, 2);
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert_eq!(args.fragments, ["Nike", "Calm", "Slip-On"]);
            assert_eq!(args.fallback.as_deref(), Some("puma sneakers"));
            assert!(args.headed);
            assert!(!args.no_sandbox);
        }

        #[test]
        fn test_run_requires_three_fragments() {
            let result = Cli::try_parse_from(["shopwalk", "run", "--url", "u", "Nike", "Calm"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_run_requires_url() {
            let result = Cli::try_parse_from(["shopwalk", "run", "a", "b", "c"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_config_json() {
            let cli = Cli::try_parse_from(["shopwalk", "config", "--format", "json"]).unwrap();
            let Commands::Config(args) = cli.command else {
                panic!("expected config");
            };
            assert_eq!(args.format, ConfigFormat::Json);
        }

        #[test]
        fn test_color_arg() {
            let cli = Cli::try_parse_from(["shopwalk", "--color", "never", "config"]).unwrap();
            assert_eq!(cli.color, ColorArg::Never);
        }
    }
}
