//! Shopwalk CLI: run the product selection flow from the command line
//!
//! ## Usage
//!
//! ```bash
//! shopwalk run --url https://shop.example/c/mens-shoes Nike Calm Slip-On
//! shopwalk run --url <URL> Nike Calm Slip-On --fallback "puma sneakers" -v
//! shopwalk config --config shopwalk.yaml
//! ```

use clap::Parser;
use shopwalk_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli);

    logging::init_logging(config.verbosity);
    console::set_colors_enabled(config.color.should_color());

    match cli.command {
        Commands::Run(args) => handlers::execute_run(&config, &args),
        Commands::Config(args) => handlers::execute_config(&args),
    }
}
