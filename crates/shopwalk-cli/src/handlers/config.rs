//! Config command handler

use crate::commands::{ConfigArgs, ConfigFormat};
use crate::config::load_selector_config;
use crate::error::CliResult;
use shopwalk::SelectorConfig;

/// Render a selector configuration in the requested format
pub fn render_config(config: &SelectorConfig, format: ConfigFormat) -> CliResult<String> {
    let rendered = match format {
        ConfigFormat::Yaml => serde_yaml_ng::to_string(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
    };
    Ok(rendered)
}

/// Execute the config command: print the effective configuration
pub fn execute_config(args: &ConfigArgs) -> CliResult<()> {
    let config = load_selector_config(args.config.as_deref())?;
    print!("{}", render_config(&config, args.format)?);
    if args.format == ConfigFormat::Json {
        println!();
    }
    Ok(())
}
