//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod config;
pub mod run;

pub use config::{execute_config, render_config};
pub use run::{browser_config, build_criteria, build_selector_config, execute_run};
