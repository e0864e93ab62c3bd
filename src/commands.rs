//! CLI command definitions
//!
//! Defines the clap commands for the e2e runner.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::common::config::BrowserKind;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in landing page check
    Check {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Execute test scenarios defined in YAML files
    Test {
        /// Paths to YAML test scenario files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Show the effective configuration
    Config {
        /// Configuration file to read instead of the default
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the default configuration file path instead
        #[arg(long)]
        path: bool,
    },
}

/// Options shared by commands that drive a browser
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Configuration file to read instead of the default
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Origin of the application under test (default: http://localhost:8479/)
    #[arg(long)]
    pub base_url: Option<String>,

    /// WebDriver server URL (default: http://localhost:4444)
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Browser to request from the WebDriver server
    #[arg(long, value_enum)]
    pub browser: Option<BrowserKind>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Keep going after assertion and locator failures
    #[arg(long)]
    pub soft: bool,

    /// Re-run a failed scenario this many times
    #[arg(long)]
    pub retries: Option<u32>,

    /// Skip the HTTP probe before navigation
    #[arg(long)]
    pub no_preflight: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}
