//! CLI command handling
//!
//! Resolves configuration, drives the runner, and formats output.

use std::path::Path;

use crate::browser::WebDriverBrowser;
use crate::commands::{Commands, RunArgs};
use crate::common::config::Config;
use crate::common::{paths, Error, Result};
use crate::testing::landing::landing_page_scenario;
use crate::testing::report::{self, TestResult};
use crate::testing::{run_scenario, run_scenario_file, RunOptions};

/// Dispatch a CLI command, returning the process exit code
pub async fn dispatch(command: Commands, verbose: bool) -> Result<i32> {
    match command {
        Commands::Check { run } => {
            let (config, opts) = resolve(&run, verbose)?;
            let browser = WebDriverBrowser::new(config.webdriver, config.timeouts);

            let result = run_scenario(&browser, &landing_page_scenario(), &opts).await?;
            finish(&[result], run.json)
        }

        Commands::Test { paths, run } => {
            let (config, opts) = resolve(&run, verbose)?;
            let browser = WebDriverBrowser::new(config.webdriver, config.timeouts);

            let mut results = Vec::with_capacity(paths.len());
            for path in &paths {
                match run_scenario_file(&browser, path, &opts).await {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        tracing::error!(path = %path.display(), error = %e, "Scenario not run");
                        if !opts.quiet {
                            eprintln!("Error: {e}");
                        }
                        results.push(TestResult::not_run(&path.display().to_string(), &e));
                    }
                }
            }

            finish(&results, run.json)
        }

        Commands::Config { config, path } => {
            if path {
                match paths::config_path() {
                    Some(p) => println!("{}", p.display()),
                    None => {
                        return Err(Error::Config(
                            "Could not determine configuration directory".to_string(),
                        ))
                    }
                }
                return Ok(0);
            }

            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(0)
        }
    }
}

/// Load the config file, then apply command-line overrides
fn resolve(args: &RunArgs, verbose: bool) -> Result<(Config, RunOptions)> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(base_url) = &args.base_url {
        config.target.base_url = base_url.clone();
    }
    if let Some(url) = &args.webdriver {
        config.webdriver.url = url.clone();
    }
    if let Some(browser) = args.browser {
        config.webdriver.browser = browser;
    }
    if args.headed {
        config.webdriver.headless = false;
    }
    if args.soft {
        config.runner.soft_assertions = true;
    }
    if let Some(retries) = args.retries {
        config.runner.retries = retries;
    }
    if args.no_preflight {
        config.runner.preflight = false;
    }

    tracing::debug!(?config, "Resolved configuration");

    let opts = RunOptions {
        base_url: config.target.base_url.clone(),
        timeouts: config.timeouts.clone(),
        retries: config.runner.retries,
        soft_assertions: config.runner.soft_assertions,
        preflight: config.runner.preflight,
        verbose,
        quiet: args.json,
    };

    Ok((config, opts))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Print results and compute the exit code
fn finish(results: &[TestResult], json: bool) -> Result<i32> {
    if json {
        println!("{}", report::to_json(results)?);
    } else {
        report::print_summary(results);
    }
    Ok(report::exit_code(results))
}
