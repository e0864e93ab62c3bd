//! Test runner implementation
//!
//! Executes scenarios against a page obtained from a [`Browser`], one
//! fresh page per attempt.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use url::Url;

use crate::browser::{bounded, locate, preflight, Browser, Page};
use crate::common::config::Timeouts;
use crate::common::{Error, Result};

use super::config::{TestScenario, TestStep};
use super::report::{StepFailure, TestResult};

/// Settings shared by every scenario in a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Origin used when the scenario does not override it
    pub base_url: String,
    pub timeouts: Timeouts,
    /// Re-run a failed scenario this many times
    pub retries: u32,
    /// Continue past assertion and locator failures
    pub soft_assertions: bool,
    /// HTTP-probe the target before each navigation
    pub preflight: bool,
    pub verbose: bool,
    /// Suppress progress output (JSON mode)
    pub quiet: bool,
}

/// Outcome of a single attempt
struct Attempt {
    steps_run: usize,
    failures: Vec<StepFailure>,
}

impl Attempt {
    fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run a test scenario from a YAML file
pub async fn run_scenario_file<B: Browser>(
    browser: &B,
    path: &Path,
    opts: &RunOptions,
) -> Result<TestResult> {
    let scenario = TestScenario::load(path)?;
    run_scenario(browser, &scenario, opts).await
}

/// Run a scenario, retrying failed attempts on a fresh page
///
/// A failing scenario is an `Ok` result with `passed: false`; `Err` means
/// the scenario could not be run at all.
pub async fn run_scenario<B: Browser>(
    browser: &B,
    scenario: &TestScenario,
    opts: &RunOptions,
) -> Result<TestResult> {
    scenario.validate()?;

    let base_url = scenario
        .target
        .base_url
        .as_deref()
        .unwrap_or(&opts.base_url);
    let base = Url::parse(base_url).map_err(|e| Error::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    let steps_total = scenario.steps.len();

    if !opts.quiet {
        println!(
            "\n{} {}",
            "Running Test:".blue().bold(),
            scenario.name.white().bold()
        );
        if let Some(desc) = &scenario.description {
            println!("  {}", desc.dimmed());
        }
        if opts.verbose {
            println!("  Target: {}", base.as_str().dimmed());
        }
    }

    let max_attempts = opts.retries + 1;
    let mut attempts = 0;

    loop {
        attempts += 1;
        tracing::info!(scenario = %scenario.name, attempt = attempts, "Running scenario");

        let attempt = run_attempt(browser, scenario, &base, opts).await;

        if attempt.passed() || attempts >= max_attempts {
            let passed = attempt.passed();
            if !opts.quiet {
                if passed {
                    println!(
                        "\n{} {}\n",
                        "✓".green().bold(),
                        "Test Passed".green().bold()
                    );
                } else {
                    println!("\n{} {}\n", "✗".red().bold(), "Test Failed".red().bold());
                }
            }

            return Ok(TestResult {
                name: scenario.name.clone(),
                passed,
                attempts,
                steps_run: attempt.steps_run,
                steps_total,
                failures: attempt.failures,
            });
        }

        tracing::warn!(
            scenario = %scenario.name,
            attempt = attempts,
            "Scenario failed, retrying on a fresh page"
        );
        if !opts.quiet {
            println!(
                "  {} retry {}/{}",
                "↻".yellow(),
                attempts,
                opts.retries
            );
        }
    }
}

/// Run every step once on a new page, then close it
async fn run_attempt<B: Browser>(
    browser: &B,
    scenario: &TestScenario,
    base: &Url,
    opts: &RunOptions,
) -> Attempt {
    let mut page = match browser.new_page().await {
        Ok(page) => page,
        Err(e) => {
            if !opts.quiet {
                println!("  {} {}", "✗".red(), e);
            }
            return Attempt {
                steps_run: 0,
                failures: vec![StepFailure::new(0, &e)],
            };
        }
    };

    if !opts.quiet {
        println!("\n{}", "Steps:".cyan());
    }

    let mut steps_run = 0;
    let mut failures = Vec::new();

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_num = i + 1;
        steps_run = step_num;

        match execute_step(&mut page, step, base, opts).await {
            Ok(()) => {
                if !opts.quiet {
                    println!(
                        "  {} Step {}: {}",
                        "✓".green(),
                        step_num,
                        step.describe().dimmed()
                    );
                }
            }
            Err(e) => {
                tracing::debug!(step = step_num, kind = e.kind(), error = %e, "Step failed");
                if !opts.quiet {
                    println!("  {} Step {}: {}", "✗".red(), step_num, e);
                }

                let halt = !(opts.soft_assertions && e.is_soft());
                failures.push(StepFailure::new(step_num, &e));
                if halt {
                    break;
                }
            }
        }
    }

    // Cleanup: release the browser context
    if let Err(e) = page.close().await {
        tracing::warn!(error = %e, "Failed to close page");
    }

    Attempt {
        steps_run,
        failures,
    }
}

/// Execute a single test step
async fn execute_step<P: Page>(
    page: &mut P,
    step: &TestStep,
    base: &Url,
    opts: &RunOptions,
) -> Result<()> {
    let override_limit = step.timeout_ms().map(Duration::from_millis);

    match step {
        TestStep::Goto { path, .. } => {
            let limit = override_limit.unwrap_or_else(|| opts.timeouts.navigation());
            execute_goto_step(page, base, path, limit, opts).await
        }
        TestStep::ExpectTitle { equals, .. } => {
            let limit = override_limit.unwrap_or_else(|| opts.timeouts.action());
            let actual = bounded("read title", limit, page.title()).await?;
            expect_eq("title", equals, &actual)
        }
        TestStep::ExpectText {
            selector, equals, ..
        } => {
            let limit = override_limit.unwrap_or_else(|| opts.timeouts.action());
            // One deadline covers finding the element and reading it
            let operation = format!("read text of '{}'", selector);
            let actual = bounded(&operation, limit, async {
                let element = locate(page, selector).await?;
                page.text(&element).await
            })
            .await?;
            expect_eq(&format!("text of '{}'", selector), equals, &actual)
        }
    }
}

/// Execute a navigation step
async fn execute_goto_step<P: Page>(
    page: &mut P,
    base: &Url,
    path: &str,
    limit: Duration,
    opts: &RunOptions,
) -> Result<()> {
    let url = base.join(path).map_err(|e| Error::InvalidUrl {
        url: format!("{}{}", base, path),
        reason: e.to_string(),
    })?;

    // The reachability check and the navigation share one deadline
    bounded("goto", limit, async {
        if opts.preflight {
            preflight::probe(url.as_str(), limit).await?;
        }
        tracing::debug!(url = %url, "Navigating");
        page.goto(url.as_str()).await
    })
    .await
}

/// Exact, case-sensitive comparison with no trimming or normalization
fn expect_eq(subject: &str, expected: &str, actual: &str) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::assertion(subject, expected, actual))
    }
}
