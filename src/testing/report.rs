//! Scenario results and run summaries

use colored::Colorize;
use serde::Serialize;

use crate::common::{Error, Result};

/// Result of a test run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    /// Attempts made, including retries
    pub attempts: u32,
    /// Steps executed in the final attempt
    pub steps_run: usize,
    pub steps_total: usize,
    /// Failures from the final attempt
    pub failures: Vec<StepFailure>,
}

/// One failed step
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepFailure {
    /// 1-based step number; 0 when the page could not be opened
    pub step: usize,
    /// Error category, e.g. `AssertionError`
    pub kind: String,
    pub message: String,
}

impl StepFailure {
    pub fn new(step: usize, error: &Error) -> Self {
        Self {
            step,
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

impl TestResult {
    /// Result for a scenario that could not be loaded or started
    pub fn not_run(name: &str, error: &Error) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            attempts: 0,
            steps_run: 0,
            steps_total: 0,
            failures: vec![StepFailure::new(0, error)],
        }
    }

    /// First recorded failure, if any
    pub fn error(&self) -> Option<&StepFailure> {
        self.failures.first()
    }
}

/// Process exit code for a set of results: 0 only if everything passed
pub fn exit_code(results: &[TestResult]) -> i32 {
    if !results.is_empty() && results.iter().all(|r| r.passed) {
        0
    } else {
        1
    }
}

/// Print a one-line-per-scenario summary
pub fn print_summary(results: &[TestResult]) {
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    println!("{}", "Summary:".cyan());
    for result in results {
        if result.passed {
            println!("  {} {}", "✓".green(), result.name);
        } else {
            println!("  {} {}", "✗".red(), result.name);
            for failure in &result.failures {
                println!(
                    "      step {} [{}] {}",
                    failure.step,
                    failure.kind.yellow(),
                    failure.message
                );
            }
        }
    }

    let line = format!("{} passed, {} failed", passed, failed);
    if failed == 0 {
        println!("\n{}\n", line.green().bold());
    } else {
        println!("\n{}\n", line.red().bold());
    }
}

/// Render results as pretty JSON
pub fn to_json(results: &[TestResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
