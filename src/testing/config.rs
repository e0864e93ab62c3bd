//! Test scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::Deserialize;
use std::path::Path;

use crate::common::{Error, Result};

/// A complete test scenario loaded from a YAML file
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TestScenario {
    /// Name of the test scenario
    pub name: String,
    /// Optional description of what the test verifies
    pub description: Option<String>,
    /// Optional override of the configured target
    #[serde(default)]
    pub target: TargetOverride,
    /// The sequence of test steps to execute
    pub steps: Vec<TestStep>,
}

/// Per-scenario target settings
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TargetOverride {
    /// Origin to navigate against instead of the configured one
    pub base_url: Option<String>,
}

/// A single test step in the execution flow
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a path relative to the base URL
    Goto {
        /// Path to open (default: "/")
        #[serde(default = "default_path")]
        path: String,
        /// Override of the navigation timeout
        timeout_ms: Option<u64>,
    },
    /// Assert the document title (exact match)
    ExpectTitle {
        /// Expected title
        equals: String,
        /// Override of the action timeout
        timeout_ms: Option<u64>,
    },
    /// Locate exactly one element and assert its text (exact match)
    ExpectText {
        /// CSS selector that must match exactly one element
        selector: String,
        /// Expected text content
        equals: String,
        /// Override of the action timeout
        timeout_ms: Option<u64>,
    },
}

fn default_path() -> String {
    "/".to_string()
}

impl TestStep {
    /// Short human-readable label used in progress output
    pub fn describe(&self) -> String {
        match self {
            TestStep::Goto { path, .. } => format!("goto {}", path),
            TestStep::ExpectTitle { equals, .. } => format!("expect title = {:?}", equals),
            TestStep::ExpectText {
                selector, equals, ..
            } => format!("expect text of {} = {:?}", selector, equals),
        }
    }

    /// Step-level timeout override in milliseconds
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            TestStep::Goto { timeout_ms, .. }
            | TestStep::ExpectTitle { timeout_ms, .. }
            | TestStep::ExpectText { timeout_ms, .. } => *timeout_ms,
        }
    }
}

impl TestScenario {
    /// Load and validate a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read test scenario '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse and validate a scenario from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: TestScenario = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse test scenario: {}", e)))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// A scenario must navigate before it asserts anything
    pub fn validate(&self) -> Result<()> {
        match self.steps.first() {
            None => Err(Error::Config(format!(
                "Scenario '{}' has no steps",
                self.name
            ))),
            Some(TestStep::Goto { .. }) => Ok(()),
            Some(step) => Err(Error::Config(format!(
                "Scenario '{}' must start with a goto step, found '{}'",
                self.name,
                step.describe()
            ))),
        }
    }
}
