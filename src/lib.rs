//! Toedi E2E - browser checks for the Toedi web application
//!
//! This library provides the browser automation seam, the scenario runner,
//! and the built-in landing page check.

pub mod browser;
pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{TestResult, TestScenario, TestStep};
