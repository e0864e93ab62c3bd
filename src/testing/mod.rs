//! E2E scenario runner
//!
//! Scenarios are either the built-in landing page check or YAML files.
//! Every assertion is made against values read through the browser seam,
//! and failures keep their category (navigation, locator, assertion,
//! timeout) all the way into the report.

mod config;
pub mod landing;
pub mod report;
mod runner;

pub use config::*;
pub use report::{StepFailure, TestResult};
pub use runner::{run_scenario, run_scenario_file, RunOptions};
