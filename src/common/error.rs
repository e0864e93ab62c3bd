//! Error types for the e2e runner
//!
//! Scenario failures (navigation, locator, assertion, timeout) are kept
//! distinct so a report can say *why* a check failed, not just that it did.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the e2e runner
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario Errors ===
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Locator '{selector}' {}", describe_matches(.matched))]
    Locator { selector: String, matched: usize },

    #[error("{subject}: expected {expected:?}, got {actual:?}")]
    Assertion {
        subject: String,
        expected: String,
        actual: String,
    },

    #[error("{operation} timed out after {} ms", millis(.after))]
    Timeout { operation: String, after: Duration },

    // === Browser Session Errors ===
    #[error("Failed to start WebDriver session at {url}: {reason}. Is chromedriver/geckodriver running?")]
    SessionStart { url: String, reason: String },

    #[error("WebDriver command '{command}' failed: {reason}")]
    Driver { command: String, reason: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_matches(matched: &usize) -> String {
    match *matched {
        0 => "matched no elements".to_string(),
        n => format!("is ambiguous: matched {} elements", n),
    }
}

fn millis(after: &Duration) -> u128 {
    after.as_millis()
}

impl Error {
    /// Create a navigation error
    pub fn navigation(url: impl ToString, reason: impl ToString) -> Self {
        Self::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a locator error for a selector that did not match exactly once
    pub fn locator(selector: &str, matched: usize) -> Self {
        Self::Locator {
            selector: selector.to_string(),
            matched,
        }
    }

    /// Create an assertion error
    pub fn assertion(subject: impl ToString, expected: &str, actual: &str) -> Self {
        Self::Assertion {
            subject: subject.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl ToString, after: Duration) -> Self {
        Self::Timeout {
            operation: operation.to_string(),
            after,
        }
    }

    /// Create a driver command error
    pub fn driver(command: &str, reason: impl ToString) -> Self {
        Self::Driver {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Category name used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Navigation { .. } => "NavigationError",
            Error::Locator { .. } => "LocatorError",
            Error::Assertion { .. } => "AssertionError",
            Error::Timeout { .. } => "TimeoutError",
            Error::SessionStart { .. } | Error::Driver { .. } => "SessionError",
            Error::Config(_)
            | Error::ConfigParse(_)
            | Error::InvalidUrl { .. }
            | Error::FileRead { .. } => "ConfigError",
            Error::Io(_) | Error::Json(_) | Error::Internal(_) => "InternalError",
        }
    }

    /// Whether a soft-assertion run may continue past this error
    pub fn is_soft(&self) -> bool {
        matches!(self, Error::Assertion { .. } | Error::Locator { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_messages_distinguish_missing_and_ambiguous() {
        let missing = Error::locator("div > a", 0);
        assert_eq!(missing.to_string(), "Locator 'div > a' matched no elements");

        let ambiguous = Error::locator("div > a", 2);
        assert_eq!(
            ambiguous.to_string(),
            "Locator 'div > a' is ambiguous: matched 2 elements"
        );
    }

    #[test]
    fn test_assertion_message_names_expected_and_actual() {
        let err = Error::assertion("title", "Welcome to Toedi", "Welcome");
        assert_eq!(
            err.to_string(),
            "title: expected \"Welcome to Toedi\", got \"Welcome\""
        );
        assert_eq!(err.kind(), "AssertionError");
    }

    #[test]
    fn test_timeout_message() {
        let err = Error::timeout("goto", Duration::from_millis(1500));
        assert_eq!(err.to_string(), "goto timed out after 1500 ms");
        assert_eq!(err.kind(), "TimeoutError");
    }

    #[test]
    fn test_io_error_converts() {
        fn create(path: &std::path::Path) -> Result<()> {
            std::fs::create_dir_all(path)?;
            Ok(())
        }

        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let err = create(&blocker.join("logs")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), "InternalError");
        assert!(err.to_string().starts_with("IO error: "));
    }

    #[test]
    fn test_soft_errors() {
        assert!(Error::assertion("t", "a", "b").is_soft());
        assert!(Error::locator("a", 0).is_soft());
        assert!(!Error::navigation("http://x", "refused").is_soft());
        assert!(!Error::timeout("goto", Duration::from_secs(1)).is_soft());
    }
}
