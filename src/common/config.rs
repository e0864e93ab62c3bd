//! Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Application under test
    #[serde(default)]
    pub target: TargetConfig,

    /// WebDriver endpoint and browser settings
    #[serde(default)]
    pub webdriver: WebDriverConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Scenario runner settings
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Application under test
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Origin the scenarios navigate against
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8479/".to_string()
}

/// Browser family requested from the WebDriver server
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKind {
    /// Chrome / Chromium via chromedriver
    #[default]
    Chrome,
    /// Firefox via geckodriver
    Firefox,
}

impl BrowserKind {
    /// WebDriver `browserName` capability value
    pub fn browser_name(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }
}

/// WebDriver settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebDriverConfig {
    /// WebDriver server URL (chromedriver, geckodriver, selenium)
    #[serde(default = "default_webdriver_url")]
    pub url: String,

    /// Browser to request
    #[serde(default)]
    pub browser: BrowserKind,

    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: default_webdriver_url(),
            browser: BrowserKind::default(),
            headless: default_headless(),
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}
fn default_headless() -> bool {
    true
}

/// Timeout settings in milliseconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Timeouts {
    /// Bound on a single navigation
    #[serde(default = "default_navigation")]
    pub navigation_ms: u64,

    /// Bound on a title, locator, or text query
    #[serde(default = "default_action")]
    pub action_ms: u64,

    /// Bound on creating a WebDriver session
    #[serde(default = "default_session")]
    pub session_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation_ms: default_navigation(),
            action_ms: default_action(),
            session_ms: default_session(),
        }
    }
}

impl Timeouts {
    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn action(&self) -> Duration {
        Duration::from_millis(self.action_ms)
    }

    pub fn session(&self) -> Duration {
        Duration::from_millis(self.session_ms)
    }
}

fn default_navigation() -> u64 {
    30_000
}
fn default_action() -> u64 {
    5_000
}
fn default_session() -> u64 {
    30_000
}

/// Scenario runner settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Re-run a failed scenario this many times on a fresh page
    #[serde(default)]
    pub retries: u32,

    /// Keep going after assertion and locator failures
    #[serde(default)]
    pub soft_assertions: bool,

    /// Probe the target over HTTP before navigating the browser
    #[serde(default = "default_preflight")]
    pub preflight: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            retries: 0,
            soft_assertions: false,
            preflight: default_preflight(),
        }
    }
}

fn default_preflight() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| super::Error::Internal(e.to_string()))
    }
}
