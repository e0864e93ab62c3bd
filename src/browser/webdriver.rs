//! WebDriver implementation of the browser seam
//!
//! Each page is its own WebDriver session, so every scenario attempt gets
//! an isolated browser context.

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};

use crate::common::config::{BrowserKind, Timeouts, WebDriverConfig};
use crate::common::{Error, Result};

use super::{bounded, Browser, Page};

/// Opens WebDriver sessions against a running driver server
pub struct WebDriverBrowser {
    config: WebDriverConfig,
    timeouts: Timeouts,
}

impl WebDriverBrowser {
    pub fn new(config: WebDriverConfig, timeouts: Timeouts) -> Self {
        Self { config, timeouts }
    }

    /// Session capabilities for the configured browser
    fn capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert(
            "browserName".to_string(),
            Value::String(self.config.browser.browser_name().to_string()),
        );

        match self.config.browser {
            BrowserKind::Chrome => {
                let mut args = vec!["--no-sandbox", "--disable-gpu"];
                if self.config.headless {
                    args.push("--headless=new");
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
            BrowserKind::Firefox => {
                let args: Vec<&str> = if self.config.headless {
                    vec!["-headless"]
                } else {
                    Vec::new()
                };
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
        }

        caps
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Page = WebDriverPage;

    async fn new_page(&self) -> Result<WebDriverPage> {
        tracing::debug!(
            url = %self.config.url,
            browser = self.config.browser.browser_name(),
            headless = self.config.headless,
            "Starting WebDriver session"
        );

        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());

        let connect = async {
            builder
                .connect(&self.config.url)
                .await
                .map_err(|e| Error::SessionStart {
                    url: self.config.url.clone(),
                    reason: e.to_string(),
                })
        };
        let client = bounded("start WebDriver session", self.timeouts.session(), connect).await?;

        Ok(WebDriverPage {
            client: Some(client),
        })
    }
}

/// A page backed by one WebDriver session
pub struct WebDriverPage {
    client: Option<Client>,
}

impl WebDriverPage {
    fn client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| Error::Internal("WebDriver session already closed".to_string()))
    }
}

#[async_trait]
impl Page for WebDriverPage {
    type Element = Element;

    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client()?
            .goto(url)
            .await
            .map_err(|e| Error::navigation(url, e))
    }

    async fn title(&mut self) -> Result<String> {
        self.client()?
            .title()
            .await
            .map_err(|e| Error::driver("title", e))
    }

    async fn find_all(&mut self, selector: &str) -> Result<Vec<Element>> {
        self.client()?
            .find_all(Locator::Css(selector))
            .await
            .map_err(|e| Error::driver("find elements", e))
    }

    async fn text(&mut self, element: &Element) -> Result<String> {
        // Raw DOM value; Get Element Text trims and collapses whitespace
        let content = element
            .prop("textContent")
            .await
            .map_err(|e| Error::driver("element textContent", e))?;
        Ok(text_content(content))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client
                .close()
                .await
                .map_err(|e| Error::driver("close session", e))?;
        }
        Ok(())
    }
}

/// Raw `textContent` value; an element never reports null, so absent is empty
fn text_content(prop: Option<String>) -> String {
    prop.unwrap_or_default()
}
