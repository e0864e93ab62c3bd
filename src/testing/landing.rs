//! Built-in landing page check
//!
//! Loads the Toedi landing page and asserts the document title and the
//! text of the navbar brand link.

use super::config::{TargetOverride, TestScenario, TestStep};

/// Default origin of the application under test
pub const BASE_URL: &str = "http://localhost:8479/";

/// Expected document title
pub const EXPECTED_TITLE: &str = "Welcome to Toedi";

/// The anchor directly inside the `navbar-brand` div
pub const BRAND_SELECTOR: &str = "div[class='navbar-brand'] > a";

/// Expected brand link text
pub const EXPECTED_BRAND_TEXT: &str = "Toedi";

/// The landing page scenario
pub fn landing_page_scenario() -> TestScenario {
    TestScenario {
        name: "homepage has title and links to intro page".to_string(),
        description: Some("Landing page title and navbar brand link".to_string()),
        target: TargetOverride::default(),
        steps: vec![
            TestStep::Goto {
                path: "/".to_string(),
                timeout_ms: None,
            },
            TestStep::ExpectTitle {
                equals: EXPECTED_TITLE.to_string(),
                timeout_ms: None,
            },
            TestStep::ExpectText {
                selector: BRAND_SELECTOR.to_string(),
                equals: EXPECTED_BRAND_TEXT.to_string(),
                timeout_ms: None,
            },
        ],
    }
}
