// WebDriver-backed session
//
// The real Session implementation: fantoccini speaking the WebDriver
// protocol to a headless Chrome behind chromedriver. Visibility waits are
// bounded polls over the displayed state; an element missing from the DOM
// counts as not displayed, which is what the loading indicator does once
// the page removes it.

pub mod chromedriver;

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;

use crate::error::{Error, Result};
use crate::session::{Session, Target, poll_until};

pub use chromedriver::Chromedriver;

/// Window size the headless browser is launched with.
pub const WINDOW_SIZE: (u32, u32) = (1920, 1080);

/// A live WebDriver session against a headless Chrome.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Opens a headless-Chrome session on the given WebDriver endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionStart`] if the session request is refused or
    /// the browser cannot be launched.
    pub async fn start(webdriver_url: &str) -> Result<Self> {
        let mut capabilities = serde_json::map::Map::new();
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": [
                    "--headless=new",
                    format!("--window-size={},{}", WINDOW_SIZE.0, WINDOW_SIZE.1),
                    "--disable-gpu",
                    "--no-sandbox",
                    "--disable-dev-shm-usage",
                ],
            }),
        );

        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(webdriver_url)
            .await
            .map_err(session_error)?;

        tracing::debug!("webdriver session open on {webdriver_url}");
        Ok(Self { client })
    }

    async fn find(&self, target: &Target) -> Result<Element> {
        self.client.find(locator(target)).await.map_err(|e| {
            if e.is_no_such_element() {
                Error::ElementNotFound(target.clone())
            } else {
                command_error(e)
            }
        })
    }

    async fn displayed(&self, target: &Target) -> Result<bool> {
        match self.client.find(locator(target)).await {
            Ok(element) => element.is_displayed().await.map_err(command_error),
            Err(e) if e.is_no_such_element() => Ok(false),
            Err(e) => Err(command_error(e)),
        }
    }
}

#[async_trait]
impl Session for WebDriverSession {
    async fn goto(&self, url: &str) -> Result<()> {
        self.client.goto(url).await.map_err(|e| Error::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn click(&self, target: &Target) -> Result<()> {
        let element = self.find(target).await?;
        element.click().await.map_err(|e| {
            if e.is_no_such_element() {
                Error::ElementNotFound(target.clone())
            } else {
                Error::ElementNotInteractable {
                    target: target.clone(),
                    message: e.to_string(),
                }
            }
        })
    }

    async fn text(&self, target: &Target) -> Result<String> {
        let element = self.find(target).await?;
        element.text().await.map_err(command_error)
    }

    async fn is_displayed(&self, target: &Target) -> Result<bool> {
        self.displayed(target).await
    }

    async fn wait_hidden(&self, target: &Target, timeout: Duration) -> Result<()> {
        poll_until(&format!("{target} is hidden"), timeout, move || async move {
            Ok(!self.displayed(target).await?)
        })
        .await
    }

    async fn wait_displayed(&self, target: &Target, timeout: Duration) -> Result<()> {
        poll_until(
            &format!("{target} is visible"),
            timeout,
            move || async move { self.displayed(target).await },
        )
        .await
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.client.screenshot().await.map_err(command_error)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.client.close().await.map_err(command_error)
    }
}

fn locator(target: &Target) -> Locator<'_> {
    match target {
        Target::Id(id) => Locator::Id(id),
        Target::Css(selector) => Locator::Css(selector),
    }
}

fn session_error(e: NewSessionError) -> Error {
    Error::SessionStart(e.to_string())
}

fn command_error(e: CmdError) -> Error {
    Error::Driver(e.to_string())
}
