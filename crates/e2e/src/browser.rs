//! Chromium session management
//!
//! Owns the browser process and the CDP event-handler task. Each test
//! launches its own session; nothing is shared between tests.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::E2eConfig;
use crate::error::{E2eError, E2eResult};

/// A running Chromium instance.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium. Headless unless the config says otherwise.
    pub async fn launch(config: &E2eConfig) -> E2eResult<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(1280, 1024)
            .request_timeout(config.wait.timeout)
            // Container CI has no user namespace for the Chromium sandbox.
            .no_sandbox();
        if config.headful {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(E2eError::BrowserLaunch)?;
        let (browser, mut events) = Browser::launch(browser_config)
            .await
            .map_err(|e| E2eError::BrowserLaunch(e.to_string()))?;

        // Drive the CDP event stream for the lifetime of the session.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(headful = config.headful, "browser launched");
        Ok(Self { browser, handler })
    }

    /// Open a fresh blank page.
    pub async fn new_page(&self) -> E2eResult<Page> {
        let page = self.browser.new_page("about:blank").await?;
        debug!("page created");
        Ok(page)
    }

    /// Shut the browser down. Tests call this on both the pass and the
    /// fail path so the process never outlives the test.
    pub async fn close(mut self) -> E2eResult<()> {
        self.browser.close().await?;
        self.handler.abort();
        info!("browser closed");
        Ok(())
    }
}
