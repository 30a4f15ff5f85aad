//! Browser session backed by Playwright's Chromium
//!
//! Launches a headless Chromium with a fixed viewport and sandboxing disabled
//! so the suite can run inside containers.

use async_trait::async_trait;
use colored::Colorize;
use playwright::api::frame::FrameState;
use playwright::api::{Browser, BrowserContext, Page, ScreenshotType, Viewport};
use playwright::Playwright;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::driver::error::{DriverError, DriverResult};
use crate::driver::traits::{BrowserSession, ElementSnapshot, Selector, SessionLauncher};
use crate::utils::browser_path::find_browser_executable;
use crate::utils::config::BrowserConfig;

/// Chromium flags for containerised runs
const CHROMIUM_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
];

/// Whether a failed call ran out its own timeout.
///
/// Playwright reports these as a server error named `TimeoutError`; anything
/// else (disconnects, crashed pages, rejected selectors) is a real failure.
fn is_timeout(err: &playwright::Error) -> bool {
    match err {
        playwright::Error::ErrorResponded(msg) => msg.to_string().starts_with("TimeoutError"),
        playwright::Error::Arc(inner) => is_timeout(inner),
        _ => false,
    }
}

/// Launches Playwright-managed Chromium sessions
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaywrightLauncher;

#[async_trait]
impl SessionLauncher for PlaywrightLauncher {
    async fn launch(&self, config: &BrowserConfig) -> DriverResult<Box<dyn BrowserSession>> {
        Ok(Box::new(PlaywrightSession::launch(config).await?))
    }
}

/// Single-page browser session
pub struct PlaywrightSession {
    #[allow(dead_code)]
    playwright: Arc<Playwright>,
    browser: Arc<Browser>,
    #[allow(dead_code)]
    context: Arc<BrowserContext>,
    page: Arc<Mutex<Page>>,
    closed: AtomicBool,
}

impl PlaywrightSession {
    pub async fn launch(config: &BrowserConfig) -> DriverResult<Self> {
        let playwright = Playwright::initialize()
            .await
            .map_err(|e| DriverError::Launch(format!("Playwright driver unavailable: {}", e)))?;

        let chromium = playwright.chromium();
        let mut launcher = chromium.launcher().headless(config.headless);

        let executable = config.executable.clone().or_else(find_browser_executable);
        match executable {
            Some(ref path) => {
                log::info!("Using browser executable: {}", path.display());
                launcher = launcher.executable(path);
            }
            None => log::info!("No browser executable found, using Playwright's default"),
        }

        let mut args: Vec<String> = CHROMIUM_ARGS.iter().map(|s| s.to_string()).collect();
        args.push(format!(
            "--window-size={},{}",
            config.viewport_width, config.viewport_height
        ));
        launcher = launcher.args(&args);

        let browser = launcher
            .launch()
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        let context = browser
            .context_builder()
            .build()
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;
        let page = context
            .new_page()
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await?;

        log::debug!(
            "Chromium launched (headless: {}, viewport: {}x{})",
            config.headless,
            config.viewport_width,
            config.viewport_height
        );

        Ok(Self {
            playwright: Arc::new(playwright),
            browser: Arc::new(browser),
            context: Arc::new(context),
            page: Arc::new(Mutex::new(page)),
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl BrowserSession for PlaywrightSession {
    async fn goto(&self, url: &str) -> DriverResult<()> {
        let page = self.page.lock().await;
        page.goto_builder(url)
            .goto()
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_present(&self, selector: &Selector, timeout: Duration) -> DriverResult<()> {
        let page = self.page.lock().await;
        let sel = selector.to_css();

        let result = page
            .wait_for_selector_builder(&sel)
            .timeout(timeout.as_millis() as f64)
            .state(FrameState::Attached)
            .wait_for_selector()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_timeout(&e) => {
                log::debug!("Wait for '{}' timed out: {}", sel, e);
                Err(DriverError::Timeout {
                    selector: sel,
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn wait_for_visible(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> DriverResult<Option<ElementSnapshot>> {
        let page = self.page.lock().await;
        let sel = selector.to_css();

        let handle = match page
            .wait_for_selector_builder(&sel)
            .timeout(timeout.as_millis() as f64)
            .state(FrameState::Visible)
            .wait_for_selector()
            .await
        {
            Ok(Some(handle)) => handle,
            Ok(None) => return Ok(None),
            Err(e) if is_timeout(&e) => {
                log::debug!("'{}' not visible within {:?}: {}", sel, timeout, e);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let class_attr = handle.get_attribute("class").await?;
        Ok(Some(ElementSnapshot::from_class_attr(class_attr.as_deref())))
    }

    async fn count(&self, selector: &Selector) -> DriverResult<usize> {
        let page = self.page.lock().await;
        let elements = page.query_selector_all(&selector.to_css()).await?;
        Ok(elements.len())
    }

    async fn click_nth(&self, selector: &Selector, index: usize) -> DriverResult<()> {
        let page = self.page.lock().await;
        let sel = selector.to_css();
        let elements = page.query_selector_all(&sel).await?;
        match elements.get(index) {
            Some(el) => {
                el.click_builder().click().await.map_err(|e| {
                    println!(
                        "{} Click failed for selector '{}' at index {}: {}",
                        "❌".red(),
                        sel,
                        index,
                        e
                    );
                    DriverError::from(e)
                })?;
                Ok(())
            }
            None => Err(DriverError::ElementNotFound {
                selector: format!("{} [{}]", sel, index),
            }),
        }
    }

    async fn text_of(&self, selector: &Selector) -> DriverResult<String> {
        let page = self.page.lock().await;
        let sel = selector.to_css();
        match page.query_selector(&sel).await? {
            Some(el) => Ok(el.inner_text().await?),
            None => Err(DriverError::ElementNotFound { selector: sel }),
        }
    }

    async fn is_visible(&self, selector: &Selector) -> DriverResult<bool> {
        let page = self.page.lock().await;
        match page.query_selector(&selector.to_css()).await? {
            Some(el) => Ok(el.is_visible().await?),
            None => Ok(false),
        }
    }

    async fn screenshot(&self) -> DriverResult<Vec<u8>> {
        let page = self.page.lock().await;
        let bytes = page
            .screenshot_builder()
            .r#type(ScreenshotType::Png)
            .screenshot()
            .await?;
        Ok(bytes)
    }

    async fn close(&self) -> DriverResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            log::warn!("Browser session already closed");
            return Ok(());
        }
        self.browser.close().await?;
        log::debug!("Browser session closed");
        Ok(())
    }
}
