//! In-memory storefront used to drive the runner in tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::{DriverError, DriverResult};
use super::traits::{BrowserSession, ElementSnapshot, Selector, SessionLauncher};
use crate::utils::config::{BrowserConfig, DomContract};

/// How a single page reacts to the suite
#[derive(Debug, Clone)]
pub struct PageScript {
    pub product_cards: usize,
    pub add_buttons: usize,
    pub opens_sidebar: bool,
    pub marks_sidebar_active: bool,
    pub shows_notification: bool,
    pub updates_count: bool,
    pub has_cart_count: bool,
    pub view_details_buttons: usize,
    pub opens_quick_view: bool,
    pub renders_cart_items: bool,
    pub panics_on_load: bool,
    /// Browser connection drops once anything waits for visibility
    pub disconnects_on_wait: bool,
}

impl PageScript {
    /// A page where everything works, with `products` cards
    pub fn storefront(products: usize) -> Self {
        Self {
            product_cards: products,
            add_buttons: products,
            opens_sidebar: true,
            marks_sidebar_active: true,
            shows_notification: true,
            updates_count: true,
            has_cart_count: true,
            view_details_buttons: products,
            opens_quick_view: true,
            renders_cart_items: true,
            panics_on_load: false,
            disconnects_on_wait: false,
        }
    }
}

#[derive(Debug, Default)]
struct PageState {
    path: Option<String>,
    sidebar_open: bool,
    notification_shown: bool,
    quick_view_open: bool,
}

#[derive(Debug, Default)]
struct Shared {
    cart_items: u32,
    page: PageState,
}

/// Counters observed by tests after the session has been consumed
#[derive(Debug, Clone, Default)]
pub struct Probes {
    pub launches: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub screenshots: Arc<AtomicUsize>,
    pub visited: Arc<Mutex<Vec<String>>>,
}

impl Probes {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn screenshots(&self) -> usize {
        self.screenshots.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

pub struct ScriptedSession {
    pages: HashMap<String, PageScript>,
    dom: DomContract,
    shared: Mutex<Shared>,
    probes: Probes,
}

impl ScriptedSession {
    pub fn new(pages: HashMap<String, PageScript>, probes: Probes) -> Self {
        Self {
            pages,
            dom: DomContract::default(),
            shared: Mutex::new(Shared::default()),
            probes,
        }
    }

    fn current(&self, shared: &Shared) -> Option<PageScript> {
        shared
            .page
            .path
            .as_ref()
            .and_then(|p| self.pages.get(p))
            .cloned()
    }

    fn is(&self, selector: &Selector, class: &str) -> bool {
        selector.to_css() == format!(".{}", class)
    }

    fn visible_snapshot(&self, selector: &Selector) -> Option<ElementSnapshot> {
        let shared = self.shared.lock().unwrap();
        let page = self.current(&shared)?;
        let dom = &self.dom;

        if self.is(selector, &dom.cart_sidebar) && shared.page.sidebar_open {
            let mut classes = vec![dom.cart_sidebar.clone()];
            if page.marks_sidebar_active {
                classes.push(dom.active_marker.clone());
            }
            return Some(ElementSnapshot { classes });
        }
        if self.is(selector, &dom.notification) && shared.page.notification_shown {
            return Some(ElementSnapshot {
                classes: vec![dom.notification.clone()],
            });
        }
        if self.is(selector, &dom.quick_view_modal) && shared.page.quick_view_open {
            return Some(ElementSnapshot {
                classes: vec![dom.quick_view_modal.clone()],
            });
        }
        let item_part =
            self.is(selector, &dom.cart_item_title) || self.is(selector, &dom.cart_item_price);
        if item_part && shared.page.sidebar_open && page.renders_cart_items && shared.cart_items > 0
        {
            return Some(ElementSnapshot::default());
        }
        None
    }

    fn count_matches(&self, selector: &Selector) -> usize {
        let shared = self.shared.lock().unwrap();
        let Some(page) = self.current(&shared) else {
            return 0;
        };
        let dom = &self.dom;

        if self.is(selector, &dom.product_card) {
            page.product_cards
        } else if self.is(selector, &dom.add_to_cart) {
            page.add_buttons
        } else if self.is(selector, &dom.view_details) {
            page.view_details_buttons
        } else if self.is(selector, &dom.modal_add_to_cart) {
            usize::from(shared.page.quick_view_open)
        } else if self.is(selector, &dom.cart_item) {
            if page.renders_cart_items {
                shared.cart_items as usize
            } else {
                0
            }
        } else if self.is(selector, &dom.cart_count) {
            usize::from(page.has_cart_count)
        } else {
            0
        }
    }

    fn add_to_cart(shared: &mut Shared, page: &PageScript) {
        if page.opens_sidebar {
            shared.page.sidebar_open = true;
        }
        if page.shows_notification {
            shared.page.notification_shown = true;
        }
        if page.updates_count {
            shared.cart_items += 1;
        }
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn goto(&self, url: &str) -> DriverResult<()> {
        let path = self
            .pages
            .keys()
            .find(|p| url.ends_with(p.as_str()))
            .cloned();

        if let Some(page) = path.as_ref().and_then(|p| self.pages.get(p)) {
            if page.panics_on_load {
                panic!("renderer crashed loading {}", url);
            }
        }

        let mut shared = self.shared.lock().unwrap();
        shared.page = PageState {
            path,
            ..PageState::default()
        };
        self.probes.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn wait_for_present(&self, selector: &Selector, timeout: Duration) -> DriverResult<()> {
        if self.count_matches(selector) > 0 {
            Ok(())
        } else {
            Err(DriverError::Timeout {
                selector: selector.to_css(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn wait_for_visible(
        &self,
        selector: &Selector,
        _timeout: Duration,
    ) -> DriverResult<Option<ElementSnapshot>> {
        let disconnected = {
            let shared = self.shared.lock().unwrap();
            self.current(&shared)
                .map(|page| page.disconnects_on_wait)
                .unwrap_or(false)
        };
        if disconnected {
            return Err(DriverError::Protocol("Disconnected".into()));
        }
        Ok(self.visible_snapshot(selector))
    }

    async fn count(&self, selector: &Selector) -> DriverResult<usize> {
        Ok(self.count_matches(selector))
    }

    async fn click_nth(&self, selector: &Selector, index: usize) -> DriverResult<()> {
        if index >= self.count_matches(selector) {
            return Err(DriverError::ElementNotFound {
                selector: format!("{} [{}]", selector, index),
            });
        }

        let mut shared = self.shared.lock().unwrap();
        let Some(page) = self.current(&shared) else {
            return Ok(());
        };
        let dom = &self.dom;

        if self.is(selector, &dom.add_to_cart) {
            Self::add_to_cart(&mut shared, &page);
        } else if self.is(selector, &dom.view_details) && page.opens_quick_view {
            shared.page.quick_view_open = true;
        } else if self.is(selector, &dom.modal_add_to_cart) {
            shared.page.quick_view_open = false;
            Self::add_to_cart(&mut shared, &page);
        }
        Ok(())
    }

    async fn text_of(&self, selector: &Selector) -> DriverResult<String> {
        if self.count_matches(selector) == 0 {
            return Err(DriverError::ElementNotFound {
                selector: selector.to_css(),
            });
        }
        let shared = self.shared.lock().unwrap();
        Ok(shared.cart_items.to_string())
    }

    async fn is_visible(&self, selector: &Selector) -> DriverResult<bool> {
        Ok(self.visible_snapshot(selector).is_some())
    }

    async fn screenshot(&self) -> DriverResult<Vec<u8>> {
        self.probes.screenshots.fetch_add(1, Ordering::SeqCst);
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }

    async fn close(&self) -> DriverResult<()> {
        self.probes.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Launcher handing out scripted sessions, or failing like a missing browser
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
    pub pages: HashMap<String, PageScript>,
    pub fail: bool,
    pub probes: Probes,
}

impl ScriptedLauncher {
    pub fn new(pages: impl IntoIterator<Item = (&'static str, PageScript)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(path, script)| (path.to_string(), script))
                .collect(),
            fail: false,
            probes: Probes::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl SessionLauncher for ScriptedLauncher {
    async fn launch(&self, _config: &BrowserConfig) -> DriverResult<Box<dyn BrowserSession>> {
        self.probes.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DriverError::Launch("chromium executable not found".into()));
        }
        Ok(Box::new(ScriptedSession::new(
            self.pages.clone(),
            self.probes.clone(),
        )))
    }
}
